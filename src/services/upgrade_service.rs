use std::fmt;

use mongodb::bson::DateTime;

use crate::models::booking::Booking;
use crate::models::room_type::RoomType;
use crate::models::upgrade::UpgradeOption;
use crate::services::pricing_service::round_money;

#[derive(Debug, PartialEq)]
pub enum UpgradeError {
    BookingNotUpgradable(String),
    NotAnUpgrade(String),
}

impl fmt::Display for UpgradeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpgradeError::BookingNotUpgradable(msg) => {
                write!(f, "booking not upgradable: {}", msg)
            }
            UpgradeError::NotAnUpgrade(msg) => write!(f, "not an upgrade: {}", msg),
        }
    }
}

/// What the guest gains by moving up: amenities and features the target has
/// that the current type lacks, plus the size increase when known.
fn benefits_over(current: &RoomType, target: &RoomType) -> Vec<String> {
    let mut benefits: Vec<String> = target
        .amenities
        .iter()
        .filter(|a| !current.amenities.contains(*a))
        .chain(
            target
                .features
                .iter()
                .filter(|f| !current.features.contains(*f)),
        )
        .cloned()
        .collect();

    if let (Some(current_size), Some(target_size)) = (current.size_sqft, target.size_sqft) {
        if target_size > current_size {
            benefits.push(format!("{} sq ft larger", target_size - current_size));
        }
    }

    benefits
}

/// Every room type strictly above the current tier, closest upgrade first.
pub fn list_upgrades(
    current: &RoomType,
    all_types: &[RoomType],
    nights: i64,
) -> Vec<UpgradeOption> {
    let mut options: Vec<UpgradeOption> = all_types
        .iter()
        .filter(|t| t.category.tier() > current.category.tier())
        .filter_map(|t| {
            let room_type_id = t.id?;
            let price_delta = t.base_price - current.base_price;
            // A zero-priced current type has no meaningful percentage; keep
            // the field finite so it serializes as a number.
            let upgrade_percentage = if current.base_price > 0.0 {
                round_money(price_delta / current.base_price * 100.0)
            } else {
                0.0
            };
            Some(UpgradeOption {
                room_type_id,
                name: t.name.clone(),
                category: t.category,
                tier: t.category.tier(),
                base_price: t.base_price,
                upgrade_fee: round_money(price_delta * nights as f64),
                upgrade_percentage,
                benefits: benefits_over(current, t),
            })
        })
        .collect();

    options.sort_by_key(|o| o.tier);
    options
}

/// Move the booking to a higher room type and add the fee (or the staff
/// override) to its total. Any existing room binding is cleared so the
/// booking goes back through allocation against the new type; the caller
/// releases the physical room.
pub fn apply_upgrade(
    booking: &mut Booking,
    current: &RoomType,
    target: &RoomType,
    override_price: Option<f64>,
) -> Result<f64, UpgradeError> {
    if booking.status.is_terminal() {
        return Err(UpgradeError::BookingNotUpgradable(format!(
            "booking is {}",
            booking.status.as_str()
        )));
    }
    if target.category.tier() <= current.category.tier() {
        return Err(UpgradeError::NotAnUpgrade(format!(
            "{} is not above {}",
            target.category.as_str(),
            current.category.as_str()
        )));
    }
    let target_id = target
        .id
        .ok_or_else(|| UpgradeError::NotAnUpgrade("target room type has no id".to_string()))?;

    let fee = override_price.unwrap_or_else(|| {
        round_money((target.base_price - current.base_price) * booking.nights() as f64)
    });

    booking.room_type_id = target_id;
    booking.room_id = None;
    booking.total_amount = round_money(booking.total_amount + fee);
    booking.updated_at = Some(DateTime::now());

    Ok(fee)
}
