use std::fmt;

use crate::models::pricing::{AddOn, PricingBreakdown};
use crate::models::room_type::RoomType;

/// GST on lodging, applied to the pre-discount subtotal.
pub const TAX_RATE: f64 = 0.18;

#[derive(Debug, PartialEq)]
pub enum PricingError {
    InvalidNights(i64),
    UnknownAddOn(String),
    UnknownCoupon(String),
}

impl fmt::Display for PricingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingError::InvalidNights(n) => {
                write!(f, "stay must be at least one night, got {}", n)
            }
            PricingError::UnknownAddOn(name) => write!(f, "unknown add-on: {}", name),
            PricingError::UnknownCoupon(code) => write!(f, "unknown coupon code: {}", code),
        }
    }
}

/// Round to the currency's minor unit (paise).
pub fn round_money(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

pub struct PricingService;

impl PricingService {
    /// The add-on charges the front desk can attach to a booking.
    pub fn add_on_catalog() -> Vec<AddOn> {
        vec![
            AddOn::per_night("extra_bed", 500.0),
            AddOn::flat("early_check_in", 1000.0),
            AddOn::flat("late_check_out", 1000.0),
            AddOn::flat("airport_transfer", 2000.0),
            AddOn::per_night("breakfast", 350.0),
            AddOn::per_night("half_board", 750.0),
            AddOn::per_night("full_board", 1200.0),
        ]
    }

    /// Resolve client-supplied add-on names against the catalog so rates are
    /// never taken from the request body.
    pub fn resolve_add_ons(names: &[String]) -> Result<Vec<AddOn>, PricingError> {
        let catalog = Self::add_on_catalog();
        names
            .iter()
            .map(|name| {
                catalog
                    .iter()
                    .find(|a| a.name == *name)
                    .cloned()
                    .ok_or_else(|| PricingError::UnknownAddOn(name.clone()))
            })
            .collect()
    }

    /// Discount rate for a coupon code, if the code exists.
    pub fn coupon_rate(code: &str) -> Option<f64> {
        match code {
            "SAVE10" => Some(0.10),
            "WELCOME5" => Some(0.05),
            _ => None,
        }
    }

    /// Quote a stay. Pure function of its inputs; callers recompute whenever
    /// any input changes rather than caching a breakdown.
    pub fn quote(
        room_type: &RoomType,
        nights: i64,
        room_count: u32,
        add_ons: &[AddOn],
        coupon_code: Option<&str>,
    ) -> Result<PricingBreakdown, PricingError> {
        if nights <= 0 {
            return Err(PricingError::InvalidNights(nights));
        }

        let nights_f = nights as f64;
        let room_charges = room_type.base_price * nights_f * room_count as f64;

        let extra_services: f64 = add_ons
            .iter()
            .map(|a| {
                if a.per_night {
                    a.rate * nights_f
                } else {
                    a.rate
                }
            })
            .sum();

        let subtotal = room_charges + extra_services;
        let taxes = subtotal * TAX_RATE;

        let discount = match coupon_code.filter(|c| !c.is_empty()) {
            Some(code) => {
                let rate =
                    Self::coupon_rate(code).ok_or_else(|| PricingError::UnknownCoupon(code.to_string()))?;
                subtotal * rate
            }
            None => 0.0,
        };

        let total = subtotal + taxes - discount;

        Ok(PricingBreakdown {
            nights: nights as u32,
            room_charges: round_money(room_charges),
            extra_services: round_money(extra_services),
            subtotal: round_money(subtotal),
            taxes: round_money(taxes),
            discount: round_money(discount),
            total: round_money(total),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deluxe(base_price: f64) -> RoomType {
        RoomType {
            id: None,
            name: "Deluxe King".to_string(),
            category: crate::models::room_type::RoomCategory::Deluxe,
            base_price,
            max_occupancy: 3,
            size_sqft: Some(320),
            amenities: vec!["wifi".to_string()],
            features: vec![],
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_three_nights_no_extras() {
        let quote = PricingService::quote(&deluxe(2000.0), 3, 1, &[], None).unwrap();
        assert_eq!(quote.room_charges, 6000.0);
        assert_eq!(quote.extra_services, 0.0);
        assert_eq!(quote.taxes, 1080.0);
        assert_eq!(quote.discount, 0.0);
        assert_eq!(quote.total, 7080.0);
    }

    #[test]
    fn test_add_ons_per_night_and_flat() {
        let add_ons = vec![
            AddOn::per_night("extra_bed", 500.0),
            AddOn::flat("airport_transfer", 2000.0),
        ];
        let quote = PricingService::quote(&deluxe(2000.0), 3, 1, &add_ons, None).unwrap();
        assert_eq!(quote.extra_services, 3500.0);
        assert_eq!(quote.subtotal, 9500.0);
        assert_eq!(quote.taxes, 1710.0);
        assert_eq!(quote.total, 11210.0);
    }

    #[test]
    fn test_coupon_discount() {
        let quote = PricingService::quote(&deluxe(2000.0), 3, 1, &[], Some("SAVE10")).unwrap();
        assert_eq!(quote.discount, 600.0);
        assert_eq!(quote.total, 6480.0);
    }

    #[test]
    fn test_unknown_coupon_rejected() {
        let err = PricingService::quote(&deluxe(2000.0), 3, 1, &[], Some("BOGUS")).unwrap_err();
        assert_eq!(err, PricingError::UnknownCoupon("BOGUS".to_string()));
    }

    #[test]
    fn test_non_positive_nights_rejected() {
        assert_eq!(
            PricingService::quote(&deluxe(2000.0), 0, 1, &[], None).unwrap_err(),
            PricingError::InvalidNights(0)
        );
        assert_eq!(
            PricingService::quote(&deluxe(2000.0), -2, 1, &[], None).unwrap_err(),
            PricingError::InvalidNights(-2)
        );
    }

    #[test]
    fn test_room_count_multiplies_room_charges() {
        let quote = PricingService::quote(&deluxe(2000.0), 3, 2, &[], None).unwrap();
        assert_eq!(quote.room_charges, 12000.0);
    }

    #[test]
    fn test_total_is_exact_sum_of_parts() {
        let add_ons = vec![
            AddOn::per_night("breakfast", 350.0),
            AddOn::flat("late_check_out", 1000.0),
        ];
        let quote =
            PricingService::quote(&deluxe(2450.0), 5, 2, &add_ons, Some("WELCOME5")).unwrap();
        let recomposed = round_money(
            quote.room_charges + quote.extra_services + quote.taxes - quote.discount,
        );
        assert_eq!(quote.total, recomposed);
    }

    #[test]
    fn test_monotonic_in_nights_and_add_ons() {
        let room_type = deluxe(1800.0);
        let mut previous = 0.0;
        for nights in 1..=14 {
            let quote = PricingService::quote(&room_type, nights, 1, &[], None).unwrap();
            assert!(quote.total >= previous);
            previous = quote.total;
        }

        let catalog = PricingService::add_on_catalog();
        let mut previous = 0.0;
        for count in 0..=catalog.len() {
            let quote =
                PricingService::quote(&room_type, 3, 1, &catalog[..count], None).unwrap();
            assert!(quote.total >= previous);
            previous = quote.total;
        }
    }

    #[test]
    fn test_resolve_add_ons_rejects_unknown_names() {
        let names = vec!["extra_bed".to_string(), "helipad".to_string()];
        assert_eq!(
            PricingService::resolve_add_ons(&names).unwrap_err(),
            PricingError::UnknownAddOn("helipad".to_string())
        );
    }
}
