use serde::{Deserialize, Serialize};

/// An optional charge attached to a booking. Per-night add-ons multiply by
/// the stay length; flat ones bill once.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AddOn {
    pub name: String,
    pub rate: f64,
    pub per_night: bool,
}

impl AddOn {
    pub fn flat(name: &str, rate: f64) -> Self {
        Self {
            name: name.to_string(),
            rate,
            per_night: false,
        }
    }

    pub fn per_night(name: &str, rate: f64) -> Self {
        Self {
            name: name.to_string(),
            rate,
            per_night: true,
        }
    }
}

/// Derived quote for a stay. Never persisted on its own; the total lands on
/// the booking and the breakdown is recomputed from inputs whenever needed.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PricingBreakdown {
    pub nights: u32,
    pub room_charges: f64,
    pub extra_services: f64,
    pub subtotal: f64,
    pub taxes: f64,
    pub discount: f64,
    pub total: f64,
}
