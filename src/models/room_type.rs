use mongodb::bson::oid::ObjectId;
use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};

/// Ordered room categories. `tier` gives the total order used to decide
/// which categories count as an upgrade.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RoomCategory {
    Standard,
    Deluxe,
    Premium,
    Suite,
    Presidential,
}

impl RoomCategory {
    pub fn tier(&self) -> u8 {
        match self {
            RoomCategory::Standard => 1,
            RoomCategory::Deluxe => 2,
            RoomCategory::Premium => 3,
            RoomCategory::Suite => 4,
            RoomCategory::Presidential => 5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RoomCategory::Standard => "standard",
            RoomCategory::Deluxe => "deluxe",
            RoomCategory::Premium => "premium",
            RoomCategory::Suite => "suite",
            RoomCategory::Presidential => "presidential",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RoomType {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub category: RoomCategory,
    pub base_price: f64,
    pub max_occupancy: u32,
    pub size_sqft: Option<u32>,
    pub amenities: Vec<String>,
    pub features: Vec<String>,
    pub created_at: Option<DateTime>,
    pub updated_at: Option<DateTime>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_order_is_total_and_strict() {
        let categories = [
            RoomCategory::Standard,
            RoomCategory::Deluxe,
            RoomCategory::Premium,
            RoomCategory::Suite,
            RoomCategory::Presidential,
        ];

        for pair in categories.windows(2) {
            assert!(pair[0].tier() < pair[1].tier());
        }
    }
}
