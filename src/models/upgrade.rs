use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::models::room_type::RoomCategory;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct UpgradeOption {
    pub room_type_id: ObjectId,
    pub name: String,
    pub category: RoomCategory,
    pub tier: u8,
    pub base_price: f64,
    pub upgrade_fee: f64,
    pub upgrade_percentage: f64,
    pub benefits: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct UpgradeInput {
    pub room_type_id: String,
    pub override_price: Option<f64>,
    pub reason: Option<String>,
}
