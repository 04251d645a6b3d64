use mongodb::bson::oid::ObjectId;
use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RoomStatus {
    Available,
    Occupied,
    Maintenance,
    Cleaning,
    OutOfOrder,
}

impl RoomStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomStatus::Available => "available",
            RoomStatus::Occupied => "occupied",
            RoomStatus::Maintenance => "maintenance",
            RoomStatus::Cleaning => "cleaning",
            RoomStatus::OutOfOrder => "out_of_order",
        }
    }
}

/// One physical unit of inventory. `status == Occupied` holds exactly when
/// `current_booking` is set; allocation and release are the only writers of
/// that pair.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Room {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub number: String,
    pub floor: i32,
    pub room_type_id: ObjectId,
    pub status: RoomStatus,
    pub amenities: Vec<String>,
    pub features: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_booking: Option<ObjectId>,
    pub created_at: Option<DateTime>,
    pub updated_at: Option<DateTime>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct RoomStatusInput {
    pub status: RoomStatus,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct RoomListQuery {
    pub status: Option<RoomStatus>,
}
