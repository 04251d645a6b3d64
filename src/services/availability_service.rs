use std::collections::HashMap;

use mongodb::bson::oid::ObjectId;

use crate::models::booking::Booking;
use crate::models::room::{Room, RoomStatus};
use crate::models::room_type::RoomType;

/// What a stay needs from a room. Built either from a booking or from an
/// ad hoc availability check.
#[derive(Debug, Clone)]
pub struct StayRequest {
    pub room_type_id: Option<ObjectId>,
    pub adults: u32,
    pub children: u32,
    pub preferences: Vec<String>,
}

impl StayRequest {
    pub fn from_booking(booking: &Booking) -> Self {
        Self {
            room_type_id: Some(booking.room_type_id),
            adults: booking.adults,
            children: booking.children,
            preferences: booking.room_preferences.clone(),
        }
    }

    pub fn party_size(&self) -> u32 {
        self.adults + self.children
    }
}

/// Filter the room list down to units a stay can actually use. Room status is
/// the single source of truth for occupancy here; no interval check against
/// other bookings is performed. Input order is preserved and nothing is
/// mutated; an empty result just means no match.
pub fn find_compatible_rooms(
    rooms: &[Room],
    types_by_id: &HashMap<ObjectId, RoomType>,
    request: &StayRequest,
) -> Vec<Room> {
    rooms
        .iter()
        .filter(|room| room.status == RoomStatus::Available)
        .filter(|room| match request.room_type_id {
            Some(wanted) => room.room_type_id == wanted,
            None => true,
        })
        .filter(|room| match types_by_id.get(&room.room_type_id) {
            Some(room_type) => room_type.max_occupancy >= request.party_size(),
            None => false,
        })
        .filter(|room| {
            if request.preferences.is_empty() {
                return true;
            }
            request
                .preferences
                .iter()
                .any(|p| room.features.contains(p) || room.amenities.contains(p))
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::room_type::RoomCategory;

    fn room_type(id: ObjectId, max_occupancy: u32) -> RoomType {
        RoomType {
            id: Some(id),
            name: "Standard Twin".to_string(),
            category: RoomCategory::Standard,
            base_price: 2000.0,
            max_occupancy,
            size_sqft: Some(260),
            amenities: vec![],
            features: vec![],
            created_at: None,
            updated_at: None,
        }
    }

    fn room(number: &str, type_id: ObjectId, status: RoomStatus) -> Room {
        Room {
            id: Some(ObjectId::new()),
            number: number.to_string(),
            floor: 1,
            room_type_id: type_id,
            status,
            amenities: vec![],
            features: vec![],
            current_booking: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn request(type_id: Option<ObjectId>, adults: u32, children: u32) -> StayRequest {
        StayRequest {
            room_type_id: type_id,
            adults,
            children,
            preferences: vec![],
        }
    }

    #[test]
    fn test_only_available_rooms_match() {
        let type_id = ObjectId::new();
        let types = HashMap::from([(type_id, room_type(type_id, 3))]);
        let rooms = vec![
            room("101", type_id, RoomStatus::Available),
            room("102", type_id, RoomStatus::Occupied),
            room("103", type_id, RoomStatus::Cleaning),
            room("104", type_id, RoomStatus::Maintenance),
            room("105", type_id, RoomStatus::OutOfOrder),
        ];

        let matches = find_compatible_rooms(&rooms, &types, &request(Some(type_id), 2, 0));
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].number, "101");
        assert!(matches.iter().all(|r| r.status == RoomStatus::Available));
    }

    #[test]
    fn test_capacity_is_enforced() {
        let small = ObjectId::new();
        let large = ObjectId::new();
        let types = HashMap::from([(small, room_type(small, 2)), (large, room_type(large, 5))]);
        let rooms = vec![
            room("201", small, RoomStatus::Available),
            room("202", large, RoomStatus::Available),
        ];

        let matches = find_compatible_rooms(&rooms, &types, &request(None, 2, 2));
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].number, "202");
    }

    #[test]
    fn test_type_filter_and_unconstrained() {
        let a = ObjectId::new();
        let b = ObjectId::new();
        let types = HashMap::from([(a, room_type(a, 4)), (b, room_type(b, 4))]);
        let rooms = vec![
            room("301", a, RoomStatus::Available),
            room("302", b, RoomStatus::Available),
        ];

        let constrained = find_compatible_rooms(&rooms, &types, &request(Some(b), 2, 0));
        assert_eq!(constrained.len(), 1);
        assert_eq!(constrained[0].number, "302");

        let unconstrained = find_compatible_rooms(&rooms, &types, &request(None, 2, 0));
        assert_eq!(unconstrained.len(), 2);
    }

    #[test]
    fn test_preferences_intersect_features_or_amenities() {
        let type_id = ObjectId::new();
        let types = HashMap::from([(type_id, room_type(type_id, 3))]);

        let mut sea_view = room("401", type_id, RoomStatus::Available);
        sea_view.features = vec!["sea_view".to_string()];
        let mut minibar = room("402", type_id, RoomStatus::Available);
        minibar.amenities = vec!["minibar".to_string()];
        let plain = room("403", type_id, RoomStatus::Available);

        let rooms = vec![sea_view, minibar, plain];
        let mut req = request(Some(type_id), 2, 0);
        req.preferences = vec!["sea_view".to_string(), "minibar".to_string()];

        let matches = find_compatible_rooms(&rooms, &types, &req);
        let numbers: Vec<&str> = matches.iter().map(|r| r.number.as_str()).collect();
        assert_eq!(numbers, vec!["401", "402"]);
    }

    #[test]
    fn test_input_order_preserved_and_empty_result_is_ok() {
        let type_id = ObjectId::new();
        let types = HashMap::from([(type_id, room_type(type_id, 2))]);
        let rooms = vec![
            room("503", type_id, RoomStatus::Available),
            room("501", type_id, RoomStatus::Available),
            room("502", type_id, RoomStatus::Available),
        ];

        let matches = find_compatible_rooms(&rooms, &types, &request(Some(type_id), 2, 0));
        let numbers: Vec<&str> = matches.iter().map(|r| r.number.as_str()).collect();
        assert_eq!(numbers, vec!["503", "501", "502"]);

        let none = find_compatible_rooms(&rooms, &types, &request(Some(type_id), 4, 1));
        assert!(none.is_empty());
    }

    #[test]
    fn test_room_with_unknown_type_never_matches() {
        let type_id = ObjectId::new();
        let types: HashMap<ObjectId, RoomType> = HashMap::new();
        let rooms = vec![room("601", type_id, RoomStatus::Available)];

        let matches = find_compatible_rooms(&rooms, &types, &request(None, 1, 0));
        assert!(matches.is_empty());
    }
}
