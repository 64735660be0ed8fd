use crate::model::id::RoomId;

pub mod event;

#[derive(Debug)]
pub struct Room {
    pub room_id: RoomId,
    pub room_name: String,
    pub capacity: i32,
    pub location: Option<String>,
    pub description: Option<String>,
}
