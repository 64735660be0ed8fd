use crate::model::id::RoomId;

#[derive(Debug)]
pub struct CreateRoom {
    pub room_name: String,
    pub capacity: i32,
    pub location: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug)]
pub struct UpdateRoom {
    pub room_id: RoomId,
    pub room_name: String,
    pub capacity: i32,
    pub location: Option<String>,
    pub description: Option<String>,
}
