use kernel::model::{id::RoomId, room::Room};

#[derive(sqlx::FromRow)]
pub struct RoomRow {
    pub room_id: RoomId,
    pub room_name: String,
    pub capacity: i32,
    pub location: Option<String>,
    pub description: Option<String>,
}

impl From<RoomRow> for Room {
    fn from(value: RoomRow) -> Self {
        let RoomRow {
            room_id,
            room_name,
            capacity,
            location,
            description,
        } = value;
        Room {
            room_id,
            room_name,
            capacity,
            location,
            description,
        }
    }
}

// ページネーション用の adapter 内部の型
#[derive(sqlx::FromRow)]
pub struct PaginatedRoomRow {
    pub total: i64,
    pub room_id: RoomId,
}
