use derive_new::new;
use garde::Validate;
use kernel::model::{
    id::RoomId,
    list::{ListOptions, PaginatedList},
    room::{
        event::{CreateRoom, UpdateRoom},
        Room,
    },
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    #[garde(length(min = 1))]
    pub name: String,
    #[garde(range(min = 1))]
    pub capacity: i32,
    #[garde(skip)]
    pub location: Option<String>,
    #[garde(skip)]
    pub description: Option<String>,
}

impl From<CreateRoomRequest> for CreateRoom {
    fn from(value: CreateRoomRequest) -> Self {
        let CreateRoomRequest {
            name,
            capacity,
            location,
            description,
        } = value;
        CreateRoom {
            room_name: name,
            capacity,
            location,
            description,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoomRequest {
    #[garde(length(min = 1))]
    pub name: String,
    #[garde(range(min = 1))]
    pub capacity: i32,
    #[garde(skip)]
    pub location: Option<String>,
    #[garde(skip)]
    pub description: Option<String>,
}

#[derive(new)]
pub struct UpdateRoomRequestWithId(RoomId, UpdateRoomRequest);

impl From<UpdateRoomRequestWithId> for UpdateRoom {
    fn from(value: UpdateRoomRequestWithId) -> Self {
        let UpdateRoomRequestWithId(
            room_id,
            UpdateRoomRequest {
                name,
                capacity,
                location,
                description,
            },
        ) = value;
        UpdateRoom {
            room_id,
            room_name: name,
            capacity,
            location,
            description,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RoomListQuery {
    #[garde(range(min = 0))]
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[garde(range(min = 0))]
    #[serde(default)]
    pub offset: i64,
}

const DEFAULT_LIMIT: i64 = 20;
const fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

impl From<RoomListQuery> for ListOptions {
    fn from(value: RoomListQuery) -> Self {
        let RoomListQuery { limit, offset } = value;
        ListOptions { limit, offset }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomResponse {
    pub id: RoomId,
    pub name: String,
    pub capacity: i32,
    pub location: Option<String>,
    pub description: Option<String>,
}

impl From<Room> for RoomResponse {
    fn from(value: Room) -> Self {
        let Room {
            room_id,
            room_name,
            capacity,
            location,
            description,
        } = value;
        Self {
            id: room_id,
            name: room_name,
            capacity,
            location,
            description,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedRoomResponse {
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
    pub items: Vec<RoomResponse>,
}

impl From<PaginatedList<Room>> for PaginatedRoomResponse {
    fn from(value: PaginatedList<Room>) -> Self {
        let PaginatedList {
            total,
            limit,
            offset,
            items,
        } = value;
        Self {
            total,
            limit,
            offset,
            items: items.into_iter().map(RoomResponse::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_name_or_zero_capacity_fails_validation() {
        let req = CreateRoomRequest {
            name: "".into(),
            capacity: 10,
            location: None,
            description: None,
        };
        assert!(req.validate(&()).is_err());

        let req = CreateRoomRequest {
            name: "Room A".into(),
            capacity: 0,
            location: None,
            description: None,
        };
        assert!(req.validate(&()).is_err());
    }

    #[test]
    fn create_request_deserializes_from_camel_case_json() {
        let req: CreateRoomRequest = serde_json::from_str(
            r#"{"name":"Room A","capacity":8,"location":"3F","description":"Projector"}"#,
        )
        .unwrap();
        assert!(req.validate(&()).is_ok());

        let event = CreateRoom::from(req);
        assert_eq!(event.room_name, "Room A");
        assert_eq!(event.capacity, 8);
        assert_eq!(event.location.as_deref(), Some("3F"));
    }

    #[test]
    fn list_query_falls_back_to_default_limit() {
        let query: RoomListQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.limit, DEFAULT_LIMIT);
        assert_eq!(query.offset, 0);
    }
}
