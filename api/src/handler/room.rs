use crate::{
    extractor::AuthorizedUser,
    model::room::{
        CreateRoomRequest, PaginatedRoomResponse, RoomListQuery, RoomResponse, UpdateRoomRequest,
        UpdateRoomRequestWithId,
    },
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::model::id::RoomId;
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub async fn register_room(
    _user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateRoomRequest>,
) -> AppResult<StatusCode> {
    req.validate(&())?;

    registry
        .room_repository()
        .create(req.into())
        .await
        .map(|_| StatusCode::CREATED)
}

pub async fn show_room_list(
    _user: AuthorizedUser,
    Query(query): Query<RoomListQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<PaginatedRoomResponse>> {
    query.validate(&())?;

    registry
        .room_repository()
        .find_all(query.into())
        .await
        .map(PaginatedRoomResponse::from)
        .map(Json)
}

pub async fn show_room(
    _user: AuthorizedUser,
    Path(room_id): Path<RoomId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<RoomResponse>> {
    registry
        .room_repository()
        .find_by_id(room_id)
        .await
        .and_then(|room| match room {
            Some(room) => Ok(Json(room.into())),
            None => Err(AppError::EntityNotFound("not found".into())),
        })
}

pub async fn update_room(
    _user: AuthorizedUser,
    Path(room_id): Path<RoomId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateRoomRequest>,
) -> AppResult<StatusCode> {
    req.validate(&())?;

    let update_room = UpdateRoomRequestWithId::new(room_id, req);
    registry
        .room_repository()
        .update(update_room.into())
        .await
        .map(|_| StatusCode::OK)
}

pub async fn delete_room(
    _user: AuthorizedUser,
    Path(room_id): Path<RoomId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .room_repository()
        .delete(room_id)
        .await
        .map(|_| StatusCode::OK)
}
