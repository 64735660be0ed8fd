use crate::{
    extractor::AuthorizedUser,
    model::reservation::{
        CreateReservationRequest, ReservationListQuery, ReservationResponse, ReservationsResponse,
    },
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use kernel::model::{
    id::{ReservationId, RoomId},
    reservation::{event::CreateReservation, TimeSlot},
};
use registry::AppRegistry;
use shared::error::AppResult;

pub async fn reserve_room(
    user: AuthorizedUser,
    Path(room_id): Path<RoomId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateReservationRequest>,
) -> AppResult<(StatusCode, Json<ReservationResponse>)> {
    // 時間帯の妥当性（end > start）はここで検証される
    let slot = TimeSlot::new(req.start_time, req.end_time)?;
    let create_reservation = CreateReservation::new(room_id, user.id(), req.date, slot);

    // 予約を作成する（重複する時間帯があればここで Err になる）
    let reservation_id = registry
        .reservation_repository()
        .create(create_reservation)
        .await?;

    // 作成した予約を取得してレスポンスとして返す
    let reservation = registry
        .reservation_repository()
        .find_by_id(reservation_id)
        .await?;

    Ok((StatusCode::CREATED, Json(reservation.into())))
}

pub async fn show_room_reservations(
    _user: AuthorizedUser,
    Path(room_id): Path<RoomId>,
    Query(query): Query<ReservationListQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ReservationsResponse>> {
    registry
        .reservation_repository()
        .find_by_room(room_id, query.date)
        .await
        .map(ReservationsResponse::from)
        .map(Json)
}

pub async fn show_my_reservations(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ReservationsResponse>> {
    registry
        .reservation_repository()
        .find_by_user_id(user.id())
        .await
        .map(ReservationsResponse::from)
        .map(Json)
}

pub async fn show_reservation(
    _user: AuthorizedUser,
    Path(reservation_id): Path<ReservationId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ReservationResponse>> {
    registry
        .reservation_repository()
        .find_by_id(reservation_id)
        .await
        .map(ReservationResponse::from)
        .map(Json)
}

pub async fn cancel_reservation(
    _user: AuthorizedUser,
    Path(reservation_id): Path<ReservationId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .reservation_repository()
        .delete(reservation_id)
        .await
        .map(|_| StatusCode::OK)
}
