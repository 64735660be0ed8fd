use crate::model::{
    id::{ReservationId, RoomId, UserId},
    reservation::{event::CreateReservation, Reservation},
};
use async_trait::async_trait;
use chrono::NaiveDate;
use shared::error::AppResult;

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    // 予約操作を行う。同一会議室・同一日の既存予約と時間帯が重なる場合は失敗する
    async fn create(&self, event: CreateReservation) -> AppResult<ReservationId>;
    // 予約を取り消す
    async fn delete(&self, reservation_id: ReservationId) -> AppResult<()>;
    // 会議室 ID に紐づく予約一覧を取得する（日付指定があればその日のみ、開始時刻昇順）
    async fn find_by_room(
        &self,
        room_id: RoomId,
        reserved_on: Option<NaiveDate>,
    ) -> AppResult<Vec<Reservation>>;
    // reservation_id から Reservation 型のデータを渡す
    async fn find_by_id(&self, reservation_id: ReservationId) -> AppResult<Reservation>;
    // ユーザー ID に紐づく予約一覧を取得する
    async fn find_by_user_id(&self, user_id: UserId) -> AppResult<Vec<Reservation>>;
}
