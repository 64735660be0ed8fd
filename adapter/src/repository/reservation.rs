use crate::database::{
    model::reservation::{ReservationRow, ReservedSlotRow},
    ConnectionPool,
};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use derive_new::new;
use kernel::model::{
    id::{ReservationId, RoomId, UserId},
    reservation::{event::CreateReservation, Reservation, TimeSlot},
};
use kernel::repository::reservation::ReservationRepository;
use shared::error::{AppError, AppResult};

// PostgreSQL の直列化失敗（SQLSTATE 40001）
const SERIALIZATION_FAILURE: &str = "40001";

#[derive(new)]
pub struct ReservationRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl ReservationRepository for ReservationRepositoryImpl {
    // 予約操作を行う
    async fn create(&self, event: CreateReservation) -> AppResult<ReservationId> {
        // ストレージに触れる前の検証。
        // 時間帯そのものの妥当性（end > start）は TimeSlot 生成時に検証済みのため、
        // ここでは過去日でないことのみ確認する
        let today = Utc::now().date_naive();
        if event.reserved_on < today {
            return Err(AppError::PastDate(
                "過去の日付に予約を作成することはできません。".into(),
            ));
        }

        let mut tx = self.db.begin().await?;

        // トランザクション分離レベルを SERIALIZABLE に設定する。
        // 同一会議室・同一日に対する重複確認と INSERT をひとつの許可判定として
        // 直列化するため、これより弱い分離レベルでは check-then-insert の競合が残る
        self.set_transaction_serializable(&mut tx).await?;

        // 事前のチェックとして、以下を調べる。
        // - 指定の会議室 ID をもつ会議室が存在するか
        // - 存在した場合、希望時間帯が同じ日の既存予約と重なっていないか
        //
        // 上記の両方が Yes だった場合、このブロック以降の処理に進む
        {
            //
            // ① 会議室の存在確認
            //
            let room_row = sqlx::query_scalar::<_, RoomId>(
                r#"
                SELECT room_id
                FROM rooms
                WHERE room_id = $1
                "#,
            )
            .bind(event.room_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

            if room_row.is_none() {
                return Err(AppError::EntityNotFound(format!(
                    "会議室（{}）が見つかりませんでした。",
                    event.room_id
                )));
            }

            //
            // ② 希望時間帯が同じ日の既存予約と重なっていないか確認
            //    重複条件：
            //        existing.start < new.end AND new.start < existing.end
            //
            let reserved = sqlx::query_as::<_, ReservedSlotRow>(
                r#"
                SELECT start_time, end_time
                FROM reservations
                WHERE room_id = $1
                  AND reserved_on = $2
                "#,
            )
            .bind(event.room_id)
            .bind(event.reserved_on)
            .fetch_all(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

            for row in reserved {
                let existing = TimeSlot::try_from(row)?;
                if existing.overlaps(&event.slot) {
                    return Err(AppError::SlotUnavailable(format!(
                        "会議室（{}）は指定時間帯にすでに予約が存在します。",
                        event.room_id
                    )));
                }
            }

            //
            // ここまでのチェックを通過すれば予約を作成する
            //
        }

        // 予約処理を行う、すなわち reservations テーブルにレコードを追加する
        let reservation_id = ReservationId::new();
        let res = sqlx::query(
            r#"
                INSERT INTO reservations
                (reservation_id, room_id, user_id, reserved_on, start_time, end_time, created_at)
                VALUES ($1, $2, $3, $4, $5, $6, NOW())
            "#,
        )
        .bind(reservation_id)
        .bind(event.room_id)
        .bind(event.reserved_by)
        .bind(event.reserved_on)
        .bind(event.slot.start_time())
        .bind(event.slot.end_time())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if is_serialization_failure(&e) {
                concurrent_admission_conflict()
            } else {
                AppError::SpecificOperationError(e)
            }
        })?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No reservation record has been created".into(),
            ));
        }

        tx.commit().await.map_err(|e| {
            if is_serialization_failure(&e) {
                concurrent_admission_conflict()
            } else {
                AppError::TransactionError(e)
            }
        })?;

        Ok(reservation_id)
    }

    // 予約を取り消す
    async fn delete(&self, reservation_id: ReservationId) -> AppResult<()> {
        let res = sqlx::query(
            r#"
                DELETE FROM reservations WHERE reservation_id = $1
            "#,
        )
        .bind(reservation_id)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "予約（{}）が見つかりませんでした。",
                reservation_id
            )));
        }

        Ok(())
    }

    // 会議室 ID に紐づく予約一覧を取得する
    async fn find_by_room(
        &self,
        room_id: RoomId,
        reserved_on: Option<NaiveDate>,
    ) -> AppResult<Vec<Reservation>> {
        // rooms・users テーブルと INNER JOIN し、表示用の情報も一緒に抽出する
        // 出力するレコードは開始時刻の早い順に並べる
        let rows = match reserved_on {
            Some(day) => {
                sqlx::query_as::<_, ReservationRow>(
                    r#"
                        SELECT
                            r.reservation_id,
                            r.room_id,
                            r.user_id,
                            u.user_name,
                            m.room_name,
                            r.reserved_on,
                            r.start_time,
                            r.end_time,
                            r.created_at
                        FROM reservations AS r
                        INNER JOIN rooms AS m ON r.room_id = m.room_id
                        INNER JOIN users AS u ON r.user_id = u.user_id
                        WHERE r.room_id = $1
                          AND r.reserved_on = $2
                        ORDER BY r.start_time ASC
                    "#,
                )
                .bind(room_id)
                .bind(day)
                .fetch_all(self.db.inner_ref())
                .await
            }
            None => {
                sqlx::query_as::<_, ReservationRow>(
                    r#"
                        SELECT
                            r.reservation_id,
                            r.room_id,
                            r.user_id,
                            u.user_name,
                            m.room_name,
                            r.reserved_on,
                            r.start_time,
                            r.end_time,
                            r.created_at
                        FROM reservations AS r
                        INNER JOIN rooms AS m ON r.room_id = m.room_id
                        INNER JOIN users AS u ON r.user_id = u.user_id
                        WHERE r.room_id = $1
                        ORDER BY r.reserved_on ASC, r.start_time ASC
                    "#,
                )
                .bind(room_id)
                .fetch_all(self.db.inner_ref())
                .await
            }
        }
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(Reservation::try_from).collect()
    }

    // reservation_id から Reservation 型のデータを渡す
    async fn find_by_id(&self, reservation_id: ReservationId) -> AppResult<Reservation> {
        let row = sqlx::query_as::<_, ReservationRow>(
            r#"
                SELECT
                    r.reservation_id,
                    r.room_id,
                    r.user_id,
                    u.user_name,
                    m.room_name,
                    r.reserved_on,
                    r.start_time,
                    r.end_time,
                    r.created_at
                FROM reservations AS r
                INNER JOIN rooms AS m ON r.room_id = m.room_id
                INNER JOIN users AS u ON r.user_id = u.user_id
                WHERE r.reservation_id = $1
            "#,
        )
        .bind(reservation_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        match row {
            Some(row) => row.try_into(),
            None => Err(AppError::EntityNotFound(format!(
                "予約（{}）が見つかりませんでした。",
                reservation_id
            ))),
        }
    }

    // ユーザー ID に紐づく予約一覧を取得する
    async fn find_by_user_id(&self, user_id: UserId) -> AppResult<Vec<Reservation>> {
        let rows = sqlx::query_as::<_, ReservationRow>(
            r#"
                SELECT
                    r.reservation_id,
                    r.room_id,
                    r.user_id,
                    u.user_name,
                    m.room_name,
                    r.reserved_on,
                    r.start_time,
                    r.end_time,
                    r.created_at
                FROM reservations AS r
                INNER JOIN rooms AS m ON r.room_id = m.room_id
                INNER JOIN users AS u ON r.user_id = u.user_id
                WHERE r.user_id = $1
                ORDER BY r.reserved_on ASC, r.start_time ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(Reservation::try_from).collect()
    }
}

impl ReservationRepositoryImpl {
    // create メソッドでのトランザクションを利用するにあたり
    // トランザクション分離レベルを SERIALIZABLE にするために
    // 内部的に使うメソッド
    async fn set_transaction_serializable(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    ) -> AppResult<()> {
        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut **tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        Ok(())
    }
}

fn is_serialization_failure(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .and_then(|db| db.code())
        .as_deref()
        == Some(SERIALIZATION_FAILURE)
}

// 直列化失敗は同じ会議室・同じ日への同時予約が競合した合図なので、
// 予約不可として呼び出し側に返す
fn concurrent_admission_conflict() -> AppError {
    AppError::SlotUnavailable("同時に行われた別の予約と競合しました。".into())
}
