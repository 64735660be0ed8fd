use crate::database::{
    model::room::{PaginatedRoomRow, RoomRow},
    ConnectionPool,
};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::RoomId,
    list::{ListOptions, PaginatedList},
    room::{
        event::{CreateRoom, UpdateRoom},
        Room,
    },
};
use kernel::repository::room::RoomRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct RoomRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl RoomRepository for RoomRepositoryImpl {
    async fn create(&self, event: CreateRoom) -> AppResult<RoomId> {
        let room_id = RoomId::new();
        sqlx::query(
            r#"
                INSERT INTO rooms (room_id, room_name, capacity, location, description)
                VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(room_id)
        .bind(&event.room_name)
        .bind(event.capacity)
        .bind(&event.location)
        .bind(&event.description)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(room_id)
    }

    async fn find_all(&self, options: ListOptions) -> AppResult<PaginatedList<Room>> {
        let ListOptions { limit, offset } = options;

        // 最初にページに含まれる会議室 ID と総件数を取得し、
        // 続けてその ID に対応するレコードを取得する
        let rows = sqlx::query_as::<_, PaginatedRoomRow>(
            r#"
                SELECT COUNT(*) OVER() AS total, room_id
                FROM rooms
                ORDER BY created_at DESC
                LIMIT $1
                OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        let total = rows.first().map(|r| r.total).unwrap_or_default();
        let room_ids = rows.into_iter().map(|r| r.room_id.raw()).collect::<Vec<_>>();

        let rows = sqlx::query_as::<_, RoomRow>(
            r#"
                SELECT
                    room_id,
                    room_name,
                    capacity,
                    location,
                    description
                FROM rooms
                WHERE room_id = ANY($1)
                ORDER BY created_at DESC
            "#,
        )
        .bind(&room_ids)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(PaginatedList {
            total,
            limit,
            offset,
            items: rows.into_iter().map(Room::from).collect(),
        })
    }

    async fn find_by_id(&self, room_id: RoomId) -> AppResult<Option<Room>> {
        let row = sqlx::query_as::<_, RoomRow>(
            r#"
                SELECT
                    room_id,
                    room_name,
                    capacity,
                    location,
                    description
                FROM rooms
                WHERE room_id = $1
            "#,
        )
        .bind(room_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(Room::from))
    }

    async fn update(&self, event: UpdateRoom) -> AppResult<()> {
        let res = sqlx::query(
            r#"
                UPDATE rooms
                SET
                    room_name = $1,
                    capacity = $2,
                    location = $3,
                    description = $4
                WHERE room_id = $5
            "#,
        )
        .bind(&event.room_name)
        .bind(event.capacity)
        .bind(&event.location)
        .bind(&event.description)
        .bind(event.room_id)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "会議室（{}）が見つかりませんでした。",
                event.room_id
            )));
        }

        Ok(())
    }

    async fn delete(&self, room_id: RoomId) -> AppResult<()> {
        // 予約は外部キーの ON DELETE CASCADE で一緒に削除される
        let res = sqlx::query(
            r#"
                DELETE FROM rooms WHERE room_id = $1
            "#,
        )
        .bind(room_id)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "会議室（{}）が見つかりませんでした。",
                room_id
            )));
        }

        Ok(())
    }
}
