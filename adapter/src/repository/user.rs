use crate::database::{model::user::UserRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::UserId,
    user::{
        event::{CreateUser, UpdateUserPassword},
        User,
    },
};
use kernel::repository::user::UserRepository;
use shared::error::{AppError, AppResult};

// PostgreSQL の一意制約違反（SQLSTATE 23505）
const UNIQUE_VIOLATION: &str = "23505";

#[derive(new)]
pub struct UserRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn create(&self, event: CreateUser) -> AppResult<User> {
        let user_id = UserId::new();
        let hashed_password = bcrypt::hash(&event.password, bcrypt::DEFAULT_COST)?;

        sqlx::query(
            r#"
                INSERT INTO users (user_id, user_name, login, password_hash)
                VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(user_id)
        .bind(&event.user_name)
        .bind(&event.login)
        .bind(&hashed_password)
        .execute(self.db.inner_ref())
        .await
        .map_err(|e| {
            // login には一意制約があるため、重複登録はここで検出される
            if is_unique_violation(&e) {
                AppError::UnprocessableEntity(format!(
                    "ログイン ID（{}）は既に使用されています。",
                    event.login
                ))
            } else {
                AppError::SpecificOperationError(e)
            }
        })?;

        Ok(User {
            user_id,
            user_name: event.user_name,
            login: event.login,
        })
    }

    async fn find_current_user(&self, current_user_id: UserId) -> AppResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
                SELECT user_id, user_name, login
                FROM users
                WHERE user_id = $1
            "#,
        )
        .bind(current_user_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(User::from))
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
                SELECT user_id, user_name, login
                FROM users
                ORDER BY created_at DESC
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn update_password(&self, event: UpdateUserPassword) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let original_password_hash = sqlx::query_scalar::<_, String>(
            r#"
                SELECT password_hash
                FROM users
                WHERE user_id = $1
            "#,
        )
        .bind(event.user_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        let valid = bcrypt::verify(&event.current_password, &original_password_hash)?;
        if !valid {
            return Err(AppError::UnauthenticatedError);
        }

        let new_password_hash = bcrypt::hash(&event.new_password, bcrypt::DEFAULT_COST)?;
        sqlx::query(
            r#"
                UPDATE users
                SET password_hash = $1
                WHERE user_id = $2
            "#,
        )
        .bind(&new_password_hash)
        .bind(event.user_id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(())
    }

    async fn delete(&self, user_id: UserId) -> AppResult<()> {
        // このユーザーの予約は外部キーの ON DELETE CASCADE で一緒に削除される
        let res = sqlx::query(
            r#"
                DELETE FROM users WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "ユーザー（{}）が見つかりませんでした。",
                user_id
            )));
        }

        Ok(())
    }
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .and_then(|db| db.code())
        .as_deref()
        == Some(UNIQUE_VIOLATION)
}
