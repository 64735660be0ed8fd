use crate::database::ConnectionPool;
use crate::redis::{
    model::{RedisKey, RedisValue},
    RedisClient,
};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    auth::{event::CreateToken, AccessToken},
    id::UserId,
};
use kernel::repository::auth::AuthRepository;
use shared::error::{AppError, AppResult};
use std::{str::FromStr, sync::Arc};

#[derive(new)]
pub struct AuthRepositoryImpl {
    db: ConnectionPool,
    kv: Arc<RedisClient>,
    ttl: u64,
}

#[async_trait]
impl AuthRepository for AuthRepositoryImpl {
    async fn fetch_user_id_from_token(
        &self,
        access_token: &AccessToken,
    ) -> AppResult<Option<UserId>> {
        let key: AuthorizationKey = access_token.into();
        self.kv
            .get(&key)
            .await
            .map(|x| x.map(AuthorizedUserId::into_inner))
    }

    async fn verify_user(&self, login: &str, password: &str) -> AppResult<UserId> {
        let user_item = sqlx::query_as::<_, UserItem>(
            r#"
                SELECT user_id, password_hash
                FROM users
                WHERE login = $1
            "#,
        )
        .bind(login)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        let Some(user_item) = user_item else {
            return Err(AppError::UnauthenticatedError);
        };

        let valid = bcrypt::verify(password, &user_item.password_hash)?;
        if !valid {
            return Err(AppError::UnauthenticatedError);
        }

        Ok(user_item.user_id)
    }

    async fn create_token(&self, event: CreateToken) -> AppResult<AccessToken> {
        let (key, value) = AuthorizationKey::from_event(event);
        self.kv.set_ex(&key, &value, self.ttl).await?;
        Ok(key.into())
    }

    async fn delete_token(&self, access_token: AccessToken) -> AppResult<()> {
        let key: AuthorizationKey = access_token.into();
        self.kv.delete(&key).await
    }
}

#[derive(sqlx::FromRow)]
struct UserItem {
    user_id: UserId,
    password_hash: String,
}

struct AuthorizationKey(String);
struct AuthorizedUserId(UserId);

impl AuthorizationKey {
    // トークンの生成と、Redis に保存するユーザー ID への分解をまとめて行う
    fn from_event(event: CreateToken) -> (AuthorizationKey, AuthorizedUserId) {
        (
            AuthorizationKey(uuid::Uuid::new_v4().simple().to_string()),
            AuthorizedUserId(event.user_id),
        )
    }
}

impl AuthorizedUserId {
    fn into_inner(self) -> UserId {
        self.0
    }
}

impl From<AuthorizationKey> for AccessToken {
    fn from(key: AuthorizationKey) -> Self {
        Self(key.0)
    }
}

impl From<AccessToken> for AuthorizationKey {
    fn from(token: AccessToken) -> Self {
        Self(token.0)
    }
}

impl From<&AccessToken> for AuthorizationKey {
    fn from(token: &AccessToken) -> Self {
        Self(token.0.to_string())
    }
}

impl RedisKey for AuthorizationKey {
    type Value = AuthorizedUserId;

    fn inner(&self) -> String {
        self.0.to_string()
    }
}

impl RedisValue for AuthorizedUserId {
    fn inner(&self) -> String {
        self.0.raw().to_string()
    }
}

impl TryFrom<String> for AuthorizedUserId {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Ok(Self(UserId::from_str(&value)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authorized_user_id_round_trips_through_redis_value() {
        let user_id = UserId::new();
        let value = AuthorizedUserId(user_id);
        let restored = AuthorizedUserId::try_from(value.inner()).unwrap();
        assert_eq!(restored.into_inner(), user_id);
    }

    #[test]
    fn token_and_key_share_the_same_material() {
        let (key, _) = AuthorizationKey::from_event(CreateToken::new(UserId::new()));
        let material = key.inner();
        let token: AccessToken = key.into();
        assert_eq!(token.0, material);
    }
}
