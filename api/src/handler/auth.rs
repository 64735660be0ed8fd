use crate::{
    extractor::AuthorizedUser,
    model::{
        auth::{AccessTokenResponse, LoginRequest},
        user::{CreateUserRequest, UserResponse},
    },
};
use axum::{extract::State, http::StatusCode, Json};
use garde::Validate;
use kernel::model::auth::event::CreateToken;
use registry::AppRegistry;
use shared::error::AppResult;

// 未ログインのユーザーも登録できるようにするため、認証は要求しない
pub async fn register(
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    req.validate(&())?;

    let user = registry.user_repository().create(req.into()).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

pub async fn login(
    State(registry): State<AppRegistry>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<AccessTokenResponse>> {
    let user_id = registry
        .auth_repository()
        .verify_user(&req.login, &req.password)
        .await?;

    let access_token = registry
        .auth_repository()
        .create_token(CreateToken::new(user_id))
        .await?;

    Ok(Json(AccessTokenResponse {
        user_id,
        access_token: access_token.0,
    }))
}

pub async fn logout(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .auth_repository()
        .delete_token(user.access_token)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
