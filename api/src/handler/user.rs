use crate::{
    extractor::AuthorizedUser,
    model::user::{
        UpdateUserPasswordRequest, UpdateUserPasswordRequestWithUserId, UserResponse,
        UsersResponse,
    },
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::model::id::UserId;
use registry::AppRegistry;
use shared::error::AppResult;

pub async fn get_current_user(user: AuthorizedUser) -> Json<UserResponse> {
    Json(UserResponse::from(user.user))
}

pub async fn show_user_list(
    _user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<UsersResponse>> {
    registry
        .user_repository()
        .find_all()
        .await
        .map(UsersResponse::from)
        .map(Json)
}

pub async fn change_password(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateUserPasswordRequest>,
) -> AppResult<StatusCode> {
    req.validate(&())?;

    let update_password = UpdateUserPasswordRequestWithUserId::new(user.id(), req);
    registry
        .user_repository()
        .update_password(update_password.into())
        .await
        .map(|_| StatusCode::OK)
}

pub async fn delete_user(
    _user: AuthorizedUser,
    Path(user_id): Path<UserId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .user_repository()
        .delete(user_id)
        .await
        .map(|_| StatusCode::OK)
}
