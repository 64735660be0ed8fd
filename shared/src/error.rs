use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    UnprocessableEntity(String),
    #[error("{0}")]
    EntityNotFound(String),
    #[error("{0}")]
    InvalidTimeSlot(String),
    #[error("{0}")]
    PastDate(String),
    #[error("{0}")]
    SlotUnavailable(String),
    #[error("{0}")]
    ValidationError(#[from] garde::Report),
    #[error("トランザクションを実行できませんでした。")]
    TransactionError(#[source] sqlx::Error),
    #[error("データベース処理実行中にエラーが発生しました。")]
    SpecificOperationError(#[source] sqlx::Error),
    #[error("No rows affected: {0}")]
    NoRowsAffectedError(String),
    #[error("{0}")]
    KeyValueStoreError(#[from] redis::RedisError),
    #[error("{0}")]
    BcryptError(#[from] bcrypt::BcryptError),
    #[error("{0}")]
    ConvertToUuidError(#[from] uuid::Error),
    #[error("ログインが必要です。")]
    UnauthenticatedError,
    #[error("認可情報が誤っています。")]
    UnauthorizedError,
    #[error("{0}")]
    ConversionEntityError(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status_code = match &self {
            AppError::UnprocessableEntity(_)
            | AppError::InvalidTimeSlot(_)
            | AppError::PastDate(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::EntityNotFound(_) => StatusCode::NOT_FOUND,
            AppError::SlotUnavailable(_) => StatusCode::CONFLICT,
            AppError::ValidationError(_) | AppError::ConvertToUuidError(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::UnauthenticatedError => StatusCode::UNAUTHORIZED,
            AppError::UnauthorizedError => StatusCode::FORBIDDEN,
            e @ (AppError::TransactionError(_)
            | AppError::SpecificOperationError(_)
            | AppError::NoRowsAffectedError(_)
            | AppError::KeyValueStoreError(_)
            | AppError::BcryptError(_)
            | AppError::ConversionEntityError(_)) => {
                tracing::error!(
                    error.cause_chain = ?e,
                    error.message = %e,
                    "Unexpected error happened"
                );
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status_code, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_client_status_codes() {
        let res = AppError::InvalidTimeSlot("bad".into()).into_response();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let res = AppError::PastDate("past".into()).into_response();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let res = AppError::SlotUnavailable("taken".into()).into_response();
        assert_eq!(res.status(), StatusCode::CONFLICT);

        let res = AppError::EntityNotFound("missing".into()).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn auth_errors_map_to_401_and_403() {
        let res = AppError::UnauthenticatedError.into_response();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

        let res = AppError::UnauthorizedError.into_response();
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }
}
