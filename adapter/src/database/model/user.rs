use kernel::model::{id::UserId, user::User};

#[derive(sqlx::FromRow)]
pub struct UserRow {
    pub user_id: UserId,
    pub user_name: String,
    pub login: String,
}

impl From<UserRow> for User {
    fn from(value: UserRow) -> Self {
        let UserRow {
            user_id,
            user_name,
            login,
        } = value;
        User {
            user_id,
            user_name,
            login,
        }
    }
}
