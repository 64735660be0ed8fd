use crate::model::id::UserId;

#[derive(Debug)]
pub struct CreateUser {
    pub user_name: String,
    pub login: String,
    pub password: String,
}

pub struct UpdateUserPassword {
    pub user_id: UserId,
    pub current_password: String,
    pub new_password: String,
}
