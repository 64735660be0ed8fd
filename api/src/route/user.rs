use axum::{
    routing::{delete, get, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::user::{change_password, delete_user, get_current_user, show_user_list};

pub fn build_user_routers() -> Router<AppRegistry> {
    let user_routers = Router::new()
        .route("/", get(show_user_list))
        .route("/me", get(get_current_user))
        .route("/me/password", put(change_password))
        .route("/:user_id", delete(delete_user));

    Router::new().nest("/users", user_routers)
}
