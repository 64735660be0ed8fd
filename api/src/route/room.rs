use axum::{
    routing::{delete, get, post, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::room::{delete_room, register_room, show_room, show_room_list, update_room};

pub fn build_room_routers() -> Router<AppRegistry> {
    let room_routers = Router::new()
        .route("/", post(register_room))
        .route("/", get(show_room_list))
        .route("/:room_id", get(show_room))
        .route("/:room_id", put(update_room))
        .route("/:room_id", delete(delete_room));

    Router::new().nest("/rooms", room_routers)
}
