use axum::{
    routing::{delete, get, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::reservation::{
    cancel_reservation, reserve_room, show_my_reservations, show_reservation,
    show_room_reservations,
};

pub fn build_reservation_routers() -> Router<AppRegistry> {
    let room_reservation_routers = Router::new()
        .route("/", post(reserve_room))
        .route("/", get(show_room_reservations));

    let reservation_routers = Router::new()
        .route("/me", get(show_my_reservations))
        .route("/:reservation_id", get(show_reservation))
        .route("/:reservation_id", delete(cancel_reservation));

    Router::new()
        .nest("/rooms/:room_id/reservations", room_reservation_routers)
        .nest("/reservations", reservation_routers)
}
