use axum::{
    routing::{get, post, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::user::{
    change_role, delete_user, get_current_user, register_user, show_registered_events,
    show_user, update_user,
};

pub fn build_user_routers() -> Router<AppRegistry> {
    let users_routers = Router::new()
        .route("/", post(register_user))
        .route("/me", get(get_current_user))
        .route(
            "/:user_id",
            get(show_user).put(update_user).delete(delete_user),
        )
        .route("/:user_id/role", put(change_role))
        .route("/:user_id/events", get(show_registered_events));

    Router::new().nest("/users", users_routers)
}
