use axum::{
    routing::{get, post, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::{
    event::{
        delete_event, register_event, show_active_event_list, show_event, show_event_list,
        update_event,
    },
    registration::{mark_attendance, register, show_registrants, unregister, upload_photo},
};

pub fn build_event_routers() -> Router<AppRegistry> {
    let events_routers = Router::new()
        .route("/", get(show_event_list).post(register_event))
        .route("/active", get(show_active_event_list))
        .route(
            "/:event_id",
            get(show_event).put(update_event).delete(delete_event),
        )
        .route("/:event_id/registrations", get(show_registrants))
        .route("/:event_id/register", post(register).delete(unregister))
        .route("/:event_id/attendance", post(mark_attendance))
        .route("/:event_id/photo", put(upload_photo));

    Router::new().nest("/events", events_routers)
}
