use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use portal_core::health::{healthz, readyz};
use portal_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    course::{create_course, delete_course, get_course, list_courses, update_course},
    enrollment::{admit_registrations, list_my_courses},
    me::get_me,
    schedule::{create_schedule, delete_schedule, get_schedule, list_schedules, update_schedule},
    teacher::{create_teacher, list_teachers},
    timetable::get_timetable,
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Identity
        .route("/me", get(get_me))
        // Courses
        .route("/courses", get(list_courses).post(create_course))
        .route(
            "/courses/{id}",
            get(get_course).put(update_course).delete(delete_course),
        )
        // Enrollments
        .route("/enrollments", get(list_my_courses).post(admit_registrations))
        .route("/timetable", get(get_timetable))
        // Administration
        .route("/teachers", get(list_teachers).post(create_teacher))
        .route("/schedules", get(list_schedules).post(create_schedule))
        .route(
            "/schedules/{id}",
            get(get_schedule).put(update_schedule).delete(delete_schedule),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id_layer())
        .layer(request_id_layer())
}
