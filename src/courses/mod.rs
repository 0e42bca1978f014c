use crate::state::AppState;
use axum::Router;

mod dto;
mod guard;
pub mod handlers;

pub fn router() -> Router<AppState> {
    handlers::course_routes()
}
