use axum::{Router, middleware::from_fn_with_state, routing::post};

use crate::controller::discord::interaction::handle_interaction;
use crate::shared::middleware::discord_validation::validate_interaction;
use crate::shared::structs::AppState;

pub mod discord;

pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route(&app_state.config.route, post(handle_interaction))
        .layer(from_fn_with_state(app_state.clone(), validate_interaction))
        .with_state(app_state)
}
