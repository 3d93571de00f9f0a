use crate::interface_adapters::handlers::{
    check_guess, get_leaderboard, health, share_score, submit_score, user_best_score,
};
use crate::interface_adapters::net::ws_handler;
use crate::interface_adapters::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/leaderboard", get(get_leaderboard).post(submit_score))
        .route("/api/user/best-score", get(user_best_score))
        .route("/api/share-score", post(share_score))
        .route("/api/check", post(check_guess))
        .route("/api/health", get(health))
        .route("/ws", get(ws_handler))
        .with_state(state)
}
