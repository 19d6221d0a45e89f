//! JSON HTTP endpoints mirroring the WebSocket session

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use coil_field::{CoilParams, ControlEvent};
use std::sync::Arc;

use crate::session::AppState;

pub async fn get_params(State(state): State<Arc<AppState>>) -> Json<CoilParams> {
    Json(state.params().await)
}

pub async fn get_curve(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(state.curve_json().await)
}

pub async fn get_panel(State(state): State<Arc<AppState>>) -> String {
    state.panel().to_string()
}

pub async fn post_reset(State(state): State<Arc<AppState>>) -> Response {
    post_event(State(state), Json(ControlEvent::Reset)).await
}

pub async fn post_event(State(state): State<Arc<AppState>>, Json(event): Json<ControlEvent>) -> Response {
    match state.apply(event).await {
        Ok(params) => Json(params).into_response(),
        Err(e) => (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()).into_response(),
    }
}
