//! A lone greeting endpoint for a browser frontend on another origin.

use apilab_schema::Message;
use axum::{Json, Router, routing::get};
use tower_http::cors::CorsLayer;

pub fn router(cors: CorsLayer) -> Router {
    Router::new().route("/hello", get(read_hello)).layer(cors)
}

async fn read_hello() -> Json<Message> {
    Json(Message::new("Hello from FastAPI!"))
}
