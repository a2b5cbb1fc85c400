use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers;
use super::AppState;
use crate::middleware::{make_span_with_request_id, request_id_middleware};

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Wardrobe items
        .route("/items", get(handlers::list_items).post(handlers::create_item))
        .route(
            "/items/:id",
            get(handlers::get_item).delete(handlers::delete_item),
        )
        .route("/items/:id/availability", put(handlers::set_availability))
        // Colors
        .route("/colors/classify", post(handlers::classify_color))
        // Outfit generation
        .route("/outfits/random", post(handlers::random_outfit))
        .route("/outfits/color", post(handlers::color_outfit))
        .route("/outfits/occasion", post(handlers::occasion_outfit))
        .route("/outfits/weather", post(handlers::weather_outfit))
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
