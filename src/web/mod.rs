//! Browser UI: Home, Recommendations and About pages rendered on the server.

use axum::{routing::get, Router};

use crate::api::AppState;

pub mod pages;
pub mod render;
pub mod view;

pub use view::{Page, ViewAction, ViewState};

/// Page routes; state is supplied by the parent router
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(Page::Home.path(), get(pages::home))
        .route(Page::Recommendations.path(), get(pages::recommendations))
        .route(Page::About.path(), get(pages::about))
}
