use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/content", content_routes())
        .nest("/search", search_routes())
        .nest("/admin", admin_routes())
}

fn content_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::content::create_content))
        .route("/public", get(handlers::content::list_public_summaries))
        .route(
            "/{id}",
            get(handlers::content::get_content)
                .patch(handlers::content::update_content)
                .delete(handlers::content::delete_content),
        )
}

fn search_routes() -> Router<AppState> {
    Router::new()
        .route("/public", get(handlers::search::search_public))
        .route("/user", get(handlers::search::search_user))
        .route("/recommend/{content_id}", get(handlers::search::recommend))
}

fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/content", get(handlers::admin::list_all_content))
        .route("/content/{id}", delete(handlers::admin::admin_delete_content))
}
