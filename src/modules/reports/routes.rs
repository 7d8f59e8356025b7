use axum::{
    routing::get,
    Router,
};

use super::handlers::{
    create_report, delete_report, filter_options, get_report, list_reports, update_report,
};
use crate::app_state::AppState;

pub fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_reports).post(create_report))
        .route("/filter-options", get(filter_options))
        .route("/:id", get(get_report).put(update_report).delete(delete_report))
}
