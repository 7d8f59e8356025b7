use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::app_state::AppState;
use crate::db::{
    DatabaseError, NewReport, Report, ReportFilter, ReportRepository, ReportStatus, UpdateReport,
    UrgencyLevel,
};
use crate::error::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct ListReportsQuery {
    pub station_name: Option<String>,
    pub station_city: Option<String>,
    pub issue_category: Option<String>,
    pub status: Option<String>,
    pub urgency_level: Option<String>,
}

impl ListReportsQuery {
    // Enum params arrive as plain strings; an out-of-set label is a
    // constraint violation, not an empty result.
    fn into_filter(self) -> Result<ReportFilter, DatabaseError> {
        let status = self
            .status
            .as_deref()
            .map(str::parse::<ReportStatus>)
            .transpose()
            .map_err(DatabaseError::ConstraintViolation)?;
        let urgency_level = self
            .urgency_level
            .as_deref()
            .map(str::parse::<UrgencyLevel>)
            .transpose()
            .map_err(DatabaseError::ConstraintViolation)?;

        Ok(ReportFilter {
            station_name: self.station_name,
            station_city: self.station_city,
            issue_category: self.issue_category,
            status,
            urgency_level,
        })
    }
}

pub async fn create_report(
    State(state): State<AppState>,
    Json(payload): Json<NewReport>,
) -> AppResult<impl IntoResponse> {
    let report = ReportRepository::create(&state.db, &payload).await?;
    info!(report_id = %report.id, station = %report.station_name, "report created");
    Ok((StatusCode::CREATED, Json(report)))
}

pub async fn list_reports(
    State(state): State<AppState>,
    Query(query): Query<ListReportsQuery>,
) -> AppResult<Json<Vec<Report>>> {
    let filter = query.into_filter()?;
    let reports = ReportRepository::list(&state.db, &filter).await?;
    Ok(Json(reports))
}

pub async fn get_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Report>> {
    let report = ReportRepository::get(&state.db, &id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("report {}", id)))?;
    Ok(Json(report))
}

pub async fn update_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateReport>,
) -> AppResult<Json<Report>> {
    let report = ReportRepository::update(&state.db, &id, &payload)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("report {}", id)))?;
    info!(report_id = %report.id, status = %report.status, "report updated");
    Ok(Json(report))
}

pub async fn delete_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let deleted = ReportRepository::delete(&state.db, &id).await?;
    if !deleted {
        return Err(AppError::NotFound(format!("report {}", id)));
    }
    info!(report_id = %id, "report deleted");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn filter_options(
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    let cities = ReportRepository::distinct_cities(&state.db).await?;

    Ok(Json(json!({
        "cities": cities,
        "statuses": ReportStatus::ALL
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>(),
        "urgencies": UrgencyLevel::ALL
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>(),
    })))
}
