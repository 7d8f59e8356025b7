use sqlx::PgPool;
use validator::Validate;

use crate::db::error::DatabaseError;
use crate::db::models::{
    generate_report_id, NewReport, Report, ReportStatus, UpdateReport, UrgencyLevel,
};

/// Optional equality filters over the indexed report columns.
#[derive(Debug, Default)]
pub struct ReportFilter {
    pub station_name: Option<String>,
    pub station_city: Option<String>,
    pub issue_category: Option<String>,
    pub status: Option<ReportStatus>,
    pub urgency_level: Option<UrgencyLevel>,
}

pub struct ReportRepository;

impl ReportRepository {
    pub async fn create(pool: &PgPool, new_report: &NewReport) -> Result<Report, DatabaseError> {
        check_required(new_report)?;

        let report = sqlx::query_as::<_, Report>(
            r#"
            INSERT INTO reports (
                id, station_name, station_city, issue_category, description,
                photo_url, urgency_level, status, reporter_contact,
                latitude, longitude, created_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(generate_report_id())
        .bind(&new_report.station_name)
        .bind(&new_report.station_city)
        .bind(&new_report.issue_category)
        .bind(&new_report.description)
        .bind(&new_report.photo_url)
        .bind(&new_report.urgency_level)
        .bind(ReportStatus::Submitted)
        .bind(&new_report.reporter_contact)
        .bind(new_report.latitude)
        .bind(new_report.longitude)
        .bind(&new_report.created_by)
        .fetch_one(pool)
        .await?;

        Ok(report)
    }

    pub async fn get(pool: &PgPool, id: &str) -> Result<Option<Report>, DatabaseError> {
        let report = sqlx::query_as::<_, Report>("SELECT * FROM reports WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(report)
    }

    pub async fn list(pool: &PgPool, filter: &ReportFilter) -> Result<Vec<Report>, DatabaseError> {
        let reports = sqlx::query_as::<_, Report>(
            r#"
            SELECT * FROM reports
            WHERE ($1::text IS NULL OR station_name = $1)
              AND ($2::text IS NULL OR station_city = $2)
              AND ($3::text IS NULL OR issue_category = $3)
              AND ($4::report_status IS NULL OR status = $4)
              AND ($5::urgency_level IS NULL OR urgency_level = $5)
            ORDER BY created_date DESC
            "#,
        )
        .bind(&filter.station_name)
        .bind(&filter.station_city)
        .bind(&filter.issue_category)
        .bind(&filter.status)
        .bind(&filter.urgency_level)
        .fetch_all(pool)
        .await?;

        Ok(reports)
    }

    // id and created_date are never part of the SET list; they are immutable
    // once the row exists.
    pub async fn update(
        pool: &PgPool,
        id: &str,
        changes: &UpdateReport,
    ) -> Result<Option<Report>, DatabaseError> {
        let report = sqlx::query_as::<_, Report>(
            r#"
            UPDATE reports SET
                station_name = COALESCE($2, station_name),
                station_city = COALESCE($3, station_city),
                issue_category = COALESCE($4, issue_category),
                description = COALESCE($5, description),
                photo_url = COALESCE($6, photo_url),
                urgency_level = COALESCE($7, urgency_level),
                status = COALESCE($8, status),
                inspector_notes = COALESCE($9, inspector_notes),
                reporter_contact = COALESCE($10, reporter_contact),
                latitude = COALESCE($11, latitude),
                longitude = COALESCE($12, longitude),
                created_by = COALESCE($13, created_by),
                ai_analysis = COALESCE($14, ai_analysis)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&changes.station_name)
        .bind(&changes.station_city)
        .bind(&changes.issue_category)
        .bind(&changes.description)
        .bind(&changes.photo_url)
        .bind(&changes.urgency_level)
        .bind(&changes.status)
        .bind(&changes.inspector_notes)
        .bind(&changes.reporter_contact)
        .bind(changes.latitude)
        .bind(changes.longitude)
        .bind(&changes.created_by)
        .bind(&changes.ai_analysis)
        .fetch_optional(pool)
        .await?;

        Ok(report)
    }

    pub async fn delete(pool: &PgPool, id: &str) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM reports WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn distinct_cities(pool: &PgPool) -> Result<Vec<String>, DatabaseError> {
        let cities = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT station_city FROM reports ORDER BY station_city",
        )
        .fetch_all(pool)
        .await?;

        Ok(cities)
    }
}

fn check_required(new_report: &NewReport) -> Result<(), DatabaseError> {
    new_report.validate().map_err(|errors| {
        let field = errors
            .field_errors()
            .keys()
            .next()
            .map(|f| f.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        DatabaseError::MissingRequiredField(field)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_new_report() -> NewReport {
        NewReport {
            station_name: "Central".to_string(),
            station_city: "Metropolis".to_string(),
            issue_category: "Lighting".to_string(),
            description: "Broken light".to_string(),
            photo_url: None,
            urgency_level: UrgencyLevel::High,
            reporter_contact: None,
            latitude: None,
            longitude: None,
            created_by: None,
        }
    }

    #[test]
    fn complete_report_passes_required_check() {
        assert!(check_required(&sample_new_report()).is_ok());
    }

    #[test]
    fn empty_description_is_a_missing_required_field() {
        let mut report = sample_new_report();
        report.description = String::new();

        let err = check_required(&report).unwrap_err();
        assert!(matches!(
            err,
            DatabaseError::MissingRequiredField(field) if field == "description"
        ));
    }

    #[test]
    fn empty_station_name_is_a_missing_required_field() {
        let mut report = sample_new_report();
        report.station_name = String::new();

        let err = check_required(&report).unwrap_err();
        assert!(matches!(
            err,
            DatabaseError::MissingRequiredField(field) if field == "station_name"
        ));
    }
}
