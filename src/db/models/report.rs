use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use time::OffsetDateTime;
use uuid::Uuid;
use validator::Validate;

/// Fresh random identifier for a new report, in string form.
pub fn generate_report_id() -> String {
    Uuid::new_v4().to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Default, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "urgency_level")]
pub enum UrgencyLevel {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl UrgencyLevel {
    pub const ALL: [UrgencyLevel; 4] = [
        UrgencyLevel::Low,
        UrgencyLevel::Medium,
        UrgencyLevel::High,
        UrgencyLevel::Critical,
    ];
}

impl fmt::Display for UrgencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UrgencyLevel::Low => write!(f, "Low"),
            UrgencyLevel::Medium => write!(f, "Medium"),
            UrgencyLevel::High => write!(f, "High"),
            UrgencyLevel::Critical => write!(f, "Critical"),
        }
    }
}

impl FromStr for UrgencyLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Low" => Ok(UrgencyLevel::Low),
            "Medium" => Ok(UrgencyLevel::Medium),
            "High" => Ok(UrgencyLevel::High),
            "Critical" => Ok(UrgencyLevel::Critical),
            _ => Err(format!("Unknown urgency level: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "report_status")]
pub enum ReportStatus {
    #[default]
    Submitted,
    #[sqlx(rename = "In Progress")]
    #[serde(rename = "In Progress")]
    InProgress,
    Resolved,
}

impl ReportStatus {
    pub const ALL: [ReportStatus; 3] = [
        ReportStatus::Submitted,
        ReportStatus::InProgress,
        ReportStatus::Resolved,
    ];
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportStatus::Submitted => write!(f, "Submitted"),
            ReportStatus::InProgress => write!(f, "In Progress"),
            ReportStatus::Resolved => write!(f, "Resolved"),
        }
    }
}

impl FromStr for ReportStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Submitted" => Ok(ReportStatus::Submitted),
            "In Progress" => Ok(ReportStatus::InProgress),
            "Resolved" => Ok(ReportStatus::Resolved),
            _ => Err(format!("Unknown report status: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, sqlx::FromRow, Serialize, Deserialize)]
pub struct Report {
    pub id: String,
    pub station_name: String,
    pub station_city: String,
    pub issue_category: String,
    pub description: String,
    pub photo_url: Option<String>,
    pub urgency_level: UrgencyLevel,
    pub status: ReportStatus,
    pub inspector_notes: Option<String>,
    pub reporter_contact: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_date: OffsetDateTime,
    pub created_by: Option<String>,
    pub ai_analysis: Option<String>,  // Filled in by the external analysis job
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewReport {
    #[validate(length(min = 1))]
    pub station_name: String,
    #[validate(length(min = 1))]
    pub station_city: String,
    #[validate(length(min = 1))]
    pub issue_category: String,
    #[validate(length(min = 1))]
    pub description: String,
    pub photo_url: Option<String>,
    #[serde(default)]
    pub urgency_level: UrgencyLevel,
    pub reporter_contact: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_by: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateReport {
    pub station_name: Option<String>,
    pub station_city: Option<String>,
    pub issue_category: Option<String>,
    pub description: Option<String>,
    pub photo_url: Option<String>,
    pub urgency_level: Option<UrgencyLevel>,
    pub status: Option<ReportStatus>,
    pub inspector_notes: Option<String>,
    pub reporter_contact: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_by: Option<String>,
    pub ai_analysis: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashSet;
    use time::macros::datetime;

    #[test]
    fn generated_ids_are_unique() {
        let mut seen = HashSet::new();
        for _ in 0..10_000 {
            assert!(seen.insert(generate_report_id()));
        }
    }

    #[test]
    fn generated_id_is_a_uuid_string() {
        let id = generate_report_id();
        assert!(Uuid::parse_str(&id).is_ok());
    }

    #[test]
    fn new_report_defaults_urgency_to_medium() {
        let report: NewReport = serde_json::from_value(json!({
            "station_name": "Central",
            "station_city": "Metropolis",
            "issue_category": "Lighting",
            "description": "Broken light",
        }))
        .unwrap();
        assert_eq!(report.urgency_level, UrgencyLevel::Medium);
    }

    #[test]
    fn enums_serialize_as_their_labels() {
        assert_eq!(
            serde_json::to_value(ReportStatus::InProgress).unwrap(),
            json!("In Progress")
        );
        assert_eq!(
            serde_json::to_value(ReportStatus::Submitted).unwrap(),
            json!("Submitted")
        );
        assert_eq!(
            serde_json::to_value(UrgencyLevel::Critical).unwrap(),
            json!("Critical")
        );
    }

    #[test]
    fn display_matches_serialized_labels() {
        for status in ReportStatus::ALL {
            assert_eq!(
                serde_json::to_value(&status).unwrap(),
                json!(status.to_string())
            );
        }
        for urgency in UrgencyLevel::ALL {
            assert_eq!(
                serde_json::to_value(&urgency).unwrap(),
                json!(urgency.to_string())
            );
        }
    }

    #[test]
    fn out_of_set_status_is_rejected() {
        assert!(serde_json::from_value::<ReportStatus>(json!("Closed")).is_err());
        assert!(serde_json::from_value::<ReportStatus>(json!("InProgress")).is_err());
        assert!("Under Review".parse::<ReportStatus>().is_err());
        assert!("urgent".parse::<UrgencyLevel>().is_err());
    }

    #[test]
    fn status_parses_from_labels() {
        assert_eq!(
            "In Progress".parse::<ReportStatus>().unwrap(),
            ReportStatus::InProgress
        );
        assert_eq!("Low".parse::<UrgencyLevel>().unwrap(), UrgencyLevel::Low);
    }

    #[test]
    fn fully_populated_report_round_trips_through_json() {
        let report = Report {
            id: generate_report_id(),
            station_name: "Central".to_string(),
            station_city: "Metropolis".to_string(),
            issue_category: "Lighting".to_string(),
            description: "Broken light on platform 2".to_string(),
            photo_url: Some("https://cdn.example.com/photos/abc.jpg".to_string()),
            urgency_level: UrgencyLevel::High,
            status: ReportStatus::InProgress,
            inspector_notes: Some("Replacement bulb ordered".to_string()),
            reporter_contact: Some("rider@example.com".to_string()),
            latitude: Some(53.5461),
            longitude: Some(-113.4938),
            created_date: datetime!(2025-03-14 09:26:53.589 UTC),
            created_by: Some("rider@example.com".to_string()),
            ai_analysis: Some("Likely ballast failure".to_string()),
        };

        let encoded = serde_json::to_string(&report).unwrap();
        let decoded: Report = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, report);
    }
}
