//! Registration model

use std::str::FromStr;
use serde::{Deserialize, Deserializer, Serialize};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Registration {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub birth_date: NaiveDate,
    /// Category name at submission time, not a foreign key
    pub category: String,
    pub guardian_name: String,
    pub phone: String,
    pub neighborhood: String,
    pub status: RegistrationStatus,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "registration_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
}

impl RegistrationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationStatus::Pending => "pending",
            RegistrationStatus::Confirmed => "confirmed",
            RegistrationStatus::Cancelled => "cancelled",
        }
    }
}

impl FromStr for RegistrationStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(RegistrationStatus::Pending),
            "confirmed" => Ok(RegistrationStatus::Confirmed),
            "cancelled" => Ok(RegistrationStatus::Cancelled),
            other => Err(format!("unknown registration status '{}'", other)),
        }
    }
}

impl std::fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Public sign-up submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRegistration {
    pub full_name: String,
    pub email: String,
    pub birth_date: NaiveDate,
    pub category: String,
    pub guardian_name: String,
    pub phone: String,
    pub neighborhood: String,
}

/// Admin list filter
///
/// Built from the admin table's query string, where an empty field or the
/// `all` status means no filter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistrationFilter {
    /// Case-insensitive match on name, email or neighborhood
    #[serde(default, deserialize_with = "blank_as_none")]
    pub search: Option<String>,
    #[serde(default, deserialize_with = "status_filter")]
    pub status: Option<RegistrationStatus>,
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|v| !v.trim().is_empty()))
}

fn status_filter<'de, D>(deserializer: D) -> Result<Option<RegistrationStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    match blank_as_none(deserializer)?.as_deref().map(str::trim) {
        None | Some("all") => Ok(None),
        Some(status) => status.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: RegistrationStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Query;
    use axum::http::Uri;

    fn filter(uri: &str) -> Result<RegistrationFilter, String> {
        let uri: Uri = uri.parse().unwrap();
        Query::<RegistrationFilter>::try_from_uri(&uri)
            .map(|Query(filter)| filter)
            .map_err(|rejection| rejection.body_text())
    }

    #[test]
    fn test_empty_filter_fields_mean_everything() {
        let parsed = filter("/admin/registrations?search=&status=").unwrap();
        assert_eq!(parsed.search, None);
        assert_eq!(parsed.status, None);

        let parsed = filter("/admin/registrations").unwrap();
        assert_eq!(parsed.search, None);
        assert_eq!(parsed.status, None);

        assert_eq!(filter("/admin/registrations?status=all").unwrap().status, None);
    }

    #[test]
    fn test_status_filter_parses_known_statuses() {
        let parsed = filter("/admin/registrations?search=Centro&status=confirmed").unwrap();
        assert_eq!(parsed.search.as_deref(), Some("Centro"));
        assert_eq!(parsed.status, Some(RegistrationStatus::Confirmed));

        let err = filter("/admin/registrations?status=archived").unwrap_err();
        assert!(err.contains("archived"), "{}", err);
    }

    #[test]
    fn test_status_round_trips_through_str() {
        for status in [RegistrationStatus::Pending, RegistrationStatus::Confirmed, RegistrationStatus::Cancelled] {
            assert_eq!(status.as_str().parse::<RegistrationStatus>(), Ok(status));
        }
    }
}
