//! Application tracking types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ApplicationStatus {
    Draft,
    InProgress,
    Submitted,
    UnderReview,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Draft => "draft",
            ApplicationStatus::InProgress => "in-progress",
            ApplicationStatus::Submitted => "submitted",
            ApplicationStatus::UnderReview => "under-review",
            ApplicationStatus::Accepted => "accepted",
            ApplicationStatus::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    Essay,
    Transcript,
    Recommendation,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationDocument {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    #[serde(with = "timestamp")]
    pub uploaded_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: String,
    pub user_id: String,
    pub scholarship_id: String,
    pub scholarship_name: String,
    pub status: ApplicationStatus,
    #[serde(
        default,
        with = "timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub submitted_date: Option<DateTime<Utc>>,
    #[serde(with = "timestamp")]
    pub deadline: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub documents: Vec<ApplicationDocument>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Partial application used for create and update calls.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scholarship_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scholarship_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ApplicationStatus>,
    #[serde(
        with = "timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Document metadata for `POST /api/applications/:id/documents`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentUpload {
    pub name: String,
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_wire_names_are_kebab_case() {
        let json = serde_json::to_value(ApplicationStatus::UnderReview).unwrap();
        assert_eq!(json, "under-review");
        let back: ApplicationStatus = serde_json::from_str("\"in-progress\"").unwrap();
        assert_eq!(back, ApplicationStatus::InProgress);
        assert_eq!(ApplicationStatus::InProgress.to_string(), "in-progress");
    }

    #[test]
    fn application_parses_without_optional_fields() {
        let raw = r#"{
            "id": "a1",
            "userId": "u1",
            "scholarshipId": "s1",
            "scholarshipName": "Merit",
            "status": "draft",
            "deadline": "2025-06-30T00:00:00Z"
        }"#;
        let app: Application = serde_json::from_str(raw).unwrap();
        assert!(app.submitted_date.is_none());
        assert!(app.documents.is_empty());
    }

    #[test]
    fn document_type_uses_type_key() {
        let upload = DocumentUpload {
            name: "essay.pdf".into(),
            doc_type: DocumentType::Essay,
            url: None,
        };
        let json = serde_json::to_value(&upload).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "essay.pdf", "type": "essay" }));
    }

    #[test]
    fn draft_serializes_only_present_fields() {
        let draft = ApplicationDraft {
            status: Some(ApplicationStatus::Submitted),
            ..Default::default()
        };
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "submitted" }));
    }
}
