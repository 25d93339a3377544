//! Scholarship catalogue types and deadline helpers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp;
use crate::endpoint::QueryParams;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scholarship {
    pub id: String,
    pub name: String,
    pub category: String,
    pub award: String,
    pub deadline: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub eligibility: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requirements: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_url: Option<String>,
    #[serde(default)]
    pub is_bookmarked: bool,
}

impl Scholarship {
    /// Deadline status relative to `now`, if the deadline string parses.
    pub fn deadline_status(&self, now: DateTime<Utc>) -> Option<DeadlineStatus> {
        timestamp::parse(&self.deadline).map(|deadline| DeadlineStatus::classify(deadline, now))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScholarshipSearchParams {
    pub category: Option<String>,
    pub min_amount: Option<u64>,
    pub max_amount: Option<u64>,
    pub deadline: Option<String>,
    pub keywords: Option<String>,
}

impl ScholarshipSearchParams {
    pub fn category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            ..Self::default()
        }
    }

    pub fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .with_opt("category", self.category.as_deref())
            .with_opt("minAmount", self.min_amount)
            .with_opt("maxAmount", self.max_amount)
            .with_opt("deadline", self.deadline.as_deref())
            .with_opt("keywords", self.keywords.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScholarshipSearchResponse {
    pub scholarships: Vec<Scholarship>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
}

/// How close a deadline is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeadlineStatus {
    Passed,
    Urgent,
    Soon,
    Upcoming,
}

impl DeadlineStatus {
    pub fn classify(deadline: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let days = days_until(deadline, now);
        if days < 0 {
            DeadlineStatus::Passed
        } else if days <= 7 {
            DeadlineStatus::Urgent
        } else if days <= 30 {
            DeadlineStatus::Soon
        } else {
            DeadlineStatus::Upcoming
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DeadlineStatus::Passed => "passed",
            DeadlineStatus::Urgent => "urgent",
            DeadlineStatus::Soon => "soon",
            DeadlineStatus::Upcoming => "upcoming",
        }
    }
}

/// Whole days until `deadline`, rounded up; negative once it has passed.
pub fn days_until(deadline: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;
    let diff = (deadline - now).num_milliseconds();
    // ceil for integer division, valid for negative values too
    diff.div_euclid(MS_PER_DAY) + i64::from(diff.rem_euclid(MS_PER_DAY) != 0)
}
