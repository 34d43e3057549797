//! Typed catalog records.
//!
//! Field names follow the bundled JSON documents (`snake_case`), so the same structs serve both
//! the compiled-in catalog and user-supplied overrides.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Active,
    Inactive,
}

impl Status {
    pub fn is_active(self) -> bool {
        self == Status::Active
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Open,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Industry {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    pub status: Status,
    #[serde(default)]
    pub display_order: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub industry_id: String,
    pub status: Status,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub incorporation_date: Option<NaiveDate>,
    /// Corporate identification (registration) number.
    #[serde(default)]
    pub cin: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub services: Option<String>,
}

impl Company {
    /// `Inc. 2023`, as shown on directory cards.
    pub fn incorporation_label(&self) -> Option<String> {
        self.incorporation_date
            .map(|d| format!("Inc. {}", d.year()))
    }

    /// Long-form incorporation date (`5 March 2023`).
    pub fn incorporation_long(&self) -> Option<String> {
        self.incorporation_date
            .map(|d| d.format("%-d %B %Y").to_string())
    }

    /// Description shown on the detail page; falls back to a generated blurb when the record has
    /// none.
    pub fn description_or_default(&self, group_name: &str, industry_name: Option<&str>) -> String {
        if let Some(desc) = self.description.as_deref().filter(|s| !s.trim().is_empty()) {
            return desc.to_string();
        }
        format!(
            "{} is a proud member of the {}, operating in the {} sector. As part of our diversified conglomerate, we are committed to delivering excellence and creating value for all our stakeholders.",
            self.name,
            group_name,
            industry_name.unwrap_or("business")
        )
    }

    /// Services text split on commas, trimmed, empty entries dropped.
    pub fn service_list(&self) -> Vec<&str> {
        self.services
            .as_deref()
            .map(|s| {
                s.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    #[serde(default)]
    pub company_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub job_type: Option<String>,
    #[serde(default)]
    pub experience_level: Option<String>,
    #[serde(default)]
    pub salary_range: Option<String>,
    #[serde(default)]
    pub requirements: Option<String>,
    pub status: JobStatus,
    pub created_at: String,
}

/// `1 company`, `3 companies`.
pub fn company_count_label(count: usize) -> String {
    if count == 1 {
        "1 company".to_string()
    } else {
        format!("{count} companies")
    }
}
