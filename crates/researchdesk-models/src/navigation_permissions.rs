//! Navigation permission models and DTOs.
//!
//! A [`NavigationPermission`] maps one `(job title, navigation item)` pair to
//! an [`AccessLevel`]. On the wire every record is camelCase:
//! `{"jobTitle": "...", "navigationItem": "...", "accessLevel": "view"}`.

use std::fmt;
use std::str::FromStr;

use researchdesk_core::navigation::{JOB_TITLES, NAVIGATION_ITEMS};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// How a navigation section is rendered for a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    /// Not rendered at all.
    Hide,
    /// Rendered read-only.
    View,
    /// Rendered and mutable.
    Edit,
}

impl AccessLevel {
    pub const ALL: [AccessLevel; 3] = [AccessLevel::Hide, AccessLevel::View, AccessLevel::Edit];

    pub fn as_str(&self) -> &'static str {
        match self {
            AccessLevel::Hide => "hide",
            AccessLevel::View => "view",
            AccessLevel::Edit => "edit",
        }
    }

    pub fn can_view(&self) -> bool {
        matches!(self, AccessLevel::View | AccessLevel::Edit)
    }

    pub fn can_edit(&self) -> bool {
        *self == AccessLevel::Edit
    }

    pub fn is_hidden(&self) -> bool {
        *self == AccessLevel::Hide
    }

    pub fn is_read_only(&self) -> bool {
        *self == AccessLevel::View
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of `hide`, `view`, `edit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseAccessLevelError(pub String);

impl fmt::Display for ParseAccessLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid access level '{}', expected one of: hide, view, edit",
            self.0
        )
    }
}

impl std::error::Error for ParseAccessLevelError {}

impl FromStr for AccessLevel {
    type Err = ParseAccessLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hide" => Ok(AccessLevel::Hide),
            "view" => Ok(AccessLevel::View),
            "edit" => Ok(AccessLevel::Edit),
            other => Err(ParseAccessLevelError(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NavigationPermission {
    #[validate(length(
        min = 1,
        max = 100,
        message = "jobTitle must be between 1 and 100 characters"
    ))]
    pub job_title: String,
    #[validate(length(
        min = 1,
        max = 100,
        message = "navigationItem must be between 1 and 100 characters"
    ))]
    pub navigation_item: String,
    pub access_level: AccessLevel,
}

impl NavigationPermission {
    pub fn new(
        job_title: impl Into<String>,
        navigation_item: impl Into<String>,
        access_level: AccessLevel,
    ) -> Self {
        Self {
            job_title: job_title.into(),
            navigation_item: navigation_item.into(),
            access_level,
        }
    }

    /// Composite key of the record, `jobTitle:navigationItem`.
    pub fn id(&self) -> String {
        format!("{}:{}", self.job_title, self.navigation_item)
    }

    pub fn matches(&self, job_title: &str, navigation_item: &str) -> bool {
        self.job_title == job_title && self.navigation_item == navigation_item
    }
}

// DTOs

/// Body of the bulk replace endpoint. Always the whole table.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct BulkReplacePermissionsDto {
    #[validate(nested)]
    pub permissions: Vec<NavigationPermission>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccessLevelDto {
    pub access_level: AccessLevel,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AccessQuery {
    pub job_title: String,
    pub navigation_item: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct MenuQuery {
    pub job_title: String,
}

// Responses

/// Resolved access for one pair, with every predicate spelled out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccessDecision {
    pub job_title: String,
    pub navigation_item: String,
    pub access_level: AccessLevel,
    pub can_view: bool,
    pub can_edit: bool,
    pub is_hidden: bool,
    pub is_read_only: bool,
}

impl AccessDecision {
    pub fn new(job_title: &str, navigation_item: &str, access_level: AccessLevel) -> Self {
        Self {
            job_title: job_title.to_string(),
            navigation_item: navigation_item.to_string(),
            access_level,
            can_view: access_level.can_view(),
            can_edit: access_level.can_edit(),
            is_hidden: access_level.is_hidden(),
            is_read_only: access_level.is_read_only(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenuEntry {
    pub navigation_item: String,
    pub access_level: AccessLevel,
    pub read_only: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NavigationCatalog {
    pub job_titles: Vec<String>,
    pub navigation_items: Vec<String>,
    pub access_levels: Vec<AccessLevel>,
}

impl NavigationCatalog {
    /// The catalog compiled into this build.
    pub fn compiled() -> Self {
        Self {
            job_titles: JOB_TITLES.iter().map(|s| s.to_string()).collect(),
            navigation_items: NAVIGATION_ITEMS.iter().map(|s| s.to_string()).collect(),
            access_levels: AccessLevel::ALL.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BulkReplaceResponse {
    pub count: usize,
}
