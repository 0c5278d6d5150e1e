/// Affiliation (assertion) model
///
/// Affiliations are the employment, education, membership... entries an
/// organization asserts on researchers' records. The assertion service owns
/// them; the portal lists, edits and deletes them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

const GRID_BASE_URL: &str = "https://www.grid.ac/";
const GRID_BASE_URL_INSTITUTES: &str = "https://www.grid.ac/institutes/";
const GRID_BASE_URL_ALT: &str = "https://grid.ac/";
const GRID_BASE_URL_INSTITUTES_ALT: &str = "https://grid.ac/institutes/";

/// Section of the researcher's record the affiliation lands in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AffiliationSection {
    Education,
    Employment,
    Qualification,
    InvitedPosition,
    Distinction,
    Membership,
    Service,
}

impl AffiliationSection {
    /// All sections in display order
    pub const ALL: [AffiliationSection; 7] = [
        AffiliationSection::Education,
        AffiliationSection::Employment,
        AffiliationSection::Qualification,
        AffiliationSection::InvitedPosition,
        AffiliationSection::Distinction,
        AffiliationSection::Membership,
        AffiliationSection::Service,
    ];

    /// Display text
    pub fn display_text(&self) -> &'static str {
        match self {
            AffiliationSection::Education => "Education",
            AffiliationSection::Employment => "Employment",
            AffiliationSection::Qualification => "Qualification",
            AffiliationSection::InvitedPosition => "Invited Position",
            AffiliationSection::Distinction => "Distinction",
            AffiliationSection::Membership => "Membership",
            AffiliationSection::Service => "Service",
        }
    }
}

/// Organization identifier scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrgIdType {
    Ringgold,
    Grid,
    Ror,
}

/// Synchronisation status reported by the assertion service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AffiliationStatus {
    Pending,
    InOrcid,
    UserGrantedAccess,
    UserDeniedAccess,
    UserRevokedAccess,
    UserDeletedFromOrcid,
    DeletedInOrcid,
    ErrorAddingToOrcid,
    ErrorUpdatingToOrcid,
    ErrorDeletingInOrcid,
    PendingRetry,
    NotificationRequested,
    NotificationSent,
    NotificationFailed,
    PendingUpdate,
}

impl AffiliationStatus {
    pub const ALL: [AffiliationStatus; 15] = [
        AffiliationStatus::Pending,
        AffiliationStatus::InOrcid,
        AffiliationStatus::UserGrantedAccess,
        AffiliationStatus::UserDeniedAccess,
        AffiliationStatus::UserRevokedAccess,
        AffiliationStatus::UserDeletedFromOrcid,
        AffiliationStatus::DeletedInOrcid,
        AffiliationStatus::ErrorAddingToOrcid,
        AffiliationStatus::ErrorUpdatingToOrcid,
        AffiliationStatus::ErrorDeletingInOrcid,
        AffiliationStatus::PendingRetry,
        AffiliationStatus::NotificationRequested,
        AffiliationStatus::NotificationSent,
        AffiliationStatus::NotificationFailed,
        AffiliationStatus::PendingUpdate,
    ];

    /// Display text shown in the affiliation list
    pub fn display_text(&self) -> &'static str {
        match self {
            AffiliationStatus::Pending => "Pending",
            AffiliationStatus::InOrcid => "In ORCID",
            AffiliationStatus::UserGrantedAccess => "User granted access",
            AffiliationStatus::UserDeniedAccess => "User denied access",
            AffiliationStatus::UserRevokedAccess => "User revoked access",
            AffiliationStatus::UserDeletedFromOrcid => "User deleted from ORCID",
            AffiliationStatus::DeletedInOrcid => "Deleted in ORCID",
            AffiliationStatus::ErrorAddingToOrcid => "Error adding to ORCID",
            AffiliationStatus::ErrorUpdatingToOrcid => "Error updating in ORCID",
            AffiliationStatus::ErrorDeletingInOrcid => "Error deleting in ORCID",
            AffiliationStatus::PendingRetry => "Pending retry in ORCID",
            AffiliationStatus::NotificationRequested => "Notification requested",
            AffiliationStatus::NotificationSent => "Notification sent",
            AffiliationStatus::NotificationFailed => "Notification failed",
            AffiliationStatus::PendingUpdate => "Pending update in ORCID",
        }
    }

    /// Parses either the status name or its display text
    pub fn from_wire(value: &str) -> Option<Self> {
        serde_json::from_value(serde_json::Value::String(value.to_string()))
            .ok()
            .or_else(|| Self::ALL.into_iter().find(|s| s.display_text() == value))
    }

    /// Statuses that represent a failed push
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            AffiliationStatus::ErrorAddingToOrcid
                | AffiliationStatus::ErrorUpdatingToOrcid
                | AffiliationStatus::ErrorDeletingInOrcid
                | AffiliationStatus::NotificationFailed
        )
    }
}

impl fmt::Display for AffiliationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_text())
    }
}

/// Affiliation record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Affiliation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// E-mail of the researcher the affiliation is for
    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub orcid_id: Option<String>,

    #[serde(default)]
    pub affiliation_section: Option<AffiliationSection>,

    #[serde(default)]
    pub department_name: Option<String>,

    #[serde(default)]
    pub role_title: Option<String>,

    #[serde(default)]
    pub start_year: Option<String>,

    #[serde(default)]
    pub start_month: Option<String>,

    #[serde(default)]
    pub start_day: Option<String>,

    #[serde(default)]
    pub end_year: Option<String>,

    #[serde(default)]
    pub end_month: Option<String>,

    #[serde(default)]
    pub end_day: Option<String>,

    #[serde(default)]
    pub org_name: Option<String>,

    /// ISO 3166-1 alpha-2 country code
    #[serde(default)]
    pub org_country: Option<String>,

    #[serde(default)]
    pub org_city: Option<String>,

    #[serde(default)]
    pub org_region: Option<String>,

    #[serde(default)]
    pub disambiguated_org_id: Option<String>,

    #[serde(default)]
    pub disambiguation_source: Option<OrgIdType>,

    #[serde(default)]
    pub external_id: Option<String>,

    #[serde(default)]
    pub external_id_type: Option<String>,

    #[serde(default)]
    pub external_id_url: Option<String>,

    #[serde(default)]
    pub url: Option<String>,

    /// Sync status, set by the server
    ///
    /// Listings carry the display text, single fetches the status name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default)]
    pub salesforce_id: Option<String>,

    #[serde(default)]
    pub created: Option<DateTime<Utc>>,

    #[serde(default)]
    pub modified: Option<DateTime<Utc>>,
}

impl Affiliation {
    /// Parsed sync status, if the server sent a known one
    pub fn sync_status(&self) -> Option<AffiliationStatus> {
        self.status.as_deref().and_then(AffiliationStatus::from_wire)
    }

    /// Normalises the organization identifier before submission
    ///
    /// GRID identifiers pasted as URLs are reduced to the bare id.
    pub fn normalize_org_id(&mut self) {
        if self.disambiguation_source == Some(OrgIdType::Grid) {
            if let Some(id) = self.disambiguated_org_id.as_deref() {
                self.disambiguated_org_id = Some(strip_grid_url(id).to_string());
            }
        }
    }
}

/// Strips any known GRID URL prefix from an identifier
pub fn strip_grid_url(grid_identifier: &str) -> &str {
    [
        GRID_BASE_URL_INSTITUTES,
        GRID_BASE_URL,
        GRID_BASE_URL_INSTITUTES_ALT,
        GRID_BASE_URL_ALT,
    ]
    .iter()
    .find_map(|prefix| grid_identifier.strip_prefix(prefix))
    .unwrap_or(grid_identifier)
}
