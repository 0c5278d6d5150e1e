/// Member (organization) model
///
/// A member is an organization holding a membership, keyed by its CRM
/// `salesforce_id`. Users point at a member through the same id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Member record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    /// Member ID, absent for members not yet created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// CRM organization ID
    #[serde(default)]
    pub salesforce_id: String,

    /// Organization name
    #[serde(default)]
    pub client_name: Option<String>,

    /// ORCID client ID used for affiliation pushes
    #[serde(default)]
    pub client_id: Option<String>,

    /// CRM id of the parent consortium, if any
    #[serde(default)]
    pub parent_salesforce_id: Option<String>,

    /// Whether this member leads a consortium
    #[serde(default)]
    pub is_consortium_lead: bool,

    /// Whether the main contact may also hold organization admin rights
    #[serde(default)]
    pub superadmin_enabled: bool,

    /// Whether the affiliation manager is enabled
    #[serde(default)]
    pub assertion_service_enabled: bool,

    /// Who created the record
    #[serde(default)]
    pub created_by: Option<String>,

    /// When the record was created
    #[serde(default)]
    pub created_date: Option<DateTime<Utc>>,

    /// Who last modified the record
    #[serde(default)]
    pub last_modified_by: Option<String>,

    /// When the record was last modified
    #[serde(default)]
    pub last_modified_date: Option<DateTime<Utc>>,
}

impl Member {
    /// A member without an ID has not been created on the server yet
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// Finds a member by CRM id in a list
    pub fn find_by_salesforce_id<'a>(members: &'a [Member], salesforce_id: &str) -> Option<&'a Member> {
        members.iter().find(|m| m.salesforce_id == salesforce_id)
    }
}
