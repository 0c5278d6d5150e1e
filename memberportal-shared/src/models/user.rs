/// Portal user model
///
/// Mirrors the user service's user DTO. A user belongs to at most one
/// organization (its `salesforce_id`), and at most one user per organization
/// is the organization's main contact. The server enforces that rule; the
/// client only observes it through `hasOwner`.
///
/// # Wire format
///
/// ```json
/// {
///   "id": "5f1c...",
///   "login": "jane@example.org",
///   "firstName": "Jane",
///   "lastName": "Doe",
///   "mainContact": false,
///   "isAdmin": false,
///   "salesforceId": "001G000001AbCdE",
///   "activated": true,
///   "createdBy": "system",
///   "createdDate": "2020-04-01T09:30:00Z",
///   "lastModifiedBy": "system",
///   "lastModifiedDate": "2020-04-02T10:00:00Z"
/// }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// User ID, absent for users not yet created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Login (e-mail address)
    #[serde(default)]
    pub login: String,

    /// Given name
    #[serde(default)]
    pub first_name: Option<String>,

    /// Family name
    #[serde(default)]
    pub last_name: Option<String>,

    /// Main contact (owner) of its organization
    #[serde(default)]
    pub main_contact: bool,

    /// Organization admin; only meaningful for superadmin-enabled members
    #[serde(default)]
    pub is_admin: bool,

    /// Organization the user belongs to
    #[serde(default)]
    pub salesforce_id: Option<String>,

    /// Display name of the organization (read only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_name: Option<String>,

    /// Whether the account has been activated
    #[serde(default)]
    pub activated: bool,

    /// Preferred UI language
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang_key: Option<String>,

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

impl User {
    /// A user without an ID has not been created on the server yet
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// A user with an organization is already affiliated
    pub fn is_affiliated(&self) -> bool {
        self.salesforce_id.as_deref().is_some_and(|id| !id.is_empty())
    }

    /// Whether an activation (invite) e-mail can be re-sent
    pub fn can_resend_activation(&self) -> bool {
        !self.login.is_empty() && !self.activated
    }
}
