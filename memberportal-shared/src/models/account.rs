/// Session identity model
///
/// The `Account` is what the identity endpoint (`GET account`) returns for the
/// logged-in user. Role checks used throughout the portal are methods on it.
///
/// # Example
///
/// ```
/// use memberportal_shared::auth::authority::Authority;
/// use memberportal_shared::models::account::Account;
///
/// let account = Account {
///     id: "u-1".to_string(),
///     authorities: vec!["ROLE_USER".to_string(), "ROLE_ORG_OWNER".to_string()],
///     salesforce_id: Some("001A".to_string()),
///     main_contact: true,
///     ..Default::default()
/// };
///
/// assert!(account.has_any_authority(&[Authority::Admin, Authority::OrgOwner]));
/// assert!(!account.is_admin());
/// ```

use serde::{Deserialize, Serialize};

use crate::auth::authority::Authority;

/// Identity of the logged-in user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// User ID
    pub id: String,

    /// Login name (the e-mail address)
    #[serde(default)]
    pub login: Option<String>,

    /// E-mail address
    #[serde(default)]
    pub email: Option<String>,

    /// Given name
    #[serde(default)]
    pub first_name: Option<String>,

    /// Family name
    #[serde(default)]
    pub last_name: Option<String>,

    /// Whether the account has been activated
    #[serde(default)]
    pub activated: bool,

    /// Granted authorities as wire strings
    #[serde(default)]
    pub authorities: Vec<String>,

    /// Preferred UI language
    #[serde(default)]
    pub lang_key: Option<String>,

    /// Avatar URL
    #[serde(default)]
    pub image_url: Option<String>,

    /// Organization the user belongs to
    #[serde(default)]
    pub salesforce_id: Option<String>,

    /// Set when an admin is impersonating another organization
    #[serde(default)]
    pub logged_as: bool,

    /// Login of the impersonated user
    #[serde(default)]
    pub login_as: Option<String>,

    /// Whether this user is the organization's main contact
    #[serde(default)]
    pub main_contact: bool,

    /// Whether two-factor authentication is enabled
    #[serde(default)]
    pub mfa_enabled: bool,
}

impl Account {
    /// Returns true if the account holds at least one of `authorities`
    pub fn has_any_authority(&self, authorities: &[Authority]) -> bool {
        authorities
            .iter()
            .any(|wanted| self.authorities.iter().any(|held| held == wanted.as_str()))
    }

    /// Holds ROLE_ADMIN
    pub fn is_admin(&self) -> bool {
        self.has_any_authority(&[Authority::Admin])
    }

    /// Holds ROLE_ORG_OWNER
    pub fn is_org_owner(&self) -> bool {
        self.has_any_authority(&[Authority::OrgOwner])
    }

    /// Holds ROLE_CONSORTIUM_LEAD
    pub fn is_consortium_lead(&self) -> bool {
        self.has_any_authority(&[Authority::ConsortiumLead])
    }

    /// Display name used by the navigation bar
    pub fn user_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{} {}", first, last),
            (Some(first), None) => first.clone(),
            (None, Some(last)) => last.clone(),
            (None, None) => self
                .login
                .clone()
                .or_else(|| self.email.clone())
                .unwrap_or_default(),
        }
    }
}

/// Organization record cached for the logged-in user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberData {
    /// Organization ID in the CRM
    #[serde(default)]
    pub id: Option<String>,

    /// Organization name
    #[serde(default)]
    pub name: Option<String>,

    /// Public display name
    #[serde(default)]
    pub public_display_name: Option<String>,

    /// Organization website
    #[serde(default)]
    pub website: Option<String>,

    /// Salesforce ID of the consortium lead, if any
    #[serde(default)]
    pub consortia_lead_id: Option<String>,

    /// Whether the organization leads a consortium
    #[serde(default)]
    pub is_consortium_lead: bool,
}

impl MemberData {
    /// The server answers with an empty record when nothing is on file
    pub fn is_loaded(&self) -> bool {
        self.id.as_deref().is_some_and(|id| !id.is_empty())
    }
}
