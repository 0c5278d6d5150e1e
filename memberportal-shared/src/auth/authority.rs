/// Portal authorities (roles)
///
/// The identity endpoint returns the granted authorities as plain strings
/// (`"ROLE_ADMIN"`, `"ROLE_ORG_OWNER"`, ...). Unknown strings are kept on the
/// account as-is and simply never match a known authority.
///
/// # Roles
///
/// - **ROLE_USER**: Any activated portal user
/// - **ROLE_ADMIN**: Portal staff; manages every organization
/// - **ROLE_ORG_OWNER**: Main contact of an organization
/// - **ROLE_CONSORTIUM_LEAD**: Main contact of a consortium lead organization
/// - **ROLE_ASSERTION_SERVICE_ENABLED**: Organization may manage affiliations
///
/// # Example
///
/// ```
/// use memberportal_shared::auth::authority::Authority;
///
/// let role: Authority = "ROLE_ORG_OWNER".parse().unwrap();
/// assert_eq!(role, Authority::OrgOwner);
/// assert!(role.can_manage_org_users());
/// ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Known portal authorities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Authority {
    /// Any activated user
    #[serde(rename = "ROLE_USER")]
    User,

    /// Portal administrator
    #[serde(rename = "ROLE_ADMIN")]
    Admin,

    /// Organization owner (main contact)
    #[serde(rename = "ROLE_ORG_OWNER")]
    OrgOwner,

    /// Consortium lead main contact
    #[serde(rename = "ROLE_CONSORTIUM_LEAD")]
    ConsortiumLead,

    /// Organization may use the affiliation manager
    #[serde(rename = "ROLE_ASSERTION_SERVICE_ENABLED")]
    AssertionServiceEnabled,
}

impl Authority {
    /// Wire representation of the authority
    pub fn as_str(&self) -> &'static str {
        match self {
            Authority::User => "ROLE_USER",
            Authority::Admin => "ROLE_ADMIN",
            Authority::OrgOwner => "ROLE_ORG_OWNER",
            Authority::ConsortiumLead => "ROLE_CONSORTIUM_LEAD",
            Authority::AssertionServiceEnabled => "ROLE_ASSERTION_SERVICE_ENABLED",
        }
    }

    /// Can manage any organization's members and users
    pub fn can_manage_members(&self) -> bool {
        matches!(self, Authority::Admin)
    }

    /// Can add, edit and remove users of their own organization
    pub fn can_manage_org_users(&self) -> bool {
        matches!(
            self,
            Authority::Admin | Authority::OrgOwner | Authority::ConsortiumLead
        )
    }

    /// Is pinned to the session's own organization in user forms
    pub fn is_org_scoped(&self) -> bool {
        matches!(self, Authority::OrgOwner | Authority::ConsortiumLead)
    }
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown authority string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown authority: {0}")]
pub struct UnknownAuthority(pub String);

impl FromStr for Authority {
    type Err = UnknownAuthority;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ROLE_USER" => Ok(Authority::User),
            "ROLE_ADMIN" => Ok(Authority::Admin),
            "ROLE_ORG_OWNER" => Ok(Authority::OrgOwner),
            "ROLE_CONSORTIUM_LEAD" => Ok(Authority::ConsortiumLead),
            "ROLE_ASSERTION_SERVICE_ENABLED" => Ok(Authority::AssertionServiceEnabled),
            other => Err(UnknownAuthority(other.to_string())),
        }
    }
}
