/// Authorization helpers and the user save policy
///
/// This module holds the role-gating rules of the portal as plain functions
/// over the session [`Account`] and the record being edited, independent of
/// any UI.
///
/// # Save policy
///
/// Saving a user maps to one of four server operations:
///
/// ```text
/// existing record
///   self-edit, mainContact changed          -> UpdateWithOwnershipChange
///   self-edit, mainContact unchanged        -> Update
///   other user, mainContact requested,
///     session not admin                     -> UpdateWithOwnershipChange
///   other user, otherwise                   -> Update
/// new record
///   mainContact requested, session not admin -> CreateWithOwnershipChange
///   otherwise                                -> Create
/// ```
///
/// Ownership-change variants re-establish the session after the write
/// (full reload); plain variants just navigate back.
///
/// # Example
///
/// ```
/// use memberportal_shared::auth::authorization::{decide_save_action, SaveAction};
/// use memberportal_shared::models::account::Account;
/// use memberportal_shared::models::user::User;
///
/// let session = Account {
///     id: "owner-1".to_string(),
///     authorities: vec!["ROLE_ORG_OWNER".to_string()],
///     main_contact: true,
///     ..Default::default()
/// };
///
/// // The owner hands ownership to a colleague
/// let colleague = User {
///     id: Some("user-2".to_string()),
///     main_contact: true,
///     ..Default::default()
/// };
///
/// let action = decide_save_action(&session, &colleague);
/// assert_eq!(action, SaveAction::UpdateWithOwnershipChange);
/// assert!(action.requires_reload());
/// ```

use crate::auth::authority::Authority;
use crate::models::account::Account;
use crate::models::member::Member;
use crate::models::user::User;

/// Error type for authorization checks
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthzError {
    /// No identity is loaded
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Session lacks every accepted authority
    #[error("Insufficient permissions: requires one of {required:?}")]
    InsufficientAuthority { required: Vec<Authority> },
}

/// Server operation chosen for a user save
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveAction {
    /// Create, then navigate back
    Create,

    /// Create, then reload the application
    CreateWithOwnershipChange,

    /// Update, then navigate back
    Update,

    /// Update, then reload the application
    UpdateWithOwnershipChange,
}

impl SaveAction {
    /// Whether the operation creates a record
    pub fn is_create(&self) -> bool {
        matches!(self, SaveAction::Create | SaveAction::CreateWithOwnershipChange)
    }

    /// Whether the session must be re-established after success
    pub fn requires_reload(&self) -> bool {
        matches!(
            self,
            SaveAction::CreateWithOwnershipChange | SaveAction::UpdateWithOwnershipChange
        )
    }
}

/// Chooses the server operation for saving `user` as `session`
pub fn decide_save_action(session: &Account, user: &User) -> SaveAction {
    let is_admin = session.is_admin();

    match user.id.as_deref() {
        Some(id) if id == session.id => {
            if session.main_contact != user.main_contact {
                SaveAction::UpdateWithOwnershipChange
            } else {
                SaveAction::Update
            }
        }
        Some(_) => {
            if user.main_contact && !is_admin {
                SaveAction::UpdateWithOwnershipChange
            } else {
                SaveAction::Update
            }
        }
        None => {
            if user.main_contact && !is_admin {
                SaveAction::CreateWithOwnershipChange
            } else {
                SaveAction::Create
            }
        }
    }
}

/// Whether the "organization admin" checkbox is offered
///
/// Requires an admin session and a selected organization that permits
/// superadmins.
pub fn can_grant_org_admin(session: &Account, selected_org: Option<&Member>) -> bool {
    session.is_admin() && selected_org.is_some_and(|org| org.superadmin_enabled)
}

/// Whether the organization selector of a user form is locked
///
/// Admins may always pick; org owners and consortium leads are pinned to
/// their own organization; anyone else is locked once the user is
/// affiliated.
pub fn org_selection_locked(session: &Account, existing_member: bool) -> bool {
    if session.is_admin() {
        false
    } else if session.is_org_owner() || session.is_consortium_lead() {
        true
    } else {
        existing_member
    }
}

/// Checks that the session holds at least one of `required`
pub fn require_any_authority(session: &Account, required: &[Authority]) -> Result<(), AuthzError> {
    if !session.has_any_authority(required) {
        return Err(AuthzError::InsufficientAuthority {
            required: required.to_vec(),
        });
    }

    Ok(())
}
