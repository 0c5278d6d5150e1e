/// Alert and event types
///
/// Alerts are the toast messages shown after an action; each has a stable
/// message key for translation catalogues and an English default text.
/// Events are broadcast inside the client so that list views can refresh
/// after another view modified data.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Problem type returned when a password reset targets an unknown e-mail
pub const EMAIL_NOT_FOUND_TYPE: &str = "https://www.jhipster.tech/problem/email-not-found";

/// Toast messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlertType {
    SendActivationSuccess,
    SendActivationFailure,
    UserCreated,
    UserUpdated,
    UserDeleted,
    MemberCreated,
    MemberUpdated,
    NotificationInProgress,
    AffiliationCreated,
    AffiliationUpdated,
    AffiliationDeleted,
    AffiliationDeleteFailure,
}

impl AlertType {
    /// Translation key
    pub fn message_key(&self) -> &'static str {
        match self {
            AlertType::SendActivationSuccess => "gatewayApp.msUserServiceMSUser.sendActivate.success.string",
            AlertType::SendActivationFailure => "gatewayApp.msUserServiceMSUser.sendActivate.error.string",
            AlertType::UserCreated => "userServiceApp.user.created.string",
            AlertType::UserUpdated => "userServiceApp.user.updated.string",
            AlertType::UserDeleted => "userServiceApp.user.deleted.string",
            AlertType::MemberCreated => "memberServiceApp.member.created.string",
            AlertType::MemberUpdated => "memberServiceApp.member.updated.string",
            AlertType::NotificationInProgress => "assertionServiceApp.notifications.inProgress.string",
            AlertType::AffiliationCreated => "assertionServiceApp.affiliation.created.string",
            AlertType::AffiliationUpdated => "assertionServiceApp.affiliation.updated.string",
            AlertType::AffiliationDeleted => "assertionServiceApp.affiliation.deleted.string",
            AlertType::AffiliationDeleteFailure => "assertionServiceApp.affiliation.deleteFailure.string",
        }
    }

    /// English text
    pub fn default_text(&self) -> &'static str {
        match self {
            AlertType::SendActivationSuccess => "Invite sent.",
            AlertType::SendActivationFailure => "Invite email couldn't be sent.",
            AlertType::UserCreated => "User created. Invite sent.",
            AlertType::UserUpdated => "User updated successfully",
            AlertType::UserDeleted => "User deleted successfully",
            AlertType::MemberCreated => "Member created",
            AlertType::MemberUpdated => "Member updated successfully",
            AlertType::NotificationInProgress => "Notification in progress",
            AlertType::AffiliationCreated => "Affiliation created",
            AlertType::AffiliationUpdated => "Affiliation updated",
            AlertType::AffiliationDeleted => "Affiliation deleted",
            AlertType::AffiliationDeleteFailure => "There was a problem deleting the affiliation",
        }
    }

    /// Whether the alert reports a failure
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            AlertType::SendActivationFailure | AlertType::AffiliationDeleteFailure
        )
    }
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.default_text())
    }
}

/// Events broadcast between views
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventType {
    LogInSuccess,
    AffiliationCreated,
    AffiliationUpdated,
    UserListModified,
    AffiliationListModification,
    ImportAffiliations,
    SendNotifications,
    MemberListModification,
}

/// Event with an optional payload (usually a message)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortalEvent {
    pub kind: EventType,

    #[serde(default)]
    pub payload: Option<String>,
}

impl PortalEvent {
    pub fn new(kind: EventType) -> Self {
        Self { kind, payload: None }
    }

    pub fn with_payload(kind: EventType, payload: impl Into<String>) -> Self {
        Self {
            kind,
            payload: Some(payload.into()),
        }
    }
}
