/// Form workflows
///
/// Each workflow holds the state of one form (field values, disabled
/// flags, stored validation results) and drives the services on submit.
/// Side effects that belong to the host UI (navigating back, reloading the
/// application, showing a toast) go through the [`PortalUi`] port.
///
/// # Workflows
///
/// - [`user_update::UserUpdate`]: create/edit a user, including ownership transfer
/// - [`member_update::MemberUpdate`]: create/edit a member organization (admins)
/// - [`settings::AccountSettings`]: account settings and MFA
/// - [`password_reset`]: request and complete a password reset

pub mod member_update;
pub mod password_reset;
pub mod settings;
pub mod user_update;

use memberportal_shared::alerts::AlertType;

/// Host UI side effects
pub trait PortalUi: Send + Sync {
    /// Navigate back to the previous view
    fn previous_state(&self);

    /// Reload the whole application so the session is re-established
    fn reload(&self);

    /// Show a toast
    fn alert(&self, alert: AlertType);

    /// The account's language changed
    fn language_changed(&self, _lang_key: &str) {}
}
