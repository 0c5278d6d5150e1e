/// Authorities and role-gating rules
///
/// # Modules
///
/// - [`authority`]: The portal's authority (role) names
/// - [`authorization`]: Permission checks and the user save policy
///
/// # Example
///
/// ```
/// use memberportal_shared::auth::authority::Authority;
/// use memberportal_shared::auth::authorization::require_any_authority;
/// use memberportal_shared::models::account::Account;
///
/// let account = Account {
///     id: "u-1".to_string(),
///     authorities: vec!["ROLE_ADMIN".to_string()],
///     ..Default::default()
/// };
///
/// assert!(require_any_authority(&account, &[Authority::Admin]).is_ok());
/// ```

pub mod authority;
pub mod authorization;
