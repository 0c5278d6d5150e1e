/// Wire models for the member portal
///
/// This module contains the DTOs exchanged with the portal's back-end
/// services. Field names follow the services' camelCase JSON; dates are
/// ISO-8601 on the wire and `chrono::DateTime<Utc>` in memory.
///
/// # Models
///
/// - `user`: Portal users and their organization link
/// - `member`: Member organizations
/// - `account`: Session identity and the cached organization record
/// - `affiliation`: Affiliations managed through the assertion service
/// - `page`: Paged list requests and results
/// - `validation`: Server-side validation answers
///
/// # Example
///
/// ```
/// use memberportal_shared::models::user::User;
///
/// let user: User = serde_json::from_str(r#"{"login": "jane@example.org", "mainContact": true}"#).unwrap();
/// assert!(user.is_new());
/// assert!(user.main_contact);
/// ```

pub mod account;
pub mod affiliation;
pub mod member;
pub mod page;
pub mod user;
pub mod validation;
