/// Form validators
///
/// The `validator` crate's `email` rule accepts some addresses the portal's
/// back end rejects (quoted dots, missing TLD, brackets). Forms stack
/// [`email_validator`] on top of it as a `custom` rule.
///
/// # Example
///
/// ```
/// use memberportal_shared::validation::is_valid_email;
///
/// assert!(is_valid_email("jane.doe@example.org"));
/// assert!(!is_valid_email("jane@localhost"));
/// ```

use regex::Regex;
use std::sync::LazyLock;
use validator::ValidationError;

#[allow(clippy::expect_used)] // static pattern
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r#"^([^@\s/."'\(\)\[\]\{\}\\/,:;]+\.)*"#,
        r#"([^@\s\."\(\)\[\]\{\}\\/,:;]|(".+"))+"#,
        r#"@[^@\s\."'\(\)\[\]\{\}\\/,:;]+"#,
        r#"(\.[^@\s\."'\(\)\[\]\{\}\\/,:;]{2,})+$"#,
    ))
    .expect("static e-mail regex should compile")
});

/// Returns true if `value` has the shape of an e-mail address
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value)
}

/// `validator` custom rule: empty values pass, anything else must be e-mail shaped
pub fn email_validator(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || is_valid_email(value) {
        return Ok(());
    }

    let mut err = ValidationError::new("invalidEmail");
    err.message = Some("This field is invalid".into());
    Err(err)
}
