/// Password reset
///
/// Two steps: [`PasswordResetInit`] asks for a reset e-mail,
/// [`PasswordResetFinish`] sets the new password with the key from that
/// e-mail. Both keep the outcome flags their views render.

use std::sync::Arc;
use validator::Validate;

use crate::error::{ClientError, ClientResult, FieldError};
use crate::services::{AccountApi, ResetFinish};

/// Reset request form
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct ResetRequestForm {
    #[validate(length(min = 5, max = 254), email)]
    pub email: String,
}

/// First step: request the reset e-mail
pub struct PasswordResetInit {
    accounts: Arc<dyn AccountApi>,

    pub form: ResetRequestForm,
    pub success: bool,
    pub error: bool,

    /// The e-mail address is not registered
    pub error_email_not_exists: bool,
}

impl PasswordResetInit {
    pub fn new(accounts: Arc<dyn AccountApi>) -> Self {
        Self {
            accounts,
            form: ResetRequestForm::default(),
            success: false,
            error: false,
            error_email_not_exists: false,
        }
    }

    pub async fn request_reset(&mut self) -> ClientResult<()> {
        self.error = false;
        self.error_email_not_exists = false;
        self.form.validate()?;

        match self.accounts.init_password_reset(self.form.email.trim()).await {
            Ok(()) => {
                self.success = true;
                Ok(())
            }
            Err(err) => {
                self.success = false;
                if err.is_email_not_found() {
                    self.error_email_not_exists = true;
                } else {
                    tracing::warn!(error = %err, "Password reset request failed");
                    self.error = true;
                }
                Err(err)
            }
        }
    }
}

/// New password form
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct ResetFinishForm {
    #[validate(length(min = 4, max = 50))]
    pub new_password: String,

    pub confirm_password: String,
}

/// Second step: set the new password
pub struct PasswordResetFinish {
    accounts: Arc<dyn AccountApi>,
    key: Option<String>,

    pub form: ResetFinishForm,
    pub do_not_match: bool,
    pub success: bool,
    pub error: bool,
}

impl PasswordResetFinish {
    /// `key` comes from the reset link; without it the form is not offered
    pub fn new(accounts: Arc<dyn AccountApi>, key: Option<String>) -> Self {
        Self {
            accounts,
            key: key.filter(|k| !k.is_empty()),
            form: ResetFinishForm::default(),
            do_not_match: false,
            success: false,
            error: false,
        }
    }

    pub fn key_missing(&self) -> bool {
        self.key.is_none()
    }

    /// Sets the new password
    ///
    /// Mismatching passwords set `do_not_match` and nothing is sent.
    pub async fn finish_reset(&mut self) -> ClientResult<()> {
        self.do_not_match = false;
        self.error = false;

        if self.form.new_password != self.form.confirm_password {
            self.do_not_match = true;
            return Err(ClientError::InvalidForm(vec![FieldError::new(
                "confirmPassword",
                "The password and its confirmation do not match!",
            )]));
        }
        self.form.validate()?;

        let Some(key) = self.key.clone() else {
            self.error = true;
            return Err(ClientError::InvalidForm(vec![FieldError::new(
                "key",
                "The reset key is missing.",
            )]));
        };

        let finish = ResetFinish {
            key,
            new_password: self.form.new_password.clone(),
        };

        match self.accounts.finish_password_reset(&finish).await {
            Ok(()) => {
                self.success = true;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "Password reset could not be completed");
                self.success = false;
                self.error = true;
                Err(err)
            }
        }
    }
}
