/// Account settings workflow
///
/// Two forms: the profile (names, e-mail, language) and MFA. While MFA is
/// off the enrolment data is fetched up front so the QR code can be shown
/// as soon as the user ticks the box.

use memberportal_shared::auth::authorization::AuthzError;
use memberportal_shared::models::account::Account;
use memberportal_shared::validation::email_validator;
use reqwest::StatusCode;
use std::sync::Arc;
use validator::Validate;

use crate::error::{ClientError, ClientResult};
use crate::services::{AccountApi, MfaActivation, MfaSetup};
use crate::session::SessionService;
use crate::workflow::PortalUi;

/// Profile form
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct SettingsForm {
    #[validate(length(min = 1, max = 50))]
    pub first_name: String,

    #[validate(length(min = 1, max = 50))]
    pub last_name: String,

    #[validate(length(min = 5, max = 254), email, custom(function = "email_validator"))]
    pub email: String,

    pub lang_key: String,
}

/// MFA form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MfaForm {
    pub mfa_enabled: bool,
    pub verification_code: String,
}

/// Settings page state and workflow
pub struct AccountSettings {
    accounts: Arc<dyn AccountApi>,
    session: SessionService,
    ui: Arc<dyn PortalUi>,
    account: Option<Account>,

    pub settings_form: SettingsForm,
    pub mfa_form: MfaForm,

    pub mfa_setup: Option<MfaSetup>,
    pub show_mfa_setup: bool,
    pub show_mfa_text_code: bool,
    pub show_mfa_backup_codes: bool,
    pub mfa_backup_codes: Vec<String>,

    /// Verification code was rejected
    pub mfa_setup_failure: bool,

    /// Last profile save went through
    pub success: bool,
    pub save_error: Option<String>,
}

impl AccountSettings {
    pub fn new(accounts: Arc<dyn AccountApi>, session: SessionService, ui: Arc<dyn PortalUi>) -> Self {
        Self {
            accounts,
            session,
            ui,
            account: None,
            settings_form: SettingsForm::default(),
            mfa_form: MfaForm::default(),
            mfa_setup: None,
            show_mfa_setup: false,
            show_mfa_text_code: false,
            show_mfa_backup_codes: false,
            mfa_backup_codes: Vec::new(),
            mfa_setup_failure: false,
            success: false,
            save_error: None,
        }
    }

    /// Loads the account into both forms
    pub async fn init(&mut self) -> ClientResult<()> {
        let account = self.session.require_identity().await?;
        self.load(account);

        if !self.mfa_form.mfa_enabled {
            self.mfa_setup = Some(self.accounts.mfa_setup().await?);
        }

        Ok(())
    }

    fn load(&mut self, account: Account) {
        self.settings_form = SettingsForm {
            first_name: account.first_name.clone().unwrap_or_default(),
            last_name: account.last_name.clone().unwrap_or_default(),
            email: account.email.clone().unwrap_or_default(),
            lang_key: account.lang_key.clone().unwrap_or_default(),
        };
        self.mfa_form.mfa_enabled = account.mfa_enabled;
        self.account = Some(account);
    }

    fn account_mfa_enabled(&self) -> bool {
        self.account.as_ref().is_some_and(|a| a.mfa_enabled)
    }

    /// Shows the enrolment panel when MFA is being switched on
    pub fn mfa_enabled_state_change(&mut self) {
        self.show_mfa_setup = self.mfa_form.mfa_enabled && !self.account_mfa_enabled();
    }

    /// Flips between the QR code and the textual secret
    pub fn toggle_mfa_text_code(&mut self) {
        self.show_mfa_text_code = !self.show_mfa_text_code;
    }

    /// Switches MFA on or off according to the MFA form
    ///
    /// A verification code refused by the server (400) sets
    /// `mfa_setup_failure`.
    pub async fn save_mfa(&mut self) -> ClientResult<()> {
        if self.mfa_form.mfa_enabled {
            self.enable_mfa().await
        } else {
            self.accounts.disable_mfa().await?;
            self.show_mfa_backup_codes = false;
            self.mfa_backup_codes.clear();
            if let Some(account) = self.account.as_mut() {
                account.mfa_enabled = false;
            }
            self.mfa_setup = Some(self.accounts.mfa_setup().await?);
            Ok(())
        }
    }

    async fn enable_mfa(&mut self) -> ClientResult<()> {
        self.mfa_setup_failure = false;

        let secret = match &self.mfa_setup {
            Some(setup) => setup.secret.clone(),
            None => {
                let setup = self.accounts.mfa_setup().await?;
                let secret = setup.secret.clone();
                self.mfa_setup = Some(setup);
                secret
            }
        };

        let activation = MfaActivation {
            secret,
            verification_code: self.mfa_form.verification_code.trim().to_string(),
        };

        match self.accounts.enable_mfa(&activation).await {
            Ok(codes) => {
                self.mfa_backup_codes = codes;
                self.show_mfa_backup_codes = true;
                self.show_mfa_setup = false;
                if let Some(account) = self.account.as_mut() {
                    account.mfa_enabled = true;
                }
                Ok(())
            }
            Err(err) => {
                if err.status() == Some(StatusCode::BAD_REQUEST) {
                    tracing::debug!("MFA verification code rejected");
                    self.mfa_setup_failure = true;
                } else {
                    tracing::error!(error = %err, "Failed to enable MFA");
                }
                Err(err)
            }
        }
    }

    /// Saves the profile form
    ///
    /// On success the identity is re-fetched and a language change is
    /// reported to the UI. On failure nothing else is requested.
    pub async fn save(&mut self) -> ClientResult<()> {
        self.success = false;
        self.save_error = None;
        self.settings_form.validate()?;

        let mut settings = self.account.clone().unwrap_or_default();
        let previous_lang = settings.lang_key.clone();
        settings.first_name = Some(self.settings_form.first_name.clone());
        settings.last_name = Some(self.settings_form.last_name.clone());
        settings.email = Some(self.settings_form.email.clone());
        settings.lang_key = Some(self.settings_form.lang_key.clone()).filter(|l| !l.is_empty());

        if let Err(err) = self.accounts.save_account(&settings).await {
            tracing::error!(error = %err, "Failed to save account settings");
            self.save_error = Some(err.user_message());
            return Err(err);
        }

        self.success = true;
        tracing::info!(account_id = %settings.id, "Account settings saved");

        let refreshed = self
            .session
            .identity(true)
            .await?
            .ok_or(ClientError::Forbidden(AuthzError::NotAuthenticated))?;

        if refreshed.lang_key != previous_lang {
            if let Some(lang_key) = refreshed.lang_key.as_deref() {
                self.ui.language_changed(lang_key);
            }
        }
        self.load(refreshed);

        Ok(())
    }
}
