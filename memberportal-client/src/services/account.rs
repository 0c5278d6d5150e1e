/// Account service
///
/// The logged-in account lives under `account` in the user service: the
/// identity itself, settings updates, MFA setup and the two-step password
/// reset.
///
/// # MFA
///
/// ```text
/// GET  account/mfa      -> MfaSetup (secret, otp url, QR code)
/// POST account/mfa/on   <- MfaActivation, -> backup codes
/// POST account/mfa/off
/// ```

use async_trait::async_trait;
use memberportal_shared::models::account::Account;
use serde::{Deserialize, Serialize};

use crate::error::ClientResult;
use crate::http::PortalHttp;

/// MFA enrolment data offered before MFA is switched on
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MfaSetup {
    pub secret: String,

    /// `otpauth://` URL encoded in the QR code
    #[serde(default)]
    pub otp: Option<String>,

    /// Rendered QR code, as sent by the server
    #[serde(default)]
    pub qr_code: serde_json::Value,
}

/// Body of `POST account/mfa/on`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MfaActivation {
    pub secret: String,
    pub verification_code: String,
}

/// Body of `POST account/reset-password/finish`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetFinish {
    pub key: String,
    pub new_password: String,
}

/// Operations on the logged-in account
#[async_trait]
pub trait AccountApi: Send + Sync {
    /// Current identity
    async fn fetch_account(&self) -> ClientResult<Account>;

    /// Saves the settings form
    async fn save_account(&self, account: &Account) -> ClientResult<()>;

    async fn mfa_setup(&self) -> ClientResult<MfaSetup>;

    /// Switches MFA on; returns the one-time backup codes
    async fn enable_mfa(&self, activation: &MfaActivation) -> ClientResult<Vec<String>>;

    async fn disable_mfa(&self) -> ClientResult<()>;

    /// Starts a password reset for `email`
    async fn init_password_reset(&self, email: &str) -> ClientResult<()>;

    /// Completes a password reset with the key from the e-mail
    async fn finish_password_reset(&self, finish: &ResetFinish) -> ClientResult<()>;
}

/// [`AccountApi`] over HTTP
#[derive(Clone)]
pub struct HttpAccountApi {
    http: PortalHttp,
}

impl HttpAccountApi {
    pub fn new(http: PortalHttp) -> Self {
        Self { http }
    }

    fn url(&self, resource: &str) -> String {
        self.http.config().user_service_url(resource)
    }
}

#[async_trait]
impl AccountApi for HttpAccountApi {
    async fn fetch_account(&self) -> ClientResult<Account> {
        self.http.get_json(&self.url("account")).await
    }

    async fn save_account(&self, account: &Account) -> ClientResult<()> {
        self.http.post_no_content(&self.url("account"), account).await
    }

    async fn mfa_setup(&self) -> ClientResult<MfaSetup> {
        self.http.get_json(&self.url("account/mfa")).await
    }

    async fn enable_mfa(&self, activation: &MfaActivation) -> ClientResult<Vec<String>> {
        let codes: Vec<String> = self
            .http
            .post_json(&self.url("account/mfa/on"), activation)
            .await?;
        tracing::info!(backup_codes = codes.len(), "MFA enabled");
        Ok(codes)
    }

    async fn disable_mfa(&self) -> ClientResult<()> {
        self.http.post_empty(&self.url("account/mfa/off")).await?;
        tracing::info!("MFA disabled");
        Ok(())
    }

    async fn init_password_reset(&self, email: &str) -> ClientResult<()> {
        self.http
            .post_text(&self.url("account/reset-password/init"), email)
            .await
    }

    async fn finish_password_reset(&self, finish: &ResetFinish) -> ClientResult<()> {
        self.http
            .post_no_content(&self.url("account/reset-password/finish"), finish)
            .await
    }
}
