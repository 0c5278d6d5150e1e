/// Client wiring
///
/// [`PortalClient`] builds every service on top of one shared HTTP client
/// and hands out the workflows already connected to them.
///
/// # Example
///
/// ```no_run
/// use memberportal_client::app::PortalClient;
/// use memberportal_client::config::ClientConfig;
///
/// # async fn example() -> anyhow::Result<()> {
/// let client = PortalClient::new(ClientConfig::from_env()?)?;
///
/// if let Some(account) = client.session().identity(false).await? {
///     tracing::info!(user = %account.user_name(), "Logged in");
/// }
/// # Ok(())
/// # }
/// ```

use std::sync::Arc;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::events::EventBus;
use crate::http::PortalHttp;
use crate::services::{
    AccountApi, AffiliationService, HttpAccountApi, HttpMemberApi, HttpUserApi, MemberApi,
    MemberService, UserApi,
};
use crate::session::SessionService;
use crate::workflow::member_update::MemberUpdate;
use crate::workflow::password_reset::{PasswordResetFinish, PasswordResetInit};
use crate::workflow::settings::AccountSettings;
use crate::workflow::user_update::UserUpdate;
use crate::workflow::PortalUi;

/// Portal client
///
/// Cheap to clone; every service is shared.
#[derive(Clone)]
pub struct PortalClient {
    users: Arc<dyn UserApi>,
    accounts: Arc<dyn AccountApi>,
    members: MemberService,
    affiliations: AffiliationService,
    session: SessionService,
    events: EventBus,
}

impl PortalClient {
    /// Builds the client over HTTP
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let http = PortalHttp::new(config)?;
        tracing::debug!(base_url = %http.config().api.base_url, "Portal client created");

        Ok(Self::from_parts(
            Arc::new(HttpUserApi::new(http.clone())),
            Arc::new(HttpMemberApi::new(http.clone())),
            Arc::new(HttpAccountApi::new(http.clone())),
            AffiliationService::new(http),
        ))
    }

    /// Builds the client from `PORTAL_*` environment variables
    pub fn from_env() -> ClientResult<Self> {
        let config = ClientConfig::from_env().map_err(|e| ClientError::Config(e.to_string()))?;
        Self::new(config)
    }

    /// Builds the client from explicit service implementations
    pub fn from_parts(
        users: Arc<dyn UserApi>,
        members: Arc<dyn MemberApi>,
        accounts: Arc<dyn AccountApi>,
        affiliations: AffiliationService,
    ) -> Self {
        let session = SessionService::new(accounts.clone(), members.clone());
        Self {
            users,
            accounts,
            members: MemberService::new(members),
            affiliations,
            session,
            events: EventBus::new(),
        }
    }

    pub fn users(&self) -> &Arc<dyn UserApi> {
        &self.users
    }

    pub fn accounts(&self) -> &Arc<dyn AccountApi> {
        &self.accounts
    }

    pub fn members(&self) -> &MemberService {
        &self.members
    }

    pub fn affiliations(&self) -> &AffiliationService {
        &self.affiliations
    }

    pub fn session(&self) -> &SessionService {
        &self.session
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// User editor bound to this client
    pub fn user_update(&self, ui: Arc<dyn PortalUi>) -> UserUpdate {
        UserUpdate::new(
            self.users.clone(),
            self.members.clone(),
            self.session.clone(),
            ui,
        )
    }

    /// Member editor bound to this client
    pub fn member_update(&self, ui: Arc<dyn PortalUi>) -> MemberUpdate {
        MemberUpdate::new(
            self.members.api().clone(),
            self.session.clone(),
            ui,
            self.events.clone(),
        )
    }

    /// Settings page bound to this client
    pub fn settings(&self, ui: Arc<dyn PortalUi>) -> AccountSettings {
        AccountSettings::new(self.accounts.clone(), self.session.clone(), ui)
    }

    pub fn password_reset_init(&self) -> PasswordResetInit {
        PasswordResetInit::new(self.accounts.clone())
    }

    pub fn password_reset_finish(&self, key: Option<String>) -> PasswordResetFinish {
        PasswordResetFinish::new(self.accounts.clone(), key)
    }
}
