/// Session and identity
///
/// [`SessionService`] caches the logged-in [`Account`] and the
/// organization record ([`MemberData`]) of that account. Both sit behind
/// `RwLock`s; the authentication state and the "fetching member data" flag
/// are published on watch channels so that views can follow them.
///
/// # Lifecycle
///
/// ```text
/// identity(false) ──> cached? ──yes──> cached account
///                       │no
///                       └──> GET account ──> publish state ──> load member data
/// clear()          ──> drop caches, publish None
/// ```
///
/// # Example
///
/// ```no_run
/// use memberportal_client::PortalClient;
/// use memberportal_shared::auth::authority::Authority;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = PortalClient::from_env()?;
/// let session = client.session();
///
/// if let Some(account) = session.identity(false).await? {
///     println!("Logged in as {}", account.user_name());
/// }
/// let can_manage = session.has_any_authority(&[Authority::Admin, Authority::OrgOwner]).await;
/// # Ok(())
/// # }
/// ```

use memberportal_shared::auth::authority::Authority;
use memberportal_shared::auth::authorization::AuthzError;
use memberportal_shared::models::account::{Account, MemberData};
use reqwest::StatusCode;
use std::sync::Arc;
use tokio::sync::{watch, RwLock};
use tokio_stream::wrappers::WatchStream;

use crate::error::{ClientError, ClientResult};
use crate::services::{AccountApi, MemberApi};

/// Cached identity of the logged-in user
#[derive(Clone)]
pub struct SessionService {
    accounts: Arc<dyn AccountApi>,
    members: Arc<dyn MemberApi>,
    identity: Arc<RwLock<Option<Account>>>,
    member_data: Arc<RwLock<Option<MemberData>>>,
    auth_state: Arc<watch::Sender<Option<Account>>>,
    fetching_member_data: Arc<watch::Sender<bool>>,
}

impl SessionService {
    pub fn new(accounts: Arc<dyn AccountApi>, members: Arc<dyn MemberApi>) -> Self {
        let (auth_state, _) = watch::channel(None);
        let (fetching_member_data, _) = watch::channel(false);
        Self {
            accounts,
            members,
            identity: Arc::new(RwLock::new(None)),
            member_data: Arc::new(RwLock::new(None)),
            auth_state: Arc::new(auth_state),
            fetching_member_data: Arc::new(fetching_member_data),
        }
    }

    /// Current identity, fetched on first use or when `force` is set
    ///
    /// An unauthenticated session (401/403) yields `Ok(None)` and clears
    /// the caches; any other failure is returned.
    pub async fn identity(&self, force: bool) -> ClientResult<Option<Account>> {
        if !force {
            if let Some(account) = self.identity.read().await.as_ref() {
                return Ok(Some(account.clone()));
            }
        }

        match self.accounts.fetch_account().await {
            Ok(account) => {
                tracing::debug!(account_id = %account.id, "Identity loaded");
                *self.identity.write().await = Some(account.clone());
                self.auth_state.send_replace(Some(account.clone()));
                self.refresh_member_data().await;
                Ok(Some(account))
            }
            Err(err) if is_unauthenticated(&err) => {
                tracing::debug!("No authenticated session");
                self.clear().await;
                Ok(None)
            }
            Err(err) => {
                tracing::warn!(error = %err, "Failed to load identity");
                Err(err)
            }
        }
    }

    /// Current identity, or `Forbidden(NotAuthenticated)`
    pub async fn require_identity(&self) -> ClientResult<Account> {
        self.identity(false)
            .await?
            .ok_or(ClientError::Forbidden(AuthzError::NotAuthenticated))
    }

    /// Cached identity without a round trip
    pub async fn cached_identity(&self) -> Option<Account> {
        self.identity.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.identity.read().await.is_some()
    }

    /// Whether the cached identity holds any of `authorities`
    pub async fn has_any_authority(&self, authorities: &[Authority]) -> bool {
        self.identity
            .read()
            .await
            .as_ref()
            .is_some_and(|account| account.has_any_authority(authorities))
    }

    /// Organization of the cached identity
    pub async fn salesforce_id(&self) -> Option<String> {
        self.identity
            .read()
            .await
            .as_ref()
            .and_then(|account| account.salesforce_id.clone())
    }

    /// Display name of the cached identity
    pub async fn user_name(&self) -> Option<String> {
        self.identity.read().await.as_ref().map(Account::user_name)
    }

    /// Cached organization record of the logged-in user
    pub async fn current_member_data(&self) -> Option<MemberData> {
        self.member_data.read().await.clone()
    }

    /// Reloads the organization record
    ///
    /// Failures leave the cache empty; the flag published by
    /// [`fetching_member_data`](Self::fetching_member_data) is raised for
    /// the duration of the request.
    pub async fn refresh_member_data(&self) {
        self.fetching_member_data.send_replace(true);

        let data = match self.members.member_details().await {
            Ok(data) => Some(data),
            Err(err) => {
                tracing::warn!(error = %err, "Failed to load member data");
                None
            }
        };
        *self.member_data.write().await = data;

        self.fetching_member_data.send_replace(false);
    }

    /// Drops every cached value and publishes the logged-out state
    pub async fn clear(&self) {
        *self.identity.write().await = None;
        *self.member_data.write().await = None;
        self.auth_state.send_replace(None);
    }

    /// Stream of identity changes, starting with the current value
    pub fn authentication_state(&self) -> WatchStream<Option<Account>> {
        WatchStream::new(self.auth_state.subscribe())
    }

    /// Stream of the "fetching member data" flag
    pub fn fetching_member_data(&self) -> WatchStream<bool> {
        WatchStream::new(self.fetching_member_data.subscribe())
    }
}

fn is_unauthenticated(err: &ClientError) -> bool {
    matches!(
        err.status(),
        Some(StatusCode::UNAUTHORIZED) | Some(StatusCode::FORBIDDEN)
    )
}
