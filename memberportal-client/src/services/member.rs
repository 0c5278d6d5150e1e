/// Member service
///
/// Member organizations live in the member service. [`MemberApi`] is the
/// raw resource; [`MemberService`] adds the "managed member" an admin can
/// switch into, published on a watch channel so that views follow it.

use async_trait::async_trait;
use memberportal_shared::models::account::MemberData;
use memberportal_shared::models::member::Member;
use memberportal_shared::models::page::{Page, PageRequest};
use memberportal_shared::models::validation::ValidationResult;
use std::sync::Arc;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use crate::error::ClientResult;
use crate::http::PortalHttp;

/// Operations on member organizations
#[async_trait]
pub trait MemberApi: Send + Sync {
    async fn find(&self, id: &str) -> ClientResult<Member>;

    async fn create(&self, member: &Member) -> ClientResult<Member>;

    async fn update(&self, member: &Member) -> ClientResult<Member>;

    /// Server-side validation of a member about to be written
    async fn validate(&self, member: &Member) -> ClientResult<ValidationResult>;

    /// Every member, unpaged (organization selectors)
    async fn all_members(&self) -> ClientResult<Vec<Member>>;

    /// Paged listing
    async fn query(&self, req: &PageRequest) -> ClientResult<Page<Member>>;

    /// Organization details of the logged-in user
    async fn member_details(&self) -> ClientResult<MemberData>;
}

/// [`MemberApi`] over HTTP
#[derive(Clone)]
pub struct HttpMemberApi {
    http: PortalHttp,
}

impl HttpMemberApi {
    pub fn new(http: PortalHttp) -> Self {
        Self { http }
    }

    fn url(&self, resource: &str) -> String {
        self.http.config().member_service_url(resource)
    }
}

#[async_trait]
impl MemberApi for HttpMemberApi {
    async fn find(&self, id: &str) -> ClientResult<Member> {
        self.http.get_json(&self.url(&format!("members/{}", id))).await
    }

    async fn create(&self, member: &Member) -> ClientResult<Member> {
        let created: Member = self.http.post_json(&self.url("members"), member).await?;
        tracing::info!(salesforce_id = %created.salesforce_id, "Member created");
        Ok(created)
    }

    async fn update(&self, member: &Member) -> ClientResult<Member> {
        let updated: Member = self.http.put_json(&self.url("members"), member).await?;
        tracing::info!(salesforce_id = %updated.salesforce_id, "Member updated");
        Ok(updated)
    }

    async fn validate(&self, member: &Member) -> ClientResult<ValidationResult> {
        self.http.post_json(&self.url("members/validate"), member).await
    }

    async fn all_members(&self) -> ClientResult<Vec<Member>> {
        self.http.get_json(&self.url("members/list/all")).await
    }

    async fn query(&self, req: &PageRequest) -> ClientResult<Page<Member>> {
        self.http.get_page(&self.url("members"), req).await
    }

    async fn member_details(&self) -> ClientResult<MemberData> {
        self.http.get_json(&self.url("member-details")).await
    }
}

/// Member resource plus the managed-member selection
#[derive(Clone)]
pub struct MemberService {
    api: Arc<dyn MemberApi>,
    managed: Arc<watch::Sender<Option<String>>>,
}

impl MemberService {
    pub fn new(api: Arc<dyn MemberApi>) -> Self {
        let (managed, _) = watch::channel(None);
        Self {
            api,
            managed: Arc::new(managed),
        }
    }

    /// Underlying resource
    pub fn api(&self) -> &Arc<dyn MemberApi> {
        &self.api
    }

    /// Switches the managed member (`None` stops managing)
    pub fn set_managed_member(&self, salesforce_id: Option<String>) {
        tracing::debug!(salesforce_id = ?salesforce_id, "Managed member changed");
        self.managed.send_replace(salesforce_id);
    }

    /// Salesforce id currently managed, if any
    pub fn current_managed_member(&self) -> Option<String> {
        self.managed.borrow().clone()
    }

    /// Stream of managed-member changes, starting with the current value
    pub fn managed_member(&self) -> WatchStream<Option<String>> {
        WatchStream::new(self.managed.subscribe())
    }

    /// Loads every member and sorts them by client name for selectors
    pub async fn members_for_selection(&self) -> ClientResult<Vec<Member>> {
        let mut members = self.api.all_members().await?;
        members.sort_by(|a, b| {
            a.client_name
                .as_deref()
                .unwrap_or_default()
                .to_lowercase()
                .cmp(&b.client_name.as_deref().unwrap_or_default().to_lowercase())
        });
        Ok(members)
    }
}
