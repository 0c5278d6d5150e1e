/// Affiliation service
///
/// Affiliations (assertions) are stored by the assertion service. GRID
/// identifiers are normalised before every write.

use memberportal_shared::models::affiliation::Affiliation;
use memberportal_shared::models::page::{Page, PageRequest};

use crate::error::ClientResult;
use crate::http::PortalHttp;

/// Affiliation resource of the assertion service
#[derive(Clone)]
pub struct AffiliationService {
    http: PortalHttp,
}

impl AffiliationService {
    pub fn new(http: PortalHttp) -> Self {
        Self { http }
    }

    fn url(&self, resource: &str) -> String {
        self.http.config().assertion_service_url(resource)
    }

    pub async fn find(&self, id: &str) -> ClientResult<Affiliation> {
        self.http.get_json(&self.url(&format!("assertion/{}", id))).await
    }

    pub async fn create(&self, affiliation: &Affiliation) -> ClientResult<Affiliation> {
        let mut body = affiliation.clone();
        body.normalize_org_id();
        let created: Affiliation = self.http.post_json(&self.url("assertion"), &body).await?;
        tracing::info!(email = %created.email, "Affiliation created");
        Ok(created)
    }

    pub async fn update(&self, affiliation: &Affiliation) -> ClientResult<Affiliation> {
        let mut body = affiliation.clone();
        body.normalize_org_id();
        let updated: Affiliation = self.http.put_json(&self.url("assertion"), &body).await?;
        tracing::info!(affiliation_id = ?updated.id, "Affiliation updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> ClientResult<()> {
        self.http.delete(&self.url(&format!("assertion/{}", id))).await?;
        tracing::info!(affiliation_id = %id, "Affiliation deleted");
        Ok(())
    }

    /// Paged listing; the total comes from `X-Total-Count`
    pub async fn query(&self, req: &PageRequest) -> ClientResult<Page<Affiliation>> {
        self.http.get_page(&self.url("assertions"), req).await
    }
}
