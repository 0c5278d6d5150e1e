/// User service
///
/// Covers the `users` resource of the user service: CRUD, server-side
/// validation, the organization-owner lookup, activation e-mails and the
/// paged listing.
///
/// # Example
///
/// ```no_run
/// use memberportal_client::config::ClientConfig;
/// use memberportal_client::http::PortalHttp;
/// use memberportal_client::services::{HttpUserApi, UserApi};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let http = PortalHttp::new(ClientConfig::from_env()?)?;
/// let users = HttpUserApi::new(http);
///
/// if users.has_owner("001").await? {
///     println!("Organization already has a main contact");
/// }
/// # Ok(())
/// # }
/// ```

use async_trait::async_trait;
use memberportal_shared::models::page::{Page, PageRequest};
use memberportal_shared::models::user::User;
use memberportal_shared::models::validation::ValidationResult;

use crate::error::ClientResult;
use crate::http::PortalHttp;

/// Operations on portal users
#[async_trait]
pub trait UserApi: Send + Sync {
    /// Loads a user by id
    async fn find(&self, id: &str) -> ClientResult<User>;

    /// Creates a user; the server sends the invitation e-mail
    async fn create(&self, user: &User) -> ClientResult<User>;

    /// Updates an existing user
    async fn update(&self, user: &User) -> ClientResult<User>;

    /// Server-side validation of a user about to be written
    async fn validate(&self, user: &User) -> ClientResult<ValidationResult>;

    /// Whether the organization already has a main contact
    async fn has_owner(&self, salesforce_id: &str) -> ClientResult<bool>;

    /// Re-sends the activation e-mail
    async fn send_activate(&self, user: &User) -> ClientResult<()>;

    /// Paged listing
    async fn query(&self, req: &PageRequest) -> ClientResult<Page<User>>;

    async fn delete(&self, id: &str) -> ClientResult<()>;
}

/// [`UserApi`] over HTTP
#[derive(Clone)]
pub struct HttpUserApi {
    http: PortalHttp,
}

impl HttpUserApi {
    pub fn new(http: PortalHttp) -> Self {
        Self { http }
    }

    fn url(&self, resource: &str) -> String {
        self.http.config().user_service_url(resource)
    }
}

#[async_trait]
impl UserApi for HttpUserApi {
    async fn find(&self, id: &str) -> ClientResult<User> {
        self.http.get_json(&self.url(&format!("users/{}", id))).await
    }

    async fn create(&self, user: &User) -> ClientResult<User> {
        let created: User = self.http.post_json(&self.url("users"), user).await?;
        tracing::info!(login = %created.login, "User created");
        Ok(created)
    }

    async fn update(&self, user: &User) -> ClientResult<User> {
        let updated: User = self.http.put_json(&self.url("users"), user).await?;
        tracing::info!(login = %updated.login, "User updated");
        Ok(updated)
    }

    async fn validate(&self, user: &User) -> ClientResult<ValidationResult> {
        self.http.post_json(&self.url("users/validate"), user).await
    }

    async fn has_owner(&self, salesforce_id: &str) -> ClientResult<bool> {
        self.http
            .get_json(&self.url(&format!("users/{}/owner", salesforce_id)))
            .await
    }

    async fn send_activate(&self, user: &User) -> ClientResult<()> {
        let id = user.id.as_deref().unwrap_or(user.login.as_str());
        self.http
            .post_no_content(&self.url(&format!("users/{}/sendActivate", id)), user)
            .await?;
        tracing::info!(login = %user.login, "Activation e-mail re-sent");
        Ok(())
    }

    async fn query(&self, req: &PageRequest) -> ClientResult<Page<User>> {
        self.http.get_page(&self.url("users"), req).await
    }

    async fn delete(&self, id: &str) -> ClientResult<()> {
        self.http.delete(&self.url(&format!("users/{}", id))).await?;
        tracing::info!(user_id = %id, "User deleted");
        Ok(())
    }
}
