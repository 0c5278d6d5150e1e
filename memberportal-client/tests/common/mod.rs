//! Common test utilities for integration tests
//!
//! This module provides shared infrastructure for integration tests:
//! - Recording in-memory fakes of the service traits
//! - A recording `PortalUi`
//! - Session/account builders
//! - A `TestContext` wiring everything into a `PortalClient`

#![allow(dead_code)]

use async_trait::async_trait;
use memberportal_client::config::ClientConfig;
use memberportal_client::error::{ClientError, ClientResult, Problem};
use memberportal_client::http::PortalHttp;
use memberportal_client::services::{
    AccountApi, AffiliationService, MemberApi, MfaActivation, MfaSetup, ResetFinish, UserApi,
};
use memberportal_client::workflow::PortalUi;
use memberportal_client::PortalClient;
use memberportal_shared::alerts::AlertType;
use memberportal_shared::models::account::{Account, MemberData};
use memberportal_shared::models::member::Member;
use memberportal_shared::models::page::{Page, PageRequest};
use memberportal_shared::models::user::User;
use memberportal_shared::models::validation::ValidationResult;
use reqwest::StatusCode;
use std::sync::{Arc, Mutex};

/// Failure injected into a fake call
#[derive(Debug, Clone)]
pub struct Failure {
    pub status: StatusCode,
    pub problem_type: Option<String>,
}

impl Failure {
    pub fn status(status: StatusCode) -> Self {
        Self {
            status,
            problem_type: None,
        }
    }

    pub fn problem(status: StatusCode, problem_type: &str) -> Self {
        Self {
            status,
            problem_type: Some(problem_type.to_string()),
        }
    }

    fn to_error(&self) -> ClientError {
        ClientError::Status {
            status: self.status,
            problem: self.problem_type.as_ref().map(|t| Problem {
                problem_type: Some(t.clone()),
                title: Some("Injected failure".to_string()),
                ..Default::default()
            }),
        }
    }
}

fn fail_if(failure: &Mutex<Option<Failure>>) -> ClientResult<()> {
    match failure.lock().unwrap().as_ref() {
        Some(f) => Err(f.to_error()),
        None => Ok(()),
    }
}

/// Recording fake of [`UserApi`]
#[derive(Default)]
pub struct FakeUserApi {
    pub calls: Mutex<Vec<String>>,
    pub validation: Mutex<Option<ValidationResult>>,
    pub write_failure: Mutex<Option<Failure>>,
    pub validate_failure: Mutex<Option<Failure>>,
    pub activate_failure: Mutex<Option<Failure>>,
    pub owner: Mutex<bool>,
    pub written: Mutex<Vec<User>>,
}

impl FakeUserApi {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls().iter().filter(|c| c.as_str() == call).count()
    }

    pub fn writes(&self) -> usize {
        self.count("create") + self.count("update")
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }
}

#[async_trait]
impl UserApi for FakeUserApi {
    async fn find(&self, id: &str) -> ClientResult<User> {
        self.record(format!("find:{}", id));
        Ok(User {
            id: Some(id.to_string()),
            ..Default::default()
        })
    }

    async fn create(&self, user: &User) -> ClientResult<User> {
        self.record("create");
        fail_if(&self.write_failure)?;
        let mut created = user.clone();
        created.id = Some("new-id".to_string());
        self.written.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update(&self, user: &User) -> ClientResult<User> {
        self.record("update");
        fail_if(&self.write_failure)?;
        self.written.lock().unwrap().push(user.clone());
        Ok(user.clone())
    }

    async fn validate(&self, _user: &User) -> ClientResult<ValidationResult> {
        self.record("validate");
        fail_if(&self.validate_failure)?;
        Ok(self
            .validation
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(ValidationResult::ok))
    }

    async fn has_owner(&self, salesforce_id: &str) -> ClientResult<bool> {
        self.record(format!("has_owner:{}", salesforce_id));
        Ok(*self.owner.lock().unwrap())
    }

    async fn send_activate(&self, _user: &User) -> ClientResult<()> {
        self.record("send_activate");
        fail_if(&self.activate_failure)
    }

    async fn query(&self, _req: &PageRequest) -> ClientResult<Page<User>> {
        self.record("query");
        Ok(Page::new(Vec::new(), 0))
    }

    async fn delete(&self, id: &str) -> ClientResult<()> {
        self.record(format!("delete:{}", id));
        Ok(())
    }
}

/// Recording fake of [`MemberApi`]
#[derive(Default)]
pub struct FakeMemberApi {
    pub calls: Mutex<Vec<String>>,
    pub members: Mutex<Vec<Member>>,
    pub member_data: Mutex<MemberData>,
    pub validation: Mutex<Option<ValidationResult>>,
    pub write_failure: Mutex<Option<Failure>>,
}

impl FakeMemberApi {
    pub fn with_members(members: Vec<Member>) -> Self {
        Self {
            members: Mutex::new(members),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls().iter().filter(|c| c.as_str() == call).count()
    }

    fn record(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_string());
    }
}

#[async_trait]
impl MemberApi for FakeMemberApi {
    async fn find(&self, id: &str) -> ClientResult<Member> {
        self.record("find");
        Ok(Member {
            id: Some(id.to_string()),
            ..Default::default()
        })
    }

    async fn create(&self, member: &Member) -> ClientResult<Member> {
        self.record("create");
        fail_if(&self.write_failure)?;
        let mut created = member.clone();
        created.id = Some("m-new".to_string());
        Ok(created)
    }

    async fn update(&self, member: &Member) -> ClientResult<Member> {
        self.record("update");
        fail_if(&self.write_failure)?;
        Ok(member.clone())
    }

    async fn validate(&self, _member: &Member) -> ClientResult<ValidationResult> {
        self.record("validate");
        Ok(self
            .validation
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(ValidationResult::ok))
    }

    async fn all_members(&self) -> ClientResult<Vec<Member>> {
        self.record("all_members");
        Ok(self.members.lock().unwrap().clone())
    }

    async fn query(&self, _req: &PageRequest) -> ClientResult<Page<Member>> {
        self.record("query");
        let members = self.members.lock().unwrap().clone();
        let total = members.len() as u64;
        Ok(Page::new(members, total))
    }

    async fn member_details(&self) -> ClientResult<MemberData> {
        self.record("member_details");
        Ok(self.member_data.lock().unwrap().clone())
    }
}

/// Recording fake of [`AccountApi`]
#[derive(Default)]
pub struct FakeAccountApi {
    pub calls: Mutex<Vec<String>>,

    /// `None` answers 401
    pub account: Mutex<Option<Account>>,

    /// Account returned by fetches after a successful save
    pub account_after_save: Mutex<Option<Account>>,

    pub save_failure: Mutex<Option<Failure>>,
    pub enable_failure: Mutex<Option<Failure>>,
    pub reset_init_failure: Mutex<Option<Failure>>,
    pub reset_finish_failure: Mutex<Option<Failure>>,
    pub activations: Mutex<Vec<MfaActivation>>,
    pub reset_emails: Mutex<Vec<String>>,
    pub reset_finishes: Mutex<Vec<ResetFinish>>,
}

impl FakeAccountApi {
    pub fn with_account(account: Account) -> Self {
        Self {
            account: Mutex::new(Some(account)),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls().iter().filter(|c| c.as_str() == call).count()
    }

    fn record(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_string());
    }
}

#[async_trait]
impl AccountApi for FakeAccountApi {
    async fn fetch_account(&self) -> ClientResult<Account> {
        self.record("fetch_account");
        self.account.lock().unwrap().clone().ok_or(ClientError::Status {
            status: StatusCode::UNAUTHORIZED,
            problem: None,
        })
    }

    async fn save_account(&self, _account: &Account) -> ClientResult<()> {
        self.record("save_account");
        fail_if(&self.save_failure)?;
        if let Some(next) = self.account_after_save.lock().unwrap().take() {
            *self.account.lock().unwrap() = Some(next);
        }
        Ok(())
    }

    async fn mfa_setup(&self) -> ClientResult<MfaSetup> {
        self.record("mfa_setup");
        Ok(MfaSetup {
            secret: "JBSWY3DPEHPK3PXP".to_string(),
            otp: Some("otpauth://totp/portal?secret=JBSWY3DPEHPK3PXP".to_string()),
            qr_code: serde_json::json!("qr"),
        })
    }

    async fn enable_mfa(&self, activation: &MfaActivation) -> ClientResult<Vec<String>> {
        self.record("enable_mfa");
        fail_if(&self.enable_failure)?;
        self.activations.lock().unwrap().push(activation.clone());
        Ok(vec!["code-1".to_string(), "code-2".to_string()])
    }

    async fn disable_mfa(&self) -> ClientResult<()> {
        self.record("disable_mfa");
        Ok(())
    }

    async fn init_password_reset(&self, email: &str) -> ClientResult<()> {
        self.record("init_password_reset");
        self.reset_emails.lock().unwrap().push(email.to_string());
        fail_if(&self.reset_init_failure)
    }

    async fn finish_password_reset(&self, finish: &ResetFinish) -> ClientResult<()> {
        self.record("finish_password_reset");
        self.reset_finishes.lock().unwrap().push(finish.clone());
        fail_if(&self.reset_finish_failure)
    }
}

/// UI side effect recorded by [`RecordingUi`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEffect {
    PreviousState,
    Reload,
    Alert(AlertType),
    LanguageChanged(String),
}

/// Recording [`PortalUi`]
#[derive(Default)]
pub struct RecordingUi {
    pub effects: Mutex<Vec<UiEffect>>,
}

impl RecordingUi {
    pub fn effects(&self) -> Vec<UiEffect> {
        self.effects.lock().unwrap().clone()
    }

    pub fn navigated_back(&self) -> bool {
        self.effects().contains(&UiEffect::PreviousState)
    }

    pub fn reloaded(&self) -> bool {
        self.effects().contains(&UiEffect::Reload)
    }

    pub fn alerts(&self) -> Vec<AlertType> {
        self.effects()
            .into_iter()
            .filter_map(|e| match e {
                UiEffect::Alert(alert) => Some(alert),
                _ => None,
            })
            .collect()
    }
}

impl PortalUi for RecordingUi {
    fn previous_state(&self) {
        self.effects.lock().unwrap().push(UiEffect::PreviousState);
    }

    fn reload(&self) {
        self.effects.lock().unwrap().push(UiEffect::Reload);
    }

    fn alert(&self, alert: AlertType) {
        self.effects.lock().unwrap().push(UiEffect::Alert(alert));
    }

    fn language_changed(&self, lang_key: &str) {
        self.effects
            .lock()
            .unwrap()
            .push(UiEffect::LanguageChanged(lang_key.to_string()));
    }
}

/// Session account with the given authorities
pub fn account(id: &str, authorities: &[&str], main_contact: bool, salesforce_id: &str) -> Account {
    Account {
        id: id.to_string(),
        login: Some(format!("{}@example.org", id)),
        email: Some(format!("{}@example.org", id)),
        first_name: Some("Session".to_string()),
        last_name: Some("User".to_string()),
        activated: true,
        authorities: authorities.iter().map(|a| a.to_string()).collect(),
        lang_key: Some("en".to_string()),
        salesforce_id: Some(salesforce_id.to_string()),
        main_contact,
        ..Default::default()
    }
}

pub fn member(salesforce_id: &str, superadmin_enabled: bool) -> Member {
    Member {
        id: Some(format!("m-{}", salesforce_id)),
        salesforce_id: salesforce_id.to_string(),
        client_name: Some(format!("Org {}", salesforce_id)),
        superadmin_enabled,
        ..Default::default()
    }
}

/// Stored user of organization `001`
pub fn stored_user(id: &str, main_contact: bool) -> User {
    User {
        id: Some(id.to_string()),
        login: format!("{}@example.org", id),
        first_name: Some("Jane".to_string()),
        last_name: Some("Doe".to_string()),
        main_contact,
        salesforce_id: Some("001".to_string()),
        activated: true,
        ..Default::default()
    }
}

/// Fakes wired into a [`PortalClient`]
pub struct TestContext {
    pub users: Arc<FakeUserApi>,
    pub members: Arc<FakeMemberApi>,
    pub accounts: Arc<FakeAccountApi>,
    pub ui: Arc<RecordingUi>,
    pub client: PortalClient,
}

impl TestContext {
    /// Session `session`, members `001` (no superadmins) and `002` (superadmins)
    pub fn new(session: Account) -> Self {
        Self::with_members(session, vec![member("001", false), member("002", true)])
    }

    pub fn with_members(session: Account, members: Vec<Member>) -> Self {
        let users = Arc::new(FakeUserApi::default());
        let members = Arc::new(FakeMemberApi::with_members(members));
        let accounts = Arc::new(FakeAccountApi::with_account(session));
        let ui = Arc::new(RecordingUi::default());

        let http = PortalHttp::new(ClientConfig::for_base_url("http://127.0.0.1:9"))
            .expect("static test config is valid");
        let client = PortalClient::from_parts(
            users.clone(),
            members.clone(),
            accounts.clone(),
            AffiliationService::new(http),
        );

        Self {
            users,
            members,
            accounts,
            ui,
            client,
        }
    }

    pub fn ui(&self) -> Arc<dyn PortalUi> {
        self.ui.clone()
    }
}

/// Initialises test logging once; honours `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
