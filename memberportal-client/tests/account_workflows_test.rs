/// Integration tests for the account-side workflows
///
/// Covers the settings page (profile and MFA), both password reset steps,
/// the member editor and the session cache.

mod common;

use common::{account, Failure, TestContext, UiEffect};
use memberportal_client::error::ClientError;
use memberportal_shared::alerts::{AlertType, EventType, EMAIL_NOT_FOUND_TYPE};
use memberportal_shared::auth::authority::Authority;
use memberportal_shared::auth::authorization::AuthzError;
use memberportal_shared::models::account::{Account, MemberData};
use memberportal_shared::models::member::Member;
use memberportal_shared::models::validation::ValidationResult;
use reqwest::StatusCode;
use tokio_stream::StreamExt;

fn mfa_account(enabled: bool) -> Account {
    let mut session = account("me", &["ROLE_USER"], false, "001");
    session.mfa_enabled = enabled;
    session
}

#[tokio::test]
async fn test_settings_fetches_mfa_setup_when_disabled() {
    let ctx = TestContext::new(mfa_account(false));
    let mut settings = ctx.client.settings(ctx.ui());

    settings.init().await.unwrap();

    assert_eq!(ctx.accounts.count("mfa_setup"), 1);
    assert!(settings.mfa_setup.is_some());
    assert_eq!(settings.settings_form.email, "me@example.org");
    assert!(!settings.show_mfa_setup);
    assert!(!settings.show_mfa_backup_codes);
}

#[tokio::test]
async fn test_settings_skips_mfa_setup_when_enabled() {
    let ctx = TestContext::new(mfa_account(true));
    let mut settings = ctx.client.settings(ctx.ui());

    settings.init().await.unwrap();

    assert_eq!(ctx.accounts.count("mfa_setup"), 0);
    assert!(settings.mfa_form.mfa_enabled);
}

#[tokio::test]
async fn test_mfa_state_change_toggles_setup() {
    let ctx = TestContext::new(mfa_account(false));
    let mut settings = ctx.client.settings(ctx.ui());
    settings.init().await.unwrap();

    settings.mfa_form.mfa_enabled = true;
    settings.mfa_enabled_state_change();
    assert!(settings.show_mfa_setup);
    assert!(!settings.show_mfa_backup_codes);

    settings.mfa_form.mfa_enabled = false;
    settings.mfa_enabled_state_change();
    assert!(!settings.show_mfa_setup);
}

#[tokio::test]
async fn test_toggle_mfa_text_code() {
    let ctx = TestContext::new(mfa_account(true));
    let mut settings = ctx.client.settings(ctx.ui());

    assert!(!settings.show_mfa_text_code);
    settings.toggle_mfa_text_code();
    assert!(settings.show_mfa_text_code);
    settings.toggle_mfa_text_code();
    assert!(!settings.show_mfa_text_code);
}

#[tokio::test]
async fn test_save_mfa_enable_calls_enable_only() {
    let ctx = TestContext::new(mfa_account(false));
    let mut settings = ctx.client.settings(ctx.ui());
    settings.init().await.unwrap();

    settings.mfa_form.mfa_enabled = true;
    settings.mfa_form.verification_code = " 123456 ".to_string();
    settings.save_mfa().await.unwrap();

    assert_eq!(ctx.accounts.count("enable_mfa"), 1);
    assert_eq!(ctx.accounts.count("disable_mfa"), 0);
    assert!(settings.show_mfa_backup_codes);
    assert_eq!(settings.mfa_backup_codes, vec!["code-1", "code-2"]);

    let activations = ctx.accounts.activations.lock().unwrap().clone();
    assert_eq!(activations[0].secret, "JBSWY3DPEHPK3PXP");
    assert_eq!(activations[0].verification_code, "123456");
}

#[tokio::test]
async fn test_save_mfa_disable_calls_disable_only() {
    let ctx = TestContext::new(mfa_account(true));
    let mut settings = ctx.client.settings(ctx.ui());
    settings.init().await.unwrap();

    settings.mfa_form.mfa_enabled = false;
    settings.mfa_form.verification_code = "test".to_string();
    settings.save_mfa().await.unwrap();

    assert_eq!(ctx.accounts.count("disable_mfa"), 1);
    assert_eq!(ctx.accounts.count("enable_mfa"), 0);
}

#[tokio::test]
async fn test_rejected_verification_code() {
    let ctx = TestContext::new(mfa_account(false));
    *ctx.accounts.enable_failure.lock().unwrap() = Some(Failure::status(StatusCode::BAD_REQUEST));

    let mut settings = ctx.client.settings(ctx.ui());
    settings.init().await.unwrap();
    settings.mfa_form.mfa_enabled = true;
    settings.mfa_form.verification_code = "000000".to_string();

    assert!(settings.save_mfa().await.is_err());
    assert!(settings.mfa_setup_failure);
    assert!(!settings.show_mfa_backup_codes);
}

#[tokio::test]
async fn test_save_settings_success_refetches_identity() {
    let ctx = TestContext::new(mfa_account(true));
    let mut settings = ctx.client.settings(ctx.ui());
    settings.init().await.unwrap();
    let fetches_before = ctx.accounts.count("fetch_account");

    let mut changed = mfa_account(true);
    changed.lang_key = Some("fr".to_string());
    *ctx.accounts.account_after_save.lock().unwrap() = Some(changed);

    assert!(!settings.success);
    settings.settings_form.lang_key = "fr".to_string();
    settings.save().await.unwrap();

    assert!(settings.success);
    assert_eq!(ctx.accounts.count("save_account"), 1);
    assert_eq!(ctx.accounts.count("fetch_account"), fetches_before + 1);
    assert_eq!(
        ctx.ui.effects(),
        vec![UiEffect::LanguageChanged("fr".to_string())]
    );
}

#[tokio::test]
async fn test_save_settings_failure_requests_nothing_else() {
    let ctx = TestContext::new(mfa_account(true));
    *ctx.accounts.save_failure.lock().unwrap() = Some(Failure::status(StatusCode::INTERNAL_SERVER_ERROR));

    let mut settings = ctx.client.settings(ctx.ui());
    settings.init().await.unwrap();
    let fetches_before = ctx.accounts.count("fetch_account");

    assert!(settings.save().await.is_err());
    assert!(!settings.success);
    assert!(settings.save_error.is_some());
    assert_eq!(ctx.accounts.count("save_account"), 1);
    assert_eq!(ctx.accounts.count("fetch_account"), fetches_before);
    assert!(ctx.ui.effects().is_empty());
}

#[tokio::test]
async fn test_request_reset_success() {
    let ctx = TestContext::new(mfa_account(false));
    let mut reset = ctx.client.password_reset_init();

    reset.form.email = "jane@example.org".to_string();
    reset.request_reset().await.unwrap();

    assert!(reset.success);
    assert!(!reset.error);
    assert_eq!(
        ctx.accounts.reset_emails.lock().unwrap().clone(),
        vec!["jane@example.org".to_string()]
    );
}

#[tokio::test]
async fn test_request_reset_unknown_email() {
    let ctx = TestContext::new(mfa_account(false));
    *ctx.accounts.reset_init_failure.lock().unwrap() =
        Some(Failure::problem(StatusCode::BAD_REQUEST, EMAIL_NOT_FOUND_TYPE));

    let mut reset = ctx.client.password_reset_init();
    reset.form.email = "nobody@example.org".to_string();

    assert!(reset.request_reset().await.is_err());
    assert!(reset.error_email_not_exists);
    assert!(!reset.error);
    assert!(!reset.success);
}

#[tokio::test]
async fn test_request_reset_other_failure() {
    let ctx = TestContext::new(mfa_account(false));
    *ctx.accounts.reset_init_failure.lock().unwrap() = Some(Failure::status(StatusCode::BAD_REQUEST));

    let mut reset = ctx.client.password_reset_init();
    reset.form.email = "jane@example.org".to_string();

    assert!(reset.request_reset().await.is_err());
    assert!(reset.error);
    assert!(!reset.error_email_not_exists);
}

#[tokio::test]
async fn test_request_reset_rejects_short_email() {
    let ctx = TestContext::new(mfa_account(false));
    let mut reset = ctx.client.password_reset_init();

    reset.form.email = "a@b".to_string();
    assert!(matches!(
        reset.request_reset().await,
        Err(ClientError::InvalidForm(_))
    ));
    assert_eq!(ctx.accounts.count("init_password_reset"), 0);
}

#[tokio::test]
async fn test_finish_reset_mismatch_sends_nothing() {
    let ctx = TestContext::new(mfa_account(false));
    let mut finish = ctx.client.password_reset_finish(Some("reset-key".to_string()));

    finish.form.new_password = "first-password".to_string();
    finish.form.confirm_password = "second-password".to_string();

    assert!(finish.finish_reset().await.is_err());
    assert!(finish.do_not_match);
    assert_eq!(ctx.accounts.count("finish_password_reset"), 0);
}

#[tokio::test]
async fn test_finish_reset_success_and_failure() {
    let ctx = TestContext::new(mfa_account(false));
    let mut finish = ctx.client.password_reset_finish(Some("reset-key".to_string()));

    finish.form.new_password = "new-password".to_string();
    finish.form.confirm_password = "new-password".to_string();
    finish.finish_reset().await.unwrap();
    assert!(finish.success);
    assert!(!finish.do_not_match);
    assert_eq!(ctx.accounts.reset_finishes.lock().unwrap()[0].key, "reset-key");

    *ctx.accounts.reset_finish_failure.lock().unwrap() = Some(Failure::status(StatusCode::BAD_REQUEST));
    assert!(finish.finish_reset().await.is_err());
    assert!(finish.error);
    assert!(!finish.success);
}

#[tokio::test]
async fn test_finish_reset_without_key() {
    let ctx = TestContext::new(mfa_account(false));
    let mut finish = ctx.client.password_reset_finish(None);
    assert!(finish.key_missing());

    finish.form.new_password = "new-password".to_string();
    finish.form.confirm_password = "new-password".to_string();
    assert!(finish.finish_reset().await.is_err());
    assert_eq!(ctx.accounts.count("finish_password_reset"), 0);
}

#[tokio::test]
async fn test_member_editor_requires_admin() {
    let ctx = TestContext::new(account("me", &["ROLE_USER", "ROLE_ORG_OWNER"], true, "001"));
    let mut editor = ctx.client.member_update(ctx.ui());

    let err = editor.init(None).await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::Forbidden(AuthzError::InsufficientAuthority { .. })
    ));
}

#[tokio::test]
async fn test_member_editor_creates_and_broadcasts() {
    let ctx = TestContext::new(account("root", &["ROLE_ADMIN"], false, "000"));
    let mut events = ctx.client.events().subscribe();
    let mut editor = ctx.client.member_update(ctx.ui());
    editor.init(None).await.unwrap();

    editor.form.salesforce_id = "003".to_string();
    editor.form.client_name = "New Org".to_string();
    let saved = editor.save().await.unwrap().unwrap();

    assert_eq!(saved.id.as_deref(), Some("m-new"));
    assert_eq!(ctx.members.count("validate"), 1);
    assert_eq!(ctx.members.count("create"), 1);
    assert_eq!(
        ctx.ui.effects(),
        vec![
            UiEffect::PreviousState,
            UiEffect::Alert(AlertType::MemberCreated)
        ]
    );

    let event = events.recv().await.unwrap();
    assert_eq!(event.kind, EventType::MemberListModification);
}

#[tokio::test]
async fn test_member_editor_updates_existing() {
    let ctx = TestContext::new(account("root", &["ROLE_ADMIN"], false, "000"));
    let mut editor = ctx.client.member_update(ctx.ui());

    let existing = Member {
        id: Some("m1".to_string()),
        salesforce_id: "001".to_string(),
        client_name: Some("Org 001".to_string()),
        ..Default::default()
    };
    editor.init(Some(&existing)).await.unwrap();
    editor.form.superadmin_enabled = true;
    editor.save().await.unwrap();

    assert_eq!(ctx.members.count("update"), 1);
    assert_eq!(ctx.ui.alerts(), vec![AlertType::MemberUpdated]);
}

#[tokio::test]
async fn test_member_editor_invalid_blocks_write() {
    let ctx = TestContext::new(account("root", &["ROLE_ADMIN"], false, "000"));
    *ctx.members.validation.lock().unwrap() =
        Some(ValidationResult::invalid(["salesforceId.alreadyInUse"]));

    let mut editor = ctx.client.member_update(ctx.ui());
    editor.init(None).await.unwrap();
    editor.form.salesforce_id = "001".to_string();
    editor.form.client_name = "Duplicate".to_string();

    assert!(editor.save().await.unwrap().is_none());
    assert_eq!(ctx.members.count("create"), 0);
    assert!(editor.validation.is_some());
    assert!(ctx.ui.effects().is_empty());
}

#[tokio::test]
async fn test_session_caches_identity() {
    let ctx = TestContext::new(account("me", &["ROLE_USER", "ROLE_CONSORTIUM_LEAD"], false, "001"));
    *ctx.members.member_data.lock().unwrap() = MemberData {
        id: Some("001".to_string()),
        name: Some("Org 001".to_string()),
        is_consortium_lead: true,
        ..Default::default()
    };
    let session = ctx.client.session();

    session.identity(false).await.unwrap();
    session.identity(false).await.unwrap();
    assert_eq!(ctx.accounts.count("fetch_account"), 1);

    session.identity(true).await.unwrap();
    assert_eq!(ctx.accounts.count("fetch_account"), 2);

    assert!(session.has_any_authority(&[Authority::ConsortiumLead]).await);
    assert!(!session.has_any_authority(&[Authority::Admin]).await);
    assert_eq!(session.salesforce_id().await.as_deref(), Some("001"));
    assert!(session
        .current_member_data()
        .await
        .is_some_and(|data| data.is_consortium_lead));
}

#[tokio::test]
async fn test_session_unauthenticated() {
    let ctx = TestContext::new(account("me", &["ROLE_USER"], false, "001"));
    *ctx.accounts.account.lock().unwrap() = None;
    let session = ctx.client.session();

    assert_eq!(session.identity(false).await.unwrap(), None);
    assert!(!session.is_authenticated().await);
    assert!(matches!(
        session.require_identity().await,
        Err(ClientError::Forbidden(AuthzError::NotAuthenticated))
    ));
}

#[tokio::test]
async fn test_authentication_state_stream() {
    let ctx = TestContext::new(account("me", &["ROLE_USER"], false, "001"));
    let session = ctx.client.session();
    let mut states = session.authentication_state();

    assert_eq!(states.next().await, Some(None));

    session.identity(false).await.unwrap();
    let state = states.next().await.unwrap();
    assert_eq!(state.map(|a| a.id), Some("me".to_string()));

    session.clear().await;
    assert_eq!(states.next().await, Some(None));
}

#[tokio::test]
async fn test_managed_member_stream() {
    let ctx = TestContext::new(account("root", &["ROLE_ADMIN"], false, "000"));
    let members = ctx.client.members();
    let mut managed = members.managed_member();

    assert_eq!(managed.next().await, Some(None));
    members.set_managed_member(Some("001".to_string()));
    assert_eq!(managed.next().await, Some(Some("001".to_string())));
    assert_eq!(members.current_managed_member().as_deref(), Some("001"));
}
