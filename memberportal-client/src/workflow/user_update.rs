/// User create/edit workflow
///
/// Holds the user form and executes the save workflow:
///
/// ```text
/// save()
///   ├─> client-side constraints (login, names, organization)
///   ├─> POST users/validate
///   │     └─> valid=false: store result, no write
///   ├─> decide_save_action(session, user)
///   │     ├─> Create / Update                 -> write, navigate back
///   │     └─> ...WithOwnershipChange          -> write, reload application
///   └─> write failure: clear is_saving, store message, return error
/// ```
///
/// Changing the selected organization recomputes whether the
/// "organization admin" checkbox is offered and always resets the admin
/// flag to false.

use memberportal_shared::alerts::AlertType;
use memberportal_shared::auth::authorization::{
    can_grant_org_admin, decide_save_action, org_selection_locked, SaveAction,
};
use memberportal_shared::dates::{format_form_datetime, parse_form_datetime};
use memberportal_shared::models::account::Account;
use memberportal_shared::models::member::Member;
use memberportal_shared::models::user::User;
use memberportal_shared::models::validation::ValidationResult;
use memberportal_shared::validation::email_validator;
use std::sync::Arc;
use validator::Validate;

use crate::error::{ClientError, ClientResult, FieldError};
use crate::services::{MemberService, UserApi};
use crate::session::SessionService;
use crate::workflow::PortalUi;

/// Form fields of the user editor
///
/// Dates are kept in the form date-time format (`YYYY-MM-DDTHH:mm`).
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct UserForm {
    pub id: Option<String>,

    #[validate(
        length(min = 1, max = 50),
        email(message = "This field is invalid"),
        custom(function = "email_validator")
    )]
    pub login: String,

    #[validate(length(min = 1, message = "This field is required."))]
    pub first_name: String,

    #[validate(length(min = 1, message = "This field is required."))]
    pub last_name: String,

    pub main_contact: bool,

    #[validate(length(min = 1, message = "This field is required."))]
    pub salesforce_id: String,

    pub activated: bool,

    /// `None` when the checkbox was never rendered
    pub is_admin: Option<bool>,

    pub created_by: Option<String>,
    pub created_date: Option<String>,
    pub last_modified_by: Option<String>,
    pub last_modified_date: Option<String>,
}

/// Result of a completed [`UserUpdate::save`]
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    /// The write went through
    Saved { action: SaveAction, user: User },

    /// Server-side validation refused the user; nothing was written
    Rejected(ValidationResult),
}

/// User editor state and workflow
pub struct UserUpdate {
    users: Arc<dyn UserApi>,
    members: MemberService,
    session: SessionService,
    ui: Arc<dyn PortalUi>,
    current_account: Option<Account>,

    pub form: UserForm,

    /// Whole form disabled until the member list arrives
    pub form_enabled: bool,
    pub main_contact_disabled: bool,
    pub salesforce_id_disabled: bool,

    pub is_saving: bool,

    /// Edited user already belongs to an organization
    pub is_existent_member: bool,

    /// User loaded into the form, if editing
    pub existent_user: Option<User>,

    pub show_is_admin_checkbox: bool,

    /// Last server-side validation that refused the user
    pub validation: Option<ValidationResult>,

    pub members_list: Vec<Member>,

    /// Selected organization already has a main contact
    pub has_owner: bool,

    /// Message of the last failed write
    pub save_error: Option<String>,
}

impl UserUpdate {
    pub fn new(
        users: Arc<dyn UserApi>,
        members: MemberService,
        session: SessionService,
        ui: Arc<dyn PortalUi>,
    ) -> Self {
        Self {
            users,
            members,
            session,
            ui,
            current_account: None,
            form: UserForm::default(),
            form_enabled: false,
            main_contact_disabled: false,
            salesforce_id_disabled: false,
            is_saving: false,
            is_existent_member: false,
            existent_user: None,
            show_is_admin_checkbox: false,
            validation: None,
            members_list: Vec::new(),
            has_owner: false,
            save_error: None,
        }
    }

    /// Loads the session, the member list and the edited user
    ///
    /// The form stays disabled (and `existing` is not loaded) while the
    /// member list is empty.
    pub async fn init(&mut self, existing: Option<User>) -> ClientResult<()> {
        self.is_saving = false;
        self.is_existent_member = false;
        self.existent_user = None;
        self.form_enabled = false;

        self.current_account = self.session.identity(false).await?;
        self.members_list = self.members.members_for_selection().await?;

        if self.members_list.is_empty() {
            tracing::debug!("Member list empty, user form stays disabled");
            return Ok(());
        }

        self.form_enabled = true;
        if let Some(user) = existing {
            self.update_form(&user);
            self.existent_user = Some(user);
        }

        Ok(())
    }

    /// Copies `user` into the form
    pub fn update_form(&mut self, user: &User) {
        self.form.id = user.id.clone();
        self.form.login = user.login.clone();
        self.form.first_name = user.first_name.clone().unwrap_or_default();
        self.form.last_name = user.last_name.clone().unwrap_or_default();
        self.form.main_contact = user.main_contact;
        self.set_salesforce_id(user.salesforce_id.clone().unwrap_or_default());
        self.form.activated = user.activated;
        // Patched after the organization; only kept where the checkbox is offered
        self.form.is_admin = Some(user.is_admin && self.show_is_admin_checkbox);
        self.form.created_by = user.created_by.clone();
        self.form.created_date = user.created_date.as_ref().map(format_form_datetime);
        self.form.last_modified_by = user.last_modified_by.clone();
        self.form.last_modified_date = user.last_modified_date.as_ref().map(format_form_datetime);

        if user.main_contact {
            self.main_contact_disabled = true;
            self.salesforce_id_disabled = true;
        }

        if user.is_affiliated() {
            self.is_existent_member = true;
        }
    }

    /// Changes the selected organization
    pub fn set_salesforce_id(&mut self, salesforce_id: impl Into<String>) {
        self.form.salesforce_id = salesforce_id.into();
        self.on_salesforce_id_changed();
    }

    fn on_salesforce_id_changed(&mut self) {
        let selected = Member::find_by_salesforce_id(&self.members_list, &self.form.salesforce_id);
        self.show_is_admin_checkbox = self
            .current_account
            .as_ref()
            .is_some_and(|account| can_grant_org_admin(account, selected));
        self.form.is_admin = Some(false);
    }

    /// Whether the organization selector is locked
    ///
    /// Org owners and consortium leads are pinned to their own
    /// organization, which is patched into the form.
    pub fn disable_salesforce_id_dropdown(&mut self) -> bool {
        let Some(account) = self.current_account.clone() else {
            return self.is_existent_member;
        };

        let locked = org_selection_locked(&account, self.is_existent_member);
        if !account.is_admin() && (account.is_org_owner() || account.is_consortium_lead()) {
            let own = account.salesforce_id.unwrap_or_default();
            if self.form.salesforce_id != own {
                self.set_salesforce_id(own);
            }
        }

        locked
    }

    /// Checks whether the organization already has a main contact
    ///
    /// Only relevant while the main-contact box is ticked; the organization
    /// selector is locked meanwhile.
    pub async fn validate_org_owners(&mut self) -> ClientResult<()> {
        self.salesforce_id_disabled = self.form.main_contact;

        self.is_saving = true;
        let result = self.users.has_owner(&self.form.salesforce_id).await;
        self.is_saving = false;

        let owned = result?;
        self.has_owner = self.form.main_contact && owned;
        Ok(())
    }

    /// Builds the user DTO from the form
    ///
    /// The admin flag is only sent while the checkbox is offered.
    pub fn create_from_form(&self) -> User {
        User {
            id: self.form.id.clone().filter(|id| !id.is_empty()),
            login: self.form.login.clone(),
            first_name: Some(self.form.first_name.clone()),
            last_name: Some(self.form.last_name.clone()),
            main_contact: self.form.main_contact,
            is_admin: self.show_is_admin_checkbox && self.form.is_admin.unwrap_or(false),
            salesforce_id: Some(self.form.salesforce_id.clone()),
            activated: self.form.activated,
            created_by: self.form.created_by.clone(),
            created_date: self.form.created_date.as_deref().and_then(parse_form_datetime),
            last_modified_by: self.form.last_modified_by.clone(),
            last_modified_date: self
                .form
                .last_modified_date
                .as_deref()
                .and_then(parse_form_datetime),
            ..Default::default()
        }
    }

    /// Validates and writes the user
    ///
    /// # Errors
    ///
    /// - `ClientError::InvalidForm` if the form is disabled or client-side
    ///   constraints fail (nothing is sent)
    /// - the service error if the validation round trip or the write fails;
    ///   `save_error` holds its message
    pub async fn save(&mut self) -> ClientResult<SaveOutcome> {
        if !self.form_enabled {
            tracing::debug!("User form disabled, nothing saved");
            return Err(ClientError::InvalidForm(vec![FieldError::new(
                "form",
                "The form is disabled.",
            )]));
        }
        self.form.validate()?;

        self.is_saving = true;
        self.save_error = None;
        let user = self.create_from_form();

        let validation = match self.users.validate(&user).await {
            Ok(validation) => validation,
            Err(err) => return Err(self.on_save_error(err)),
        };

        if !validation.valid {
            tracing::debug!(errors = ?validation.errors, "User rejected by server validation");
            self.is_saving = false;
            self.validation = Some(validation.clone());
            return Ok(SaveOutcome::Rejected(validation));
        }

        let account = match self.current_account.clone() {
            Some(account) => account,
            None => match self.session.require_identity().await {
                Ok(account) => account,
                Err(err) => return Err(self.on_save_error(err)),
            },
        };

        let action = decide_save_action(&account, &user);
        tracing::info!(?action, login = %user.login, "Saving user");

        let written = if action.is_create() {
            self.users.create(&user).await
        } else {
            self.users.update(&user).await
        };

        match written {
            Ok(saved) => {
                self.on_save_success(action);
                Ok(SaveOutcome::Saved { action, user: saved })
            }
            Err(err) => Err(self.on_save_error(err)),
        }
    }

    fn on_save_success(&mut self, action: SaveAction) {
        self.is_saving = false;

        if action.requires_reload() {
            self.ui.reload();
        } else {
            self.ui.previous_state();
        }

        self.ui.alert(if action.is_create() {
            AlertType::UserCreated
        } else {
            AlertType::UserUpdated
        });
    }

    fn on_save_error(&mut self, err: ClientError) -> ClientError {
        tracing::error!(error = %err, "Failed to save user");
        self.is_saving = false;
        self.save_error = Some(err.user_message());
        err
    }

    /// Re-sends the activation e-mail of the loaded user, then navigates back
    pub async fn send_activate(&mut self) -> ClientResult<()> {
        let Some(user) = self.existent_user.clone() else {
            tracing::warn!("No user loaded, activation e-mail not sent");
            return Ok(());
        };

        let result = self.users.send_activate(&user).await;
        match &result {
            Ok(()) => self.ui.alert(AlertType::SendActivationSuccess),
            Err(err) => {
                tracing::error!(error = %err, login = %user.login, "Failed to re-send activation e-mail");
                self.ui.alert(AlertType::SendActivationFailure);
            }
        }
        self.ui.previous_state();

        result
    }

    /// Whether the "re-send activation" action is offered
    pub fn display_send_activate(&self) -> bool {
        self.existent_user
            .as_ref()
            .is_some_and(User::can_resend_activation)
    }
}
