/// Member create/edit workflow
///
/// Admin only. Saving runs the server validation round trip first, then
/// updates (existing member) or creates, navigates back and tells list
/// views to refresh.

use memberportal_shared::alerts::{AlertType, EventType};
use memberportal_shared::auth::authority::Authority;
use memberportal_shared::auth::authorization::require_any_authority;
use memberportal_shared::dates::{format_form_datetime, parse_form_datetime};
use memberportal_shared::models::member::Member;
use memberportal_shared::models::validation::ValidationResult;
use std::sync::Arc;
use validator::Validate;

use crate::error::{ClientError, ClientResult};
use crate::events::EventBus;
use crate::services::MemberApi;
use crate::session::SessionService;
use crate::workflow::PortalUi;

/// Form fields of the member editor
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct MemberForm {
    pub id: Option<String>,

    #[validate(length(min = 1, message = "This field is required."))]
    pub salesforce_id: String,

    #[validate(length(min = 1, message = "This field is required."))]
    pub client_name: String,

    pub client_id: Option<String>,
    pub parent_salesforce_id: Option<String>,
    pub is_consortium_lead: bool,
    pub superadmin_enabled: bool,
    pub assertion_service_enabled: bool,
    pub created_by: Option<String>,
    pub created_date: Option<String>,
    pub last_modified_by: Option<String>,
    pub last_modified_date: Option<String>,
}

impl MemberForm {
    fn from_member(member: &Member) -> Self {
        Self {
            id: member.id.clone(),
            salesforce_id: member.salesforce_id.clone(),
            client_name: member.client_name.clone().unwrap_or_default(),
            client_id: member.client_id.clone(),
            parent_salesforce_id: member.parent_salesforce_id.clone(),
            is_consortium_lead: member.is_consortium_lead,
            superadmin_enabled: member.superadmin_enabled,
            assertion_service_enabled: member.assertion_service_enabled,
            created_by: member.created_by.clone(),
            created_date: member.created_date.as_ref().map(format_form_datetime),
            last_modified_by: member.last_modified_by.clone(),
            last_modified_date: member.last_modified_date.as_ref().map(format_form_datetime),
        }
    }

    fn to_member(&self) -> Member {
        Member {
            id: self.id.clone().filter(|id| !id.is_empty()),
            salesforce_id: self.salesforce_id.clone(),
            client_name: Some(self.client_name.clone()),
            client_id: self.client_id.clone().filter(|id| !id.is_empty()),
            parent_salesforce_id: self.parent_salesforce_id.clone().filter(|id| !id.is_empty()),
            is_consortium_lead: self.is_consortium_lead,
            superadmin_enabled: self.superadmin_enabled,
            assertion_service_enabled: self.assertion_service_enabled,
            created_by: self.created_by.clone(),
            created_date: self.created_date.as_deref().and_then(parse_form_datetime),
            last_modified_by: self.last_modified_by.clone(),
            last_modified_date: self.last_modified_date.as_deref().and_then(parse_form_datetime),
        }
    }
}

/// Member editor state and workflow
pub struct MemberUpdate {
    members: Arc<dyn MemberApi>,
    session: SessionService,
    ui: Arc<dyn PortalUi>,
    events: EventBus,

    pub form: MemberForm,
    pub is_saving: bool,
    pub validation: Option<ValidationResult>,
    pub save_error: Option<String>,
}

impl MemberUpdate {
    pub fn new(
        members: Arc<dyn MemberApi>,
        session: SessionService,
        ui: Arc<dyn PortalUi>,
        events: EventBus,
    ) -> Self {
        Self {
            members,
            session,
            ui,
            events,
            form: MemberForm::default(),
            is_saving: false,
            validation: None,
            save_error: None,
        }
    }

    /// Checks the session is an admin and loads `existing` into the form
    pub async fn init(&mut self, existing: Option<&Member>) -> ClientResult<()> {
        let account = self.session.require_identity().await?;
        require_any_authority(&account, &[Authority::Admin])?;

        self.is_saving = false;
        self.form = existing.map(MemberForm::from_member).unwrap_or_default();
        Ok(())
    }

    /// Validates and writes the member
    ///
    /// Returns `Ok(None)` when server validation refused the member.
    pub async fn save(&mut self) -> ClientResult<Option<Member>> {
        self.form.validate()?;

        self.is_saving = true;
        self.save_error = None;
        let member = self.form.to_member();

        let validation = match self.members.validate(&member).await {
            Ok(validation) => validation,
            Err(err) => return Err(self.on_save_error(err)),
        };

        if !validation.valid {
            self.is_saving = false;
            self.validation = Some(validation);
            return Ok(None);
        }

        let is_new = member.is_new();
        let written = if is_new {
            self.members.create(&member).await
        } else {
            self.members.update(&member).await
        };

        let saved = match written {
            Ok(saved) => saved,
            Err(err) => return Err(self.on_save_error(err)),
        };

        self.is_saving = false;
        let alert = if is_new {
            AlertType::MemberCreated
        } else {
            AlertType::MemberUpdated
        };
        self.events
            .broadcast_message(EventType::MemberListModification, alert.default_text());
        self.ui.previous_state();
        self.ui.alert(alert);

        Ok(Some(saved))
    }

    fn on_save_error(&mut self, err: ClientError) -> ClientError {
        tracing::error!(error = %err, salesforce_id = %self.form.salesforce_id, "Failed to save member");
        self.is_saving = false;
        self.save_error = Some(err.user_message());
        err
    }
}
