/// REST service wrappers
///
/// One module per back-end resource. Each exposes an async trait (so the
/// workflows can be driven by in-memory fakes) and an HTTP implementation
/// built on [`PortalHttp`](crate::http::PortalHttp).
///
/// # Services
///
/// - [`user::UserApi`]: users of the user service
/// - [`member::MemberApi`]: member organizations of the member service
/// - [`account::AccountApi`]: the logged-in account, MFA and password reset
/// - [`affiliation::AffiliationService`]: affiliations of the assertion service

pub mod account;
pub mod affiliation;
pub mod member;
pub mod user;

pub use account::{AccountApi, HttpAccountApi, MfaActivation, MfaSetup, ResetFinish};
pub use affiliation::AffiliationService;
pub use member::{HttpMemberApi, MemberApi, MemberService};
pub use user::{HttpUserApi, UserApi};
