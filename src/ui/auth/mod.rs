//! Authentication UI: session context provider, login and registration
//! forms.

pub mod context;
pub mod login_form;
pub mod register_form;

pub use context::{
    ApiHandle, SessionContext, login, logout, provide_session_context, register,
    use_session_context,
};
pub use login_form::LoginForm;
pub use register_form::RegisterForm;
