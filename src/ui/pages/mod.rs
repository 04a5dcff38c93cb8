//! Application pages:
//! - Login and registration
//! - Dashboard (role-aware landing page)
//! - User administration
//! - Invoicing
//! - Not found

mod dashboard;
mod factures;
mod login;
mod not_found;
mod register;
mod users;

pub use dashboard::DashboardPage;
pub use factures::FacturesPage;
pub use login::LoginPage;
pub use not_found::NotFoundPage;
pub use register::RegisterPage;
pub use users::UsersPage;
