pub mod notifications;
pub mod permissions;
pub mod session;
