pub mod auth_service;
pub use auth_service::{AuthError, AuthService, Registration, UserInfo};

pub mod auth_service_impl;
pub use auth_service_impl::SeaOrmAuthService;

pub mod notifications;
pub use notifications::NotificationService;
