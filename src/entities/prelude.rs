pub use super::case_studies::Entity as CaseStudies;
pub use super::contact_messages::Entity as ContactMessages;
pub use super::site_settings::Entity as SiteSettings;
pub use super::users::Entity as Users;
