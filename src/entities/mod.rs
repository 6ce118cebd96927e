pub mod prelude;

pub mod case_studies;
pub mod contact_messages;
pub mod site_settings;
pub mod users;
