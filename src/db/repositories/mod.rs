pub mod case_study;
pub mod message;
pub mod setting;
pub mod user;
