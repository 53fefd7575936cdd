pub mod member;
pub mod notification;
pub mod question;
pub mod quiz;
pub mod quiz_result;
pub mod submission;
pub mod transcript;
