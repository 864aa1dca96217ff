pub mod question;
pub mod user;
