pub mod demo;
pub mod health;
pub mod messages;
pub mod secrets;
pub mod upload;
