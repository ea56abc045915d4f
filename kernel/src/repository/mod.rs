pub mod auth;
pub mod event;
pub mod health;
pub mod photo;
pub mod registration;
pub mod user;
