pub mod auth;
pub mod event;
pub mod id;
pub mod photo;
pub mod registration;
pub mod role;
pub mod user;
