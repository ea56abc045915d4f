pub mod command;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken(pub String);
