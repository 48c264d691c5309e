use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::Account;

/// Message-only response
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "successfully deleted")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Role check greeting
#[derive(Debug, Serialize, ToSchema)]
pub struct GreetingResponse {
    #[serde(rename = "MSG")]
    #[schema(example = "Hello, Admin! Your current role is admin")]
    pub msg: String,
}

impl From<&Account> for GreetingResponse {
    fn from(account: &Account) -> Self {
        Self {
            msg: format!("Hello, {}! Your current role is {}", account.name, account.role),
        }
    }
}
