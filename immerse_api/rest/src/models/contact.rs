use immerse_models::contact::{ContactValidationErrors, RawContactSubmission};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiContactSubmission {
    /// Full name of the visitor
    pub name: Option<String>,
    /// Email address of the visitor
    pub email: Option<String>,
    /// Content of the message
    pub message: Option<String>,
}

impl From<ApiContactSubmission> for RawContactSubmission {
    fn from(value: ApiContactSubmission) -> Self {
        Self {
            name: value.name,
            email: value.email,
            message: value.message,
        }
    }
}

#[derive(Serialize)]
pub struct ApiContactValidationError {
    pub error: &'static str,
    pub fields: ContactValidationErrors,
}
