use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ------------------------------------------ General Error API ------------------------------------------
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,    // Diagnostic only, not meant for end users.
}
