use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Session bootstrap request. The token is minted by the consumer's backend
/// and is opaque to the bridge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitRequest {
    pub sdk_token: String,
}

/// Fully normalized transaction request: broker fallback already resolved
/// and UTM parameters already flattened to string-only entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionRequest {
    pub transaction_id: String,
    pub utm_params: HashMap<String, String>,
    pub broker_list: Vec<String>,
}

/// Result of a completed transaction flow: the raw payload plus the status
/// label the native SDK assigned to the flow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionResponse {
    pub data: Option<String>,
    pub transaction: String,
}

/// Launch parameters for the native SDK's embedded web module.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedModuleRequest {
    pub target_endpoint: String,
    pub params: String,
}

/// Outcome of an embedded module launch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddedModuleResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchiveRequest {
    pub item_id: String,
}

/// Lead-gen submission with both maps already flattened to string entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeadGenRequest {
    pub user_details: HashMap<String, String>,
    pub utm_params: HashMap<String, String>,
}

/// Error payload carried verbatim from a native failure callback.
///
/// Each key is serialized only when the native side supplied it, matching
/// the `{errorCode, errorMessage, data?}` wire shape consumers already
/// pattern-match on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeError {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

impl NativeError {
    pub fn new(error_code: i32, error_message: impl Into<String>) -> Self {
        Self {
            error_code: Some(error_code),
            error_message: Some(error_message.into()),
            data: None,
        }
    }

    /// Message-only error, the shape the native setup listener reports.
    pub fn reason(error_message: impl Into<String>) -> Self {
        Self {
            error_code: None,
            error_message: Some(error_message.into()),
            data: None,
        }
    }

    pub fn with_data(mut self, data: impl Into<String>) -> Self {
        self.data = Some(data.into());
        self
    }
}

impl fmt::Display for NativeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(code) = self.error_code {
            parts.push(format!("code {code}"));
        }
        if let Some(message) = &self.error_message {
            parts.push(message.clone());
        }
        if let Some(data) = &self.data {
            parts.push(format!("data {data}"));
        }
        if parts.is_empty() {
            return write!(f, "unspecified native error");
        }
        write!(f, "{}", parts.join(": "))
    }
}
