use crate::domain::params;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Backend the native SDK should point its calls at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    #[default]
    Production,
    Staging,
    Development,
}

impl Protocol {
    /// Maps a caller-supplied environment name to a protocol. Unknown names
    /// fall back to production.
    pub fn from_name(name: &str) -> Self {
        match name {
            "production" => Self::Production,
            "staging" => Self::Staging,
            "development" => Self::Development,
            _ => Self::Production,
        }
    }
}

/// Environment configuration handed to the native setup routine.
///
/// Built fresh per `configure` call and not retained by the bridge beyond
/// the default-broker-list side effect.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GatewayEnvironment {
    pub gateway_name: String,
    pub protocol: Protocol,
    pub amo_enabled: bool,
    pub leprechaun_enabled: bool,
    pub broker_list: Vec<String>,
}

impl GatewayEnvironment {
    /// Lenient construction from the raw scripting-side config object.
    ///
    /// Malformed or missing fields degrade to safe defaults instead of
    /// failing: a non-string gateway name becomes empty, a non-string or
    /// unknown environment name becomes production, a non-array broker list
    /// becomes empty, and non-string broker entries are dropped.
    pub fn from_value(raw: &Value) -> Self {
        let gateway_name = raw
            .get("gatewayName")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned();
        let environment_name = raw
            .get("environmentName")
            .and_then(Value::as_str)
            .unwrap_or("production");
        let leprechaun_enabled = raw
            .get("isLeprechaun")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        let amo_enabled = raw
            .get("isAmoEnabled")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        let broker_list = params::string_list(raw.get("brokerList"));

        Self {
            gateway_name,
            protocol: Protocol::from_name(environment_name),
            amo_enabled,
            leprechaun_enabled,
            broker_list,
        }
    }
}
