//! Data source definitions: connection endpoint plus authentication scheme.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    #[default]
    Http,
    Https,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Http => "http",
            Protocol::Https => "https",
        }
    }
}

/// One name/value pair carried as a global request header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValue {
    pub id: String,
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiKeyPlacement {
    #[default]
    Header,
    Query,
}

/// Extraction rule applied to a login response: the value found at
/// `json_path` becomes available as `${variable_name}` in later request
/// templates of the same data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseVariable {
    pub id: String,
    pub json_path: String,
    pub variable_name: String,
}

/// Authentication scheme for a data source. The `type` tag values are a
/// closed vocabulary shared with persisted configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthScheme {
    #[default]
    None,
    Basic {
        username: String,
        password: String,
    },
    ApiKey {
        key_name: String,
        key_value: String,
        #[serde(default)]
        placement: ApiKeyPlacement,
    },
    /// Login-first flow: call `login_url`, then pull named variables out of
    /// the login response via `response_variables`.
    CustomToken {
        login_url: String,
        #[serde(default)]
        username: String,
        #[serde(default)]
        password: String,
        /// Extra JSON text merged into the login request body.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        extra_login_params: Option<String>,
        #[serde(default)]
        response_variables: Vec<ResponseVariable>,
    },
}

impl AuthScheme {
    pub fn type_tag(&self) -> &'static str {
        match self {
            AuthScheme::None => "none",
            AuthScheme::Basic { .. } => "basic",
            AuthScheme::ApiKey { .. } => "api_key",
            AuthScheme::CustomToken { .. } => "custom_token",
        }
    }
}

/// A configured external HTTP endpoint plus its authentication method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSource {
    pub id: String,
    pub name: String,
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub protocol: Protocol,
    #[serde(default)]
    pub auth: AuthScheme,
    #[serde(default)]
    pub headers: Vec<KeyValue>,
}

fn default_port() -> u16 {
    80
}

impl DataSource {
    pub fn base_url(&self) -> String {
        format!("{}://{}:{}", self.protocol.as_str(), self.host, self.port)
    }

    /// Variable names this source binds from its login response. Empty for
    /// every scheme except `custom_token`.
    pub fn reserved_variables(&self) -> Vec<String> {
        match &self.auth {
            AuthScheme::CustomToken {
                response_variables, ..
            } => response_variables
                .iter()
                .map(|v| v.variable_name.clone())
                .collect(),
            _ => Vec::new(),
        }
    }
}
