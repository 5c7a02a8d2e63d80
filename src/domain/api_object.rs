//! API objects: callable operations on a data source plus their response
//! field mappings.

use serde::{Deserialize, Serialize};

use super::formatter::Formatter;
use super::source::DataSource;
use super::template::extract_variables;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Method {
    #[serde(rename = "GET")]
    Get,
    #[default]
    #[serde(rename = "POST")]
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// One extraction rule from a response record: where the value lives
/// (`source_path`), what it is called, and how it is displayed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FieldMapping {
    pub id: String,
    /// Downstream parameter name this field feeds, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,
    pub source_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub formatter: Formatter,
}

impl FieldMapping {
    /// Human-facing label: description, then parameter, then the raw path.
    pub fn display_name(&self) -> &str {
        if let Some(description) = &self.description {
            if !description.is_empty() {
                return description;
            }
        }
        if let Some(parameter) = &self.parameter {
            if !parameter.is_empty() {
                return parameter;
            }
        }
        &self.source_path
    }
}

/// Access grouping for API objects.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ApiCategory {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub allowed_depts: Vec<String>,
    #[serde(default)]
    pub allowed_users: Vec<String>,
}

/// A named operation against a data source: request shape on the way out,
/// field mappings on the way back.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ApiObject {
    pub id: String,
    pub data_source_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub method: Method,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_body_template: Option<String>,
    /// Dotted path to the record array inside the raw response. `None` means
    /// the response body itself is the record array.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_root_path: Option<String>,
    #[serde(default)]
    pub mappings: Vec<FieldMapping>,
}

impl ApiObject {
    pub fn mapping(&self, id: &str) -> Option<&FieldMapping> {
        self.mappings.iter().find(|m| m.id == id)
    }

    /// Placeholder names in the request body template the user must supply,
    /// with the source's login-bound variables filtered out.
    pub fn user_variables(&self, source: &DataSource) -> Vec<String> {
        match &self.request_body_template {
            Some(template) => extract_variables(template, &source.reserved_variables()),
            None => Vec::new(),
        }
    }
}
