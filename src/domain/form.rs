//! Form designs: visual elements plus their API bindings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Text,
    Number,
    Date,
    Select,
    Radio,
    Checkbox,
    Textarea,
    /// Layout-only heading; never bound to data.
    Section,
}

impl Default for ElementType {
    fn default() -> Self {
        ElementType::Text
    }
}

impl ElementType {
    /// Collection elements render a list of choices and can take
    /// value/label mappings from a bound API object.
    pub fn is_collection(&self) -> bool {
        matches!(
            self,
            ElementType::Select | ElementType::Radio | ElementType::Checkbox
        )
    }

    /// Single-value elements hold one scalar and can auto-fill from a
    /// bound object's fill mapping.
    pub fn is_single_value(&self) -> bool {
        matches!(
            self,
            ElementType::Text | ElementType::Number | ElementType::Date | ElementType::Textarea
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ElementType::Text => "text",
            ElementType::Number => "number",
            ElementType::Date => "date",
            ElementType::Select => "select",
            ElementType::Radio => "radio",
            ElementType::Checkbox => "checkbox",
            ElementType::Textarea => "textarea",
            ElementType::Section => "section",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementWidth {
    #[default]
    Full,
    Half,
    Third,
}

/// A manually authored choice on a collection element.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ElementOption {
    pub label: String,
    pub value: String,
}

/// Link from a form element to an API object's field mappings.
///
/// The mapping ids always refer to mappings of `api_object_id`; switching
/// the object clears them so they cannot point across objects.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ApiBinding {
    #[serde(default)]
    pub api_object_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_mapping_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_mapping_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_mapping_id: Option<String>,
}

impl ApiBinding {
    pub fn is_bound(&self) -> bool {
        !self.api_object_id.is_empty()
    }

    /// Point the binding at a different object, dropping every mapping id
    /// in the same step.
    pub fn rebind(&mut self, api_object_id: &str) {
        self.api_object_id = api_object_id.to_string();
        self.value_mapping_id = None;
        self.label_mapping_id = None;
        self.fill_mapping_id = None;
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FormElement {
    pub id: String,
    #[serde(rename = "type")]
    pub element_type: ElementType,
    pub label: String,
    pub field_key: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub options: Vec<ElementOption>,
    #[serde(default)]
    pub width: ElementWidth,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binding: Option<ApiBinding>,
}

impl FormElement {
    pub fn bound_object_id(&self) -> Option<&str> {
        self.binding
            .as_ref()
            .filter(|b| b.is_bound())
            .map(|b| b.api_object_id.as_str())
    }

    /// Bind this element to `api_object_id`, clearing any mapping ids left
    /// over from a previous object.
    pub fn rebind(&mut self, api_object_id: &str) {
        match &mut self.binding {
            Some(binding) => binding.rebind(api_object_id),
            None => {
                let mut binding = ApiBinding::default();
                binding.rebind(api_object_id);
                self.binding = Some(binding);
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FormDesign {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub elements: Vec<FormElement>,
}

impl FormDesign {
    pub fn element(&self, id: &str) -> Option<&FormElement> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn element_mut(&mut self, id: &str) -> Option<&mut FormElement> {
        self.elements.iter_mut().find(|e| e.id == id)
    }
}
