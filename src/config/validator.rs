use std::collections::HashMap;
use thiserror::Error;

use crate::config::Settings;
use crate::domain::api_object::{ApiCategory, ApiObject};
use crate::domain::form::FormDesign;
use crate::domain::source::{AuthScheme, DataSource};

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Cross-reference error: {0}")]
    CrossReference(String),

    #[error("Duplicate entry: {0}")]
    Duplicate(String),
}

pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate(settings: &Settings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        Self::check_unique_ids("sources", settings.sources.iter().map(|s| &s.id), &mut errors);
        Self::check_unique_ids(
            "categories",
            settings.categories.iter().map(|c| &c.id),
            &mut errors,
        );
        Self::check_unique_ids("objects", settings.objects.iter().map(|o| &o.id), &mut errors);
        Self::check_unique_ids("forms", settings.forms.iter().map(|f| &f.id), &mut errors);

        for (idx, source) in settings.sources.iter().enumerate() {
            Self::validate_source(idx, source, &mut errors);
        }
        for (idx, object) in settings.objects.iter().enumerate() {
            Self::validate_object(idx, object, &settings.sources, &settings.categories, &mut errors);
        }
        for (idx, form) in settings.forms.iter().enumerate() {
            Self::validate_form(idx, form, &settings.objects, &mut errors);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn check_unique_ids<'a>(
        kind: &str,
        ids: impl Iterator<Item = &'a String>,
        errors: &mut Vec<ValidationError>,
    ) {
        let mut seen: HashMap<&str, usize> = HashMap::new();
        for (idx, id) in ids.enumerate() {
            if id.is_empty() {
                errors.push(ValidationError::MissingField(format!("{kind}[{idx}].id")));
                continue;
            }
            if let Some(prev) = seen.insert(id.as_str(), idx) {
                errors.push(ValidationError::Duplicate(format!(
                    "{kind} id '{id}' appears at indices {prev} and {idx}"
                )));
            }
        }
    }

    fn validate_source(idx: usize, source: &DataSource, errors: &mut Vec<ValidationError>) {
        if source.name.is_empty() {
            errors.push(ValidationError::MissingField(format!("sources[{idx}].name")));
        }
        if source.host.is_empty() {
            errors.push(ValidationError::MissingField(format!("sources[{idx}].host")));
        }
        if source.port == 0 {
            errors.push(ValidationError::InvalidValue {
                field: format!("sources[{idx}].port"),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        if let AuthScheme::CustomToken {
            login_url,
            response_variables,
            ..
        } = &source.auth
        {
            if login_url.is_empty() {
                errors.push(ValidationError::MissingField(format!(
                    "sources[{idx}].auth.login_url"
                )));
            }
            // A variable name shared by two extraction rules would make
            // ${name} ambiguous, so duplicates are rejected outright.
            let mut seen: HashMap<&str, usize> = HashMap::new();
            for (v_idx, variable) in response_variables.iter().enumerate() {
                if variable.variable_name.is_empty() {
                    errors.push(ValidationError::MissingField(format!(
                        "sources[{idx}].auth.response_variables[{v_idx}].variable_name"
                    )));
                    continue;
                }
                if let Some(prev) = seen.insert(variable.variable_name.as_str(), v_idx) {
                    errors.push(ValidationError::Duplicate(format!(
                        "variable name '{}' in source '{}' appears at indices {prev} and {v_idx}",
                        variable.variable_name, source.name
                    )));
                }
            }
        }
    }

    fn validate_object(
        idx: usize,
        object: &ApiObject,
        sources: &[DataSource],
        categories: &[ApiCategory],
        errors: &mut Vec<ValidationError>,
    ) {
        if object.name.is_empty() {
            errors.push(ValidationError::MissingField(format!("objects[{idx}].name")));
        }
        if object.path.is_empty() {
            errors.push(ValidationError::MissingField(format!("objects[{idx}].path")));
        }

        if !sources.iter().any(|s| s.id == object.data_source_id) {
            errors.push(ValidationError::CrossReference(format!(
                "object '{}' references unknown data source '{}'",
                object.name, object.data_source_id
            )));
        }
        if let Some(category_id) = &object.category_id {
            if !categories.iter().any(|c| &c.id == category_id) {
                errors.push(ValidationError::CrossReference(format!(
                    "object '{}' references unknown category '{}'",
                    object.name, category_id
                )));
            }
        }

        let mut seen: HashMap<&str, usize> = HashMap::new();
        for (m_idx, mapping) in object.mappings.iter().enumerate() {
            if mapping.source_path.is_empty() {
                errors.push(ValidationError::MissingField(format!(
                    "objects[{idx}].mappings[{m_idx}].source_path"
                )));
            }
            if let Some(prev) = seen.insert(mapping.id.as_str(), m_idx) {
                errors.push(ValidationError::Duplicate(format!(
                    "mapping id '{}' in object '{}' appears at indices {prev} and {m_idx}",
                    mapping.id, object.name
                )));
            }
        }
    }

    fn validate_form(
        idx: usize,
        form: &FormDesign,
        objects: &[ApiObject],
        errors: &mut Vec<ValidationError>,
    ) {
        if form.name.is_empty() {
            errors.push(ValidationError::MissingField(format!("forms[{idx}].name")));
        }

        // Two elements sharing a field key would silently shadow each other
        // when the form is submitted; reject rather than guess.
        let mut seen: HashMap<&str, usize> = HashMap::new();
        for (e_idx, element) in form.elements.iter().enumerate() {
            if element.element_type.is_collection() || element.element_type.is_single_value() {
                if element.field_key.is_empty() {
                    errors.push(ValidationError::MissingField(format!(
                        "forms[{idx}].elements[{e_idx}].field_key"
                    )));
                    continue;
                }
                if let Some(prev) = seen.insert(element.field_key.as_str(), e_idx) {
                    errors.push(ValidationError::Duplicate(format!(
                        "field key '{}' in form '{}' appears at indices {prev} and {e_idx}",
                        element.field_key, form.name
                    )));
                }
            }

            Self::validate_binding(idx, e_idx, element, objects, errors);
        }
    }

    /// Configured bindings must resolve: runtime degrades silently when a
    /// mapping disappears later, but a config file that ships with broken
    /// references is rejected up front.
    fn validate_binding(
        form_idx: usize,
        e_idx: usize,
        element: &crate::domain::form::FormElement,
        objects: &[ApiObject],
        errors: &mut Vec<ValidationError>,
    ) {
        let binding = match &element.binding {
            Some(binding) if binding.is_bound() => binding,
            _ => return,
        };
        let object = match objects.iter().find(|o| o.id == binding.api_object_id) {
            Some(object) => object,
            None => {
                errors.push(ValidationError::CrossReference(format!(
                    "forms[{form_idx}].elements[{e_idx}] binds unknown api object '{}'",
                    binding.api_object_id
                )));
                return;
            }
        };
        let sides = [
            ("value_mapping_id", &binding.value_mapping_id),
            ("label_mapping_id", &binding.label_mapping_id),
            ("fill_mapping_id", &binding.fill_mapping_id),
        ];
        for (field, mapping_id) in sides {
            if let Some(id) = mapping_id.as_deref().filter(|id| !id.is_empty()) {
                if object.mapping(id).is_none() {
                    errors.push(ValidationError::CrossReference(format!(
                        "forms[{form_idx}].elements[{e_idx}].{field} '{id}' is not a mapping of object '{}'",
                        object.name
                    )));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::form::{ElementType, FormElement};
    use crate::domain::source::{Protocol, ResponseVariable};

    fn source(id: &str) -> DataSource {
        DataSource {
            id: id.to_string(),
            name: "ERP".to_string(),
            host: "localhost".to_string(),
            port: 80,
            protocol: Protocol::Http,
            auth: AuthScheme::None,
            headers: vec![],
        }
    }

    fn object(id: &str, source_id: &str) -> ApiObject {
        ApiObject {
            id: id.to_string(),
            data_source_id: source_id.to_string(),
            name: "Payee List".to_string(),
            path: "/GetPayeeList".to_string(),
            ..ApiObject::default()
        }
    }

    #[test]
    fn test_valid_settings_pass() {
        let settings = Settings {
            sources: vec![source("ds_1")],
            objects: vec![object("api_1", "ds_1")],
            ..Settings::default()
        };
        assert!(ConfigValidator::validate(&settings).is_ok());
    }

    #[test]
    fn test_unknown_data_source_rejected() {
        let settings = Settings {
            objects: vec![object("api_1", "ds_missing")],
            ..Settings::default()
        };
        let errors = ConfigValidator::validate(&settings).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::CrossReference(_))));
    }

    #[test]
    fn test_duplicate_entity_ids_rejected() {
        let settings = Settings {
            sources: vec![source("ds_1"), source("ds_1")],
            ..Settings::default()
        };
        let errors = ConfigValidator::validate(&settings).unwrap_err();
        assert!(errors.iter().any(|e| matches!(e, ValidationError::Duplicate(_))));
    }

    #[test]
    fn test_duplicate_variable_name_rejected() {
        let mut tainted = source("ds_1");
        tainted.auth = AuthScheme::CustomToken {
            login_url: "/Login".to_string(),
            username: String::new(),
            password: String::new(),
            extra_login_params: None,
            response_variables: vec![
                ResponseVariable {
                    id: "rv_1".to_string(),
                    json_path: "Session".to_string(),
                    variable_name: "SessionID".to_string(),
                },
                ResponseVariable {
                    id: "rv_2".to_string(),
                    json_path: "Token".to_string(),
                    variable_name: "SessionID".to_string(),
                },
            ],
        };
        let settings = Settings {
            sources: vec![tainted],
            ..Settings::default()
        };
        let errors = ConfigValidator::validate(&settings).unwrap_err();
        assert!(errors.iter().any(|e| e.to_string().contains("SessionID")));
    }

    #[test]
    fn test_duplicate_field_key_rejected() {
        let element = |id: &str, key: &str| FormElement {
            id: id.to_string(),
            element_type: ElementType::Text,
            field_key: key.to_string(),
            ..FormElement::default()
        };
        let settings = Settings {
            forms: vec![FormDesign {
                id: "form_1".to_string(),
                name: "Invoice".to_string(),
                elements: vec![element("el_1", "payee"), element("el_2", "payee")],
            }],
            ..Settings::default()
        };
        let errors = ConfigValidator::validate(&settings).unwrap_err();
        assert!(errors.iter().any(|e| e.to_string().contains("payee")));
    }

    #[test]
    fn test_section_elements_skip_field_key_check() {
        let settings = Settings {
            forms: vec![FormDesign {
                id: "form_1".to_string(),
                name: "Invoice".to_string(),
                elements: vec![FormElement {
                    id: "el_1".to_string(),
                    element_type: ElementType::Section,
                    label: "Details".to_string(),
                    ..FormElement::default()
                }],
            }],
            ..Settings::default()
        };
        assert!(ConfigValidator::validate(&settings).is_ok());
    }

    #[test]
    fn test_binding_references_checked() {
        use crate::domain::api_object::FieldMapping;
        use crate::domain::form::ApiBinding;

        let mut bound_object = object("api_1", "ds_1");
        bound_object.mappings = vec![FieldMapping {
            id: "m1".to_string(),
            source_path: "Code".to_string(),
            ..FieldMapping::default()
        }];
        let element = |object_id: &str, mapping_id: &str| FormElement {
            id: "el_1".to_string(),
            element_type: ElementType::Select,
            field_key: "payee".to_string(),
            binding: Some(ApiBinding {
                api_object_id: object_id.to_string(),
                value_mapping_id: Some(mapping_id.to_string()),
                ..ApiBinding::default()
            }),
            ..FormElement::default()
        };
        let settings = |el: FormElement| Settings {
            sources: vec![source("ds_1")],
            objects: vec![bound_object.clone()],
            forms: vec![FormDesign {
                id: "form_1".to_string(),
                name: "Invoice".to_string(),
                elements: vec![el],
            }],
            ..Settings::default()
        };

        assert!(ConfigValidator::validate(&settings(element("api_1", "m1"))).is_ok());

        let errors = ConfigValidator::validate(&settings(element("api_gone", "m1"))).unwrap_err();
        assert!(errors.iter().any(|e| e.to_string().contains("api_gone")));

        let errors = ConfigValidator::validate(&settings(element("api_1", "m_gone"))).unwrap_err();
        assert!(errors.iter().any(|e| e.to_string().contains("m_gone")));
    }

    #[test]
    fn test_duplicate_mapping_ids_rejected() {
        use crate::domain::api_object::FieldMapping;

        let mut tainted = object("api_1", "ds_1");
        tainted.mappings = vec![
            FieldMapping {
                id: "m1".to_string(),
                source_path: "A".to_string(),
                ..FieldMapping::default()
            },
            FieldMapping {
                id: "m1".to_string(),
                source_path: "B".to_string(),
                ..FieldMapping::default()
            },
        ];
        let settings = Settings {
            sources: vec![source("ds_1")],
            objects: vec![tainted],
            ..Settings::default()
        };
        let errors = ConfigValidator::validate(&settings).unwrap_err();
        assert!(errors.iter().any(|e| e.to_string().contains("m1")));
    }
}
