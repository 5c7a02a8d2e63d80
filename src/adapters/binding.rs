//! Binding resolution: turning a form element's API binding plus a
//! response record array into rendered options or a filled value.
//!
//! Everything here degrades silently. A mapping id that no longer exists
//! resolves as unset and an unbound element falls back to its manually
//! authored options. No operation in this module can fail.

use serde_json::Value;
use tracing::debug;

use crate::domain::api_object::ApiObject;
use crate::domain::form::FormElement;
use crate::domain::formatter::{format_value, Formatter};
use crate::domain::path::get_by_path;

/// One rendered choice for a collection element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOption {
    pub value: String,
    pub label: String,
}

/// Options to render for a collection element.
///
/// Unbound elements (or a bound element whose object cannot be found) fall
/// back to the element's own `options` list, unchanged in order and content.
/// Bound elements get one option per record, in response order; an unset or
/// dangling mapping id leaves that side of the option blank. The stored
/// value is the raw field text; only the label side goes through the
/// mapping's formatter.
pub fn resolve_options(
    element: &FormElement,
    object: Option<&ApiObject>,
    records: &[Value],
) -> Vec<ResolvedOption> {
    let bound = element
        .binding
        .as_ref()
        .filter(|b| b.is_bound())
        .and_then(|b| object.filter(|o| o.id == b.api_object_id).map(|o| (b, o)));
    let (binding, object) = match bound {
        Some(pair) => pair,
        None => {
            return element
                .options
                .iter()
                .map(|option| ResolvedOption {
                    value: option.value.clone(),
                    label: option.label.clone(),
                })
                .collect();
        }
    };

    let value_mapping = binding
        .value_mapping_id
        .as_deref()
        .and_then(|id| object.mapping(id));
    let label_mapping = binding
        .label_mapping_id
        .as_deref()
        .and_then(|id| object.mapping(id));
    if value_mapping.is_none() && label_mapping.is_none() {
        debug!(element = %element.id, api_object = %object.id, "no usable option mappings");
    }

    records
        .iter()
        .map(|record| {
            let value = value_mapping
                .map(|m| extract(record, &m.source_path, Formatter::None))
                .unwrap_or_default();
            let label = label_mapping
                .map(|m| extract(record, &m.source_path, m.formatter))
                .unwrap_or_default();
            ResolvedOption { value, label }
        })
        .collect()
}

/// Value to auto-fill into a single-value element once `record` has been
/// selected elsewhere in the form. `None` when the element is unbound, the
/// fill mapping is unset, or the id dangles.
pub fn fill_value(
    element: &FormElement,
    object: Option<&ApiObject>,
    record: &Value,
) -> Option<String> {
    let binding = element.binding.as_ref().filter(|b| b.is_bound())?;
    let object = object.filter(|o| o.id == binding.api_object_id)?;
    let mapping = object.mapping(binding.fill_mapping_id.as_deref()?)?;
    Some(extract(record, &mapping.source_path, mapping.formatter))
}

fn extract(record: &Value, path: &str, formatter: Formatter) -> String {
    match get_by_path(record, path) {
        Some(value) => format_value(value, formatter),
        None => String::new(),
    }
}
