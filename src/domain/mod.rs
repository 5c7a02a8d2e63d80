//! Core domain model: data sources, API objects, form designs, and the
//! pure value-level operations over them.

pub mod api_object;
pub mod form;
pub mod formatter;
pub mod path;
pub mod source;
pub mod template;

pub use api_object::{ApiCategory, ApiObject, FieldMapping, Method};
pub use form::{
    ApiBinding, ElementOption, ElementType, ElementWidth, FormDesign, FormElement,
};
pub use formatter::{format_value, Formatter};
pub use path::{get_by_path, set_by_path, wrap_by_root_path};
pub use source::{
    ApiKeyPlacement, AuthScheme, DataSource, KeyValue, Protocol, ResponseVariable,
};
pub use template::extract_variables;
