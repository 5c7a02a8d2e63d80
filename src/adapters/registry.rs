//! In-memory entity registry.
//!
//! Owns the four entity collections and the CRUD contract the editors call:
//! `add_*` stamps a fresh id and appends, `update_*` replaces whole records
//! by id, `delete_*` filters by id. Nothing here persists; the registry
//! lives exactly as long as the process.

use chrono::Utc;
use thiserror::Error;
use tracing::info;

use crate::domain::api_object::{ApiCategory, ApiObject};
use crate::domain::form::FormDesign;
use crate::domain::source::DataSource;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },
}

#[derive(Debug, Default)]
pub struct Registry {
    sources: Vec<DataSource>,
    categories: Vec<ApiCategory>,
    objects: Vec<ApiObject>,
    forms: Vec<FormDesign>,
    last_stamp: i64,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a registry with already-identified entities, keeping their ids.
    pub fn from_entities(
        sources: Vec<DataSource>,
        categories: Vec<ApiCategory>,
        objects: Vec<ApiObject>,
        forms: Vec<FormDesign>,
    ) -> Self {
        Self {
            sources,
            categories,
            objects,
            forms,
            last_stamp: 0,
        }
    }

    /// Timestamp-derived id, bumped when two calls land on the same
    /// millisecond so ids stay unique within one registry.
    fn fresh_id(&mut self, prefix: &str) -> String {
        let mut stamp = Utc::now().timestamp_millis();
        if stamp <= self.last_stamp {
            stamp = self.last_stamp + 1;
        }
        self.last_stamp = stamp;
        format!("{prefix}_{stamp}")
    }

    pub fn sources(&self) -> &[DataSource] {
        &self.sources
    }

    pub fn source(&self, id: &str) -> Option<&DataSource> {
        self.sources.iter().find(|s| s.id == id)
    }

    pub fn add_source(&mut self, mut source: DataSource) -> String {
        source.id = self.fresh_id("ds");
        info!(id = %source.id, name = %source.name, "data source added");
        let id = source.id.clone();
        self.sources.push(source);
        id
    }

    pub fn update_source(&mut self, source: DataSource) -> Result<(), RegistryError> {
        replace_by_id(&mut self.sources, source.id.clone(), source, |s| &s.id, "data source")
    }

    pub fn delete_source(&mut self, id: &str) -> Result<(), RegistryError> {
        remove_by_id(&mut self.sources, id, |s| &s.id, "data source")
    }

    pub fn categories(&self) -> &[ApiCategory] {
        &self.categories
    }

    pub fn category(&self, id: &str) -> Option<&ApiCategory> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn add_category(&mut self, mut category: ApiCategory) -> String {
        category.id = self.fresh_id("cat");
        let id = category.id.clone();
        self.categories.push(category);
        id
    }

    pub fn update_category(&mut self, category: ApiCategory) -> Result<(), RegistryError> {
        replace_by_id(
            &mut self.categories,
            category.id.clone(),
            category,
            |c| &c.id,
            "category",
        )
    }

    pub fn delete_category(&mut self, id: &str) -> Result<(), RegistryError> {
        remove_by_id(&mut self.categories, id, |c| &c.id, "category")
    }

    pub fn objects(&self) -> &[ApiObject] {
        &self.objects
    }

    pub fn object(&self, id: &str) -> Option<&ApiObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    /// API objects grouped under one category.
    pub fn objects_in_category(&self, category_id: &str) -> Vec<&ApiObject> {
        self.objects
            .iter()
            .filter(|o| o.category_id.as_deref() == Some(category_id))
            .collect()
    }

    pub fn add_object(&mut self, mut object: ApiObject) -> String {
        object.id = self.fresh_id("api");
        info!(id = %object.id, name = %object.name, "api object added");
        let id = object.id.clone();
        self.objects.push(object);
        id
    }

    pub fn update_object(&mut self, object: ApiObject) -> Result<(), RegistryError> {
        replace_by_id(&mut self.objects, object.id.clone(), object, |o| &o.id, "api object")
    }

    pub fn delete_object(&mut self, id: &str) -> Result<(), RegistryError> {
        remove_by_id(&mut self.objects, id, |o| &o.id, "api object")
    }

    pub fn forms(&self) -> &[FormDesign] {
        &self.forms
    }

    pub fn form(&self, id: &str) -> Option<&FormDesign> {
        self.forms.iter().find(|f| f.id == id)
    }

    pub fn add_form(&mut self, mut form: FormDesign) -> String {
        form.id = self.fresh_id("form");
        let id = form.id.clone();
        self.forms.push(form);
        id
    }

    pub fn update_form(&mut self, form: FormDesign) -> Result<(), RegistryError> {
        replace_by_id(&mut self.forms, form.id.clone(), form, |f| &f.id, "form")
    }

    pub fn delete_form(&mut self, id: &str) -> Result<(), RegistryError> {
        remove_by_id(&mut self.forms, id, |f| &f.id, "form")
    }

    /// Rebind one form element to a different API object, clearing its
    /// mapping ids in the same update.
    pub fn rebind_element(
        &mut self,
        form_id: &str,
        element_id: &str,
        api_object_id: &str,
    ) -> Result<(), RegistryError> {
        let form = self
            .forms
            .iter_mut()
            .find(|f| f.id == form_id)
            .ok_or_else(|| RegistryError::NotFound {
                kind: "form",
                id: form_id.to_string(),
            })?;
        let element = form
            .element_mut(element_id)
            .ok_or_else(|| RegistryError::NotFound {
                kind: "form element",
                id: element_id.to_string(),
            })?;
        element.rebind(api_object_id);
        Ok(())
    }
}

fn replace_by_id<T>(
    items: &mut [T],
    id: String,
    replacement: T,
    key: impl Fn(&T) -> &String,
    kind: &'static str,
) -> Result<(), RegistryError> {
    match items.iter_mut().find(|item| key(item) == &id) {
        Some(slot) => {
            *slot = replacement;
            Ok(())
        }
        None => Err(RegistryError::NotFound { kind, id }),
    }
}

fn remove_by_id<T>(
    items: &mut Vec<T>,
    id: &str,
    key: impl Fn(&T) -> &String,
    kind: &'static str,
) -> Result<(), RegistryError> {
    let before = items.len();
    items.retain(|item| key(item) != id);
    if items.len() == before {
        return Err(RegistryError::NotFound {
            kind,
            id: id.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_source() -> DataSource {
        DataSource {
            id: String::new(),
            name: "ERP".to_string(),
            host: "localhost".to_string(),
            port: 80,
            protocol: Default::default(),
            auth: Default::default(),
            headers: vec![],
        }
    }

    #[test]
    fn test_add_assigns_prefixed_id() {
        let mut registry = Registry::new();
        let id = registry.add_source(demo_source());
        assert!(id.starts_with("ds_"));
        assert_eq!(registry.source(&id).map(|s| s.name.as_str()), Some("ERP"));
    }

    #[test]
    fn test_ids_unique_within_same_millisecond() {
        let mut registry = Registry::new();
        let ids: Vec<String> = (0..50).map(|_| registry.add_source(demo_source())).collect();
        let mut deduped = ids.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), ids.len());
    }

    #[test]
    fn test_update_replaces_whole_record() {
        let mut registry = Registry::new();
        let id = registry.add_source(demo_source());
        let mut replacement = demo_source();
        replacement.id = id.clone();
        replacement.name = "ERP v2".to_string();
        registry.update_source(replacement).unwrap();
        assert_eq!(registry.source(&id).map(|s| s.name.as_str()), Some("ERP v2"));
    }

    #[test]
    fn test_update_unknown_id_errors() {
        let mut registry = Registry::new();
        let mut source = demo_source();
        source.id = "ds_missing".to_string();
        let err = registry.update_source(source).unwrap_err();
        assert!(err.to_string().contains("ds_missing"));
    }

    #[test]
    fn test_delete_filters_by_id() {
        let mut registry = Registry::new();
        let keep = registry.add_source(demo_source());
        let drop = registry.add_source(demo_source());
        registry.delete_source(&drop).unwrap();
        assert_eq!(registry.sources().len(), 1);
        assert!(registry.source(&keep).is_some());
        assert!(registry.delete_source(&drop).is_err());
    }

    #[test]
    fn test_objects_in_category() {
        let mut registry = Registry::new();
        let cat = registry.add_category(ApiCategory {
            name: "Finance".to_string(),
            ..ApiCategory::default()
        });
        let in_cat = registry.add_object(ApiObject {
            name: "A".to_string(),
            category_id: Some(cat.clone()),
            ..ApiObject::default()
        });
        registry.add_object(ApiObject {
            name: "B".to_string(),
            ..ApiObject::default()
        });
        let grouped = registry.objects_in_category(&cat);
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped[0].id, in_cat);
    }

    #[test]
    fn test_rebind_element_clears_mappings() {
        use crate::domain::form::{ApiBinding, FormElement};

        let mut registry = Registry::new();
        let form_id = registry.add_form(FormDesign {
            name: "Invoice".to_string(),
            elements: vec![FormElement {
                id: "el_1".to_string(),
                field_key: "payee".to_string(),
                binding: Some(ApiBinding {
                    api_object_id: "api_a".to_string(),
                    value_mapping_id: Some("m1".to_string()),
                    label_mapping_id: Some("m2".to_string()),
                    fill_mapping_id: Some("m3".to_string()),
                }),
                ..FormElement::default()
            }],
            ..FormDesign::default()
        });

        registry.rebind_element(&form_id, "el_1", "api_b").unwrap();
        let binding = registry
            .form(&form_id)
            .and_then(|f| f.element("el_1"))
            .and_then(|e| e.binding.clone())
            .unwrap();
        assert_eq!(binding.api_object_id, "api_b");
        assert!(binding.value_mapping_id.is_none());
        assert!(binding.label_mapping_id.is_none());
        assert!(binding.fill_mapping_id.is_none());

        assert!(registry.rebind_element(&form_id, "el_missing", "api_b").is_err());
        assert!(registry.rebind_element("form_missing", "el_1", "api_b").is_err());
    }
}
