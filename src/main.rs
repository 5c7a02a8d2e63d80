use anyhow::{bail, Context};
use clap::Parser;
use serde_json::json;
use tracing::info;

use patchbay::adapters::binding::resolve_options;
use patchbay::adapters::registry::Registry;
use patchbay::adapters::simulator::Simulator;
use patchbay::cli::{Cli, Command};
use patchbay::config::Settings;
use patchbay::domain::api_object::ApiObject;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let settings = Settings::new_with_cli(&cli)
        .with_context(|| format!("loading configuration from {}", cli.config.display()))?;
    let simulator = Simulator::new((&settings.simulator).into());
    let registry = settings.into_registry();

    match &cli.command {
        Command::Validate => {
            // Settings::new_with_cli already validated; getting here means
            // the configuration is clean.
            println!(
                "Configuration OK: {} sources, {} categories, {} objects, {} forms",
                registry.sources().len(),
                registry.categories().len(),
                registry.objects().len(),
                registry.forms().len(),
            );
        }
        Command::List => list(&registry),
        Command::Variables { object_id } => {
            let object = find_object(&registry, object_id)?;
            let source = registry.source(&object.data_source_id).with_context(|| {
                format!(
                    "object '{}' references unknown data source '{}'",
                    object.name, object.data_source_id
                )
            })?;
            let variables = object.user_variables(source);
            println!("{}", serde_json::to_string_pretty(&variables)?);
        }
        Command::Simulate {
            object_id,
            records_only,
        } => {
            let object = find_object(&registry, object_id)?;
            info!(object = %object.name, "running simulation");
            let output = if *records_only {
                json!(simulator.generate_records(object))
            } else {
                simulator.simulate(object)
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Command::Options { form_id, element_id } => {
            let form = registry
                .form(form_id)
                .or_else(|| registry.forms().iter().find(|f| &f.name == form_id))
                .with_context(|| format!("form '{form_id}' not found"))?;
            let element = form
                .element(element_id)
                .with_context(|| format!("element '{element_id}' not found in form '{form_id}'"))?;
            let object = element.bound_object_id().and_then(|id| registry.object(id));
            let records = match object {
                Some(object) => simulator.generate_records(object),
                None => Vec::new(),
            };
            let options = resolve_options(element, object, &records);
            let rendered: Vec<_> = options
                .iter()
                .map(|o| json!({ "value": o.value, "label": o.label }))
                .collect();
            println!("{}", serde_json::to_string_pretty(&rendered)?);
        }
    }

    Ok(())
}

/// Objects are addressed by id first, then by name.
fn find_object<'a>(registry: &'a Registry, key: &str) -> anyhow::Result<&'a ApiObject> {
    let by_id = registry.object(key);
    match by_id.or_else(|| registry.objects().iter().find(|o| o.name == key)) {
        Some(object) => Ok(object),
        None => bail!("api object '{key}' not found"),
    }
}

fn list(registry: &Registry) {
    println!("Data sources:");
    for source in registry.sources() {
        println!("  {} - {} ({})", source.id, source.name, source.base_url());
    }
    println!("Categories:");
    for category in registry.categories() {
        println!("  {} - {}", category.id, category.name);
    }
    println!("API objects:");
    for object in registry.objects() {
        println!(
            "  {} - {} [{} {}] ({} mappings)",
            object.id,
            object.name,
            object.method.as_str(),
            object.path,
            object.mappings.len()
        );
    }
    println!("Forms:");
    for form in registry.forms() {
        println!("  {} - {} ({} elements)", form.id, form.name, form.elements.len());
    }
}
