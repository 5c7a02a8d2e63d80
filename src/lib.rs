//! # Patchbay - API Connector Configuration Console
//!
//! Patchbay models the configuration layer of an API connector: external
//! data sources, named API objects that map JSON responses onto form
//! fields, and form designs whose elements bind to those objects. No real
//! network calls are made; a mock simulator synthesizes response payloads
//! so path and formatter configuration can be verified offline.
//!
//! ## Features
//!
//! - **Path Addressing**: dotted-path reads, writes and envelope wrapping
//!   over JSON values
//! - **Value Formatting**: date, currency, boolean and case transforms
//! - **Template Variables**: `${name}` extraction with login-bound names
//!   filtered out
//! - **Mock Simulator**: per-mapping synthetic records, repeatable or
//!   randomized
//! - **Binding Resolution**: option lists and auto-fill values for bound
//!   form elements
//! - **Validation**: cross-reference and uniqueness checks over loaded
//!   configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use patchbay::config::Settings;
//!
//! fn main() -> anyhow::Result<()> {
//!     let settings = Settings::new()?;
//!     let registry = settings.into_registry();
//!     println!("{} api objects configured", registry.objects().len());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **Domain**: entity types and the pure path/format/template operations
//! - **Adapters**: simulator, binding resolution, in-memory registry
//! - **Config**: file loading, per-entity directories, validation

pub mod adapters;
pub mod cli;
pub mod config;
pub mod domain;
