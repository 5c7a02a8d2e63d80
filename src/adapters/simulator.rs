//! Mock response simulator.
//!
//! Synthesizes a plausible response payload for an API object without any
//! network access, so path and formatter configuration can be verified
//! against data that exercises every mapping.

use chrono::{Duration, Local};
use fake::faker::internet::en::SafeEmail;
use fake::faker::lorem::en::Word;
use fake::Fake;
use rand::Rng;
use serde_json::{json, Map, Value};
use tracing::debug;
use uuid::Uuid;

use crate::domain::api_object::{ApiObject, FieldMapping};
use crate::domain::formatter::Formatter;
use crate::domain::path::{set_by_path, wrap_by_root_path};

pub const DEFAULT_RECORD_COUNT: usize = 5;

/// Shape class assigned to a mapping before a value is synthesized for it.
///
/// Classification looks at the formatter first, then substring-matches the
/// whole lowercased source path. The match order matters: a field called
/// `invoice_date_amount` is a date, not an amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldKind {
    Date,
    Amount,
    Boolean,
    Email,
    Code,
    Label,
}

fn classify(mapping: &FieldMapping) -> FieldKind {
    let path = mapping.source_path.to_lowercase();
    if matches!(mapping.formatter, Formatter::DateSlash | Formatter::DateDash)
        || path.contains("date")
        || path.contains("time")
    {
        return FieldKind::Date;
    }
    if mapping.formatter == Formatter::Currency
        || path.contains("amount")
        || path.contains("price")
    {
        return FieldKind::Amount;
    }
    if mapping.formatter == Formatter::BooleanYn
        || path.starts_with("is")
        || path.starts_with("has")
    {
        return FieldKind::Boolean;
    }
    if path.contains("email") || path.contains("mail") {
        return FieldKind::Email;
    }
    if path.contains("id") || path.contains("code") {
        return FieldKind::Code;
    }
    FieldKind::Label
}

#[derive(Debug, Clone, Copy)]
pub struct SimulatorOptions {
    pub records: usize,
    /// When set, label/email/code/amount values come from random
    /// generators instead of the repeatable index-derived forms.
    pub randomize: bool,
}

impl Default for SimulatorOptions {
    fn default() -> Self {
        Self {
            records: DEFAULT_RECORD_COUNT,
            randomize: false,
        }
    }
}

/// Generates mock response payloads for API objects.
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    options: SimulatorOptions,
}

impl Simulator {
    pub fn new(options: SimulatorOptions) -> Self {
        Self { options }
    }

    /// Produce the record array for `object`: one record per index, every
    /// mapping's `source_path` resolvable on every record.
    pub fn generate_records(&self, object: &ApiObject) -> Vec<Value> {
        let count = self.options.records.max(1);
        debug!(
            api_object = %object.id,
            records = count,
            mappings = object.mappings.len(),
            "generating mock records"
        );
        (0..count).map(|i| self.generate_record(object, i)).collect()
    }

    /// Produce the full simulated response: records wrapped back into the
    /// envelope implied by `response_root_path`, inside the status wrapper
    /// the simulator displays.
    pub fn simulate(&self, object: &ApiObject) -> Value {
        let records = Value::Array(self.generate_records(object));
        let data = match &object.response_root_path {
            Some(path) => wrap_by_root_path(records, path),
            None => records,
        };
        json!({
            "Status": "Success",
            "StatusCode": 200,
            "Data": data,
            "Message": "Simulation Completed",
        })
    }

    fn generate_record(&self, object: &ApiObject, index: usize) -> Value {
        if object.mappings.is_empty() {
            // Nothing configured yet: still give the caller something to show.
            return json!({
                "id": format!("{}", index + 1),
                "value": format!("Sample Data {}", index + 1),
            });
        }
        let mut record = Value::Object(Map::new());
        for mapping in &object.mappings {
            let value = self.field_value(mapping, index);
            set_by_path(&mut record, &mapping.source_path, value);
        }
        record
    }

    fn field_value(&self, mapping: &FieldMapping, index: usize) -> Value {
        match classify(mapping) {
            FieldKind::Date => {
                let day = Local::now().date_naive() - Duration::days(index as i64);
                json!(day.format("%Y-%m-%d").to_string())
            }
            FieldKind::Amount => {
                if self.options.randomize {
                    json!(rand::thread_rng().gen_range(100..100_000))
                } else {
                    json!((index + 1) * 1000 + 500)
                }
            }
            FieldKind::Boolean => {
                if index % 2 == 0 {
                    json!("Y")
                } else {
                    json!("N")
                }
            }
            FieldKind::Email => {
                if self.options.randomize {
                    json!(SafeEmail().fake::<String>())
                } else {
                    json!(format!("user{}@example.com", index + 1))
                }
            }
            FieldKind::Code => {
                if self.options.randomize {
                    json!(Uuid::new_v4().simple().to_string()[..8].to_uppercase())
                } else {
                    json!(format!("CODE-{:03}", index + 1))
                }
            }
            FieldKind::Label => {
                if self.options.randomize {
                    let word: String = Word().fake();
                    json!(format!("{} {}", word, index + 1))
                } else {
                    json!(format!("{} {}", mapping.display_name(), index + 1))
                }
            }
        }
    }
}
