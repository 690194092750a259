use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{Error, FieldValue, Result};

/// Ordered list of unique field names, established once per sequence.
///
/// Every record of a sequence shares one `Schema` behind an `Arc`, so the
/// schema-uniformity invariant the logger relies on holds by construction
/// rather than by runtime convention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSchema")]
pub struct Schema {
    fields: Vec<String>,
}

/// Unvalidated wire form of [`Schema`]; deserialization funnels through
/// [`Schema::new`] so the uniqueness invariant survives serde input.
#[derive(Deserialize)]
struct RawSchema {
    fields: Vec<String>,
}

impl TryFrom<RawSchema> for Schema {
    type Error = Error;

    fn try_from(raw: RawSchema) -> Result<Self> {
        Self::new(raw.fields)
    }
}

impl Schema {
    /// Build a schema from field names in their final column order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if a name appears twice.
    pub fn new(fields: Vec<String>) -> Result<Self> {
        for (i, name) in fields.iter().enumerate() {
            if fields[..i].contains(name) {
                return Err(Error::Configuration(format!(
                    "duplicate field name {name:?}"
                )));
            }
        }
        Ok(Self { fields })
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field names in column order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Column index of `name`, if it belongs to the schema.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }
}

/// One trial: a value per schema field, stored in column order.
///
/// Design and identity fields are set by the sequence builder; response
/// fields start as [`FieldValue::Empty`] and are overwritten by the driver
/// once the response is observed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTrialRecord")]
pub struct TrialRecord {
    schema: Arc<Schema>,
    values: Vec<FieldValue>,
}

/// Unvalidated wire form of [`TrialRecord`]; deserialization checks the
/// values-per-field invariant that `get`/`set` indexing relies on.
#[derive(Deserialize)]
struct RawTrialRecord {
    schema: Arc<Schema>,
    values: Vec<FieldValue>,
}

impl TryFrom<RawTrialRecord> for TrialRecord {
    type Error = Error;

    fn try_from(raw: RawTrialRecord) -> Result<Self> {
        if raw.values.len() != raw.schema.len() {
            return Err(Error::Configuration(format!(
                "record carries {} values for {} schema fields",
                raw.values.len(),
                raw.schema.len()
            )));
        }
        Ok(Self {
            schema: raw.schema,
            values: raw.values,
        })
    }
}

impl TrialRecord {
    /// A record with every field set to the empty placeholder.
    pub fn new(schema: Arc<Schema>) -> Self {
        let values = vec![FieldValue::Empty; schema.len()];
        Self { schema, values }
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.schema.position(name).map(|i| &self.values[i])
    }

    /// Overwrite a field by name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownField`] for a name outside the schema.
    pub fn set(&mut self, name: &str, value: impl Into<FieldValue>) -> Result<()> {
        let i = self
            .schema
            .position(name)
            .ok_or_else(|| Error::UnknownField(name.to_owned()))?;
        self.values[i] = value.into();
        Ok(())
    }

    /// Values in schema order.
    pub fn values(&self) -> &[FieldValue] {
        &self.values
    }

    /// `(name, value)` pairs in schema order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.schema
            .fields()
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema(names: &[&str]) -> Arc<Schema> {
        Arc::new(Schema::new(names.iter().map(|s| (*s).to_owned()).collect()).unwrap())
    }

    #[test]
    fn duplicate_field_names_rejected() {
        let result = Schema::new(vec!["a".into(), "b".into(), "a".into()]);
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn new_record_is_all_placeholders() {
        let record = TrialRecord::new(schema(&["condition", "answer"]));
        assert!(record.values().iter().all(FieldValue::is_empty));
    }

    #[test]
    fn set_and_get_by_name() {
        let mut record = TrialRecord::new(schema(&["condition", "answer"]));
        record.set("condition", "A").unwrap();
        record.set("answer", "left").unwrap();
        assert_eq!(record.get("condition"), Some(&FieldValue::from("A")));
        assert_eq!(record.get("answer"), Some(&FieldValue::from("left")));
        assert_eq!(record.get("missing"), None);
    }

    #[test]
    fn set_unknown_field_errors() {
        let mut record = TrialRecord::new(schema(&["condition"]));
        let result = record.set("rt", 0.5);
        assert!(matches!(result, Err(Error::UnknownField(name)) if name == "rt"));
    }

    #[test]
    fn deserialization_rejects_mismatched_value_count() {
        let short = r#"{"schema":{"fields":["a","b"]},"values":[{"Int":1}]}"#;
        assert!(serde_json::from_str::<TrialRecord>(short).is_err());

        let ok = r#"{"schema":{"fields":["a","b"]},"values":[{"Int":1},{"Int":2}]}"#;
        let record: TrialRecord = serde_json::from_str(ok).unwrap();
        assert_eq!(record.get("b"), Some(&FieldValue::Int(2)));
    }

    #[test]
    fn deserialization_rejects_duplicate_schema_fields() {
        let dup = r#"{"fields":["a","a"]}"#;
        assert!(serde_json::from_str::<Schema>(dup).is_err());
    }

    #[test]
    fn record_round_trips_through_serde() {
        let mut record = TrialRecord::new(schema(&["condition", "rt"]));
        record.set("condition", "A").unwrap();
        record.set("rt", 0.25).unwrap();
        let json = serde_json::to_string(&record).unwrap();
        let back: TrialRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn fields_iterate_in_schema_order() {
        let mut record = TrialRecord::new(schema(&["a", "b", "c"]));
        record.set("b", 2i64).unwrap();
        let names: Vec<&str> = record.fields().map(|(name, _)| name).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }
}
