use trialkit_core::FieldValue;

/// Factorial design for one block of trials.
///
/// A design names its factors (each with a finite ordered domain of
/// levels), constant fields merged into every record (subject id, session
/// info), and the response fields that start out as empty placeholders.
/// It is an explicit value handed to [`build_sequence`](crate::build_sequence)
/// rather than module-level state, so the same process can build differing
/// blocks back to back.
#[derive(Debug, Clone)]
pub struct Design {
    factors: Vec<(String, Vec<FieldValue>)>,
    constants: Vec<(String, FieldValue)>,
    response_fields: Vec<String>,
    sequence_field: String,
}

impl Design {
    pub fn new() -> Self {
        Self {
            factors: Vec::new(),
            constants: Vec::new(),
            response_fields: Vec::new(),
            sequence_field: "no".to_owned(),
        }
    }

    /// Add a design variable with its ordered domain of levels.
    #[must_use]
    pub fn factor<V>(mut self, name: impl Into<String>, levels: impl IntoIterator<Item = V>) -> Self
    where
        V: Into<FieldValue>,
    {
        self.factors
            .push((name.into(), levels.into_iter().map(Into::into).collect()));
        self
    }

    /// Add a field carrying the same value in every record.
    #[must_use]
    pub fn constant(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.constants.push((name.into(), value.into()));
        self
    }

    /// Add a response placeholder field, initialized empty and filled in
    /// by the driver once the response is observed.
    #[must_use]
    pub fn response_field(mut self, name: impl Into<String>) -> Self {
        self.response_fields.push(name.into());
        self
    }

    /// Rename the 1-based sequence-number field (default `"no"`).
    #[must_use]
    pub fn sequence_field(mut self, name: impl Into<String>) -> Self {
        self.sequence_field = name.into();
        self
    }

    pub fn factors(&self) -> &[(String, Vec<FieldValue>)] {
        &self.factors
    }

    pub fn constants(&self) -> &[(String, FieldValue)] {
        &self.constants
    }

    pub fn response_fields(&self) -> &[String] {
        &self.response_fields
    }

    pub fn sequence_field_name(&self) -> &str {
        &self.sequence_field
    }

    /// Field names in record column order: factors, constants, sequence
    /// number, then response placeholders.
    pub(crate) fn field_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::with_capacity(
            self.factors.len() + self.constants.len() + 1 + self.response_fields.len(),
        );
        names.extend(self.factors.iter().map(|(name, _)| name.clone()));
        names.extend(self.constants.iter().map(|(name, _)| name.clone()));
        names.push(self.sequence_field.clone());
        names.extend(self.response_fields.iter().cloned());
        names
    }
}

impl Default for Design {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_names_follow_declaration_order() {
        let design = Design::new()
            .factor("opacity", [0.2, 1.0])
            .factor("image", ["cat.jpg", "lion.jpg"])
            .constant("subject", "s01")
            .response_field("answer")
            .response_field("rt");
        assert_eq!(
            design.field_names(),
            ["opacity", "image", "subject", "no", "answer", "rt"]
        );
    }

    #[test]
    fn sequence_field_is_renameable() {
        let design = Design::new().sequence_field("trial_no");
        assert_eq!(design.field_names(), ["trial_no"]);
    }
}
