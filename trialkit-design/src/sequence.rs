use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::warn;
use trialkit_core::{Result, Schema, TrialRecord};

use crate::Design;

/// An ordered, shuffled, numbered list of trial records sharing one schema.
#[derive(Debug, Clone)]
pub struct Sequence {
    schema: Arc<Schema>,
    records: Vec<TrialRecord>,
}

impl Sequence {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub fn records(&self) -> &[TrialRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&TrialRecord> {
        self.records.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut TrialRecord> {
        self.records.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TrialRecord> {
        self.records.iter()
    }

    /// Mutable iteration, for the driver filling in responses in place.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, TrialRecord> {
        self.records.iter_mut()
    }
}

impl<'a> IntoIterator for &'a Sequence {
    type Item = &'a TrialRecord;
    type IntoIter = std::slice::Iter<'a, TrialRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a mut Sequence {
    type Item = &'a mut TrialRecord;
    type IntoIter = std::slice::IterMut<'a, TrialRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter_mut()
    }
}

impl IntoIterator for Sequence {
    type Item = TrialRecord;
    type IntoIter = std::vec::IntoIter<TrialRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

/// Expand `design` into a randomized, numbered trial sequence.
///
/// The cross product of all factor domains is replicated `repetitions`
/// times, merged with the design's constants and response placeholders,
/// shuffled uniformly with `rng`, and numbered 1..N in shuffled order.
/// Pass a seeded [`rand::rngs::StdRng`] for a reproducible sequence.
///
/// `repetitions == 0` yields an empty sequence. An empty factor domain
/// also yields an empty sequence and logs a warning, since that is almost
/// always a mistake in the design rather than an intended block.
///
/// # Errors
///
/// Returns [`trialkit_core::Error::Configuration`] if two fields of the
/// design share a name.
pub fn build_sequence(
    design: &Design,
    repetitions: usize,
    rng: &mut impl Rng,
) -> Result<Sequence> {
    let schema = Arc::new(Schema::new(design.field_names())?);

    if let Some((name, _)) = design.factors().iter().find(|(_, levels)| levels.is_empty()) {
        warn!(factor = %name, "factor domain is empty, building an empty sequence");
        return Ok(Sequence {
            schema,
            records: Vec::new(),
        });
    }

    let combinations: usize = design.factors().iter().map(|(_, l)| l.len()).product();
    let mut records = Vec::with_capacity(combinations * repetitions);

    for _ in 0..repetitions {
        for combination in 0..combinations {
            let mut record = TrialRecord::new(schema.clone());
            // Decode the combination index mixed-radix, last factor
            // varying fastest.
            let mut stride = combinations;
            for (name, levels) in design.factors() {
                stride /= levels.len();
                let level = &levels[(combination / stride) % levels.len()];
                record.set(name, level.clone())?;
            }
            for (name, value) in design.constants() {
                record.set(name, value.clone())?;
            }
            records.push(record);
        }
    }

    records.shuffle(rng);
    let sequence_field = design.sequence_field_name();
    for (i, record) in records.iter_mut().enumerate() {
        record.set(sequence_field, i as i64 + 1)?;
    }

    Ok(Sequence { schema, records })
}
