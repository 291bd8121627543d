use indexmap::IndexMap;

use super::definition::StepDefinition;
use super::record::FormRecord;

/// Field name to message, in the order the failures were found.
/// Empty means the step is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    errors: IndexMap<String, String>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// Field that should receive focus.
    pub fn first_invalid(&self) -> Option<&str> {
        self.errors.keys().next().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors
            .iter()
            .map(|(field, message)| (field.as_str(), message.as_str()))
    }

    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.insert(field.into(), message.into());
    }

    pub fn clear_field(&mut self, field: &str) {
        self.errors.shift_remove(field);
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }
}

/// Checks the required fields of a single step. Pure and synchronous.
pub fn validate_step(step: &StepDefinition, record: &FormRecord) -> ValidationResult {
    let mut result = ValidationResult::default();
    for required in step.required {
        let blank = record
            .get(required.name)
            .map(|value| value.is_blank())
            .unwrap_or(true);
        if blank {
            result.insert(required.name, required.message);
        }
    }
    result
}
