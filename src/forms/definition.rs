use super::record::FormRecord;
use super::validation::{validate_step, ValidationResult};

/// One entry of a choice field: backend value plus the label shown to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChoiceOption {
    pub value: &'static str,
    pub label: &'static str,
}

impl ChoiceOption {
    pub const fn new(value: &'static str, label: &'static str) -> Self {
        Self { value, label }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// ISO `yyyy-MM-dd`, stored as entered.
    Date,
    Choice(&'static [ChoiceOption]),
    Flag,
    /// Multi-select over a fixed option list.
    Set(&'static [&'static str]),
    Number,
}

impl FieldKind {
    pub fn describe(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Date => "date",
            FieldKind::Choice(_) => "choice",
            FieldKind::Flag => "checkbox",
            FieldKind::Set(_) => "multi-select",
            FieldKind::Number => "number",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self { name, label, kind }
    }

    pub const fn text(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    pub const fn date(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Date)
    }

    pub const fn flag(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Flag)
    }

    pub fn choice_label(&self, value: &str) -> Option<&'static str> {
        match self.kind {
            FieldKind::Choice(options) => options
                .iter()
                .find(|option| option.value == value)
                .map(|option| option.label),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredField {
    pub name: &'static str,
    pub message: &'static str,
}

impl RequiredField {
    pub const fn new(name: &'static str, message: &'static str) -> Self {
        Self { name, message }
    }
}

/// One screen of a wizard. Its 1-based index is its position in
/// [`WizardDefinition::steps`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepDefinition {
    pub label: &'static str,
    pub description: &'static str,
    pub fields: &'static [FieldSpec],
    /// Checked in this order; the first failure receives focus.
    pub required: &'static [RequiredField],
}

impl StepDefinition {
    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|field| field.name == name)
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WizardDefinition {
    pub name: &'static str,
    pub steps: &'static [StepDefinition],
    /// Fields carried by the record but shown on no step.
    pub hidden: &'static [FieldSpec],
}

impl WizardDefinition {
    pub fn total_steps(&self) -> usize {
        self.steps.len()
    }

    pub fn step(&self, index: usize) -> Option<&StepDefinition> {
        index.checked_sub(1).and_then(|offset| self.steps.get(offset))
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.steps
            .iter()
            .flat_map(|step| step.fields.iter())
            .chain(self.hidden.iter())
    }

    /// Record holding every declared field at its blank value.
    pub fn blank_record(&self) -> FormRecord {
        FormRecord::from_specs(self.fields().copied())
    }

    /// Required-field check for one step. Unknown indices validate clean.
    pub fn validate(&self, step_index: usize, record: &FormRecord) -> ValidationResult {
        self.step(step_index)
            .map(|step| validate_step(step, record))
            .unwrap_or_default()
    }
}
