use std::fmt;

use indexmap::{IndexMap, IndexSet};

use super::definition::{FieldKind, FieldSpec};
use crate::errors::{CommunityError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Date(String),
    Choice(String),
    Flag(bool),
    Set(IndexSet<String>),
    Number(i64),
}

impl FieldValue {
    fn blank(kind: &FieldKind) -> Self {
        match kind {
            FieldKind::Text => FieldValue::Text(String::new()),
            FieldKind::Date => FieldValue::Date(String::new()),
            FieldKind::Choice(_) => FieldValue::Choice(String::new()),
            FieldKind::Flag => FieldValue::Flag(false),
            FieldKind::Set(_) => FieldValue::Set(IndexSet::new()),
            FieldKind::Number => FieldValue::Number(0),
        }
    }

    /// Empty after trimming. Checkboxes and numbers always hold a value.
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Text(text) | FieldValue::Date(text) | FieldValue::Choice(text) => {
                text.trim().is_empty()
            }
            FieldValue::Set(items) => items.is_empty(),
            FieldValue::Flag(_) | FieldValue::Number(_) => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) | FieldValue::Date(text) | FieldValue::Choice(text) => {
                Some(text)
            }
            _ => None,
        }
    }

    fn fits(&self, kind: &FieldKind) -> bool {
        matches!(
            (self, kind),
            (FieldValue::Text(_), FieldKind::Text)
                | (FieldValue::Date(_), FieldKind::Date)
                | (FieldValue::Choice(_), FieldKind::Choice(_))
                | (FieldValue::Flag(_), FieldKind::Flag)
                | (FieldValue::Set(_), FieldKind::Set(_))
                | (FieldValue::Number(_), FieldKind::Number)
        )
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(text) | FieldValue::Date(text) | FieldValue::Choice(text) => {
                f.write_str(text)
            }
            FieldValue::Flag(true) => f.write_str("yes"),
            FieldValue::Flag(false) => f.write_str("no"),
            FieldValue::Set(items) => {
                let joined: Vec<&str> = items.iter().map(String::as_str).collect();
                f.write_str(&joined.join(", "))
            }
            FieldValue::Number(value) => write!(f, "{value}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    spec: FieldSpec,
    value: FieldValue,
}

/// Flat field-name to value mapping backing a form. The set of keys is fixed
/// when the record is built; mutators only replace values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormRecord {
    entries: IndexMap<&'static str, Entry>,
}

impl FormRecord {
    pub fn from_specs(specs: impl IntoIterator<Item = FieldSpec>) -> Self {
        let entries = specs
            .into_iter()
            .map(|spec| {
                let value = FieldValue::blank(&spec.kind);
                (spec.name, Entry { spec, value })
            })
            .collect();
        Self { entries }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn spec(&self, name: &str) -> Result<&FieldSpec> {
        self.entries
            .get(name)
            .map(|entry| &entry.spec)
            .ok_or_else(|| CommunityError::unknown_field(name))
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.entries.get(name).map(|entry| &entry.value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> {
        self.entries.iter().map(|(name, entry)| (*name, &entry.value))
    }

    /// Text content of a text, date or choice field; empty otherwise.
    pub fn text(&self, name: &str) -> &str {
        self.get(name).and_then(FieldValue::as_text).unwrap_or("")
    }

    /// `None` when the field is blank, so optional values serialize as null.
    pub fn optional_text(&self, name: &str) -> Option<String> {
        let text = self.text(name);
        if text.trim().is_empty() {
            None
        } else {
            Some(text.to_string())
        }
    }

    pub fn flag(&self, name: &str) -> bool {
        matches!(self.get(name), Some(FieldValue::Flag(true)))
    }

    pub fn number(&self, name: &str) -> i64 {
        match self.get(name) {
            Some(FieldValue::Number(value)) => *value,
            _ => 0,
        }
    }

    pub fn items(&self, name: &str) -> Vec<String> {
        match self.get(name) {
            Some(FieldValue::Set(items)) => items.iter().cloned().collect(),
            _ => Vec::new(),
        }
    }

    fn entry_mut(&mut self, name: &str) -> Result<&mut Entry> {
        self.entries
            .get_mut(name)
            .ok_or_else(|| CommunityError::unknown_field(name))
    }

    /// Replaces the value of `name`; every other field is untouched.
    pub fn set_field(&mut self, name: &str, value: FieldValue) -> Result<()> {
        let entry = self.entry_mut(name)?;
        if !value.fits(&entry.spec.kind) {
            return Err(CommunityError::invalid_field(
                name,
                format!("expected a {} value", entry.spec.kind.describe()),
            ));
        }
        if let (FieldValue::Choice(raw), FieldKind::Choice(options)) = (&value, &entry.spec.kind) {
            if !raw.is_empty() && !options.iter().any(|option| option.value == raw) {
                return Err(CommunityError::invalid_field(
                    name,
                    format!("`{raw}` is not one of the available options"),
                ));
            }
        }
        entry.value = value;
        Ok(())
    }

    /// Text-style assignment for text, date and choice fields. Choices accept
    /// either the stored value or its label.
    pub fn set_text(&mut self, name: &str, raw: impl Into<String>) -> Result<()> {
        let raw = raw.into();
        let kind = self.spec(name)?.kind;
        let value = match kind {
            FieldKind::Text => FieldValue::Text(raw),
            FieldKind::Date => FieldValue::Date(raw),
            FieldKind::Choice(options) => {
                let needle = raw.trim();
                let matched = options.iter().find(|option| {
                    option.value.eq_ignore_ascii_case(needle)
                        || option.label.eq_ignore_ascii_case(needle)
                });
                match matched {
                    Some(option) => FieldValue::Choice(option.value.to_string()),
                    None => FieldValue::Choice(raw),
                }
            }
            other => {
                return Err(CommunityError::invalid_field(
                    name,
                    format!("cannot assign text to a {} field", other.describe()),
                ))
            }
        };
        self.set_field(name, value)
    }

    /// Checkbox toggle.
    pub fn set_flag(&mut self, name: &str, checked: bool) -> Result<()> {
        self.set_field(name, FieldValue::Flag(checked))
    }

    /// Adds or removes `item` from a multi-select. Idempotent both ways.
    pub fn toggle_set_membership(&mut self, name: &str, item: &str, present: bool) -> Result<()> {
        let entry = self.entry_mut(name)?;
        let FieldValue::Set(items) = &mut entry.value else {
            return Err(CommunityError::invalid_field(
                name,
                format!("expected a multi-select, found a {}", entry.spec.kind.describe()),
            ));
        };
        if present {
            items.insert(item.to_string());
        } else {
            items.shift_remove(item);
        }
        Ok(())
    }

    /// Stores the integer parsed from `raw`, or `0` when it does not parse.
    pub fn set_numeric_field(&mut self, name: &str, raw: &str) -> Result<()> {
        let parsed = raw.trim().parse::<i64>().unwrap_or(0);
        self.set_field(name, FieldValue::Number(parsed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::definition::ChoiceOption;

    const COLORS: &[ChoiceOption] = &[
        ChoiceOption::new("RED", "Red"),
        ChoiceOption::new("BLUE", "Blue"),
    ];
    const TAGS: &[&str] = &["a", "b", "c"];

    fn record() -> FormRecord {
        FormRecord::from_specs([
            FieldSpec::text("name", "Name"),
            FieldSpec::date("born", "Born"),
            FieldSpec::new("color", "Color", FieldKind::Choice(COLORS)),
            FieldSpec::flag("subscribed", "Subscribed"),
            FieldSpec::new("tags", "Tags", FieldKind::Set(TAGS)),
            FieldSpec::new("years", "Years", FieldKind::Number),
        ])
    }

    #[test]
    fn set_field_changes_only_the_named_field() {
        let mut form = record();
        let before = form.clone();
        form.set_field("name", FieldValue::Text("Ruth".into())).unwrap();
        assert_eq!(form.text("name"), "Ruth");
        for (name, value) in before.iter().filter(|(name, _)| *name != "name") {
            assert_eq!(form.get(name), Some(value));
        }
    }

    #[test]
    fn unknown_field_is_rejected() {
        let mut form = record();
        let err = form.set_text("nickname", "x").unwrap_err();
        assert!(matches!(err, CommunityError::InvalidField { field, .. } if field == "nickname"));
    }

    #[test]
    fn mismatched_kind_is_rejected() {
        let mut form = record();
        assert!(form.set_field("name", FieldValue::Flag(true)).is_err());
        assert!(form.set_text("subscribed", "yes").is_err());
        assert!(form.set_text("color", "GREEN").is_err());
    }

    #[test]
    fn choice_accepts_labels() {
        let mut form = record();
        form.set_text("color", "blue").unwrap();
        assert_eq!(form.text("color"), "BLUE");
    }

    #[test]
    fn toggle_is_idempotent() {
        let mut form = record();
        form.toggle_set_membership("tags", "b", true).unwrap();
        form.toggle_set_membership("tags", "b", true).unwrap();
        assert_eq!(form.items("tags"), vec!["b".to_string()]);
        form.toggle_set_membership("tags", "b", false).unwrap();
        form.toggle_set_membership("tags", "b", false).unwrap();
        assert!(form.items("tags").is_empty());
    }

    #[test]
    fn toggles_keep_insertion_order() {
        let mut form = record();
        for item in ["c", "a", "b"] {
            form.toggle_set_membership("tags", item, true).unwrap();
        }
        assert_eq!(form.items("tags"), vec!["c", "a", "b"]);
    }

    #[test]
    fn numeric_field_falls_back_to_zero() {
        let mut form = record();
        form.set_numeric_field("years", " 12 ").unwrap();
        assert_eq!(form.number("years"), 12);
        form.set_numeric_field("years", "abc").unwrap();
        assert_eq!(form.number("years"), 0);
        form.set_numeric_field("years", "").unwrap();
        assert_eq!(form.number("years"), 0);
    }

    #[test]
    fn optional_text_treats_whitespace_as_missing() {
        let mut form = record();
        form.set_text("name", "   ").unwrap();
        assert_eq!(form.optional_text("name"), None);
        form.set_text("born", "1990-04-01").unwrap();
        assert_eq!(form.optional_text("born").as_deref(), Some("1990-04-01"));
    }
}
