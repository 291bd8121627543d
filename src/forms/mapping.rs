use chrono::{Local, NaiveDate};

use super::definition::WizardDefinition;
use super::notice::Notice;
use super::record::FormRecord;
use crate::domain::WireEnum;
use crate::errors::{CommunityError, Result};
use crate::storage::StoredRecord;

/// Two-way conversion between a wizard's [`FormRecord`] and the record type
/// the backend stores.
pub trait RecordMapping: Send + Sync + 'static {
    type Remote: StoredRecord;

    /// Listing route shown after a successful save.
    const LISTING_ROUTE: &'static str;

    fn definition() -> &'static WizardDefinition;

    /// Fresh record with the form's default values filled in.
    fn defaults() -> FormRecord;

    /// Remote shape of `record`. `record_id` is embedded when updating.
    fn to_remote(record: &FormRecord, record_id: Option<&str>) -> Result<Self::Remote>;

    /// Form prefilled from a stored record, defaults standing in for gaps.
    fn from_remote(remote: &Self::Remote) -> Result<FormRecord>;

    fn created_notice(record: &FormRecord) -> Notice;

    fn updated_notice(record: &FormRecord) -> Notice {
        Self::created_notice(record)
    }

    /// Shown when a save fails without a usable server message.
    fn failure_fallback() -> &'static str {
        "Something went wrong. Please try again."
    }
}

pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub(crate) fn iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub(crate) fn parse_date(record: &FormRecord, field: &str) -> Result<NaiveDate> {
    let raw = record.text(field).trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        CommunityError::Validation(format!("`{raw}` is not a valid date (expected YYYY-MM-DD)"))
    })
}

/// Enumeration held by a choice field, in its wire spelling.
pub(crate) fn wire_choice<E: WireEnum>(record: &FormRecord, field: &str) -> Result<E> {
    let raw = record.text(field);
    E::from_wire(raw)
        .ok_or_else(|| CommunityError::Validation(format!("`{raw}` is not a valid {field}")))
}

/// Label of the selected option of a choice field, or the raw value.
pub(crate) fn choice_label(record: &FormRecord, field: &str) -> String {
    let raw = record.text(field);
    record
        .spec(field)
        .ok()
        .and_then(|spec| spec.choice_label(raw))
        .map(str::to_string)
        .unwrap_or_else(|| raw.to_string())
}
