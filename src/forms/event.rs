use super::definition::{FieldKind, FieldSpec, RequiredField, StepDefinition, WizardDefinition};
use super::mapping::{iso, parse_date, RecordMapping};
use super::notice::Notice;
use super::record::{FieldValue, FormRecord};
use crate::domain::{Event, EventStatus};
use crate::errors::{CommunityError, Result};

const DETAILS: &[FieldSpec] = &[
    FieldSpec::text("name", "Event Name"),
    FieldSpec::text("description", "Description"),
    FieldSpec::date("date", "Date"),
    FieldSpec::text("location", "Location"),
    FieldSpec::text("time", "Start Time"),
    FieldSpec::text("endTime", "End Time"),
    FieldSpec::new("capacity", "Capacity", FieldKind::Number),
    FieldSpec::text("organizer", "Organizer"),
];

pub static EVENT_WIZARD: WizardDefinition = WizardDefinition {
    name: "event",
    steps: &[StepDefinition {
        label: "Event Details",
        description: "Enter the details for the new event",
        fields: DETAILS,
        required: &[
            RequiredField::new("name", "Event name is required"),
            RequiredField::new("description", "Description is required"),
            RequiredField::new("date", "Date is required"),
            RequiredField::new("location", "Location is required"),
            RequiredField::new("time", "Start time is required"),
        ],
    }],
    hidden: &[],
};

pub struct EventForm;

impl RecordMapping for EventForm {
    type Remote = Event;

    const LISTING_ROUTE: &'static str = "/events";

    fn definition() -> &'static WizardDefinition {
        &EVENT_WIZARD
    }

    fn defaults() -> FormRecord {
        EVENT_WIZARD.blank_record()
    }

    fn to_remote(record: &FormRecord, record_id: Option<&str>) -> Result<Event> {
        let capacity = match record.number("capacity") {
            0 => None,
            value => Some(u32::try_from(value).map_err(|_| {
                CommunityError::Validation(format!("capacity must be a positive number, got {value}"))
            })?),
        };
        Ok(Event {
            id: record_id.map(str::to_string),
            name: record.text("name").trim().to_string(),
            description: record.text("description").to_string(),
            date: parse_date(record, "date")?,
            time: record.text("time").trim().to_string(),
            end_time: record.optional_text("endTime"),
            location: record.text("location").trim().to_string(),
            capacity,
            attendees: 0,
            status: EventStatus::Upcoming,
            organizer: record.optional_text("organizer"),
        })
    }

    fn from_remote(remote: &Event) -> Result<FormRecord> {
        let mut record = Self::defaults();
        record.set_text("name", remote.name.as_str())?;
        record.set_text("description", remote.description.as_str())?;
        record.set_text("date", iso(remote.date))?;
        record.set_text("location", remote.location.as_str())?;
        record.set_text("time", remote.time.as_str())?;
        record.set_text("endTime", remote.end_time.clone().unwrap_or_default())?;
        record.set_field(
            "capacity",
            FieldValue::Number(remote.capacity.map(i64::from).unwrap_or(0)),
        )?;
        record.set_text("organizer", remote.organizer.clone().unwrap_or_default())?;
        Ok(record)
    }

    fn created_notice(record: &FormRecord) -> Notice {
        Notice::success(
            "Event created",
            format!("{} has been added to your calendar.", record.text("name")),
        )
    }

    fn failure_fallback() -> &'static str {
        "There was an error creating the event. Please try again."
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> FormRecord {
        let mut record = EventForm::defaults();
        for (field, value) in [
            ("name", "Harvest Supper"),
            ("description", "Shared meal"),
            ("date", "2024-10-05"),
            ("location", "Fellowship Hall"),
            ("time", "6:00 PM"),
        ] {
            record.set_text(field, value).unwrap();
        }
        record
    }

    #[test]
    fn zero_capacity_means_unlimited() {
        let event = EventForm::to_remote(&filled(), None).unwrap();
        assert_eq!(event.capacity, None);
        assert_eq!(event.status, EventStatus::Upcoming);
        assert_eq!(iso(event.date), "2024-10-05");
    }

    #[test]
    fn malformed_date_is_a_validation_error() {
        let mut record = filled();
        record.set_text("date", "next friday").unwrap();
        assert!(matches!(
            EventForm::to_remote(&record, None),
            Err(CommunityError::Validation(_))
        ));
    }

    #[test]
    fn all_required_fields_are_checked() {
        let errors = EVENT_WIZARD.validate(1, &EventForm::defaults());
        assert_eq!(errors.len(), 5);
        assert!(EVENT_WIZARD.validate(1, &filled()).is_valid());
    }
}
