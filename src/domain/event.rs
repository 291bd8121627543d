use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::common::{
    deserialize_optional_id, Displayable, Identifiable, Resource, ResourceNames, WireEnum,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    #[default]
    Upcoming,
    Past,
    Canceled,
}

impl WireEnum for EventStatus {
    const ALL: &'static [Self] = &[EventStatus::Upcoming, EventStatus::Past, EventStatus::Canceled];

    fn as_wire(&self) -> &'static str {
        match self {
            EventStatus::Upcoming => "upcoming",
            EventStatus::Past => "past",
            EventStatus::Canceled => "canceled",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            EventStatus::Upcoming => "Upcoming",
            EventStatus::Past => "Past",
            EventStatus::Canceled => "Canceled",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(
        default,
        deserialize_with = "deserialize_optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    pub date: NaiveDate,
    pub time: String,
    #[serde(default)]
    pub end_time: Option<String>,
    pub location: String,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub attendees: u32,
    #[serde(default)]
    pub status: EventStatus,
    #[serde(default)]
    pub organizer: Option<String>,
}

impl Event {
    /// `"10:00 AM - 11:30 AM"`, or just the start time.
    pub fn time_range(&self) -> String {
        match self.end_time.as_deref().filter(|end| !end.is_empty()) {
            Some(end) => format!("{} - {}", self.time, end),
            None => self.time.clone(),
        }
    }

    pub fn attendance_label(&self) -> String {
        match self.capacity {
            Some(capacity) => format!("{}/{}", self.attendees, capacity),
            None => self.attendees.to_string(),
        }
    }
}

impl Identifiable for Event {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn assign_id(&mut self, id: String) {
        self.id = Some(id);
    }
}

impl Displayable for Event {
    fn display_label(&self) -> String {
        format!("{} ({})", self.name, self.date.format("%b %-d, %Y"))
    }
}

impl Resource for Event {
    const NAMES: ResourceNames = ResourceNames {
        collection: "events",
        item: "event",
        label: "event",
    };
}
