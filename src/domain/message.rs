use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::common::{
    deserialize_optional_id, Displayable, Identifiable, Resource, ResourceNames, WireEnum,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    Announcement,
    Prayer,
    #[default]
    General,
}

impl WireEnum for MessageType {
    const ALL: &'static [Self] = &[
        MessageType::General,
        MessageType::Announcement,
        MessageType::Prayer,
    ];

    fn as_wire(&self) -> &'static str {
        match self {
            MessageType::Announcement => "announcement",
            MessageType::Prayer => "prayer",
            MessageType::General => "general",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            MessageType::Announcement => "Announcement",
            MessageType::Prayer => "Prayer Request",
            MessageType::General => "General",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(
        default,
        deserialize_with = "deserialize_optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    pub sender: String,
    #[serde(default)]
    pub recipients: Vec<String>,
    pub subject: String,
    pub content: String,
    #[serde(default)]
    pub preview: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub read: bool,
    #[serde(rename = "type", default)]
    pub message_type: MessageType,
    #[serde(default)]
    pub attachments: Vec<String>,
}

const PREVIEW_CHARS: usize = 60;

/// First words of a message body, ellipsised when truncated.
pub fn preview_of(content: &str) -> String {
    let trimmed = content.trim();
    if trimmed.chars().count() <= PREVIEW_CHARS {
        return trimmed.to_string();
    }
    let cut: String = trimmed.chars().take(PREVIEW_CHARS).collect();
    let cut = match cut.rfind(' ') {
        Some(idx) if idx > PREVIEW_CHARS / 2 => cut[..idx].to_string(),
        _ => cut,
    };
    let cut = cut
        .trim_end()
        .trim_end_matches(|ch: char| matches!(ch, '.' | ',' | ';'));
    format!("{cut}...")
}

impl Identifiable for Message {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn assign_id(&mut self, id: String) {
        self.id = Some(id);
    }
}

impl Displayable for Message {
    fn display_label(&self) -> String {
        format!("{} ({})", self.subject, self.sender)
    }
}

impl Resource for Message {
    const NAMES: ResourceNames = ResourceNames {
        collection: "messages",
        item: "message",
        label: "message",
    };
}

#[cfg(test)]
mod tests {
    use super::preview_of;

    #[test]
    fn short_content_is_its_own_preview() {
        assert_eq!(preview_of("  Thank you all  "), "Thank you all");
    }

    #[test]
    fn long_content_is_cut_on_a_word() {
        let preview = preview_of(
            "Here are the updates for this week's activities and events. We have our regular meeting",
        );
        assert!(preview.ends_with("..."));
        assert_eq!(
            preview,
            "Here are the updates for this week's activities and events..."
        );
    }
}
