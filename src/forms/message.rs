use super::definition::{ChoiceOption, FieldKind, FieldSpec, RequiredField, StepDefinition, WizardDefinition};
use super::mapping::{choice_label, today, wire_choice, RecordMapping};
use super::notice::Notice;
use super::record::FormRecord;
use crate::domain::{preview_of, Message, MessageType, WireEnum};
use crate::errors::Result;

pub const RECIPIENT_OPTIONS: &[ChoiceOption] = &[
    ChoiceOption::new("all", "All Members"),
    ChoiceOption::new("active", "Active Members"),
    ChoiceOption::new("volunteers", "Volunteers"),
    ChoiceOption::new("board", "Board Members"),
    ChoiceOption::new("custom", "Custom Group"),
];

pub const TYPE_OPTIONS: &[ChoiceOption] = &[
    ChoiceOption::new("general", "General"),
    ChoiceOption::new("announcement", "Announcement"),
    ChoiceOption::new("prayer", "Prayer Request"),
];

const COMPOSE: &[FieldSpec] = &[
    FieldSpec::new("recipients", "Recipients", FieldKind::Choice(RECIPIENT_OPTIONS)),
    FieldSpec::new("type", "Message Type", FieldKind::Choice(TYPE_OPTIONS)),
    FieldSpec::text("subject", "Subject"),
    FieldSpec::text("content", "Message"),
];

pub static MESSAGE_WIZARD: WizardDefinition = WizardDefinition {
    name: "message",
    steps: &[StepDefinition {
        label: "Compose Message",
        description: "Send a message to members of your community",
        fields: COMPOSE,
        required: &[
            RequiredField::new("subject", "Subject is required"),
            RequiredField::new("content", "Message is required"),
        ],
    }],
    hidden: &[FieldSpec::text("sender", "Sender")],
};

pub struct MessageForm;

impl MessageForm {
    /// Defaults with the sending account filled in.
    pub fn defaults_from(sender: &str) -> FormRecord {
        let mut record = Self::defaults();
        if let Err(err) = record.set_text("sender", sender) {
            tracing::error!(error = %err, "message sender rejected");
        }
        record
    }
}

impl RecordMapping for MessageForm {
    type Remote = Message;

    const LISTING_ROUTE: &'static str = "/messages";

    fn definition() -> &'static WizardDefinition {
        &MESSAGE_WIZARD
    }

    fn defaults() -> FormRecord {
        let mut record = MESSAGE_WIZARD.blank_record();
        for (field, value) in [("recipients", "all"), ("type", "general")] {
            if let Err(err) = record.set_text(field, value) {
                tracing::error!(field, error = %err, "message default rejected");
            }
        }
        record
    }

    fn to_remote(record: &FormRecord, record_id: Option<&str>) -> Result<Message> {
        let content = record.text("content").to_string();
        Ok(Message {
            id: record_id.map(str::to_string),
            sender: record
                .optional_text("sender")
                .unwrap_or_else(|| "Admin".to_string()),
            recipients: vec![choice_label(record, "recipients")],
            subject: record.text("subject").trim().to_string(),
            preview: preview_of(&content),
            content,
            date: today(),
            read: true,
            message_type: wire_choice::<MessageType>(record, "type")?,
            attachments: Vec::new(),
        })
    }

    fn from_remote(remote: &Message) -> Result<FormRecord> {
        let mut record = Self::defaults();
        record.set_text("sender", remote.sender.as_str())?;
        if let Some(first) = remote.recipients.first() {
            // Addresses outside the group list keep the default group.
            if record.set_text("recipients", first.as_str()).is_err() {
                record.set_text("recipients", "all")?;
            }
        }
        record.set_text("type", remote.message_type.as_wire())?;
        record.set_text("subject", remote.subject.as_str())?;
        record.set_text("content", remote.content.as_str())?;
        Ok(record)
    }

    fn created_notice(_record: &FormRecord) -> Notice {
        Notice::success("Message sent", "Your message has been sent successfully.")
    }

    fn failure_fallback() -> &'static str {
        "There was an error sending the message. Please try again."
    }
}
