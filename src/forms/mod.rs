//! Form state, step validation and the wizard state machine, plus the
//! concrete member, event, donation and message forms.

pub mod definition;
pub mod donation;
pub mod event;
pub mod mapping;
pub mod member;
pub mod message;
pub mod notice;
pub mod record;
pub mod validation;
pub mod wizard;

pub use definition::{
    ChoiceOption, FieldKind, FieldSpec, RequiredField, StepDefinition, WizardDefinition,
};
pub use donation::{DonationForm, DONATION_WIZARD};
pub use event::{EventForm, EVENT_WIZARD};
pub use mapping::RecordMapping;
pub use member::{MemberForm, MEMBER_WIZARD};
pub use message::{MessageForm, MESSAGE_WIZARD};
pub use notice::{Notice, NoticeLevel};
pub use record::{FieldValue, FormRecord};
pub use validation::{validate_step, ValidationResult};
pub use wizard::{
    FieldInput, StepOutcome, SubmitGate, SubmitHandler, SubmitOutcome, WizardController,
    WizardEffect,
};
