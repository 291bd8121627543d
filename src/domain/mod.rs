pub mod common;
pub mod donation;
pub mod event;
pub mod member;
pub mod message;
pub mod seed;

pub use common::{
    Displayable, Identifiable, Page, PageRequest, Resource, ResourceNames, WireEnum,
};
pub use donation::{format_usd, Donation, DonationStatus};
pub use event::{Event, EventStatus};
pub use member::{AttendanceStatus, Gender, MaritalStatus, MemberRecord, MemberStatus};
pub use message::{preview_of, Message, MessageType};
pub use seed::Seeded;
