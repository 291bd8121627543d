//! Sample community data served by the in-memory store.

use chrono::NaiveDate;

use super::{
    AttendanceStatus, Donation, DonationStatus, Event, EventStatus, MemberRecord, Message,
    MessageType,
};

/// Record types that ship with a sample dataset.
pub trait Seeded: Sized {
    fn seed() -> Vec<Self>;
}

fn day(year: i32, month: u32, date: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, date).unwrap_or_default()
}

struct MemberSeed {
    id: &'static str,
    first: &'static str,
    last: &'static str,
    email: &'static str,
    phone: &'static str,
    address: &'static str,
    joined: &'static str,
    status: Option<AttendanceStatus>,
    last_attendance: Option<&'static str>,
    notes: Option<&'static str>,
}

const MEMBERS: &[MemberSeed] = &[
    MemberSeed {
        id: "1",
        first: "Alice",
        last: "Johnson",
        email: "alice@example.com",
        phone: "(555) 123-4567",
        address: "123 Main St, Anytown, USA",
        joined: "2023-01-15",
        status: Some(AttendanceStatus::Active),
        last_attendance: Some("2023-12-10"),
        notes: Some("Active volunteer in youth ministry"),
    },
    MemberSeed {
        id: "2",
        first: "Bob",
        last: "Smith",
        email: "bob@example.com",
        phone: "(555) 234-5678",
        address: "456 Oak Ave, Somewhere, USA",
        joined: "2023-03-03",
        status: Some(AttendanceStatus::Active),
        last_attendance: Some("2023-12-03"),
        notes: None,
    },
    MemberSeed {
        id: "3",
        first: "Carol",
        last: "Williams",
        email: "carol@example.com",
        phone: "(555) 345-6789",
        address: "789 Pine St, Nowhere, USA",
        joined: "2022-06-12",
        status: Some(AttendanceStatus::Inactive),
        last_attendance: Some("2023-09-15"),
        notes: Some("Moved to another city"),
    },
    MemberSeed {
        id: "4",
        first: "David",
        last: "Brown",
        email: "david@example.com",
        phone: "(555) 456-7890",
        address: "",
        joined: "2023-11-05",
        status: Some(AttendanceStatus::Active),
        last_attendance: Some("2023-12-11"),
        notes: None,
    },
    MemberSeed {
        id: "5",
        first: "Eva",
        last: "Martinez",
        email: "eva@example.com",
        phone: "(555) 567-8901",
        address: "",
        joined: "2023-12-01",
        status: None,
        last_attendance: None,
        notes: None,
    },
];

impl Seeded for MemberRecord {
    fn seed() -> Vec<Self> {
        MEMBERS
            .iter()
            .map(|seed| MemberRecord {
                id: Some(seed.id.to_string()),
                first_name: seed.first.to_string(),
                last_name: seed.last.to_string(),
                email_address: seed.email.to_string(),
                primary_phone: seed.phone.to_string(),
                residing_address: seed.address.to_string(),
                join_date: Some(seed.joined.to_string()),
                attendance_status: seed.status,
                last_attendance: seed.last_attendance.map(str::to_string),
                notes: seed.notes.map(str::to_string),
                ..MemberRecord::default()
            })
            .collect()
    }
}

#[allow(clippy::too_many_arguments)]
fn event(
    id: &str,
    name: &str,
    description: &str,
    date: NaiveDate,
    (time, end_time): (&str, &str),
    location: &str,
    capacity: Option<u32>,
    attendees: u32,
    status: EventStatus,
    organizer: &str,
) -> Event {
    Event {
        id: Some(id.to_string()),
        name: name.to_string(),
        description: description.to_string(),
        date,
        time: time.to_string(),
        end_time: Some(end_time.to_string()),
        location: location.to_string(),
        capacity,
        attendees,
        status,
        organizer: Some(organizer.to_string()),
    }
}

impl Seeded for Event {
    fn seed() -> Vec<Self> {
        vec![
            event(
                "1",
                "Weekly Meeting",
                "Our regular weekly gathering for fellowship and worship.",
                day(2023, 12, 15),
                ("10:00 AM", "11:30 AM"),
                "Main Hall",
                Some(100),
                45,
                EventStatus::Upcoming,
                "Alice Johnson",
            ),
            event(
                "2",
                "Volunteer Day",
                "Join us as we serve our local community through various projects.",
                day(2023, 12, 18),
                ("9:00 AM", "2:00 PM"),
                "Community Center",
                None,
                20,
                EventStatus::Upcoming,
                "Bob Smith",
            ),
            event(
                "3",
                "Fundraising Dinner",
                "Annual fundraising dinner to support our mission work.",
                day(2023, 12, 22),
                ("6:30 PM", "9:00 PM"),
                "Grand Ballroom",
                Some(150),
                120,
                EventStatus::Upcoming,
                "Carol Williams",
            ),
            event(
                "4",
                "Board Meeting",
                "Monthly meeting of the board of directors.",
                day(2023, 11, 30),
                ("7:00 PM", "8:30 PM"),
                "Conference Room",
                None,
                12,
                EventStatus::Past,
                "David Brown",
            ),
            event(
                "5",
                "Youth Group",
                "Weekly gathering for teenagers with games, music, and discussion.",
                day(2023, 12, 1),
                ("6:00 PM", "8:00 PM"),
                "Youth Center",
                None,
                35,
                EventStatus::Past,
                "Eva Martinez",
            ),
        ]
    }
}

impl Seeded for Donation {
    fn seed() -> Vec<Self> {
        let rows: [(&str, &str, f64, NaiveDate, &str, &str, bool, Option<&str>); 5] = [
            ("1", "Alice Johnson", 100.0, day(2023, 12, 10), "Credit Card", "General Fund", true, None),
            ("2", "Bob Smith", 500.0, day(2023, 12, 5), "Bank Transfer", "Building Fund", true, None),
            (
                "3",
                "Carol Williams",
                50.0,
                day(2023, 12, 1),
                "PayPal",
                "Youth Ministry",
                false,
                Some("Monthly recurring donation"),
            ),
            ("4", "David Brown", 250.0, day(2023, 11, 28), "Check", "Missions", true, None),
            ("5", "Eva Martinez", 75.0, day(2023, 11, 25), "Credit Card", "General Fund", true, None),
        ];
        rows.into_iter()
            .map(
                |(id, donor, amount, date, method, category, receipt_sent, notes)| Donation {
                    id: Some(id.to_string()),
                    donor: donor.to_string(),
                    amount,
                    date,
                    method: method.to_string(),
                    category: category.to_string(),
                    status: DonationStatus::Completed,
                    notes: notes.map(str::to_string),
                    receipt_sent,
                },
            )
            .collect()
    }
}

impl Seeded for Message {
    fn seed() -> Vec<Self> {
        let message = |id: &str,
                       sender: &str,
                       recipient: &str,
                       subject: &str,
                       content: &str,
                       preview: &str,
                       date: NaiveDate,
                       read: bool,
                       message_type: MessageType| Message {
            id: Some(id.to_string()),
            sender: sender.to_string(),
            recipients: vec![recipient.to_string()],
            subject: subject.to_string(),
            content: content.to_string(),
            preview: preview.to_string(),
            date,
            read,
            message_type,
            attachments: Vec::new(),
        };

        let mut reminder = message(
            "4",
            "David Brown",
            "board@members.com",
            "Meeting Reminder",
            "Don't forget about our board meeting tomorrow at 7 PM in the conference room. We'll be discussing the budget for the upcoming year and planning for the annual fundraiser. Please review the attached documents before the meeting. Looking forward to seeing everyone there.",
            "Don't forget about our board meeting tomorrow at 7 PM...",
            day(2023, 12, 5),
            true,
            MessageType::Announcement,
        );
        reminder.attachments.push("budget_2024.pdf".to_string());

        vec![
            message(
                "1",
                "Alice Johnson",
                "all@members.com",
                "Weekly Announcement",
                "Here are the updates for this week's activities and events. We have our regular meeting on Friday at 10 AM, followed by the volunteer day on Monday. Please let us know if you can participate in the volunteer day by responding to this message. Looking forward to seeing everyone!",
                "Here are the updates for this week's activities and events...",
                day(2023, 12, 12),
                true,
                MessageType::Announcement,
            ),
            message(
                "2",
                "Bob Smith",
                "prayer@team.com",
                "Prayer Request",
                "Please keep my family in your prayers as we navigate some health challenges. My mother is scheduled for surgery next week, and we would appreciate your support during this time. Thank you for your kindness and prayers.",
                "Please keep my family in your prayers as we...",
                day(2023, 12, 10),
                false,
                MessageType::Prayer,
            ),
            message(
                "3",
                "Carol Williams",
                "volunteers@list.com",
                "Volunteer Opportunity",
                "We need volunteers for the upcoming community service day on December 18th. We'll be working on various projects around the community center from 9 AM to 2 PM. Lunch will be provided. Please sign up if you're available to help. It's a great way to serve our community!",
                "We need volunteers for the upcoming community service day...",
                day(2023, 12, 8),
                true,
                MessageType::General,
            ),
            reminder,
            message(
                "5",
                "Eva Martinez",
                "admin@community.com",
                "Thank You",
                "I wanted to express my gratitude for your support during my recent move. The help from the community members made a huge difference, and I'm truly thankful for everyone who volunteered their time and energy. It's wonderful to be part of such a caring community.",
                "I wanted to express my gratitude for your support during...",
                day(2023, 12, 1),
                false,
                MessageType::General,
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Identifiable, MemberStatus};

    #[test]
    fn member_seed_covers_every_status() {
        let members = MemberRecord::seed();
        assert_eq!(members.len(), 5);
        assert_eq!(members[4].status(), MemberStatus::Pending);
        assert_eq!(members[2].status(), MemberStatus::Inactive);
        assert!(members.iter().all(|member| member.id().is_some()));
    }

    #[test]
    fn seeds_keep_sample_sizes() {
        assert_eq!(Event::seed().len(), 5);
        assert_eq!(Donation::seed().len(), 5);
        let messages = Message::seed();
        assert_eq!(messages[3].attachments, vec!["budget_2024.pdf".to_string()]);
    }
}
