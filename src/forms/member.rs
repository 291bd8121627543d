//! Four-step member profile wizard and its backend mapping.

use super::definition::{
    ChoiceOption, FieldKind, FieldSpec, RequiredField, StepDefinition, WizardDefinition,
};
use super::mapping::{iso, today, wire_choice, RecordMapping};
use super::notice::Notice;
use super::record::{FieldValue, FormRecord};
use crate::domain::{AttendanceStatus, Gender, MaritalStatus, MemberRecord, WireEnum};
use crate::errors::Result;

pub const GENDER_OPTIONS: &[ChoiceOption] = &[
    ChoiceOption::new("MALE", "Male"),
    ChoiceOption::new("FEMALE", "Female"),
    ChoiceOption::new("OTHER", "Other"),
];

pub const MARITAL_STATUS_OPTIONS: &[ChoiceOption] = &[
    ChoiceOption::new("SINGLE", "Single"),
    ChoiceOption::new("MARRIED", "Married"),
    ChoiceOption::new("DIVORCED", "Divorced"),
    ChoiceOption::new("WIDOWED", "Widowed"),
    ChoiceOption::new("SEPARATED", "Separated"),
];

pub const ATTENDANCE_OPTIONS: &[ChoiceOption] = &[
    ChoiceOption::new("ACTIVE", "Active"),
    ChoiceOption::new("INACTIVE", "Inactive"),
];

pub const MINISTRY_OPTIONS: &[&str] = &[
    "Worship Team",
    "Children's Ministry",
    "Youth Ministry",
    "Media/Tech Team",
    "Hospitality",
    "Prayer Team",
    "Outreach/Missions",
    "Teaching/Education",
    "Administration",
    "Counseling",
    "Visitation",
    "Ushering",
];

pub const SKILL_OPTIONS: &[&str] = &[
    "Music/Instruments",
    "Singing",
    "Public Speaking",
    "Writing",
    "Graphic Design",
    "Video Production",
    "Audio Engineering",
    "Event Planning",
    "Cooking",
    "Carpentry",
    "IT/Technology",
    "Counseling",
    "Finance/Accounting",
    "Medical/Healthcare",
];

const PERSONAL: &[FieldSpec] = &[
    FieldSpec::text("firstName", "First Name"),
    FieldSpec::text("lastName", "Last Name"),
    FieldSpec::text("preferredName", "Preferred Name"),
    FieldSpec::date("dateOfBirth", "Date of Birth"),
    FieldSpec::new("gender", "Gender", FieldKind::Choice(GENDER_OPTIONS)),
    FieldSpec::new(
        "maritalStatus",
        "Marital Status",
        FieldKind::Choice(MARITAL_STATUS_OPTIONS),
    ),
    FieldSpec::text("emailAddress", "Email Address"),
    FieldSpec::text("primaryPhone", "Primary Phone"),
    FieldSpec::text("secondaryPhone", "Secondary Phone"),
    FieldSpec::text("occupation", "Occupation"),
    FieldSpec::text("employer", "Employer"),
    FieldSpec::text("residingAddress", "Address"),
];

const EMERGENCY: &[FieldSpec] = &[
    FieldSpec::text("emergencyContact", "Emergency Contact Name"),
    FieldSpec::text("emergencyContactRelationship", "Relationship"),
];

const CHURCH: &[FieldSpec] = &[
    FieldSpec::date("joinDate", "Date Joined Church"),
    FieldSpec::new(
        "attendanceStatus",
        "Attendance Status",
        FieldKind::Choice(ATTENDANCE_OPTIONS),
    ),
    FieldSpec::date("lastAttendance", "Last Attendance"),
    FieldSpec::flag("baptizedWithHolySpirit", "Baptized with Holy Spirit"),
    FieldSpec::text("previousChurchAffiliation", "Previous Church Affiliation"),
    FieldSpec::new(
        "yearsAttended",
        "Years Attended Previous Church",
        FieldKind::Number,
    ),
];

const INTERESTS: &[FieldSpec] = &[
    FieldSpec::new(
        "ministriesOfInterest",
        "Ministries of Interest",
        FieldKind::Set(MINISTRY_OPTIONS),
    ),
    FieldSpec::new("skills", "Skills", FieldKind::Set(SKILL_OPTIONS)),
];

pub static MEMBER_WIZARD: WizardDefinition = WizardDefinition {
    name: "member",
    steps: &[
        StepDefinition {
            label: "Personal Information",
            description: "Basic details about the member",
            fields: PERSONAL,
            required: &[
                RequiredField::new("firstName", "First name is required"),
                RequiredField::new("lastName", "Last name is required"),
                RequiredField::new("emailAddress", "Email address is required"),
                RequiredField::new("primaryPhone", "Primary phone is required"),
                RequiredField::new("residingAddress", "Address is required"),
            ],
        },
        StepDefinition {
            label: "Emergency Contact",
            description: "Who should we contact in case of emergency?",
            fields: EMERGENCY,
            required: &[
                RequiredField::new("emergencyContact", "Emergency contact is required"),
                RequiredField::new("emergencyContactRelationship", "Relationship is required"),
            ],
        },
        StepDefinition {
            label: "Church Information",
            description: "Details about church involvement",
            fields: CHURCH,
            required: &[],
        },
        StepDefinition {
            label: "Skills & Interests",
            description: "Member's skills and ministry interests",
            fields: INTERESTS,
            required: &[],
        },
    ],
    hidden: &[FieldSpec::flag("isDeleted", "Deleted")],
};

/// Mapping for [`MemberRecord`].
pub struct MemberForm;

fn non_empty(items: Vec<String>) -> Option<Vec<String>> {
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}

impl RecordMapping for MemberForm {
    type Remote = MemberRecord;

    const LISTING_ROUTE: &'static str = "/members";

    fn definition() -> &'static WizardDefinition {
        &MEMBER_WIZARD
    }

    fn defaults() -> FormRecord {
        let mut record = MEMBER_WIZARD.blank_record();
        let today = iso(today());
        let defaults = [
            ("gender", Gender::default().as_wire().to_string()),
            ("maritalStatus", MaritalStatus::default().as_wire().to_string()),
            (
                "attendanceStatus",
                AttendanceStatus::default().as_wire().to_string(),
            ),
            ("joinDate", today.clone()),
            ("lastAttendance", today),
        ];
        for (field, value) in defaults {
            if let Err(err) = record.set_text(field, value) {
                tracing::error!(field, error = %err, "member default rejected");
            }
        }
        record
    }

    fn to_remote(record: &FormRecord, record_id: Option<&str>) -> Result<MemberRecord> {
        Ok(MemberRecord {
            id: None,
            record_id: record_id.map(str::to_string),
            first_name: record.text("firstName").to_string(),
            last_name: record.text("lastName").to_string(),
            preferred_name: record.optional_text("preferredName"),
            date_of_birth: record.optional_text("dateOfBirth"),
            gender: Some(wire_choice::<Gender>(record, "gender")?),
            marital_status: Some(wire_choice::<MaritalStatus>(record, "maritalStatus")?),
            residing_address: record.text("residingAddress").to_string(),
            primary_phone: record.text("primaryPhone").to_string(),
            secondary_phone: record.optional_text("secondaryPhone"),
            email_address: record.text("emailAddress").to_string(),
            occupation: record.optional_text("occupation"),
            employer: record.optional_text("employer"),
            emergency_contact: record.text("emergencyContact").to_string(),
            emergency_contact_relationship: record
                .text("emergencyContactRelationship")
                .to_string(),
            previous_church_affiliation: record.optional_text("previousChurchAffiliation"),
            years_attended: Some(record.number("yearsAttended")),
            join_date: record.optional_text("joinDate"),
            date_joined_church: None,
            last_attendance: record.optional_text("lastAttendance"),
            attendance_status: Some(wire_choice::<AttendanceStatus>(
                record,
                "attendanceStatus",
            )?),
            baptized: record.flag("baptizedWithHolySpirit"),
            baptized_with_holy_spirit: None,
            ministries_of_interest: non_empty(record.items("ministriesOfInterest")),
            skills: non_empty(record.items("skills")),
            is_deleted: record.flag("isDeleted"),
            notes: None,
        })
    }

    fn from_remote(remote: &MemberRecord) -> Result<FormRecord> {
        let mut record = Self::defaults();
        let texts = [
            ("firstName", Some(remote.first_name.as_str())),
            ("lastName", Some(remote.last_name.as_str())),
            ("preferredName", remote.preferred_name.as_deref()),
            ("dateOfBirth", remote.date_of_birth.as_deref()),
            ("emailAddress", Some(remote.email_address.as_str())),
            ("primaryPhone", Some(remote.primary_phone.as_str())),
            ("secondaryPhone", remote.secondary_phone.as_deref()),
            ("occupation", remote.occupation.as_deref()),
            ("employer", remote.employer.as_deref()),
            ("residingAddress", Some(remote.residing_address.as_str())),
            ("emergencyContact", Some(remote.emergency_contact.as_str())),
            (
                "emergencyContactRelationship",
                Some(remote.emergency_contact_relationship.as_str()),
            ),
            (
                "previousChurchAffiliation",
                remote.previous_church_affiliation.as_deref(),
            ),
        ];
        for (field, value) in texts {
            record.set_text(field, value.unwrap_or_default())?;
        }

        record.set_text("gender", remote.gender.unwrap_or_default().as_wire())?;
        record.set_text(
            "maritalStatus",
            remote.marital_status.unwrap_or_default().as_wire(),
        )?;
        record.set_text(
            "attendanceStatus",
            remote.attendance_status.unwrap_or_default().as_wire(),
        )?;
        if let Some(joined) = remote.joined_on() {
            record.set_text("joinDate", joined)?;
        }
        if let Some(last) = remote.last_attendance.as_deref().filter(|d| !d.is_empty()) {
            record.set_text("lastAttendance", last)?;
        }
        record.set_flag("baptizedWithHolySpirit", remote.is_baptized())?;
        record.set_field(
            "yearsAttended",
            FieldValue::Number(remote.years_attended.unwrap_or(0)),
        )?;
        for item in remote.ministries_of_interest.iter().flatten() {
            record.toggle_set_membership("ministriesOfInterest", item, true)?;
        }
        for item in remote.skills.iter().flatten() {
            record.toggle_set_membership("skills", item, true)?;
        }
        record.set_flag("isDeleted", remote.is_deleted)?;
        Ok(record)
    }

    fn created_notice(record: &FormRecord) -> Notice {
        Notice::success(
            "Member added",
            format!(
                "{} {} has been added to your community.",
                record.text("firstName"),
                record.text("lastName")
            ),
        )
    }

    fn updated_notice(record: &FormRecord) -> Notice {
        Notice::success(
            "Member updated successfully",
            format!(
                "{} {}'s information has been updated.",
                record.text("firstName"),
                record.text("lastName")
            ),
        )
    }

    fn failure_fallback() -> &'static str {
        "There was an error saving the member. Please try again."
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::WireEnum;

    #[test]
    fn option_lists_match_wire_enums() {
        let genders: Vec<&str> = GENDER_OPTIONS.iter().map(|o| o.value).collect();
        let expected: Vec<&str> = Gender::ALL.iter().map(|g| g.as_wire()).collect();
        assert_eq!(genders, expected);
        let statuses: Vec<&str> = MARITAL_STATUS_OPTIONS.iter().map(|o| o.value).collect();
        let expected: Vec<&str> = MaritalStatus::ALL.iter().map(|m| m.as_wire()).collect();
        assert_eq!(statuses, expected);
    }

    #[test]
    fn defaults_match_new_member_form() {
        let record = MemberForm::defaults();
        assert_eq!(record.text("gender"), "MALE");
        assert_eq!(record.text("maritalStatus"), "SINGLE");
        assert_eq!(record.text("attendanceStatus"), "ACTIVE");
        assert_eq!(record.text("joinDate"), iso(today()));
        assert!(!record.flag("baptizedWithHolySpirit"));
    }

    #[test]
    fn first_step_reports_first_name_first() {
        let record = MemberForm::defaults();
        let errors = MEMBER_WIZARD.validate(1, &record);
        assert_eq!(errors.first_invalid(), Some("firstName"));
        assert_eq!(errors.get("firstName"), Some("First name is required"));
        assert_eq!(errors.get("residingAddress"), Some("Address is required"));
        assert!(MEMBER_WIZARD.validate(3, &record).is_valid());
    }

    #[test]
    fn empty_optionals_become_null_on_the_wire() {
        let mut record = MemberForm::defaults();
        record.set_text("firstName", "Grace").unwrap();
        let remote = MemberForm::to_remote(&record, Some("m-7")).unwrap();
        let body = serde_json::to_value(&remote).unwrap();
        assert_eq!(body["recordId"], "m-7");
        assert!(body["preferredName"].is_null());
        assert_eq!(
            body.get("previousChurchAffiliation"),
            Some(&serde_json::Value::Null)
        );
        assert!(body["ministriesOfInterest"].is_null());
        assert!(body["skills"].is_null());
        assert_eq!(body["gender"], "MALE");
        assert_eq!(body["isDeleted"], false);
    }

    #[test]
    fn fetched_member_prefills_the_form() {
        let remote: MemberRecord = serde_json::from_value(serde_json::json!({
            "id": "12",
            "firstName": "Ruth",
            "lastName": "Mensah",
            "gender": "FEMALE",
            "dateJoinedChurch": "2019-05-01",
            "baptizedWithHolySpirit": true,
            "skills": ["Singing", "Cooking"]
        }))
        .unwrap();
        let record = MemberForm::from_remote(&remote).unwrap();
        assert_eq!(record.text("firstName"), "Ruth");
        assert_eq!(record.text("gender"), "FEMALE");
        assert_eq!(record.text("maritalStatus"), "SINGLE");
        assert_eq!(record.text("joinDate"), "2019-05-01");
        assert_eq!(record.text("lastAttendance"), iso(today()));
        assert!(record.flag("baptizedWithHolySpirit"));
        assert_eq!(record.items("skills"), vec!["Singing", "Cooking"]);

        let back = MemberForm::to_remote(&record, Some("12")).unwrap();
        assert_eq!(back.first_name, "Ruth");
        assert_eq!(back.join_date.as_deref(), Some("2019-05-01"));
        assert!(back.baptized);
    }
}
