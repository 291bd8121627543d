use serde::{Deserialize, Serialize};

use super::common::{
    deserialize_optional_id, Displayable, Identifiable, Resource, ResourceNames, WireEnum,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    #[default]
    Male,
    Female,
    Other,
}

impl WireEnum for Gender {
    const ALL: &'static [Self] = &[Gender::Male, Gender::Female, Gender::Other];

    fn as_wire(&self) -> &'static str {
        match self {
            Gender::Male => "MALE",
            Gender::Female => "FEMALE",
            Gender::Other => "OTHER",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaritalStatus {
    #[default]
    Single,
    Married,
    Divorced,
    Widowed,
    Separated,
}

impl WireEnum for MaritalStatus {
    const ALL: &'static [Self] = &[
        MaritalStatus::Single,
        MaritalStatus::Married,
        MaritalStatus::Divorced,
        MaritalStatus::Widowed,
        MaritalStatus::Separated,
    ];

    fn as_wire(&self) -> &'static str {
        match self {
            MaritalStatus::Single => "SINGLE",
            MaritalStatus::Married => "MARRIED",
            MaritalStatus::Divorced => "DIVORCED",
            MaritalStatus::Widowed => "WIDOWED",
            MaritalStatus::Separated => "SEPARATED",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            MaritalStatus::Single => "Single",
            MaritalStatus::Married => "Married",
            MaritalStatus::Divorced => "Divorced",
            MaritalStatus::Widowed => "Widowed",
            MaritalStatus::Separated => "Separated",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttendanceStatus {
    #[default]
    Active,
    Inactive,
}

impl WireEnum for AttendanceStatus {
    const ALL: &'static [Self] = &[AttendanceStatus::Active, AttendanceStatus::Inactive];

    fn as_wire(&self) -> &'static str {
        match self {
            AttendanceStatus::Active => "ACTIVE",
            AttendanceStatus::Inactive => "INACTIVE",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            AttendanceStatus::Active => "Active",
            AttendanceStatus::Inactive => "Inactive",
        }
    }
}

/// Status shown in the member directory. Members without an attendance
/// status yet are listed as pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberStatus {
    Active,
    Inactive,
    Pending,
}

impl MemberStatus {
    pub fn label(&self) -> &'static str {
        match self {
            MemberStatus::Active => "active",
            MemberStatus::Inactive => "inactive",
            MemberStatus::Pending => "pending",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "active" => Some(MemberStatus::Active),
            "inactive" => Some(MemberStatus::Inactive),
            "pending" => Some(MemberStatus::Pending),
            _ => None,
        }
    }
}

/// Member as exchanged with the backend.
///
/// Optional text fields serialize as explicit `null`. The backend reads
/// `joinDate`/`baptized` but reports `dateJoinedChurch`/`baptizedWithHolySpirit`;
/// both spellings are accepted on input, only the former is written.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MemberRecord {
    #[serde(
        deserialize_with = "deserialize_optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(
        deserialize_with = "deserialize_optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub record_id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub preferred_name: Option<String>,
    pub date_of_birth: Option<String>,
    pub gender: Option<Gender>,
    pub marital_status: Option<MaritalStatus>,
    pub residing_address: String,
    pub primary_phone: String,
    pub secondary_phone: Option<String>,
    pub email_address: String,
    pub occupation: Option<String>,
    pub employer: Option<String>,
    pub emergency_contact: String,
    pub emergency_contact_relationship: String,
    pub previous_church_affiliation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub years_attended: Option<i64>,
    pub join_date: Option<String>,
    #[serde(skip_serializing)]
    pub date_joined_church: Option<String>,
    pub last_attendance: Option<String>,
    pub attendance_status: Option<AttendanceStatus>,
    pub baptized: bool,
    #[serde(skip_serializing)]
    pub baptized_with_holy_spirit: Option<bool>,
    pub ministries_of_interest: Option<Vec<String>>,
    pub skills: Option<Vec<String>>,
    pub is_deleted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl MemberRecord {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }

    /// Join date under whichever name the backend used.
    pub fn joined_on(&self) -> Option<&str> {
        self.join_date
            .as_deref()
            .or(self.date_joined_church.as_deref())
            .filter(|value| !value.is_empty())
    }

    pub fn is_baptized(&self) -> bool {
        self.baptized_with_holy_spirit.unwrap_or(self.baptized)
    }

    pub fn status(&self) -> MemberStatus {
        match self.attendance_status {
            Some(AttendanceStatus::Active) => MemberStatus::Active,
            Some(AttendanceStatus::Inactive) => MemberStatus::Inactive,
            None => MemberStatus::Pending,
        }
    }
}

impl Identifiable for MemberRecord {
    /// `id` first, then the write-side `recordId`.
    fn id(&self) -> Option<&str> {
        self.id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
            .or_else(|| self.record_id.as_deref().filter(|id| !id.trim().is_empty()))
    }

    fn assign_id(&mut self, id: String) {
        self.id = Some(id);
    }
}

impl Displayable for MemberRecord {
    fn display_label(&self) -> String {
        let name = self.full_name();
        if name.is_empty() {
            self.email_address.clone()
        } else {
            name
        }
    }
}

impl Resource for MemberRecord {
    const NAMES: ResourceNames = ResourceNames {
        collection: "members",
        item: "member",
        label: "member",
    };
}
