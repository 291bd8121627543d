use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::common::{
    deserialize_optional_id, Displayable, Identifiable, Resource, ResourceNames, WireEnum,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DonationStatus {
    #[default]
    Completed,
    Pending,
    Failed,
}

impl WireEnum for DonationStatus {
    const ALL: &'static [Self] = &[
        DonationStatus::Completed,
        DonationStatus::Pending,
        DonationStatus::Failed,
    ];

    fn as_wire(&self) -> &'static str {
        match self {
            DonationStatus::Completed => "completed",
            DonationStatus::Pending => "pending",
            DonationStatus::Failed => "failed",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            DonationStatus::Completed => "Completed",
            DonationStatus::Pending => "Pending",
            DonationStatus::Failed => "Failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Donation {
    #[serde(
        default,
        deserialize_with = "deserialize_optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    pub donor: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub method: String,
    pub category: String,
    #[serde(default)]
    pub status: DonationStatus,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub receipt_sent: bool,
}

impl Donation {
    pub fn formatted_amount(&self) -> String {
        format_usd(self.amount)
    }
}

/// Formats an amount as US dollars with thousands separators.
pub fn format_usd(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (idx, ch) in whole.chars().enumerate() {
        if idx > 0 && (whole.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{sign}${grouped}.{:02}", cents % 100)
}

impl Identifiable for Donation {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn assign_id(&mut self, id: String) {
        self.id = Some(id);
    }
}

impl Displayable for Donation {
    fn display_label(&self) -> String {
        format!("{} from {}", self.formatted_amount(), self.donor)
    }
}

impl Resource for Donation {
    const NAMES: ResourceNames = ResourceNames {
        collection: "donations",
        item: "donation",
        label: "donation",
    };
}
