use super::definition::{ChoiceOption, FieldKind, FieldSpec, RequiredField, StepDefinition, WizardDefinition};
use super::mapping::{choice_label, iso, parse_date, today, RecordMapping};
use super::notice::Notice;
use super::record::FormRecord;
use crate::domain::{Donation, DonationStatus};
use crate::errors::{CommunityError, Result};

pub const METHOD_OPTIONS: &[ChoiceOption] = &[
    ChoiceOption::new("credit_card", "Credit Card"),
    ChoiceOption::new("bank_transfer", "Bank Transfer"),
    ChoiceOption::new("check", "Check"),
    ChoiceOption::new("cash", "Cash"),
    ChoiceOption::new("paypal", "PayPal"),
    ChoiceOption::new("other", "Other"),
];

pub const CATEGORY_OPTIONS: &[ChoiceOption] = &[
    ChoiceOption::new("general_fund", "General Fund"),
    ChoiceOption::new("building_fund", "Building Fund"),
    ChoiceOption::new("missions", "Missions"),
    ChoiceOption::new("youth_ministry", "Youth Ministry"),
    ChoiceOption::new("outreach", "Outreach"),
    ChoiceOption::new("other", "Other"),
];

const DETAILS: &[FieldSpec] = &[
    FieldSpec::text("donor", "Donor Name"),
    FieldSpec::text("amount", "Amount ($)"),
    FieldSpec::date("date", "Date"),
    FieldSpec::new("method", "Payment Method", FieldKind::Choice(METHOD_OPTIONS)),
    FieldSpec::new("category", "Category", FieldKind::Choice(CATEGORY_OPTIONS)),
    FieldSpec::text("notes", "Notes"),
    FieldSpec::flag("sendReceipt", "Send receipt to donor"),
];

pub static DONATION_WIZARD: WizardDefinition = WizardDefinition {
    name: "donation",
    steps: &[StepDefinition {
        label: "Donation Details",
        description: "Record a new donation",
        fields: DETAILS,
        required: &[
            RequiredField::new("donor", "Donor name is required"),
            RequiredField::new("amount", "Amount is required"),
            RequiredField::new("date", "Date is required"),
        ],
    }],
    hidden: &[],
};

pub struct DonationForm;

fn parse_amount(raw: &str) -> Result<f64> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|ch| !matches!(ch, '$' | ','))
        .collect();
    match cleaned.parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount > 0.0 => Ok(amount),
        _ => Err(CommunityError::Validation(format!(
            "`{}` is not a valid donation amount",
            raw.trim()
        ))),
    }
}

impl RecordMapping for DonationForm {
    type Remote = Donation;

    const LISTING_ROUTE: &'static str = "/donations";

    fn definition() -> &'static WizardDefinition {
        &DONATION_WIZARD
    }

    fn defaults() -> FormRecord {
        let mut record = DONATION_WIZARD.blank_record();
        let defaults = [
            ("date", iso(today())),
            ("method", "credit_card".to_string()),
            ("category", "general_fund".to_string()),
        ];
        for (field, value) in defaults {
            if let Err(err) = record.set_text(field, value) {
                tracing::error!(field, error = %err, "donation default rejected");
            }
        }
        if let Err(err) = record.set_flag("sendReceipt", true) {
            tracing::error!(error = %err, "donation default rejected");
        }
        record
    }

    fn to_remote(record: &FormRecord, record_id: Option<&str>) -> Result<Donation> {
        Ok(Donation {
            id: record_id.map(str::to_string),
            donor: record.text("donor").trim().to_string(),
            amount: parse_amount(record.text("amount"))?,
            date: parse_date(record, "date")?,
            method: choice_label(record, "method"),
            category: choice_label(record, "category"),
            status: DonationStatus::Completed,
            notes: record.optional_text("notes"),
            receipt_sent: record.flag("sendReceipt"),
        })
    }

    fn from_remote(remote: &Donation) -> Result<FormRecord> {
        let mut record = Self::defaults();
        record.set_text("donor", remote.donor.as_str())?;
        record.set_text("amount", format!("{:.2}", remote.amount))?;
        record.set_text("date", iso(remote.date))?;
        for (field, value) in [("method", &remote.method), ("category", &remote.category)] {
            // Free-text values from older records fall back to "other".
            if record.set_text(field, value.as_str()).is_err() {
                record.set_text(field, "other")?;
            }
        }
        record.set_text("notes", remote.notes.clone().unwrap_or_default())?;
        record.set_flag("sendReceipt", remote.receipt_sent)?;
        Ok(record)
    }

    fn created_notice(record: &FormRecord) -> Notice {
        Notice::success(
            "Donation recorded",
            format!(
                "A {} donation from {} has been recorded.",
                record.text("amount").trim(),
                record.text("donor").trim()
            ),
        )
    }

    fn failure_fallback() -> &'static str {
        "There was an error recording the donation. Please try again."
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_accept_currency_formatting() {
        assert_eq!(parse_amount("$1,250.50").unwrap(), 1250.5);
        assert!(parse_amount("ten").is_err());
        assert!(parse_amount("-5").is_err());
    }

    #[test]
    fn choices_are_stored_by_label() {
        let mut record = DonationForm::defaults();
        record.set_text("donor", "Naomi").unwrap();
        record.set_text("amount", "40").unwrap();
        record.set_text("method", "PayPal").unwrap();
        let donation = DonationForm::to_remote(&record, None).unwrap();
        assert_eq!(donation.method, "PayPal");
        assert_eq!(donation.category, "General Fund");
        assert!(donation.receipt_sent);
    }

    #[test]
    fn stored_labels_prefill_choices() {
        let donation = DonationForm::to_remote(
            &{
                let mut record = DonationForm::defaults();
                record.set_text("donor", "Naomi").unwrap();
                record.set_text("amount", "40").unwrap();
                record.set_text("category", "missions").unwrap();
                record
            },
            Some("3"),
        )
        .unwrap();
        let record = DonationForm::from_remote(&donation).unwrap();
        assert_eq!(record.text("category"), "missions");
        assert_eq!(record.text("amount"), "40.00");
    }
}
