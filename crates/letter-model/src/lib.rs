//! Referral letter data model.
//!
//! A [`ReferralRecord`] holds everything one referral letter renders:
//! patient demographics, the referring and receiving parties, and the
//! clinical content keyed by a fixed vocabulary. The record is populated
//! by the calling context and read-only during composition.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Patient gender. The display string is a locale concern; this is the
/// wire vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Unknown,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Unknown => "unknown",
        }
    }
}

/// Keys for short, single-line clinical content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemKey {
    Disease,
    Purpose,
    Remarks,
}

/// Keys for long, multi-line clinical content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextKey {
    PastFamily,
    ClinicalCourse,
    Medication,
}

/// One referral letter's worth of structured data.
///
/// Optional fields use `Option<String>`; an empty string and `None` mean
/// the same thing everywhere, and the normalizing accessors below fold the
/// two together so renderers never emit a label for a blank value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferralRecord {
    // Patient
    pub patient_name: String,
    pub patient_birthday: NaiveDate,
    pub patient_gender: Gender,
    pub patient_age: u32,
    pub patient_zip_code: Option<String>,
    pub patient_address: Option<String>,
    pub patient_telephone: Option<String>,

    // Receiving party
    pub consultant_hospital: String,
    pub consultant_dept: String,
    pub consultant_doctor: Option<String>,

    // Referring party
    pub client_hospital: String,
    pub client_doctor: String,
    pub client_zip_code: Option<String>,
    pub client_address: String,
    pub client_telephone: String,
    pub client_fax: Option<String>,

    // Clinical content
    #[serde(default)]
    pub items: HashMap<ItemKey, String>,
    #[serde(default)]
    pub texts: HashMap<TextKey, String>,

    /// Date the letter is authored.
    pub started: NaiveDate,
}

impl ReferralRecord {
    /// Short clinical content for `key`; a missing key is an empty string,
    /// never a failure.
    pub fn item_value(&self, key: ItemKey) -> &str {
        self.items.get(&key).map(String::as_str).unwrap_or("")
    }

    /// Long clinical content for `key`; a missing key is an empty string.
    pub fn text_value(&self, key: TextKey) -> &str {
        self.texts.get(&key).map(String::as_str).unwrap_or("")
    }

    pub fn consultant_doctor(&self) -> Option<&str> {
        non_empty(&self.consultant_doctor)
    }

    pub fn patient_zip_code(&self) -> Option<&str> {
        non_empty(&self.patient_zip_code)
    }

    pub fn patient_address(&self) -> Option<&str> {
        non_empty(&self.patient_address)
    }

    pub fn patient_telephone(&self) -> Option<&str> {
        non_empty(&self.patient_telephone)
    }

    pub fn client_zip_code(&self) -> Option<&str> {
        non_empty(&self.client_zip_code)
    }

    pub fn client_fax(&self) -> Option<&str> {
        non_empty(&self.client_fax)
    }

    /// Derives the patient's age in whole years as of `on`.
    pub fn age_on(&self, on: NaiveDate) -> u32 {
        let b = self.patient_birthday;
        let mut age = on.year() - b.year();
        if (on.month(), on.day()) < (b.month(), b.day()) {
            age -= 1;
        }
        age.max(0) as u32
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    match value.as_deref() {
        Some("") | None => None,
        Some(s) => Some(s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ReferralRecord {
        ReferralRecord {
            patient_name: "田中太郎".into(),
            patient_birthday: NaiveDate::from_ymd_opt(1980, 1, 1).unwrap(),
            patient_gender: Gender::Male,
            patient_age: 44,
            patient_zip_code: None,
            patient_address: Some("東京都千代田区1-1".into()),
            patient_telephone: Some("03-1234-5678".into()),
            consultant_hospital: "市立中央病院".into(),
            consultant_dept: "消化器内科".into(),
            consultant_doctor: Some("".into()),
            client_hospital: "山田クリニック".into(),
            client_doctor: "山田一郎".into(),
            client_zip_code: None,
            client_address: "東京都新宿区2-2".into(),
            client_telephone: "03-9876-5432".into(),
            client_fax: None,
            items: HashMap::new(),
            texts: HashMap::new(),
            started: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        }
    }

    #[test]
    fn empty_and_absent_optionals_normalize_identically() {
        let r = record();
        assert_eq!(r.consultant_doctor(), None);
        assert_eq!(r.patient_zip_code(), None);
        assert_eq!(r.patient_telephone(), Some("03-1234-5678"));
    }

    #[test]
    fn missing_content_keys_yield_empty_strings() {
        let mut r = record();
        assert_eq!(r.item_value(ItemKey::Disease), "");
        assert_eq!(r.text_value(TextKey::Medication), "");
        r.items.insert(ItemKey::Disease, "胃潰瘍".into());
        assert_eq!(r.item_value(ItemKey::Disease), "胃潰瘍");
    }

    #[test]
    fn age_counts_whole_years_only() {
        let r = record();
        let before = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        assert_eq!(r.age_on(before), 44);
        let birthday_2025 = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert_eq!(r.age_on(birthday_2025), 45);
        let day_before = NaiveDate::from_ymd_opt(2024, 12, 30).unwrap();
        assert_eq!(r.age_on(day_before), 44);
    }

    #[test]
    fn record_round_trips_through_serde() {
        let r = record();
        let json = serde_json::to_string(&r).unwrap();
        assert!(json.contains("\"male\""));
        let back: ReferralRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);
    }
}
