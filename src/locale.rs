//! Locale strings for the letter.
//!
//! The composer never reaches into a process-wide resource bundle; it is
//! handed a [`MessageCatalog`] explicitly. The key set is fixed and
//! verified when the composer is built, so a missing key is a startup
//! configuration error, never a render-time one.

use chrono::{Datelike, NaiveDate};
use std::collections::HashMap;
use thiserror::Error;

/// The fixed key vocabulary the composer resolves.
pub mod keys {
    pub const TITLE: &str = "title.referralLetter";
    pub const DOCTOR_TITLE: &str = "doctorTitle";
    pub const SEAL: &str = "text.seal";
    pub const ZIP_MARK: &str = "mark.zipCode";
    pub const TELEPHONE: &str = "text.telephone";
    pub const FAX: &str = "text.fax";
    pub const GREETINGS: &str = "greetings.letter";
    pub const PATIENT_NAME: &str = "text.patientName";
    pub const PATIENT_GENDER: &str = "text.patientGender";
    pub const BIRTH_DATE: &str = "text.birthDate";
    pub const AGE: &str = "text.age";
    pub const ADDRESS: &str = "text.address";
    pub const ADDRESS_AND_TELEPHONE: &str = "text.addressAndTelephone";
    pub const DISEASE: &str = "text.disease";
    pub const PURPOSE: &str = "text.purpose";
    pub const PAST_ILLNESS: &str = "text.pastIllness";
    pub const FAMILY_HISTORY: &str = "text.familyHistory";
    pub const PRESENT_ILLNESS: &str = "text.presentIllness";
    pub const TEST_RESULT: &str = "text.testResult";
    pub const PROGRESS_NOTE: &str = "text.progressNote";
    pub const MEDICATION: &str = "text.presentMedication";
    pub const REMARKS: &str = "text.remarks";
    pub const SEX_MALE: &str = "sex.male";
    pub const SEX_FEMALE: &str = "sex.female";
    pub const SEX_UNKNOWN: &str = "sex.unknown";
}

/// Every key the composer looks up. [`MessageCatalog::verify`] checks the
/// catalog against this list.
pub const REQUIRED_KEYS: &[&str] = &[
    keys::TITLE,
    keys::DOCTOR_TITLE,
    keys::SEAL,
    keys::ZIP_MARK,
    keys::TELEPHONE,
    keys::FAX,
    keys::GREETINGS,
    keys::PATIENT_NAME,
    keys::PATIENT_GENDER,
    keys::BIRTH_DATE,
    keys::AGE,
    keys::ADDRESS,
    keys::ADDRESS_AND_TELEPHONE,
    keys::DISEASE,
    keys::PURPOSE,
    keys::PAST_ILLNESS,
    keys::FAMILY_HISTORY,
    keys::PRESENT_ILLNESS,
    keys::TEST_RESULT,
    keys::PROGRESS_NOTE,
    keys::MEDICATION,
    keys::REMARKS,
    keys::SEX_MALE,
    keys::SEX_FEMALE,
    keys::SEX_UNKNOWN,
];

#[derive(Error, Debug)]
#[error("message catalog is missing required keys: {missing:?}")]
pub struct CatalogError {
    pub missing: Vec<&'static str>,
}

/// An injected key→string provider.
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    entries: HashMap<String, String>,
}

impl MessageCatalog {
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    /// The built-in Japanese catalog, covering [`REQUIRED_KEYS`] in full.
    pub fn japanese() -> Self {
        Self::from_entries([
            (keys::TITLE, "紹介状"),
            (keys::DOCTOR_TITLE, "先生"),
            (keys::SEAL, "印"),
            (keys::ZIP_MARK, "〒"),
            (keys::TELEPHONE, "電話"),
            (keys::FAX, "FAX"),
            (
                keys::GREETINGS,
                "平素より大変お世話になっております。下記の患者様をご紹介申し上げます。ご高診のほど、よろしくお願い申し上げます。",
            ),
            (keys::PATIENT_NAME, "患者氏名"),
            (keys::PATIENT_GENDER, "性別"),
            (keys::BIRTH_DATE, "生年月日"),
            (keys::AGE, "歳"),
            (keys::ADDRESS, "住所"),
            (keys::ADDRESS_AND_TELEPHONE, "住所・電話"),
            (keys::DISEASE, "傷病名"),
            (keys::PURPOSE, "紹介目的"),
            (keys::PAST_ILLNESS, "既往歴"),
            (keys::FAMILY_HISTORY, "家族歴"),
            (keys::PRESENT_ILLNESS, "症状経過"),
            (keys::TEST_RESULT, "検査結果"),
            (keys::PROGRESS_NOTE, "治療経過"),
            (keys::MEDICATION, "現在の処方"),
            (keys::REMARKS, "備考"),
            (keys::SEX_MALE, "男"),
            (keys::SEX_FEMALE, "女"),
            (keys::SEX_UNKNOWN, "不明"),
        ])
    }

    /// Checks that every required key resolves. Called once when a
    /// composer is built.
    pub fn verify(&self) -> Result<(), CatalogError> {
        let missing: Vec<&'static str> = REQUIRED_KEYS
            .iter()
            .copied()
            .filter(|key| !self.entries.contains_key(*key))
            .collect();
        if missing.is_empty() { Ok(()) } else { Err(CatalogError { missing }) }
    }

    /// Resolves `key`. Total over [`REQUIRED_KEYS`] once [`verify`] has
    /// passed; an unknown key resolves to the empty string.
    ///
    /// [`verify`]: MessageCatalog::verify
    pub fn text(&self, key: &str) -> &str {
        self.entries.get(key).map(String::as_str).unwrap_or("")
    }
}

/// Formats a date the way the letter prints dates: `2024年6月1日`.
pub fn date_string(date: NaiveDate) -> String {
    format!("{}年{}月{}日", date.year(), date.month(), date.day())
}
