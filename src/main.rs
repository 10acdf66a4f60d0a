//! Renders a fully populated sample referral letter, mainly useful for
//! eyeballing layout changes. Takes the destination directory as the
//! first argument, defaulting to the system temp dir.

use chrono::NaiveDate;
use refletter::model::{Gender, ItemKey, ReferralRecord, TextKey};
use refletter::{LetterComposer, LetterSettings, MessageCatalog};
use std::collections::HashMap;
use std::path::PathBuf;

fn sample_record() -> ReferralRecord {
    let started = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap_or_default();
    let mut items = HashMap::new();
    items.insert(ItemKey::Disease, "逆流性食道炎".to_string());
    items.insert(ItemKey::Purpose, "精査加療のお願い".to_string());
    items.insert(ItemKey::Remarks, "お忙しいところ恐れ入ります。".to_string());
    let mut texts = HashMap::new();
    texts.insert(TextKey::PastFamily, "既往歴:高血圧症\n家族歴:特記事項なし".to_string());
    texts.insert(
        TextKey::ClinicalCourse,
        "胸やけを主訴に当院受診。内服加療で改善乏しく、上部消化管内視鏡検査を御願いしたく存じます。".to_string(),
    );
    texts.insert(TextKey::Medication, "ランソプラゾール 15mg 1T 分1".to_string());

    ReferralRecord {
        patient_name: "田中太郎".into(),
        patient_birthday: NaiveDate::from_ymd_opt(1980, 1, 1).unwrap_or_default(),
        patient_gender: Gender::Male,
        patient_age: 44,
        patient_zip_code: Some("100-0001".into()),
        patient_address: Some("東京都千代田区千代田1-1".into()),
        patient_telephone: Some("03-1234-5678".into()),
        consultant_hospital: "市立中央病院".into(),
        consultant_dept: "消化器内科".into(),
        consultant_doctor: Some("鈴木次郎".into()),
        client_hospital: "山田クリニック".into(),
        client_doctor: "山田一郎".into(),
        client_zip_code: Some("160-0022".into()),
        client_address: "東京都新宿区新宿3-3".into(),
        client_telephone: "03-9876-5432".into(),
        client_fax: Some("03-9876-5433".into()),
        items,
        texts,
        started,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let directory = std::env::args().nth(1).map(PathBuf::from).unwrap_or_else(std::env::temp_dir);
    let settings = LetterSettings {
        include_greeting: true,
        telephone_with_address: true,
        consultant_title_suffix: Some("御机下".into()),
    };

    let mut composer = LetterComposer::new(MessageCatalog::japanese(), settings)?;
    let path = composer.compose(&sample_record(), &directory)?;
    println!("{}", path.display());
    Ok(())
}
