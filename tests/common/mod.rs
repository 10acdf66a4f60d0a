use chrono::NaiveDate;
use refletter::model::{Gender, ItemKey, ReferralRecord, TextKey};
use refletter::render_core::RecordingSink;
use refletter::{LetterComposer, LetterSettings, MessageCatalog};
use std::collections::HashMap;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// A record with every optional field populated.
pub fn full_record() -> ReferralRecord {
    let mut items = HashMap::new();
    items.insert(ItemKey::Disease, "逆流性食道炎".to_string());
    items.insert(ItemKey::Purpose, "精査加療のお願い".to_string());
    items.insert(ItemKey::Remarks, "宜しくお願い致します。".to_string());
    let mut texts = HashMap::new();
    texts.insert(TextKey::PastFamily, "既往歴:高血圧症\n家族歴:特記事項なし".to_string());
    texts.insert(TextKey::ClinicalCourse, "胸やけを主訴に当院受診。".to_string());
    texts.insert(TextKey::Medication, "ランソプラゾール 15mg 1T 分1".to_string());

    ReferralRecord {
        patient_name: "田中太郎".into(),
        patient_birthday: NaiveDate::from_ymd_opt(1980, 1, 1).unwrap(),
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
        started: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
    }
}

pub fn composer(settings: LetterSettings) -> LetterComposer {
    LetterComposer::new(MessageCatalog::japanese(), settings)
        .expect("built-in catalog covers every key")
}

/// Runs one composition against a recording sink and returns the captured
/// block sequence.
pub fn compose_blocks(record: &ReferralRecord, settings: LetterSettings) -> RecordingSink {
    let mut sink = RecordingSink::new();
    composer(settings)
        .compose_into(record, &mut sink)
        .expect("recording sink never fails on valid content");
    assert!(sink.is_finished());
    sink
}
