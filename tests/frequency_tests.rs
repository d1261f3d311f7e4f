use lentsurvey::frequency::{classify, classify_weighted, DrinkingFrequency};

#[test]
fn both_daily_phrasings_are_daily() {
    assert_eq!(classify("ทุกวัน"), DrinkingFrequency::Daily);
    assert_eq!(classify("ทุกวัน (7 วัน/สัปดาห์)"), DrinkingFrequency::Daily);
    assert_eq!(classify("Daily"), DrinkingFrequency::Daily);
}

#[test]
fn free_text_variants_map_to_expected_buckets() {
    let cases = [
        ("3-5 วันต่อสัปดาห์", DrinkingFrequency::NearDaily),
        ("สัปดาห์ละ 4 วัน", DrinkingFrequency::NearDaily),
        ("5–6 วัน", DrinkingFrequency::NearDaily),
        ("1-2 วัน/สัปดาห์", DrinkingFrequency::Weekly),
        ("สัปดาห์ละ 1 ครั้ง", DrinkingFrequency::Weekly),
        ("2-3 ครั้งต่อสัปดาห์", DrinkingFrequency::Weekly),
        ("1-2 times a week", DrinkingFrequency::Weekly),
        ("1-2 ครั้งต่อเดือน", DrinkingFrequency::Monthly),
        ("เดือนละ 2 ครั้ง", DrinkingFrequency::Monthly),
        ("1 ถึง 3 วันต่อเดือน", DrinkingFrequency::Monthly),
        ("ปีละครั้ง", DrinkingFrequency::Rarely),
        ("เฉพาะงานเลี้ยง", DrinkingFrequency::Rarely),
        ("1-2", DrinkingFrequency::Rarely),
    ];
    for (text, expected) in cases {
        assert_eq!(classify(text), expected, "input {text:?}");
    }
}

#[test]
fn first_matching_rule_wins() {
    // mentions a month but also a near-daily range
    assert_eq!(classify("3-5 วันต่อเดือน"), DrinkingFrequency::NearDaily);
}

#[test]
fn weighted_groups_fold_into_canonical_order() {
    let groups = vec![
        (Some("ปีละครั้ง"), 1),
        (Some("1-2 วัน/สัปดาห์"), 2),
        (Some("ทุกวัน"), 3),
        (None, 5),
        (Some("   "), 4),
        (Some("ทุกวัน (7 วัน/สัปดาห์)"), 1),
    ];
    let out = classify_weighted(groups);
    let got: Vec<(&str, u64)> = out.iter().map(|nv| (nv.name.as_str(), nv.value)).collect();
    assert_eq!(
        got,
        vec![
            (DrinkingFrequency::Daily.label(), 4),
            (DrinkingFrequency::Weekly.label(), 2),
            (DrinkingFrequency::Rarely.label(), 1),
        ]
    );
}

#[test]
fn nothing_to_classify_yields_nothing() {
    assert!(classify_weighted(Vec::<(Option<&str>, u64)>::new()).is_empty());
}
