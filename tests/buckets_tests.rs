use lentsurvey::buckets::{bucketize, NullPolicy, AGE_GROUPS, EXPENSE_RANGES, SIGNER_RANGES, UNKNOWN_RANGE};

#[test]
fn age_scenario_drops_underage_and_missing() {
    let ages = vec![
        Some(17), Some(18), Some(25), Some(26), Some(45), Some(46),
        Some(55), Some(56), Some(65), Some(66), Some(90), None,
    ];
    let out = bucketize(&AGE_GROUPS, ages, NullPolicy::Exclude);
    let got: Vec<(&str, u64)> = out.iter().map(|r| (r.range.as_str(), r.count)).collect();
    assert_eq!(
        got,
        vec![("18-25", 2), ("26-35", 1), ("36-45", 1), ("46-55", 2), ("56-65", 2), (">65", 2)]
    );
    assert_eq!(out.iter().map(|r| r.count).sum::<u64>(), 10);
}

#[test]
fn age_order_does_not_depend_on_input_order() {
    let ages = vec![Some(70), Some(40), Some(20), Some(60), Some(30), Some(50)];
    let mut reversed = ages.clone();
    reversed.reverse();
    let a = bucketize(&AGE_GROUPS, ages, NullPolicy::Exclude);
    let b = bucketize(&AGE_GROUPS, reversed, NullPolicy::Exclude);
    assert_eq!(a, b);
    assert!(a.iter().all(|r| r.count == 1));
}

#[test]
fn every_adult_age_lands_in_exactly_one_group() {
    for age in 18..=150 {
        let hits = AGE_GROUPS.ranges.iter().filter(|(_, lo, hi)| age >= *lo && hi.map_or(true, |h| age <= h)).count();
        assert_eq!(hits, 1, "age {age}");
    }
}

#[test]
fn expense_scenario_counts_sums_and_averages() {
    let values = vec![Some(500), Some(1000), Some(1001), Some(20000), Some(20001)];
    let out = bucketize(&EXPENSE_RANGES, values, NullPolicy::Exclude);
    let got: Vec<(&str, u64, i64)> = out.iter().map(|r| (r.range.as_str(), r.count, r.sum)).collect();
    assert_eq!(
        got,
        vec![
            ("0-1,000", 2, 1500),
            ("1,001-3,000", 1, 1001),
            ("10,001-20,000", 1, 20000),
            (">20,000", 1, 20001),
        ]
    );
    assert_eq!(out[0].average, 750);
    for r in &out {
        assert_eq!(r.average, (r.sum as f64 / r.count as f64).round() as i64);
    }
}

#[test]
fn expense_counts_sum_to_non_null_records() {
    let values = vec![Some(0), Some(2999), None, Some(4500), Some(7000), Some(15000), None, Some(99999)];
    let non_null = values.iter().filter(|v| v.is_some()).count() as u64;
    let out = bucketize(&EXPENSE_RANGES, values, NullPolicy::Exclude);
    assert_eq!(out.iter().map(|r| r.count).sum::<u64>(), non_null);
    assert!(out.iter().all(|r| r.range != UNKNOWN_RANGE));
}

#[test]
fn unknown_bucket_trails_declared_ranges() {
    let values = vec![None, Some(4), Some(250), None];
    let out = bucketize(&SIGNER_RANGES, values, NullPolicy::BucketAsUnknown);
    let labels: Vec<&str> = out.iter().map(|r| r.range.as_str()).collect();
    assert_eq!(labels, vec!["1-5", ">100", UNKNOWN_RANGE]);
    assert_eq!(out[2].count, 2);
    assert_eq!(out[2].average, 0);
}
