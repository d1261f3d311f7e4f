use lentsurvey::normalize::{normalize_motivations, parse_motivations, MalformedPolicy, MotivationsError};
use serde_json::{json, Value};

#[test]
fn native_list_passes_through() {
    let v = json!(["A", "B"]);
    assert_eq!(normalize_motivations(&v, MalformedPolicy::Drop), vec!["A", "B"]);
}

#[test]
fn json_encoded_list_is_decoded() {
    let v = Value::String(r#"["A","B"]"#.to_string());
    assert_eq!(normalize_motivations(&v, MalformedPolicy::Drop), vec!["A", "B"]);
}

#[test]
fn malformed_string_follows_policy() {
    let v = json!("not json");
    assert!(matches!(parse_motivations(&v), Err(MotivationsError::Malformed { .. })));
    assert!(normalize_motivations(&v, MalformedPolicy::Drop).is_empty());
    assert_eq!(normalize_motivations(&v, MalformedPolicy::Verbatim), vec!["not json"]);
}

#[test]
fn null_is_empty() {
    assert!(parse_motivations(&Value::Null).unwrap().is_empty());
}

#[test]
fn non_string_elements_are_dropped() {
    let v = json!(["A", 2, null, {"x": 1}, "B"]);
    assert_eq!(parse_motivations(&v).unwrap(), vec!["A", "B"]);
    let encoded = Value::String(r#"["A", 3, "C"]"#.to_string());
    assert_eq!(parse_motivations(&encoded).unwrap(), vec!["A", "C"]);
}

#[test]
fn object_yields_string_values() {
    let v = json!({"first": "สุขภาพ", "second": 7, "third": "ครอบครัว"});
    let mut got = parse_motivations(&v).unwrap();
    got.sort();
    assert_eq!(got, vec!["ครอบครัว", "สุขภาพ"]);
}
