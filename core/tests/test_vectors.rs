//! Check the parsers and validators against JSON vectors in `test-vectors/`.
//!
//! Expected URL results are deserialized into `ParsedUrl` and query results
//! into `QueryMap`, so the comparison is structural rather than textual.

use webcommon_core::{
    is_valid_ip, is_valid_port, is_valid_url, parse_query, parse_url, ParsedUrl, QueryError,
    QueryMap, UrlError,
};

// ---------------------------------------------------------------------------
// URLs
// ---------------------------------------------------------------------------

#[test]
fn url_test_vectors() {
    let raw = include_str!("../../test-vectors/urls.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input = case["input"].as_str().unwrap();
        let result = parse_url(input);

        if let Some(expected_error) = case.get("expected_error") {
            let err = result.unwrap_err();
            match expected_error.as_str().unwrap() {
                "MissingScheme" => {
                    assert!(matches!(err, UrlError::MissingScheme(_)), "{name}: expected MissingScheme")
                }
                other => panic!("{name}: unknown expected_error: {other}"),
            }
        } else {
            let parsed = result.unwrap();
            let expected: ParsedUrl = serde_json::from_value(case["expected"].clone()).unwrap();
            assert_eq!(parsed, expected, "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Query strings
// ---------------------------------------------------------------------------

#[test]
fn query_test_vectors() {
    let raw = include_str!("../../test-vectors/queries.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input = case["input"].as_str().unwrap();
        let result = parse_query(input);

        if let Some(expected_error) = case.get("expected_error") {
            let err = result.unwrap_err();
            match expected_error.as_str().unwrap() {
                "MalformedEscape" => assert!(
                    matches!(err, QueryError::MalformedEscape { .. }),
                    "{name}: expected MalformedEscape"
                ),
                "InvalidUtf8" => {
                    assert_eq!(err, QueryError::InvalidUtf8, "{name}: expected InvalidUtf8")
                }
                other => panic!("{name}: unknown expected_error: {other}"),
            }
        } else {
            let map = result.unwrap();
            let expected: QueryMap = serde_json::from_value(case["expected"].clone()).unwrap();
            assert_eq!(map, expected, "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Validators
// ---------------------------------------------------------------------------

fn check(vectors: &serde_json::Value, key: &str, predicate: fn(&str) -> bool) {
    for pair in vectors[key].as_array().unwrap() {
        let input = pair[0].as_str().unwrap();
        let expected = pair[1].as_bool().unwrap();
        assert_eq!(predicate(input), expected, "{key}: {input:?}");
    }
}

#[test]
fn validator_test_vectors() {
    let raw = include_str!("../../test-vectors/validators.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    check(&vectors, "ip", is_valid_ip);
    check(&vectors, "port", is_valid_port);
    check(&vectors, "url", is_valid_url);
}
