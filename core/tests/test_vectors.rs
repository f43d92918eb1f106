//! Check the client and decoder against JSON test vectors in `test-vectors/`.
//!
//! Vectors are shared with the FFI layer's callers, so the same cases pin
//! down behavior on both sides of the C boundary.

use booklist_core::{decode, Book, BookClient, HttpMethod, HttpResponse, SearchError};

fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        other => panic!("unknown method: {other}"),
    }
}

// ---------------------------------------------------------------------------
// Decode
// ---------------------------------------------------------------------------

#[test]
fn decode_test_vectors() {
    let raw = include_str!("../../test-vectors/decode.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let body = case["body"].as_str().unwrap();
        let expected: Vec<Book> = serde_json::from_value(case["expected_result"].clone()).unwrap();

        assert_eq!(decode(body), expected, "{name}: decoded books");
    }
}

// ---------------------------------------------------------------------------
// Search request / response
// ---------------------------------------------------------------------------

#[test]
fn search_test_vectors() {
    let raw = include_str!("../../test-vectors/search.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let client = BookClient::new(vectors["endpoint"].as_str().unwrap());
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let query = case["query"].as_str().unwrap();
        let expected_req = &case["expected_request"];

        // Verify build
        let req = client.build_search(query).unwrap();
        assert_eq!(req.method, parse_method(expected_req["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(req.url, expected_req["url"].as_str().unwrap(), "{name}: url");

        // Verify parse
        let sim = &case["simulated_response"];
        let response = HttpResponse {
            status: sim["status"].as_u64().unwrap() as u16,
            headers: Vec::new(),
            body: sim["body"].as_str().unwrap().to_string(),
        };
        let result = client.parse_search(response);

        if let Some(expected_error) = case.get("expected_error") {
            let expected_status = expected_error["status"].as_u64().unwrap() as u16;
            match result.unwrap_err() {
                SearchError::NonSuccessStatus { status } => assert_eq!(status, expected_status, "{name}: status"),
                other => panic!("{name}: expected NonSuccessStatus, got {other:?}"),
            }
        } else {
            assert_eq!(result.unwrap(), case["expected_body"].as_str().unwrap(), "{name}: body");
        }
    }
}
