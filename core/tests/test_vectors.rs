//! Verify `build_request` against the JSON test vectors in `test-vectors/`.
//!
//! Each case describes an endpoint and either the exact request it must
//! produce or the error it must fail with. Bodies are compared as parsed
//! JSON so key order inside the payload does not matter.

use netkit_core::{build_request, Endpoint, Headers, HttpMethod, NetworkError, RequestBody};
use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
struct Vectors {
    default_base_url: String,
    cases: Vec<Case>,
}

#[derive(Debug, Deserialize)]
struct Case {
    name: String,
    endpoint: VectorEndpoint,
    expected_request: Option<ExpectedRequest>,
    expected_error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ExpectedRequest {
    method: String,
    url: String,
    headers: Vec<(String, String)>,
    body: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", content = "params", rename_all = "snake_case")]
enum VectorBody {
    Plain,
    Encodable(Map<String, Value>),
    QueryParameter(Map<String, Value>),
}

#[derive(Debug, Deserialize)]
struct VectorEndpoint {
    base_url: Option<String>,
    path: String,
    method: Option<String>,
    #[serde(default)]
    headers: Headers,
    body: Option<VectorBody>,
}

impl Endpoint for VectorEndpoint {
    fn base_url(&self) -> Option<String> {
        self.base_url.clone()
    }

    fn path(&self) -> String {
        self.path.clone()
    }

    fn method(&self) -> HttpMethod {
        self.method
            .as_deref()
            .map(|m| m.parse().unwrap())
            .unwrap_or_default()
    }

    fn headers(&self) -> Headers {
        self.headers.clone()
    }

    fn body(&self) -> RequestBody {
        match &self.body {
            None | Some(VectorBody::Plain) => RequestBody::Plain,
            Some(VectorBody::Encodable(params)) => RequestBody::Encodable(params.clone()),
            Some(VectorBody::QueryParameter(params)) => RequestBody::QueryParameter(params.clone()),
        }
    }
}

#[test]
fn request_test_vectors() {
    let raw = include_str!("../../test-vectors/requests.json");
    let vectors: Vectors = serde_json::from_str(raw).unwrap();

    for case in &vectors.cases {
        let name = &case.name;
        let result = build_request(&case.endpoint, &vectors.default_base_url);

        if let Some(expected_error) = &case.expected_error {
            let err = result.unwrap_err();
            match expected_error.as_str() {
                "InvalidUrl" => assert!(matches!(err, NetworkError::InvalidUrl { .. }), "{name}: expected InvalidUrl"),
                other => panic!("{name}: unknown expected_error: {other}"),
            }
            continue;
        }

        let expected = case.expected_request.as_ref().unwrap();
        let req = result.unwrap_or_else(|e| panic!("{name}: {e}"));
        assert_eq!(req.method, expected.method.parse::<HttpMethod>().unwrap(), "{name}: method");
        assert_eq!(req.url, expected.url, "{name}: url");
        assert_eq!(req.headers, expected.headers, "{name}: headers");

        let body: Option<Value> = req.body.as_deref().map(|b| serde_json::from_slice(b).unwrap());
        assert_eq!(body, expected.body, "{name}: body");
    }
}
