//! HTTP routing for the calculator web form
//!
//! Transport-free so it can be driven directly from tests; the Lambda binary
//! only converts to and from `lambda_http` types.

use crate::input::{MmfRequest, SaccoRequest};
use crate::report::{mmf_breakdown, sacco_breakdown, ReportConfig};
use log::info;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

/// Headers sent with every response, preflight included
pub const CORS_HEADERS: [(&str, &str); 3] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Methods", "POST, OPTIONS"),
    ("Access-Control-Allow-Headers", "Content-Type"),
];

fn error(status: u16, message: &str) -> (u16, Value) {
    (status, json!({ "error": message }))
}

fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T, serde_json::Error> {
    // An empty body means "use every form default"
    let body = if body.trim().is_empty() { "{}" } else { body };
    serde_json::from_str(body)
}

/// Route one request, returning the status and JSON body.
///
/// A CORS preflight returns `Value::Null`, which callers send as an empty body.
pub fn handle(method: &str, path: &str, body: &str, config: &ReportConfig) -> (u16, Value) {
    if method == "OPTIONS" {
        return (200, Value::Null);
    }
    if method != "POST" {
        return error(405, "Only POST is supported");
    }

    let path = path.trim_end_matches('/');
    info!("{} {}", method, path);

    if path.ends_with("/sacco") {
        let request: SaccoRequest = match parse_body(body) {
            Ok(r) => r,
            Err(e) => return error(400, &format!("Invalid JSON: {}", e)),
        };
        match request.calculate() {
            Ok(result) => (200, json!({ "result": result, "breakdown": sacco_breakdown(&result, config) })),
            Err(e) => error(400, &e.to_string()),
        }
    } else if path.ends_with("/mmf") {
        let request: MmfRequest = match parse_body(body) {
            Ok(r) => r,
            Err(e) => return error(400, &format!("Invalid JSON: {}", e)),
        };
        match request.calculate() {
            Ok(result) => (200, json!({ "result": result, "breakdown": mmf_breakdown(&result, config) })),
            Err(e) => error(400, &e.to_string()),
        }
    } else {
        error(404, "Unknown calculator; use /sacco or /mmf")
    }
}
