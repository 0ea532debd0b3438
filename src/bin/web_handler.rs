//! AWS Lambda handler serving the calculator web form
//!
//! `POST /sacco` and `POST /mmf` accept the request fields as JSON (missing
//! fields take the form defaults) and return the result with its display
//! breakdown. Supports Lambda Function URLs for direct HTTP access.

use lambda_http::{run, service_fn, Body, Error, Request, Response};
use sacco_calculator::report::ReportConfig;
use sacco_calculator::web::{handle, CORS_HEADERS};

/// Lambda handler function
async fn handler(event: Request) -> Result<Response<Body>, Error> {
    let body = match event.body() {
        Body::Text(s) => s.clone(),
        Body::Binary(b) => String::from_utf8_lossy(b).to_string(),
        Body::Empty => String::new(),
    };

    let (status, json) = handle(event.method().as_str(), event.uri().path(), &body, &ReportConfig::default());

    let mut builder = Response::builder().status(status);
    for (name, value) in CORS_HEADERS {
        builder = builder.header(name, value);
    }

    if json.is_null() {
        return Ok(builder.body(Body::Empty)?);
    }
    Ok(builder
        .header("Content-Type", "application/json")
        .body(Body::Text(json.to_string()))?)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
