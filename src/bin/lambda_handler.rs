//! AWS Lambda handler for the loan quote endpoint
//!
//! Accepts a quote request as JSON and returns the payment figures together with
//! their formatted display strings (see `sba_calculator::api`).
//!
//! Supports Lambda Function URLs for direct HTTP access.

use aws_lambda_events::event::lambda_function_urls::{
    LambdaFunctionUrlRequest, LambdaFunctionUrlResponse,
};
use http::header::{HeaderName, HeaderValue, CONTENT_TYPE};
use http::HeaderMap;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use log::{info, warn};
use sba_calculator::{api::handle_quote, CalculatorConfig, LoanTerms};
use serde_json::json;

fn cors_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        HeaderName::from_static("access-control-allow-origin"),
        HeaderValue::from_static("*"),
    );
    headers.insert(
        HeaderName::from_static("access-control-allow-methods"),
        HeaderValue::from_static("POST, OPTIONS"),
    );
    headers.insert(
        HeaderName::from_static("access-control-allow-headers"),
        HeaderValue::from_static("Content-Type"),
    );
    headers
}

fn response(status_code: i64, body: Option<String>) -> LambdaFunctionUrlResponse {
    let mut headers = cors_headers();
    if body.is_some() {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    }
    LambdaFunctionUrlResponse {
        status_code,
        headers,
        body,
        is_base64_encoded: false,
        cookies: Vec::new(),
    }
}

/// Lambda handler function
async fn handler(
    event: LambdaEvent<LambdaFunctionUrlRequest>,
    terms: LoanTerms,
) -> Result<LambdaFunctionUrlResponse, Error> {
    respond(event.payload, &terms)
}

fn respond(
    request: LambdaFunctionUrlRequest,
    terms: &LoanTerms,
) -> Result<LambdaFunctionUrlResponse, Error> {
    let method = request
        .request_context
        .http
        .method
        .as_deref()
        .unwrap_or("POST")
        .to_ascii_uppercase();

    // Handle CORS preflight
    if method == "OPTIONS" {
        return Ok(response(200, None));
    }
    if method != "POST" {
        let body = json!({ "error": format!("Method {} not allowed", method) });
        return Ok(response(405, Some(body.to_string())));
    }

    let body = request.body.unwrap_or_default();
    match handle_quote(&body, terms) {
        Ok(quote) => Ok(response(200, Some(serde_json::to_string(&quote)?))),
        Err(e) => {
            warn!("Rejected quote request: {}", e);
            let body = json!({ "error": e.to_string() });
            Ok(response(i64::from(e.status_code()), Some(body.to_string())))
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let config = CalculatorConfig::resolve(None)?;
    let terms = config.terms;
    info!("Quote endpoint starting with APR {}", terms.annual_rate());

    run(service_fn(move |event| handler(event, terms))).await
}
