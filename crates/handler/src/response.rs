use crate::cors::cors_headers;
use aws_lambda_events::apigw::ApiGatewayProxyResponse;
use aws_lambda_events::encodings::Body;
use http::HeaderMap;
use serde::Serialize;

/// Message returned on any unexpected processing failure.
pub const INTERNAL_SERVER_ERROR: &'static str = "internal server error";

#[derive(Serialize)]
struct PreflightBody {
    message: &'static str,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a str>,
}

/// Serialize `body` into a JSON response carrying the CORS headers.
pub fn respond(
    status_code: i64,
    allowed_methods: &str,
    body: &impl Serialize,
) -> ApiGatewayProxyResponse {
    let body: String = serde_json::to_string(body).expect("response body should serialize");

    ApiGatewayProxyResponse {
        status_code,
        headers: cors_headers(allowed_methods),
        multi_value_headers: HeaderMap::new(),
        body: Some(Body::Text(body)),
        is_base64_encoded: false,
    }
}

/// Acknowledge a CORS preflight request.
pub fn preflight(allowed_methods: &str) -> ApiGatewayProxyResponse {
    respond(
        200,
        allowed_methods,
        &PreflightBody {
            message: "CORS preflight successful",
        },
    )
}

/// A user-correctable failure described entirely by its message.
pub fn validation_error(allowed_methods: &str, error: &str) -> ApiGatewayProxyResponse {
    failure(400, allowed_methods, error, None)
}

pub fn not_found(allowed_methods: &str, error: &str) -> ApiGatewayProxyResponse {
    failure(404, allowed_methods, error, None)
}

/// An unexpected failure; `details` carries the raw diagnostic string.
pub fn internal_error(
    allowed_methods: &str,
    error: &str,
    details: &str,
) -> ApiGatewayProxyResponse {
    failure(500, allowed_methods, error, Some(details))
}

fn failure(
    status_code: i64,
    allowed_methods: &str,
    error: &str,
    details: Option<&str>,
) -> ApiGatewayProxyResponse {
    respond(
        status_code,
        allowed_methods,
        &ErrorBody {
            error,
            success: false,
            details,
        },
    )
}
