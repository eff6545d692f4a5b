use aws_lambda_events::apigw::ApiGatewayProxyRequest;
use http::Method;
use model::Error;
use serde_json::{Map, Value};

/// Whether this invocation is a CORS preflight negotiation.
pub fn is_preflight(request: &ApiGatewayProxyRequest) -> bool {
    request.http_method == Method::OPTIONS
}

/// Decode the request body into a JSON object.
///
/// A missing body reads as an empty object so field extraction can default;
/// a body that decodes to anything other than an object is an error.
pub fn parse_body(body: Option<&str>) -> Result<Map<String, Value>, Error> {
    let body: &str = match body {
        Some(body) => body,
        None => return Ok(Map::new()),
    };

    match serde_json::from_str(body)? {
        Value::Object(fields) => Ok(fields),
        _ => Err("request body must be a JSON object".into()),
    }
}

/// Read a string field with surrounding whitespace trimmed.
/// Missing or non-string fields read as empty.
pub fn trimmed_field(body: &Map<String, Value>, field: &str) -> String {
    body.get(field)
        .and_then(Value::as_str)
        .map(str::trim)
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_body_reads_as_empty_object() {
        assert!(parse_body(None).unwrap().is_empty());
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(parse_body(Some("not json")).is_err());
    }

    #[test]
    fn non_object_body_is_an_error() {
        assert!(parse_body(Some("[1, 2]")).is_err());
    }

    #[test]
    fn fields_are_trimmed() {
        let body: Map<String, Value> = parse_body(Some(r#"{"pet_name": "  Rex  "}"#)).unwrap();

        assert_eq!("Rex", trimmed_field(&body, "pet_name"));
        assert_eq!("", trimmed_field(&body, "owner_name"));
    }

    #[test]
    fn non_string_fields_read_as_empty() {
        let body: Map<String, Value> = parse_body(Some(r#"{"pet_name": 7}"#)).unwrap();

        assert_eq!("", trimmed_field(&body, "pet_name"));
    }
}
