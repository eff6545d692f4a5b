use aws_lambda_events::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
use aws_lambda_events::encodings::Body;
use http::Method;
use model::pet::PetRecord;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

/// Build a bare API Gateway proxy request with a set method.
pub fn apigw_request(method: Method) -> ApiGatewayProxyRequest {
    ApiGatewayProxyRequest {
        http_method: method,
        ..Default::default()
    }
}

/// A request whose body is the JSON encoding of `body`.
pub fn request_with_body<T>(method: Method, body: &T) -> ApiGatewayProxyRequest
where
    T: Serialize,
{
    ApiGatewayProxyRequest {
        http_method: method,
        body: Some(serde_json::to_string(body).expect("test body should serialize")),
        ..Default::default()
    }
}

/// A request whose body is a raw, possibly malformed, string.
pub fn request_with_raw_body(method: Method, body: &str) -> ApiGatewayProxyRequest {
    ApiGatewayProxyRequest {
        http_method: method,
        body: Some(body.to_string()),
        ..Default::default()
    }
}

pub fn request_with_path_parameter(
    method: Method,
    parameter: &str,
    value: &str,
) -> ApiGatewayProxyRequest {
    ApiGatewayProxyRequest {
        http_method: method,
        path_parameters: HashMap::from([(parameter.to_string(), value.to_string())]),
        ..Default::default()
    }
}

pub fn request_with_query_parameter(
    method: Method,
    parameter: &str,
    value: &str,
) -> ApiGatewayProxyRequest {
    let parameters: HashMap<String, Vec<String>> =
        HashMap::from([(parameter.to_string(), vec![value.to_string()])]);

    ApiGatewayProxyRequest {
        http_method: method,
        query_string_parameters: parameters.into(),
        ..Default::default()
    }
}

/// Decode a response body back into JSON for assertions.
pub fn response_json(response: &ApiGatewayProxyResponse) -> Value {
    match response.body.as_ref().expect("response should have a body") {
        Body::Text(text) => serde_json::from_str(text).expect("response body should be JSON"),
        other => panic!("unexpected body encoding {other:?}"),
    }
}

/// A fully populated registration for seeding stores under test.
pub fn sample_record(pet_id: &str, created_at: &str) -> PetRecord {
    PetRecord {
        pet_id: pet_id.to_string(),
        pet_name: "Rex".to_string(),
        owner_name: "Ana".to_string(),
        pet_age: 3,
        created_at: created_at.to_string(),
    }
}
