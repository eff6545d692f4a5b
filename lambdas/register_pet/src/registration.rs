use aws_lambda_events::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
use chrono::{SecondsFormat, Utc};
use handler::request::{is_preflight, parse_body, trimmed_field};
use handler::response::{
    internal_error, preflight, respond, validation_error, INTERNAL_SERVER_ERROR,
};
use lambda_runtime::tracing;
use model::pet::PetRecord;
use serde::Serialize;
use serde_json::{Map, Value};
use store::PetStore;
use uuid::Uuid;

const ALLOWED_METHODS: &str = "POST,OPTIONS";

const PET_NAME_REQUIRED: &str = "pet name is required";
const OWNER_NAME_REQUIRED: &str = "owner name is required";
const PET_AGE_REQUIRED: &str = "pet age is required";
const PET_AGE_NOT_A_NUMBER: &str = "pet age must be a valid number";
const PET_AGE_OUT_OF_RANGE: &str = "age must be between 0 and 30 years";

const MIN_PET_AGE: i64 = 0;
const MAX_PET_AGE: i64 = 30;

#[derive(Serialize)]
struct RegisteredBody {
    message: &'static str,
    success: bool,
    pet_id: String,
    data: RegisteredPet,
}

/// Echo of the stored fields, without repeating `pet_id`.
#[derive(Serialize)]
struct RegisteredPet {
    pet_name: String,
    pet_age: u8,
    owner_name: String,
    created_at: String,
}

pub(crate) async fn handle(
    store: &dyn PetStore,
    request: ApiGatewayProxyRequest,
) -> ApiGatewayProxyResponse {
    if is_preflight(&request) {
        return preflight(ALLOWED_METHODS);
    }

    let body: Map<String, Value> = match parse_body(request.body.as_deref()) {
        Ok(body) => body,
        Err(err) => {
            tracing::error!("Failed to decode request body: {err}");
            return internal_error(ALLOWED_METHODS, INTERNAL_SERVER_ERROR, &err.to_string());
        }
    };

    let pet_name: String = trimmed_field(&body, "pet_name");
    let owner_name: String = trimmed_field(&body, "owner_name");

    if pet_name.is_empty() {
        return validation_error(ALLOWED_METHODS, PET_NAME_REQUIRED);
    }
    if owner_name.is_empty() {
        return validation_error(ALLOWED_METHODS, OWNER_NAME_REQUIRED);
    }

    let pet_age: u8 = match validate_age(body.get("pet_age")) {
        Ok(pet_age) => pet_age,
        Err(message) => return validation_error(ALLOWED_METHODS, message),
    };

    let record: PetRecord = PetRecord {
        pet_id: Uuid::new_v4().to_string(),
        pet_name,
        owner_name,
        pet_age,
        created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
    };

    if let Err(err) = store.put_pet(&record).await {
        tracing::error!("Failed to register pet {}: {err}", record.pet_id);
        return internal_error(ALLOWED_METHODS, INTERNAL_SERVER_ERROR, &err.to_string());
    }

    tracing::info!("Registered pet {}", record.pet_id);
    tracing::info!("Stored record {:?}", record);

    respond(
        200,
        ALLOWED_METHODS,
        &RegisteredBody {
            message: "pet registered successfully",
            success: true,
            pet_id: record.pet_id.clone(),
            data: RegisteredPet {
                pet_name: record.pet_name,
                pet_age: record.pet_age,
                owner_name: record.owner_name,
                created_at: record.created_at,
            },
        },
    )
}

/// Validate the raw `pet_age` value into the accepted range.
fn validate_age(raw: Option<&Value>) -> Result<u8, &'static str> {
    let value: &Value = match raw {
        None | Some(Value::Null) => return Err(PET_AGE_REQUIRED),
        Some(Value::String(text)) if text.is_empty() => return Err(PET_AGE_REQUIRED),
        Some(value) => value,
    };

    let pet_age: i64 = match value {
        Value::Number(number) => match number.as_i64() {
            Some(pet_age) => pet_age,
            // Fractional ages truncate towards zero
            None => number
                .as_f64()
                .map(|pet_age| pet_age as i64)
                .ok_or(PET_AGE_NOT_A_NUMBER)?,
        },
        Value::String(text) => text.trim().parse().map_err(|_| PET_AGE_NOT_A_NUMBER)?,
        _ => return Err(PET_AGE_NOT_A_NUMBER),
    };

    if !(MIN_PET_AGE..=MAX_PET_AGE).contains(&pet_age) {
        return Err(PET_AGE_OUT_OF_RANGE);
    }

    Ok(pet_age as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;
    use serde_json::json;
    use store_in_memory::InMemoryPetStore;
    use test_utils::{apigw_request, request_with_body, request_with_raw_body, response_json};

    fn valid_body() -> Value {
        json!({"pet_name": "Rex", "owner_name": "Ana", "pet_age": 3})
    }

    #[tokio::test]
    async fn preflight_bypasses_validation() {
        let store: InMemoryPetStore = InMemoryPetStore::default();

        let response: ApiGatewayProxyResponse =
            handle(&store, apigw_request(Method::OPTIONS)).await;

        assert_eq!(200, response.status_code);
        assert_eq!(
            "POST,OPTIONS",
            response.headers["Access-Control-Allow-Methods"]
        );
        assert_eq!(
            "CORS preflight successful",
            response_json(&response)["message"]
        );
    }

    #[tokio::test]
    async fn registers_a_pet_and_echoes_trimmed_fields() {
        let store: InMemoryPetStore = InMemoryPetStore::default();
        let request = request_with_body(
            Method::POST,
            &json!({"pet_name": "  Rex ", "owner_name": " Ana ", "pet_age": 3}),
        );

        let response: ApiGatewayProxyResponse = handle(&store, request).await;
        let body: Value = response_json(&response);

        assert_eq!(200, response.status_code);
        assert_eq!(true, body["success"]);
        assert_eq!("Rex", body["data"]["pet_name"]);
        assert_eq!("Ana", body["data"]["owner_name"]);
        assert_eq!(3, body["data"]["pet_age"]);

        let pet_id: &str = body["pet_id"].as_str().unwrap();
        let stored: PetRecord = store.get_pet(pet_id).await.unwrap();
        assert_eq!("Rex", stored.pet_name);
        assert!(stored.created_at.ends_with('Z'));
    }

    #[tokio::test]
    async fn generated_ids_are_unique_across_calls() {
        let store: InMemoryPetStore = InMemoryPetStore::default();

        let first: Value =
            response_json(&handle(&store, request_with_body(Method::POST, &valid_body())).await);
        let second: Value =
            response_json(&handle(&store, request_with_body(Method::POST, &valid_body())).await);

        assert_ne!(first["pet_id"], second["pet_id"]);
    }

    #[tokio::test]
    async fn rejects_missing_pet_name() {
        let store: InMemoryPetStore = InMemoryPetStore::default();
        let request =
            request_with_body(Method::POST, &json!({"owner_name": "Ana", "pet_age": 3}));

        let response: ApiGatewayProxyResponse = handle(&store, request).await;
        let body: Value = response_json(&response);

        assert_eq!(400, response.status_code);
        assert_eq!("pet name is required", body["error"]);
        assert_eq!(false, body["success"]);
    }

    #[tokio::test]
    async fn rejects_whitespace_owner_name() {
        let store: InMemoryPetStore = InMemoryPetStore::default();
        let request = request_with_body(
            Method::POST,
            &json!({"pet_name": "Rex", "owner_name": "   ", "pet_age": 3}),
        );

        let response: ApiGatewayProxyResponse = handle(&store, request).await;

        assert_eq!(400, response.status_code);
        assert_eq!("owner name is required", response_json(&response)["error"]);
    }

    #[tokio::test]
    async fn age_validation_covers_the_boundaries() {
        let store: InMemoryPetStore = InMemoryPetStore::default();

        for (pet_age, status, error) in [
            (json!(-1), 400, Some("age must be between 0 and 30 years")),
            (json!(31), 400, Some("age must be between 0 and 30 years")),
            (json!("abc"), 400, Some("pet age must be a valid number")),
            (json!(""), 400, Some("pet age is required")),
            (json!(0), 200, None),
            (json!(30), 200, None),
        ] {
            let request = request_with_body(
                Method::POST,
                &json!({"pet_name": "Rex", "owner_name": "Ana", "pet_age": pet_age.clone()}),
            );

            let response: ApiGatewayProxyResponse = handle(&store, request).await;

            assert_eq!(status, response.status_code, "age {pet_age:?}");
            if let Some(error) = error {
                assert_eq!(error, response_json(&response)["error"], "age {pet_age:?}");
            }
        }
    }

    #[tokio::test]
    async fn rejects_absent_age() {
        let store: InMemoryPetStore = InMemoryPetStore::default();
        let request = request_with_body(
            Method::POST,
            &json!({"pet_name": "Rex", "owner_name": "Ana"}),
        );

        let response: ApiGatewayProxyResponse = handle(&store, request).await;

        assert_eq!(400, response.status_code);
        assert_eq!("pet age is required", response_json(&response)["error"]);
    }

    #[tokio::test]
    async fn accepts_a_numeric_string_age() {
        let store: InMemoryPetStore = InMemoryPetStore::default();
        let request = request_with_body(
            Method::POST,
            &json!({"pet_name": "Rex", "owner_name": "Ana", "pet_age": "5"}),
        );

        let response: ApiGatewayProxyResponse = handle(&store, request).await;

        assert_eq!(200, response.status_code);
        assert_eq!(5, response_json(&response)["data"]["pet_age"]);
    }

    #[tokio::test]
    async fn undecodable_body_is_an_internal_error() {
        let store: InMemoryPetStore = InMemoryPetStore::default();
        let request = request_with_raw_body(Method::POST, "{not json");

        let response: ApiGatewayProxyResponse = handle(&store, request).await;
        let body: Value = response_json(&response);

        assert_eq!(500, response.status_code);
        assert_eq!("internal server error", body["error"]);
        assert!(body.get("details").is_some());
        // CORS headers survive the failure path
        assert_eq!("*", response.headers["Access-Control-Allow-Origin"]);
    }

    #[test]
    fn fractional_numeric_age_truncates() {
        assert_eq!(5, validate_age(Some(&json!(5.5))).unwrap());
    }

    #[test]
    fn fractional_string_age_does_not_parse() {
        assert_eq!(
            Err("pet age must be a valid number"),
            validate_age(Some(&json!("5.5")))
        );
    }
}
