use aws_lambda_events::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
use handler::request::{is_preflight, parse_body};
use handler::response::{
    internal_error, not_found, preflight, respond, validation_error, INTERNAL_SERVER_ERROR,
};
use lambda_runtime::tracing;
use model::Error;
use serde::Serialize;
use serde_json::{Map, Value};
use store::PetStore;

const ALLOWED_METHODS: &str = "DELETE,OPTIONS";

const PET_ID_REQUIRED: &str = "pet_id is required";
const PET_NOT_FOUND: &str = "pet not found";
const VERIFY_FAILED: &str = "error verifying pet";
const DELETE_FAILED: &str = "error deleting pet";

/// Placeholder for fields absent from the previous value.
const MISSING_VALUE: &str = "N/A";

#[derive(Serialize)]
struct DeletedBody {
    message: &'static str,
    success: bool,
    deleted_pet: DeletedPet,
}

#[derive(Serialize)]
struct DeletedPet {
    pet_id: String,
    pet_name: String,
    owner_name: String,
}

pub(crate) async fn handle(
    store: &dyn PetStore,
    request: ApiGatewayProxyRequest,
) -> ApiGatewayProxyResponse {
    if is_preflight(&request) {
        return preflight(ALLOWED_METHODS);
    }

    let pet_id: String = match resolve_pet_id(&request) {
        Ok(Some(pet_id)) => pet_id,
        Ok(None) => return validation_error(ALLOWED_METHODS, PET_ID_REQUIRED),
        Err(err) => {
            tracing::error!("Failed to decode request body: {err}");
            return internal_error(ALLOWED_METHODS, INTERNAL_SERVER_ERROR, &err.to_string());
        }
    };

    if let Err(err) = store.get_pet(&pet_id).await {
        if err.is_missing_entry() {
            return not_found(ALLOWED_METHODS, PET_NOT_FOUND);
        }

        tracing::error!("Failed to verify pet {pet_id}: {err}");
        return internal_error(ALLOWED_METHODS, VERIFY_FAILED, &err.to_string());
    }

    let previous: Option<Value> = match store.delete_pet(&pet_id).await {
        Ok(previous) => previous,
        Err(err) => {
            tracing::error!("Failed to delete pet {pet_id}: {err}");
            return internal_error(ALLOWED_METHODS, DELETE_FAILED, &err.to_string());
        }
    };

    tracing::info!("Deleted pet {pet_id}");
    tracing::info!("Previous value {:?}", previous);

    let previous: Value = previous.unwrap_or(Value::Null);

    respond(
        200,
        ALLOWED_METHODS,
        &DeletedBody {
            message: "pet deleted successfully",
            success: true,
            deleted_pet: DeletedPet {
                pet_id,
                pet_name: field_or_placeholder(&previous, "pet_name"),
                owner_name: field_or_placeholder(&previous, "owner_name"),
            },
        },
    )
}

/// Resolve the identifier from the request, first non-empty wins:
/// path parameter, then query string, then a `pet_id` field in the body.
fn resolve_pet_id(request: &ApiGatewayProxyRequest) -> Result<Option<String>, Error> {
    if let Some(pet_id) = request.path_parameters.get("pet_id") {
        if !pet_id.is_empty() {
            return Ok(Some(pet_id.clone()));
        }
    }

    if let Some(pet_id) = request.query_string_parameters.first("pet_id") {
        if !pet_id.is_empty() {
            return Ok(Some(pet_id.to_string()));
        }
    }

    if let Some(body) = request.body.as_deref().filter(|body| !body.is_empty()) {
        let body: Map<String, Value> = parse_body(Some(body))?;

        if let Some(pet_id) = body.get("pet_id").and_then(Value::as_str) {
            if !pet_id.is_empty() {
                return Ok(Some(pet_id.to_string()));
            }
        }
    }

    Ok(None)
}

fn field_or_placeholder(previous: &Value, field: &str) -> String {
    previous
        .get(field)
        .and_then(Value::as_str)
        .unwrap_or(MISSING_VALUE)
        .to_string()
}
