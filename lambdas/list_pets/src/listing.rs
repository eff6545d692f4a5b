use aws_lambda_events::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
use handler::request::is_preflight;
use handler::response::{internal_error, preflight, respond, INTERNAL_SERVER_ERROR};
use lambda_runtime::tracing;
use serde::Serialize;
use serde_json::Value;
use store::PetStore;

const ALLOWED_METHODS: &str = "GET,OPTIONS";

#[derive(Serialize)]
struct ListBody {
    message: String,
    success: bool,
    pets: Vec<Value>,
    total: usize,
}

pub(crate) async fn handle(
    store: &dyn PetStore,
    request: ApiGatewayProxyRequest,
) -> ApiGatewayProxyResponse {
    if is_preflight(&request) {
        return preflight(ALLOWED_METHODS);
    }

    let mut pets: Vec<Value> = match store.scan_pets().await {
        Ok(pets) => pets,
        Err(err) => {
            tracing::error!("Failed to list pets: {err}");
            return internal_error(ALLOWED_METHODS, INTERNAL_SERVER_ERROR, &err.to_string());
        }
    };

    // Most recently registered first; records without a timestamp sort last
    pets.sort_by(|left, right| created_at(right).cmp(created_at(left)));

    let total: usize = pets.len();

    tracing::info!("Listing {total} registered pets");

    respond(
        200,
        ALLOWED_METHODS,
        &ListBody {
            message: format!("{total} pets found"),
            success: true,
            pets,
            total,
        },
    )
}

fn created_at(pet: &Value) -> &str {
    pet.get("created_at")
        .and_then(Value::as_str)
        .unwrap_or_default()
}
