mod deletion;

use aws_config::BehaviorVersion;
use aws_lambda_events::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
use lambda_runtime::tracing::{Instrument, Span};
use lambda_runtime::{service_fn, tracing, Error, LambdaEvent};
use store_dynamodb::DynamoDbPetStore;

async fn delete_pet(
    store: &DynamoDbPetStore,
    event: LambdaEvent<ApiGatewayProxyRequest>,
) -> Result<ApiGatewayProxyResponse, Error> {
    let request_id: String = event.context.request_id.clone();
    let request_span: Span = tracing::span!(tracing::Level::INFO, "DeletePet", request_id);

    Ok(deletion::handle(store, event.payload)
        .instrument(request_span)
        .await)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();

    let dynamodb_client: aws_sdk_dynamodb::Client =
        aws_sdk_dynamodb::Client::new(&aws_config::load_defaults(BehaviorVersion::latest()).await);
    let store: DynamoDbPetStore = DynamoDbPetStore::from_env(dynamodb_client);

    lambda_runtime::run(service_fn(|event: LambdaEvent<ApiGatewayProxyRequest>| {
        delete_pet(&store, event)
    }))
    .await
}
