use crate::item::item_to_value;
use async_trait::async_trait;
use aws_sdk_dynamodb::operation::delete_item::DeleteItemOutput;
use aws_sdk_dynamodb::operation::get_item::GetItemOutput;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use model::env::{DEFAULT_PET_TABLE, PET_TABLE_NAME};
use model::pet::PetRecord;
use serde_json::Value;
use std::collections::HashMap;
use store::StoreErrorReason::{BackendFailure, BadItem, MissingEntry};
use store::StoreOperation::{DeletePet, GetPet, PutPet, ScanPets};
use store::{PetStore, StoreError};

mod item;

const PET_ID: &str = "pet_id";

/// Pet registrations held in a DynamoDB table keyed by `pet_id`.
pub struct DynamoDbPetStore {
    table_name: String,
    dynamodb_client: aws_sdk_dynamodb::Client,
    consistent_read: bool,
}

impl DynamoDbPetStore {
    pub fn new(dynamodb_client: aws_sdk_dynamodb::Client, table_name: String) -> Self {
        DynamoDbPetStore {
            table_name,
            dynamodb_client,
            consistent_read: false,
        }
    }

    /// Build a store against the table named by `PET_TABLE_NAME`.
    pub fn from_env(dynamodb_client: aws_sdk_dynamodb::Client) -> Self {
        let table_name: String =
            std::env::var(PET_TABLE_NAME).unwrap_or_else(|_| DEFAULT_PET_TABLE.to_string());

        DynamoDbPetStore::new(dynamodb_client, table_name)
    }

    pub fn with_consistent_read(mut self, consistent_read: bool) -> Self {
        self.consistent_read = consistent_read;
        self
    }
}

#[async_trait]
impl PetStore for DynamoDbPetStore {
    async fn put_pet(&self, record: &PetRecord) -> Result<(), StoreError> {
        let item: HashMap<String, AttributeValue> = serde_dynamo::to_item(record)
            .map_err(|err| {
                StoreError::new(record.pet_id.clone(), PutPet, BadItem(err.to_string()))
            })?;

        self.dynamodb_client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|err| {
                StoreError::new(record.pet_id.clone(), PutPet, BackendFailure(err.into()))
            })?;

        Ok(())
    }

    async fn get_pet(&self, pet_id: &str) -> Result<PetRecord, StoreError> {
        let output: GetItemOutput = self
            .dynamodb_client
            .get_item()
            .table_name(&self.table_name)
            .consistent_read(self.consistent_read)
            .key(PET_ID, AttributeValue::S(pet_id.to_string()))
            .send()
            .await
            .map_err(|err| {
                StoreError::new(pet_id.to_string(), GetPet, BackendFailure(err.into()))
            })?;

        let item: HashMap<String, AttributeValue> = output
            .item
            .ok_or_else(|| StoreError::new(pet_id.to_string(), GetPet, MissingEntry))?;

        serde_dynamo::from_item(item)
            .map_err(|err| StoreError::new(pet_id.to_string(), GetPet, BadItem(err.to_string())))
    }

    async fn delete_pet(&self, pet_id: &str) -> Result<Option<Value>, StoreError> {
        let output: DeleteItemOutput = self
            .dynamodb_client
            .delete_item()
            .table_name(&self.table_name)
            .key(PET_ID, AttributeValue::S(pet_id.to_string()))
            .return_values(ReturnValue::AllOld)
            .send()
            .await
            .map_err(|err| {
                StoreError::new(pet_id.to_string(), DeletePet, BackendFailure(err.into()))
            })?;

        Ok(output
            .attributes
            .map(|attributes| item_to_value(&attributes)))
    }

    async fn scan_pets(&self) -> Result<Vec<Value>, StoreError> {
        let mut pets: Vec<Value> = Vec::new();

        // Follow LastEvaluatedKey so large tables are read in full
        let mut pages = self
            .dynamodb_client
            .scan()
            .table_name(&self.table_name)
            .into_paginator()
            .items()
            .send();

        while let Some(item) = pages.next().await {
            let item: HashMap<String, AttributeValue> = item.map_err(|err| {
                StoreError::new(String::new(), ScanPets, BackendFailure(err.into()))
            })?;

            pets.push(item_to_value(&item));
        }

        Ok(pets)
    }
}
