use async_trait::async_trait;
use model::pet::PetRecord;
use model::Error;
use serde_json::Value;
use std::fmt::{Display, Formatter};

/// Store pet registrations keyed by `pet_id`.
///
/// Typed operations (`put_pet`, `get_pet`) carry the full record. Operations
/// that read back arbitrary table contents (`delete_pet`'s previous value,
/// `scan_pets`) return loose JSON so partial records survive the trip.
#[async_trait]
pub trait PetStore: Send + Sync {
    /// Unconditional upsert of a registration.
    async fn put_pet(&self, record: &PetRecord) -> Result<(), StoreError>;

    /// Point lookup by `pet_id`. Absence is `StoreErrorReason::MissingEntry`.
    async fn get_pet(&self, pet_id: &str) -> Result<PetRecord, StoreError>;

    /// Point delete returning the previous item, if the store held one.
    async fn delete_pet(&self, pet_id: &str) -> Result<Option<Value>, StoreError>;

    /// Read every registration in the table.
    async fn scan_pets(&self) -> Result<Vec<Value>, StoreError>;
}

/// Errors arising from a storage operation.
#[derive(Debug)]
pub struct StoreError {
    pub pet_id: String,

    pub operation: StoreOperation,
    pub reason: StoreErrorReason,
}

#[derive(Debug)]
pub enum StoreErrorReason {
    // An expected record was missing.
    MissingEntry,
    // The stored item was not of the expected shape
    BadItem(String),
    // An error from the underlying table
    BackendFailure(Error),
}

#[derive(Debug, Clone)]
pub enum StoreOperation {
    PutPet,
    GetPet,
    DeletePet,
    ScanPets,
}

impl StoreError {
    pub fn new(pet_id: String, operation: StoreOperation, reason: StoreErrorReason) -> Self {
        StoreError {
            pet_id,
            operation,
            reason,
        }
    }

    /// Whether the error only reports an absent record.
    pub fn is_missing_entry(&self) -> bool {
        matches!(self.reason, StoreErrorReason::MissingEntry)
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(format!("{:?}", self).as_str())
    }
}

impl std::error::Error for StoreError {}
