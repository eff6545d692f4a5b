use async_trait::async_trait;
use model::pet::PetRecord;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use store::StoreErrorReason::{BadItem, MissingEntry};
use store::StoreOperation::{GetPet, PutPet};
use store::{PetStore, StoreError};

/// Registrations held in process memory, for tests and local runs.
pub struct InMemoryPetStore {
    records: Arc<Mutex<HashMap<String, Value>>>,
}

impl Default for InMemoryPetStore {
    fn default() -> Self {
        InMemoryPetStore {
            records: Arc::new(Mutex::new(Default::default())),
        }
    }
}

impl InMemoryPetStore {
    /// Seed a raw item directly, bypassing the record type.
    pub fn insert_item(&self, pet_id: &str, item: Value) {
        self.records
            .lock()
            .unwrap()
            .insert(pet_id.to_string(), item);
    }

    pub fn contains(&self, pet_id: &str) -> bool {
        self.records.lock().unwrap().contains_key(pet_id)
    }
}

#[async_trait]
impl PetStore for InMemoryPetStore {
    async fn put_pet(&self, record: &PetRecord) -> Result<(), StoreError> {
        let item: Value = serde_json::to_value(record).map_err(|err| {
            StoreError::new(record.pet_id.clone(), PutPet, BadItem(err.to_string()))
        })?;

        self.records
            .lock()
            .unwrap()
            .insert(record.pet_id.clone(), item);

        Ok(())
    }

    async fn get_pet(&self, pet_id: &str) -> Result<PetRecord, StoreError> {
        let guard = self.records.lock().unwrap();
        let item: &Value = guard
            .get(pet_id)
            .ok_or_else(|| StoreError::new(pet_id.to_string(), GetPet, MissingEntry))?;

        serde_json::from_value(item.clone())
            .map_err(|err| StoreError::new(pet_id.to_string(), GetPet, BadItem(err.to_string())))
    }

    async fn delete_pet(&self, pet_id: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.records.lock().unwrap().remove(pet_id))
    }

    async fn scan_pets(&self) -> Result<Vec<Value>, StoreError> {
        Ok(self.records.lock().unwrap().values().cloned().collect())
    }
}
