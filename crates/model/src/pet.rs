use serde::{Deserialize, Serialize};

/// A single pet registration.
///
/// `pet_id` is assigned once at registration and keys the table. Records are
/// never updated in place; the only mutation is deletion.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PetRecord {
    pub pet_id: String,
    pub pet_name: String,
    pub owner_name: String,
    pub pet_age: u8,
    pub created_at: String,
}
