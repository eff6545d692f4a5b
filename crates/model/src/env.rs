/// Environment variable naming the DynamoDB table holding pet registrations.
pub const PET_TABLE_NAME: &'static str = "PET_TABLE_NAME";

/// Table used when the environment does not override it.
pub const DEFAULT_PET_TABLE: &'static str = "cadastropet";
