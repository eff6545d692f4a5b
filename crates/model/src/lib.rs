pub mod env;
pub mod pet;

pub type Error = Box<dyn std::error::Error + Send + Sync>;
