// src/domain/model/client.rs
use serde::{Deserialize, Serialize};

/// Read-only customer reference data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: String,
    pub name: String,
    pub address: String,
    pub phone: String,
}

impl Client {
    pub fn new(id: &str, name: &str, address: &str, phone: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            address: address.to_string(),
            phone: phone.to_string(),
        }
    }

    /// Case-insensitive substring match on name and address.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query) || self.address.to_lowercase().contains(&query)
    }
}
