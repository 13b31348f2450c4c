// src/infrastructure/repository/client_repository.rs
use async_trait::async_trait;

use crate::domain::errors::StorageResult;
use crate::domain::model::Client;
use crate::domain::repository::ClientRepository;

/// Fixed client directory used until client management has its own store.
pub struct StaticClientRepository {
    clients: Vec<Client>,
}

impl StaticClientRepository {
    pub fn new(clients: Vec<Client>) -> Self {
        Self { clients }
    }
}

impl Default for StaticClientRepository {
    fn default() -> Self {
        Self::new(vec![
            Client::new("client_1", "Abarrotes La Esquina", "Av. Principal 123", "555-0101"),
            Client::new("client_2", "Supermercado El Ahorro", "Calle 5 de Mayo 456", "555-0102"),
            Client::new("client_3", "Tienda Doña María", "Colonia Centro 789", "555-0103"),
            Client::new("client_4", "Minisuper Los Ángeles", "Av. Revolución 321", "555-0104"),
            Client::new("client_5", "Farmacia San José", "Blvd. Hidalgo 555", "555-0105"),
            Client::new("client_6", "Papelería El Estudiante", "Calle Morelos 888", "555-0106"),
        ])
    }
}

#[async_trait]
impl ClientRepository for StaticClientRepository {
    async fn get_all(&self) -> StorageResult<Vec<Client>> {
        Ok(self.clients.clone())
    }

    async fn get_by_id(&self, id: &str) -> StorageResult<Option<Client>> {
        Ok(self.clients.iter().find(|c| c.id == id).cloned())
    }

    async fn search(&self, query: &str) -> StorageResult<Vec<Client>> {
        Ok(self
            .clients
            .iter()
            .filter(|c| c.matches(query))
            .cloned()
            .collect())
    }
}
