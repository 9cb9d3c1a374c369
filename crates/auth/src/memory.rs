//! In-memory Identity Store
//!
//! Backs tests and local experiments without a database. Optional latency
//! simulates a slow upstream.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::identity::{Identity, IdentityStore, IdentityStoreError};

/// In-memory identity store keyed by user ID
#[derive(Debug, Clone, Default)]
pub struct InMemoryIdentityStore {
    users: Arc<RwLock<HashMap<i64, Identity>>>,
    latency: Option<Duration>,
}

impl InMemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every lookup by `latency`
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Insert or replace a user
    pub fn insert(&self, identity: Identity) {
        let mut users = self.users.write().unwrap_or_else(|e| e.into_inner());
        users.insert(identity.id, identity);
    }

    pub fn remove(&self, id: i64) -> Option<Identity> {
        let mut users = self.users.write().unwrap_or_else(|e| e.into_inner());
        users.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.users.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    async fn simulate_latency(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait::async_trait]
impl IdentityStore for InMemoryIdentityStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Identity>, IdentityStoreError> {
        self.simulate_latency().await;
        let users = self.users.read().unwrap_or_else(|e| e.into_inner());
        Ok(users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, IdentityStoreError> {
        self.simulate_latency().await;
        let users = self.users.read().unwrap_or_else(|e| e.into_inner());
        Ok(users
            .values()
            .find(|identity| identity.email.eq_ignore_ascii_case(email))
            .cloned())
    }
}
