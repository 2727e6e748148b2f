use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::RefreshToken;
use auth::StoreError;
use auth::TokenStore;
use chrono::DateTime;
use chrono::Utc;

/// Token store backed by a map, with the same revocation semantics as the
/// Postgres store.
#[derive(Default)]
pub struct InMemoryTokenStore {
    records: Mutex<HashMap<String, RefreshToken>>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

#[async_trait]
impl TokenStore for InMemoryTokenStore {
    async fn put(&self, record: RefreshToken) -> Result<(), StoreError> {
        let mut records = self.records.lock().unwrap();
        if records.contains_key(&record.token) {
            return Err(StoreError::Duplicate);
        }
        records.insert(record.token.clone(), record);
        Ok(())
    }

    async fn get(&self, token: &str) -> Result<Option<RefreshToken>, StoreError> {
        Ok(self.records.lock().unwrap().get(token).cloned())
    }

    async fn set_revoked(&self, token: &str, at: DateTime<Utc>) -> Result<u64, StoreError> {
        let mut records = self.records.lock().unwrap();
        match records.get_mut(token) {
            Some(record) => {
                if record.revoked_at.is_none() {
                    record.revoked_at = Some(at);
                    record.updated_at = at;
                }
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_all(&self) -> Result<(), StoreError> {
        self.records.lock().unwrap().clear();
        Ok(())
    }
}
