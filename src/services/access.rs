use std::sync::Arc;
use uuid::Uuid;

use crate::database::store::{CardStore, StoreError};

/// Authorization kernel: decides whether an identity owns a record.
///
/// A record that does not exist and a record owned by someone else produce
/// the same negative result; the existence of another user's record is
/// never disclosed.
pub struct AccessGuard {
    store: Arc<dyn CardStore>,
}

impl AccessGuard {
    pub fn new(store: Arc<dyn CardStore>) -> Self {
        Self { store }
    }

    pub async fn is_owner(&self, owner: &str, card_id: Uuid) -> Result<bool, StoreError> {
        self.store.exists_by_id_and_owner(card_id, owner).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory_store::InMemoryCardStore;
    use crate::database::models::CardRecord;

    #[tokio::test]
    async fn missing_and_foreign_records_are_indistinguishable() {
        let store = Arc::new(InMemoryCardStore::new());
        let card = store
            .save(CardRecord::new("100.00".parse().unwrap(), "kumar2"))
            .await
            .unwrap();

        let guard = AccessGuard::new(store);
        assert!(guard.is_owner("kumar2", card.id).await.unwrap());
        assert!(!guard.is_owner("sarah1", card.id).await.unwrap());
        assert!(!guard.is_owner("sarah1", Uuid::new_v4()).await.unwrap());
    }
}
