use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::Identity;
use crate::database::models::{CardRecord, CashCard};
use crate::database::store::{CardStore, StoreError};
use crate::paging::{Page, PageRequest};
use crate::services::access::AccessGuard;

/// Orchestrates the guard and the store for the five card operations.
/// Every store call carries the caller's owner predicate; there is no path
/// through this service that issues an unscoped lookup.
pub struct CardService {
    store: Arc<dyn CardStore>,
    guard: AccessGuard,
}

impl CardService {
    pub fn new(store: Arc<dyn CardStore>) -> Self {
        let guard = AccessGuard::new(store.clone());
        Self { store, guard }
    }

    /// Scoped point lookup. `None` covers both "no such card" and "owned by
    /// someone else".
    pub async fn find_card(
        &self,
        identity: &Identity,
        id: Uuid,
    ) -> Result<Option<CashCard>, StoreError> {
        self.store.find_one_by_id_and_owner(id, &identity.name).await
    }

    pub async fn list_cards(
        &self,
        identity: &Identity,
        page: &PageRequest,
    ) -> Result<Page<CashCard>, StoreError> {
        self.store.find_page_by_owner(&identity.name, page).await
    }

    /// Create a card owned by the caller. Whatever owner or id the client
    /// may have asserted upstream never reaches this point.
    pub async fn create_card(
        &self,
        identity: &Identity,
        amount: Decimal,
    ) -> Result<CashCard, StoreError> {
        self.store
            .save(CardRecord::new(amount, identity.name.clone()))
            .await
    }

    /// Full replace: the id survives, the owner is re-stamped from the
    /// caller, the amount is taken from the request.
    pub async fn update_card(
        &self,
        identity: &Identity,
        id: Uuid,
        amount: Decimal,
    ) -> Result<Option<CashCard>, StoreError> {
        let Some(existing) = self.store.find_one_by_id_and_owner(id, &identity.name).await? else {
            return Ok(None);
        };

        let saved = self
            .store
            .save(CardRecord::replacing(existing.id, amount, identity.name.clone()))
            .await?;
        Ok(Some(saved))
    }

    /// Returns false for both a missing id and a foreign owner; the record
    /// is only touched when the guard confirms ownership.
    pub async fn delete_card(&self, identity: &Identity, id: Uuid) -> Result<bool, StoreError> {
        if !self.guard.is_owner(&identity.name, id).await? {
            return Ok(false);
        }

        self.store.delete_by_id(id).await?;
        Ok(true)
    }
}
