use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::database::models::{CardRecord, CashCard};
use crate::paging::{Page, PageRequest};

/// Errors from card store implementations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Ownership-filtered CRUD and pagination over cash cards.
///
/// Every query method carries the owner predicate explicitly; there is no
/// unscoped lookup on this interface, so a caller cannot accidentally
/// observe another owner's record. Queries are named and parameterized -
/// the mapping from method to query logic is hand-written in each
/// implementation.
#[async_trait]
pub trait CardStore: Send + Sync {
    /// The scoped point lookup: a miss and a wrong-owner hit are the same
    /// `None` to the caller.
    async fn find_one_by_id_and_owner(
        &self,
        id: Uuid,
        owner: &str,
    ) -> Result<Option<CashCard>, StoreError>;

    async fn find_page_by_owner(
        &self,
        owner: &str,
        page: &PageRequest,
    ) -> Result<Page<CashCard>, StoreError>;

    async fn exists_by_id_and_owner(&self, id: Uuid, owner: &str) -> Result<bool, StoreError>;

    /// Persist a card, assigning an id when the record carries none.
    async fn save(&self, record: CardRecord) -> Result<CashCard, StoreError>;

    /// Remove a card by id. A no-op when the id does not exist.
    async fn delete_by_id(&self, id: Uuid) -> Result<(), StoreError>;

    /// Liveness probe for the health endpoint.
    async fn ping(&self) -> Result<(), StoreError>;
}
