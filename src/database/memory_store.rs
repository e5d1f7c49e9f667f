use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::models::{CardRecord, CashCard};
use crate::database::store::{CardStore, StoreError};
use crate::paging::{Page, PageRequest, SortDirection, SortField};

/// In-memory card store for tests and DATABASE_URL-less dev runs. Ordering
/// and pagination semantics match the Postgres store.
#[derive(Debug, Default)]
pub struct InMemoryCardStore {
    cards: RwLock<HashMap<Uuid, CashCard>>,
}

impl InMemoryCardStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn compare(a: &CashCard, b: &CashCard, field: SortField) -> Ordering {
    let primary = match field {
        SortField::Amount => a.amount.cmp(&b.amount),
        SortField::Id => a.id.cmp(&b.id),
        SortField::Owner => a.owner.cmp(&b.owner),
    };
    // Ascending id tie-break, matching the SQL ORDER BY
    primary.then_with(|| a.id.cmp(&b.id))
}

#[async_trait]
impl CardStore for InMemoryCardStore {
    async fn find_one_by_id_and_owner(
        &self,
        id: Uuid,
        owner: &str,
    ) -> Result<Option<CashCard>, StoreError> {
        let cards = self.cards.read().await;
        Ok(cards.get(&id).filter(|c| c.owner == owner).cloned())
    }

    async fn find_page_by_owner(
        &self,
        owner: &str,
        page: &PageRequest,
    ) -> Result<Page<CashCard>, StoreError> {
        let cards = self.cards.read().await;
        let mut owned: Vec<CashCard> = cards
            .values()
            .filter(|c| c.owner == owner)
            .cloned()
            .collect();

        owned.sort_by(|a, b| {
            let ordering = compare(a, b, page.sort.field);
            match page.sort.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });

        let rows: Vec<CashCard> = owned
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.size as usize + 1)
            .collect();

        Ok(Page::from_overfetch(rows, page.size as usize))
    }

    async fn exists_by_id_and_owner(&self, id: Uuid, owner: &str) -> Result<bool, StoreError> {
        let cards = self.cards.read().await;
        Ok(cards.get(&id).is_some_and(|c| c.owner == owner))
    }

    async fn save(&self, record: CardRecord) -> Result<CashCard, StoreError> {
        let id = record.id.unwrap_or_else(Uuid::new_v4);
        let card = CashCard {
            id,
            amount: record.amount,
            owner: record.owner,
        };

        let mut cards = self.cards.write().await;
        cards.insert(id, card.clone());
        Ok(card)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), StoreError> {
        let mut cards = self.cards.write().await;
        cards.remove(&id);
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paging::SortSpec;
    use rust_decimal::Decimal;

    fn page(size: u32, sort: &str) -> PageRequest {
        PageRequest {
            page: 0,
            size,
            sort: SortSpec::parse(sort).unwrap(),
        }
    }

    fn amount(raw: &str) -> Decimal {
        raw.parse().unwrap()
    }

    #[tokio::test]
    async fn save_assigns_an_id_when_absent() {
        let store = InMemoryCardStore::new();
        let saved = store
            .save(CardRecord::new(amount("250.00"), "sarah1"))
            .await
            .unwrap();

        let found = store
            .find_one_by_id_and_owner(saved.id, "sarah1")
            .await
            .unwrap();
        assert_eq!(found, Some(saved));
    }

    #[tokio::test]
    async fn save_replaces_when_id_present() {
        let store = InMemoryCardStore::new();
        let saved = store
            .save(CardRecord::new(amount("10.00"), "sarah1"))
            .await
            .unwrap();

        let replaced = store
            .save(CardRecord::replacing(saved.id, amount("19.99"), "sarah1"))
            .await
            .unwrap();
        assert_eq!(replaced.id, saved.id);
        assert_eq!(replaced.amount, amount("19.99"));
    }

    #[tokio::test]
    async fn lookups_are_owner_scoped() {
        let store = InMemoryCardStore::new();
        let card = store
            .save(CardRecord::new(amount("777.77"), "kumar2"))
            .await
            .unwrap();

        assert!(store
            .find_one_by_id_and_owner(card.id, "sarah1")
            .await
            .unwrap()
            .is_none());
        assert!(!store.exists_by_id_and_owner(card.id, "sarah1").await.unwrap());
        assert!(store.exists_by_id_and_owner(card.id, "kumar2").await.unwrap());
    }

    #[tokio::test]
    async fn pages_sort_and_flag_overflow() {
        let store = InMemoryCardStore::new();
        for raw in ["123.45", "1.00", "150.00"] {
            store
                .save(CardRecord::new(amount(raw), "sarah1"))
                .await
                .unwrap();
        }
        store
            .save(CardRecord::new(amount("999.99"), "kumar2"))
            .await
            .unwrap();

        let result = store
            .find_page_by_owner("sarah1", &page(2, "amount"))
            .await
            .unwrap();
        let amounts: Vec<Decimal> = result.records.iter().map(|c| c.amount).collect();
        assert_eq!(amounts, vec![amount("1.00"), amount("123.45")]);
        assert!(result.has_more);

        let result = store
            .find_page_by_owner("sarah1", &page(5, "amount,desc"))
            .await
            .unwrap();
        let amounts: Vec<Decimal> = result.records.iter().map(|c| c.amount).collect();
        assert_eq!(
            amounts,
            vec![amount("150.00"), amount("123.45"), amount("1.00")]
        );
        assert!(!result.has_more);
    }

    #[tokio::test]
    async fn delete_is_a_noop_for_missing_ids() {
        let store = InMemoryCardStore::new();
        store.delete_by_id(Uuid::new_v4()).await.unwrap();

        let saved = store
            .save(CardRecord::new(amount("5.00"), "sarah1"))
            .await
            .unwrap();
        store.delete_by_id(saved.id).await.unwrap();
        assert!(store
            .find_one_by_id_and_owner(saved.id, "sarah1")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn equal_amounts_page_in_stable_id_order() {
        let store = InMemoryCardStore::new();
        for _ in 0..3 {
            store
                .save(CardRecord::new(amount("50.00"), "sarah1"))
                .await
                .unwrap();
        }

        let first = store
            .find_page_by_owner("sarah1", &page(3, "amount"))
            .await
            .unwrap();
        let second = store
            .find_page_by_owner("sarah1", &page(3, "amount"))
            .await
            .unwrap();
        assert_eq!(first.records, second.records);

        let ids: Vec<Uuid> = first.records.iter().map(|c| c.id).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
    }
}
