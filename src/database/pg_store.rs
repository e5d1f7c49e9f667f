use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::{CardRecord, CashCard};
use crate::database::store::{CardStore, StoreError};
use crate::paging::{Page, PageRequest};

/// Postgres-backed card store with hand-written parameterized queries.
pub struct PgCardStore {
    pool: PgPool,
}

impl PgCardStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the cashcards table when absent. Called once at startup.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS cashcards (
                id UUID PRIMARY KEY,
                amount NUMERIC NOT NULL,
                owner TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS cashcards_owner_idx ON cashcards (owner)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

#[async_trait]
impl CardStore for PgCardStore {
    async fn find_one_by_id_and_owner(
        &self,
        id: Uuid,
        owner: &str,
    ) -> Result<Option<CashCard>, StoreError> {
        let card = sqlx::query_as::<_, CashCard>(
            r#"SELECT id, amount, owner FROM cashcards WHERE id = $1 AND owner = $2"#,
        )
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await?;

        Ok(card)
    }

    async fn find_page_by_owner(
        &self,
        owner: &str,
        page: &PageRequest,
    ) -> Result<Page<CashCard>, StoreError> {
        // Over-fetch one row past the page to learn whether more follow.
        // The ORDER BY fragment comes from the sort whitelist, never from
        // raw client input.
        let sql = format!(
            r#"SELECT id, amount, owner FROM cashcards WHERE owner = $1 {} LIMIT $2 OFFSET $3"#,
            page.sort.order_by_sql()
        );

        let rows = sqlx::query_as::<_, CashCard>(&sql)
            .bind(owner)
            .bind(i64::from(page.size) + 1)
            .bind(page.offset() as i64)
            .fetch_all(&self.pool)
            .await?;

        Ok(Page::from_overfetch(rows, page.size as usize))
    }

    async fn exists_by_id_and_owner(&self, id: Uuid, owner: &str) -> Result<bool, StoreError> {
        let exists: bool = sqlx::query_scalar(
            r#"SELECT EXISTS(SELECT 1 FROM cashcards WHERE id = $1 AND owner = $2)"#,
        )
        .bind(id)
        .bind(owner)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn save(&self, record: CardRecord) -> Result<CashCard, StoreError> {
        let id = record.id.unwrap_or_else(Uuid::new_v4);

        let card = sqlx::query_as::<_, CashCard>(
            r#"
            INSERT INTO cashcards (id, amount, owner)
            VALUES ($1, $2, $3)
            ON CONFLICT (id) DO UPDATE SET amount = EXCLUDED.amount, owner = EXCLUDED.owner
            RETURNING id, amount, owner
            "#,
        )
        .bind(id)
        .bind(record.amount)
        .bind(&record.owner)
        .fetch_one(&self.pool)
        .await?;

        Ok(card)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), StoreError> {
        sqlx::query(r#"DELETE FROM cashcards WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
