//! PostgreSQL implementations of the store traits.
//!
//! Substring filters use `strpos`, so `%` and `_` in a query are matched literally.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::{AccountStore, StoreError, TransactionStore};
use crate::{
    db::DbPool,
    models::{
        account::{Account, AccountDraft},
        transaction::{DailyTotal, Transaction, TransactionDraft},
    },
};

const ACCOUNT_COLUMNS: &str =
    "id, user_id, name, account_type, balance, currency, iban, plaid_id, created_on, updated_on";

const TRANSACTION_COLUMNS: &str =
    "id, user_id, account_id, reference, amount, date, transaction_type, created_on, updated_on";

/// Account store backed by the `accounts` table.
#[derive(Debug, Clone)]
pub struct PgAccountStore {
    pool: DbPool,
}

impl PgAccountStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn create(&self, draft: AccountDraft) -> Result<Account, StoreError> {
        let account = sqlx::query_as::<_, Account>(&format!(
            r#"
            INSERT INTO accounts (user_id, name, account_type, balance, currency, iban, plaid_id, created_on)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {ACCOUNT_COLUMNS}
            "#
        ))
        .bind(draft.user_id)
        .bind(draft.name)
        .bind(draft.account_type)
        .bind(draft.balance)
        .bind(draft.currency)
        .bind(draft.iban)
        .bind(draft.plaid_id)
        .bind(draft.created_on)
        .fetch_one(&self.pool)
        .await?;

        Ok(account)
    }

    async fn save(&self, account: &Account) -> Result<Account, StoreError> {
        // created_on is never rewritten
        let saved = sqlx::query_as::<_, Account>(&format!(
            r#"
            UPDATE accounts
            SET user_id = $2,
                name = $3,
                account_type = $4,
                balance = $5,
                currency = $6,
                iban = $7,
                plaid_id = $8,
                updated_on = $9
            WHERE id = $1
            RETURNING {ACCOUNT_COLUMNS}
            "#
        ))
        .bind(account.id)
        .bind(account.user_id)
        .bind(&account.name)
        .bind(&account.account_type)
        .bind(account.balance)
        .bind(&account.currency)
        .bind(&account.iban)
        .bind(&account.plaid_id)
        .bind(account.updated_on)
        .fetch_one(&self.pool)
        .await?;

        Ok(saved)
    }

    async fn get(&self, id: i64) -> Result<Option<Account>, StoreError> {
        let account = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    async fn find_by_user_and_name(
        &self,
        user_id: i64,
        query: &str,
    ) -> Result<Vec<Account>, StoreError> {
        let accounts = sqlx::query_as::<_, Account>(&format!(
            r#"
            SELECT {ACCOUNT_COLUMNS}
            FROM accounts
            WHERE user_id = $1 AND strpos(name, $2) > 0
            ORDER BY id
            "#
        ))
        .bind(user_id)
        .bind(query)
        .fetch_all(&self.pool)
        .await?;

        Ok(accounts)
    }

    async fn delete(&self, account: &Account) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(account.id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

/// Transaction store backed by the `transactions` table.
#[derive(Debug, Clone)]
pub struct PgTransactionStore {
    pool: DbPool,
}

impl PgTransactionStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TransactionStore for PgTransactionStore {
    async fn create(&self, draft: TransactionDraft) -> Result<Transaction, StoreError> {
        let transaction = sqlx::query_as::<_, Transaction>(&format!(
            r#"
            INSERT INTO transactions (user_id, account_id, reference, amount, date, transaction_type, created_on)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {TRANSACTION_COLUMNS}
            "#
        ))
        .bind(draft.user_id)
        .bind(draft.account_id)
        .bind(draft.reference)
        .bind(draft.amount)
        .bind(draft.date)
        .bind(draft.transaction_type)
        .bind(draft.created_on)
        .fetch_one(&self.pool)
        .await?;

        Ok(transaction)
    }

    async fn save(&self, transaction: &Transaction) -> Result<Transaction, StoreError> {
        let saved = sqlx::query_as::<_, Transaction>(&format!(
            r#"
            UPDATE transactions
            SET user_id = $2,
                account_id = $3,
                reference = $4,
                amount = $5,
                date = $6,
                transaction_type = $7,
                updated_on = $8
            WHERE id = $1
            RETURNING {TRANSACTION_COLUMNS}
            "#
        ))
        .bind(transaction.id)
        .bind(transaction.user_id)
        .bind(transaction.account_id)
        .bind(&transaction.reference)
        .bind(transaction.amount)
        .bind(transaction.date)
        .bind(&transaction.transaction_type)
        .bind(transaction.updated_on)
        .fetch_one(&self.pool)
        .await?;

        Ok(saved)
    }

    async fn get(&self, id: i64) -> Result<Option<Transaction>, StoreError> {
        let transaction = sqlx::query_as::<_, Transaction>(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM transactions WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(transaction)
    }

    async fn find_by_user_and_reference(
        &self,
        user_id: i64,
        query: &str,
    ) -> Result<Vec<Transaction>, StoreError> {
        let transactions = sqlx::query_as::<_, Transaction>(&format!(
            r#"
            SELECT {TRANSACTION_COLUMNS}
            FROM transactions
            WHERE user_id = $1 AND strpos(reference, $2) > 0
            ORDER BY id
            "#
        ))
        .bind(user_id)
        .bind(query)
        .fetch_all(&self.pool)
        .await?;

        Ok(transactions)
    }

    async fn find_by_user_and_date_between(
        &self,
        user_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Transaction>, StoreError> {
        let transactions = sqlx::query_as::<_, Transaction>(&format!(
            r#"
            SELECT {TRANSACTION_COLUMNS}
            FROM transactions
            WHERE user_id = $1 AND date BETWEEN $2 AND $3
            ORDER BY date, id
            "#
        ))
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(transactions)
    }

    async fn daily_totals(
        &self,
        user_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyTotal>, StoreError> {
        let totals = sqlx::query_as::<_, DailyTotal>(
            r#"
            SELECT date, SUM(amount) AS total
            FROM transactions
            WHERE user_id = $1 AND date BETWEEN $2 AND $3
            GROUP BY date
            ORDER BY date ASC
            "#,
        )
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(totals)
    }

    async fn delete(&self, transaction: &Transaction) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM transactions WHERE id = $1")
            .bind(transaction.id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
