//! Presence checks for create requests.
//!
//! Each validator reports one message per missing required field, in a fixed order. An empty
//! list means the request can be turned into a draft and inserted. Values are never range or
//! format checked here.

use chrono::{DateTime, Utc};

use crate::models::{
    account::{AccountDraft, NewAccount},
    transaction::{NewTransaction, TransactionDraft},
};

/// List the required account fields missing from `account`.
pub fn validate_account(account: &NewAccount) -> Vec<String> {
    let mut errors = Vec::new();
    if account.user_id.is_none() {
        errors.push("User ID cannot be NULL.".to_string());
    }
    if account.name.is_none() {
        errors.push("Account Name cannot be NULL.".to_string());
    }
    if account.account_type.is_none() {
        errors.push("Account Type cannot be NULL.".to_string());
    }
    if account.balance.is_none() {
        errors.push("Account Balance cannot be NULL.".to_string());
    }
    if account.currency.is_none() {
        errors.push("Account Currency cannot be NULL.".to_string());
    }
    errors
}

/// List the required transaction fields missing from `transaction`.
pub fn validate_transaction(transaction: &NewTransaction) -> Vec<String> {
    let mut errors = Vec::new();
    if transaction.user_id.is_none() {
        errors.push("User ID cannot be NULL.".to_string());
    }
    if transaction.account_id.is_none() {
        errors.push("Account ID cannot be NULL.".to_string());
    }
    if transaction.reference.is_none() {
        errors.push("Transaction Reference cannot be NULL.".to_string());
    }
    if transaction.amount.is_none() {
        errors.push("Transaction Amount cannot be NULL.".to_string());
    }
    if transaction.date.is_none() {
        errors.push("Transaction Date cannot be NULL.".to_string());
    }
    if transaction.transaction_type.is_none() {
        errors.push("Transaction Type cannot be NULL.".to_string());
    }
    errors
}

impl NewAccount {
    /// Validate the request and stamp it with its creation time.
    ///
    /// # Errors
    ///
    /// Returns the full violation list from [validate_account] if any field is missing.
    pub fn into_draft(self, created_on: DateTime<Utc>) -> Result<AccountDraft, Vec<String>> {
        let errors = validate_account(&self);
        let (Some(user_id), Some(name), Some(account_type), Some(balance), Some(currency)) = (
            self.user_id,
            self.name,
            self.account_type,
            self.balance,
            self.currency,
        ) else {
            return Err(errors);
        };

        Ok(AccountDraft {
            user_id,
            name,
            account_type,
            balance,
            currency,
            iban: self.iban,
            plaid_id: self.plaid_id,
            created_on,
        })
    }
}

impl NewTransaction {
    /// Validate the request and stamp it with its creation time.
    ///
    /// # Errors
    ///
    /// Returns the full violation list from [validate_transaction] if any field is missing.
    pub fn into_draft(self, created_on: DateTime<Utc>) -> Result<TransactionDraft, Vec<String>> {
        let errors = validate_transaction(&self);
        let (
            Some(user_id),
            Some(account_id),
            Some(reference),
            Some(amount),
            Some(date),
            Some(transaction_type),
        ) = (
            self.user_id,
            self.account_id,
            self.reference,
            self.amount,
            self.date,
            self.transaction_type,
        )
        else {
            return Err(errors);
        };

        Ok(TransactionDraft {
            user_id,
            account_id,
            reference,
            amount,
            date,
            transaction_type,
            created_on,
        })
    }
}
