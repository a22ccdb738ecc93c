//! Defines the core data models and store queries for transactions.

use std::{fmt::Display, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::{
    Error,
    store::{DocumentStore, from_document, to_document},
};

// ============================================================================
// MODELS
// ============================================================================

/// Whether a transaction adds money to or takes money from the balance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money spent.
    #[default]
    Expense,
    /// Money earned.
    Income,
}

impl FromStr for TransactionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "expense" => Ok(TransactionType::Expense),
            "income" => Ok(TransactionType::Income),
            other => Err(Error::InvalidField(format!(
                "invalid transaction type \"{other}\": expected \"expense\" or \"income\""
            ))),
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Expense => write!(f, "expense"),
            TransactionType::Income => write!(f, "income"),
        }
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// Transactions are never edited once recorded. To create a new
/// `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The unique ID of the transaction.
    pub id: String,
    /// The amount of money spent or earned, stored as a decimal string.
    ///
    /// The sign of the balance change comes from `transaction_type`, the
    /// amount is used exactly as the client sent it.
    pub amount: Decimal,
    /// What the money was spent on or earned from, e.g. "groceries".
    pub category: String,
    /// A text description of what the transaction was for.
    pub description: String,
    /// Whether this is an expense or income.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// When the transaction was recorded.
    pub timestamp: String,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(amount: Decimal) -> TransactionBuilder {
        TransactionBuilder {
            id: None,
            amount,
            category: DEFAULT_CATEGORY.to_owned(),
            description: String::new(),
            transaction_type: TransactionType::default(),
        }
    }

    /// The change this transaction makes to the balance.
    pub fn signed_amount(&self) -> Decimal {
        match self.transaction_type {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }
}

/// The category given to transactions that do not name one.
pub const DEFAULT_CATEGORY: &str = "other";

/// A builder for creating [Transaction] instances.
///
/// Optional fields start with the same defaults the add-transaction function
/// uses. Call [TransactionBuilder::finalise] with the record timestamp to get
/// the [Transaction].
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionBuilder {
    /// The client supplied ID, or `None` to generate one.
    pub id: Option<String>,
    /// The amount of money spent or earned.
    pub amount: Decimal,
    /// Defaults to [DEFAULT_CATEGORY].
    pub category: String,
    /// Defaults to an empty string.
    pub description: String,
    /// Defaults to [TransactionType::Expense].
    pub transaction_type: TransactionType,
}

impl TransactionBuilder {
    /// Set the ID for the transaction.
    pub fn id(mut self, id: Option<String>) -> Self {
        self.id = id;
        self
    }

    /// Set the category for the transaction.
    pub fn category(mut self, category: &str) -> Self {
        self.category = category.to_owned();
        self
    }

    /// Set the description for the transaction.
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_owned();
        self
    }

    /// Set whether the transaction is an expense or income.
    pub fn transaction_type(mut self, transaction_type: TransactionType) -> Self {
        self.transaction_type = transaction_type;
        self
    }

    /// Create the transaction, generating an ID if none was set.
    pub fn finalise(self, timestamp: String) -> Transaction {
        Transaction {
            id: self
                .id
                .filter(|id| !id.is_empty())
                .unwrap_or_else(generate_transaction_id),
            amount: self.amount,
            category: self.category,
            description: self.description,
            transaction_type: self.transaction_type,
            timestamp,
        }
    }
}

fn generate_transaction_id() -> String {
    format!("trans-{}", Uuid::new_v4())
}

/// The request body for adding a transaction.
#[derive(Debug, Default, Deserialize)]
pub struct TransactionForm {
    /// A JSON number or a numeric string.
    #[serde(default)]
    pub amount: Option<Value>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "type")]
    pub transaction_type: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
}

impl TransactionForm {
    /// Validate the form and turn it into a [TransactionBuilder].
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::MissingFields] if `amount` is absent or null,
    /// - [Error::InvalidAmount] if `amount` is not a decimal number,
    /// - or [Error::InvalidField] if `type` is not "expense" or "income".
    pub fn into_builder(self) -> Result<TransactionBuilder, Error> {
        let amount = match self.amount {
            None | Some(Value::Null) => {
                return Err(Error::MissingFields(
                    "Missing required field: amount".to_owned(),
                ));
            }
            Some(value) => parse_amount(&value)?,
        };

        let transaction_type = match self.transaction_type.as_deref() {
            Some(transaction_type) => transaction_type.parse()?,
            None => TransactionType::default(),
        };

        let mut builder = Transaction::build(amount)
            .id(self.id)
            .transaction_type(transaction_type);

        if let Some(category) = self.category {
            builder = builder.category(&category);
        }

        if let Some(description) = self.description {
            builder = builder.description(&description);
        }

        Ok(builder)
    }
}

/// Read a transaction amount from a JSON number or numeric string.
///
/// JSON numbers keep the digits the client sent, so
/// `1234567890.123456789` is read exactly rather than through `f64`.
///
/// # Errors
/// Returns [Error::InvalidAmount] if `value` is not a decimal number.
pub fn parse_amount(value: &Value) -> Result<Decimal, Error> {
    let text = match value {
        Value::String(text) => text.trim().to_owned(),
        Value::Number(number) => number.to_string(),
        other => return Err(Error::InvalidAmount(other.to_string())),
    };

    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| Error::InvalidAmount(text))
}

// ============================================================================
// STORE FUNCTIONS
// ============================================================================

/// Save `transaction` to `store`.
///
/// # Errors
/// Returns an error from the store.
pub fn put_transaction(transaction: &Transaction, store: &dyn DocumentStore) -> Result<(), Error> {
    store.put(to_document(transaction)?)
}

/// Get every transaction in `store`.
///
/// # Errors
/// Returns an error from the store, or [Error::CorruptDocument] if a stored
/// document is not a transaction.
pub fn get_all_transactions(store: &dyn DocumentStore) -> Result<Vec<Transaction>, Error> {
    store.scan()?.into_iter().map(from_document).collect()
}

// ============================================================================
// TESTS
// ============================================================================
