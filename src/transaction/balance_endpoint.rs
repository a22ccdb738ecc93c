//! Defines the get-balance function.

use std::sync::Arc;

use axum::extract::{FromRef, State};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    AppState, Error, FunctionResponse,
    store::DocumentStore,
    transaction::{Transaction, balance::sum_balance, core::get_all_transactions},
};

/// The number of transactions returned alongside the balance.
pub const RECENT_TRANSACTION_LIMIT: usize = 20;

/// The state needed to report the balance.
#[derive(Debug, Clone)]
pub struct BalanceState {
    /// The store for transactions.
    pub transaction_store: Arc<dyn DocumentStore>,
}

impl FromRef<AppState> for BalanceState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
struct BalanceResponse {
    balance: Decimal,
    transactions: Vec<Transaction>,
    total_count: usize,
}

/// Respond with the balance, the most recent transactions and the number of transactions.
pub fn get_balance(state: &BalanceState) -> FunctionResponse {
    match try_get_balance(state) {
        Ok(response) => FunctionResponse::ok(&response),
        Err(error) => error.into(),
    }
}

fn try_get_balance(state: &BalanceState) -> Result<BalanceResponse, Error> {
    let mut transactions = get_all_transactions(state.transaction_store.as_ref())?;
    let balance = sum_balance(&transactions)?;
    let total_count = transactions.len();

    // Timestamps share one fixed-width UTC layout, so string order is time order.
    transactions.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    transactions.truncate(RECENT_TRANSACTION_LIMIT);

    Ok(BalanceResponse {
        balance,
        transactions,
        total_count,
    })
}

/// A route handler for getting the balance.
pub async fn get_balance_endpoint(State(state): State<BalanceState>) -> FunctionResponse {
    get_balance(&state)
}
