//! Defines the add-transaction function.

use std::sync::Arc;

use axum::extract::{FromRef, State};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    AppState, Error, FunctionRequest, FunctionResponse,
    notification::AlertChannel,
    store::DocumentStore,
    timestamp::now_timestamp,
    transaction::{
        TransactionType,
        alert::check_low_balance,
        balance::compute_balance,
        core::{TransactionForm, put_transaction},
    },
};

/// The state needed to add a transaction.
#[derive(Debug, Clone)]
pub struct AddTransactionState {
    /// The store for transactions.
    pub transaction_store: Arc<dyn DocumentStore>,
    /// Where low-balance alerts go.
    pub alert_channel: AlertChannel,
}

impl FromRef<AppState> for AddTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
            alert_channel: state.alert_channel.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
struct AddTransactionResponse<'a> {
    message: &'a str,
    transaction_id: &'a str,
    balance: Decimal,
}

/// Record a new transaction and respond with the new balance.
///
/// Expenses that leave the balance negative trigger a low-balance alert. The
/// alert is best-effort and never changes the response.
pub fn add_transaction(request: &FunctionRequest, state: &AddTransactionState) -> FunctionResponse {
    match try_add_transaction(request, state) {
        Ok(response) => response,
        Err(error) => error.into(),
    }
}

fn try_add_transaction(
    request: &FunctionRequest,
    state: &AddTransactionState,
) -> Result<FunctionResponse, Error> {
    let form: TransactionForm = request.json_body()?;
    let transaction = form.into_builder()?.finalise(now_timestamp()?);

    put_transaction(&transaction, state.transaction_store.as_ref())?;
    tracing::info!(
        "added {} transaction {} for {}",
        transaction.transaction_type,
        transaction.id,
        transaction.amount
    );

    let balance = compute_balance(state.transaction_store.as_ref())?;

    if transaction.transaction_type == TransactionType::Expense {
        check_low_balance(balance, &state.alert_channel);
    }

    Ok(FunctionResponse::ok(&AddTransactionResponse {
        message: "Transaction added successfully",
        transaction_id: &transaction.id,
        balance,
    }))
}

/// A route handler for adding a transaction from a JSON body.
pub async fn add_transaction_endpoint(
    State(state): State<AddTransactionState>,
    body: String,
) -> FunctionResponse {
    add_transaction(&FunctionRequest::with_body(body), &state)
}
