//! The running balance across all transactions.

use rust_decimal::Decimal;

use crate::{
    Error,
    store::DocumentStore,
    transaction::{Transaction, core::get_all_transactions},
};

/// Compute the balance of every transaction in `store`.
///
/// Income adds to the balance and expenses subtract from it.
///
/// # Errors
/// Returns an error if the transactions cannot be fetched, or
/// [Error::BalanceOverflow] if the sum does not fit in a [Decimal].
pub fn compute_balance(store: &dyn DocumentStore) -> Result<Decimal, Error> {
    let transactions = get_all_transactions(store)?;

    sum_balance(&transactions)
}

/// Sum the signed amounts of `transactions`.
///
/// # Errors
/// Returns [Error::BalanceOverflow] if the sum does not fit in a [Decimal].
pub fn sum_balance<'a>(
    transactions: impl IntoIterator<Item = &'a Transaction>,
) -> Result<Decimal, Error> {
    transactions
        .into_iter()
        .try_fold(Decimal::ZERO, |balance, transaction| {
            balance.checked_add(transaction.signed_amount())
        })
        .ok_or(Error::BalanceOverflow)
}
