//! The budget tracker.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and `TransactionBuilder` for creating transactions
//! - The balance calculation shared by every function that reports a balance
//! - The low-balance alert policy
//! - The add-transaction, get-balance and send-alert functions

mod add_endpoint;
mod alert;
mod balance;
mod balance_endpoint;
mod core;
mod send_alert_endpoint;

pub use add_endpoint::{AddTransactionState, add_transaction, add_transaction_endpoint};
pub use balance::compute_balance;
pub use balance_endpoint::{BalanceState, get_balance, get_balance_endpoint};
pub use core::{Transaction, TransactionBuilder, TransactionType};
pub use send_alert_endpoint::{SendAlertState, send_alert, send_alert_endpoint};
