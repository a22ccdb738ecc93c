//! The low-balance alert that may follow a new expense.

use rust_decimal::Decimal;

use crate::notification::{AlertChannel, MessageId};

/// The subject of low-balance alerts.
pub const ALERT_SUBJECT: &str = "Budget Alert";

/// What happened when the low-balance policy was checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertOutcome {
    /// The balance is zero or more.
    NotNeeded,
    /// The balance is negative but there is no topic to publish to.
    NoTopic,
    /// The alert was published.
    Sent(MessageId),
    /// The alert could not be published. The failure has been logged.
    Failed,
}

/// The alert text for `balance`, rounded to cents.
pub fn low_balance_message(balance: Decimal) -> String {
    let balance = balance.round_dp(2);

    format!("⚠️ Budget Alert: Your current balance is ${balance:.2}. You are over budget!")
}

/// Publish a low-balance alert if `balance` is negative.
///
/// Called after an expense has been saved. Publishing is best-effort: a
/// failure is logged and reported as [AlertOutcome::Failed], never returned
/// as an error. Every call decides from scratch, so a balance that stays
/// negative alerts again on every expense.
pub fn check_low_balance(balance: Decimal, channel: &AlertChannel) -> AlertOutcome {
    if balance >= Decimal::ZERO {
        return AlertOutcome::NotNeeded;
    }

    if channel.topic().is_none() {
        tracing::debug!("balance is {balance} but no alert topic is configured");
        return AlertOutcome::NoTopic;
    }

    match channel.publish(ALERT_SUBJECT, &low_balance_message(balance)) {
        Ok(message_id) => {
            tracing::info!("sent low balance alert {message_id} for balance {balance}");
            AlertOutcome::Sent(message_id)
        }
        Err(error) => {
            tracing::warn!("alert check failed (non-critical): {error}");
            AlertOutcome::Failed
        }
    }
}
