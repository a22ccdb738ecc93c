//! Dispatches a request envelope to a function by name.
//!
//! This is how a caller that speaks the envelope format directly, such as a
//! serverless runtime adapter, reaches the same handlers as the HTTP routes.

use std::{fmt::Display, str::FromStr};

use axum::extract::{FromRef, Path, State};

use crate::{
    AppState, Error, FunctionRequest, FunctionResponse,
    note::{KnowledgeBaseState, create_item, delete_item, get_items},
    transaction::{
        AddTransactionState, BalanceState, SendAlertState, add_transaction, get_balance,
        send_alert,
    },
};

/// The functions that can be invoked by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    /// Record a transaction.
    AddTransaction,
    /// Report the balance and recent transactions.
    GetBalance,
    /// Publish a caller supplied alert.
    SendAlert,
    /// Create a knowledge base note.
    CreateItem,
    /// Delete a knowledge base note.
    DeleteItem,
    /// List every knowledge base note.
    GetItems,
}

impl Function {
    /// Every function, in the order they are documented.
    pub const ALL: [Function; 6] = [
        Function::AddTransaction,
        Function::GetBalance,
        Function::SendAlert,
        Function::CreateItem,
        Function::DeleteItem,
        Function::GetItems,
    ];

    /// The name the function is invoked by.
    pub fn name(self) -> &'static str {
        match self {
            Function::AddTransaction => "add-transaction",
            Function::GetBalance => "get-balance",
            Function::SendAlert => "send-alert",
            Function::CreateItem => "create-item",
            Function::DeleteItem => "delete-item",
            Function::GetItems => "get-items",
        }
    }
}

impl FromStr for Function {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Function::ALL
            .into_iter()
            .find(|function| function.name() == s)
            .ok_or_else(|| Error::UnknownFunction(s.to_owned()))
    }
}

impl Display for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Run `function` on `request`.
pub fn invoke(function: Function, request: &FunctionRequest, state: &AppState) -> FunctionResponse {
    tracing::debug!("invoking {function}");

    match function {
        Function::AddTransaction => {
            add_transaction(request, &AddTransactionState::from_ref(state))
        }
        Function::GetBalance => get_balance(&BalanceState::from_ref(state)),
        Function::SendAlert => send_alert(request, &SendAlertState::from_ref(state)),
        Function::CreateItem => create_item(request, &KnowledgeBaseState::from_ref(state)),
        Function::DeleteItem => delete_item(request, &KnowledgeBaseState::from_ref(state)),
        Function::GetItems => get_items(&KnowledgeBaseState::from_ref(state)),
    }
}

/// A route handler that runs the function named in the path on the request envelope in the body.
///
/// An empty body is read as an empty envelope.
pub async fn invoke_endpoint(
    State(state): State<AppState>,
    Path(name): Path<String>,
    body: String,
) -> FunctionResponse {
    match parse_invocation(&name, &body) {
        Ok((function, request)) => invoke(function, &request, &state),
        Err(error) => error.into(),
    }
}

fn parse_invocation(name: &str, body: &str) -> Result<(Function, FunctionRequest), Error> {
    let function = name.parse()?;

    let request = if body.trim().is_empty() {
        FunctionRequest::default()
    } else {
        serde_json::from_str(body).map_err(|error| Error::InvalidRequestBody(error.to_string()))?
    };

    Ok((function, request))
}
