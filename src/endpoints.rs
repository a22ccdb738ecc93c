//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/items/{id}', use [format_endpoint].

/// The route for adding a transaction.
pub const TRANSACTIONS: &str = "/api/transactions";
/// The route for getting the balance and recent transactions.
pub const BALANCE: &str = "/api/balance";
/// The route for sending an alert.
pub const ALERTS: &str = "/api/alerts";
/// The route for creating and listing knowledge base items.
pub const ITEMS: &str = "/api/items";
/// The route for deleting a knowledge base item.
pub const ITEM: &str = "/api/items/{id}";
/// The route for invoking any function by name with a raw request envelope.
pub const INVOKE: &str = "/api/invoke/{function}";

/// Replace the parameter in `endpoint_path` with `value`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/items/{id}', '{id}' is the parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, value: &str) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map_or(endpoint_path.len(), |end| param_start + end + 1);

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        value,
        &endpoint_path[param_end..]
    )
}
