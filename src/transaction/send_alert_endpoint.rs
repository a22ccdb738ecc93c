//! Defines the send-alert function, which publishes a caller supplied message.
//!
//! This path does not look at the balance and shares no state with the
//! low-balance policy.

use axum::extract::{FromRef, State};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    AppState, Error, FunctionRequest, FunctionResponse,
    notification::{AlertChannel, MessageId},
    transaction::alert::ALERT_SUBJECT,
};

/// The state needed to send an alert.
#[derive(Debug, Clone)]
pub struct SendAlertState {
    /// Where alerts go.
    pub alert_channel: AlertChannel,
}

impl FromRef<AppState> for SendAlertState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            alert_channel: state.alert_channel.clone(),
        }
    }
}

/// The request body for sending an alert.
#[derive(Debug, Default, Deserialize)]
pub struct AlertForm {
    /// Defaults to [ALERT_SUBJECT].
    #[serde(default)]
    pub subject: Option<String>,
    /// Defaults to an empty message.
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
struct SendAlertResponse<'a> {
    message: &'a str,
    message_id: MessageId,
}

/// Publish the alert in the request body, unless alerts are disabled.
pub fn send_alert(request: &FunctionRequest, state: &SendAlertState) -> FunctionResponse {
    if !state.alert_channel.is_enabled() {
        tracing::info!("alerts are disabled, not sending alert");
        return FunctionResponse::ok(&json!({ "message": "SNS alerts disabled" }));
    }

    match try_send_alert(request, &state.alert_channel) {
        Ok(message_id) => FunctionResponse::ok(&SendAlertResponse {
            message: "Alert sent successfully",
            message_id,
        }),
        Err(error) => error.into(),
    }
}

fn try_send_alert(request: &FunctionRequest, channel: &AlertChannel) -> Result<MessageId, Error> {
    let form: AlertForm = request.json_body()?;
    let subject = form.subject.as_deref().unwrap_or(ALERT_SUBJECT);
    let message = form.message.as_deref().unwrap_or_default();

    channel.publish(subject, message)
}

/// A route handler for sending an alert from a JSON body.
pub async fn send_alert_endpoint(
    State(state): State<SendAlertState>,
    body: String,
) -> FunctionResponse {
    send_alert(&FunctionRequest::with_body(body), &state)
}
