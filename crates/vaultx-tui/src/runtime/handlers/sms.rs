use std::sync::Arc;

use vaultx_core::sms::VerificationClient;

use crate::events::{SmsUiEvent, UiEvent};

/// Calls the send endpoint for `phone`.
pub async fn send_code(client: Arc<VerificationClient>, phone: String) -> UiEvent {
    let result = client.send_code(&phone).await;
    UiEvent::Sms(SmsUiEvent::CodeSent { phone, result })
}

/// Calls the verify endpoint for `phone` and `code`.
pub async fn check_code(client: Arc<VerificationClient>, phone: String, code: String) -> UiEvent {
    let result = client.check_code(&phone, &code).await;
    UiEvent::Sms(SmsUiEvent::CodeChecked { phone, result })
}
