//! Recorder
//!
//! Sets a single program to record. The service answers with one line of
//! Norwegian free text; only the exact success sentence counts as success.

use serde::Serialize;

use crate::error::Result;
use crate::session::Session;
use crate::types::Program;

/// Record request handler
pub const ADD_RECORDING_PATH: &str = "/epg/lib/addRecording.php";

/// The only response body that means the program was set to record
pub const SUCCESS_MESSAGE: &str = "Programmet er blitt satt til opptak.";

/// Fragment of "Du må logge inn først." (you must log in first)
const AUTH_REQUIRED_FRAGMENT: &str = "logge inn";

/// Fragment of "Opptak på denne kanalen krever abonnement." (subscription required)
const SUBSCRIPTION_FRAGMENT: &str = "abonnement";

/// Classified answer from the record endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RecordResponse {
    /// Exactly the success sentence
    Success,
    /// The session is not (or no longer) logged on
    AuthRequired,
    /// Recording on this channel needs a PVR subscription
    SubscriptionRequired,
    /// Any other body, kept verbatim
    Unknown(String),
}

impl RecordResponse {
    /// Classify a response body.
    ///
    /// # Examples
    /// ```
    /// use homebase_core::RecordResponse;
    ///
    /// assert_eq!(
    ///     RecordResponse::classify("Programmet er blitt satt til opptak."),
    ///     RecordResponse::Success
    /// );
    /// assert_ne!(
    ///     RecordResponse::classify("Programmet er blitt satt til opptak.\n"),
    ///     RecordResponse::Success
    /// );
    /// ```
    pub fn classify(body: &str) -> Self {
        if body == SUCCESS_MESSAGE {
            Self::Success
        } else if body.contains(AUTH_REQUIRED_FRAGMENT) {
            Self::AuthRequired
        } else if body.contains(SUBSCRIPTION_FRAGMENT) {
            Self::SubscriptionRequired
        } else {
            Self::Unknown(body.to_string())
        }
    }

    pub fn is_success(&self) -> bool {
        *self == Self::Success
    }
}

/// Ask the service to record `program`, logging on first if needed.
///
/// A rejection is returned as a non-`Success` [`RecordResponse`], not as an
/// error; only transport and login failures are errors. No retry.
pub async fn record(session: &mut Session, program: &Program) -> Result<RecordResponse> {
    let page = session
        .post_form(ADD_RECORDING_PATH, &[("action", "add"), ("FR", program.id.as_str())])
        .await?;

    tracing::debug!("record: returned answer: {:?}", page.body);
    let response = RecordResponse::classify(&page.body);
    if !response.is_success() {
        tracing::warn!("Failed recording {}: {:?}", program.id, page.body);
    }
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_success_exact() {
        assert_eq!(RecordResponse::classify(SUCCESS_MESSAGE), RecordResponse::Success);
    }

    #[test]
    fn test_classify_trailing_content_is_not_success() {
        let body = "Programmet er blitt satt til opptak.\n";
        assert_eq!(RecordResponse::classify(body), RecordResponse::Unknown(body.to_string()));
        assert!(!RecordResponse::classify(" Programmet er blitt satt til opptak.").is_success());
    }

    #[test]
    fn test_classify_auth_required() {
        assert_eq!(
            RecordResponse::classify("Du må logge inn først."),
            RecordResponse::AuthRequired
        );
        let with_debug_noise = "<br/>Caught by sanitizeInput: Array\n(\n)\n<br/>\n\nDu m\u{fffd} logge inn f\u{fffd}rst.";
        assert_eq!(
            RecordResponse::classify(with_debug_noise),
            RecordResponse::AuthRequired
        );
    }

    #[test]
    fn test_classify_subscription_required() {
        assert_eq!(
            RecordResponse::classify(
                "Opptak på denne kanalen krever abonnement. Du kan kjøpe et PVR-produkt på homebase.no"
            ),
            RecordResponse::SubscriptionRequired
        );
    }

    #[test]
    fn test_classify_unknown_keeps_body() {
        assert_eq!(
            RecordResponse::classify("Noe gikk galt"),
            RecordResponse::Unknown("Noe gikk galt".to_string())
        );
        assert_eq!(RecordResponse::classify(""), RecordResponse::Unknown(String::new()));
    }
}
