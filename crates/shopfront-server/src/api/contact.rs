use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;
use crate::mailer::ContactMessage;

use super::{ApiError, ApiResponse, AppState};

const MAX_NAME_CHARS: usize = 200;
const MAX_MESSAGE_CHARS: usize = 5_000;

#[derive(Debug, Deserialize)]
pub(super) struct ContactRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub(super) struct ContactReceipt {
    status: &'static str,
}

fn trimmed(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Loose shape check: one `@`, a non-empty local part, a dotted domain.
fn is_plausible_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
}

/// Checks a submission and returns the cleaned message, or the first
/// problem found.
pub(super) fn validate(request: &ContactRequest) -> Result<ContactMessage, String> {
    let name = request.name.trim();
    let email = request.email.trim();
    let message = request.message.trim();

    if name.is_empty() {
        return Err("name is required".to_string());
    }
    if name.chars().count() > MAX_NAME_CHARS {
        return Err(format!("name must be at most {MAX_NAME_CHARS} characters"));
    }
    if email.is_empty() {
        return Err("email is required".to_string());
    }
    if !is_plausible_email(email) || email.parse::<lettre::Address>().is_err() {
        return Err("email is not a valid address".to_string());
    }
    if message.is_empty() {
        return Err("message is required".to_string());
    }
    if message.chars().count() > MAX_MESSAGE_CHARS {
        return Err(format!("message must be at most {MAX_MESSAGE_CHARS} characters"));
    }

    Ok(ContactMessage {
        name: name.to_string(),
        email: email.to_string(),
        phone: trimmed(request.phone.as_deref()),
        subject: trimmed(request.subject.as_deref()),
        message: message.to_string(),
    })
}

pub(super) async fn submit_contact(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<ContactRequest>,
) -> Result<Json<ApiResponse<ContactReceipt>>, ApiError> {
    let message = validate(&body)
        .map_err(|reason| ApiError::new(req_id.0.clone(), "validation_error", reason))?;

    let Some(mailer) = state.contact.as_ref() else {
        tracing::warn!("contact submission received but mail is not configured");
        return Err(ApiError::new(
            req_id.0,
            "not_configured",
            "contact form is not configured",
        ));
    };

    mailer.send(&message).await.map_err(|e| {
        tracing::error!(error = %e, "contact mail delivery failed");
        ApiError::new(req_id.0.clone(), "upstream_error", "failed to send message")
    })?;

    Ok(Json(ApiResponse::new(
        ContactReceipt { status: "sent" },
        req_id.0,
    )))
}
