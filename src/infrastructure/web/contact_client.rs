use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use reqwest::Client;
use serde_json::Value;
use url::Url;

use crate::entities::contact_me::ContactForm;

pub const FILL_ALL_FIELDS: &str = "Please fill all fields.";
pub const ALREADY_SUBMITTING: &str = "Submission already in progress.";
pub const SENT_FALLBACK: &str = "Message sent — thanks!";
pub const SERVER_ERROR_FALLBACK: &str = "Server error. Try again later.";
pub const NETWORK_ERROR: &str = "Network error. Check your server.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// Feedback shown to the visitor after a submit attempt. A success toast means
/// the form should be reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub text: String,
}

impl Toast {
    pub fn success(text: impl Into<String>) -> Self {
        Toast { kind: ToastKind::Success, text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Toast { kind: ToastKind::Error, text: text.into() }
    }

    pub fn is_success(&self) -> bool {
        self.kind == ToastKind::Success
    }
}

/// Sends the site's contact form to `POST /api/contact`.
#[derive(Clone)]
pub struct ContactClient {
    http: Client,
    endpoint: Url,
    in_flight: Arc<AtomicBool>,
}

/// Clears the in-flight flag when the submission finishes, however it ends.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl ContactClient {
    pub fn new(api_base: &str) -> Result<Self, url::ParseError> {
        Self::with_client(Client::new(), api_base)
    }

    pub fn with_client(http: Client, api_base: &str) -> Result<Self, url::ParseError> {
        let base = Url::parse(api_base)?;
        let endpoint = base.join("/api/contact")?;

        Ok(ContactClient {
            http,
            endpoint,
            in_flight: Arc::new(AtomicBool::new(false)),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Whether the submit control should currently be disabled.
    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub async fn submit(&self, name: &str, email: &str, message: &str) -> Toast {
        let form = ContactForm::new(name.trim(), email.trim(), message.trim());

        let is_blank = |field: &Option<String>| field.as_deref().is_none_or(str::is_empty);
        if is_blank(&form.name) || is_blank(&form.email) || is_blank(&form.message) {
            return Toast::error(FILL_ALL_FIELDS);
        }

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Toast::error(ALREADY_SUBMITTING);
        }
        let _guard = InFlight(&self.in_flight);

        let response = match self.http.post(self.endpoint.clone()).json(&form).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("contact submit error: {}", e);
                return Toast::error(NETWORK_ERROR);
            }
        };

        let ok = response.status().is_success();
        let body: Option<Value> = response.json().await.ok();
        let field = |key: &str| {
            body.as_ref()
                .and_then(|b| b.get(key))
                .and_then(Value::as_str)
                .map(str::to_string)
        };

        if ok {
            Toast::success(field("message").unwrap_or_else(|| SENT_FALLBACK.to_string()))
        } else {
            Toast::error(field("error").unwrap_or_else(|| SERVER_ERROR_FALLBACK.to_string()))
        }
    }
}
