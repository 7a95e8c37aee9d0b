use std::time::Duration;

use humantime::format_duration;

use crate::{
    constants::{CONTACT_THANK_YOU, UNKNOWN_CLIENT},
    entities::contact_me::{ContactForm, ContactMessageInsert, ContactResponse, RequestMeta},
    errors::AppError,
    limiter::rate_limiter::{RateDecision, RateLimiterStore},
    repositories::contact_me::ContactMeRepository,
    validation::validate_contact,
};

pub struct ContactMeHandler<R>
where
    R: ContactMeRepository,
{
    pub contact_repo: R,
    pub rate_limiter: RateLimiterStore,
    pub store_timeout: Duration,
}

impl<R> ContactMeHandler<R>
where
    R: ContactMeRepository,
{
    pub fn new(contact_repo: R, rate_limiter: RateLimiterStore, store_timeout: Duration) -> Self {
        ContactMeHandler {
            contact_repo,
            rate_limiter,
            store_timeout,
        }
    }

    /// Handles one contact submission: rate limit, validate, persist.
    #[tracing::instrument(
        name = "Submit contact message",
        skip(self, form, meta),
        fields(client = meta.source_address.as_deref().unwrap_or(UNKNOWN_CLIENT))
    )]
    pub async fn submit_contact_message(
        &self,
        form: ContactForm,
        meta: RequestMeta,
    ) -> Result<ContactResponse, AppError> {
        let client_key = meta.source_address.as_deref().unwrap_or(UNKNOWN_CLIENT);

        if let RateDecision::Limited { retry_after } = self.rate_limiter.check(client_key) {
            let retry_after = Duration::from_secs(retry_after.as_secs().max(1));
            tracing::warn!(
                "Contact rate limit hit for {}; retry in {}",
                client_key,
                format_duration(retry_after)
            );
            return Err(AppError::RateLimited {
                retry_after_secs: retry_after.as_secs(),
            });
        }

        let contact = validate_contact(&form).inspect_err(|e| {
            tracing::debug!("Contact submission rejected: {}", e);
        })?;

        let new_msg = ContactMessageInsert::new(contact, meta);

        let stored = tokio::time::timeout(
            self.store_timeout,
            self.contact_repo.create_contact_message(&new_msg),
        )
        .await
        .map_err(|_| {
            AppError::StoreWriteFailed(format!(
                "write did not complete within {}",
                format_duration(self.store_timeout)
            ))
        })
        .and_then(|written| written)
        .inspect_err(|e| tracing::error!("Contact save error: {}", e))?;

        tracing::info!(id = %stored.id, "Contact message stored");

        Ok(ContactResponse {
            message: CONTACT_THANK_YOU.to_string(),
        })
    }
}
