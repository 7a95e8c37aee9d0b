use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    entities::contact_me::{ContactMessage, ContactMessageInsert},
    errors::AppError,
    repositories::sqlx_repo::SqlxContactMeRepo,
};

/// Append-only store for accepted contact submissions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactMeRepository: Send + Sync {
    async fn create_contact_message(&self, msg: &ContactMessageInsert) -> Result<ContactMessage, AppError>;
}

#[async_trait]
impl<T> ContactMeRepository for Arc<T>
where
    T: ContactMeRepository + ?Sized,
{
    async fn create_contact_message(&self, msg: &ContactMessageInsert) -> Result<ContactMessage, AppError> {
        (**self).create_contact_message(msg).await
    }
}

impl SqlxContactMeRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxContactMeRepo { pool }
    }
}

#[async_trait]
impl ContactMeRepository for SqlxContactMeRepo {
    #[tracing::instrument(name = "Insert contact message", skip(self, msg))]
    async fn create_contact_message(&self, msg: &ContactMessageInsert) -> Result<ContactMessage, AppError> {
        let stored = sqlx::query_as::<_, ContactMessage>(
            r#"
            INSERT INTO contact_messages (name, email, message, source_address, client_agent)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, email, message, source_address, client_agent, created_at, updated_at
            "#,
        )
        .bind(&msg.name)
        .bind(&msg.email)
        .bind(&msg.message)
        .bind(&msg.source_address)
        .bind(&msg.client_agent)
        .fetch_one(&self.pool)
        .await?;

        Ok(stored)
    }
}
