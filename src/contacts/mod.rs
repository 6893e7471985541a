//! Contact-us messages.
//!
//! Read and answered from a single page, so there is no store: every call is
//! a straight pass-through to the API.

use crate::client::{segment, HttpClient};
use crate::errors::{AppError, FieldError};
use crate::models::ContactMessage;

#[derive(Clone)]
pub struct ContactService {
    client: HttpClient,
}

impl ContactService {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// GET /contacts/all
    pub async fn list(&self) -> Result<Vec<ContactMessage>, AppError> {
        self.client.get("/contacts/all").await
    }

    /// GET /contacts/:id
    pub async fn get(&self, id: &str) -> Result<ContactMessage, AppError> {
        self.client.get(&format!("/contacts/{}", segment(id)?)).await
    }

    /// PUT /contacts/sendReply/:id with the reply as a JSON string body.
    pub async fn send_reply(&self, id: &str, reply: &str) -> Result<(), AppError> {
        let reply = reply.trim();
        if reply.is_empty() {
            return Err(AppError::Validation(vec![FieldError::new(
                "reply",
                "Reply is required",
            )]));
        }
        let path = format!("/contacts/sendReply/{}", segment(id)?);
        self.client.put_no_content(&path, reply).await
    }
}
