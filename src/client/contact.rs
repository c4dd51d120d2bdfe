use fabrica_api_types::{ContactMessage, ProductionLineInquiry};
use reqwest::Method;

use super::{ApiClient, Payload};
use crate::error::{ApiError, Operation};

/// Outbound message endpoints: the public contact form and the
/// production-line inquiry form. Both are fire-and-forget JSON posts;
/// neither touches the cache.
pub struct MessagesClient<'a> {
    api: &'a ApiClient,
}

impl<'a> MessagesClient<'a> {
    pub(super) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn send_contact(&self, message: &ContactMessage) -> Result<(), ApiError> {
        let payload = Payload::json("contact", message)?;
        self.api
            .send_unit(
                "contact",
                Operation::Create,
                Method::POST,
                "contact",
                Some(payload),
            )
            .await
    }

    pub async fn send_inquiry(&self, inquiry: &ProductionLineInquiry) -> Result<(), ApiError> {
        let payload = Payload::json("production-line-inquiry", inquiry)?;
        self.api
            .send_unit(
                "production-line-inquiry",
                Operation::Create,
                Method::POST,
                "production-line/send-email",
                Some(payload),
            )
            .await
    }
}
