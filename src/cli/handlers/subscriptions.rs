//! `subscriptions list|add|remove` handler.

use std::io::Write;

use serde_json::json;

use super::print_json;
use crate::cli::parser::{ListArgs, SubscriptionCommand};
use crate::client::{MPusherClient, MPusherError};
use crate::config::Settings;
use crate::models::SubscriptionListParams;

pub struct SubscriptionCommandHandler {
    client: MPusherClient,
}

impl SubscriptionCommandHandler {
    /// # Errors
    /// [`MPusherError::MissingToken`] when no token is configured.
    pub fn new(settings: &Settings) -> Result<Self, MPusherError> {
        Ok(Self::with_client(MPusherClient::new(
            settings.client.to_client_config(),
        )?))
    }

    pub fn with_client(client: MPusherClient) -> Self {
        Self { client }
    }

    /// Runs `action` and prints the result as JSON.
    pub async fn execute<W: Write>(
        &self,
        action: &SubscriptionCommand,
        out: &mut W,
    ) -> anyhow::Result<()> {
        match action {
            SubscriptionCommand::List(args) => {
                let params = list_params(args);
                let page = self.client.get_subscriptions(Some(&params)).await?;
                print_json(out, &page)
            }
            SubscriptionCommand::Add { url } => {
                let subscribed = self.client.subscribe_by_article_url(url).await?;
                tracing::info!(mp_id = subscribed.data.mp_id, "Subscribed");
                print_json(out, &subscribed)
            }
            SubscriptionCommand::Remove { mp_id } => {
                self.client.unsubscribe(*mp_id).await?;
                tracing::info!(mp_id, "Unsubscribed");
                print_json(out, &json!({ "mpId": mp_id, "message": "unsubscribed" }))
            }
        }
    }
}

fn list_params(args: &ListArgs) -> SubscriptionListParams {
    let mut params = SubscriptionListParams::new();
    if let Some(page) = args.page {
        params = params.page(page);
    }
    if let Some(size) = args.page_size {
        params = params.page_size(size);
    }
    if let Some(name) = args.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        params = params.mp_name(name);
    }
    params
}
