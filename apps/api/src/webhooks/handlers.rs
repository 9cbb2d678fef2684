use axum::{extract::State, http::HeaderMap};
use bytes::Bytes;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::models::subscription::NewUserSubscription;
use crate::state::AppState;
use crate::webhooks::events::ClerkEvent;
use crate::webhooks::signature::WebhookHeaders;

/// POST /api/webhooks/clerk
///
/// The body is taken as raw bytes: the signature covers the exact bytes sent.
pub async fn handle_clerk_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<&'static str, AppError> {
    let headers =
        WebhookHeaders::from_header_map(&headers).ok_or(AppError::MissingWebhookHeaders)?;

    state.verifier.verify(&headers, &body)?;
    let event = ClerkEvent::from_slice(&body)?;

    info!(
        svix_id = %headers.id,
        event_type = event.event_type(),
        "Received Clerk webhook"
    );

    match event {
        ClerkEvent::UserCreated { id } => {
            let created = state
                .store
                .create_user_subscription(NewUserSubscription::free(&id))
                .await?;
            match created {
                Some(row) => info!(clerk_user_id = %id, tier = %row.tier, "Created user subscription"),
                None => info!(clerk_user_id = %id, "User subscription already exists"),
            }
        }
        ClerkEvent::UserDeleted { id: Some(id) } => {
            state.store.delete_user(&id).await?;
        }
        ClerkEvent::UserDeleted { id: None } => {
            debug!("user.deleted event without a user id, nothing to delete");
        }
        ClerkEvent::Unhandled { event_type } => {
            debug!(event_type = %event_type, "Ignoring unhandled webhook event");
        }
    }

    Ok("Webhook received")
}
