//! User persistence: the two mutations the webhook endpoint drives.
//!
//! `AppState` holds an `Arc<dyn UserStore>`; production wires in `PgUserStore`,
//! tests swap in the in-memory store.

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;

use crate::errors::AppError;
use crate::models::subscription::{NewUserSubscription, UserSubscriptionRow};

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Creates the subscription for a new user.
    ///
    /// Returns `None` when a subscription for that user already exists, which
    /// happens when the provider redelivers the same event.
    async fn create_user_subscription(
        &self,
        subscription: NewUserSubscription,
    ) -> Result<Option<UserSubscriptionRow>, AppError>;

    /// Removes everything stored for the user. Unknown ids are a no-op.
    async fn delete_user(&self, clerk_user_id: &str) -> Result<(), AppError>;
}

#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create_user_subscription(
        &self,
        subscription: NewUserSubscription,
    ) -> Result<Option<UserSubscriptionRow>, AppError> {
        let row: Option<UserSubscriptionRow> = sqlx::query_as(
            r#"
            INSERT INTO user_subscriptions (clerk_user_id, tier)
            VALUES ($1, $2)
            ON CONFLICT (clerk_user_id) DO NOTHING
            RETURNING id, clerk_user_id, tier, created_at, updated_at
            "#,
        )
        .bind(&subscription.clerk_user_id)
        .bind(subscription.tier.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn delete_user(&self, clerk_user_id: &str) -> Result<(), AppError> {
        let deleted = sqlx::query("DELETE FROM user_subscriptions WHERE clerk_user_id = $1")
            .bind(clerk_user_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        info!(clerk_user_id, deleted, "Deleted user records");
        Ok(())
    }
}
