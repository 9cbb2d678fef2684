use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::UserStore;
use crate::errors::AppError;
use crate::models::subscription::{NewUserSubscription, Tier, UserSubscriptionRow};

/// A call observed by [`InMemoryUserStore`], in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    CreateUserSubscription(NewUserSubscription),
    DeleteUser(String),
}

/// Records every call and keeps subscriptions in a map.
#[derive(Default)]
pub struct InMemoryUserStore {
    subscriptions: Mutex<HashMap<String, Tier>>,
    calls: Mutex<Vec<StoreCall>>,
    fail: bool,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every call fails with a database error.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn tier_of(&self, clerk_user_id: &str) -> Option<Tier> {
        self.subscriptions.lock().unwrap().get(clerk_user_id).copied()
    }

    fn record(&self, call: StoreCall) -> Result<(), AppError> {
        self.calls.lock().unwrap().push(call);
        if self.fail {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn create_user_subscription(
        &self,
        subscription: NewUserSubscription,
    ) -> Result<Option<UserSubscriptionRow>, AppError> {
        self.record(StoreCall::CreateUserSubscription(subscription.clone()))?;

        let mut subscriptions = self.subscriptions.lock().unwrap();
        if subscriptions.contains_key(&subscription.clerk_user_id) {
            return Ok(None);
        }
        subscriptions.insert(subscription.clerk_user_id.clone(), subscription.tier);

        let now = Utc::now();
        Ok(Some(UserSubscriptionRow {
            id: Uuid::new_v4(),
            clerk_user_id: subscription.clerk_user_id,
            tier: subscription.tier.to_string(),
            created_at: now,
            updated_at: now,
        }))
    }

    async fn delete_user(&self, clerk_user_id: &str) -> Result<(), AppError> {
        self.record(StoreCall::DeleteUser(clerk_user_id.to_string()))?;
        self.subscriptions.lock().unwrap().remove(clerk_user_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_is_idempotent() {
        let store = InMemoryUserStore::new();

        let first = store
            .create_user_subscription(NewUserSubscription::free("user_1"))
            .await
            .unwrap();
        let second = store
            .create_user_subscription(NewUserSubscription::free("user_1"))
            .await
            .unwrap();

        assert_eq!(first.map(|row| row.tier), Some("Free".to_string()));
        assert!(second.is_none());
        assert_eq!(store.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_delete_removes_subscription() {
        let store = InMemoryUserStore::new();
        store
            .create_user_subscription(NewUserSubscription::free("user_1"))
            .await
            .unwrap();

        store.delete_user("user_1").await.unwrap();
        store.delete_user("user_unknown").await.unwrap();

        assert_eq!(store.tier_of("user_1"), None);
    }

    #[tokio::test]
    async fn test_failing_store_still_records() {
        let store = InMemoryUserStore::failing();
        let result = store.delete_user("user_1").await;

        assert!(matches!(result, Err(AppError::Database(_))));
        assert_eq!(store.calls(), vec![StoreCall::DeleteUser("user_1".to_string())]);
    }
}
