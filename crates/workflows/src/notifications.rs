//! Notification feed.
//!
//! Unlike the project views, removal is applied to the held list as soon
//! as the backend confirms the delete, without refetching. Notifications
//! carry no derived aggregate other than their count, so there is nothing
//! to recompute.
//!
//! The feed is fetched only when the caller asks for it. There is no
//! background re-poll; [`NotificationFeed::fetched_at`] tells the caller
//! how old the current list (and therefore the unread badge) is.

use std::sync::Arc;

use ambience_core::models::Notification;
use ambience_core::types::{DbId, Timestamp};
use ambience_gateway::{ProjectGateway, Session};
use chrono::Utc;

use crate::error::WorkflowError;
use crate::state::{Applied, ViewCell};

#[derive(Debug, Clone)]
struct FeedSnapshot {
    items: Vec<Notification>,
    fetched_at: Timestamp,
}

pub struct NotificationFeed<G> {
    gateway: Arc<G>,
    feed: ViewCell<FeedSnapshot>,
}

impl<G: ProjectGateway + 'static> NotificationFeed<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            feed: ViewCell::new(),
        }
    }

    pub async fn load(&self, session: &Session) -> Result<(), WorkflowError> {
        let cell = self.feed.weak();
        let Some(generation) = cell.begin_reload().await else {
            return Ok(());
        };

        let items = match self.gateway.list_notifications(session).await {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load notifications");
                return Err(e.into());
            }
        };

        let count = items.len();
        let snapshot = FeedSnapshot {
            items,
            fetched_at: Utc::now(),
        };
        if cell.apply(generation, snapshot).await == Applied::Applied {
            tracing::debug!(count, "Notifications loaded");
        }
        Ok(())
    }

    /// Delete a notification on the backend, then drop it from the held
    /// list. On failure the item stays.
    pub async fn remove(&self, session: &Session, notification_id: DbId) -> Result<(), WorkflowError> {
        if let Err(e) = self
            .gateway
            .delete_notification(session, notification_id)
            .await
        {
            tracing::warn!(error = %e, notification_id, "Failed to delete notification");
            return Err(e.into());
        }

        self.feed
            .weak()
            .update(|feed| feed.items.retain(|n| n.id != notification_id))
            .await;
        tracing::info!(notification_id, "Notification removed");
        Ok(())
    }

    pub async fn items(&self) -> Vec<Notification> {
        self.feed
            .read(|feed| feed.map(|f| f.items.clone()).unwrap_or_default())
            .await
    }

    /// Number of held notifications; shown as the unread badge.
    pub async fn unread_count(&self) -> usize {
        self.feed.read(|feed| feed.map_or(0, |f| f.items.len())).await
    }

    /// When the held list was fetched, `None` before the first load.
    pub async fn fetched_at(&self) -> Option<Timestamp> {
        self.feed.read(|feed| feed.map(|f| f.fetched_at)).await
    }
}
