use super::{Engine, SelectionHandle};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{invalid_input_error, Error};

impl Engine {
    #[tracing::instrument(skip(self))]
    pub(super) async fn fetch_selection(&self, id: &Uuid) -> Result<SelectionHandle, Error> {
        self.selections
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(invalid_input_error)
    }

    /// Drops selections idle for longer than the configured timeout.
    /// Selections locked by an in-flight request are kept.
    #[tracing::instrument(skip(self))]
    pub(super) async fn prune_idle_selections(&self, now: DateTime<Utc>) -> usize {
        let mut selections = self.selections.write().await;
        let before = selections.len();

        selections.retain(|_, handle| match handle.try_lock() {
            Ok(selector) => match (now - selector.updated_at()).to_std() {
                Ok(idle) => idle <= self.selection_idle_timeout,
                Err(_) => true,
            },
            Err(_) => true,
        });

        let pruned = before - selections.len();
        if pruned > 0 {
            tracing::info!("pruned {} idle selections", pruned);
        }

        pruned
    }
}
