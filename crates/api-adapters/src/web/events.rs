//! Live change feed. Browsers subscribe per project and re-read whatever
//! a `change` event touches, mirroring cross-tab storage notifications.

use std::convert::Infallible;

use axum::extract::{Path, State};
use axum::response::sse::{Event, KeepAlive, Sse};
use domains::keys;
use storage_adapters::StoreChange;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::{Stream, StreamExt};
use tracing::debug;

use super::AppState;

pub async fn subscribe(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let prefix = keys::project_prefix(&project_id);
    let stream = BroadcastStream::new(state.changes.subscribe()).filter_map(move |change| {
        let change = match change {
            Ok(change) => change,
            // A lagged subscriber just misses those events.
            Err(_) => return None,
        };
        if !is_relevant(&change, &prefix) {
            return None;
        }
        match Event::default().event("change").json_data(&change) {
            Ok(event) => Some(Ok(event)),
            Err(err) => {
                debug!(error = %err, "dropping unserializable change event");
                None
            }
        }
    });
    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// Project-scoped keys plus the registry itself, since registry edits
/// change what every project view renders.
fn is_relevant(change: &StoreChange, prefix: &str) -> bool {
    change.key == keys::PROJECTS || change.key.starts_with(prefix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage_adapters::ChangeOp;

    fn change(key: &str) -> StoreChange {
        StoreChange {
            key: key.into(),
            op: ChangeOp::Put,
        }
    }

    #[test]
    fn test_scopes_to_project_prefix() {
        let prefix = keys::project_prefix("p1");
        assert!(is_relevant(&change("p1_posts"), &prefix));
        assert!(is_relevant(&change("p1_comments_42"), &prefix));
        assert!(!is_relevant(&change("p2_posts"), &prefix));
        assert!(!is_relevant(&change("superAdmin"), &prefix));
    }

    #[test]
    fn test_registry_changes_always_pass() {
        let prefix = keys::project_prefix("p1");
        assert!(is_relevant(&change("projects"), &prefix));
    }

    #[test]
    fn test_prefix_does_not_leak_across_similar_ids() {
        let prefix = keys::project_prefix("p1");
        assert!(!is_relevant(&change("p10_posts"), &prefix));
    }
}
