//! Drag-to-fill range editing over a displayed asset view.
//!
//! A drag starts on one row's status or designer handle and ends on another
//! row; every row in between (inclusive, either direction) receives the
//! start row's value. The drag state lives in a [`DragController`], an
//! explicit single-owner handle: pointer callbacks mutate it, and releasing
//! takes the gesture out of it so no state outlives the drag.
//!
//! Applying a selection is two-phase: the session is mutated optimistically,
//! then one persistence call per record fans out. Any failure discards the
//! optimistic state by re-fetching everything from the gateway.

use std::ops::RangeInclusive;

use futures::future::join_all;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::gateway::AssetGateway;
use crate::models::AssetStatus;
use crate::session::AssetSession;
use crate::summary::BulkOutcome;
use crate::types::DbId;

/// Vertical extent of one rendered row, in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowBounds {
    pub top: f64,
    pub bottom: f64,
}

/// Index of the row whose bounds contain `y`, if any.
pub fn hit_test(rows: &[RowBounds], y: f64) -> Option<usize> {
    rows.iter().position(|r| y >= r.top && y < r.bottom)
}

/// Inclusive index range covered by a drag, independent of direction.
pub fn drag_range(start: usize, current: usize) -> RangeInclusive<usize> {
    start.min(current)..=start.max(current)
}

/// The field being dragged and the value taken from the start row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum DragField {
    Status(AssetStatus),
    Designer(Option<DbId>),
}

/// Records a released drag applies to.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeSelection {
    pub asset_ids: Vec<DbId>,
    pub field: DragField,
}

/// Build the selection for a drag from `start` to `end` over `snapshot`.
///
/// `end` is clamped to the last row. Returns `None` when the range covers a
/// single row or `start` is outside the snapshot.
pub fn select_range(
    snapshot: &[DbId],
    start: usize,
    end: usize,
    field: DragField,
) -> Option<RangeSelection> {
    let last = snapshot.len().checked_sub(1)?;
    if start > last {
        return None;
    }
    let range = drag_range(start, end.min(last));
    if range.start() == range.end() {
        return None;
    }
    Some(RangeSelection {
        asset_ids: snapshot[range].to_vec(),
        field,
    })
}

#[derive(Debug)]
struct DragGesture {
    /// View row ids captured when the drag began.
    snapshot: Vec<DbId>,
    start: usize,
    current: usize,
    field: DragField,
}

/// Owner of the (at most one) active drag gesture.
#[derive(Debug, Default)]
pub struct DragController {
    gesture: Option<DragGesture>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.gesture.is_some()
    }

    /// Start a drag on row `start` of `view`.
    ///
    /// Fails while another drag is active or when `start` is out of bounds.
    pub fn begin(&mut self, view: Vec<DbId>, start: usize, field: DragField) -> Result<(), CoreError> {
        if self.gesture.is_some() {
            return Err(CoreError::Conflict("A drag is already in progress".to_string()));
        }
        if start >= view.len() {
            return Err(CoreError::Validation(format!(
                "Drag start row {start} is outside a view of {} rows",
                view.len()
            )));
        }
        self.gesture = Some(DragGesture {
            snapshot: view,
            start,
            current: start,
            field,
        });
        Ok(())
    }

    /// Pointer moved to `y`. Updates the current row when the pointer is over
    /// a row and returns the current row index.
    pub fn pointer_move(&mut self, y: f64, rows: &[RowBounds]) -> Option<usize> {
        let gesture = self.gesture.as_mut()?;
        if let Some(index) = hit_test(rows, y) {
            if index < gesture.snapshot.len() {
                gesture.current = index;
            }
        }
        Some(gesture.current)
    }

    /// Currently highlighted range, for rendering.
    pub fn highlighted(&self) -> Option<RangeInclusive<usize>> {
        self.gesture
            .as_ref()
            .map(|g| drag_range(g.start, g.current))
    }

    /// End the drag. The gesture is torn down whether or not it selected
    /// more than one row.
    pub fn release(&mut self) -> Option<RangeSelection> {
        let gesture = self.gesture.take()?;
        select_range(&gesture.snapshot, gesture.start, gesture.current, gesture.field)
    }
}

/// Result of applying a range selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeEditSummary {
    pub saved: usize,
    pub failed: usize,
    /// True when a partial failure triggered a successful re-fetch.
    pub reconciled: bool,
    pub outcome: BulkOutcome,
}

impl RangeEditSummary {
    /// Human-readable notification text, e.g. `"3 saved, 1 failed"`.
    pub fn message(&self) -> String {
        format!("{} saved, {} failed", self.saved, self.failed)
    }
}

/// Apply `selection` optimistically to `session`, persist every record
/// concurrently, and re-fetch from the gateway if any write failed.
pub async fn apply_range_edit<G>(
    session: &mut AssetSession,
    gateway: &G,
    selection: &RangeSelection,
) -> RangeEditSummary
where
    G: AssetGateway + ?Sized,
{
    let field = selection.field;

    for &id in &selection.asset_ids {
        match field {
            DragField::Status(status) => session.set_status(id, status),
            DragField::Designer(designer_id) => session.set_designer(id, designer_id),
        };
    }

    let writes = selection.asset_ids.iter().map(|&id| async move {
        let result = match field {
            DragField::Status(status) => gateway.update_status(id, status).await,
            DragField::Designer(designer_id) => gateway.update_designer(id, designer_id).await,
        };
        if let Err(err) = &result {
            tracing::warn!(asset_id = id, error = %err, "Range edit write failed");
        }
        result.is_ok()
    });
    let results = join_all(writes).await;

    let saved = results.iter().filter(|ok| **ok).count();
    let failed = results.len() - saved;

    let mut reconciled = false;
    if failed > 0 {
        match session.refresh(gateway).await {
            Ok(()) => reconciled = true,
            Err(err) => {
                tracing::error!(error = %err, "Re-fetch after partial range edit failed");
            }
        }
    }

    tracing::info!(saved, failed, reconciled, "Range edit applied");

    RangeEditSummary {
        saved,
        failed,
        reconciled,
        outcome: BulkOutcome::from_counts(saved, failed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryGateway;
    use crate::models::{AssetFilter, NewAsset};
    use crate::session::ViewQuery;
    use assert_matches::assert_matches;

    fn rows(n: usize) -> Vec<RowBounds> {
        (0..n)
            .map(|i| RowBounds {
                top: i as f64 * 40.0,
                bottom: (i + 1) as f64 * 40.0,
            })
            .collect()
    }

    async fn seeded(n: usize) -> (MemoryGateway, AssetSession) {
        let store = MemoryGateway::new();
        for i in 0..n {
            store
                .create_asset(&NewAsset {
                    game_name: format!("Game {i:02}"),
                    provider: "Pragmatic".into(),
                    ..Default::default()
                })
                .await
                .unwrap();
        }
        let mut session = AssetSession::new(AssetFilter::default());
        session.refresh(&store).await.unwrap();
        (store, session)
    }

    #[test]
    fn drag_range_is_direction_independent() {
        assert_eq!(drag_range(2, 5), 2..=5);
        assert_eq!(drag_range(5, 2), 2..=5);
    }

    #[test]
    fn selection_covers_inclusive_rows_either_direction() {
        let view: Vec<DbId> = (100..110).collect();
        let field = DragField::Status(AssetStatus::Completed);

        let down = select_range(&view, 2, 5, field).unwrap();
        let up = select_range(&view, 5, 2, field).unwrap();

        assert_eq!(down.asset_ids, vec![102, 103, 104, 105]);
        assert_eq!(up.asset_ids, down.asset_ids);
    }

    #[test]
    fn single_row_selection_is_a_no_op() {
        let view: Vec<DbId> = (0..10).collect();
        assert!(select_range(&view, 3, 3, DragField::Designer(None)).is_none());
        assert!(select_range(&[], 0, 3, DragField::Designer(None)).is_none());
    }

    #[test]
    fn hit_test_finds_row_under_pointer() {
        let bounds = rows(10);
        assert_eq!(hit_test(&bounds, 0.0), Some(0));
        assert_eq!(hit_test(&bounds, 215.0), Some(5));
        assert_eq!(hit_test(&bounds, 400.0), None);
    }

    #[test]
    fn controller_tracks_pointer_and_tears_down_on_release() {
        let mut drag = DragController::new();
        let view: Vec<DbId> = (0..10).collect();
        drag.begin(view, 5, DragField::Status(AssetStatus::Ongoing))
            .unwrap();

        let bounds = rows(10);
        assert_eq!(drag.pointer_move(90.0, &bounds), Some(2));
        // Outside every row: current index is kept.
        assert_eq!(drag.pointer_move(-30.0, &bounds), Some(2));
        assert_eq!(drag.highlighted(), Some(2..=5));

        let selection = drag.release().unwrap();
        assert_eq!(selection.asset_ids, vec![2, 3, 4, 5]);
        assert!(!drag.is_active());
        assert!(drag.release().is_none());
    }

    #[test]
    fn only_one_drag_at_a_time() {
        let mut drag = DragController::new();
        drag.begin(vec![1, 2, 3], 0, DragField::Designer(Some(4)))
            .unwrap();
        let second = drag.begin(vec![1, 2, 3], 1, DragField::Designer(None));
        assert_matches!(second, Err(CoreError::Conflict(_)));
    }

    #[test]
    fn begin_rejects_out_of_bounds_start() {
        let mut drag = DragController::new();
        let result = drag.begin(vec![1, 2], 2, DragField::Designer(None));
        assert_matches!(result, Err(CoreError::Validation(_)));
        assert!(!drag.is_active());
    }

    #[test]
    fn snapshot_is_immune_to_later_view_changes() {
        let mut drag = DragController::new();
        let mut view: Vec<DbId> = vec![10, 11, 12, 13];
        drag.begin(view.clone(), 0, DragField::Status(AssetStatus::Exported))
            .unwrap();
        view.reverse();
        drag.pointer_move(100.0, &rows(4));
        assert_eq!(drag.release().unwrap().asset_ids, vec![10, 11, 12]);
    }

    #[tokio::test]
    async fn full_success_skips_refetch() {
        let (store, mut session) = seeded(10).await;
        let view = session.view_ids(&ViewQuery::default());
        let selection = select_range(&view, 2, 5, DragField::Status(AssetStatus::Completed)).unwrap();

        let calls_before = store.list_calls();
        let summary = apply_range_edit(&mut session, &store, &selection).await;

        assert_eq!(summary.message(), "4 saved, 0 failed");
        assert_eq!(summary.outcome, BulkOutcome::FullSuccess);
        assert!(!summary.reconciled);
        assert_eq!(store.list_calls(), calls_before);

        let completed = session
            .assets()
            .iter()
            .filter(|a| a.status == AssetStatus::Completed)
            .count();
        assert_eq!(completed, 4);
    }

    #[tokio::test]
    async fn partial_failure_reports_and_refetches() {
        let (store, mut session) = seeded(10).await;
        let view = session.view_ids(&ViewQuery::default());
        let selection = select_range(&view, 5, 2, DragField::Status(AssetStatus::Completed)).unwrap();
        let failing = selection.asset_ids[1];
        store.fail_status_updates_for(failing).await;

        let calls_before = store.list_calls();
        let summary = apply_range_edit(&mut session, &store, &selection).await;

        assert_eq!(summary.message(), "3 saved, 1 failed");
        assert_eq!(summary.outcome, BulkOutcome::Partial);
        assert!(summary.reconciled);
        assert_eq!(store.list_calls(), calls_before + 1);

        // The optimistic guess for the failed row was replaced by source data.
        assert_eq!(session.get(failing).unwrap().status, AssetStatus::NotStarted);
    }

    #[tokio::test]
    async fn designer_range_clears_assignment() {
        let (store, mut session) = seeded(4).await;
        let view = session.view_ids(&ViewQuery::default());
        for &id in &view {
            store.update_designer(id, Some(6)).await.unwrap();
        }
        session.refresh(&store).await.unwrap();
        assert!(session.assets().iter().all(|a| a.designer_id == Some(6)));

        let selection = select_range(&view, 0, 2, DragField::Designer(None)).unwrap();
        let summary = apply_range_edit(&mut session, &store, &selection).await;
        assert_eq!(summary.saved, 3);

        for (index, &id) in view.iter().enumerate() {
            let expected = if index <= 2 { None } else { Some(6) };
            assert_eq!(session.get(id).unwrap().designer_id, expected, "row {index}");
            let stored = store.find_asset(id).await.unwrap().unwrap();
            assert_eq!(stored.designer_id, expected, "stored row {index}");
        }
    }
}
