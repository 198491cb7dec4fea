use crate::error::{CoreError, Result};
use crate::store::OverlayStore;
use crate::types::Overlay;

/// A labelled snapshot of the full overlay collection.
#[derive(Debug, Clone)]
struct Snapshot {
    label: String,
    overlays: Vec<Overlay>,
}

/// Undo/redo history stack.
///
/// The overlay collection is the unit of undo: every recorded edit stores
/// the collection as it was before the edit.
#[derive(Debug)]
pub struct History {
    undo_stack: Vec<Snapshot>,
    redo_stack: Vec<Snapshot>,
    max_size: usize,
}

impl History {
    pub fn new(max_size: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_size,
        }
    }

    /// Run an edit against the store and record it. Clears redo stack.
    /// Nothing is recorded if the edit fails.
    pub fn execute<T>(
        &mut self,
        label: impl Into<String>,
        store: &mut OverlayStore,
        edit: impl FnOnce(&mut OverlayStore) -> Result<T>,
    ) -> Result<T> {
        let before = store.overlays().to_vec();
        let out = edit(store)?;
        self.record(label, before);
        Ok(out)
    }

    /// Record a snapshot taken before an edit made elsewhere.
    pub fn record(&mut self, label: impl Into<String>, before: Vec<Overlay>) {
        self.redo_stack.clear();
        self.undo_stack.push(Snapshot {
            label: label.into(),
            overlays: before,
        });
        if self.undo_stack.len() > self.max_size {
            self.undo_stack.remove(0);
        }
    }

    /// Undo the last edit.
    pub fn undo(&mut self, store: &mut OverlayStore) -> Result<()> {
        let snapshot = self.undo_stack.pop().ok_or(CoreError::NothingToUndo)?;
        self.redo_stack.push(Snapshot {
            label: snapshot.label,
            overlays: store.overlays().to_vec(),
        });
        store.set_overlays(snapshot.overlays);
        Ok(())
    }

    /// Redo the last undone edit.
    pub fn redo(&mut self, store: &mut OverlayStore) -> Result<()> {
        let snapshot = self.redo_stack.pop().ok_or(CoreError::NothingToRedo)?;
        self.undo_stack.push(Snapshot {
            label: snapshot.label,
            overlays: store.overlays().to_vec(),
        });
        store.set_overlays(snapshot.overlays);
        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack.last().map(|s| s.label.as_str())
    }

    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack.last().map(|s| s.label.as_str())
    }
}
