use std::fmt;

use crate::error::{CoreError, Result};
use crate::positioning::{self, PositioningConfig, RowPreference};
use crate::time::{self, DEFAULT_FPS};
use crate::types::*;

pub type ListenerId = u64;

/// Change listener. Called synchronously with the full collection after
/// every successful mutation.
pub type Listener = Box<dyn FnMut(&[Overlay])>;

/// Authoritative overlay collection of an editor session.
///
/// All writes go through the methods below; each one that changes the
/// collection notifies the subscribed listeners exactly once.
pub struct OverlayStore {
    overlays: Vec<Overlay>,
    selected_overlay_id: Option<OverlayId>,
    current_frame: u32,
    fps: u32,
    positioning: PositioningConfig,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener_id: ListenerId,
}

impl fmt::Debug for OverlayStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverlayStore")
            .field("overlays", &self.overlays)
            .field("selected_overlay_id", &self.selected_overlay_id)
            .field("current_frame", &self.current_frame)
            .field("fps", &self.fps)
            .field("positioning", &self.positioning)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Default for OverlayStore {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlayStore {
    pub fn new() -> Self {
        Self {
            overlays: Vec::new(),
            selected_overlay_id: None,
            current_frame: 0,
            fps: DEFAULT_FPS,
            positioning: PositioningConfig::default(),
            listeners: Vec::new(),
            next_listener_id: 0,
        }
    }

    pub fn with_overlays(overlays: Vec<Overlay>) -> Self {
        let mut store = Self::new();
        store.overlays = overlays;
        store
    }

    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps.max(1);
        self
    }

    pub fn with_positioning(mut self, positioning: PositioningConfig) -> Self {
        self.positioning = positioning;
        self
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn overlays(&self) -> &[Overlay] {
        &self.overlays
    }

    pub fn get(&self, id: OverlayId) -> Option<&Overlay> {
        self.overlays.iter().find(|o| o.id == id)
    }

    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn positioning(&self) -> &PositioningConfig {
        &self.positioning
    }

    pub fn selected_overlay_id(&self) -> Option<OverlayId> {
        self.selected_overlay_id
    }

    pub fn selected_overlay(&self) -> Option<&Overlay> {
        self.selected_overlay_id.and_then(|id| self.get(id))
    }

    pub fn set_selected_overlay_id(&mut self, id: Option<OverlayId>) {
        self.selected_overlay_id = id;
    }

    pub fn current_frame(&self) -> u32 {
        self.current_frame
    }

    pub fn set_current_frame(&mut self, frame: u32) {
        self.current_frame = frame;
    }

    /// Composition length in frames, padded to `min_frames`.
    pub fn duration_in_frames(&self, min_frames: u32) -> u32 {
        time::composition_duration(&self.overlays, min_frames)
    }

    /// Id the next inserted overlay will get: one past the largest live id.
    pub fn next_id(&self) -> OverlayId {
        self.overlays
            .iter()
            .map(|o| o.id)
            .max()
            .map_or(0, |max| max + 1)
    }

    // -----------------------------------------------------------------------
    // Listeners
    // -----------------------------------------------------------------------

    pub fn subscribe(&mut self, listener: Listener) -> ListenerId {
        let id = self.next_listener_id;
        self.next_listener_id += 1;
        self.listeners.push((id, listener));
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    fn notify(&mut self) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(&self.overlays);
        }
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Replace the collection wholesale (hydration, undo, project load).
    pub fn set_overlays(&mut self, overlays: Vec<Overlay>) {
        self.overlays = overlays;
        if self
            .selected_overlay_id
            .is_some_and(|id| self.get(id).is_none())
        {
            self.selected_overlay_id = None;
        }
        self.notify();
    }

    /// Apply `updater` to the overlay with `id`. Returns false if there is
    /// no such overlay. The overlay keeps its id; use [`Self::reassign_id`]
    /// to change it.
    pub fn change_overlay(&mut self, id: OverlayId, updater: impl FnOnce(&mut Overlay)) -> bool {
        let Some(overlay) = self.overlays.iter_mut().find(|o| o.id == id) else {
            return false;
        };
        updater(overlay);
        overlay.id = id;
        self.notify();
        true
    }

    /// Append an overlay as is, giving it the next free id.
    pub fn add_overlay(&mut self, mut overlay: Overlay) -> OverlayId {
        let id = self.next_id();
        overlay.id = id;
        self.overlays.push(overlay);
        self.notify();
        id
    }

    /// Place an overlay at the playhead without colliding with anything on
    /// its row, select it, and return its id. Other overlays may be pushed
    /// down a row depending on the preference.
    pub fn add_at_playhead(
        &mut self,
        mut overlay: Overlay,
        preference: Option<RowPreference>,
    ) -> OverlayId {
        let preference = preference.unwrap_or(self.positioning.preference);
        let placement = positioning::add_at_playhead(
            self.current_frame,
            &self.overlays,
            overlay.duration_in_frames,
            preference,
        );

        let id = self.next_id();
        overlay.id = id;
        overlay.from = placement.from;
        overlay.row = placement.row;

        self.overlays = placement.updated_overlays;
        self.overlays.push(overlay);
        self.selected_overlay_id = Some(id);
        self.notify();
        id
    }

    /// Reserve a slot at the playhead for an item whose length is not known
    /// yet (e.g. media still being probed). The overlay gets the configured
    /// placeholder duration; set the real one later with
    /// [`Self::change_overlay`].
    pub fn add_placeholder_at_playhead(
        &mut self,
        kind: OverlayKind,
        bounds: Bounds,
        preference: Option<RowPreference>,
    ) -> OverlayId {
        let overlay = Overlay::new(kind, self.positioning.placeholder_duration, bounds);
        self.add_at_playhead(overlay, preference)
    }

    /// Remove an overlay by id. Returns the removed overlay.
    pub fn remove_overlay(&mut self, id: OverlayId) -> Result<Overlay> {
        let pos = self
            .position_of(id)
            .ok_or(CoreError::OverlayNotFound(id))?;
        let removed = self.overlays.remove(pos);
        if self.selected_overlay_id == Some(id) {
            self.selected_overlay_id = None;
        }
        self.notify();
        Ok(removed)
    }

    /// Give an overlay a new id. Fails if `new_id` belongs to another live
    /// overlay.
    pub fn reassign_id(&mut self, id: OverlayId, new_id: OverlayId) -> Result<()> {
        let pos = self
            .position_of(id)
            .ok_or(CoreError::OverlayNotFound(id))?;
        if id == new_id {
            return Ok(());
        }
        if self.get(new_id).is_some() {
            return Err(CoreError::IdInUse(new_id));
        }
        self.overlays[pos].id = new_id;
        if self.selected_overlay_id == Some(id) {
            self.selected_overlay_id = Some(new_id);
        }
        self.notify();
        Ok(())
    }

    /// Copy an overlay onto the same row, at the first gap after the
    /// original. Returns the copy's id.
    pub fn duplicate_overlay(&mut self, id: OverlayId) -> Result<OverlayId> {
        let original = self.get(id).ok_or(CoreError::OverlayNotFound(id))?;
        let mut copy = original.clone();

        copy.id = self.next_id();
        copy.is_dragging = false;
        copy.from = positioning::first_free_slot(
            &self.overlays,
            copy.row,
            original.end_frame(),
            copy.duration_in_frames,
            None,
        );

        let new_id = copy.id;
        self.overlays.push(copy);
        self.notify();
        Ok(new_id)
    }

    /// Move an overlay to a new start frame and row. Fails without changes
    /// if the target range is taken.
    pub fn move_overlay(&mut self, id: OverlayId, from: u32, row: u32) -> Result<()> {
        let pos = self
            .position_of(id)
            .ok_or(CoreError::OverlayNotFound(id))?;
        let duration = self.overlays[pos].duration_in_frames;

        if self.overlays[pos].kind.has_timeline_footprint()
            && positioning::has_overlap(&self.overlays, row, from, duration, Some(id))
        {
            return Err(CoreError::OverlapDetected(row));
        }

        let overlay = &mut self.overlays[pos];
        overlay.from = from;
        overlay.row = row;
        self.notify();
        Ok(())
    }

    /// Split an overlay at `frame` into two adjacent overlays.
    /// The frame must be strictly between the overlay's start and end.
    /// Returns the ids of (left, right); the left part keeps the original id.
    pub fn split_overlay(&mut self, id: OverlayId, frame: u32) -> Result<(OverlayId, OverlayId)> {
        let pos = self
            .position_of(id)
            .ok_or(CoreError::OverlayNotFound(id))?;
        let original = &self.overlays[pos];

        if frame <= original.from || frame >= original.end_frame() {
            return Err(CoreError::InvalidOperation(
                "split position must be strictly between overlay start and end".into(),
            ));
        }

        let offset = frame - original.from;
        let mut left = original.clone();
        let mut right = original.clone();

        left.duration_in_frames = offset;
        right.id = self.next_id();
        right.from = frame;
        right.duration_in_frames = original.end_frame() - frame;
        right.is_dragging = false;

        if let Some(trim) = original.kind.trim_start() {
            right.kind.set_trim_start(trim + offset);
        }

        if let (OverlayKind::Caption(l), OverlayKind::Caption(r)) = (&mut left.kind, &mut right.kind)
        {
            let split_ms = time::frames_to_ms(offset, self.fps);
            let (before, after) = split_captions(&l.captions, split_ms);
            l.captions = before;
            r.captions = after;
        }

        let right_id = right.id;
        self.overlays[pos] = left;
        self.overlays.insert(pos + 1, right);
        self.notify();
        Ok((id, right_id))
    }

    /// Delete every overlay on `row` and close the gap by moving the rows
    /// below it up. Returns the removed overlays.
    pub fn remove_row(&mut self, row: u32) -> Vec<Overlay> {
        let (removed, kept): (Vec<Overlay>, Vec<Overlay>) =
            std::mem::take(&mut self.overlays)
                .into_iter()
                .partition(|o| o.row == row);

        self.overlays = kept
            .into_iter()
            .map(|mut o| {
                if o.row > row {
                    o.row -= 1;
                }
                o
            })
            .collect();

        if self
            .selected_overlay_id
            .is_some_and(|id| removed.iter().any(|o| o.id == id))
        {
            self.selected_overlay_id = None;
        }
        self.notify();
        removed
    }

    pub fn clear(&mut self) {
        self.overlays.clear();
        self.selected_overlay_id = None;
        self.current_frame = 0;
        self.notify();
    }

    fn position_of(&self, id: OverlayId) -> Option<usize> {
        self.overlays.iter().position(|o| o.id == id)
    }
}

/// Partition overlay-relative captions at `split_ms`. Captions that start
/// before the split stay on the left; the rest are rebased to the right
/// part's start.
fn split_captions(captions: &[Caption], split_ms: u64) -> (Vec<Caption>, Vec<Caption>) {
    let (before, after): (Vec<Caption>, Vec<Caption>) = captions
        .iter()
        .cloned()
        .partition(|c| c.start_ms < split_ms);

    let after = after
        .into_iter()
        .map(|mut c| {
            c.start_ms -= split_ms;
            c.end_ms -= split_ms;
            for w in &mut c.words {
                w.start_ms = w.start_ms.saturating_sub(split_ms);
                w.end_ms = w.end_ms.saturating_sub(split_ms);
            }
            c
        })
        .collect();
    (before, after)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn text(content: &str, duration: u32) -> Overlay {
        Overlay::new(
            OverlayKind::Text(TextOverlay {
                content: content.into(),
                style: TextStyle::default(),
            }),
            duration,
            Bounds::new(0.0, 0.0, 400.0, 100.0),
        )
    }

    fn video(duration: u32, trim_start: u32) -> Overlay {
        Overlay::new(
            OverlayKind::Video(VideoOverlay {
                src: "clip.mp4".into(),
                trim_start,
                style: MediaStyle::default(),
            }),
            duration,
            Bounds::new(0.0, 0.0, 1920.0, 1080.0),
        )
    }

    fn caption(text: &str, start_ms: u64, end_ms: u64) -> Caption {
        Caption {
            text: text.into(),
            start_ms,
            end_ms,
            timestamp_ms: None,
            confidence: 0.95,
            words: vec![CaptionWord {
                word: text.into(),
                start_ms,
                end_ms,
                confidence: 0.95,
            }],
        }
    }

    fn counting_listener(store: &mut OverlayStore) -> Rc<RefCell<Vec<usize>>> {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        store.subscribe(Box::new(move |overlays| sink.borrow_mut().push(overlays.len())));
        calls
    }

    // -----------------------------------------------------------------------
    // ids
    // -----------------------------------------------------------------------

    #[test]
    fn ids_start_at_zero_and_follow_max() {
        let mut store = OverlayStore::new();
        assert_eq!(store.add_overlay(text("a", 30)), 0);
        assert_eq!(store.add_overlay(text("b", 30)), 1);
        store.reassign_id(1, 10).unwrap();
        assert_eq!(store.add_overlay(text("c", 30)), 11);
    }

    #[test]
    fn removed_max_id_may_be_recycled_without_collision() {
        let mut store = OverlayStore::new();
        store.add_overlay(text("a", 30));
        let b = store.add_overlay(text("b", 30));
        store.remove_overlay(b).unwrap();
        let c = store.add_overlay(text("c", 30));
        assert_eq!(c, b);
        assert_eq!(store.len(), 2);
        let ids: Vec<_> = store.overlays().iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![0, 1]);
    }

    #[test]
    fn reassign_to_live_id_fails() {
        let mut store = OverlayStore::new();
        store.add_overlay(text("a", 30));
        store.add_overlay(text("b", 30));
        assert!(matches!(store.reassign_id(0, 1), Err(CoreError::IdInUse(1))));
        assert!(matches!(
            store.reassign_id(9, 20),
            Err(CoreError::OverlayNotFound(9))
        ));
        assert!(store.reassign_id(0, 0).is_ok());
    }

    #[test]
    fn reassign_moves_selection() {
        let mut store = OverlayStore::new();
        let id = store.add_overlay(text("a", 30));
        store.set_selected_overlay_id(Some(id));
        store.reassign_id(id, 5).unwrap();
        assert_eq!(store.selected_overlay_id(), Some(5));
    }

    // -----------------------------------------------------------------------
    // change / set / remove
    // -----------------------------------------------------------------------

    #[test]
    fn change_overlay_updates_in_place() {
        let mut store = OverlayStore::new();
        let id = store.add_overlay(text("a", 30));
        let changed = store.change_overlay(id, |o| {
            o.bounds.left = 55.0;
            o.id = 99;
        });
        assert!(changed);
        let o = store.get(id).unwrap();
        assert_eq!(o.bounds.left, 55.0);
        assert!(store.get(99).is_none());
    }

    #[test]
    fn change_missing_overlay_is_noop() {
        let mut store = OverlayStore::new();
        let calls = counting_listener(&mut store);
        assert!(!store.change_overlay(3, |o| o.from = 1));
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn set_overlays_drops_stale_selection() {
        let mut store = OverlayStore::new();
        let id = store.add_overlay(text("a", 30));
        store.set_selected_overlay_id(Some(id));
        store.set_overlays(vec![]);
        assert_eq!(store.selected_overlay_id(), None);
    }

    #[test]
    fn remove_clears_selection() {
        let mut store = OverlayStore::new();
        let id = store.add_overlay(text("a", 30));
        store.set_selected_overlay_id(Some(id));
        let removed = store.remove_overlay(id).unwrap();
        assert_eq!(removed.id, id);
        assert!(store.selected_overlay().is_none());
        assert!(matches!(
            store.remove_overlay(id),
            Err(CoreError::OverlayNotFound(_))
        ));
    }

    // -----------------------------------------------------------------------
    // add_at_playhead
    // -----------------------------------------------------------------------

    #[test]
    fn add_at_playhead_places_and_selects() {
        let mut store = OverlayStore::new();
        store.set_current_frame(0);
        let a = store.add_at_playhead(text("a", 90), None);
        store.set_current_frame(30);
        let b = store.add_at_playhead(text("b", 90), None);

        let a = store.get(a).unwrap();
        let b_overlay = store.get(b).unwrap();
        assert_eq!((a.from, a.row), (0, 0));
        assert_eq!((b_overlay.from, b_overlay.row), (30, 1));
        assert_eq!(store.selected_overlay_id(), Some(b));
        assert_eq!(positioning::find_conflict(store.overlays()), None);
    }

    #[test]
    fn add_at_playhead_top_pushes_rows_down() {
        let mut store = OverlayStore::new();
        let a = store.add_at_playhead(text("a", 90), None);
        let b = store.add_at_playhead(text("b", 90), Some(RowPreference::Top));
        assert_eq!(store.get(b).unwrap().row, 0);
        assert_eq!(store.get(a).unwrap().row, 1);
    }

    #[test]
    fn placeholder_reserves_configured_duration() {
        let mut store = OverlayStore::new().with_positioning(PositioningConfig {
            placeholder_duration: 45,
            preference: RowPreference::FirstFree,
        });
        let kind = video(1, 0).kind;

        store.set_current_frame(10);
        let a = store.add_placeholder_at_playhead(kind.clone(), Bounds::default(), None);
        assert_eq!(store.get(a).unwrap().duration_in_frames, 45);

        // Inside the reserved range: must go to another row.
        store.set_current_frame(50);
        let b = store.add_placeholder_at_playhead(kind.clone(), Bounds::default(), None);
        assert_eq!(store.get(b).unwrap().row, 1);

        // Right after it: row 0 is free again.
        store.set_current_frame(55);
        let c = store.add_placeholder_at_playhead(kind, Bounds::default(), None);
        assert_eq!(store.get(c).unwrap().row, 0);
        assert_eq!(positioning::find_conflict(store.overlays()), None);

        // Real length known: resize in place.
        assert!(store.change_overlay(a, |o| o.duration_in_frames = 20));
        assert_eq!(store.get(a).unwrap().end_frame(), 30);
    }

    #[test]
    fn default_placeholder_is_three_seconds() {
        let mut store = OverlayStore::new();
        let id = store.add_placeholder_at_playhead(
            OverlayKind::Text(TextOverlay {
                content: "pending".into(),
                style: TextStyle::default(),
            }),
            Bounds::default(),
            None,
        );
        assert_eq!(store.get(id).unwrap().duration_in_frames, 90);
    }

    // -----------------------------------------------------------------------
    // duplicate / move / split
    // -----------------------------------------------------------------------

    #[test]
    fn duplicate_lands_after_original() {
        let mut store = OverlayStore::new();
        let a = store.add_overlay(text("a", 30));
        let mut blocker = text("blocker", 20);
        blocker.from = 30;
        store.add_overlay(blocker);

        let copy = store.duplicate_overlay(a).unwrap();
        let copy = store.get(copy).unwrap();
        assert_eq!(copy.from, 50);
        assert_eq!(copy.row, 0);
        assert_eq!(positioning::find_conflict(store.overlays()), None);
    }

    #[test]
    fn move_into_taken_range_fails() {
        let mut store = OverlayStore::new();
        let a = store.add_overlay(text("a", 30));
        let mut b = text("b", 30);
        b.from = 60;
        let b = store.add_overlay(b);

        assert!(matches!(
            store.move_overlay(b, 20, 0),
            Err(CoreError::OverlapDetected(0))
        ));
        assert_eq!(store.get(b).unwrap().from, 60);

        store.move_overlay(b, 30, 0).unwrap();
        store.move_overlay(a, 0, 3).unwrap();
        assert_eq!(store.get(a).unwrap().row, 3);
    }

    #[test]
    fn split_video_advances_trim() {
        let mut store = OverlayStore::new();
        let mut clip = video(100, 10);
        clip.from = 20;
        let id = store.add_overlay(clip);

        let (left, right) = store.split_overlay(id, 50).unwrap();
        assert_eq!(left, id);

        let l = store.get(left).unwrap();
        let r = store.get(right).unwrap();
        assert_eq!((l.from, l.duration_in_frames), (20, 30));
        assert_eq!((r.from, r.duration_in_frames), (50, 70));
        assert_eq!(l.kind.trim_start(), Some(10));
        assert_eq!(r.kind.trim_start(), Some(40));
        assert_eq!(store.overlays()[1].id, right);
    }

    #[test]
    fn split_at_edges_fails() {
        let mut store = OverlayStore::new();
        let id = store.add_overlay(text("a", 30));
        assert!(store.split_overlay(id, 0).is_err());
        assert!(store.split_overlay(id, 30).is_err());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn split_captions_rebases_right_half() {
        let mut store = OverlayStore::new().with_fps(30);
        let overlay = Overlay::new(
            OverlayKind::Caption(CaptionOverlay {
                captions: vec![caption("one", 0, 900), caption("two", 1000, 1900)],
                template: None,
            }),
            60,
            Bounds::default(),
        );
        let id = store.add_overlay(overlay);

        let (left, right) = store.split_overlay(id, 30).unwrap();
        let OverlayKind::Caption(l) = &store.get(left).unwrap().kind else {
            panic!("expected caption overlay");
        };
        let OverlayKind::Caption(r) = &store.get(right).unwrap().kind else {
            panic!("expected caption overlay");
        };
        assert_eq!(l.captions.len(), 1);
        assert_eq!(r.captions.len(), 1);
        assert_eq!((r.captions[0].start_ms, r.captions[0].end_ms), (0, 900));
        assert_eq!(r.captions[0].words[0].start_ms, 0);
    }

    // -----------------------------------------------------------------------
    // rows
    // -----------------------------------------------------------------------

    #[test]
    fn remove_row_shifts_lower_rows_up() {
        let mut store = OverlayStore::new();
        for row in 0..3 {
            let mut o = text("r", 30);
            o.row = row;
            store.add_overlay(o);
        }
        store.set_selected_overlay_id(Some(1));

        let removed = store.remove_row(1);
        assert_eq!(removed.len(), 1);
        let rows: Vec<_> = store.overlays().iter().map(|o| (o.id, o.row)).collect();
        assert_eq!(rows, vec![(0, 0), (2, 1)]);
        assert_eq!(store.selected_overlay_id(), None);
    }

    // -----------------------------------------------------------------------
    // listeners
    // -----------------------------------------------------------------------

    #[test]
    fn listeners_see_every_mutation_once() {
        let mut store = OverlayStore::new();
        let calls = counting_listener(&mut store);

        let id = store.add_overlay(text("a", 30));
        store.change_overlay(id, |o| o.is_dragging = true);
        store.duplicate_overlay(id).unwrap();
        store.remove_overlay(id).unwrap();
        assert_eq!(*calls.borrow(), vec![1, 1, 2, 1]);
    }

    #[test]
    fn failed_mutations_do_not_notify() {
        let mut store = OverlayStore::new();
        let calls = counting_listener(&mut store);
        let _ = store.remove_overlay(4);
        let _ = store.split_overlay(4, 1);
        let _ = store.move_overlay(4, 0, 0);
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let mut store = OverlayStore::new();
        let calls = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&calls);
        let lid = store.subscribe(Box::new(move |_| *sink.borrow_mut() += 1));

        store.add_overlay(text("a", 30));
        assert!(store.unsubscribe(lid));
        assert!(!store.unsubscribe(lid));
        store.add_overlay(text("b", 30));
        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn duration_tracks_content() {
        let mut store = OverlayStore::new();
        assert_eq!(store.duration_in_frames(0), 1);
        let mut o = text("a", 30);
        o.from = 100;
        store.add_overlay(o);
        assert_eq!(store.duration_in_frames(0), 130);
        assert_eq!(store.duration_in_frames(300), 300);
    }

    #[test]
    fn clear_resets_session() {
        let mut store = OverlayStore::new();
        let id = store.add_overlay(text("a", 30));
        store.set_selected_overlay_id(Some(id));
        store.set_current_frame(40);
        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.selected_overlay_id(), None);
        assert_eq!(store.current_frame(), 0);
    }
}
