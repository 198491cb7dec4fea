use serde::{Deserialize, Serialize};

use crate::types::{Overlay, OverlayId};

/// Where a new overlay should go when the playhead position is taken.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum RowPreference {
    /// Row 0. Existing overlays are pushed down one row when row 0 is busy.
    Top,
    /// The lowest row that is free at the playhead, or a new row below.
    #[default]
    FirstFree,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PositioningConfig {
    /// Length of the range reserved for a new item whose real length is
    /// not known yet.
    pub placeholder_duration: u32,
    pub preference: RowPreference,
}

impl Default for PositioningConfig {
    fn default() -> Self {
        Self {
            placeholder_duration: 90,
            preference: RowPreference::default(),
        }
    }
}

/// Result of placing a new item.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub from: u32,
    pub row: u32,
    /// The collection after any rows were shifted to make room.
    pub updated_overlays: Vec<Overlay>,
}

/// Find a `(from, row)` at the playhead for an item lasting `duration`
/// frames. The returned range never intersects an overlay on that row in
/// `updated_overlays`.
pub fn add_at_playhead(
    current_frame: u32,
    overlays: &[Overlay],
    duration: u32,
    preference: RowPreference,
) -> Placement {
    let duration = duration.max(1);
    match preference {
        RowPreference::Top => {
            if !has_overlap(overlays, 0, current_frame, duration, None) {
                return Placement {
                    from: current_frame,
                    row: 0,
                    updated_overlays: overlays.to_vec(),
                };
            }
            let updated_overlays = overlays
                .iter()
                .cloned()
                .map(|mut o| {
                    o.row += 1;
                    o
                })
                .collect();
            Placement {
                from: current_frame,
                row: 0,
                updated_overlays,
            }
        }
        RowPreference::FirstFree => {
            let row = (0..=next_empty_row(overlays))
                .find(|&row| !has_overlap(overlays, row, current_frame, duration, None))
                .unwrap_or_else(|| next_empty_row(overlays));
            Placement {
                from: current_frame,
                row,
                updated_overlays: overlays.to_vec(),
            }
        }
    }
}

/// Earliest start at or after `from` where `duration` frames fit on `row`.
pub fn first_free_slot(
    overlays: &[Overlay],
    row: u32,
    from: u32,
    duration: u32,
    exclude: Option<OverlayId>,
) -> u32 {
    let mut on_row: Vec<&Overlay> = overlays
        .iter()
        .filter(|o| o.row == row && o.kind.has_timeline_footprint())
        .filter(|o| Some(o.id) != exclude)
        .collect();
    on_row.sort_by_key(|o| o.from);

    let mut candidate = from;
    for o in on_row {
        if o.end_frame() <= candidate {
            continue;
        }
        if o.from >= candidate.saturating_add(duration) {
            break;
        }
        candidate = candidate.max(o.end_frame());
    }
    candidate
}

/// Whether `[from, from + duration)` on `row` collides with any overlay
/// other than `exclude`.
pub fn has_overlap(
    overlays: &[Overlay],
    row: u32,
    from: u32,
    duration: u32,
    exclude: Option<OverlayId>,
) -> bool {
    overlays
        .iter()
        .filter(|o| Some(o.id) != exclude)
        .any(|o| o.occupies(row, from, duration))
}

/// Two overlays overlap if they share a row and their `[from, end)` ranges
/// intersect.
pub fn overlays_overlap(a: &Overlay, b: &Overlay) -> bool {
    a.kind.has_timeline_footprint() && b.occupies(a.row, a.from, a.duration_in_frames)
}

/// First pair of overlays breaking the one-item-per-range rule, if any.
pub fn find_conflict(overlays: &[Overlay]) -> Option<(OverlayId, OverlayId)> {
    for (i, a) in overlays.iter().enumerate() {
        for b in &overlays[i + 1..] {
            if overlays_overlap(a, b) {
                return Some((a.id, b.id));
            }
        }
    }
    None
}

/// Index of the first row below every occupied row.
fn next_empty_row(overlays: &[Overlay]) -> u32 {
    overlays
        .iter()
        .filter(|o| o.kind.has_timeline_footprint())
        .map(|o| o.row + 1)
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Bounds, OverlayKind, StickerOverlay};

    fn sticker(id: OverlayId, row: u32, from: u32, duration: u32) -> Overlay {
        let mut o = Overlay::new(
            OverlayKind::Sticker(StickerOverlay {
                template_id: "star".into(),
                category: "shapes".into(),
            }),
            duration,
            Bounds::default(),
        );
        o.id = id;
        o.row = row;
        o.from = from;
        o
    }

    // -----------------------------------------------------------------------
    // add_at_playhead
    // -----------------------------------------------------------------------

    #[test]
    fn empty_timeline_places_at_row_zero() {
        for pref in [RowPreference::Top, RowPreference::FirstFree] {
            let p = add_at_playhead(42, &[], 30, pref);
            assert_eq!((p.from, p.row), (42, 0));
            assert!(p.updated_overlays.is_empty());
        }
    }

    #[test]
    fn first_free_skips_busy_rows() {
        let overlays = vec![sticker(0, 0, 0, 100), sticker(1, 1, 50, 100)];
        let p = add_at_playhead(60, &overlays, 30, RowPreference::FirstFree);
        assert_eq!((p.from, p.row), (60, 2));
        assert_eq!(p.updated_overlays, overlays);
    }

    #[test]
    fn first_free_reuses_gap_on_upper_row() {
        let overlays = vec![sticker(0, 0, 0, 100), sticker(1, 1, 50, 100)];
        // Row 1 is free before frame 50.
        let p = add_at_playhead(10, &overlays, 30, RowPreference::FirstFree);
        assert_eq!(p.row, 1);
    }

    #[test]
    fn adjacent_range_is_free() {
        let overlays = vec![sticker(0, 0, 0, 100)];
        let p = add_at_playhead(100, &overlays, 30, RowPreference::FirstFree);
        assert_eq!(p.row, 0);
    }

    #[test]
    fn top_shifts_rows_down_when_row_zero_busy() {
        let overlays = vec![sticker(0, 0, 0, 100), sticker(1, 1, 0, 100)];
        let p = add_at_playhead(20, &overlays, 30, RowPreference::Top);
        assert_eq!((p.from, p.row), (20, 0));
        let rows: Vec<u32> = p.updated_overlays.iter().map(|o| o.row).collect();
        assert_eq!(rows, vec![1, 2]);
    }

    #[test]
    fn top_keeps_layout_when_row_zero_free() {
        let overlays = vec![sticker(0, 0, 0, 10), sticker(1, 1, 0, 100)];
        let p = add_at_playhead(20, &overlays, 30, RowPreference::Top);
        assert_eq!(p.row, 0);
        assert_eq!(p.updated_overlays, overlays);
    }

    #[test]
    fn panel_overlays_do_not_block_rows() {
        let mut panel = Overlay::new(OverlayKind::Ai, 1000, Bounds::default());
        panel.id = 7;
        let p = add_at_playhead(0, &[panel], 30, RowPreference::FirstFree);
        assert_eq!(p.row, 0);
    }

    #[test]
    fn repeated_insertions_never_overlap() {
        let mut overlays: Vec<Overlay> = Vec::new();
        let mut seed: u32 = 17;
        for id in 0..200 {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            let frame = (seed >> 8) % 600;
            let duration = 1 + (seed >> 4) % 120;
            let pref = if seed % 3 == 0 {
                RowPreference::Top
            } else {
                RowPreference::FirstFree
            };

            let p = add_at_playhead(frame, &overlays, duration, pref);
            overlays = p.updated_overlays;
            overlays.push(sticker(id, p.row, p.from, duration));
            assert_eq!(find_conflict(&overlays), None, "conflict after insert {id}");
        }
    }

    // -----------------------------------------------------------------------
    // first_free_slot
    // -----------------------------------------------------------------------

    #[test]
    fn slot_found_between_overlays() {
        let overlays = vec![sticker(0, 0, 0, 30), sticker(1, 0, 60, 30)];
        assert_eq!(first_free_slot(&overlays, 0, 0, 30, None), 30);
        assert_eq!(first_free_slot(&overlays, 0, 0, 31, None), 90);
        assert_eq!(first_free_slot(&overlays, 0, 95, 10, None), 95);
    }

    #[test]
    fn slot_ignores_excluded_and_other_rows() {
        let overlays = vec![sticker(0, 0, 0, 30), sticker(1, 1, 0, 300)];
        assert_eq!(first_free_slot(&overlays, 0, 0, 30, Some(0)), 0);
        assert_eq!(first_free_slot(&overlays, 0, 10, 30, None), 30);
    }

    #[test]
    fn slot_handles_unsorted_input() {
        let overlays = vec![sticker(0, 0, 30, 30), sticker(1, 0, 0, 30)];
        assert_eq!(first_free_slot(&overlays, 0, 0, 10, None), 60);
    }

    // -----------------------------------------------------------------------
    // overlap helpers
    // -----------------------------------------------------------------------

    #[test]
    fn adjacent_overlays_dont_overlap() {
        let a = sticker(0, 0, 0, 30);
        let b = sticker(1, 0, 30, 30);
        assert!(!overlays_overlap(&a, &b));
        assert!(!overlays_overlap(&b, &a));
    }

    #[test]
    fn overlapping_overlays_detected() {
        let a = sticker(0, 0, 0, 30);
        let b = sticker(1, 0, 29, 30);
        assert!(overlays_overlap(&a, &b));
        assert!(overlays_overlap(&b, &a));
        assert_eq!(find_conflict(&[a, b]), Some((0, 1)));
    }

    #[test]
    fn different_rows_dont_overlap() {
        let a = sticker(0, 0, 0, 30);
        let b = sticker(1, 1, 0, 30);
        assert!(!overlays_overlap(&a, &b));
    }
}
