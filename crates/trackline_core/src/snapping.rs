use crate::types::{Overlay, OverlayId};

/// Find the nearest snap frame within the threshold.
/// Returns the snapped frame if within threshold, otherwise the original position.
pub fn find_snap_frame(position: u32, snap_points: &[u32], threshold: u32) -> u32 {
    let mut best = position;
    let mut best_dist = threshold as i64 + 1; // start beyond threshold

    for &point in snap_points {
        let dist = (position as i64 - point as i64).abs();
        if dist < best_dist {
            best = point;
            best_dist = dist;
        }
    }

    if best_dist <= threshold as i64 {
        best
    } else {
        position
    }
}

/// Collect snap frames from the overlay edges and the playhead.
pub fn collect_snap_frames(
    overlays: &[Overlay],
    exclude: Option<OverlayId>,
    playhead: Option<u32>,
) -> Vec<u32> {
    let mut points = vec![0];
    points.extend(playhead);

    for overlay in overlays {
        if Some(overlay.id) == exclude || !overlay.kind.has_timeline_footprint() {
            continue;
        }
        points.push(overlay.from);
        points.push(overlay.end_frame());
    }

    points.sort_unstable();
    points.dedup();
    points
}

/// Snap a dragged overlay so that either its start or its end lands on a
/// nearby edge. Returns the adjusted start frame.
pub fn snap_overlay_start(
    overlay: &Overlay,
    proposed_from: u32,
    snap_points: &[u32],
    threshold: u32,
) -> u32 {
    let start = find_snap_frame(proposed_from, snap_points, threshold);
    let start_dist = start.abs_diff(proposed_from);

    let proposed_end = proposed_from.saturating_add(overlay.duration_in_frames);
    let end = find_snap_frame(proposed_end, snap_points, threshold);
    let end_dist = end.abs_diff(proposed_end);

    let start_snapped = start != proposed_from || snap_points.contains(&proposed_from);
    let end_snapped = end != proposed_end && end >= overlay.duration_in_frames;

    match (start_snapped, end_snapped) {
        (true, true) if end_dist < start_dist => end - overlay.duration_in_frames,
        (true, _) => start,
        (false, true) => end - overlay.duration_in_frames,
        (false, false) => proposed_from,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Bounds, OverlayKind, TextOverlay, TextStyle};

    fn text_at(id: OverlayId, from: u32, duration: u32) -> Overlay {
        let mut o = Overlay::new(
            OverlayKind::Text(TextOverlay {
                content: "t".into(),
                style: TextStyle::default(),
            }),
            duration,
            Bounds::default(),
        );
        o.id = id;
        o.from = from;
        o
    }

    #[test]
    fn snap_to_nearest_point() {
        let points = vec![0, 30, 150];
        assert_eq!(find_snap_frame(33, &points, 5), 30);
    }

    #[test]
    fn no_snap_beyond_threshold() {
        let points = vec![0, 30, 150];
        assert_eq!(find_snap_frame(90, &points, 5), 90);
    }

    #[test]
    fn snap_to_closest_of_two() {
        let points = vec![30, 60];
        assert_eq!(find_snap_frame(42, &points, 18), 30);
        assert_eq!(find_snap_frame(51, &points, 18), 60);
    }

    #[test]
    fn empty_snap_points_returns_original() {
        assert_eq!(find_snap_frame(60, &[], 15), 60);
    }

    #[test]
    fn collect_includes_edges_zero_and_playhead() {
        let overlays = vec![text_at(0, 30, 60), text_at(1, 150, 30)];
        let points = collect_snap_frames(&overlays, None, Some(200));
        assert_eq!(points, vec![0, 30, 90, 150, 180, 200]);
    }

    #[test]
    fn collect_excludes_item() {
        let overlays = vec![text_at(0, 30, 60), text_at(1, 150, 30)];
        let points = collect_snap_frames(&overlays, Some(0), None);
        assert!(!points.contains(&30));
        assert!(!points.contains(&90));
        assert!(points.contains(&150));
        assert!(points.contains(&0));
    }

    #[test]
    fn dragged_overlay_snaps_by_end_edge() {
        let dragged = text_at(5, 0, 40);
        // End at 98 is 2 frames away from 100; start at 58 is far from anything.
        let start = snap_overlay_start(&dragged, 58, &[0, 100], 5);
        assert_eq!(start, 60);
    }

    #[test]
    fn dragged_overlay_prefers_closer_edge() {
        let dragged = text_at(5, 0, 40);
        // Start 3 away from 50, end (93) 1 away from 94.
        let start = snap_overlay_start(&dragged, 53, &[50, 94], 5);
        assert_eq!(start, 54);
    }

    #[test]
    fn dragged_overlay_without_nearby_edges_is_unchanged() {
        let dragged = text_at(5, 0, 40);
        assert_eq!(snap_overlay_start(&dragged, 200, &[0, 100], 5), 200);
    }
}
