// Property-based tests for the selection engine
// Random pointer sequences must always yield chronologically ordered selections

#[path = "../fixtures/mod.rs"]
mod fixtures;

use std::time::{Duration, Instant};

use egui::Pos2;
use proptest::prelude::*;

use time_grid_select::ui::selection::TimeGridSelection;
use time_grid_select::GridSettings;

fn point() -> impl Strategy<Value = (f32, f32)> {
    // reaches well outside the 906 x 1192 grid on every side
    (-300.0f32..1200.0, -300.0f32..1500.0)
}

proptest! {
    /// Property: every intermediate and final selection has start <= end
    #[test]
    fn prop_selection_is_always_normalized(
        anchor in (70.0f32..900.0, 45.0f32..1180.0),
        moves in prop::collection::vec(point(), 1..40),
        release in point(),
    ) {
        let settings = GridSettings::default();
        let layout = fixtures::week_layout(&settings);
        let mut engine = TimeGridSelection::new(&settings);
        let t0 = Instant::now();

        engine.pointer_down(&layout, Pos2::new(anchor.0, anchor.1), t0);
        for (x, y) in moves {
            engine.pointer_move(&layout, Pos2::new(x, y));
            let selection = engine.current_selection().unwrap();
            prop_assert!(selection.start() <= selection.end());
        }
        engine.pointer_up(&layout, Pos2::new(release.0, release.1), t0);
        engine.tick(t0 + Duration::from_secs(1));

        if let Some(selection) = engine.current_selection() {
            prop_assert!(selection.start() <= selection.end());

            let range = layout.date_time_range(&selection).unwrap();
            prop_assert!(range.start < range.end);

            let segments = layout.segments(&selection);
            prop_assert_eq!(segments.len(), selection.column_count());
            for pair in segments.windows(2) {
                prop_assert_eq!(pair[0].column + 1, pair[1].column);
            }
            for segment in &segments {
                prop_assert!(segment.first_slot <= segment.last_slot);
                prop_assert!(segment.rect.top() < segment.rect.bottom());
            }
        }
    }

    /// Property: clamping always lands on a slot inside the grid
    #[test]
    fn prop_clamp_is_total(x in -1.0e6f32..1.0e6, y in -1.0e6f32..1.0e6) {
        let layout = fixtures::week_layout(&GridSettings::default());
        let slot = layout.clamp(Pos2::new(x, y));
        prop_assert!(slot.column < layout.column_count());
        prop_assert!(slot.index < layout.slot_count());
    }

    /// Property: selection direction does not change the result
    #[test]
    fn prop_direction_is_irrelevant(
        a in (70.0f32..900.0, 45.0f32..1180.0),
        b in (70.0f32..900.0, 45.0f32..1180.0),
    ) {
        let settings = GridSettings::default();
        let layout = fixtures::week_layout(&settings);
        let t0 = Instant::now();
        let (a, b) = (Pos2::new(a.0, a.1), Pos2::new(b.0, b.1));

        let mut forward = TimeGridSelection::new(&settings);
        forward.pointer_down(&layout, a, t0);
        forward.pointer_move(&layout, b);
        forward.pointer_up(&layout, b, t0);

        let mut backward = TimeGridSelection::new(&settings);
        backward.pointer_down(&layout, b, t0);
        backward.pointer_move(&layout, a);
        backward.pointer_up(&layout, a, t0);
        backward.tick(t0 + Duration::from_secs(1));
        forward.tick(t0 + Duration::from_secs(1));

        prop_assert_eq!(forward.current_selection(), backward.current_selection());
    }
}
