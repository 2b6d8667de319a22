// Parameterised tests for guide-state suppression of afterRenderEvent

#[path = "../../fixtures/mod.rs"]
mod fixtures;

use std::cell::Cell;
use std::rc::Rc;

use test_case::test_case;

use fixtures::events;
use time_grid_select::ui::horizontal_event::{HorizontalEventRenderer, HorizontalLayout};
use time_grid_select::{EventBus, EventName};

fn counting_bus() -> (EventBus, Rc<Cell<usize>>) {
    let bus = EventBus::new();
    let count = Rc::new(Cell::new(0));
    let sink = count.clone();
    bus.on(EventName::AfterRenderEvent, move |_| {
        sink.set(sink.get() + 1);
        Ok(())
    });
    (bus, count)
}

fn layout() -> HorizontalLayout {
    HorizontalLayout {
        event_height: 20.0,
        event_margin_top: 2.0,
        header_height: 0.0,
    }
}

#[test_case(None, None, 1 ; "committed render notifies once")]
#[test_case(Some("120px"), None, 0 ; "resizing guide is silent")]
#[test_case(None, Some(35.0), 0 ; "moving guide is silent")]
#[test_case(Some("120px"), Some(35.0), 0 ; "resizing and moving guide is silent")]
fn test_guide_state_controls_notification(
    resizing_width: Option<&str>,
    moving_left: Option<f32>,
    expected: usize,
) {
    let (bus, count) = counting_bus();
    let mut renderer = HorizontalEventRenderer::new();
    let mut model = events::offsite_ui();
    model.resizing_width = resizing_width.map(str::to_string);
    model.moving_left = moving_left;

    for _ in 0..3 {
        renderer.render(&model, &layout(), &bus);
    }

    assert_eq!(count.get(), expected, "afterRenderEvent count mismatch");
}

#[test_case(true, false ; "release after resize")]
#[test_case(false, true ; "release after move")]
fn test_guide_release_notifies_with_committed_model(resize: bool, moving: bool) {
    let bus = EventBus::new();
    let seen = Rc::new(Cell::new(0));
    let sink = seen.clone();
    bus.on_after_render_event(move |model| {
        assert_eq!(model.id(), "offsite");
        sink.set(sink.get() + 1);
        Ok(())
    });
    let mut renderer = HorizontalEventRenderer::new();
    let mut model = events::offsite_ui();

    if resize {
        model.begin_resize("300px");
    }
    if moving {
        model.begin_move(-12.0);
    }
    renderer.render(&model, &layout(), &bus);
    assert_eq!(seen.get(), 0);

    let committed = model
        .model()
        .shifted(chrono::Duration::days(1))
        .unwrap();
    model.commit(committed).unwrap();
    renderer.render(&model, &layout(), &bus);
    renderer.render(&model, &layout(), &bus);

    assert_eq!(seen.get(), 1);
}
