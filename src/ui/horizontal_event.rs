//! Horizontal event bars (all-day / multi-day rows).
//!
//! Besides computing bar geometry, the renderer reports a committed render to
//! the calendar's bus. It remembers the guide state of its previous pass and
//! notifies only when the element enters the non-guide state: once on mount,
//! once after a drag/resize guide is released, never while it is a guide and
//! never for a re-render that leaves the guide state unchanged.

use serde::Serialize;

use crate::models::settings::GridSettings;
use crate::models::ui::EventUiModel;
use crate::services::event_bus::{BusEvent, EventBus};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizontalLayout {
    pub event_height: f32,
    pub event_margin_top: f32,
    pub header_height: f32,
}

impl HorizontalLayout {
    pub fn from_settings(settings: &GridSettings, header_height: f32) -> Self {
        Self {
            event_height: settings.event_height,
            event_margin_top: settings.event_margin_top,
            header_height,
        }
    }
}

/// Paint instructions for one bar. `left` and `width` are CSS-style lengths.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HorizontalBar {
    pub event_id: String,
    pub title: String,
    pub top: f32,
    pub left: String,
    pub width: String,
    pub height: f32,
    pub translate_x: Option<f32>,
    pub is_guide: bool,
    pub exceed_left: bool,
    pub exceed_right: bool,
}

#[derive(Debug, Default)]
pub struct HorizontalEventRenderer {
    /// Guide state of the previous pass; `None` until mounted
    last_guide: Option<bool>,
}

impl HorizontalEventRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_mounted(&self) -> bool {
        self.last_guide.is_some()
    }

    /// Forget the previous pass; the next render counts as a fresh mount.
    pub fn unmount(&mut self) {
        self.last_guide = None;
    }

    pub fn render(
        &mut self,
        ui_model: &EventUiModel,
        layout: &HorizontalLayout,
        bus: &EventBus,
    ) -> HorizontalBar {
        let is_guide = ui_model.is_guide();
        let entered_steady_state = !is_guide && self.last_guide != Some(false);
        self.last_guide = Some(is_guide);

        if entered_steady_state {
            let report = bus.fire(&BusEvent::AfterRenderEvent(ui_model.model().clone()));
            if !report.is_ok() {
                log::warn!(
                    "{} afterRenderEvent listener(s) failed for event {}",
                    report.failures.len(),
                    ui_model.id()
                );
            }
        }

        Self::bar(ui_model, layout)
    }

    fn bar(ui_model: &EventUiModel, layout: &HorizontalLayout) -> HorizontalBar {
        let height = if ui_model.height > 0.0 {
            ui_model.height
        } else {
            layout.event_height
        };
        let top = (layout.event_height + layout.event_margin_top) * ui_model.top
            + layout.header_height;
        let width = ui_model
            .resizing_width
            .clone()
            .unwrap_or_else(|| format!("{}%", ui_model.width));

        HorizontalBar {
            event_id: ui_model.id().to_string(),
            title: ui_model.model().title().to_string(),
            top,
            left: format!("{}%", ui_model.left),
            width,
            height,
            translate_x: ui_model.moving_left,
            is_guide: ui_model.is_guide(),
            exceed_left: ui_model.exceed_left,
            exceed_right: ui_model.exceed_right,
        }
    }
}
