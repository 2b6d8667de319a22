//! One calendar instance: its own bus, grid layout, selection engine and a
//! horizontal renderer per mounted event.
//!
//! Pointer input is forwarded to the selection engine; every committed
//! selection is published on the bus as `selectDateTime`.

use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use std::time::Instant;

use egui::Pos2;

use crate::models::selection::SelectionSegment;
use crate::models::settings::GridSettings;
use crate::models::ui::EventUiModel;
use crate::services::event_bus::{BusEvent, EventBus};
use crate::ui::horizontal_event::{HorizontalBar, HorizontalEventRenderer, HorizontalLayout};
use crate::ui::selection::{SelectionCommit, SelectionState, TimeGridSelection};
use crate::ui::time_grid::GridLayout;

#[derive(Debug)]
pub struct TimeGridCalendar {
    bus: Rc<EventBus>,
    layout: GridLayout,
    selection: TimeGridSelection,
    horizontal_layout: HorizontalLayout,
    renderers: HashMap<String, HorizontalEventRenderer>,
}

impl TimeGridCalendar {
    pub fn new(layout: GridLayout, settings: &GridSettings, header_height: f32) -> Self {
        Self {
            bus: Rc::new(EventBus::new()),
            layout,
            selection: TimeGridSelection::new(settings),
            horizontal_layout: HorizontalLayout::from_settings(settings, header_height),
            renderers: HashMap::new(),
        }
    }

    /// The bus owned by this instance; subscribe here.
    pub fn bus(&self) -> &Rc<EventBus> {
        &self.bus
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    /// Swap in a new grid layout (resize, navigation). Drops any selection,
    /// since its slots referred to the old columns.
    pub fn set_layout(&mut self, layout: GridLayout) {
        self.layout = layout;
        self.selection.clear();
    }

    pub fn selection_state(&self) -> SelectionState {
        self.selection.state()
    }

    pub fn selection_segments(&self) -> Vec<SelectionSegment> {
        self.selection.segments(&self.layout)
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn pointer_down(&mut self, pos: Pos2, now: Instant) -> Option<SelectionCommit> {
        let commit = self.selection.pointer_down(&self.layout, pos, now);
        self.publish(commit)
    }

    pub fn pointer_move(&mut self, pos: Pos2) {
        self.selection.pointer_move(&self.layout, pos);
    }

    pub fn pointer_up(&mut self, pos: Pos2, now: Instant) -> Option<SelectionCommit> {
        let commit = self.selection.pointer_up(&self.layout, pos, now);
        self.publish(commit)
    }

    pub fn click(&mut self, pos: Pos2, now: Instant) -> Option<SelectionCommit> {
        let commit = self.selection.click(&self.layout, pos, now);
        self.publish(commit)
    }

    pub fn double_click(&mut self, pos: Pos2, now: Instant) -> Option<SelectionCommit> {
        let commit = self.selection.double_click(&self.layout, pos, now);
        self.publish(commit)
    }

    /// Drive the click debounce timer.
    pub fn tick(&mut self, now: Instant) -> Option<SelectionCommit> {
        let commit = self.selection.tick(now);
        self.publish(commit)
    }

    /// Render one pass of horizontal bars. Events missing from `models` are
    /// unmounted, so they notify again if they come back. An id repeated
    /// within the pass is skipped after its first occurrence.
    pub fn render_horizontal_events(&mut self, models: &[EventUiModel]) -> Vec<HorizontalBar> {
        let present: HashSet<&str> = models.iter().map(|model| model.id()).collect();
        self.renderers.retain(|id, _| present.contains(id.as_str()));

        let mut rendered: HashSet<&str> = HashSet::with_capacity(models.len());
        let mut bars = Vec::with_capacity(models.len());
        for model in models {
            if !rendered.insert(model.id()) {
                log::warn!("Skipping duplicate horizontal event {}", model.id());
                continue;
            }
            let bar = self
                .renderers
                .entry(model.id().to_string())
                .or_default()
                .render(model, &self.horizontal_layout, &self.bus);
            bars.push(bar);
        }
        bars
    }

    fn publish(&self, commit: Option<SelectionCommit>) -> Option<SelectionCommit> {
        let commit = commit?;
        match self.layout.date_time_range(&commit.selection) {
            Some(range) => {
                log::debug!("selectDateTime {} - {}", range.start, range.end);
                self.bus.fire(&BusEvent::SelectDateTime(range));
            }
            None => log::warn!(
                "Committed selection {:?} lies outside the current layout",
                commit.selection
            ),
        }
        Some(commit)
    }
}
