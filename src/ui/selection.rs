//! Time grid selection state machine.
//!
//! Turns pointer input over a [`GridLayout`] into a normalized
//! [`GridSelection`]:
//!
//! ```text
//! Idle --down--> Selecting --up (drag)--> Committed
//!                    |  \--up (click)--> Pending --timer--> Committed
//!                    \--up outside grid--> Idle
//! ```
//!
//! A click is held in `Pending` for the debounce window so that a second click
//! on the same slot resolves as one action instead of two. Time is passed in
//! explicitly, which keeps the machine deterministic under test.

use std::time::{Duration, Instant};

use egui::Pos2;

use crate::models::selection::{GridSelection, SelectionSegment, SlotRef};
use crate::models::settings::GridSettings;
use crate::ui::time_grid::GridLayout;

/// Which gesture produced a committed selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionTrigger {
    Click,
    DoubleClick,
    Drag,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionCommit {
    pub selection: GridSelection,
    pub trigger: SelectionTrigger,
}

/// A click waiting out the debounce window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingClick {
    pub slot: SlotRef,
    pub deadline: Instant,
}

/// An in-progress press: the anchor stays fixed, `current` follows the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragGesture {
    pub anchor: SlotRef,
    pub current: SlotRef,
    /// Set once the pointer has left the anchor slot
    pub dragged: bool,
    /// Earlier click on the same slot this press may merge with
    pub pending: Option<PendingClick>,
}

impl DragGesture {
    fn new(anchor: SlotRef, pending: Option<PendingClick>) -> Self {
        Self {
            anchor,
            current: anchor,
            dragged: false,
            pending,
        }
    }

    pub fn selection(&self) -> GridSelection {
        GridSelection::between(self.anchor, self.current)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    Idle,
    Selecting(DragGesture),
    Pending(PendingClick),
    Committed(GridSelection),
}

#[derive(Debug, Clone)]
pub struct TimeGridSelection {
    state: SelectionState,
    debounce: Duration,
    enable_click: bool,
    enable_dbl_click: bool,
}

impl TimeGridSelection {
    pub fn new(settings: &GridSettings) -> Self {
        Self {
            state: SelectionState::Idle,
            debounce: Duration::from_millis(settings.click_debounce_ms),
            enable_click: settings.enable_click,
            enable_dbl_click: settings.enable_dbl_click,
        }
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    /// Selection to display right now: the live candidate while selecting,
    /// the clicked slot while the click settles, or the committed range.
    pub fn current_selection(&self) -> Option<GridSelection> {
        match self.state {
            SelectionState::Idle => None,
            SelectionState::Selecting(gesture) => Some(gesture.selection()),
            SelectionState::Pending(pending) => Some(GridSelection::single(pending.slot)),
            SelectionState::Committed(selection) => Some(selection),
        }
    }

    pub fn committed(&self) -> Option<GridSelection> {
        match self.state {
            SelectionState::Committed(selection) => Some(selection),
            _ => None,
        }
    }

    pub fn segments(&self, layout: &GridLayout) -> Vec<SelectionSegment> {
        self.current_selection()
            .map(|selection| layout.segments(&selection))
            .unwrap_or_default()
    }

    /// Drop any selection, pending click or active gesture.
    pub fn clear(&mut self) {
        self.state = SelectionState::Idle;
    }

    /// Commit a settled click once its debounce window has elapsed.
    pub fn tick(&mut self, now: Instant) -> Option<SelectionCommit> {
        let SelectionState::Pending(pending) = self.state else {
            return None;
        };
        if now < pending.deadline {
            return None;
        }
        Some(self.commit(GridSelection::single(pending.slot), SelectionTrigger::Click))
    }

    /// Start a gesture at `pos`. Presses outside the grid are ignored.
    ///
    /// Returns the commit of an earlier click whose window already elapsed.
    pub fn pointer_down(
        &mut self,
        layout: &GridLayout,
        pos: Pos2,
        now: Instant,
    ) -> Option<SelectionCommit> {
        let flushed = self.tick(now);
        let Some(slot) = layout.hit_test(pos) else {
            log::debug!("Pointer down outside time grid at {:?}", pos);
            return flushed;
        };

        let carried = match self.state {
            SelectionState::Pending(pending) if pending.slot == slot => Some(pending),
            _ => None,
        };
        self.state = SelectionState::Selecting(DragGesture::new(slot, carried));
        flushed
    }

    /// Track the pointer. Positions outside the grid clamp to the nearest slot.
    pub fn pointer_move(&mut self, layout: &GridLayout, pos: Pos2) {
        let SelectionState::Selecting(mut gesture) = self.state else {
            return;
        };

        let current = layout.clamp(pos);
        if layout.hit_test(pos).is_none() {
            log::trace!("Clamped pointer {:?} to {:?}", pos, current);
        }
        gesture.current = current;
        if current != gesture.anchor {
            gesture.dragged = true;
            gesture.pending = None;
        }
        self.state = SelectionState::Selecting(gesture);
    }

    /// Finish the gesture. Releasing outside the grid cancels it.
    pub fn pointer_up(
        &mut self,
        layout: &GridLayout,
        pos: Pos2,
        now: Instant,
    ) -> Option<SelectionCommit> {
        let SelectionState::Selecting(gesture) = self.state else {
            return None;
        };

        let Some(release) = layout.hit_test(pos) else {
            log::debug!("Pointer released outside time grid, cancelling selection");
            self.state = SelectionState::Idle;
            return None;
        };

        if gesture.dragged || release != gesture.anchor {
            let selection = GridSelection::between(gesture.anchor, release);
            return Some(self.commit(selection, SelectionTrigger::Drag));
        }

        if !self.enable_click {
            self.state = SelectionState::Idle;
            return None;
        }

        match gesture.pending {
            Some(pending) if now < pending.deadline => Some(self.commit(
                GridSelection::single(release),
                SelectionTrigger::DoubleClick,
            )),
            _ => {
                self.state = SelectionState::Pending(PendingClick {
                    slot: release,
                    deadline: now + self.debounce,
                });
                None
            }
        }
    }

    /// A press and release at the same position, for hosts that only report clicks.
    pub fn click(
        &mut self,
        layout: &GridLayout,
        pos: Pos2,
        now: Instant,
    ) -> Option<SelectionCommit> {
        let flushed = self.pointer_down(layout, pos, now);
        let committed = self.pointer_up(layout, pos, now);
        committed.or(flushed)
    }

    /// Select exactly the slot under `pos`. Never extends or toggles: a
    /// double-click that repeats an already-resolved single slot is a no-op.
    pub fn double_click(
        &mut self,
        layout: &GridLayout,
        pos: Pos2,
        now: Instant,
    ) -> Option<SelectionCommit> {
        if !self.enable_dbl_click {
            return self.tick(now);
        }
        let slot = layout.hit_test(pos)?;
        let selection = GridSelection::single(slot);
        if self.state == SelectionState::Committed(selection) {
            return None;
        }
        Some(self.commit(selection, SelectionTrigger::DoubleClick))
    }

    fn commit(&mut self, selection: GridSelection, trigger: SelectionTrigger) -> SelectionCommit {
        log::debug!(
            "Committed {:?} selection {:?}..{:?}",
            trigger,
            selection.start(),
            selection.end()
        );
        self.state = SelectionState::Committed(selection);
        SelectionCommit { selection, trigger }
    }
}
