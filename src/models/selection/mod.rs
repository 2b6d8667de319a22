//! Selection value types for the time grid.
//!
//! A [`GridSelection`] is always normalized: its start slot is chronologically
//! at or before its end slot, whatever direction the pointer travelled.

use std::ops::RangeInclusive;

use chrono::{NaiveDate, NaiveDateTime};
use egui::Rect;
use serde::Serialize;

/// A single time slot in the grid: day column plus slot index within the day.
///
/// Ordering is chronological because columns are laid out in ascending date order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SlotRef {
    pub column: usize,
    pub index: usize,
}

impl SlotRef {
    pub fn new(column: usize, index: usize) -> Self {
        Self { column, index }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridSelection {
    start: SlotRef,
    end: SlotRef,
}

impl GridSelection {
    /// Selection spanning two slots given in any order.
    pub fn between(a: SlotRef, b: SlotRef) -> Self {
        if b < a {
            Self { start: b, end: a }
        } else {
            Self { start: a, end: b }
        }
    }

    pub fn single(slot: SlotRef) -> Self {
        Self {
            start: slot,
            end: slot,
        }
    }

    pub fn start(&self) -> SlotRef {
        self.start
    }

    pub fn end(&self) -> SlotRef {
        self.end
    }

    /// Day columns touched by the selection, inclusive.
    pub fn columns(&self) -> RangeInclusive<usize> {
        self.start.column..=self.end.column
    }

    pub fn column_count(&self) -> usize {
        self.end.column - self.start.column + 1
    }

    pub fn is_single_slot(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, slot: SlotRef) -> bool {
        self.start <= slot && slot <= self.end
    }
}

/// Payload of the `selectDateTime` notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateTimeSelection {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub is_all_day: bool,
}

/// One visual piece of a selection, confined to a single day column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionSegment {
    pub column: usize,
    pub date: NaiveDate,
    /// Empty for the trailing segments of a multi-column selection
    pub label: String,
    pub rect: Rect,
    pub first_slot: usize,
    pub last_slot: usize,
}
