//! Time grid geometry.
//!
//! Maps between pixel coordinates and slots: each day column is a vertical
//! stack of fixed-height slots, columns are laid out left to right in
//! ascending date order with a fixed gap after each column. Also turns a
//! [`GridSelection`] into the per-column segments a paint layer draws.

use chrono::{Days, NaiveDate, NaiveDateTime};
use egui::{Pos2, Rect, Vec2};
use thiserror::Error;

use crate::models::selection::{DateTimeSelection, GridSelection, SelectionSegment, SlotRef};
use crate::models::settings::{GridSettings, SettingsError};
use crate::utils::date::{at_minutes, format_minutes, format_range, parse_label, MINUTES_PER_HOUR};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    #[error("time grid needs at least one day column")]
    NoColumns,
    #[error("day columns must be in ascending date order ({previous} then {next})")]
    DatesNotAscending { previous: NaiveDate, next: NaiveDate },
    #[error("{days} day column(s) from {first_day} run past the last representable date")]
    DateOutOfRange { first_day: NaiveDate, days: usize },
    #[error("column width must be positive, got {0}")]
    ColumnWidth(f32),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// One fixed-duration cell of a day column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeSlot {
    pub index: usize,
    /// Minute-of-day at which the slot starts
    pub start_minutes: u32,
    pub end_minutes: u32,
    /// Pixel offset of the slot's top edge from the top of the grid
    pub top: f32,
    pub height: f32,
}

impl TimeSlot {
    /// Grid-line label of the slot, e.g. `03:00`.
    pub fn label(&self) -> String {
        format_minutes(self.start_minutes)
    }
}

#[derive(Debug, Clone)]
pub struct GridLayout {
    dates: Vec<NaiveDate>,
    origin: Pos2,
    column_width: f32,
    column_spacing: f32,
    slot_height: f32,
    slot_minutes: u32,
    day_start_minutes: u32,
    slot_count: usize,
}

impl GridLayout {
    /// Build a layout whose first column's top-left corner sits at `origin`.
    pub fn new(
        dates: Vec<NaiveDate>,
        origin: Pos2,
        column_width: f32,
        settings: &GridSettings,
    ) -> Result<Self, GridError> {
        settings.validate()?;
        if dates.is_empty() {
            return Err(GridError::NoColumns);
        }
        if let Some(pair) = dates.windows(2).find(|pair| pair[0] >= pair[1]) {
            return Err(GridError::DatesNotAscending {
                previous: pair[0],
                next: pair[1],
            });
        }
        if column_width.is_nan() || column_width <= 0.0 {
            return Err(GridError::ColumnWidth(column_width));
        }

        Ok(Self {
            dates,
            origin,
            column_width,
            column_spacing: settings.column_spacing,
            slot_height: settings.slot_height,
            slot_minutes: settings.slot_minutes,
            day_start_minutes: settings.hour_start * MINUTES_PER_HOUR,
            slot_count: settings.slots_per_day(),
        })
    }

    /// Layout of `days` consecutive dates starting at `first_day`.
    pub fn consecutive(
        first_day: NaiveDate,
        days: usize,
        origin: Pos2,
        column_width: f32,
        settings: &GridSettings,
    ) -> Result<Self, GridError> {
        let out_of_range = GridError::DateOutOfRange { first_day, days };
        let span = days.checked_sub(1).ok_or(GridError::NoColumns)?;
        // reject before allocating a column per day
        first_day
            .checked_add_days(Days::new(span as u64))
            .ok_or_else(|| out_of_range.clone())?;

        let dates = (0..days)
            .map(|offset| first_day.checked_add_days(Days::new(offset as u64)))
            .collect::<Option<Vec<_>>>()
            .ok_or(out_of_range)?;
        Self::new(dates, origin, column_width, settings)
    }

    pub fn column_count(&self) -> usize {
        self.dates.len()
    }

    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn date(&self, column: usize) -> Option<NaiveDate> {
        self.dates.get(column).copied()
    }

    pub fn slot(&self, index: usize) -> Option<TimeSlot> {
        if index >= self.slot_count {
            return None;
        }
        Some(TimeSlot {
            index,
            start_minutes: self.slot_start_minutes(index),
            end_minutes: self.slot_start_minutes(index) + self.slot_minutes,
            top: index as f32 * self.slot_height,
            height: self.slot_height,
        })
    }

    fn slot_start_minutes(&self, index: usize) -> u32 {
        self.day_start_minutes + index as u32 * self.slot_minutes
    }

    fn stride(&self) -> f32 {
        self.column_width + self.column_spacing
    }

    fn column_left(&self, column: usize) -> f32 {
        self.origin.x + column as f32 * self.stride()
    }

    fn grid_height(&self) -> f32 {
        self.slot_count as f32 * self.slot_height
    }

    /// Whole drawable area, from the first column's left edge to the last
    /// column's right edge.
    pub fn bounds(&self) -> Rect {
        let right = self.column_left(self.column_count() - 1) + self.column_width;
        Rect::from_min_max(
            self.origin,
            Pos2::new(right, self.origin.y + self.grid_height()),
        )
    }

    pub fn column_rect(&self, column: usize) -> Rect {
        Rect::from_min_size(
            Pos2::new(self.column_left(column), self.origin.y),
            Vec2::new(self.column_width, self.grid_height()),
        )
    }

    pub fn slot_rect(&self, slot: SlotRef) -> Rect {
        self.span_rect(slot.column, slot.index, slot.index)
    }

    /// Box covering slots `first..=last` of one column.
    pub fn span_rect(&self, column: usize, first: usize, last: usize) -> Rect {
        let top = self.origin.y + first as f32 * self.slot_height;
        let bottom = self.origin.y + (last + 1) as f32 * self.slot_height;
        let left = self.column_left(column);
        Rect::from_min_max(
            Pos2::new(left, top),
            Pos2::new(left + self.column_width, bottom),
        )
    }

    /// Slot index whose grid line carries `label` (e.g. `"03:00"`).
    pub fn slot_for_label(&self, label: &str) -> Option<usize> {
        let minutes = parse_label(label)?;
        let offset = minutes.checked_sub(self.day_start_minutes)?;
        if offset % self.slot_minutes != 0 {
            return None;
        }
        let index = (offset / self.slot_minutes) as usize;
        (index < self.slot_count).then_some(index)
    }

    /// Box of a grid line's row across every day column.
    pub fn gridline_rect(&self, label: &str) -> Option<Rect> {
        let index = self.slot_for_label(label)?;
        let first = self.span_rect(0, index, index);
        let last = self.span_rect(self.column_count() - 1, index, index);
        Some(first.union(last))
    }

    /// Slot under `pos`, or `None` when the position lies outside the grid.
    pub fn hit_test(&self, pos: Pos2) -> Option<SlotRef> {
        let bounds = self.bounds();
        if !(pos.x >= bounds.min.x
            && pos.x < bounds.max.x
            && pos.y >= bounds.min.y
            && pos.y < bounds.max.y)
        {
            return None;
        }
        Some(self.clamp(pos))
    }

    /// Nearest valid slot to `pos`; positions outside the grid snap to its edge.
    pub fn clamp(&self, pos: Pos2) -> SlotRef {
        // `as usize` saturates negatives and NaN to zero
        let column = ((pos.x - self.origin.x) / self.stride()).floor() as usize;
        let index = ((pos.y - self.origin.y) / self.slot_height).floor() as usize;
        SlotRef {
            column: column.min(self.column_count() - 1),
            index: index.min(self.slot_count - 1),
        }
    }

    pub fn slot_start(&self, slot: SlotRef) -> Option<NaiveDateTime> {
        let date = self.date(slot.column)?;
        Some(at_minutes(date, self.slot_start_minutes(slot.index)))
    }

    pub fn slot_end(&self, slot: SlotRef) -> Option<NaiveDateTime> {
        let date = self.date(slot.column)?;
        Some(at_minutes(
            date,
            self.slot_start_minutes(slot.index) + self.slot_minutes,
        ))
    }

    /// Chronological instants covered by a selection.
    pub fn date_time_range(&self, selection: &GridSelection) -> Option<DateTimeSelection> {
        Some(DateTimeSelection {
            start: self.slot_start(selection.start())?,
            end: self.slot_end(selection.end())?,
            is_all_day: false,
        })
    }

    /// Split a selection into one segment per spanned day column.
    ///
    /// The first column runs from the start slot to the bottom of the day,
    /// middle columns are full, the last column runs from the top of the day
    /// to the end slot. A single-column selection is labeled with its full
    /// range; a multi-column one only labels its first segment, with the
    /// start time.
    pub fn segments(&self, selection: &GridSelection) -> Vec<SelectionSegment> {
        let start = selection.start();
        let end = selection.end();
        let last_index = self.slot_count - 1;
        let single_column = start.column == end.column;

        selection
            .columns()
            .filter_map(|column| {
                let date = self.date(column)?;
                let first_slot = if column == start.column { start.index } else { 0 };
                let last_slot = if column == end.column {
                    end.index
                } else {
                    last_index
                };
                let label = if single_column {
                    format_range(
                        self.slot_start_minutes(start.index),
                        self.slot_start_minutes(end.index) + self.slot_minutes,
                    )
                } else if column == start.column {
                    format_minutes(self.slot_start_minutes(start.index))
                } else {
                    String::new()
                };

                Some(SelectionSegment {
                    column,
                    date,
                    label,
                    rect: self.span_rect(column, first_slot, last_slot),
                    first_slot,
                    last_slot,
                })
            })
            .collect()
    }
}
