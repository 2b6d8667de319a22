// Test fixtures - reusable test data
// Provides consistent layouts and events across all test files
#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use egui::Pos2;
use time_grid_select::models::event::EventModel;
use time_grid_select::models::ui::EventUiModel;
use time_grid_select::{GridLayout, GridSettings, TimeGridCalendar};

pub const GUTTER: f32 = 60.0;
pub const HEADER: f32 = 40.0;
pub const COLUMN_WIDTH: f32 = 120.0;

/// Sample dates for testing
pub mod dates {
    use super::*;

    /// Monday Jan 6, 2025
    pub fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()
    }

    pub fn monday_at(hour: u32, minute: u32) -> NaiveDateTime {
        monday().and_hms_opt(hour, minute, 0).unwrap()
    }
}

/// Week grid with 30-minute slots starting on Monday
pub fn week_layout(settings: &GridSettings) -> GridLayout {
    GridLayout::consecutive(
        dates::monday(),
        7,
        Pos2::new(GUTTER, HEADER),
        COLUMN_WIDTH,
        settings,
    )
    .unwrap()
}

pub fn week_calendar() -> TimeGridCalendar {
    let settings = GridSettings::default();
    TimeGridCalendar::new(week_layout(&settings), &settings, 0.0)
}

/// Sample events for testing
pub mod events {
    use super::*;

    pub fn offsite() -> EventModel {
        EventModel::builder()
            .id("offsite")
            .title("Team Offsite")
            .start(dates::monday_at(0, 0))
            .end(dates::monday_at(23, 59))
            .all_day(true)
            .build()
            .unwrap()
    }

    pub fn offsite_ui() -> EventUiModel {
        EventUiModel::new(offsite()).with_position(0.0, 0.0, 100.0)
    }
}
