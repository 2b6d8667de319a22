// Settings module
// Time grid and interaction settings, persisted as TOML

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::utils::date::MINUTES_PER_HOUR;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsError {
    #[error("slot_minutes must be positive")]
    ZeroSlot,
    #[error("hour range {start}..{end} is empty or exceeds 24 hours")]
    HourRange { start: u32, end: u32 },
    #[error("slot_minutes ({slot}) must evenly divide the visible day ({visible} minutes)")]
    UnevenSlots { slot: u32, visible: u32 },
    #[error("{0} must be a positive pixel size")]
    NonPositive(&'static str),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    pub slot_minutes: u32,
    pub hour_start: u32,
    pub hour_end: u32,
    pub slot_height: f32,
    pub column_spacing: f32,
    pub click_debounce_ms: u64,
    pub enable_click: bool,
    pub enable_dbl_click: bool,
    pub event_height: f32,
    pub event_margin_top: f32,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            slot_minutes: 30,
            hour_start: 0,
            hour_end: 24,
            slot_height: 24.0,
            column_spacing: 1.0,
            click_debounce_ms: 250,
            enable_click: true,
            enable_dbl_click: true,
            event_height: 20.0,
            event_margin_top: 2.0,
        }
    }
}

impl GridSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.slot_minutes == 0 {
            return Err(SettingsError::ZeroSlot);
        }
        if self.hour_start >= self.hour_end || self.hour_end > 24 {
            return Err(SettingsError::HourRange {
                start: self.hour_start,
                end: self.hour_end,
            });
        }
        let visible = self.visible_minutes();
        if visible % self.slot_minutes != 0 {
            return Err(SettingsError::UnevenSlots {
                slot: self.slot_minutes,
                visible,
            });
        }
        if self.slot_height.is_nan() || self.slot_height <= 0.0 {
            return Err(SettingsError::NonPositive("slot_height"));
        }
        if self.event_height.is_nan() || self.event_height <= 0.0 {
            return Err(SettingsError::NonPositive("event_height"));
        }
        if self.column_spacing < 0.0 || self.event_margin_top < 0.0 {
            return Err(SettingsError::NonPositive("spacing"));
        }
        Ok(())
    }

    /// Minutes between `hour_start` and `hour_end`.
    pub fn visible_minutes(&self) -> u32 {
        self.hour_end.saturating_sub(self.hour_start) * MINUTES_PER_HOUR
    }

    pub fn slots_per_day(&self) -> usize {
        if self.slot_minutes == 0 {
            return 0;
        }
        (self.visible_minutes() / self.slot_minutes) as usize
    }
}
