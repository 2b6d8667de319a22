// Event module
// Immutable calendar event record; time changes produce a new instance

use chrono::{Duration, NaiveDateTime};
use serde::Serialize;
use thiserror::Error;

/// Validation failures when constructing an [`EventModel`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("Event id cannot be empty")]
    EmptyId,
    #[error("Event start time must not be after end time ({start} > {end})")]
    StartAfterEnd {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
    #[error("Event {0} is required")]
    MissingField(&'static str),
    #[error("Cannot replace event {expected} with event {found}")]
    IdMismatch { expected: String, found: String },
}

/// Calendar event: identity plus a time range with `start <= end`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventModel {
    id: String,
    title: String,
    start: NaiveDateTime,
    end: NaiveDateTime,
    all_day: bool,
}

impl EventModel {
    /// Create a new event with required fields
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use time_grid_select::models::event::EventModel;
    ///
    /// let day = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
    /// let start = day.and_hms_opt(9, 0, 0).unwrap();
    /// let end = day.and_hms_opt(10, 0, 0).unwrap();
    /// let event = EventModel::new("standup", start, end).unwrap();
    /// assert_eq!(event.id(), "standup");
    /// ```
    pub fn new(
        id: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Self, ModelError> {
        let event = Self {
            id: id.into(),
            title: String::new(),
            start,
            end,
            all_day: false,
        };
        event.validate()?;
        Ok(event)
    }

    /// Create a builder for constructing events with optional fields
    pub fn builder() -> EventModelBuilder {
        EventModelBuilder::new()
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        if self.id.trim().is_empty() {
            return Err(ModelError::EmptyId);
        }
        if self.start > self.end {
            return Err(ModelError::StartAfterEnd {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn is_all_day(&self) -> bool {
        self.all_day
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Produce a copy of this event moved or resized to a new range.
    pub fn with_times(&self, start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, ModelError> {
        let event = Self {
            start,
            end,
            ..self.clone()
        };
        event.validate()?;
        Ok(event)
    }

    /// Shift the whole event, keeping its duration.
    pub fn shifted(&self, offset: Duration) -> Result<Self, ModelError> {
        self.with_times(self.start + offset, self.end + offset)
    }
}

/// Builder for creating events with optional fields
#[derive(Debug, Default)]
pub struct EventModelBuilder {
    id: Option<String>,
    title: Option<String>,
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
    all_day: bool,
}

impl EventModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn start(mut self, start: NaiveDateTime) -> Self {
        self.start = Some(start);
        self
    }

    pub fn end(mut self, end: NaiveDateTime) -> Self {
        self.end = Some(end);
        self
    }

    pub fn all_day(mut self, all_day: bool) -> Self {
        self.all_day = all_day;
        self
    }

    pub fn build(self) -> Result<EventModel, ModelError> {
        let id = self.id.ok_or(ModelError::MissingField("id"))?;
        let start = self.start.ok_or(ModelError::MissingField("start time"))?;
        let end = self.end.ok_or(ModelError::MissingField("end time"))?;

        let event = EventModel {
            id,
            title: self.title.unwrap_or_default(),
            start,
            end,
            all_day: self.all_day,
        };
        event.validate()?;
        Ok(event)
    }
}
