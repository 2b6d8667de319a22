//! UI-state wrapper around an [`EventModel`].
//!
//! Carries the layout geometry assigned to an event plus the transient fields
//! that exist only while a drag or resize gesture is in progress. While either
//! transient field is set, the model renders as a guide element rather than a
//! committed event.

use crate::models::event::{EventModel, ModelError};

#[derive(Debug, Clone, PartialEq)]
pub struct EventUiModel {
    model: EventModel,
    /// CSS-style width override (e.g. `"120px"`), set only while resizing
    pub resizing_width: Option<String>,
    /// Horizontal pixel offset, set only while moving
    pub moving_left: Option<f32>,
    /// Stacking row assigned by layout
    pub top: f32,
    /// Left edge in percent of the row
    pub left: f32,
    /// Width in percent of the row
    pub width: f32,
    /// Pixel height assigned by layout; zero means "use the renderer default"
    pub height: f32,
    pub exceed_left: bool,
    pub exceed_right: bool,
}

impl EventUiModel {
    pub fn new(model: EventModel) -> Self {
        Self {
            model,
            resizing_width: None,
            moving_left: None,
            top: 0.0,
            left: 0.0,
            width: 100.0,
            height: 0.0,
            exceed_left: false,
            exceed_right: false,
        }
    }

    /// Place the model in its row, left/width given in percent.
    pub fn with_position(mut self, top: f32, left: f32, width: f32) -> Self {
        self.top = top;
        self.left = left;
        self.width = width;
        self
    }

    pub fn model(&self) -> &EventModel {
        &self.model
    }

    pub fn id(&self) -> &str {
        self.model.id()
    }

    /// True while the model previews an in-progress drag or resize.
    pub fn is_guide(&self) -> bool {
        self.resizing_width.is_some() || self.moving_left.is_some()
    }

    pub fn begin_resize(&mut self, width: impl Into<String>) {
        self.resizing_width = Some(width.into());
    }

    pub fn begin_move(&mut self, left: f32) {
        self.moving_left = Some(left);
    }

    /// Finish the gesture with the resulting event, which must keep the
    /// wrapped event's id. On mismatch the gesture stays open.
    pub fn commit(&mut self, model: EventModel) -> Result<(), ModelError> {
        if model.id() != self.model.id() {
            return Err(ModelError::IdMismatch {
                expected: self.model.id().to_string(),
                found: model.id().to_string(),
            });
        }
        log::debug!("Committing gesture for event {}", model.id());
        self.model = model;
        self.clear_transient();
        Ok(())
    }

    /// Abandon the gesture, keeping the original event.
    pub fn cancel(&mut self) {
        log::debug!("Cancelling gesture for event {}", self.model.id());
        self.clear_transient();
    }

    fn clear_transient(&mut self) {
        self.resizing_width = None;
        self.moving_left = None;
    }
}
