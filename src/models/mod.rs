// Module exports for models

pub mod event;
pub mod selection;
pub mod settings;
pub mod ui;
