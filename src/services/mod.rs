// Service module exports

pub mod event_bus;
pub mod settings;
