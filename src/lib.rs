// Time Grid Select Library
// Selection engine, event bus and renderers for calendar time grids

pub mod models;
pub mod services;
pub mod ui;
pub mod utils;

pub use models::event::EventModel;
pub use models::settings::GridSettings;
pub use services::event_bus::{BusEvent, EventBus, EventName};
pub use ui::time_grid::GridLayout;
pub use ui::TimeGridCalendar;
