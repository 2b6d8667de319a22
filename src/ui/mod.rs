pub mod calendar;
pub mod horizontal_event;
pub mod selection;
pub mod time_grid;

pub use calendar::TimeGridCalendar;
