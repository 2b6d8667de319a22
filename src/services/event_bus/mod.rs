//! Per-calendar publish/subscribe bus for lifecycle notifications.
//!
//! Each calendar instance constructs and owns its own bus; nothing here is
//! global. Listeners run synchronously in registration order. A failing
//! listener is logged and reported but never stops the listeners after it.
//! Listeners may fire or subscribe re-entrantly: `fire` snapshots the
//! listener list before invoking anything.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use anyhow::Result;
use serde::Serialize;
use thiserror::Error;

use crate::models::event::EventModel;
use crate::models::selection::DateTimeSelection;

/// Closed set of notifications a calendar publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EventName {
    AfterRenderEvent,
    SelectDateTime,
}

impl EventName {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventName::AfterRenderEvent => "afterRenderEvent",
            EventName::SelectDateTime => "selectDateTime",
        }
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A notification together with its typed payload.
#[derive(Debug, Clone, PartialEq)]
pub enum BusEvent {
    AfterRenderEvent(EventModel),
    SelectDateTime(DateTimeSelection),
}

impl BusEvent {
    pub fn name(&self) -> EventName {
        match self {
            BusEvent::AfterRenderEvent(_) => EventName::AfterRenderEvent,
            BusEvent::SelectDateTime(_) => EventName::SelectDateTime,
        }
    }
}

pub type Listener = Rc<dyn Fn(&BusEvent) -> Result<()>>;

/// Handle returned by [`EventBus::on`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[derive(Debug, Error)]
#[error("listener {listener:?} for {event} failed: {message}")]
pub struct ListenerError {
    pub event: EventName,
    pub listener: ListenerId,
    pub message: String,
}

/// Outcome of a single [`EventBus::fire`] call.
#[derive(Debug, Default)]
pub struct FireReport {
    pub invoked: usize,
    pub failures: Vec<ListenerError>,
}

impl FireReport {
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }
}

#[derive(Default)]
pub struct EventBus {
    listeners: RefCell<HashMap<EventName, Vec<(ListenerId, Listener)>>>,
    next_id: Cell<u64>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `name`. Registering the same closure twice
    /// yields two independent subscriptions.
    pub fn on<F>(&self, name: EventName, handler: F) -> ListenerId
    where
        F: Fn(&BusEvent) -> Result<()> + 'static,
    {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        let listener: Listener = Rc::new(handler);
        self.listeners
            .borrow_mut()
            .entry(name)
            .or_default()
            .push((id, listener));
        id
    }

    /// Subscribe to `afterRenderEvent` with the event model as payload.
    pub fn on_after_render_event<F>(&self, handler: F) -> ListenerId
    where
        F: Fn(&EventModel) -> Result<()> + 'static,
    {
        self.on(EventName::AfterRenderEvent, move |event| match event {
            BusEvent::AfterRenderEvent(model) => handler(model),
            _ => Ok(()),
        })
    }

    /// Subscribe to `selectDateTime` with the committed range as payload.
    pub fn on_select_date_time<F>(&self, handler: F) -> ListenerId
    where
        F: Fn(&DateTimeSelection) -> Result<()> + 'static,
    {
        self.on(EventName::SelectDateTime, move |event| match event {
            BusEvent::SelectDateTime(selection) => handler(selection),
            _ => Ok(()),
        })
    }

    /// Remove one subscription. Returns false if it was not registered.
    pub fn off(&self, name: EventName, id: ListenerId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let Some(list) = listeners.get_mut(&name) else {
            return false;
        };
        let before = list.len();
        list.retain(|(listener_id, _)| *listener_id != id);
        before != list.len()
    }

    /// Remove every subscription for `name`.
    pub fn off_all(&self, name: EventName) {
        self.listeners.borrow_mut().remove(&name);
    }

    pub fn listener_count(&self, name: EventName) -> usize {
        self.listeners
            .borrow()
            .get(&name)
            .map_or(0, |list| list.len())
    }

    /// Invoke every listener registered for the event's name, in order.
    pub fn fire(&self, event: &BusEvent) -> FireReport {
        let name = event.name();
        let snapshot: Vec<(ListenerId, Listener)> = self
            .listeners
            .borrow()
            .get(&name)
            .cloned()
            .unwrap_or_default();

        let mut report = FireReport::default();
        for (id, listener) in snapshot {
            report.invoked += 1;
            if let Err(err) = (*listener)(event) {
                log::error!("Listener {:?} for {} failed: {:#}", id, name, err);
                report.failures.push(ListenerError {
                    event: name,
                    listener: id,
                    message: format!("{err:#}"),
                });
            }
        }
        log::trace!("Fired {} to {} listener(s)", name, report.invoked);
        report
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let listeners = self.listeners.borrow();
        let counts: HashMap<&'static str, usize> = listeners
            .iter()
            .map(|(name, list)| (name.as_str(), list.len()))
            .collect();
        f.debug_struct("EventBus").field("listeners", &counts).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use chrono::NaiveDate;

    fn sample_model() -> EventModel {
        let day = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        EventModel::new(
            "e1",
            day.and_hms_opt(9, 0, 0).unwrap(),
            day.and_hms_opt(10, 0, 0).unwrap(),
        )
        .unwrap()
    }

    fn recorder() -> Rc<RefCell<Vec<&'static str>>> {
        Rc::new(RefCell::new(Vec::new()))
    }

    #[test]
    fn test_fire_in_registration_order() {
        let bus = EventBus::new();
        let calls = recorder();
        for tag in ["first", "second", "third"] {
            let calls = calls.clone();
            bus.on(EventName::AfterRenderEvent, move |_| {
                calls.borrow_mut().push(tag);
                Ok(())
            });
        }

        let report = bus.fire(&BusEvent::AfterRenderEvent(sample_model()));

        assert_eq!(report.invoked, 3);
        assert!(report.is_ok());
        assert_eq!(*calls.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_payload_passed_unchanged() {
        let bus = EventBus::new();
        let seen = Rc::new(RefCell::new(None));
        let sink = seen.clone();
        bus.on_after_render_event(move |model| {
            *sink.borrow_mut() = Some(model.clone());
            Ok(())
        });

        bus.fire(&BusEvent::AfterRenderEvent(sample_model()));
        assert_eq!(seen.borrow().as_ref(), Some(&sample_model()));
    }

    #[test]
    fn test_same_handler_registered_twice_fires_twice() {
        let bus = EventBus::new();
        let count = Rc::new(Cell::new(0));
        let handler = {
            let count = count.clone();
            move |_: &BusEvent| {
                count.set(count.get() + 1);
                Ok(())
            }
        };
        bus.on(EventName::AfterRenderEvent, handler.clone());
        bus.on(EventName::AfterRenderEvent, handler);

        bus.fire(&BusEvent::AfterRenderEvent(sample_model()));
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_off_removes_only_that_subscription() {
        let bus = EventBus::new();
        let calls = recorder();
        let a = {
            let calls = calls.clone();
            bus.on(EventName::AfterRenderEvent, move |_| {
                calls.borrow_mut().push("a");
                Ok(())
            })
        };
        {
            let calls = calls.clone();
            bus.on(EventName::AfterRenderEvent, move |_| {
                calls.borrow_mut().push("b");
                Ok(())
            });
        }

        assert!(bus.off(EventName::AfterRenderEvent, a));
        assert!(!bus.off(EventName::AfterRenderEvent, a));
        bus.fire(&BusEvent::AfterRenderEvent(sample_model()));

        assert_eq!(*calls.borrow(), vec!["b"]);
        assert_eq!(bus.listener_count(EventName::AfterRenderEvent), 1);
    }

    #[test]
    fn test_failing_listener_does_not_stop_others() {
        let bus = EventBus::new();
        let calls = recorder();
        bus.on(EventName::AfterRenderEvent, |_| bail!("boom"));
        {
            let calls = calls.clone();
            bus.on(EventName::AfterRenderEvent, move |_| {
                calls.borrow_mut().push("after");
                Ok(())
            });
        }

        let report = bus.fire(&BusEvent::AfterRenderEvent(sample_model()));

        assert_eq!(report.invoked, 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].event, EventName::AfterRenderEvent);
        assert!(report.failures[0].message.contains("boom"));
        assert_eq!(*calls.borrow(), vec!["after"]);
    }

    #[test]
    fn test_listeners_only_receive_their_event_name() {
        let bus = EventBus::new();
        let count = Rc::new(Cell::new(0));
        {
            let count = count.clone();
            bus.on(EventName::SelectDateTime, move |_| {
                count.set(count.get() + 1);
                Ok(())
            });
        }

        let report = bus.fire(&BusEvent::AfterRenderEvent(sample_model()));
        assert_eq!(report.invoked, 0);
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_buses_do_not_share_state() {
        let first = EventBus::new();
        let second = EventBus::new();
        first.on(EventName::AfterRenderEvent, |_| Ok(()));

        assert_eq!(first.listener_count(EventName::AfterRenderEvent), 1);
        assert_eq!(second.listener_count(EventName::AfterRenderEvent), 0);
        assert_eq!(second.fire(&BusEvent::AfterRenderEvent(sample_model())).invoked, 0);
    }

    #[test]
    fn test_reentrant_fire_and_subscribe() {
        let bus = Rc::new(EventBus::new());
        let calls = recorder();
        {
            let weak = Rc::downgrade(&bus);
            let calls = calls.clone();
            bus.on(EventName::AfterRenderEvent, move |_| {
                calls.borrow_mut().push("render");
                if let Some(bus) = weak.upgrade() {
                    bus.on(EventName::SelectDateTime, |_| Ok(()));
                    let day = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
                    let at = day.and_hms_opt(3, 0, 0).unwrap();
                    bus.fire(&BusEvent::SelectDateTime(DateTimeSelection {
                        start: at,
                        end: at,
                        is_all_day: false,
                    }));
                }
                Ok(())
            });
        }
        {
            let calls = calls.clone();
            bus.on(EventName::SelectDateTime, move |_| {
                calls.borrow_mut().push("select");
                Ok(())
            });
        }

        bus.fire(&BusEvent::AfterRenderEvent(sample_model()));

        assert_eq!(*calls.borrow(), vec!["render", "select"]);
        assert_eq!(bus.listener_count(EventName::SelectDateTime), 2);
    }

    #[test]
    fn test_off_all() {
        let bus = EventBus::new();
        bus.on(EventName::SelectDateTime, |_| Ok(()));
        bus.on(EventName::SelectDateTime, |_| Ok(()));
        bus.off_all(EventName::SelectDateTime);
        assert_eq!(bus.listener_count(EventName::SelectDateTime), 0);
    }

    #[test]
    fn test_event_names() {
        assert_eq!(EventName::AfterRenderEvent.to_string(), "afterRenderEvent");
        assert_eq!(EventName::SelectDateTime.as_str(), "selectDateTime");
    }
}
