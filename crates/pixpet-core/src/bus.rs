use std::collections::VecDeque;

use crate::event::Event;

/// A simple FIFO event queue.
///
/// Each tick the loop publishes input and timer events, then drains them in
/// order. A [`Event::Quit`] observed while draining ends the loop before any
/// further rendering.
pub struct EventBus {
    queue: VecDeque<Event>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    /// Create an empty event bus.
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    /// Enqueue an event at the back of the queue.
    pub fn publish(&mut self, event: Event) {
        self.queue.push_back(event);
    }

    /// Remove and return all pending events, preserving insertion order.
    pub fn drain(&mut self) -> Vec<Event> {
        self.queue.drain(..).collect()
    }

    /// Return `true` if the queue contains at least one event.
    pub fn has_pending(&self) -> bool {
        !self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn drain_returns_all_and_empties() {
        let mut bus = EventBus::new();
        bus.publish(Event::Tick {
            now: Instant::now(),
        });
        bus.publish(Event::Quit);
        let events = bus.drain();
        assert_eq!(events.len(), 2);
        assert!(!bus.has_pending());
    }

    #[test]
    fn drain_on_empty_returns_empty() {
        let mut bus = EventBus::new();
        assert!(bus.drain().is_empty());
    }

    #[test]
    fn preserves_order() {
        let mut bus = EventBus::new();
        bus.publish(Event::Resize { cols: 80, rows: 24 });
        bus.publish(Event::Quit);
        let events = bus.drain();
        assert!(matches!(events[0], Event::Resize { cols: 80, rows: 24 }));
        assert!(matches!(events[1], Event::Quit));
    }
}
