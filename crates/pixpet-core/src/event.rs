use std::time::Instant;

/// Events flowing through the main loop's [`EventBus`](crate::bus::EventBus).
#[derive(Debug, Clone)]
pub enum Event {
    /// One loop iteration has started.
    Tick { now: Instant },
    /// A key press not consumed by the loop itself.
    Key(crossterm::event::KeyEvent),
    /// The terminal was resized.
    Resize { cols: u16, rows: u16 },
    /// Stop the loop. Terminal: nothing is rendered after this.
    Quit,
}
