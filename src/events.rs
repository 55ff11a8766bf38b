//! Interrupt-to-main-loop diagnostic event queue.
//!
//! Sensor handlers run in interrupt context and must not block on the
//! serial logger, so they push a one-byte event here and return.  The
//! coordinator drains the queue once per cycle and forwards every event
//! to the [`EventSink`](crate::app::ports::EventSink).
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ Motion ISR  │────▶│  EventQueue  │────▶│ Coordinator  │
//! │ Door ISR    │────▶│  (ring, u8)  │     │  (consumer)  │
//! └─────────────┘     └──────────────┘     └──────────────┘
//! ```

use core::sync::atomic::{AtomicU8, AtomicU16, Ordering};

/// Queue capacity.  Power of 2 for cheap modulo; one slot is kept free to
/// tell "full" from "empty".
const EVENT_QUEUE_CAP: usize = 32;

/// Diagnostic events produced by the sensor handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Event {
    /// Rising edge on the motion input.
    MotionDetected = 1,
    /// Door transition sampled HIGH.
    DoorOpened = 2,
    /// Door transition sampled LOW.
    DoorClosed = 3,
}

impl Event {
    fn from_u8(raw: u8) -> Option<Self> {
        match raw {
            1 => Some(Self::MotionDetected),
            2 => Some(Self::DoorOpened),
            3 => Some(Self::DoorClosed),
            _ => None,
        }
    }
}

/// Fixed-capacity ring of encoded [`Event`]s.
///
/// Producers push inside a critical section, so any number of interrupt
/// sources may share one queue.  There must be a single consumer.
pub struct EventQueue {
    head: AtomicU8,
    tail: AtomicU8,
    dropped: AtomicU16,
    slots: [AtomicU8; EVENT_QUEUE_CAP],
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl EventQueue {
    pub const fn new() -> Self {
        Self {
            head: AtomicU8::new(0),
            tail: AtomicU8::new(0),
            dropped: AtomicU16::new(0),
            slots: [const { AtomicU8::new(0) }; EVENT_QUEUE_CAP],
        }
    }

    /// Push an event.  Safe to call from ISR context; never blocks.
    /// Returns `false` if the queue is full (event dropped and counted).
    pub fn push(&self, event: Event) -> bool {
        critical_section::with(|_| {
            let head = self.head.load(Ordering::Relaxed);
            let tail = self.tail.load(Ordering::Acquire);
            let next_head = (head + 1) % EVENT_QUEUE_CAP as u8;

            if next_head == tail {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                return false;
            }

            self.slots[head as usize].store(event as u8, Ordering::Relaxed);
            self.head.store(next_head, Ordering::Release);
            true
        })
    }

    /// Pop the oldest event.  Main loop only.
    pub fn pop(&self) -> Option<Event> {
        loop {
            let tail = self.tail.load(Ordering::Relaxed);
            let head = self.head.load(Ordering::Acquire);

            if tail == head {
                return None;
            }

            let raw = self.slots[tail as usize].load(Ordering::Relaxed);
            self.tail
                .store((tail + 1) % EVENT_QUEUE_CAP as u8, Ordering::Release);

            // Unknown bytes cannot be written through `push`; skip them anyway.
            if let Some(event) = Event::from_u8(raw) {
                return Some(event);
            }
        }
    }

    /// Drain all pending events into a callback, oldest first.
    pub fn drain(&self, mut handler: impl FnMut(Event)) {
        while let Some(event) = self.pop() {
            handler(event);
        }
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        let head = self.head.load(Ordering::Relaxed) as usize;
        let tail = self.tail.load(Ordering::Relaxed) as usize;
        (head + EVENT_QUEUE_CAP - tail) % EVENT_QUEUE_CAP
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return and reset the count of events dropped since the last call.
    pub fn take_dropped(&self) -> u16 {
        self.dropped.swap(0, Ordering::Relaxed)
    }
}
