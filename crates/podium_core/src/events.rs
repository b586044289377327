//! Event bus
//!
//! One vocabulary for everything that moves through the surface: normalized
//! input (wheel, touch, key, pointer), viewport changes, and the
//! notifications the orchestrator publishes (section change, loader end,
//! modal open/close, exhibit expand/collapse).
//!
//! The bus keeps one ordered subscriber list per event type and invokes
//! subscribers in registration order, which is what makes delivery ordering
//! auditable. Subscribers must be idempotent on redundant delivery and must
//! not publish from inside a callback; every publish in the system originates
//! from the orchestrator's own tick or arming paths.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Event type identifier
pub type EventType = u32;

/// Event types understood by the surface.
pub mod event_types {
    use super::EventType;

    // Normalized input
    pub const POINTER_DOWN: EventType = 1;
    pub const POINTER_UP: EventType = 2;
    pub const WHEEL: EventType = 3;
    pub const TOUCH_START: EventType = 4;
    pub const TOUCH_MOVE: EventType = 5;
    pub const TOUCH_END: EventType = 6;
    pub const KEY_DOWN: EventType = 7;
    /// Content scroll position changed (native momentum, scrollbar drag).
    pub const SCROLL: EventType = 8;
    pub const RESIZE: EventType = 9;
    pub const ORIENTATION_CHANGE: EventType = 10;

    // Surface notifications
    pub const SECTION_CHANGE: EventType = 20;
    /// Intro/loader sequence finished.
    pub const LOADER_END: EventType = 21;
    pub const MODAL_OPENED: EventType = 22;
    pub const MODAL_CLOSED: EventType = 23;
    pub const EXHIBIT_EXPANDED: EventType = 24;
    pub const EXHIBIT_COLLAPSED: EventType = 25;
}

/// An event with associated data
#[derive(Clone, Debug)]
pub struct Event {
    pub event_type: EventType,
    /// Node handle the event is aimed at, 0 for surface-wide events.
    pub target: u64,
    pub data: EventData,
    /// True when an upstream handler already dealt with this event.
    pub consumed: bool,
}

/// Event-specific data
#[derive(Clone, Debug)]
pub enum EventData {
    Pointer {
        x: f32,
        y: f32,
    },
    Wheel {
        delta_y: f32,
    },
    Touch {
        x: f32,
        y: f32,
    },
    Key {
        key: KeyCode,
        modifiers: Modifiers,
    },
    Scroll {
        offset: f32,
    },
    Resize {
        width: f32,
        height: f32,
    },
    /// Payload of `SECTION_CHANGE`.
    Section {
        current: usize,
    },
    /// Payload of `MODAL_OPENED`: the modal's focusable nodes in tab order.
    Modal {
        focusables: SmallVec<[u64; 8]>,
    },
    None,
}

impl Event {
    pub fn new(event_type: EventType, data: EventData) -> Self {
        Self {
            event_type,
            target: 0,
            data,
            consumed: false,
        }
    }

    pub fn with_target(mut self, target: u64) -> Self {
        self.target = target;
        self
    }

    pub fn section_change(current: usize) -> Self {
        Self::new(event_types::SECTION_CHANGE, EventData::Section { current })
    }

    /// Mark the event as already handled; the surface pipeline drops
    /// consumed events unrouted.
    pub fn consume(&mut self) {
        self.consumed = true;
    }
}

/// Virtual key codes (platform-agnostic)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct KeyCode(pub u32);

impl KeyCode {
    pub const TAB: KeyCode = KeyCode(0x09);
    pub const ENTER: KeyCode = KeyCode(0x0D);
    pub const ESCAPE: KeyCode = KeyCode(0x1B);
    pub const SPACE: KeyCode = KeyCode(0x20);

    pub const PAGE_UP: KeyCode = KeyCode(0x21);
    pub const PAGE_DOWN: KeyCode = KeyCode(0x22);
    pub const END: KeyCode = KeyCode(0x23);
    pub const HOME: KeyCode = KeyCode(0x24);

    pub const UP: KeyCode = KeyCode(0x26);
    pub const DOWN: KeyCode = KeyCode(0x28);

    pub const UNKNOWN: KeyCode = KeyCode(0);
}

/// Keyboard modifier flags
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    bits: u8,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers { bits: 0 };
    pub const SHIFT: u8 = 0b0001;
    pub const CTRL: u8 = 0b0010;
    pub const ALT: u8 = 0b0100;

    pub const fn new(shift: bool, ctrl: bool, alt: bool) -> Self {
        let mut bits = 0;
        if shift {
            bits |= Self::SHIFT;
        }
        if ctrl {
            bits |= Self::CTRL;
        }
        if alt {
            bits |= Self::ALT;
        }
        Self { bits }
    }

    pub const fn shift_only() -> Self {
        Self { bits: Self::SHIFT }
    }

    pub const fn shift(&self) -> bool {
        self.bits & Self::SHIFT != 0
    }

    pub const fn ctrl(&self) -> bool {
        self.bits & Self::CTRL != 0
    }

    pub const fn alt(&self) -> bool {
        self.bits & Self::ALT != 0
    }

    pub const fn any(&self) -> bool {
        self.bits != 0
    }
}

/// Subscriber callback type
pub type Subscriber = Box<dyn FnMut(&Event) + Send>;

/// Publishes surface notifications to ordered per-type subscriber lists.
pub struct EventBus {
    subscribers: FxHashMap<EventType, Vec<Subscriber>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            subscribers: FxHashMap::default(),
        }
    }

    /// Register a subscriber for an event type. Subscribers for the same
    /// type run in registration order.
    pub fn subscribe<F>(&mut self, event_type: EventType, subscriber: F)
    where
        F: FnMut(&Event) + Send + 'static,
    {
        self.subscribers
            .entry(event_type)
            .or_default()
            .push(Box::new(subscriber));
    }

    /// Deliver an event to every subscriber of its type, in order.
    pub fn publish(&mut self, event: &Event) {
        if let Some(subscribers) = self.subscribers.get_mut(&event.event_type) {
            for subscriber in subscribers {
                subscriber(event);
            }
        }
    }

    pub fn subscriber_count(&self, event_type: EventType) -> usize {
        self.subscribers.get(&event_type).map_or(0, Vec::len)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared handle to the bus.
pub type SharedBus = std::sync::Arc<std::sync::Mutex<EventBus>>;

pub fn shared_bus() -> SharedBus {
    std::sync::Arc::new(std::sync::Mutex::new(EventBus::new()))
}
