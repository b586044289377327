//! Tests for the assembled surface

use std::sync::{Arc, Mutex};

use rustc_hash::FxHashMap;
use smallvec::smallvec;

use crate::prelude::*;
use crate::session::INTRO_PLAYED_KEY;
use podium_core::events::event_types;

const HEIGHT: f32 = 720.0;

/// Five panels; panel 2 hosts the exhibit, panel 4 answers to `#contact`.
fn descriptor() -> SurfaceDescriptor {
    SurfaceDescriptor::new(vec![
        Panel::new(0, 100),
        Panel::new(1, 101),
        Panel::new(2, 102).with_kind(PanelKind::Exhibit),
        Panel::new(3, 103),
        Panel::new(4, 104).with_anchor("contact"),
    ])
}

/// Assembled surface with the intro already behind it, so input is live.
fn surface(descriptor: SurfaceDescriptor) -> Orchestrator {
    Orchestrator::new(
        descriptor,
        HostBundle::null(),
        SurfaceConfig::default(),
        Box::new(MemorySession::with_intro_played()),
    )
    .expect("surface assembly")
}

fn pump(surface: &mut Orchestrator, frames: u32) {
    for _ in 0..frames {
        surface.tick(16.0);
    }
}

fn wheel(delta_y: f32) -> Event {
    Event::new(event_types::WHEEL, EventData::Wheel { delta_y })
}

fn key(code: KeyCode) -> Event {
    Event::new(
        event_types::KEY_DOWN,
        EventData::Key {
            key: code,
            modifiers: Modifiers::NONE,
        },
    )
}

fn record_changes(surface: &Orchestrator) -> Arc<Mutex<Vec<usize>>> {
    let changes = Arc::new(Mutex::new(Vec::new()));
    let seen = changes.clone();
    surface
        .context()
        .bus
        .lock()
        .unwrap()
        .subscribe(event_types::SECTION_CHANGE, move |ev| {
            if let EventData::Section { current } = ev.data {
                seen.lock().unwrap().push(current);
            }
        });
    changes
}

/// Session store the test keeps a handle on after the surface takes the box.
#[derive(Clone, Default)]
struct SharedSession {
    values: Arc<Mutex<FxHashMap<String, String>>>,
}

impl SessionStore for SharedSession {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap().get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }
}

#[derive(Default)]
struct RecordingFocus {
    focused: Vec<u64>,
}

impl podium_focus::FocusHost for RecordingFocus {
    fn set_focusable(&mut self, _node: u64, _focusable: bool) {}

    fn focus(&mut self, node: u64) {
        self.focused.push(node);
    }

    fn blur(&mut self) {}
}

#[test]
fn test_wheel_step_advances_one_section() {
    let mut s = surface(descriptor());
    let changes = record_changes(&s);

    s.handle_input(&wheel(50.0));
    assert!(s.is_animating());

    pump(&mut s, 60);
    assert_eq!(s.current_section(), 1);
    assert!(!s.is_animating());
    assert_eq!(*changes.lock().unwrap(), vec![1]);
    assert_eq!(*s.context().offset.lock().unwrap(), HEIGHT);
    let progress = *s.context().progress.lock().unwrap();
    assert!((progress - 0.25).abs() < 1e-6);
}

#[test]
fn test_second_request_dropped_while_in_flight() {
    let mut s = surface(descriptor());
    let changes = record_changes(&s);

    s.handle_input(&wheel(60.0));
    pump(&mut s, 2);
    s.handle_input(&wheel(60.0));

    pump(&mut s, 60);
    assert_eq!(s.current_section(), 1);
    assert_eq!(*changes.lock().unwrap(), vec![1]);
}

#[test]
fn test_consumed_event_is_dropped_unrouted() {
    let mut s = surface(descriptor());
    let mut ev = wheel(50.0);
    ev.consume();

    s.handle_input(&ev);
    assert!(!s.is_animating());
    assert_eq!(s.current_section(), 0);
}

#[test]
fn test_navigation_clamps_and_ignores_same_index() {
    let mut s = surface(descriptor());
    let changes = record_changes(&s);

    s.go_to_section(99, NavSource::Link);
    pump(&mut s, 80);
    assert_eq!(s.current_section(), 4);

    s.go_to_section(4, NavSource::Link);
    assert!(!s.is_animating());
    pump(&mut s, 10);
    assert_eq!(*changes.lock().unwrap(), vec![4]);
}

#[test]
fn test_end_key_jumps_to_last_panel() {
    let mut s = surface(descriptor());
    s.handle_input(&key(KeyCode::END));
    pump(&mut s, 60);
    assert_eq!(s.current_section(), 4);
}

#[test]
fn test_loader_end_arms_and_marks_session() {
    let session = SharedSession::default();
    let mut s = Orchestrator::new(
        descriptor(),
        HostBundle::null(),
        SurfaceConfig::default(),
        Box::new(session.clone()),
    )
    .expect("surface assembly");
    assert!(!s.is_armed());

    // Gestures fall on deaf ears until the loader finishes.
    s.handle_input(&wheel(50.0));
    pump(&mut s, 20);
    assert_eq!(s.current_section(), 0);

    s.handle_input(&Event::new(event_types::LOADER_END, EventData::None));
    assert!(s.is_armed());
    assert_eq!(session.get(INTRO_PLAYED_KEY).as_deref(), Some("1"));

    s.handle_input(&wheel(50.0));
    pump(&mut s, 60);
    assert_eq!(s.current_section(), 1);
}

#[test]
fn test_startup_fragment_lands_after_settle() {
    let mut s = surface(descriptor().with_fragment("#contact"));
    let changes = record_changes(&s);
    assert_eq!(*s.context().offset.lock().unwrap(), 0.0);

    pump(&mut s, 8);
    assert_eq!(*s.context().offset.lock().unwrap(), 4.0 * HEIGHT);
    assert_eq!(s.current_section(), 4);
    // The jump itself is silent; the sensor report publishes the change.
    assert_eq!(*changes.lock().unwrap(), vec![4]);
}

#[test]
fn test_navigate_while_expanded_collapses_first() {
    let mut s = surface(descriptor());
    s.set_full_bleed(true);
    s.expand_exhibit();
    pump(&mut s, 40);
    assert!(s.is_exhibit_expanded());

    let order = Arc::new(Mutex::new(Vec::new()));
    let bus = s.context().bus.clone();
    let o1 = order.clone();
    bus.lock()
        .unwrap()
        .subscribe(event_types::EXHIBIT_COLLAPSED, move |_| {
            o1.lock().unwrap().push("collapsed".to_string());
        });
    let o2 = order.clone();
    bus.lock()
        .unwrap()
        .subscribe(event_types::SECTION_CHANGE, move |ev| {
            if let EventData::Section { current } = ev.data {
                o2.lock().unwrap().push(format!("section {current}"));
            }
        });

    s.go_to_section(4, NavSource::Link);
    assert!(s.is_exhibit_transitioning());
    assert!(!s.is_animating());

    pump(&mut s, 120);
    assert_eq!(s.current_section(), 4);
    assert!(!s.is_exhibit_expanded());
    assert_eq!(
        *order.lock().unwrap(),
        vec!["collapsed".to_string(), "section 4".to_string()]
    );
}

#[test]
fn test_exhibit_keyboard_contract() {
    let mut s = surface(descriptor());
    s.set_full_bleed(true);

    // Enter on the exhibit container toggles it open.
    s.handle_input(&key(KeyCode::ENTER).with_target(102));
    assert!(s.is_exhibit_transitioning());
    pump(&mut s, 40);
    assert!(s.is_exhibit_expanded());

    // Escape collapses from anywhere while expanded.
    s.handle_input(&key(KeyCode::ESCAPE));
    pump(&mut s, 40);
    assert!(!s.is_exhibit_expanded());
    assert!(!s.is_exhibit_transitioning());
}

#[test]
fn test_expanded_exhibit_captures_targeted_wheel() {
    let mut s = surface(descriptor());
    s.set_full_bleed(true);
    s.expand_exhibit();
    pump(&mut s, 40);

    // Aimed at the exhibit node: local camera input, not navigation.
    s.handle_input(&wheel(80.0).with_target(102));
    pump(&mut s, 5);
    assert!(!s.is_animating());
    assert_eq!(s.current_section(), 0);
}

#[test]
fn test_tab_blocked_until_armed() {
    let focus_host = Arc::new(Mutex::new(RecordingFocus::default()));
    let d = descriptor().with_focus_pool(FocusPool::new(0, vec![1000, 1001]));
    let mut hosts = HostBundle::null();
    hosts.focus = focus_host.clone();
    let mut s = Orchestrator::new(
        d,
        hosts,
        SurfaceConfig::default(),
        Box::new(MemorySession::new()),
    )
    .expect("surface assembly");

    s.handle_input(&key(KeyCode::TAB));
    assert!(focus_host.lock().unwrap().focused.is_empty());

    s.handle_input(&Event::new(event_types::LOADER_END, EventData::None));
    s.handle_input(&key(KeyCode::TAB));
    assert_eq!(focus_host.lock().unwrap().focused, vec![1000]);
}

#[test]
fn test_tab_past_pool_edge_advances_section() {
    let d = descriptor()
        .with_focus_pool(FocusPool::new(0, vec![1000, 1001]))
        .with_focus_pool(FocusPool::new(1, vec![1100]));
    let mut s = surface(d);

    s.handle_input(&key(KeyCode::TAB));
    s.handle_input(&key(KeyCode::TAB));
    // The press after the pool's last node becomes a section step.
    s.handle_input(&key(KeyCode::TAB));
    assert!(s.is_animating());

    pump(&mut s, 60);
    assert_eq!(s.current_section(), 1);
}

#[test]
fn test_tab_out_of_expanded_exhibit_collapses_and_continues() {
    let focus_host = Arc::new(Mutex::new(RecordingFocus::default()));
    let d = descriptor().with_focus_pool(FocusPool::new(0, vec![1000]));
    let mut hosts = HostBundle::null();
    hosts.focus = focus_host.clone();
    let mut s = Orchestrator::new(
        d,
        hosts,
        SurfaceConfig::default(),
        Box::new(MemorySession::with_intro_played()),
    )
    .expect("surface assembly");
    s.set_full_bleed(true);
    s.expand_exhibit();
    pump(&mut s, 40);

    s.handle_input(&key(KeyCode::TAB));
    // Collapse starts and the same press still walks focus.
    assert!(s.is_exhibit_transitioning());
    assert_eq!(focus_host.lock().unwrap().focused, vec![1000]);
}

#[test]
fn test_section_change_force_closes_modal() {
    let mut s = surface(descriptor());
    s.handle_input(&Event::new(
        event_types::MODAL_OPENED,
        EventData::Modal {
            focusables: smallvec![900, 901],
        },
    ));
    assert!(s.is_modal_open());

    // Gestures are exclusive-muted while the modal owns input.
    s.handle_input(&wheel(50.0));
    assert!(!s.is_animating());

    s.go_to_section(3, NavSource::Link);
    pump(&mut s, 80);
    assert_eq!(s.current_section(), 3);
    assert!(!s.is_modal_open());
}

#[test]
fn test_touch_primary_keeps_native_momentum() {
    let cfg = SurfaceConfig {
        probe: DeviceProbe {
            max_touch_points: 5,
            coarse_pointer: true,
            has_hover: false,
        },
        ..SurfaceConfig::default()
    };
    let mut s = Orchestrator::new(
        descriptor(),
        HostBundle::null(),
        cfg,
        Box::new(MemorySession::with_intro_played()),
    )
    .expect("surface assembly");
    let changes = record_changes(&s);

    s.go_to_section(2, NavSource::Link);
    // No transition lock on this path; the offset lands instantly.
    assert!(!s.is_animating());
    assert_eq!(*s.context().offset.lock().unwrap(), 2.0 * HEIGHT);

    pump(&mut s, 2);
    assert_eq!(s.current_section(), 2);
    assert_eq!(*changes.lock().unwrap(), vec![2]);
    let progress = *s.context().progress.lock().unwrap();
    assert!((progress - 0.5).abs() < 1e-6);
}

#[test]
fn test_orientation_change_realigns_after_settle() {
    let mut s = surface(descriptor());
    s.handle_input(&wheel(50.0));
    pump(&mut s, 60);
    assert_eq!(s.current_section(), 1);

    s.handle_input(&Event::new(
        event_types::ORIENTATION_CHANGE,
        EventData::Resize {
            width: 720.0,
            height: 1280.0,
        },
    ));
    // Old geometry until the rotation settles.
    assert_eq!(*s.context().offset.lock().unwrap(), HEIGHT);

    pump(&mut s, 30);
    assert_eq!(*s.context().offset.lock().unwrap(), 1280.0);
    assert_eq!(s.current_section(), 1);
}

#[test]
fn test_unknown_panel_in_descriptor_rejected() {
    let d = descriptor().with_focus_pool(FocusPool::new(9, vec![1]));
    let result = Orchestrator::new(
        d,
        HostBundle::null(),
        SurfaceConfig::default(),
        Box::new(MemorySession::new()),
    );
    assert!(result.is_err());
}
