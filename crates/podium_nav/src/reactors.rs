//! Side-effect reactors
//!
//! Pure `SECTION_CHANGE` subscribers. Each one is attached once at assembly
//! and reacts to every delivery, including redundant ones, so hosts must
//! tolerate idempotent calls. Reactors read the event payload and their own
//! captured handles only; they never publish and never touch navigation
//! state.

use std::sync::Arc;

use crate::hosts::{SharedIndicator, SharedMedia};
use podium_core::events::{event_types, EventData};
use podium_core::{PanelDeck, SharedBus, SharedProgress};

/// Play the now-current panel's media and pause every other panel's.
pub fn attach_video_reactor(bus: &SharedBus, deck: Arc<PanelDeck>, media: SharedMedia) {
    bus.lock().unwrap().subscribe(event_types::SECTION_CHANGE, move |ev| {
        let EventData::Section { current } = ev.data else {
            return;
        };
        let mut media = media.lock().unwrap();
        for panel in deck.iter() {
            let Some(node) = panel.media else {
                continue;
            };
            if panel.index == current {
                media.play(node);
            } else {
                media.pause(node);
            }
        }
    });
}

/// Land the exact final progress fraction. The machine animates the
/// approach; this write is what guarantees the indicator is exact even when
/// the index moved without a transition (sensor resync).
pub fn attach_progress_reactor(bus: &SharedBus, deck: Arc<PanelDeck>, progress: SharedProgress) {
    bus.lock().unwrap().subscribe(event_types::SECTION_CHANGE, move |ev| {
        let EventData::Section { current } = ev.data else {
            return;
        };
        *progress.lock().unwrap() = deck.progress_fraction(current);
    });
}

/// Highlight the indicator entry whose panel matches the notification.
pub fn attach_indicator_reactor(bus: &SharedBus, indicator: SharedIndicator) {
    bus.lock().unwrap().subscribe(event_types::SECTION_CHANGE, move |ev| {
        let EventData::Section { current } = ev.data else {
            return;
        };
        indicator.lock().unwrap().set_active(current);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hosts::test_hosts::{RecordingIndicator, RecordingMedia};
    use podium_core::events::Event;
    use podium_core::{shared_bus, shared_value, Panel};
    use std::sync::Mutex;

    fn media_deck() -> Arc<PanelDeck> {
        Arc::new(PanelDeck::new(vec![
            Panel::new(0, 10).with_media(500),
            Panel::new(1, 11),
            Panel::new(2, 12).with_media(502),
        ]))
    }

    #[test]
    fn test_video_reactor_plays_current_pauses_rest() {
        let bus = shared_bus();
        let media = Arc::new(Mutex::new(RecordingMedia::default()));
        attach_video_reactor(&bus, media_deck(), media.clone());

        bus.lock().unwrap().publish(&Event::section_change(2));
        let rec = media.lock().unwrap();
        assert_eq!(rec.playing, vec![502]);
        assert_eq!(rec.paused, vec![500]);
    }

    #[test]
    fn test_progress_reactor_writes_exact_fraction() {
        let bus = shared_bus();
        let progress = shared_value(0.33);
        attach_progress_reactor(&bus, media_deck(), progress.clone());

        bus.lock().unwrap().publish(&Event::section_change(1));
        assert_eq!(*progress.lock().unwrap(), 0.5);
    }

    #[test]
    fn test_indicator_reactor_tracks_payload() {
        let bus = shared_bus();
        let indicator = Arc::new(Mutex::new(RecordingIndicator::default()));
        attach_indicator_reactor(&bus, indicator.clone());

        bus.lock().unwrap().publish(&Event::section_change(1));
        bus.lock().unwrap().publish(&Event::section_change(1));
        assert_eq!(indicator.lock().unwrap().active, vec![1, 1]);
    }
}
