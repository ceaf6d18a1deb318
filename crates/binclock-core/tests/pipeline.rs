//! End-to-end tests: time source through builder and registry to output.
//!
//! Renderers write into shared in-memory buffers so the exact bytes each
//! display produced can be inspected after dispatch.

#![allow(clippy::unwrap_used)]

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use binclock_core::{
    ClockError, ClockState, ClockStateBuilder, DisplayMode, DisplayRegistry, FixedTimeSource,
    RenderError, TimeComponents, TimeField, TimeSource, WriterRenderer, to_decimal,
};
use serde_json::Value;

/// Cloneable writer backed by a shared byte buffer.
#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn builder(hours: u8, minutes: u8, seconds: u8) -> ClockStateBuilder<FixedTimeSource> {
    let time = TimeComponents::new(hours, minutes, seconds).unwrap();
    ClockStateBuilder::new(FixedTimeSource::new(time).with_timestamp(1_700_000_000))
}

#[test]
fn one_state_reaches_every_display() {
    let state = builder(14, 30, 45).current_state();
    assert!(state.is_valid());

    let emoji = SharedBuffer::default();
    let compact = SharedBuffer::default();
    let json = SharedBuffer::default();

    let mut registry = DisplayRegistry::new();
    registry
        .register(WriterRenderer::new(DisplayMode::Emoji, emoji.clone()))
        .unwrap();
    registry
        .register(WriterRenderer::new(DisplayMode::Compact, compact.clone()))
        .unwrap();
    registry
        .register(WriterRenderer::new(DisplayMode::Json, json.clone()))
        .unwrap();

    let summary = registry.dispatch_all(&state);
    assert_eq!(summary.rendered, 3);
    assert!(summary.is_clean());

    assert_eq!(
        emoji.contents(),
        "🌝 Binary Clock 🌚\n\
         Time: 14:30:45\n\
         \n\
         Hours   : 🌚🌚🌝 🌚🌝🌚🌚\n\
         Minutes : 🌚🌝🌝 🌚🌚🌚🌚\n\
         Seconds : 🌝🌚🌚 🌚🌝🌚🌝\n"
    );
    assert_eq!(
        compact.contents(),
        "14:30:45 [001 0100 : 011 0000 : 100 0101]\n"
    );

    let value: Value = serde_json::from_str(&json.contents()).unwrap();
    assert_eq!(value["timestamp"], 1_700_000_000);
    assert_eq!(value["time"], "14:30:45");
    assert_eq!(value["binary"]["minutes"]["tens"], serde_json::json!([0, 1, 1]));
}

#[test]
fn decoded_digits_recover_the_source_time() {
    for (hours, minutes, seconds) in [(0, 0, 0), (9, 5, 3), (12, 34, 56), (23, 59, 59)] {
        let state = builder(hours, minutes, seconds).current_state();
        let decoded: Vec<u8> = TimeField::ALL
            .iter()
            .map(|&field| {
                let (tens, units) = state.digits(field);
                to_decimal(tens)
                    .saturating_mul(10)
                    .saturating_add(to_decimal(units))
            })
            .collect();
        assert_eq!(decoded, vec![hours, minutes, seconds]);
    }
}

#[test]
fn unregistered_display_stops_receiving_states() {
    let kept = SharedBuffer::default();
    let dropped = SharedBuffer::default();

    let mut registry = DisplayRegistry::new();
    registry
        .register(WriterRenderer::new(DisplayMode::Compact, kept.clone()))
        .unwrap();
    let id = registry
        .register(WriterRenderer::new(DisplayMode::Compact, dropped.clone()))
        .unwrap();

    registry.dispatch_all(&builder(1, 2, 3).current_state());
    registry.unregister(id).unwrap();
    registry.dispatch_all(&builder(4, 5, 6).current_state());

    assert_eq!(
        kept.contents(),
        "01:02:03 [000 0001 : 000 0010 : 000 0011]\n\
         04:05:06 [000 0100 : 000 0101 : 000 0110]\n"
    );
    assert_eq!(dropped.contents(), "01:02:03 [000 0001 : 000 0010 : 000 0011]\n");
}

#[test]
fn failing_clock_yields_failed_state() {
    struct Unplugged;

    impl TimeSource for Unplugged {
        fn now(&self) -> Result<TimeComponents, ClockError> {
            Err(ClockError::SystemTimeUnavailable {
                reason: "unplugged".to_owned(),
            })
        }

        fn unix_timestamp(&self) -> Result<i64, ClockError> {
            Err(ClockError::SystemTimeUnavailable {
                reason: "unplugged".to_owned(),
            })
        }
    }

    let builder = ClockStateBuilder::new(Unplugged);
    assert!(builder.try_current_state().is_err());

    let state = builder.current_state();
    assert_eq!(state, ClockState::FAILED);
    assert!(!state.is_valid());
}

#[test]
fn closure_displays_share_the_registry_with_writers() {
    let times = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&times);

    let mut registry = DisplayRegistry::with_capacity(2);
    registry
        .register(move |state: &ClockState| -> Result<(), RenderError> {
            sink.lock().unwrap().push(state.time_string());
            Ok(())
        })
        .unwrap();
    registry
        .register(WriterRenderer::new(DisplayMode::Raw, io::sink()))
        .unwrap();
    assert!(registry.is_full());

    registry.dispatch_all(&builder(7, 8, 9).current_state());
    assert_eq!(*times.lock().unwrap(), vec!["07:08:09".to_owned()]);
}
