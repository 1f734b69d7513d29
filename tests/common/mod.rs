#![allow(dead_code)]

use planet_visibility::bodies::HorizonEvent;
use planet_visibility::observers::ObserverPosition;
use planet_visibility::time::CivilDateTime;
use planet_visibility::time_frame::TimeFrameContext;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn paris() -> ObserverPosition {
    ObserverPosition::new("Paris", (2, 20, 55.0), (48, 51, 12.0), 0.0, None, None).unwrap()
}

/// Context at a local civil instant, ΔT estimated.
pub fn context(
    observer: ObserverPosition,
    (year, month, day): (i32, u32, u32),
    (hour, minute): (u32, u32),
    zone: i32,
) -> TimeFrameContext {
    let local = CivilDateTime::new(year, month, day, hour, minute, 0.0).unwrap();
    TimeFrameContext::new(observer, local, zone, 0, None)
}

/// Local time of a crossing in decimal hours, panicking on a sentinel.
pub fn event_hours(event: &HorizonEvent) -> f64 {
    event
        .local_time
        .unwrap_or_else(|| panic!("no crossing: {event:?}"))
        .hours()
}

/// Assert that a crossing happens within `tolerance_min` minutes of `hh:mm`.
pub fn assert_event_near(event: &HorizonEvent, (hour, minute): (u32, u32), tolerance_min: f64) {
    let expected = hour as f64 + minute as f64 / 60.0;
    let actual = event_hours(event);
    assert!(
        (actual - expected).abs() * 60.0 <= tolerance_min,
        "expected {hour:02}:{minute:02} ± {tolerance_min} min, got {actual:.4} h"
    );
}
