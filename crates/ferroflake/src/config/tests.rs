use crate::{
    DEFAULT_BITS_MACHINE_ID, DEFAULT_BITS_SEQUENCE, DEFAULT_EPOCH, DEFAULT_TIME_UNIT, Error,
    Layout, MAX_BITS_FIELD, Settings,
};
use core::time::Duration;

const NOW: Duration = Duration::from_secs(1_800_000_000);

fn layout(settings: Settings) -> Layout {
    Layout::from_settings(&settings, NOW).unwrap()
}

#[test]
fn defaults_produce_39_8_16_layout() {
    let layout = layout(Settings::default());

    assert_eq!(layout.bits_time(), 39);
    assert_eq!(layout.bits_sequence(), DEFAULT_BITS_SEQUENCE);
    assert_eq!(layout.bits_machine(), DEFAULT_BITS_MACHINE_ID);
    assert_eq!(layout.time_unit(), DEFAULT_TIME_UNIT);
    assert_eq!(layout.start_time(), DEFAULT_EPOCH);
    assert_eq!(layout.max_sequence(), 255);
    assert_eq!(layout.max_machine_id(), 65_535);
    assert_eq!(layout.max_elapsed_time(), (1 << 39) - 1);
}

#[test]
fn default_lifetime_is_about_174_years() {
    let years = layout(Settings::default()).lifetime().as_secs() / (365 * 24 * 60 * 60);
    assert_eq!(years, 174);
}

#[test]
fn custom_widths_are_respected() {
    let layout = layout(Settings::default().with_bits_sequence(12).with_bits_machine_id(10));

    assert_eq!(layout.bits_sequence(), 12);
    assert_eq!(layout.bits_machine(), 10);
    assert_eq!(layout.bits_time(), 41);
}

#[test]
fn widest_allowed_fields_leave_32_time_bits() {
    let layout = layout(Settings::default().with_bits_sequence(1).with_bits_machine_id(30));
    assert_eq!(layout.bits_time(), 32);

    let err = Layout::from_settings(
        &Settings::default().with_bits_sequence(2).with_bits_machine_id(30),
        NOW,
    )
    .unwrap_err();
    assert!(matches!(err, Error::InvalidBitsTime));
}

#[test]
fn rejects_invalid_settings() {
    let cases: Vec<(&str, Settings, fn(&Error) -> bool)> = vec![
        (
            "invalid bit length for time",
            Settings::default().with_bits_sequence(16).with_bits_machine_id(16),
            |e| matches!(e, Error::InvalidBitsTime),
        ),
        (
            "invalid bit length for sequence number",
            Settings::default().with_bits_sequence(MAX_BITS_FIELD + 1),
            |e| matches!(e, Error::InvalidBitsSequence),
        ),
        (
            "invalid bit length for machine id",
            Settings::default().with_bits_machine_id(MAX_BITS_FIELD + 1),
            |e| matches!(e, Error::InvalidBitsMachineId),
        ),
        (
            "invalid time unit",
            Settings::default().with_time_unit(Duration::from_micros(1)),
            |e| matches!(e, Error::InvalidTimeUnit),
        ),
        (
            "start time ahead",
            Settings::default().with_start_time(NOW + Duration::from_secs(60)),
            |e| matches!(e, Error::StartTimeAhead),
        ),
    ];

    for (name, settings, is_expected) in cases {
        let err = Layout::from_settings(&settings, NOW).unwrap_err();
        assert!(is_expected(&err), "{name}: unexpected error {err:?}");
    }
}

#[test]
fn sequence_width_is_checked_before_machine_width() {
    let err = Layout::from_settings(
        &Settings::default()
            .with_bits_sequence(MAX_BITS_FIELD + 1)
            .with_bits_machine_id(MAX_BITS_FIELD + 1),
        NOW,
    )
    .unwrap_err();
    assert!(matches!(err, Error::InvalidBitsSequence));
}

#[test]
fn default_epoch_ahead_of_clock_is_rejected() {
    let before_default_epoch = DEFAULT_EPOCH - Duration::from_secs(1);
    let err = Layout::from_settings(&Settings::default(), before_default_epoch).unwrap_err();
    assert!(matches!(err, Error::StartTimeAhead));
}

#[test]
fn start_time_equal_to_now_is_accepted() {
    let layout = layout(Settings::default().with_start_time(NOW));
    assert_eq!(layout.start_time(), NOW);
    assert_eq!(layout.elapsed_ticks(NOW), 0);
}

#[test]
fn minimum_time_unit_is_accepted() {
    let layout = layout(Settings::default().with_time_unit(Duration::from_millis(1)));
    assert_eq!(layout.time_unit(), Duration::from_millis(1));
}

#[test]
fn start_time_is_truncated_to_tick_granularity() {
    let start = NOW - Duration::from_millis(1_234);
    let layout = layout(Settings::default().with_start_time(start));

    assert_eq!(layout.start_time(), NOW - Duration::from_millis(1_240));
}

#[test]
fn elapsed_ticks_floor_and_go_negative_before_epoch() {
    let layout = layout(Settings::default().with_start_time(NOW));

    assert_eq!(layout.elapsed_ticks(NOW + Duration::from_millis(19)), 1);
    assert_eq!(layout.elapsed_ticks(NOW + Duration::from_millis(20)), 2);
    assert_eq!(layout.elapsed_ticks(NOW - Duration::from_millis(10)), -1);
}

#[test]
fn sleep_time_reaches_next_tick_boundary() {
    let layout = layout(Settings::default().with_start_time(NOW));

    let now = NOW + Duration::from_millis(23);
    assert_eq!(layout.sleep_time(1, now), Duration::from_millis(7));
    assert_eq!(layout.sleep_time(3, now), Duration::from_millis(27));
}

#[test]
fn settings_debug_hides_capabilities() {
    let settings = Settings::default().with_machine_id(|| Ok(7));
    let debug = format!("{settings:?}");

    assert!(debug.contains("machine_id: true"));
    assert!(debug.contains("check_machine_id: false"));
}
