//! Integration tests for EffectEngine

use tri_led_controller::effect::{alternate_levels, fade_levels};
use tri_led_controller::{
    BLINK_GAP, EffectEngine, EffectMode, FADE_PERIOD, Levels, Millis, Status,
};

#[test]
fn activate_reports_mode_status() {
    let mut engine = EffectEngine::new();
    for mode in EffectMode::ALL {
        let activation = engine.activate(mode, Millis(0));
        assert_eq!(activation.mode, mode);
        assert_eq!(activation.status, Status::Mode(mode));
    }
}

#[test]
fn animated_modes_have_no_entry_frame() {
    let mut engine = EffectEngine::new();
    assert_eq!(engine.activate(EffectMode::Alternate, Millis(0)).entry, None);
    assert_eq!(engine.activate(EffectMode::Fade, Millis(0)).entry, None);
}

#[test]
fn every_activation_clears_override() {
    let mut engine = EffectEngine::new();
    let mut mode = EffectMode::Off;

    for step in 0..12u32 {
        engine.toggle_override();
        assert!(engine.manual_override().is_active());

        mode = mode.next();
        engine.activate(mode, Millis(step * 100));
        assert!(!engine.manual_override().is_active());
    }

    assert_eq!(mode, EffectMode::ALL[12 % 4]);
}

#[test]
fn override_levels_follow_led_state() {
    let mut engine = EffectEngine::new();
    assert_eq!(engine.toggle_override(), Levels::FULL);
    assert_eq!(engine.manual_override().levels(), Levels::FULL);
    assert_eq!(engine.toggle_override(), Levels::OFF);
    assert_eq!(engine.manual_override().levels(), Levels::OFF);
}

#[test]
fn fade_channels_stay_in_range_and_cross_fade() {
    for elapsed in (0..FADE_PERIOD).step_by(10) {
        let levels = fade_levels(elapsed).as_array();
        let sum: u32 = levels.iter().map(|&l| u32::from(l)).sum();
        // sin(x) + sin(x + 2π/3) + sin(x + 4π/3) = 0, so the channels always
        // add up to about 3 * 127.5 before truncation.
        assert!((378..=383).contains(&sum), "sum {sum} at {elapsed} ms");
    }
}

#[test]
fn fade_channel_1_and_2_lead_channel_0() {
    let third = FADE_PERIOD / 3;
    for elapsed in [0, 250, 900, 1500] {
        let now = fade_levels(elapsed);
        let later = fade_levels(elapsed + third);
        let later2 = fade_levels(elapsed + 2 * third);
        // Offsets of 1/3 and 2/3 period: channel 1 is where channel 0 will
        // be one third of a period later.
        assert!(now.channel(1).abs_diff(later.channel(0)) <= 1);
        assert!(now.channel(2).abs_diff(later2.channel(0)) <= 1);
    }
}

#[test]
fn render_uses_elapsed_time_since_anchor() {
    let mut engine = EffectEngine::new();
    engine.activate(EffectMode::Alternate, Millis(12_345));

    assert_eq!(engine.render(EffectMode::Alternate, Millis(12_345)), Some(Levels::OFF));
    assert_eq!(
        engine.render(EffectMode::Alternate, Millis(12_345 + BLINK_GAP)),
        Some(Levels([255, 0, 0]))
    );
    assert_eq!(
        engine.render(EffectMode::Alternate, Millis(12_345 + 3 * BLINK_GAP)),
        Some(Levels([0, 255, 0]))
    );
}

#[test]
fn render_across_clock_wraparound() {
    let mut engine = EffectEngine::new();
    let anchor = Millis(u32::MAX - 100);
    engine.activate(EffectMode::Fade, anchor);

    assert_eq!(
        engine.render(EffectMode::Fade, anchor.wrapping_add(777)),
        Some(fade_levels(777))
    );
}

#[test]
fn alternate_toggles_every_blink_gap() {
    let mut previous = alternate_levels(0);
    for slot in 1..12 {
        let start = slot * BLINK_GAP;
        let current = alternate_levels(start);
        assert_ne!(current, previous, "slot {slot}");
        assert_eq!(alternate_levels(start + BLINK_GAP - 1), current);
        previous = current;
    }
}
