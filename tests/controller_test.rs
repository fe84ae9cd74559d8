//! Dashboard controller behavior: power parity, gating, battery drain

use std::cell::RefCell;

use guidebot::domain::dashboard::{
    BatteryLevel, DashboardController, DashboardState, DrainSettings, NavigationMode, Notifier,
    Outcome, Rejection, ACTIVATED_TITLE, DEACTIVATED_TITLE, NAVIGATION_TITLE, VOICE_TITLE,
};

#[derive(Default)]
struct RecordingNotifier {
    calls: RefCell<Vec<(String, String)>>,
}

impl RecordingNotifier {
    fn titles(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|(t, _)| t.clone()).collect()
    }

    fn count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, title: &str, description: &str) {
        self.calls
            .borrow_mut()
            .push((title.to_string(), description.to_string()));
    }
}

fn controller(notifier: &RecordingNotifier) -> DashboardController<&RecordingNotifier> {
    DashboardController::new(DashboardState::default(), notifier, DrainSettings::default())
}

fn assert_battery(ctl: &DashboardController<&RecordingNotifier>, expected: f64) {
    let actual = ctl.snapshot().battery.value();
    assert!(
        (actual - expected).abs() < 1e-9,
        "battery {actual} != {expected}"
    );
}

#[test]
fn test_power_matches_call_parity() {
    let notifier = RecordingNotifier::default();
    let mut ctl = controller(&notifier);

    for calls in 1..=9 {
        ctl.toggle_power();
        assert_eq!(ctl.snapshot().active, calls % 2 == 1, "after {calls} calls");
    }
    assert_eq!(notifier.count(), 9);
}

#[test]
fn test_standby_rejects_actions_without_side_effects() {
    let notifier = RecordingNotifier::default();
    let mut ctl = controller(&notifier);
    let before = ctl.snapshot();

    assert_eq!(
        ctl.issue_voice_command(),
        Outcome::Rejected(Rejection::Standby)
    );
    assert_eq!(
        ctl.start_navigation(),
        Outcome::Rejected(Rejection::Standby)
    );

    assert_eq!(ctl.snapshot(), before);
    assert_eq!(notifier.count(), 0);
}

#[test]
fn test_voice_command_notifies_once_per_call() {
    let notifier = RecordingNotifier::default();
    let mut ctl = controller(&notifier);
    ctl.toggle_power();

    for n in 1..=3 {
        assert_eq!(ctl.issue_voice_command(), Outcome::Applied);
        assert_eq!(notifier.count(), 1 + n);
    }
    assert_eq!(notifier.titles().last().map(String::as_str), Some(VOICE_TITLE));
}

#[test]
fn test_start_navigation_notifies_when_running() {
    let notifier = RecordingNotifier::default();
    let mut ctl = controller(&notifier);
    ctl.toggle_power();

    assert_eq!(ctl.start_navigation(), Outcome::Applied);
    assert_eq!(
        notifier.titles(),
        vec![ACTIVATED_TITLE.to_string(), NAVIGATION_TITLE.to_string()]
    );
}

#[test]
fn test_navigation_mode_round_trip() {
    let notifier = RecordingNotifier::default();
    let mut ctl = controller(&notifier);
    ctl.toggle_power();

    ctl.set_navigation_mode(NavigationMode::Outdoor);
    assert_eq!(ctl.snapshot().navigation_mode, NavigationMode::Outdoor);
    ctl.set_navigation_mode(NavigationMode::Indoor);
    assert_eq!(ctl.snapshot().navigation_mode, NavigationMode::Indoor);
}

#[test]
fn test_settings_frozen_in_standby() {
    let notifier = RecordingNotifier::default();
    let mut ctl = controller(&notifier);
    ctl.toggle_power();
    ctl.set_navigation_mode(NavigationMode::Outdoor);
    ctl.toggle_power();

    assert!(!ctl.set_navigation_mode(NavigationMode::Indoor).is_applied());
    assert!(!ctl.set_voice_enabled(false).is_applied());
    assert!(!ctl.set_sound_enabled(false).is_applied());

    let snap = ctl.snapshot();
    assert_eq!(snap.navigation_mode, NavigationMode::Outdoor);
    assert!(snap.voice_enabled);
    assert!(snap.sound_enabled);
}

#[test]
fn test_power_cycle_scenario() {
    let notifier = RecordingNotifier::default();
    let mut ctl = controller(&notifier);
    assert!(!ctl.snapshot().active);
    assert_battery(&ctl, 85.0);

    ctl.toggle_power();
    assert!(ctl.snapshot().active);
    assert_eq!(notifier.titles(), vec![ACTIVATED_TITLE.to_string()]);

    for _ in 0..100 {
        ctl.tick();
    }
    assert_battery(&ctl, 75.0);
    assert_eq!(notifier.count(), 1, "ticks never notify");

    ctl.toggle_power();
    assert!(!ctl.snapshot().active);
    assert_eq!(
        notifier.titles(),
        vec![ACTIVATED_TITLE.to_string(), DEACTIVATED_TITLE.to_string()]
    );

    for _ in 0..50 {
        ctl.tick();
    }
    assert_battery(&ctl, 75.0);
}

#[test]
fn test_battery_stays_in_range_and_never_rises() {
    let notifier = RecordingNotifier::default();
    let state = DashboardState {
        battery: BatteryLevel::new(1.0),
        ..DashboardState::default()
    };
    let drain = DrainSettings {
        per_tick: 0.3,
        ..DrainSettings::default()
    };
    let mut ctl = DashboardController::new(state, &notifier, drain);
    ctl.toggle_power();

    let mut previous = ctl.snapshot().battery.value();
    for _ in 0..20 {
        ctl.tick();
        let level = ctl.snapshot().battery.value();
        assert!((0.0..=100.0).contains(&level));
        assert!(level <= previous);
        previous = level;
    }
    assert_eq!(ctl.snapshot().battery, BatteryLevel::EMPTY);
}
