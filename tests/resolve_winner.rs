#![allow(non_snake_case)]
use prize_wheel::{
    Cue,
    config::WheelSettings,
    geometry::winner_index,
    test_helpers::*,
};
use proptest::prelude::*;

#[test]
fn resolve_winner__removes_the_slice_under_the_pointer() {
    // given
    let mut ctx = TestContext::new("Alice, Bob, Carol, Dave, Erin");
    let before = ctx.wheel.names().to_vec();

    // when
    let entry = ctx.spin_to_completion(16).unwrap();

    // then
    let index = winner_index(before.len(), ctx.wheel.rotation()).unwrap();
    assert_eq!(entry.name, before[index]);
    assert_eq!(entry.prize, 1);
    assert_eq!(entry.label, "1st Prize");
    assert_eq!(ctx.wheel.prize_counter(), 1);
    assert_eq!(ctx.wheel.names().len(), before.len() - 1);
    assert!(!ctx.wheel.names().contains(&entry.name));
    assert_eq!(ctx.wheel.history(), std::slice::from_ref(&entry));
}

#[test]
fn resolve_winner__announces_in_order() {
    // given
    let mut ctx = TestContext::new("Alice, Bob, Carol");
    ctx.wheel.spin(ctx.at(0));
    ctx.wheel.port_mut().clear();

    // when
    let entry = ctx.wheel.tick(ctx.at(5000)).unwrap();

    // then
    let remaining = ctx.wheel.names().join(", ");
    let expected = vec![
        PortCall::SetSpinEnabled(true),
        PortCall::StopCue(Cue::Spin),
        PortCall::ShowWinner {
            name: entry.name.clone(),
            label: "1st Prize".to_string(),
        },
        PortCall::PlayCue(Cue::Winner),
        PortCall::ShowOverlay(entry.clone()),
        PortCall::PrependHistory(entry.clone()),
        PortCall::SyncInput(remaining),
    ];
    assert_eq!(&ctx.port().calls[1..], expected.as_slice());
}

#[test]
fn resolve_winner__labels_prizes_and_keeps_newest_first() {
    // given
    let mut ctx = TestContext::new("a, b, c, d, e");
    let mut t = 0;
    let mut winners = Vec::new();

    // when
    while !ctx.wheel.names().is_empty() {
        let entry = ctx.spin_from(t, 16).unwrap();
        winners.push(entry.name.clone());
        t += 7000;
    }

    // then
    let labels: Vec<&str> = ctx.wheel.history().iter().map(|e| e.label.as_str()).collect();
    assert_eq!(labels, ["5th Prize", "4th Prize", "3rd Prize", "2nd Prize", "1st Prize"]);
    let newest_first: Vec<String> = winners.iter().rev().cloned().collect();
    let history_names: Vec<String> = ctx.wheel.history().iter().map(|e| e.name.clone()).collect();
    assert_eq!(history_names, newest_first);
    winners.sort();
    assert_eq!(winners, ["a", "b", "c", "d", "e"]);
    // nobody left to spin for
    assert!(!ctx.wheel.spin(ctx.at(t)));
}

#[test]
fn resolve_winner__deferred_redraw_fires_once_after_delay() {
    // given
    let mut ctx = TestContext::new("Alice, Bob, Carol");
    ctx.wheel.spin(ctx.at(0));
    ctx.wheel.tick(ctx.at(5000));
    assert_eq!(ctx.port().last_render().unwrap().len(), 3);
    ctx.wheel.port_mut().clear();

    // when
    ctx.wheel.tick(ctx.at(5500));
    let before_due = ctx.port().render_count();
    ctx.wheel.tick(ctx.at(6000));
    ctx.wheel.tick(ctx.at(6500));

    // then
    assert_eq!(before_due, 0);
    assert_eq!(ctx.port().render_count(), 1);
    assert_eq!(ctx.port().last_render().unwrap().len(), 2);
    assert_eq!(ctx.wheel.pending_redraw(), None);
}

#[test]
fn resolve_winner__spin_is_available_before_the_deferred_redraw() {
    // given
    let mut ctx = TestContext::new("Alice, Bob, Carol");
    ctx.spin_to_completion(16).unwrap();
    assert!(ctx.wheel.pending_redraw().is_some());

    // when
    let started = ctx.wheel.spin(ctx.at(5100));

    // then
    assert!(started);
}

#[test]
fn resolve_winner__keep_winners_leaves_the_wheel_intact() {
    // given
    let settings = WheelSettings {
        remove_winners: false,
        ..WheelSettings::default()
    };
    let mut ctx = TestContext::with_settings("Alice, Bob, Carol", settings);

    // when
    let entry = ctx.spin_to_completion(16).unwrap();

    // then
    assert_eq!(ctx.wheel.names().len(), 3);
    assert!(ctx.wheel.names().contains(&entry.name));
    assert_eq!(ctx.wheel.pending_redraw(), None);
    assert_eq!(ctx.wheel.prize_counter(), 1);
}

#[test]
fn resolve_winner__muted_wheel_plays_no_cues() {
    // given
    let settings = WheelSettings {
        sound: false,
        overlay: false,
        ..WheelSettings::default()
    };
    let mut ctx = TestContext::with_settings("Alice, Bob", settings);

    // when
    ctx.spin_to_completion(16).unwrap();
    ctx.wheel.dismiss_overlay();

    // then
    assert!(ctx.port().calls.iter().all(|call| !matches!(
        call,
        PortCall::PlayCue(_) | PortCall::StopCue(_) | PortCall::ShowOverlay(_)
    )));
}

#[test]
fn dismiss_overlay__hides_and_stops_winner_cue() {
    // given
    let mut ctx = TestContext::new("Alice, Bob");
    ctx.spin_to_completion(16).unwrap();
    ctx.wheel.port_mut().clear();

    // when
    ctx.wheel.dismiss_overlay();

    // then
    assert_eq!(
        ctx.port().calls,
        vec![PortCall::HideOverlay, PortCall::StopCue(Cue::Winner)]
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn resolve_winner__always_picks_an_existing_participant(
        count in 1usize..25,
        seed in any::<u64>(),
        frame_ms in 1u64..120,
    ) {
        let raw = (0..count).map(|i| format!("p{i}")).collect::<Vec<_>>().join(",");
        let mut ctx = TestContext::with_seed(&raw, WheelSettings::default(), seed);
        let before = ctx.wheel.names().to_vec();

        let entry = ctx.spin_to_completion(frame_ms).unwrap();

        let index = winner_index(count, ctx.wheel.rotation()).unwrap();
        prop_assert!(index < count);
        prop_assert_eq!(&entry.name, &before[index]);
        prop_assert_eq!(ctx.wheel.names().len(), count - 1);
        prop_assert_eq!(ctx.wheel.prize_counter(), 1);
    }
}
