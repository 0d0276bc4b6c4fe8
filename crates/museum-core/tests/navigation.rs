use glam::Vec2;
use museum_core::config::MovementCfg;
use museum_core::{
    AppPhase, CameraMode, ExhibitCatalog, FixedClock, KeyCode, Museum, NavConfig, Transition,
    TriggerKey,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn museum_at(x: f32, z: f32) -> Museum {
    let cfg = NavConfig {
        movement: MovementCfg {
            start: Vec2::new(x, z),
            ..MovementCfg::default()
        },
        ..NavConfig::default()
    };
    let mut m = Museum::new(cfg, ExhibitCatalog::default_gallery()).expect("museum");
    m.set_phase(AppPhase::Museum);
    m
}

fn position(m: &Museum) -> Vec2 {
    m.store().character().position
}

#[test]
fn forward_for_one_second() {
    let mut m = museum_at(0.0, -4.0);
    let mut clock = FixedClock::new(60);
    m.key_down(KeyCode::ArrowUp);
    clock.run_for(&mut m, 1.0);
    let p = position(&m);
    assert!((p.y - -7.5).abs() < 1e-3, "z = {}", p.y);
    assert_eq!(p.x, 0.0);
}

#[test]
fn forward_clamps_at_far_wall() {
    let mut m = museum_at(0.0, -4.0);
    let mut clock = FixedClock::new(60);
    m.key_down(KeyCode::KeyW);
    clock.run_for(&mut m, 10.0);
    assert_eq!(position(&m).y, m.config().bounds.min_z);
}

#[test]
fn diagonal_step_has_straight_length() {
    let mut m = museum_at(0.0, -4.0);
    m.key_down(KeyCode::KeyW);
    m.key_down(KeyCode::KeyD);
    let before = position(&m);
    m.tick(1.0 / 60.0);
    let moved = position(&m) - before;
    assert!((moved.length() - 3.5 / 60.0).abs() < 1e-5);
    assert!(moved.x > 0.0 && moved.y < 0.0);
}

#[test]
fn exhibit_enter_and_exit_scenario() {
    let mut m = museum_at(1.2, -2.0);
    m.tick(1.0 / 60.0);
    assert_eq!(m.flags().active_exhibit_id(), None);

    m.key_down(KeyCode::ArrowRight);
    let mut frames = 0;
    while m.flags().active_exhibit_id().is_none() && frames < 60 {
        m.tick(1.0 / 60.0);
        frames += 1;
    }
    assert_eq!(m.flags().active_exhibit_id(), Some("oracle-genai"));
    assert!(m.flags().is_amplified());
    assert_eq!(
        m.last_transitions().as_slice(),
        [Transition::Enter(TriggerKey::Exhibit("oracle-genai".into()))]
    );
    assert_eq!(m.camera_mode(), CameraMode::ExhibitZoom);
    assert!(!m.character_transform().visible);

    m.key_up(KeyCode::ArrowRight);
    m.key_down(KeyCode::ArrowLeft);
    let mut clock = FixedClock::new(60);
    for _ in 0..60 {
        clock.step(&mut m);
        if !m.flags().is_amplified() {
            break;
        }
    }
    assert_eq!(m.flags().active_exhibit_id(), None);
    assert!(!m.flags().is_amplified());
    assert!(position(&m).x <= 1.5 + 1e-5);
    assert!(m.character_transform().visible);
}

#[test]
fn crossing_a_trigger_is_frame_rate_independent() {
    for fps in [30, 60, 144] {
        let mut m = museum_at(0.5, -5.5);
        let mut clock = FixedClock::new(fps);
        let mut entered = false;

        m.key_down(KeyCode::KeyD);
        for _ in 0..fps {
            clock.step(&mut m);
            entered |= m.flags().active_exhibit_id() == Some("hackeverse-organizer");
        }
        m.key_up(KeyCode::KeyD);
        m.key_down(KeyCode::KeyA);
        for _ in 0..fps / 2 {
            clock.step(&mut m);
        }

        assert!(entered, "never entered at {fps} fps");
        assert_eq!(m.flags().focus(), &Default::default(), "stuck focus at {fps} fps");
        assert!(!m.flags().is_amplified());
    }
}

#[test]
fn walking_to_the_back_wall_opens_the_profile() {
    let mut m = museum_at(0.0, -15.0);
    let mut clock = FixedClock::new(60);
    m.key_down(KeyCode::KeyW);
    clock.run_for(&mut m, 0.6);
    assert!(m.flags().is_profile_active());
    assert_eq!(m.flags().active_exhibit_id(), None);
    assert_eq!(m.camera_mode(), CameraMode::ProfileZoom);

    // Escape leaves the zoom; standing still inside does not re-enter.
    m.key_up(KeyCode::KeyW);
    m.key_down(KeyCode::Escape);
    clock.run_for(&mut m, 0.2);
    assert!(!m.flags().is_profile_active());
    assert_eq!(m.camera_mode(), CameraMode::FreeFollow);
}

#[test]
fn camera_converges_monotonically() {
    let mut m = museum_at(0.0, -4.0);
    let mut clock = FixedClock::new(60);
    clock.step(&mut m);
    let mut last = m.camera_pose().current_position.distance(m.camera_pose().target_position);
    for _ in 0..600 {
        clock.step(&mut m);
        let pose = m.camera_pose();
        let d = pose.current_position.distance(pose.target_position);
        assert!(d <= last + 1e-5, "{d} > {last}");
        last = d;
    }
    assert!(m.camera_pose().error() < 0.01);
}

#[test]
fn menu_freezes_movement() {
    let mut m = museum_at(0.0, -4.0);
    m.key_down(KeyCode::KeyW);
    m.key_down(KeyCode::KeyM);
    assert!(m.store().is_menu_open());
    assert_eq!(m.pressed_keys().count(), 0);

    m.key_down(KeyCode::KeyA);
    m.tick(0.1);
    assert_eq!(position(&m), Vec2::new(0.0, -4.0));

    m.key_down(KeyCode::Escape);
    assert!(!m.store().is_menu_open());
}

#[test]
fn random_input_keeps_invariants() {
    const KEYS: [KeyCode; 10] = [
        KeyCode::ArrowUp,
        KeyCode::ArrowDown,
        KeyCode::ArrowLeft,
        KeyCode::ArrowRight,
        KeyCode::KeyW,
        KeyCode::KeyA,
        KeyCode::KeyS,
        KeyCode::KeyD,
        KeyCode::Escape,
        KeyCode::KeyM,
    ];
    let mut rng = StdRng::seed_from_u64(0x6d75_7365);
    let mut m = museum_at(0.0, -4.0);
    let bounds = m.config().bounds;

    for frame in 0..5_000 {
        for _ in 0..rng.gen_range(0..3) {
            let key = KEYS[rng.gen_range(0..KEYS.len())];
            if rng.gen_bool(0.5) {
                m.key_down(key);
            } else {
                m.key_up(key);
            }
        }
        m.tick(rng.gen_range(0.0..0.1));

        let p = position(&m);
        assert!(bounds.contains(p), "frame {frame}: {p} out of bounds");
        let f = m.flags();
        assert!(
            !(f.active_exhibit_id().is_some() && f.is_profile_active()),
            "frame {frame}: exhibit and profile both active"
        );
        assert!(f.is_settled(), "frame {frame}: amplified out of sync");
    }
}
