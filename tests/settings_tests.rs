// Host-side tests for the settings model and its wiring into the hero scene.

use hero_core::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn hero() -> HeroScene {
    let mut h = HeroScene::new(StdRng::seed_from_u64(3));
    h.start();
    h
}

#[test]
fn defaults_match_the_preset() {
    let s = Settings::default();
    assert_eq!(s.animation, PRESET.animation);
    assert_eq!(s.lights, PRESET.lights);
}

#[test]
fn reset_restores_the_preset_exactly() {
    let mut s = Settings::default();
    for spec in CONTROLS.iter() {
        s.set(spec.control, spec.max);
    }
    assert_ne!(s.animation, PRESET.animation);
    s.reset();
    let a = s.animation;
    assert_eq!(a.max_position_distance, 0.0375);
    assert_eq!(a.max_rotate_distance, 0.25);
    assert_eq!(a.max_depth_distance, 0.175);
    assert_eq!(a.translate_duration, 3.0);
    assert_eq!(a.rotate_duration, 4.0);
    assert_eq!(a.keyframe_count, 5);
    assert_eq!(s.lights.ambient, 0.75);
    assert_eq!(s.lights.directional, 0.25);
}

#[test]
fn controls_have_unique_keys_and_sane_ranges() {
    for (i, a) in CONTROLS.iter().enumerate() {
        assert!(a.min < a.max, "{}", a.key);
        assert!(a.step > 0.0, "{}", a.key);
        assert_eq!(a.control.spec().key, a.key);
        for b in CONTROLS.iter().skip(i + 1) {
            assert_ne!(a.key, b.key);
        }
    }
    // translateDuration opens the timing group
    assert!(Control::TranslateDuration.spec().separator_before);
    assert!(Folder::Animation.expanded_by_default());
    assert!(!Folder::LightIntensity.expanded_by_default());
}

#[test]
fn every_control_owns_exactly_one_row() {
    let all = [
        Control::MaxPositionDistance,
        Control::MaxRotateDistance,
        Control::MaxDepthDistance,
        Control::TranslateDuration,
        Control::RotateDuration,
        Control::KeyframeCount,
        Control::AmbientIntensity,
        Control::DirectionalIntensity,
    ];
    assert_eq!(all.len(), CONTROLS.len());
    for c in all {
        let rows = CONTROLS.iter().filter(|s| s.control == c).count();
        assert_eq!(rows, 1, "{c:?}");
        assert_eq!(CONTROLS[c.index()].control, c);
        assert_eq!(c.spec().control, c);
        assert_eq!(Control::from_key(c.spec().key), Ok(c));
    }
}

#[test]
fn preset_values_lie_inside_their_ranges() {
    let s = Settings::default();
    for spec in CONTROLS.iter() {
        let v = s.get(spec.control);
        assert!(v >= spec.min && v <= spec.max, "{} = {}", spec.key, v);
    }
}

#[test]
fn set_clamps_and_snaps_to_step() {
    let mut s = Settings::default();
    s.set(Control::MaxRotateDistance, 9.0);
    assert_eq!(s.animation.max_rotate_distance, 3.0);
    s.set(Control::MaxRotateDistance, -1.0);
    assert_eq!(s.animation.max_rotate_distance, 0.0);
    s.set(Control::TranslateDuration, 2.3);
    assert!((s.animation.translate_duration - 2.5).abs() < 1e-6);
    s.set(Control::KeyframeCount, 7.4);
    assert_eq!(s.animation.keyframe_count, 7);
    s.set(Control::KeyframeCount, 0.0);
    assert_eq!(s.animation.keyframe_count, 1);
}

#[test]
fn effects_split_animation_from_lights() {
    let mut s = Settings::default();
    for spec in CONTROLS.iter() {
        let effect = s.set(spec.control, spec.min);
        match spec.folder {
            Folder::Animation => assert_eq!(effect, Effect::RebuildAnimation, "{}", spec.key),
            Folder::LightIntensity => assert_eq!(effect, Effect::UpdateLights, "{}", spec.key),
        }
    }
}

#[test]
fn input_parsing_reports_errors() {
    let mut s = Settings::default();
    let (control, effect) = s
        .set_from_input("ambientIntensity", " 0.4 ")
        .expect("valid input");
    assert_eq!(control, Control::AmbientIntensity);
    assert_eq!(effect, Effect::UpdateLights);
    assert!((s.lights.ambient - 0.4).abs() < 1e-6);

    assert!(matches!(
        s.set_from_input("speed", "1"),
        Err(SettingsError::UnknownControl(k)) if k == "speed"
    ));
    assert!(matches!(
        s.set_from_input("rotateDuration", "abc"),
        Err(SettingsError::InvalidValue { key: "rotateDuration", .. })
    ));
    assert!(s.set_from_input("rotateDuration", "NaN").is_err());
    assert_eq!(s.animation.rotate_duration, 4.0);
}

#[test]
fn format_uses_step_precision() {
    assert_eq!(Control::KeyframeCount.spec().format(5.0), "5");
    assert_eq!(Control::TranslateDuration.spec().format(3.0), "3.0");
    assert_eq!(Control::MaxDepthDistance.spec().format(0.175), "0.17");
    assert_eq!(Control::AmbientIntensity.spec().format(0.75), "0.75");
}

#[test]
fn light_controls_do_not_rebuild_animation() {
    let mut h = hero();
    let before = h.perpetual().handles();
    h.set_control(Control::AmbientIntensity, 0.2);
    h.set_control(Control::DirectionalIntensity, 0.9);
    assert_eq!(h.perpetual().handles(), before);
    assert!((h.lights.ambient_intensity - 0.2).abs() < 1e-6);
    assert!((h.lights.directional_intensity - 0.9).abs() < 1e-6);
}

#[test]
fn animation_controls_rebuild_with_new_config() {
    let mut h = hero();
    let before = h.perpetual().handles();
    h.set_control(Control::KeyframeCount, 3.0);
    let after = h.perpetual().handles();
    assert_eq!(after.len(), before.len());
    for old in &before {
        assert!(!h.scheduler().is_running(*old));
    }
    for new in &after {
        match h.scheduler().channel(*new) {
            Some(Channel::Position(tl)) | Some(Channel::Rotation(tl)) => {
                assert_eq!(tl.steps().len(), 3)
            }
            other => panic!("unexpected channel {other:?}"),
        }
    }
}

#[test]
fn hero_reset_rebuilds_once_and_restores_lights() {
    let mut h = hero();
    h.set_control_from_input("maxRotateDistance", "2").expect("valid");
    h.set_control_from_input("directionalIntensity", "1").expect("valid");
    let before = h.perpetual().handles();
    h.reset();
    assert_eq!(h.settings, Settings::default());
    assert!((h.lights.directional_intensity - 0.25).abs() < 1e-6);
    let after = h.perpetual().handles();
    assert_eq!(after.len(), 12);
    assert!(before.iter().all(|b| !after.contains(b)));
    for i in 0..h.objects.discs.len() {
        assert_eq!(h.scheduler().writers(Target::Disc(i), Property::Position), 1);
    }
}

#[test]
fn hero_start_runs_intro_and_perpetual_motion() {
    let mut h = hero();
    assert!(h.intro().has_played());
    // 13 intro tweens plus two loops per disc
    assert_eq!(h.scheduler().len(), 13 + 12);
    for _ in 0..240 {
        h.tick(1.0 / 60.0);
    }
    assert_eq!(h.scheduler().len(), 12);
    for d in &h.objects.discs {
        assert!((d.material.opacity - 1.0).abs() < 1e-6);
    }
}
