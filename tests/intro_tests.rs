// Host-side tests for the one-shot intro.

use glam::Vec3;
use hero_core::*;

fn run(scheduler: &mut Scheduler, objects: &mut SceneObjects, seconds: f32) {
    let dt = 1.0 / 60.0;
    let mut t = 0.0;
    while t < seconds {
        scheduler.tick(dt, objects);
        t += dt;
    }
}

#[test]
fn stagger_keeps_the_negative_first_offset() {
    assert!((disc_start_time(0) - 0.45).abs() < 1e-6);
    for i in 0..6 {
        let expected = 0.45 + 0.05 * i as f32;
        assert!((disc_start_time(i) - expected).abs() < 1e-6, "disc {i}");
    }
}

#[test]
fn play_hides_everything_first() {
    let mut scheduler = Scheduler::new();
    let mut objects = SceneObjects::default();
    let mut intro = IntroAnimator::new();
    let handles = intro.play(&mut scheduler, &mut objects);
    assert_eq!(handles.len(), objects.discs.len() * 2 + 1);
    assert!(intro.has_played());
    for d in &objects.discs {
        assert_eq!(d.material.opacity, 0.0);
        assert_eq!(d.transform.scale, Vec3::splat(INTRO_SCALE_FROM));
    }
    assert_eq!(objects.plane.material.opacity, 0.0);
}

#[test]
fn discs_wait_for_their_start_time() {
    let mut scheduler = Scheduler::new();
    let mut objects = SceneObjects::default();
    IntroAnimator::new().play(&mut scheduler, &mut objects);
    run(&mut scheduler, &mut objects, 0.4);
    for d in &objects.discs {
        assert_eq!(d.material.opacity, 0.0);
    }
    run(&mut scheduler, &mut objects, 0.2);
    // disc 0 started at 0.45, disc 5 at 0.70
    assert!(objects.discs[0].material.opacity > 0.0);
    assert_eq!(objects.discs[5].material.opacity, 0.0);
}

#[test]
fn intro_finishes_fully_visible() {
    let mut scheduler = Scheduler::new();
    let mut objects = SceneObjects::default();
    IntroAnimator::new().play(&mut scheduler, &mut objects);
    run(&mut scheduler, &mut objects, 3.0);
    for d in &objects.discs {
        assert!((d.material.opacity - 1.0).abs() < 1e-6);
        assert!((d.transform.scale - Vec3::ONE).length() < 1e-6);
    }
    assert!((objects.plane.material.opacity - PLANE_OPACITY).abs() < 1e-6);
    assert!(scheduler.is_empty());
}

#[test]
fn plane_fades_in_after_its_delay() {
    let mut scheduler = Scheduler::new();
    let mut objects = SceneObjects::default();
    IntroAnimator::new().play(&mut scheduler, &mut objects);
    run(&mut scheduler, &mut objects, 0.7);
    assert_eq!(objects.plane.material.opacity, 0.0);
    run(&mut scheduler, &mut objects, 0.5);
    let o = objects.plane.material.opacity;
    assert!(o > 0.0 && o < PLANE_OPACITY);
}

#[test]
fn replaying_is_a_no_op() {
    let mut scheduler = Scheduler::new();
    let mut objects = SceneObjects::default();
    let mut intro = IntroAnimator::new();
    intro.play(&mut scheduler, &mut objects);
    run(&mut scheduler, &mut objects, 3.0);
    let again = intro.play(&mut scheduler, &mut objects);
    assert!(again.is_empty());
    assert!(scheduler.is_empty());
    assert!((objects.discs[0].material.opacity - 1.0).abs() < 1e-6);
}
