//! One-shot fade/scale-in played when the page loads.

use crate::constants::*;
use crate::ease::Ease;
use crate::scene::SceneObjects;
use crate::scheduler::{Channel, Scheduler, Target, TimelineHandle};
use crate::timeline::{Repeat, Timeline};
use glam::Vec3;

/// Start time of disc `index`, in seconds from page load.
///
/// The first disc lands at `INTRO_DELAY_SEC - INTRO_STAGGER_SEC`, a little
/// ahead of the group delay.
#[inline]
pub fn disc_start_time(index: usize) -> f32 {
    INTRO_DELAY_SEC + (index as f32 * INTRO_STAGGER_SEC - INTRO_STAGGER_SEC)
}

#[derive(Debug, Default)]
pub struct IntroAnimator {
    played: bool,
}

impl IntroAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_played(&self) -> bool {
        self.played
    }

    /// Hide everything and schedule the fade-in. Only the first call does
    /// anything.
    pub fn play(
        &mut self,
        scheduler: &mut Scheduler,
        scene: &mut SceneObjects,
    ) -> Vec<TimelineHandle> {
        if self.played {
            log::warn!("[intro] already played; ignoring");
            return Vec::new();
        }
        self.played = true;

        let mut handles = Vec::with_capacity(scene.discs.len() * 2 + 1);
        let scale_from = Vec3::splat(INTRO_SCALE_FROM);
        for (i, disc) in scene.discs.iter_mut().enumerate() {
            disc.material.opacity = 0.0;
            disc.transform.scale = scale_from;
            let delay = disc_start_time(i);

            let fade = Timeline::new(0.0, Repeat::Once)
                .with_delay(delay)
                .to(1.0, INTRO_DURATION_SEC, Ease::Power1Out);
            let grow = Timeline::new(scale_from, Repeat::Once)
                .with_delay(delay)
                .to(Vec3::ONE, INTRO_DURATION_SEC, Ease::Power1Out);
            handles.push(scheduler.add(Target::Disc(i), Channel::Opacity(fade)));
            handles.push(scheduler.add(Target::Disc(i), Channel::Scale(grow)));
        }

        scene.plane.material.opacity = 0.0;
        let plane_fade = Timeline::new(0.0, Repeat::Once)
            .with_delay(PLANE_FADE_DELAY_SEC)
            .to(PLANE_OPACITY, PLANE_FADE_DURATION_SEC, Ease::default());
        handles.push(scheduler.add(Target::Plane, Channel::Opacity(plane_fade)));

        log::info!("[intro] scheduled {} one-shot tweens", handles.len());
        handles
    }
}
