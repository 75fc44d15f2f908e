//! Perpetual floating motion for the discs.
//!
//! Every disc gets one position and one rotation timeline through random
//! keyframes. Both loop forever in ping-pong and start from a random
//! playhead so the discs drift out of step with each other.
//!
//! Each disc moves through a small state machine:
//!
//! ```text
//! Idle --start--> Animating --stop--> Cancelling --(handles killed)--> Idle
//! ```
//!
//! `start` refuses to touch a disc that is not `Idle`, so a rebuild always
//! kills the previous timelines before new ones exist.

use crate::ease::Ease;
use crate::scene::{position_discs, Disc};
use crate::scheduler::{Channel, Scheduler, Target, TimelineHandle};
use crate::settings::AnimationConfig;
use crate::timeline::{Repeat, Timeline};
use glam::Vec3;
use rand::Rng;
use smallvec::SmallVec;

pub type Keyframes = SmallVec<[Vec3; 8]>;

/// Uniform sample in `[min, max)`. Returns `min` exactly when the range is
/// empty and never panics on an inverted range.
#[inline]
pub fn random_between(rng: &mut impl Rng, min: f32, max: f32) -> f32 {
    min + rng.gen::<f32>() * (max - min)
}

/// Random offsets around `home`: x and y within `maxPositionDistance`, z
/// within `maxDepthDistance` of the group plane.
pub fn position_keyframes(rng: &mut impl Rng, home: Vec3, config: &AnimationConfig) -> Keyframes {
    let d = config.max_position_distance;
    let depth = config.max_depth_distance;
    (0..config.keyframe_count)
        .map(|_| {
            Vec3::new(
                random_between(rng, home.x - d, home.x + d),
                random_between(rng, home.y - d, home.y + d),
                random_between(rng, -depth, depth),
            )
        })
        .collect()
}

/// Random x/y tilts within `maxRotateDistance`. `z` is carried through.
pub fn rotation_keyframes(rng: &mut impl Rng, z: f32, config: &AnimationConfig) -> Keyframes {
    let r = config.max_rotate_distance;
    (0..config.keyframe_count)
        .map(|_| Vec3::new(random_between(rng, -r, r), random_between(rng, -r, r), z))
        .collect()
}

fn looping_timeline(start: Vec3, keyframes: &[Vec3], step_duration: f32) -> Timeline<Vec3> {
    keyframes
        .iter()
        .fold(Timeline::new(start, Repeat::PingPong), |tl, k| {
            tl.to(*k, step_duration, Ease::Power1InOut)
        })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiscMotion {
    Idle,
    Animating {
        position: TimelineHandle,
        rotation: TimelineHandle,
    },
    Cancelling {
        position: TimelineHandle,
        rotation: TimelineHandle,
    },
}

#[derive(Debug, Default)]
pub struct PerpetualAnimator {
    motions: Vec<DiscMotion>,
}

impl PerpetualAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn motion(&self, disc: usize) -> DiscMotion {
        self.motions.get(disc).copied().unwrap_or(DiscMotion::Idle)
    }

    pub fn is_idle(&self) -> bool {
        self.motions.iter().all(|m| *m == DiscMotion::Idle)
    }

    /// Every handle currently owned by the animator.
    pub fn handles(&self) -> Vec<TimelineHandle> {
        self.motions
            .iter()
            .flat_map(|m| match *m {
                DiscMotion::Animating { position, rotation }
                | DiscMotion::Cancelling { position, rotation } => vec![position, rotation],
                DiscMotion::Idle => Vec::new(),
            })
            .collect()
    }

    /// Reset the discs to their homes and schedule fresh looping timelines.
    /// Discs that are still animating are left alone; call [`stop`] first.
    ///
    /// [`stop`]: PerpetualAnimator::stop
    pub fn start(
        &mut self,
        scheduler: &mut Scheduler,
        discs: &mut [Disc],
        config: &AnimationConfig,
        rng: &mut impl Rng,
    ) -> Vec<TimelineHandle> {
        self.motions.resize(discs.len(), DiscMotion::Idle);
        position_discs(discs);

        let mut started = Vec::with_capacity(discs.len() * 2);
        for (i, disc) in discs.iter().enumerate() {
            if self.motions[i] != DiscMotion::Idle {
                log::warn!("[animator] disc {} is not idle; skipping start", disc.spec.name());
                continue;
            }
            let home = disc.transform.position;
            let rot = disc.transform.rotation;

            let shift = position_keyframes(rng, home, config);
            let tilt = rotation_keyframes(rng, rot.z, config);
            let mut shift_tl = looping_timeline(home, &shift, config.translate_duration);
            let mut tilt_tl = looping_timeline(rot, &tilt, config.rotate_duration);

            let shift_len = shift_tl.duration();
            let tilt_len = tilt_tl.duration();
            shift_tl.seek(random_between(rng, 0.0, shift_len));
            tilt_tl.seek(random_between(rng, 0.0, tilt_len));

            let position = scheduler.add(Target::Disc(i), Channel::Position(shift_tl));
            let rotation = scheduler.add(Target::Disc(i), Channel::Rotation(tilt_tl));
            self.motions[i] = DiscMotion::Animating { position, rotation };
            started.push(position);
            started.push(rotation);
        }
        log::debug!(
            "[animator] started {} timelines ({} keyframes each)",
            started.len(),
            config.keyframe_count
        );
        started
    }

    /// Cancel every tracked timeline. Safe to call when nothing is running.
    pub fn stop(&mut self, scheduler: &mut Scheduler) {
        for m in &mut self.motions {
            if let DiscMotion::Animating { position, rotation } = *m {
                *m = DiscMotion::Cancelling { position, rotation };
            }
        }
        for m in &mut self.motions {
            if let DiscMotion::Cancelling { position, rotation } = *m {
                scheduler.kill_all(&[position, rotation]);
                *m = DiscMotion::Idle;
            }
        }
    }

    /// Full rebuild: stop everything, then start again with `config`.
    pub fn rebuild(
        &mut self,
        scheduler: &mut Scheduler,
        discs: &mut [Disc],
        config: &AnimationConfig,
        rng: &mut impl Rng,
    ) -> Vec<TimelineHandle> {
        self.stop(scheduler);
        debug_assert!(self.is_idle());
        self.start(scheduler, discs, config, rng)
    }
}
