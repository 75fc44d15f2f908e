//! Keyframe timelines.
//!
//! A [`Timeline`] chains steps from a start value: step `i` tweens from the
//! previous step's target (or the start value) to its own target. Timelines
//! either play once or loop forever in ping-pong, reversing at each end so
//! the value never jumps.

use crate::ease::Ease;
use glam::Vec3;
use smallvec::SmallVec;

/// Values a timeline can interpolate.
pub trait Lerp: Copy {
    fn lerp_to(self, to: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    #[inline]
    fn lerp_to(self, to: Self, t: f32) -> Self {
        self + (to - self) * t
    }
}

impl Lerp for Vec3 {
    #[inline]
    fn lerp_to(self, to: Self, t: f32) -> Self {
        self.lerp(to, t)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Step<T> {
    pub target: T,
    pub duration: f32,
    pub ease: Ease,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Repeat {
    Once,
    PingPong,
}

#[derive(Clone, Debug)]
pub struct Timeline<T> {
    start: T,
    steps: SmallVec<[Step<T>; 8]>,
    repeat: Repeat,
    delay: f32,
    // Playhead including the delay.
    elapsed: f32,
}

impl<T: Lerp> Timeline<T> {
    pub fn new(start: T, repeat: Repeat) -> Self {
        Self {
            start,
            steps: SmallVec::new(),
            repeat,
            delay: 0.0,
            elapsed: 0.0,
        }
    }

    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay = delay;
        self
    }

    /// Append a step tweening to `target`.
    pub fn to(mut self, target: T, duration: f32, ease: Ease) -> Self {
        self.steps.push(Step {
            target,
            duration,
            ease,
        });
        self
    }

    pub fn start_value(&self) -> T {
        self.start
    }

    pub fn steps(&self) -> &[Step<T>] {
        &self.steps
    }

    pub fn repeat(&self) -> Repeat {
        self.repeat
    }

    pub fn delay(&self) -> f32 {
        self.delay
    }

    /// Length of one forward pass, excluding the delay.
    pub fn duration(&self) -> f32 {
        self.steps.iter().map(|s| s.duration.max(0.0)).sum()
    }

    /// Playhead relative to the end of the delay. Negative while delayed.
    pub fn time(&self) -> f32 {
        self.elapsed - self.delay
    }

    /// Move the playhead to `t` seconds past the delay.
    pub fn seek(&mut self, t: f32) {
        self.elapsed = self.delay + t;
    }

    pub fn is_complete(&self) -> bool {
        self.repeat == Repeat::Once && self.time() >= self.duration()
    }

    /// Advance the playhead and return the value to write, or `None` while
    /// the timeline is still inside its delay.
    pub fn advance(&mut self, dt: f32) -> Option<T> {
        self.elapsed += dt.max(0.0);
        let t = self.time();
        if t < 0.0 {
            return None;
        }
        Some(self.sample(t))
    }

    /// Evaluate the timeline at local time `t` (delay excluded).
    pub fn sample(&self, t: f32) -> T {
        let total = self.duration();
        if total <= 0.0 {
            return self.steps.last().map_or(self.start, |s| s.target);
        }
        let local = match self.repeat {
            Repeat::Once => t.clamp(0.0, total),
            Repeat::PingPong => {
                let cycle = 2.0 * total;
                let m = t.max(0.0) % cycle;
                if m > total {
                    cycle - m
                } else {
                    m
                }
            }
        };
        self.sample_forward(local)
    }

    fn sample_forward(&self, local: f32) -> T {
        let mut from = self.start;
        let mut acc = 0.0;
        for step in &self.steps {
            let d = step.duration.max(0.0);
            if local <= acc + d {
                let p = if d > 0.0 { (local - acc) / d } else { 1.0 };
                return from.lerp_to(step.target, step.ease.apply(p));
            }
            acc += d;
            from = step.target;
        }
        from
    }
}
