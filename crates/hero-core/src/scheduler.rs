//! Owns every running timeline and writes their values into the scene.
//!
//! Timelines are addressed through copyable [`TimelineHandle`]s. Killing a
//! handle removes the timeline immediately, so it never writes again.

use crate::timeline::Timeline;
use fnv::FnvHashMap;
use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimelineHandle(u64);

/// Object a timeline writes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Target {
    Disc(usize),
    Plane,
}

/// Property written by a timeline, with its value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TweenValue {
    Position(Vec3),
    Rotation(Vec3),
    Scale(Vec3),
    Opacity(f32),
}

/// Which property a channel drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Property {
    Position,
    Rotation,
    Scale,
    Opacity,
}

#[derive(Clone, Debug)]
pub enum Channel {
    Position(Timeline<Vec3>),
    Rotation(Timeline<Vec3>),
    Scale(Timeline<Vec3>),
    Opacity(Timeline<f32>),
}

impl Channel {
    pub fn property(&self) -> Property {
        match self {
            Channel::Position(_) => Property::Position,
            Channel::Rotation(_) => Property::Rotation,
            Channel::Scale(_) => Property::Scale,
            Channel::Opacity(_) => Property::Opacity,
        }
    }

    fn advance(&mut self, dt: f32) -> Option<TweenValue> {
        match self {
            Channel::Position(tl) => tl.advance(dt).map(TweenValue::Position),
            Channel::Rotation(tl) => tl.advance(dt).map(TweenValue::Rotation),
            Channel::Scale(tl) => tl.advance(dt).map(TweenValue::Scale),
            Channel::Opacity(tl) => tl.advance(dt).map(TweenValue::Opacity),
        }
    }

    fn is_complete(&self) -> bool {
        match self {
            Channel::Position(tl) | Channel::Rotation(tl) | Channel::Scale(tl) => {
                tl.is_complete()
            }
            Channel::Opacity(tl) => tl.is_complete(),
        }
    }
}

/// Receives the values produced by a scheduler tick.
pub trait TweenSink {
    fn apply(&mut self, target: Target, value: TweenValue);
}

struct Scheduled {
    target: Target,
    channel: Channel,
}

#[derive(Default)]
pub struct Scheduler {
    next_id: u64,
    running: FnvHashMap<TimelineHandle, Scheduled>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, target: Target, channel: Channel) -> TimelineHandle {
        let handle = TimelineHandle(self.next_id);
        self.next_id += 1;
        self.running.insert(handle, Scheduled { target, channel });
        handle
    }

    /// Cancel a timeline. Unknown or already-finished handles are ignored.
    pub fn kill(&mut self, handle: TimelineHandle) -> bool {
        self.running.remove(&handle).is_some()
    }

    pub fn kill_all(&mut self, handles: &[TimelineHandle]) {
        for h in handles {
            self.kill(*h);
        }
    }

    pub fn is_running(&self, handle: TimelineHandle) -> bool {
        self.running.contains_key(&handle)
    }

    pub fn len(&self) -> usize {
        self.running.len()
    }

    pub fn is_empty(&self) -> bool {
        self.running.is_empty()
    }

    pub fn channel(&self, handle: TimelineHandle) -> Option<&Channel> {
        self.running.get(&handle).map(|s| &s.channel)
    }

    /// Number of running timelines writing `property` of `target`.
    pub fn writers(&self, target: Target, property: Property) -> usize {
        self.running
            .values()
            .filter(|s| s.target == target && s.channel.property() == property)
            .count()
    }

    /// Advance every timeline by `dt` seconds and push the values into
    /// `sink`. Completed one-shot timelines write their final value and are
    /// dropped.
    pub fn tick(&mut self, dt: f32, sink: &mut impl TweenSink) {
        // Handle order keeps writes deterministic regardless of map layout.
        let mut handles: Vec<TimelineHandle> = self.running.keys().copied().collect();
        handles.sort_unstable();
        for h in handles {
            let Some(s) = self.running.get_mut(&h) else {
                continue;
            };
            if let Some(v) = s.channel.advance(dt) {
                sink.apply(s.target, v);
            }
            if s.channel.is_complete() {
                self.running.remove(&h);
            }
        }
    }
}
