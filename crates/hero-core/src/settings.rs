//! Live-tweakable parameters behind the settings panel.

use crate::constants::*;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationConfig {
    pub max_position_distance: f32,
    pub max_depth_distance: f32,
    pub max_rotate_distance: f32,
    /// Seconds per position keyframe.
    pub translate_duration: f32,
    /// Seconds per rotation keyframe.
    pub rotate_duration: f32,
    pub keyframe_count: u32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            max_position_distance: DEFAULT_MAX_POSITION_DISTANCE,
            max_depth_distance: DEFAULT_MAX_DEPTH_DISTANCE,
            max_rotate_distance: DEFAULT_MAX_ROTATE_DISTANCE,
            translate_duration: DEFAULT_TRANSLATE_DURATION,
            rotate_duration: DEFAULT_ROTATE_DURATION,
            keyframe_count: DEFAULT_KEYFRAME_COUNT,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightIntensities {
    pub ambient: f32,
    pub directional: f32,
}

impl Default for LightIntensities {
    fn default() -> Self {
        Self {
            ambient: AMBIENT_INTENSITY,
            directional: DIRECTIONAL_INTENSITY,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Control {
    MaxPositionDistance,
    MaxRotateDistance,
    MaxDepthDistance,
    TranslateDuration,
    RotateDuration,
    KeyframeCount,
    AmbientIntensity,
    DirectionalIntensity,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Folder {
    Animation,
    LightIntensity,
}

impl Folder {
    pub fn title(self) -> &'static str {
        match self {
            Folder::Animation => "Animation",
            Folder::LightIntensity => "Light intensity",
        }
    }

    pub fn expanded_by_default(self) -> bool {
        matches!(self, Folder::Animation)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlSpec {
    pub control: Control,
    pub key: &'static str,
    pub label: &'static str,
    pub folder: Folder,
    pub min: f32,
    pub max: f32,
    pub step: f32,
    /// Draw a separator above this control.
    pub separator_before: bool,
}

impl ControlSpec {
    /// Clamp into range and snap to the step grid anchored at `min`.
    pub fn constrain(&self, value: f32) -> f32 {
        let v = value.clamp(self.min, self.max);
        if self.step <= 0.0 {
            return v;
        }
        let steps = ((v - self.min) / self.step).round();
        (self.min + steps * self.step).clamp(self.min, self.max)
    }

    /// Readout text with as many decimals as the step needs.
    pub fn format(&self, value: f32) -> String {
        let mut decimals = 0;
        let mut step = self.step.abs();
        while decimals < 4 && (step - step.round()).abs() > 1e-4 {
            step *= 10.0;
            decimals += 1;
        }
        format!("{:.*}", decimals, value)
    }
}

const fn spec(
    control: Control,
    key: &'static str,
    label: &'static str,
    folder: Folder,
    range: [f32; 3],
    separator_before: bool,
) -> ControlSpec {
    ControlSpec {
        control,
        key,
        label,
        folder,
        min: range[0],
        max: range[1],
        step: range[2],
        separator_before,
    }
}

/// Panel layout, in display order.
pub const CONTROLS: [ControlSpec; 8] = [
    spec(Control::MaxPositionDistance, "maxPositionDistance", "Translate", Folder::Animation, [0.0, 0.5, 0.01], false),
    spec(Control::MaxRotateDistance, "maxRotateDistance", "Rotate", Folder::Animation, [0.0, 3.0, 0.05], false),
    spec(Control::MaxDepthDistance, "maxDepthDistance", "Depth", Folder::Animation, [0.0, 0.5, 0.01], false),
    spec(Control::TranslateDuration, "translateDuration", "Translate duration", Folder::Animation, [1.0, 10.0, 0.5], true),
    spec(Control::RotateDuration, "rotateDuration", "Rotate duration", Folder::Animation, [1.0, 10.0, 0.5], false),
    spec(Control::KeyframeCount, "keyframeCount", "Keyframes", Folder::Animation, [1.0, 12.0, 1.0], false),
    spec(Control::AmbientIntensity, "ambientIntensity", "Ambient", Folder::LightIntensity, [0.0, 1.0, 0.05], false),
    spec(Control::DirectionalIntensity, "directionalIntensity", "Directional", Folder::LightIntensity, [0.0, 1.0, 0.05], false),
];

impl Control {
    /// Row of this control in [`CONTROLS`].
    pub const fn index(self) -> usize {
        match self {
            Control::MaxPositionDistance => 0,
            Control::MaxRotateDistance => 1,
            Control::MaxDepthDistance => 2,
            Control::TranslateDuration => 3,
            Control::RotateDuration => 4,
            Control::KeyframeCount => 5,
            Control::AmbientIntensity => 6,
            Control::DirectionalIntensity => 7,
        }
    }

    pub fn spec(self) -> &'static ControlSpec {
        &CONTROLS[self.index()]
    }

    pub fn from_key(key: &str) -> Result<Self, SettingsError> {
        CONTROLS
            .iter()
            .find(|s| s.key == key)
            .map(|s| s.control)
            .ok_or_else(|| SettingsError::UnknownControl(key.to_string()))
    }

    pub fn is_animation(self) -> bool {
        self.spec().folder == Folder::Animation
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum SettingsError {
    #[error("unknown control `{0}`")]
    UnknownControl(String),
    #[error("invalid value `{raw}` for `{key}`")]
    InvalidValue { key: &'static str, raw: String },
}

/// What the caller has to do after a control changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    RebuildAnimation,
    UpdateLights,
}

/// Values restored by "Reset all".
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Preset {
    pub animation: AnimationConfig,
    pub lights: LightIntensities,
}

pub const PRESET: Preset = Preset {
    animation: AnimationConfig {
        max_position_distance: 0.0375,
        max_depth_distance: 0.175,
        max_rotate_distance: 0.25,
        translate_duration: 3.0,
        rotate_duration: 4.0,
        keyframe_count: DEFAULT_KEYFRAME_COUNT,
    },
    lights: LightIntensities {
        ambient: 0.75,
        directional: 0.25,
    },
};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Settings {
    pub animation: AnimationConfig,
    pub lights: LightIntensities,
}

impl Settings {
    pub fn get(&self, control: Control) -> f32 {
        match control {
            Control::MaxPositionDistance => self.animation.max_position_distance,
            Control::MaxRotateDistance => self.animation.max_rotate_distance,
            Control::MaxDepthDistance => self.animation.max_depth_distance,
            Control::TranslateDuration => self.animation.translate_duration,
            Control::RotateDuration => self.animation.rotate_duration,
            Control::KeyframeCount => self.animation.keyframe_count as f32,
            Control::AmbientIntensity => self.lights.ambient,
            Control::DirectionalIntensity => self.lights.directional,
        }
    }

    /// Store a constrained value and report what needs refreshing.
    pub fn set(&mut self, control: Control, value: f32) -> Effect {
        let v = control.spec().constrain(value);
        match control {
            Control::MaxPositionDistance => self.animation.max_position_distance = v,
            Control::MaxRotateDistance => self.animation.max_rotate_distance = v,
            Control::MaxDepthDistance => self.animation.max_depth_distance = v,
            Control::TranslateDuration => self.animation.translate_duration = v,
            Control::RotateDuration => self.animation.rotate_duration = v,
            Control::KeyframeCount => self.animation.keyframe_count = v.round() as u32,
            Control::AmbientIntensity => self.lights.ambient = v,
            Control::DirectionalIntensity => self.lights.directional = v,
        }
        if control.is_animation() {
            Effect::RebuildAnimation
        } else {
            Effect::UpdateLights
        }
    }

    /// Parse raw panel input for `key` and apply it.
    pub fn set_from_input(&mut self, key: &str, raw: &str) -> Result<(Control, Effect), SettingsError> {
        let control = Control::from_key(key)?;
        let value = raw
            .trim()
            .parse::<f32>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| SettingsError::InvalidValue {
                key: control.spec().key,
                raw: raw.to_string(),
            })?;
        Ok((control, self.set(control, value)))
    }

    pub fn reset(&mut self) {
        self.animation = PRESET.animation;
        self.lights = PRESET.lights;
    }
}
