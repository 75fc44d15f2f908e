//! The whole hero composition: scene objects, settings, scheduler and both
//! animators behind one value the frontend drives each frame.

use crate::animator::PerpetualAnimator;
use crate::intro::IntroAnimator;
use crate::scene::{Lights, SceneObjects};
use crate::scheduler::Scheduler;
use crate::settings::{Control, Effect, Settings, SettingsError};
use rand::rngs::StdRng;

pub struct HeroScene {
    pub objects: SceneObjects,
    pub lights: Lights,
    pub settings: Settings,
    scheduler: Scheduler,
    perpetual: PerpetualAnimator,
    intro: IntroAnimator,
    rng: StdRng,
}

impl HeroScene {
    pub fn new(rng: StdRng) -> Self {
        Self {
            objects: SceneObjects::default(),
            lights: Lights::default(),
            settings: Settings::default(),
            scheduler: Scheduler::new(),
            perpetual: PerpetualAnimator::new(),
            intro: IntroAnimator::new(),
            rng,
        }
    }

    /// Play the intro and start the perpetual motion.
    pub fn start(&mut self) {
        self.intro.play(&mut self.scheduler, &mut self.objects);
        self.rebuild_animation();
    }

    pub fn tick(&mut self, dt_sec: f32) {
        self.scheduler.tick(dt_sec, &mut self.objects);
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn perpetual(&self) -> &PerpetualAnimator {
        &self.perpetual
    }

    pub fn intro(&self) -> &IntroAnimator {
        &self.intro
    }

    pub fn rebuild_animation(&mut self) {
        let config = self.settings.animation;
        self.perpetual
            .rebuild(&mut self.scheduler, &mut self.objects.discs, &config, &mut self.rng);
    }

    fn sync_lights(&mut self) {
        self.lights.ambient_intensity = self.settings.lights.ambient;
        self.lights.directional_intensity = self.settings.lights.directional;
    }

    fn apply_effect(&mut self, effect: Effect) {
        match effect {
            Effect::RebuildAnimation => self.rebuild_animation(),
            Effect::UpdateLights => self.sync_lights(),
        }
    }

    pub fn set_control(&mut self, control: Control, value: f32) -> Effect {
        let effect = self.settings.set(control, value);
        self.apply_effect(effect);
        effect
    }

    /// Apply raw panel input. Returns the stored (constrained) value.
    pub fn set_control_from_input(&mut self, key: &str, raw: &str) -> Result<f32, SettingsError> {
        let (control, effect) = self.settings.set_from_input(key, raw)?;
        self.apply_effect(effect);
        Ok(self.settings.get(control))
    }

    /// "Reset all": restore the preset, refresh the lights and rebuild once.
    pub fn reset(&mut self) {
        self.settings.reset();
        self.sync_lights();
        self.rebuild_animation();
        log::info!("[panel] settings reset to preset");
    }
}
