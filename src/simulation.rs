use bevy::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::behavior;
use crate::config::SlimeConfig;
use crate::error::ConfigError;
use crate::flower::Flower;
use crate::input::{InputEvent, InputInbox};
use crate::physics;
use crate::slime::Slime;

/// Environment variable that fixes the RNG seed for reproducible runs
pub const SEED_ENV: &str = "SAGE_SLIME_SEED";

/// Resource to control whether fixed steps advance
#[derive(Resource, PartialEq, Eq, Clone, Copy, Debug, Default)]
pub enum SimulationState {
    #[default]
    Running,
    Paused,
}

/// Everything the slime world is made of, stepped once per fixed frame
#[derive(Resource)]
pub struct Simulation {
    pub config: SlimeConfig,
    pub slime: Slime,
    pub flower: Flower,
    /// Monotonic frame counter, the phase source for every oscillator
    pub frame: u64,
    /// Last known pointer position (screen space)
    pub pointer: Vec2,
    pub inbox: InputInbox,
    rng: StdRng,
}

impl Simulation {
    /// Validate the config and place the slime and a first flower.
    pub fn new(config: SlimeConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let slime = Slime::new(&config);
        let mut rng = StdRng::seed_from_u64(seed);
        let mut flower = Flower::new(Vec2::ZERO);
        flower.respawn(&slime, &config, &mut rng);
        Ok(Self {
            pointer: config.viewport / 2.0,
            config,
            slime,
            flower,
            frame: 0,
            inbox: InputInbox::default(),
            rng,
        })
    }

    /// Drain input, run the behavior handler, then integrate physics.
    pub fn step(&mut self) {
        self.frame += 1;
        self.process_input();

        if self.flower.held {
            self.flower.pos = self.pointer;
        }

        let outcome = behavior::update(&mut self.slime, &self.flower, &self.config);
        if outcome.respawn_flower {
            self.respawn_flower();
        }
        if let Some(next) = outcome.next {
            self.slime.transition_to(next);
        }

        behavior::enforce_size_limit(&mut self.slime, &mut self.flower, &self.config);
        physics::integrate(&mut self.slime, self.frame, &self.config);
    }

    fn process_input(&mut self) {
        for event in self.inbox.drain() {
            match event {
                InputEvent::PointerMoved(pos) => self.pointer = pos,
                InputEvent::PointerPressed(pos) => {
                    self.pointer = pos;
                    behavior::on_click(pos, &mut self.slime, &mut self.flower, &self.config);
                }
                InputEvent::Jump => behavior::on_jump(&mut self.slime, &self.config),
            }
        }
    }

    pub fn respawn_flower(&mut self) {
        self.flower.respawn(&self.slime, &self.config, &mut self.rng);
    }

    /// The flower is drawn while the slime looks for it or the user holds it
    pub fn flower_visible(&self) -> bool {
        self.flower.held || self.slime.state.shows_flower()
    }
}

/// Read the RNG seed from the environment, falling back to entropy
pub fn seed_from_env() -> Result<u64, ConfigError> {
    match std::env::var(SEED_ENV) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Seed(raw)),
        Err(_) => Ok(rand::random()),
    }
}

/// System to advance the simulation by one fixed frame
pub fn step_simulation(mut sim: ResMut<Simulation>) {
    sim.step();
}
