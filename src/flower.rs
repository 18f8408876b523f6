use crate::config::*;
use crate::slime::{Bounds, Slime};
use bevy::prelude::*;
use rand::Rng;

/// The flower the slime hunts. A single slot that is moved, never destroyed.
#[derive(Debug, Clone)]
pub struct Flower {
    pub pos: Vec2,
    /// True while the user drags the flower around
    pub held: bool,
}

impl Flower {
    pub fn new(pos: Vec2) -> Self {
        Self { pos, held: false }
    }

    /// Is `point` close enough to grab the flower
    pub fn within_pickup(&self, point: Vec2, radius: f32) -> bool {
        self.pos.distance(point) < radius
    }

    /// Move the flower somewhere the slime is not.
    pub fn respawn(&mut self, slime: &Slime, config: &SlimeConfig, rng: &mut impl Rng) {
        self.pos = spawn_position(slime.bounds(), config, rng);
        debug!("flower respawned at ({:.1}, {:.1})", self.pos.x, self.pos.y);
    }
}

/// Pick a flower position outside `body` grown by the safety margin.
///
/// Candidates are drawn from the spawn region and rejected while they fall
/// inside the keep-out box. A slime big enough to cover the whole region would
/// reject forever, so after a bounded number of draws [`fallback_position`]
/// places the flower next to the keep-out box instead.
pub fn spawn_position(body: Bounds, config: &SlimeConfig, rng: &mut impl Rng) -> Vec2 {
    let keep_out = body.expand(config.flower_safety_margin);
    let (top, bottom) = config.flower_spawn_band();
    let left = config.flower_edge_margin;
    let right = config.viewport.x - config.flower_edge_margin;

    for _ in 0..FLOWER_SPAWN_ATTEMPTS {
        let candidate = Vec2::new(rng.gen_range(left..right), rng.gen_range(top..bottom));
        if !keep_out.contains_strict(candidate) {
            return candidate;
        }
    }

    let pos = fallback_position(body, config, rng);
    warn!(
        "flower spawn region covered by the slime, placing at ({:.1}, {:.1})",
        pos.x, pos.y
    );
    pos
}

/// Placement just past the keep-out box that stays on the canvas.
///
/// Tries the side with more horizontal room, then the other side, then the
/// strip above the box. Below the box is under the ground and out of reach.
/// When nothing on the canvas is clear the flower goes to the point of the
/// spawn region nearest the slime's center, where it can still be eaten.
pub fn fallback_position(body: Bounds, config: &SlimeConfig, rng: &mut impl Rng) -> Vec2 {
    let keep_out = body.expand(config.flower_safety_margin);
    let (top, bottom) = config.flower_spawn_band();
    let left = config.flower_edge_margin;
    let right = config.viewport.x - config.flower_edge_margin;
    let canvas = config.viewport;

    let before = keep_out.min.x - 1.0;
    let after = keep_out.max.x + 1.0;
    let sides = if keep_out.min.x >= canvas.x - keep_out.max.x {
        [before, after]
    } else {
        [after, before]
    };
    if let Some(x) = sides.into_iter().find(|x| (0.0..=canvas.x).contains(x)) {
        return Vec2::new(x, rng.gen_range(top..bottom));
    }

    let above = keep_out.min.y - 1.0;
    if above >= 0.0 {
        return Vec2::new(rng.gen_range(left..right), above);
    }

    let center = (body.min + body.max) / 2.0;
    Vec2::new(center.x.clamp(left, right), center.y.clamp(top, bottom))
}

// ============================================================================
// PETAL GEOMETRY
// ============================================================================

/// Petal rings drawn around the flower center
pub const PETAL_RINGS: usize = 2;
const BASE_RADIUS: f32 = 20.0;
const RADIUS_STEP: f32 = 25.0;
const FREQ_STEP: f32 = 3.0;
const HUE_STEP: f32 = 30.0;
/// Angular step of the petal curve in degrees
const PETAL_STEP_DEG: f32 = 0.5;

/// Per-frame animation parameters of the flower
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PetalShape {
    pub base_hue: f32,
    pub amplitude: f32,
    pub base_freq: f32,
}

fn remap(value: f32, from: (f32, f32), to: (f32, f32)) -> f32 {
    to.0 + (value - from.0) / (from.1 - from.0) * (to.1 - to.0)
}

impl PetalShape {
    /// Oscillators run in degrees: amplitude swings 5..15, frequency 3..7.
    pub fn at_frame(frame: u64) -> Self {
        let f = frame as f32;
        Self {
            base_hue: (f * 0.1) % 360.0,
            amplitude: remap((f * 0.5).to_radians().sin(), (-1.0, 1.0), (5.0, 15.0)),
            base_freq: remap((f * 0.25).to_radians().cos(), (-1.0, 1.0), (3.0, 7.0)),
        }
    }

    pub fn ring_hue(&self, ring: usize) -> f32 {
        (self.base_hue + ring as f32 * HUE_STEP) % 360.0
    }

    pub fn halo_hue(&self) -> f32 {
        (self.base_hue + 45.0) % 360.0
    }

    /// Points of one petal ring relative to the flower center (y down)
    pub fn ring_points(&self, ring: usize) -> impl Iterator<Item = Vec2> + '_ {
        let radius = BASE_RADIUS + ring as f32 * RADIUS_STEP;
        let freq = self.base_freq + ring as f32 * FREQ_STEP;
        let steps = (360.0 / PETAL_STEP_DEG) as usize;
        (0..=steps).map(move |i| {
            let angle = i as f32 * PETAL_STEP_DEG;
            let dist = radius + (angle * freq).to_radians().sin() * self.amplitude;
            let rad = angle.to_radians();
            Vec2::new(rad.cos() * dist, rad.sin() * dist)
        })
    }
}
