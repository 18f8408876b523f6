//! Configuration constants for the slime simulation

use bevy::prelude::*;

use crate::error::ConfigError;

// ============================================================================
// VIEWPORT
// ============================================================================

/// Logical width of the canvas
pub const VIEWPORT_WIDTH: f32 = 750.0;

/// Logical height of the canvas
pub const VIEWPORT_HEIGHT: f32 = 750.0;

/// Distance of the ground line above the bottom edge of the canvas
pub const GROUND_OFFSET: f32 = 150.0;

/// Fixed simulation rate in frames per second
pub const FRAME_RATE_HZ: f64 = 60.0;

// ============================================================================
// SLIME BODY & PHYSICS
// ============================================================================

/// Size of one bitmap cell when the slime is at rest size
pub const INITIAL_PIXEL_SIZE: f32 = 8.0;

/// Vertical position (top edge) of the slime at startup
pub const INITIAL_Y: f32 = 100.0;

/// Base horizontal crawl speed per frame
pub const MOVE_SPEED: f32 = 1.5;

/// Upward velocity applied by a jump
pub const JUMP_STRENGTH: f32 = 18.0;

/// Downward acceleration added to vertical velocity every frame
pub const GRAVITY: f32 = 0.8;

/// Fraction of vertical speed kept after a ground bounce
pub const RESTITUTION: f32 = 0.65;

/// Hard cap on vertical speed in either direction
pub const TERMINAL_VELOCITY: f32 = 40.0;

/// Oversize reset fires when body width exceeds this multiple of the viewport width
pub const OVERSIZE_FACTOR: f32 = 1.5;

// ============================================================================
// BEHAVIOR
// ============================================================================

/// Scale added per flower eaten
pub const GROW_AMOUNT: f32 = 2.0;

/// Per-frame easing factor while growing
pub const GROW_EASE: f32 = 0.1;

/// Per-frame easing factor while shrinking back to rest size
pub const SHRINK_EASE: f32 = 0.05;

/// Distance from target scale at which easing snaps to the target
pub const SCALE_SNAP_EPSILON: f32 = 0.1;

/// Flowers eaten before the slime shrinks back to rest size
pub const MAX_EAT_COUNT: u32 = 5;

/// Digestion pause in frames (120 frames = 2 seconds)
pub const PAUSE_DURATION: u32 = 120;

/// Idle "thinking" period in frames (90 frames = 1.5 seconds)
pub const IDLE_DURATION: u32 = 90;

/// Length of the poke reaction in frames
pub const POKE_DURATION: u32 = 40;

/// Horizontal distance below which the slime stops crawling
pub const SEEK_DEADZONE: f32 = 5.0;

// ============================================================================
// ANIMATION
// ============================================================================

/// Phase step per frame for the crawl wave and breathing
pub const CRAWL_WAVE_RATE: f32 = 0.05;

/// Horizontal lean while crawling
pub const CRAWL_STRETCH: f32 = 0.1;

/// Amplitude of the idle breathing animation
pub const BREATHE_AMPLITUDE: f32 = 0.05;

/// Wobble amplitude at the start of a poke
pub const WOBBLE_MAX: f32 = 0.25;

/// Wobble phase step per frame while poked
pub const WOBBLE_FREQUENCY: f32 = 0.6;

// ============================================================================
// FLOWER
// ============================================================================

/// Click radius for picking up / dropping the flower
pub const FLOWER_PICKUP_RADIUS: f32 = 30.0;

/// Clearance kept between a fresh flower and the slime's bounding box
pub const FLOWER_SAFETY_MARGIN: f32 = 50.0;

/// Distance kept between a fresh flower and the canvas edges
pub const FLOWER_EDGE_MARGIN: f32 = 50.0;

/// Rejection-sampling attempts before falling back to a computed placement
pub const FLOWER_SPAWN_ATTEMPTS: u32 = 256;

/// Tunable parameters of the simulation, one per constant above
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct SlimeConfig {
    pub viewport: Vec2,
    pub ground_offset: f32,
    pub initial_pixel_size: f32,
    pub initial_y: f32,
    pub move_speed: f32,
    pub jump_strength: f32,
    pub gravity: f32,
    pub restitution: f32,
    pub terminal_velocity: f32,
    pub oversize_factor: f32,
    pub grow_amount: f32,
    pub grow_ease: f32,
    pub shrink_ease: f32,
    pub max_eat_count: u32,
    pub pause_duration: u32,
    pub idle_duration: u32,
    pub poke_duration: u32,
    pub wobble_max: f32,
    pub wobble_frequency: f32,
    pub flower_pickup_radius: f32,
    pub flower_safety_margin: f32,
    pub flower_edge_margin: f32,
}

impl Default for SlimeConfig {
    fn default() -> Self {
        Self {
            viewport: Vec2::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT),
            ground_offset: GROUND_OFFSET,
            initial_pixel_size: INITIAL_PIXEL_SIZE,
            initial_y: INITIAL_Y,
            move_speed: MOVE_SPEED,
            jump_strength: JUMP_STRENGTH,
            gravity: GRAVITY,
            restitution: RESTITUTION,
            terminal_velocity: TERMINAL_VELOCITY,
            oversize_factor: OVERSIZE_FACTOR,
            grow_amount: GROW_AMOUNT,
            grow_ease: GROW_EASE,
            shrink_ease: SHRINK_EASE,
            max_eat_count: MAX_EAT_COUNT,
            pause_duration: PAUSE_DURATION,
            idle_duration: IDLE_DURATION,
            poke_duration: POKE_DURATION,
            wobble_max: WOBBLE_MAX,
            wobble_frequency: WOBBLE_FREQUENCY,
            flower_pickup_radius: FLOWER_PICKUP_RADIUS,
            flower_safety_margin: FLOWER_SAFETY_MARGIN,
            flower_edge_margin: FLOWER_EDGE_MARGIN,
        }
    }
}

impl SlimeConfig {
    /// Y coordinate of the ground line (screen space, y down)
    pub fn ground(&self) -> f32 {
        self.viewport.y - self.ground_offset
    }

    /// Vertical band flowers spawn in: from 200 above the middle to just above the ground
    pub fn flower_spawn_band(&self) -> (f32, f32) {
        (
            self.viewport.y / 2.0 - 200.0,
            self.ground() - self.flower_edge_margin,
        )
    }

    /// Reject parameter sets the state machine cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.viewport.x <= 0.0 || self.viewport.y <= 0.0 {
            return Err(ConfigError::Viewport(self.viewport));
        }
        for (name, value) in [
            ("initial_pixel_size", self.initial_pixel_size),
            ("move_speed", self.move_speed),
            ("jump_strength", self.jump_strength),
            ("gravity", self.gravity),
            ("terminal_velocity", self.terminal_velocity),
            ("oversize_factor", self.oversize_factor),
            ("grow_amount", self.grow_amount),
            ("flower_pickup_radius", self.flower_pickup_radius),
        ] {
            if !(value > 0.0) {
                return Err(ConfigError::NotPositive { name, value });
            }
        }
        for (name, value) in [
            ("grow_ease", self.grow_ease),
            ("shrink_ease", self.shrink_ease),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigError::EaseFactor { name, value });
            }
        }
        if !(self.restitution > 0.0 && self.restitution < 1.0) {
            return Err(ConfigError::Restitution(self.restitution));
        }
        for (name, value) in [
            ("pause_duration", self.pause_duration),
            ("idle_duration", self.idle_duration),
            ("poke_duration", self.poke_duration),
            ("max_eat_count", self.max_eat_count),
        ] {
            if value == 0 {
                return Err(ConfigError::ZeroCount(name));
            }
        }
        let (top, bottom) = self.flower_spawn_band();
        let left = self.flower_edge_margin;
        let right = self.viewport.x - self.flower_edge_margin;
        if top >= bottom || left >= right {
            return Err(ConfigError::EmptySpawnRegion {
                x: (left, right),
                y: (top, bottom),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(SlimeConfig::default().validate().is_ok());
        assert_eq!(SlimeConfig::default().ground(), 600.0);
    }

    #[test]
    fn rejects_bouncy_restitution() {
        let config = SlimeConfig {
            restitution: 1.2,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Restitution(_))));
    }

    #[test]
    fn rejects_zero_durations() {
        let config = SlimeConfig {
            poke_duration: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroCount("poke_duration"))
        ));
    }

    #[test]
    fn rejects_viewport_without_spawn_room() {
        let config = SlimeConfig {
            viewport: Vec2::new(90.0, 750.0),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptySpawnRegion { .. })
        ));
    }
}
