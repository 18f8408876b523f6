use bevy::prelude::*;

use crate::config::*;
use crate::slime::{Slime, SlimeState};

/// Crawl-wave oscillator shared by locomotion and animation
pub fn crawl_wave(frame: u64) -> f32 {
    (frame as f32 * CRAWL_WAVE_RATE).sin()
}

/// Advance the slime one frame: crawl, fall, bounce, then derive stretch.
pub fn integrate(slime: &mut Slime, frame: u64, config: &SlimeConfig) {
    let wave = crawl_wave(frame);

    if slime.move_dir != 0.0 {
        slime.x += slime.move_dir * config.move_speed * (1.0 + wave.abs());
    }
    slime.stretch = stretch_for(slime, frame, config);

    let half = slime.width() / 2.0;
    // A slime wider than the viewport pins to the center instead of inverting the clamp
    slime.x = if half * 2.0 >= config.viewport.x {
        config.viewport.x / 2.0
    } else {
        slime.x.clamp(half, config.viewport.x - half)
    };

    apply_gravity(slime, config);
}

/// Gravity plus an inelastic bounce off the ground line.
pub fn apply_gravity(slime: &mut Slime, config: &SlimeConfig) {
    slime.vy = (slime.vy + config.gravity)
        .clamp(-config.terminal_velocity, config.terminal_velocity);
    slime.y += slime.vy;

    let floor = config.ground() - slime.height();
    if slime.y > floor {
        slime.y = floor;
        slime.vy *= -config.restitution;
    }
}

/// Squash and stretch factors (x, y) for the current frame.
pub fn stretch_for(slime: &Slime, frame: u64, config: &SlimeConfig) -> Vec2 {
    let phase = frame as f32;

    if slime.state == SlimeState::Poked {
        let remaining = slime.poke_timer as f32 / config.poke_duration as f32;
        let wobble = (phase * config.wobble_frequency).sin() * config.wobble_max * remaining;
        return Vec2::new(1.0 + wobble, 1.0 - wobble);
    }

    if slime.move_dir != 0.0 {
        let wave = crawl_wave(frame);
        return Vec2::new(
            1.0 + CRAWL_STRETCH * wave * slime.move_dir,
            1.0 - CRAWL_STRETCH * wave.abs() * 0.2,
        );
    }

    let breath = BREATHE_AMPLITUDE * (phase * CRAWL_WAVE_RATE).sin();
    Vec2::new(1.0 + breath, 1.0 - breath)
}
