use bevy::prelude::*;

use crate::config::*;
use crate::flower::Flower;
use crate::slime::{Slime, SlimeState};

/// What a state handler asks the simulation to do after it ran
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Outcome {
    pub next: Option<SlimeState>,
    pub respawn_flower: bool,
}

impl Outcome {
    fn stay() -> Self {
        Self::default()
    }

    fn go(next: SlimeState) -> Self {
        Self {
            next: Some(next),
            respawn_flower: false,
        }
    }

    fn respawn_and_go(next: SlimeState) -> Self {
        Self {
            next: Some(next),
            respawn_flower: true,
        }
    }
}

/// Run the handler of the current state. Movement intent is cleared first, so
/// only SEEKING can leave a non-zero `move_dir` behind.
pub fn update(slime: &mut Slime, flower: &Flower, config: &SlimeConfig) -> Outcome {
    slime.move_dir = 0.0;
    match slime.state {
        SlimeState::Seeking => seek(slime, flower, config),
        SlimeState::Growing => grow(slime, config),
        SlimeState::Paused => digest(slime, flower, config),
        SlimeState::Shrinking => shrink(slime, config),
        SlimeState::Idle => idle(slime),
        SlimeState::Poked => recover_from_poke(slime, config),
    }
}

/// Crawl toward the flower, jump for it when it hangs overhead, eat it on contact.
fn seek(slime: &mut Slime, flower: &Flower, config: &SlimeConfig) -> Outcome {
    // A full slime that was interrupted before shrinking picks the shrink back up
    if is_full(slime, config) {
        start_shrinking(slime, config);
        return Outcome::go(SlimeState::Shrinking);
    }

    let width = slime.width();
    let height = slime.height();
    let dx = flower.pos.x - slime.x;
    let dy = flower.pos.y - slime.center_y();

    if dx.abs() > SEEK_DEADZONE {
        slime.move_dir = dx.signum();
    }

    // Only jump from (near) rest, and only if the flower is out of standing reach
    if dy < -height * 0.2 && dx.abs() < width * 0.75 && slime.vy.abs() < 1.0 {
        slime.vy = -config.jump_strength;
    }

    if dx.abs() < width * 0.15 && dy.abs() < height * 0.2 {
        slime.powered_up = true;
        slime.target_pixel_size = slime.pixel_size + config.grow_amount;
        slime.eat_count += 1;
        info!(
            "flower eaten ({}/{}), growing to {:.1}",
            slime.eat_count, config.max_eat_count, slime.target_pixel_size
        );
        return Outcome::go(SlimeState::Growing);
    }
    Outcome::stay()
}

/// Ease `value` toward `target`; returns true once it has snapped onto it.
fn ease_toward(value: &mut f32, target: f32, factor: f32) -> bool {
    *value += factor * (target - *value);
    if (*value - target).abs() < SCALE_SNAP_EPSILON {
        *value = target;
        return true;
    }
    false
}

fn grow(slime: &mut Slime, config: &SlimeConfig) -> Outcome {
    if ease_toward(
        &mut slime.pixel_size,
        slime.target_pixel_size,
        config.grow_ease,
    ) {
        slime.pause_timer = config.pause_duration;
        return Outcome::go(SlimeState::Paused);
    }
    Outcome::stay()
}

/// Digestion pause. Frozen while the flower is held.
fn digest(slime: &mut Slime, flower: &Flower, config: &SlimeConfig) -> Outcome {
    if flower.held {
        return Outcome::stay();
    }
    slime.pause_timer = slime.pause_timer.saturating_sub(1);
    if slime.pause_timer > 0 {
        return Outcome::stay();
    }

    slime.powered_up = false;
    if is_full(slime, config) {
        start_shrinking(slime, config);
        return Outcome::go(SlimeState::Shrinking);
    }
    slime.idle_timer = config.idle_duration;
    Outcome::respawn_and_go(SlimeState::Idle)
}

fn is_full(slime: &Slime, config: &SlimeConfig) -> bool {
    slime.eat_count >= config.max_eat_count
}

/// Aim back at rest size. The caller makes the SHRINKING transition.
fn start_shrinking(slime: &mut Slime, config: &SlimeConfig) {
    info!("slime is full after {} flowers, shrinking", slime.eat_count);
    slime.powered_up = false;
    slime.target_pixel_size = config.initial_pixel_size;
}

fn shrink(slime: &mut Slime, config: &SlimeConfig) -> Outcome {
    if ease_toward(
        &mut slime.pixel_size,
        config.initial_pixel_size,
        config.shrink_ease,
    ) {
        slime.target_pixel_size = config.initial_pixel_size;
        slime.eat_count = 0;
        slime.idle_timer = config.idle_duration;
        return Outcome::respawn_and_go(SlimeState::Idle);
    }
    Outcome::stay()
}

fn idle(slime: &mut Slime) -> Outcome {
    slime.idle_timer = slime.idle_timer.saturating_sub(1);
    if slime.idle_timer == 0 {
        return Outcome::go(SlimeState::Seeking);
    }
    Outcome::stay()
}

fn recover_from_poke(slime: &mut Slime, config: &SlimeConfig) -> Outcome {
    slime.poke_timer = slime.poke_timer.saturating_sub(1);
    if slime.poke_timer == 0 {
        slime.idle_timer = config.idle_duration / 2;
        return Outcome::go(SlimeState::Idle);
    }
    Outcome::stay()
}

/// Runaway-growth escape valve. Returns true when it fired.
///
/// A held flower is dropped where it is so the slime never restarts SEEKING
/// while the flower is still glued to the pointer.
pub fn enforce_size_limit(slime: &mut Slime, flower: &mut Flower, config: &SlimeConfig) -> bool {
    if slime.width() <= config.viewport.x * config.oversize_factor {
        return false;
    }
    warn!(
        "slime width {:.0} exceeds {:.0}, resetting",
        slime.width(),
        config.viewport.x * config.oversize_factor
    );
    slime.pixel_size = config.initial_pixel_size;
    slime.target_pixel_size = config.initial_pixel_size;
    slime.powered_up = false;
    slime.x = config.viewport.x / 2.0;
    flower.held = false;
    slime.transition_to(SlimeState::Seeking);
    true
}

// ============================================================================
// INPUT
// ============================================================================

/// Pointer press. The flower takes priority over the slime.
pub fn on_click(point: Vec2, slime: &mut Slime, flower: &mut Flower, config: &SlimeConfig) {
    if flower.within_pickup(point, config.flower_pickup_radius) {
        flower.held = !flower.held;
        if flower.held {
            debug!("flower picked up");
            slime.pause_timer = 0;
            slime.idle_timer = 0;
            slime.transition_to(SlimeState::Paused);
        } else {
            debug!("flower dropped at ({:.1}, {:.1})", flower.pos.x, flower.pos.y);
            if is_full(slime, config) {
                start_shrinking(slime, config);
                slime.transition_to(SlimeState::Shrinking);
            } else {
                slime.idle_timer = config.idle_duration;
                slime.transition_to(SlimeState::Idle);
            }
        }
        return;
    }

    if slime.bounds().contains(point) && !slime.state.is_busy() {
        slime.poke_timer = config.poke_duration;
        slime.transition_to(SlimeState::Poked);
    }
}

/// Jump key. Ignored mid-air and while busy.
pub fn on_jump(slime: &mut Slime, config: &SlimeConfig) {
    if !slime.state.is_busy() && slime.vy.abs() < 5.0 {
        slime.vy = -config.jump_strength;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Slime, Flower, SlimeConfig) {
        let config = SlimeConfig::default();
        let mut slime = Slime::new(&config);
        slime.y = config.ground() - slime.height();
        let flower = Flower::new(Vec2::new(600.0, 100.0));
        (slime, flower, config)
    }

    #[test]
    fn dispatcher_handles_every_state() {
        let (mut slime, flower, config) = setup();
        for state in SlimeState::ALL {
            slime.state = state;
            slime.pause_timer = 5;
            slime.idle_timer = 5;
            slime.poke_timer = 5;
            let _ = update(&mut slime, &flower, &config);
        }
    }

    #[test]
    fn seeking_crawls_toward_level_flower_without_jumping() {
        let (mut slime, mut flower, config) = setup();
        flower.pos = Vec2::new(slime.x + 100.0, slime.center_y());
        let out = update(&mut slime, &flower, &config);
        assert_eq!(slime.move_dir, 1.0);
        assert_eq!(slime.vy, 0.0);
        assert_eq!(out, Outcome::stay());

        flower.pos.x = slime.x + 5.0;
        update(&mut slime, &flower, &config);
        assert_eq!(slime.move_dir, 0.0);
    }

    #[test]
    fn seeking_jumps_for_overhead_flower_only_from_rest() {
        let (mut slime, mut flower, config) = setup();
        flower.pos = Vec2::new(slime.x + 10.0, slime.y - 40.0);
        slime.vy = 2.0;
        update(&mut slime, &flower, &config);
        assert_eq!(slime.vy, 2.0);

        slime.vy = 0.5;
        update(&mut slime, &flower, &config);
        assert_eq!(slime.vy, -config.jump_strength);
    }

    #[test]
    fn eating_sets_growth_target() {
        let (mut slime, mut flower, config) = setup();
        flower.pos = Vec2::new(slime.x + 3.0, slime.center_y());
        let out = update(&mut slime, &flower, &config);
        assert_eq!(out.next, Some(SlimeState::Growing));
        assert!(slime.powered_up);
        assert_eq!(slime.eat_count, 1);
        assert_eq!(slime.target_pixel_size, config.initial_pixel_size + config.grow_amount);
    }

    #[test]
    fn growth_snaps_exactly_and_pauses_once() {
        let (mut slime, flower, config) = setup();
        slime.state = SlimeState::Growing;
        slime.target_pixel_size = slime.pixel_size + config.grow_amount;
        let mut pauses = 0;
        for _ in 0..100 {
            if let Some(next) = update(&mut slime, &flower, &config).next {
                assert_eq!(next, SlimeState::Paused);
                slime.state = next;
                pauses += 1;
                break;
            }
            assert!(slime.pixel_size < slime.target_pixel_size);
        }
        assert_eq!(pauses, 1);
        assert_eq!(slime.pixel_size, slime.target_pixel_size);
        assert_eq!(slime.pause_timer, config.pause_duration);
    }

    #[test]
    fn pause_respawns_flower_and_idles() {
        let (mut slime, flower, config) = setup();
        slime.state = SlimeState::Paused;
        slime.pause_timer = 3;
        slime.powered_up = true;
        slime.eat_count = 1;
        assert_eq!(update(&mut slime, &flower, &config), Outcome::stay());
        assert_eq!(update(&mut slime, &flower, &config), Outcome::stay());
        let out = update(&mut slime, &flower, &config);
        assert_eq!(out, Outcome::respawn_and_go(SlimeState::Idle));
        assert!(!slime.powered_up);
        assert_eq!(slime.idle_timer, config.idle_duration);
    }

    #[test]
    fn pause_is_frozen_while_flower_held() {
        let (mut slime, mut flower, config) = setup();
        slime.state = SlimeState::Paused;
        slime.pause_timer = 1;
        flower.held = true;
        for _ in 0..10 {
            assert_eq!(update(&mut slime, &flower, &config), Outcome::stay());
        }
        assert_eq!(slime.pause_timer, 1);
    }

    #[test]
    fn full_slime_shrinks_back_to_rest_size() {
        let (mut slime, flower, config) = setup();
        slime.state = SlimeState::Paused;
        slime.pause_timer = 1;
        slime.eat_count = config.max_eat_count;
        slime.pixel_size = 18.0;
        let out = update(&mut slime, &flower, &config);
        assert_eq!(out, Outcome::go(SlimeState::Shrinking));
        slime.state = SlimeState::Shrinking;

        let mut out = Outcome::stay();
        for _ in 0..500 {
            out = update(&mut slime, &flower, &config);
            assert!(slime.pixel_size > 0.0);
            if out.next.is_some() {
                break;
            }
        }
        assert_eq!(out, Outcome::respawn_and_go(SlimeState::Idle));
        assert_eq!(slime.pixel_size, config.initial_pixel_size);
        assert_eq!(slime.eat_count, 0);
        assert_eq!(slime.idle_timer, config.idle_duration);
    }

    #[test]
    fn poke_recovers_into_short_idle() {
        let (mut slime, flower, config) = setup();
        slime.state = SlimeState::Poked;
        slime.poke_timer = config.poke_duration;
        for frame in 1..=config.poke_duration {
            let out = update(&mut slime, &flower, &config);
            if frame < config.poke_duration {
                assert_eq!(out, Outcome::stay());
            } else {
                assert_eq!(out, Outcome::go(SlimeState::Idle));
            }
        }
        assert_eq!(slime.idle_timer, config.idle_duration / 2);
    }

    #[test]
    fn clicking_flower_toggles_hold() {
        let (mut slime, mut flower, config) = setup();
        slime.idle_timer = 12;
        on_click(flower.pos + Vec2::new(10.0, 0.0), &mut slime, &mut flower, &config);
        assert!(flower.held);
        assert_eq!(slime.state, SlimeState::Paused);
        assert_eq!((slime.pause_timer, slime.idle_timer), (0, 0));

        on_click(flower.pos, &mut slime, &mut flower, &config);
        assert!(!flower.held);
        assert_eq!(slime.state, SlimeState::Idle);
        assert_eq!(slime.idle_timer, config.idle_duration);
    }

    #[test]
    fn releasing_flower_when_full_resumes_shrinking() {
        let (mut slime, mut flower, config) = setup();
        slime.eat_count = config.max_eat_count;
        slime.pixel_size = 18.0;
        slime.target_pixel_size = 18.0;
        slime.powered_up = true;
        on_click(flower.pos, &mut slime, &mut flower, &config);
        assert_eq!(slime.state, SlimeState::Paused);

        on_click(flower.pos, &mut slime, &mut flower, &config);
        assert!(!flower.held);
        assert_eq!(slime.state, SlimeState::Shrinking);
        assert_eq!(slime.target_pixel_size, config.initial_pixel_size);
        assert!(!slime.powered_up);
        assert_eq!(slime.eat_count, config.max_eat_count);
    }

    #[test]
    fn full_slime_shrinks_instead_of_eating() {
        let (mut slime, mut flower, config) = setup();
        slime.eat_count = config.max_eat_count;
        slime.pixel_size = 18.0;
        flower.pos = Vec2::new(slime.x, slime.center_y());
        let out = update(&mut slime, &flower, &config);
        assert_eq!(out, Outcome::go(SlimeState::Shrinking));
        assert_eq!(slime.eat_count, config.max_eat_count);
        assert_eq!(slime.target_pixel_size, config.initial_pixel_size);
        assert_eq!(slime.move_dir, 0.0);
    }

    #[test]
    fn clicking_slime_pokes_unless_busy() {
        let (mut slime, mut flower, config) = setup();
        let body = Vec2::new(slime.x, slime.center_y());
        slime.state = SlimeState::Growing;
        on_click(body, &mut slime, &mut flower, &config);
        assert_eq!(slime.state, SlimeState::Growing);

        slime.state = SlimeState::Idle;
        on_click(body, &mut slime, &mut flower, &config);
        assert_eq!(slime.state, SlimeState::Poked);
        assert_eq!(slime.poke_timer, config.poke_duration);
    }

    #[test]
    fn jump_requires_low_speed_and_free_state() {
        let (mut slime, _, config) = setup();
        slime.vy = 6.0;
        on_jump(&mut slime, &config);
        assert_eq!(slime.vy, 6.0);

        slime.vy = 0.0;
        slime.state = SlimeState::Paused;
        on_jump(&mut slime, &config);
        assert_eq!(slime.vy, 0.0);

        slime.state = SlimeState::Seeking;
        on_jump(&mut slime, &config);
        assert_eq!(slime.vy, -config.jump_strength);
    }

    #[test]
    fn oversize_reset_releases_held_flower() {
        let (mut slime, mut flower, config) = setup();
        slime.pixel_size = 80.0;
        slime.x = 100.0;
        slime.state = SlimeState::Paused;
        slime.powered_up = true;
        flower.held = true;
        assert!(enforce_size_limit(&mut slime, &mut flower, &config));
        assert_eq!(slime.pixel_size, config.initial_pixel_size);
        assert_eq!(slime.state, SlimeState::Seeking);
        assert_eq!(slime.x, config.viewport.x / 2.0);
        assert!(!slime.powered_up && !flower.held);
        assert!(!enforce_size_limit(&mut slime, &mut flower, &config));
    }
}
