use bevy::prelude::*;
use std::fmt;

use crate::config::SlimeConfig;

/// Pixel-art body of the slime. `X` cells are drawn, everything else is empty.
pub const SLIME_SPRITE: [&str; 16] = [
    "................",
    "......XXXX......",
    "....XXXXXXXX....",
    "...XXXXXXXXXX...",
    "..XXXXXXXXXXXX..",
    "..XXXXXXXXXXXX..",
    ".XXXXXXXXXXXXXX.",
    ".XXXXXXXXXXXXXX.",
    ".XXXXXXXXXXXXXX.",
    ".XXXXXXXXXXXXXX.",
    ".XXXXXXXXXXXXXX.",
    "..XXXXXXXXXXXX..",
    "...XXXXXXXXXX...",
    "      XX..XX    ",
    "      XX..XX    ",
    "................",
];

/// Bitmap width in cells
pub const SPRITE_COLS: usize = 16;

/// Bitmap height in cells
pub const SPRITE_ROWS: usize = SLIME_SPRITE.len();

/// Iterate the (row, col) of every filled body cell
pub fn body_cells() -> impl Iterator<Item = (usize, usize)> {
    SLIME_SPRITE.iter().enumerate().flat_map(|(row, line)| {
        line.bytes()
            .enumerate()
            .filter(|(_, b)| *b == b'X')
            .map(move |(col, _)| (row, col))
    })
}

/// Behavior states of the slime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlimeState {
    Seeking,
    Growing,
    Paused,
    Shrinking,
    Idle,
    Poked,
}

impl SlimeState {
    pub const ALL: [SlimeState; 6] = [
        SlimeState::Seeking,
        SlimeState::Growing,
        SlimeState::Paused,
        SlimeState::Shrinking,
        SlimeState::Idle,
        SlimeState::Poked,
    ];

    /// States that ignore pokes and jump requests
    pub fn is_busy(self) -> bool {
        matches!(
            self,
            SlimeState::Paused | SlimeState::Growing | SlimeState::Poked
        )
    }

    /// The flower is shown while the slime is hunting or thinking about it
    pub fn shows_flower(self) -> bool {
        matches!(self, SlimeState::Seeking | SlimeState::Idle)
    }
}

impl fmt::Display for SlimeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SlimeState::Seeking => "SEEKING",
            SlimeState::Growing => "GROWING",
            SlimeState::Paused => "PAUSED",
            SlimeState::Shrinking => "SHRINKING",
            SlimeState::Idle => "IDLE",
            SlimeState::Poked => "POKED",
        };
        f.write_str(name)
    }
}

/// Axis-aligned box in screen space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn expand(self, margin: f32) -> Self {
        Self {
            min: self.min - Vec2::splat(margin),
            max: self.max + Vec2::splat(margin),
        }
    }

    /// Open-interval containment, matching the spawn rejection test
    pub fn contains_strict(&self, p: Vec2) -> bool {
        p.x > self.min.x && p.x < self.max.x && p.y > self.min.y && p.y < self.max.y
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// The creature. `x` is the horizontal center, `y` the top edge.
#[derive(Debug, Clone)]
pub struct Slime {
    pub x: f32,
    pub y: f32,
    pub vy: f32,
    pub pixel_size: f32,
    pub target_pixel_size: f32,
    pub stretch: Vec2,
    pub state: SlimeState,
    pub eat_count: u32,
    pub pause_timer: u32,
    pub idle_timer: u32,
    pub poke_timer: u32,
    pub powered_up: bool,
    /// Movement intent of the current frame: -1, 0 or 1
    pub move_dir: f32,
}

impl Slime {
    pub fn new(config: &SlimeConfig) -> Self {
        Self {
            x: config.viewport.x / 2.0,
            y: config.initial_y,
            vy: 0.0,
            pixel_size: config.initial_pixel_size,
            target_pixel_size: config.initial_pixel_size,
            stretch: Vec2::ONE,
            state: SlimeState::Seeking,
            eat_count: 0,
            pause_timer: 0,
            idle_timer: 0,
            poke_timer: 0,
            powered_up: false,
            move_dir: 0.0,
        }
    }

    pub fn width(&self) -> f32 {
        SPRITE_COLS as f32 * self.pixel_size
    }

    pub fn height(&self) -> f32 {
        SPRITE_ROWS as f32 * self.pixel_size
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height() / 2.0
    }

    /// Unstretched bounding box
    pub fn bounds(&self) -> Bounds {
        let half = self.width() / 2.0;
        Bounds {
            min: Vec2::new(self.x - half, self.y),
            max: Vec2::new(self.x + half, self.y + self.height()),
        }
    }

    pub fn transition_to(&mut self, next: SlimeState) {
        if self.state != next {
            debug!("slime {} -> {}", self.state, next);
        }
        self.state = next;
    }
}
