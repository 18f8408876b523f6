use bevy::prelude::*;

use crate::config::{VIEWPORT_HEIGHT, VIEWPORT_WIDTH};

#[derive(Component)]
pub struct MainCamera;

/// Background color behind everything
pub const BACKGROUND: Color = Color::srgb(15.0 / 255.0, 25.0 / 255.0, 10.0 / 255.0);

pub fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        MainCamera,
        Transform::from_xyz(0.0, 0.0, 0.0),
        OrthographicProjection {
            scale: 1.0,
            ..OrthographicProjection::default_2d()
        },
    ));
}

/// Convert simulation screen space (top-left origin, y down) to world space
/// (centered, y up) for a camera sitting at the origin.
pub fn screen_to_world(screen: Vec2) -> Vec2 {
    Vec2::new(
        screen.x - VIEWPORT_WIDTH / 2.0,
        VIEWPORT_HEIGHT / 2.0 - screen.y,
    )
}

/// Screen-space offsets flip their vertical component in world space
pub fn offset_to_world(offset: Vec2) -> Vec2 {
    Vec2::new(offset.x, -offset.y)
}
