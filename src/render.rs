use bevy::prelude::*;

use crate::camera::{offset_to_world, screen_to_world};
use crate::flower::{PETAL_RINGS, PetalShape};
use crate::simulation::Simulation;
use crate::slime::{Slime, body_cells};

/// One filled cell of the slime bitmap
#[derive(Component)]
pub struct BodyCell {
    pub row: usize,
    pub col: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EyeLayer {
    White,
    Pupil,
    Highlight,
}

/// A disc of the left (0) or right (1) eye
#[derive(Component)]
pub struct EyePart {
    pub side: usize,
    pub layer: EyeLayer,
}

/// Eyebrow over the left (0) or right (1) eye
#[derive(Component)]
pub struct Brow {
    pub side: usize,
}

/// One translucent disc of the flower glow
#[derive(Component)]
pub struct FlowerHalo {
    pub radius: f32,
}

const BODY_Z: f32 = 1.0;
const EYE_Z: f32 = 2.0;
const BROW_Z: f32 = 2.5;
const HALO_Z: f32 = 0.0;
const EYE_GRAY: Color = Color::srgb(155.0 / 255.0, 155.0 / 255.0, 155.0 / 255.0);
const RESTING_GREEN: Color = Color::srgb(120.0 / 255.0, 220.0 / 255.0, 140.0 / 255.0);

// ============================================================================
// GEOMETRY
// ============================================================================

/// Rainbow while powered up, green otherwise
pub fn body_color(slime: &Slime, frame: u64) -> Color {
    if slime.powered_up {
        let hue = (frame as f32 * 5.0) % 360.0;
        Color::hsv(hue, 0.8, 1.0)
    } else {
        RESTING_GREEN
    }
}

/// Left edge of the stretched body
fn body_left(slime: &Slime) -> f32 {
    slime.x - slime.width() * slime.stretch.x / 2.0
}

/// Screen-space center and size of a body cell, including the crawl ripple
pub fn cell_rect(slime: &Slime, frame: u64, row: usize, col: usize) -> (Vec2, Vec2) {
    let size = slime.pixel_size * slime.stretch;
    let ripple =
        (frame as f32 * 0.1 + row as f32 * 0.5).sin() * slime.pixel_size * 0.25 * slime.move_dir;
    let top_left = Vec2::new(
        body_left(slime) + col as f32 * size.x + ripple,
        slime.y + row as f32 * size.y,
    );
    (top_left + size / 2.0, size)
}

/// Screen-space layout of one eye
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Eye {
    pub center: Vec2,
    pub white_diameter: f32,
    pub pupil: Vec2,
    pub pupil_diameter: f32,
    pub highlight: Vec2,
    pub highlight_diameter: f32,
    /// Eyebrow endpoints
    pub brow: (Vec2, Vec2),
}

/// Eyes sit on bitmap row 8, columns 8 and 12; pupils and brows follow the pointer.
pub fn eyes(slime: &Slime, pointer: Vec2) -> [Eye; 2] {
    let ps = slime.pixel_size;
    let eye_y = slime.y + 8.0 * ps * slime.stretch.y;
    let left = body_left(slime);
    let brow_lift = ((pointer.y - eye_y) / 100.0 * ps).clamp(-ps, ps);
    let brow_y = eye_y - ps * 1.8 + brow_lift;

    [8.0, 12.0].map(|col| {
        let center = Vec2::new(left + col * ps * slime.stretch.x, eye_y);
        let look = pointer - center;
        let angle = look.y.atan2(look.x);
        let pupil = center + Vec2::new(angle.cos(), angle.sin()) * ps * 0.5;
        let pupil_diameter = ps * 1.5;
        let highlight_diameter = pupil_diameter / 3.0;
        // Brows tilt inward: outer end sits lower on the left eye, higher on the right
        let brow = if col < 10.0 {
            (
                Vec2::new(center.x - ps, brow_y),
                Vec2::new(center.x + ps, brow_y - ps * 0.2),
            )
        } else {
            (
                Vec2::new(center.x - ps, brow_y - ps * 0.2),
                Vec2::new(center.x + ps, brow_y),
            )
        };
        Eye {
            center,
            white_diameter: ps * 2.5,
            pupil,
            pupil_diameter,
            highlight: pupil - Vec2::splat(highlight_diameter * 0.5),
            highlight_diameter,
            brow,
        }
    })
}

// ============================================================================
// SYSTEMS
// ============================================================================

/// System to spawn the sprites and meshes that display the slime and flower
pub fn spawn_visuals(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    for (row, col) in body_cells() {
        commands.spawn((
            BodyCell { row, col },
            Sprite::from_color(RESTING_GREEN, Vec2::ONE),
            Transform::from_xyz(0.0, 0.0, BODY_Z),
        ));
    }

    let disc = meshes.add(Circle::new(0.5));
    let white = materials.add(ColorMaterial::from_color(Color::WHITE));
    let gray = materials.add(ColorMaterial::from_color(EYE_GRAY));
    for side in 0..2 {
        for (i, (layer, material)) in [
            (EyeLayer::White, &white),
            (EyeLayer::Pupil, &gray),
            (EyeLayer::Highlight, &white),
        ]
        .into_iter()
        .enumerate()
        {
            commands.spawn((
                EyePart { side, layer },
                Mesh2d(disc.clone()),
                MeshMaterial2d(material.clone()),
                Transform::from_xyz(0.0, 0.0, EYE_Z + i as f32 * 0.1),
            ));
        }
        commands.spawn((
            Brow { side },
            Sprite::from_color(EYE_GRAY, Vec2::ONE),
            Transform::from_xyz(0.0, 0.0, BROW_Z),
        ));
    }

    // Largest disc first so smaller ones stack on top and the center glows brightest
    for (i, step) in (1..=10).rev().enumerate() {
        let radius = step as f32 * 4.0 * 1.25;
        commands.spawn((
            FlowerHalo { radius },
            Mesh2d(disc.clone()),
            MeshMaterial2d(materials.add(ColorMaterial::from_color(Color::NONE))),
            Transform::from_xyz(0.0, 0.0, HALO_Z + i as f32 * 0.01)
                .with_scale(Vec3::splat(radius * 2.0)),
        ));
    }
}

/// System to place and color every body cell
pub fn update_body(
    sim: Res<Simulation>,
    mut cells: Query<(&BodyCell, &mut Transform, &mut Sprite)>,
) {
    let color = body_color(&sim.slime, sim.frame);
    for (cell, mut transform, mut sprite) in cells.iter_mut() {
        let (center, size) = cell_rect(&sim.slime, sim.frame, cell.row, cell.col);
        let pos = screen_to_world(center);
        transform.translation.x = pos.x;
        transform.translation.y = pos.y;
        transform.scale = size.extend(1.0);
        sprite.color = color;
    }
}

/// System to place eye discs and brows
pub fn update_face(
    sim: Res<Simulation>,
    mut parts: Query<(&EyePart, &mut Transform), Without<Brow>>,
    mut brows: Query<(&Brow, &mut Transform), Without<EyePart>>,
) {
    let eyes = eyes(&sim.slime, sim.pointer);

    for (part, mut transform) in parts.iter_mut() {
        let eye = &eyes[part.side];
        let (center, diameter) = match part.layer {
            EyeLayer::White => (eye.center, eye.white_diameter),
            EyeLayer::Pupil => (eye.pupil, eye.pupil_diameter),
            EyeLayer::Highlight => (eye.highlight, eye.highlight_diameter),
        };
        let pos = screen_to_world(center);
        transform.translation.x = pos.x;
        transform.translation.y = pos.y;
        transform.scale = Vec3::new(diameter, diameter, 1.0);
    }

    let thickness = sim.slime.pixel_size * 0.4;
    for (brow, mut transform) in brows.iter_mut() {
        let (start, end) = eyes[brow.side].brow;
        let span = offset_to_world(end - start);
        let mid = screen_to_world((start + end) / 2.0);
        transform.translation.x = mid.x;
        transform.translation.y = mid.y;
        transform.rotation = Quat::from_rotation_z(span.y.atan2(span.x));
        transform.scale = Vec3::new(span.length(), thickness, 1.0);
    }
}

/// System to move, tint and show/hide the flower glow
pub fn update_flower_halo(
    sim: Res<Simulation>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut halos: Query<(
        &FlowerHalo,
        &MeshMaterial2d<ColorMaterial>,
        &mut Transform,
        &mut Visibility,
    )>,
) {
    let visible = sim.flower_visible();
    let center = screen_to_world(sim.flower.pos);
    let hue = PetalShape::at_frame(sim.frame).halo_hue();

    for (halo, material, mut transform, mut visibility) in halos.iter_mut() {
        *visibility = if visible {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
        transform.translation.x = center.x;
        transform.translation.y = center.y;
        transform.scale = Vec3::new(halo.radius * 2.0, halo.radius * 2.0, 1.0);
        if let Some(mat) = materials.get_mut(&material.0) {
            mat.color = Color::hsva(hue, 0.7, 1.0, 0.04);
        }
    }
}

/// System to draw the petal rings as line strips
pub fn draw_petals(sim: Res<Simulation>, mut gizmos: Gizmos) {
    if !sim.flower_visible() {
        return;
    }
    let shape = PetalShape::at_frame(sim.frame);
    let center = sim.flower.pos;
    for ring in 0..PETAL_RINGS {
        let color = Color::hsva(shape.ring_hue(ring), 0.8, 1.0, 0.8);
        gizmos.linestrip_2d(
            shape.ring_points(ring).map(|p| screen_to_world(center + p)),
            color,
        );
    }
}
