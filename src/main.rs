use bevy::prelude::*;
use bevy::window::WindowResolution;
use bevy_egui::{EguiContexts, EguiPlugin, egui};
use sage_slime::camera::{BACKGROUND, setup_camera};
use sage_slime::config::*;
use sage_slime::error::ConfigError;
use sage_slime::input::{PointerCaptured, collect_input};
use sage_slime::render::{draw_petals, spawn_visuals, update_body, update_face, update_flower_halo};
use sage_slime::simulation::{Simulation, SimulationState, seed_from_env, step_simulation};

/// Whether the debug overlay is shown (F1 toggles)
#[derive(Resource)]
struct OverlayVisible(bool);

fn main() -> Result<(), ConfigError> {
    let seed = seed_from_env()?;
    let simulation = Simulation::new(SlimeConfig::default(), seed)?;

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Sage Slime".to_string(),
                resolution: WindowResolution::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT),
                resizable: false,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(EguiPlugin)
        .insert_resource(ClearColor(BACKGROUND))
        .insert_resource(Time::<Fixed>::from_hz(FRAME_RATE_HZ))
        .insert_resource(simulation)
        .insert_resource(OverlayVisible(true))
        .init_resource::<SimulationState>()
        .init_resource::<PointerCaptured>()
        .add_systems(Startup, (setup_camera, spawn_visuals, log_startup))
        .add_systems(
            Update,
            (
                // Always run (even when paused)
                toggle_overlay,
                ui_system,
                update_body,
                update_face,
                update_flower_halo,
                draw_petals,
            ),
        )
        .add_systems(
            Update,
            collect_input
                .after(ui_system)
                .run_if(|state: Res<SimulationState>| *state == SimulationState::Running),
        )
        .add_systems(
            FixedUpdate,
            step_simulation
                .run_if(|state: Res<SimulationState>| *state == SimulationState::Running),
        )
        .run();

    Ok(())
}

fn log_startup(sim: Res<Simulation>) {
    info!(
        "Sage Slime started: slime at ({:.0}, {:.0}), flower at ({:.0}, {:.0})",
        sim.slime.x, sim.slime.y, sim.flower.pos.x, sim.flower.pos.y
    );
}

fn toggle_overlay(keys: Res<ButtonInput<KeyCode>>, mut overlay: ResMut<OverlayVisible>) {
    if keys.just_pressed(KeyCode::F1) {
        overlay.0 = !overlay.0;
    }
}

fn ui_system(
    mut contexts: EguiContexts,
    overlay: Res<OverlayVisible>,
    mut simulation_state: ResMut<SimulationState>,
    mut sim: ResMut<Simulation>,
    mut captured: ResMut<PointerCaptured>,
) {
    if !overlay.0 {
        captured.0 = false;
        return;
    }

    let ctx = contexts.ctx_mut();
    egui::Window::new("Slime Info")
        .default_pos(egui::pos2(10.0, 10.0))
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                let button_text = if *simulation_state == SimulationState::Running {
                    "⏸ Pause"
                } else {
                    "▶ Resume"
                };

                if ui.button(button_text).clicked() {
                    *simulation_state = if *simulation_state == SimulationState::Running {
                        SimulationState::Paused
                    } else {
                        SimulationState::Running
                    };
                }

                if ui.button("🌸 Respawn Flower").clicked() {
                    sim.flower.held = false;
                    sim.respawn_flower();
                }
            });

            ui.separator();
            ui.heading("Slime");
            ui.separator();

            let slime = &sim.slime;
            ui.label(format!("State: {}", slime.state));
            ui.label(format!(
                "Size: {:.2} (target {:.2})",
                slime.pixel_size, slime.target_pixel_size
            ));
            ui.label(format!("Eaten: {} / {}", slime.eat_count, sim.config.max_eat_count));
            let fullness = slime.eat_count as f32 / sim.config.max_eat_count as f32;
            ui.add(
                egui::ProgressBar::new(fullness).text(format!("{}%", (fullness * 100.0) as u32)),
            );
            ui.label(format!("Position: ({:.1}, {:.1})", slime.x, slime.y));
            ui.label(format!("Vertical speed: {:.2}", slime.vy));
            ui.label(format!(
                "Timers: pause {} | idle {} | poke {}",
                slime.pause_timer, slime.idle_timer, slime.poke_timer
            ));
            ui.label(format!("Powered up: {}", slime.powered_up));

            ui.separator();
            ui.heading("Flower");
            ui.separator();
            ui.label(format!(
                "Position: ({:.1}, {:.1})",
                sim.flower.pos.x, sim.flower.pos.y
            ));
            ui.label(format!("Held: {}", sim.flower.held));
            ui.label(format!("Frame: {}", sim.frame));

            ui.separator();
            ui.label("Controls:");
            ui.label("• Click flower - Pick up / drop");
            ui.label("• Click slime - Poke");
            ui.label("• Space - Jump");
            ui.label("• F1 - Toggle this panel");
        });

    captured.0 = ctx.wants_pointer_input() || ctx.is_pointer_over_area();
}
