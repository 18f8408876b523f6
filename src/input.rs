use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::simulation::Simulation;

/// Discrete input delivered to the simulation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer moved to a screen position
    PointerMoved(Vec2),
    /// Left button pressed at a screen position
    PointerPressed(Vec2),
    /// Jump key pressed
    Jump,
}

/// Events queued between fixed steps, drained in arrival order at the start of the next step
#[derive(Debug, Default)]
pub struct InputInbox {
    events: Vec<InputEvent>,
}

impl InputInbox {
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, InputEvent> {
        self.events.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Set while the debug overlay owns the pointer, so panel clicks never reach the slime
#[derive(Resource, Debug, Default)]
pub struct PointerCaptured(pub bool);

const JUMP_KEYS: [KeyCode; 3] = [KeyCode::Space, KeyCode::ArrowUp, KeyCode::KeyW];

/// System to collect pointer and keyboard input into the simulation inbox
///
/// Window cursor coordinates are already top-left origin with y down, the same
/// space the simulation works in.
pub fn collect_input(
    mouse_button: Res<ButtonInput<MouseButton>>,
    keys: Res<ButtonInput<KeyCode>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    captured: Option<Res<PointerCaptured>>,
    mut sim: ResMut<Simulation>,
) {
    let over_ui = captured.is_some_and(|c| c.0);
    let cursor = windows
        .get_single()
        .ok()
        .and_then(|window| window.cursor_position());

    if let Some(pos) = cursor {
        if pos != sim.pointer {
            sim.inbox.push(InputEvent::PointerMoved(pos));
        }
        if mouse_button.just_pressed(MouseButton::Left) && !over_ui {
            sim.inbox.push(InputEvent::PointerPressed(pos));
        }
    }

    if keys.any_just_pressed(JUMP_KEYS) {
        sim.inbox.push(InputEvent::Jump);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drains_in_arrival_order() {
        let mut inbox = InputInbox::default();
        inbox.push(InputEvent::PointerPressed(Vec2::ONE));
        inbox.push(InputEvent::Jump);
        inbox.push(InputEvent::PointerPressed(Vec2::ZERO));
        let drained: Vec<_> = inbox.drain().collect();
        assert_eq!(
            drained,
            [
                InputEvent::PointerPressed(Vec2::ONE),
                InputEvent::Jump,
                InputEvent::PointerPressed(Vec2::ZERO),
            ]
        );
        assert!(inbox.is_empty());
    }
}
