//! A pixel-art slime that chases, eats and grows from a wandering flower.
//!
//! The simulation core ([`simulation::Simulation`]) is plain data stepped once
//! per fixed frame; the Bevy systems around it only feed it input and draw it.

pub mod behavior;
pub mod camera;
pub mod config;
pub mod error;
pub mod flower;
pub mod input;
pub mod physics;
pub mod render;
pub mod simulation;
pub mod slime;
