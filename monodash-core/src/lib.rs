//! Board-agnostic core logic for the Monodash status display
//!
//! This crate contains everything between the hardware traits and the
//! panel driver:
//!
//! - Joystick sampling with priority decode and release latching
//! - Framebuffer translation from UI color regions to 1-bit draw commands
//! - A small retained-mode dashboard (labels, battery icon, sensor bars)
//! - The periodic status updater (uptime, battery, sensor)
//! - The cooperative render loop that pumps all of the above
//! - Configuration types and a minimal TOML-subset parser

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod display;
pub mod input;
pub mod render_loop;
pub mod state;
pub mod status;
pub mod ui;

pub use render_loop::RenderLoop;
pub use state::DashboardState;
