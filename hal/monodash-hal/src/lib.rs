//! Monodash Hardware Abstraction Layer
//!
//! This crate defines the narrow hardware traits the dashboard core reads
//! from. Board crates implement them on top of their chip HAL so the core
//! can be exercised on the host with fakes.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  monodash-core (sampler, status timer)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  monodash-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  monodash-firmware (embassy-rp glue)    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::InputPin`] - Digital input
//! - [`adc::AnalogSource`] - 12-bit analog sampling

#![no_std]
#![deny(unsafe_code)]

pub mod adc;
pub mod gpio;

// Re-export key traits at crate root for convenience
pub use adc::{AnalogChannel, AnalogSource, ADC_FULL_SCALE};
pub use gpio::{InputPin, Level};
