//! World clock widget core for button-deck control surfaces.
//!
//! Renders timezone-aware clock faces sized for hardware buttons, keeps
//! them fresh with a minute-aligned refresh scheduler and exposes the
//! editor surface (controls, options, defaults) a deck host needs.

pub mod catalog;
pub mod config;
pub mod core;
pub mod editor;
pub mod error;
pub mod render;
pub mod scheduler;

pub use crate::catalog::TimezoneCatalog;
pub use crate::config::{ClockConfig, ControlValues, TimeFormat};
pub use crate::core::widget::ClockWidget;
pub use crate::error::{ConfigError, RenderError, SchedulerError};
pub use crate::render::clock::ClockRenderer;
pub use crate::scheduler::RefreshScheduler;
