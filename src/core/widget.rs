/// The world clock widget.
/// Ties the editor surface, stored control values and the face renderer
/// together behind the API a deck host calls.
use tiny_skia::Pixmap;
use tracing::{debug, warn};

use crate::catalog::TimezoneCatalog;
use crate::config::{ClockConfig, ControlValues};
use crate::editor::{self, ControlSpec, SelectOption};
use crate::error::RenderError;
use crate::render::clock::ClockRenderer;

pub const DISPLAY_NAME: &str = "World Clock";
pub const DESCRIPTION: &str = "Shows a world clock";
pub const GROUP_NAME: &str = "Clock";

pub struct ClockWidget {
    catalog: TimezoneCatalog,
    renderer: ClockRenderer,
}

impl ClockWidget {
    pub fn new() -> Self {
        let catalog = TimezoneCatalog::new();
        Self {
            catalog,
            renderer: ClockRenderer::new(catalog),
        }
    }

    /// Controls shown in the widget editor, in display order.
    pub fn controls(&self) -> &'static [ControlSpec] {
        &editor::CONTROLS
    }

    /// Listbox options for one control.
    pub fn options_for(&self, control: &str) -> Vec<SelectOption> {
        editor::options_for(&self.catalog, control)
    }

    /// Fill in defaults for controls the user has never set. Safe to call
    /// on every editor open; values already present are left alone.
    pub fn apply_defaults(&self, values: &mut ControlValues) {
        for control in &editor::CONTROLS {
            let current = values.get(control.name);
            if let Some(default) = editor::default_for(&self.catalog, control.name, current) {
                debug!("defaulting '{}' to '{}'", control.name, default);
                values.set(control.name, default);
            }
        }
    }

    /// Editor close handling. Returns whether the values should be kept.
    pub fn editor_finished(&self, values: &ControlValues, canceled: bool) -> bool {
        if canceled {
            return false;
        }
        if let Err(e) = ClockConfig::from_values(values) {
            // Keep them anyway; the face shows the placeholder until fixed.
            warn!("committed clock settings do not render yet: {}", e);
        }
        true
    }

    /// Produce the button face for the stored values at the current time.
    /// Never fails: configurations that cannot render get the placeholder.
    pub fn command_image(&self, values: &ControlValues, width: u32, height: u32) -> Pixmap {
        match self.try_command_image(values, width, height) {
            Ok(image) => image,
            Err(e) => {
                warn!("clock render failed: {}", e);
                self.renderer.render_placeholder(width, height)
            }
        }
    }

    fn try_command_image(
        &self,
        values: &ControlValues,
        width: u32,
        height: u32,
    ) -> Result<Pixmap, RenderError> {
        let config = ClockConfig::from_values(values)?;
        self.renderer.render(&config, width, height)
    }
}

impl Default for ClockWidget {
    fn default() -> Self {
        Self::new()
    }
}
