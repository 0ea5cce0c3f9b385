/// Demo panel host.
/// Drives clock widgets the way a deck host would: fills in defaults,
/// redraws every minute and writes each button face to a PNG file.
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

use crate::catalog::TimezoneCatalog;
use crate::config::{ControlValues, CONTROL_TIMEZONE};
use crate::core::widget::ClockWidget;
use crate::scheduler::RefreshScheduler;

#[derive(Debug, Clone)]
pub struct PanelConfig {
    /// Button face size in pixels
    pub width: u32,
    pub height: u32,
    /// Directory the rendered faces are written into
    pub output_dir: PathBuf,
    /// Render one frame per slot and exit instead of running the scheduler
    pub once: bool,
}

/// One widget entry of a panel file. Everything besides the slot name is a
/// stored control value.
#[derive(Debug, Serialize, Deserialize)]
pub struct WidgetDef {
    pub name: String,
    #[serde(flatten)]
    pub values: ControlValues,
}

pub struct Panel {
    config: PanelConfig,
    catalog: TimezoneCatalog,
    widget: ClockWidget,
    /// Configured clock slots in add order
    slots: Vec<(String, ControlValues)>,
    scheduler: RefreshScheduler,
}

impl Panel {
    pub fn new(config: PanelConfig) -> Self {
        Self {
            config,
            catalog: TimezoneCatalog::new(),
            widget: ClockWidget::new(),
            slots: Vec::new(),
            scheduler: RefreshScheduler::new(),
        }
    }

    /// Add one clock slot. The timezone value may be a catalog index or an
    /// IANA name; names are normalized to index form here.
    pub fn add_slot(&mut self, name: impl Into<String>, mut values: ControlValues) -> Result<()> {
        let name = name.into();
        if let Some(zone) = values.get(CONTROL_TIMEZONE) {
            let index = resolve_zone(&self.catalog, zone)
                .with_context(|| format!("unknown timezone '{}' for widget '{}'", zone, name))?;
            values.set(CONTROL_TIMEZONE, index.to_string());
        }
        self.widget.apply_defaults(&mut values);
        info!("panel slot '{}' configured", name);
        self.slots.push((name, values));
        Ok(())
    }

    /// Load slots from a JSON widget file (an array of widget entries).
    pub fn load_widget_file(&mut self, path: &Path) -> Result<usize> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read widget file: {}", path.display()))?;
        let defs: Vec<WidgetDef> = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse widget file: {}", path.display()))?;
        let count = defs.len();
        for def in defs {
            self.add_slot(def.name, def.values)?;
        }
        Ok(count)
    }

    /// Write the configured slots back out in the widget file format, with
    /// timezones already normalized to index form.
    pub fn save_widget_file(&self, path: &Path) -> Result<()> {
        let defs: Vec<WidgetDef> = self
            .slots
            .iter()
            .map(|(name, values)| WidgetDef {
                name: name.clone(),
                values: values.clone(),
            })
            .collect();
        let text = serde_json::to_string_pretty(&defs).context("Failed to encode widget file")?;
        std::fs::write(path, text)
            .with_context(|| format!("Failed to write widget file: {}", path.display()))?;
        info!("Saved {} widget(s) to {}", defs.len(), path.display());
        Ok(())
    }

    /// Main panel loop: render every slot now, then again on every minute
    /// boundary until the process is stopped.
    pub async fn run(&mut self) -> Result<()> {
        if self.slots.is_empty() {
            anyhow::bail!("no widgets configured");
        }
        std::fs::create_dir_all(&self.config.output_dir).with_context(|| {
            format!(
                "Failed to create output dir {}",
                self.config.output_dir.display()
            )
        })?;

        info!(
            "panel running: {} clock(s) at {}x{}, writing to {}",
            self.slots.len(),
            self.config.width,
            self.config.height,
            self.config.output_dir.display()
        );

        self.render_all()?;
        if self.config.once {
            return Ok(());
        }

        let mut ticks = self.scheduler.subscribe();
        if let Err(e) = self.scheduler.start() {
            // Degraded mode: faces still render on demand, just not per
            // minute. The frames written above are that render.
            warn!("minute refresh unavailable: {}", e);
            return Ok(());
        }
        loop {
            match ticks.recv().await {
                // A lagged receiver still means minutes passed; redraw now.
                Ok(_) | Err(RecvError::Lagged(_)) => self.render_all()?,
                Err(RecvError::Closed) => break,
            }
        }
        self.scheduler.stop();
        Ok(())
    }

    fn render_all(&self) -> Result<()> {
        for (name, values) in &self.slots {
            let face = self
                .widget
                .command_image(values, self.config.width, self.config.height);
            let path = self.config.output_dir.join(format!("{}.png", name));
            face.save_png(&path)
                .with_context(|| format!("Failed to save {}", path.display()))?;
            debug!("rendered '{}' to {}", name, path.display());
        }
        Ok(())
    }
}

/// Interpret a timezone argument as a catalog index or an IANA name.
pub fn resolve_zone(catalog: &TimezoneCatalog, arg: &str) -> Option<usize> {
    let arg = arg.trim();
    if let Ok(index) = arg.parse::<usize>() {
        return (index < catalog.len()).then_some(index);
    }
    catalog.index_of(arg)
}
