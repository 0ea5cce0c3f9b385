use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use deck_clock::config::{
    ControlValues, TimeFormat, CONTROL_DISPLAY_NAME, CONTROL_FORMAT, CONTROL_TIMEZONE,
};
use deck_clock::core::panel::{Panel, PanelConfig};
use deck_clock::TimezoneCatalog;

#[derive(Parser, Debug)]
#[command(name = "deck-clock", about = "World clock faces for button decks")]
struct Args {
    /// Button face width in pixels
    #[arg(long, default_value_t = 90)]
    width: u32,

    /// Button face height in pixels
    #[arg(long, default_value_t = 90)]
    height: u32,

    /// Label text shown above the time
    #[arg(short, long)]
    label: Option<String>,

    /// Timezone as an IANA name or catalog index
    #[arg(short, long, default_value = "UTC")]
    zone: String,

    /// Time format: 12 or 24
    #[arg(short, long, default_value = "24")]
    format: String,

    /// JSON widget file describing multiple clocks
    #[arg(long)]
    widgets: Option<PathBuf>,

    /// Write the configured clocks back out as a JSON widget file
    #[arg(long)]
    save_widgets: Option<PathBuf>,

    /// Directory rendered faces are written to
    #[arg(long, default_value = "frames")]
    output_dir: PathBuf,

    /// Render one frame per clock and exit
    #[arg(long)]
    once: bool,

    /// List all timezones with their catalog indices and exit
    #[arg(long)]
    list_zones: bool,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_level.parse().unwrap_or_default()),
        )
        .init();

    if args.list_zones {
        let catalog = TimezoneCatalog::new();
        for (index, name) in catalog.entries() {
            println!("{:4}  {}", index, name);
        }
        return Ok(());
    }

    info!(
        "deck-clock v{} starting ({}x{} faces)",
        env!("CARGO_PKG_VERSION"),
        args.width,
        args.height
    );

    let mut panel = Panel::new(PanelConfig {
        width: args.width,
        height: args.height,
        output_dir: args.output_dir.clone(),
        once: args.once,
    });

    if let Some(widgets) = &args.widgets {
        let count = panel.load_widget_file(widgets)?;
        info!("Loaded {} clock(s) from {}", count, widgets.display());
    } else {
        let format: TimeFormat = args
            .format
            .parse()
            .with_context(|| format!("invalid time format '{}'", args.format))?;
        let mut values = ControlValues::new();
        if let Some(label) = &args.label {
            values.set(CONTROL_DISPLAY_NAME, label.as_str());
        }
        values.set(CONTROL_TIMEZONE, args.zone.as_str());
        values.set(CONTROL_FORMAT, format.wire_index().to_string());
        panel.add_slot("clock", values)?;
    }

    if let Some(path) = &args.save_widgets {
        panel.save_widget_file(path)?;
    }

    panel.run().await?;

    info!("deck-clock shutdown");
    Ok(())
}
