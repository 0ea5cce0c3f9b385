/// Clock face renderer.
/// Draws the current time of a configured timezone onto a button surface,
/// with an optional label band across the top.
use chrono::{DateTime, Utc};
use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_6X10};
use embedded_graphics::mono_font::MonoFont;
use tiny_skia::Pixmap;

use crate::catalog::TimezoneCatalog;
use crate::config::ClockConfig;
use crate::error::RenderError;
use crate::render::canvas::{text_width, ButtonCanvas};

/// Height of the header band reserved for the label when one is set.
pub const LABEL_BAND_HEIGHT: u32 = 20;

/// Shown instead of a time when the configuration cannot be rendered.
const PLACEHOLDER_TEXT: &str = "--:--";

pub struct ClockRenderer {
    catalog: TimezoneCatalog,
    label_font: &'static MonoFont<'static>,
    time_font: &'static MonoFont<'static>,
}

impl ClockRenderer {
    pub fn new(catalog: TimezoneCatalog) -> Self {
        Self {
            catalog,
            label_font: &FONT_6X10,
            time_font: &FONT_10X20,
        }
    }

    /// Render the configured clock at the current wall time.
    pub fn render(
        &self,
        config: &ClockConfig,
        width: u32,
        height: u32,
    ) -> Result<Pixmap, RenderError> {
        self.render_at(config, Utc::now(), width, height)
    }

    /// Render the configured clock as it would appear at `instant`.
    pub fn render_at(
        &self,
        config: &ClockConfig,
        instant: DateTime<Utc>,
        width: u32,
        height: u32,
    ) -> Result<Pixmap, RenderError> {
        let zone = self.catalog.resolve(config.timezone_index)?;
        let local = instant.with_timezone(&zone);
        let time_text = config.format.time_text(&local);

        let mut canvas = ButtonCanvas::new(width, height)?;

        // A whitespace-only label does not reserve the header band.
        let label = config
            .label
            .as_deref()
            .map(str::trim)
            .filter(|label| !label.is_empty());
        let time_band_top = match label {
            Some(label) => {
                canvas.draw_text_centered(label, self.label_font, 0, LABEL_BAND_HEIGHT);
                LABEL_BAND_HEIGHT as i32
            }
            None => 0,
        };

        let time_band_height = height.saturating_sub(time_band_top as u32);
        let lines = split_for_width(&time_text, self.time_font, width);
        canvas.draw_lines_centered(&lines, self.time_font, time_band_top, time_band_height);

        Ok(canvas.into_pixmap())
    }

    /// Fallback face for configurations that cannot produce a time.
    pub fn render_placeholder(&self, width: u32, height: u32) -> Pixmap {
        let mut canvas = match ButtonCanvas::new(width, height) {
            Ok(canvas) => canvas,
            // Degenerate dimensions, hand back the smallest valid surface.
            Err(_) => return Pixmap::new(1, 1).unwrap(),
        };
        canvas.draw_text_centered(PLACEHOLDER_TEXT, self.time_font, 0, height);
        canvas.into_pixmap()
    }
}

/// Split a time string onto two lines when it is wider than the button.
/// Twelve-hour times break before the AM/PM suffix.
fn split_for_width<'a>(text: &'a str, font: &MonoFont<'_>, width: u32) -> Vec<&'a str> {
    if text_width(font, text) <= width {
        return vec![text];
    }
    match text.rsplit_once(' ') {
        Some((time, suffix)) => vec![time, suffix],
        None => vec![text],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TimeFormat;
    use crate::error::ConfigError;
    use chrono::TimeZone;

    /// 2024-06-15 13:45 UTC: both London and New York are on summer time.
    fn fixed_instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 13, 45, 0).unwrap()
    }

    fn config(zone: &str, format: TimeFormat, label: Option<&str>) -> ClockConfig {
        let catalog = TimezoneCatalog::new();
        ClockConfig {
            label: label.map(String::from),
            timezone_index: catalog.index_of(zone).unwrap(),
            format,
        }
    }

    fn row_has_ink(pixmap: &Pixmap, y: u32) -> bool {
        let row = y as usize * pixmap.width() as usize * 4;
        pixmap.data()[row..row + pixmap.width() as usize * 4]
            .chunks(4)
            .any(|p| p[0] != 0 || p[1] != 0 || p[2] != 0)
    }

    fn has_ink(pixmap: &Pixmap) -> bool {
        (0..pixmap.height()).any(|y| row_has_ink(pixmap, y))
    }

    #[test]
    fn test_unlabeled_render_leaves_header_empty() {
        let renderer = ClockRenderer::new(TimezoneCatalog::new());
        let config = config("Europe/London", TimeFormat::TwentyFourHour, None);
        let face = renderer
            .render_at(&config, fixed_instant(), 90, 90)
            .unwrap();
        assert!(has_ink(&face));
        for y in 0..LABEL_BAND_HEIGHT {
            assert!(!row_has_ink(&face, y), "row {y} should be background");
        }
    }

    #[test]
    fn test_labeled_render_uses_header_band() {
        let renderer = ClockRenderer::new(TimezoneCatalog::new());
        let config = config("Europe/London", TimeFormat::TwentyFourHour, Some("London"));
        let face = renderer
            .render_at(&config, fixed_instant(), 90, 90)
            .unwrap();
        let header_ink = (0..LABEL_BAND_HEIGHT).any(|y| row_has_ink(&face, y));
        assert!(header_ink, "label should be drawn in the header band");
        // The time line moves down with the band: centered in 20..90 it
        // starts at row 45, leaving the rows just below the band empty.
        for y in LABEL_BAND_HEIGHT..45 {
            assert!(!row_has_ink(&face, y), "row {y} should be background");
        }
        let time_ink = (45..90).any(|y| row_has_ink(&face, y));
        assert!(time_ink, "time should be drawn below the band");
    }

    #[test]
    fn test_whitespace_label_matches_absent_label() {
        let renderer = ClockRenderer::new(TimezoneCatalog::new());
        let blank = config("Europe/London", TimeFormat::TwentyFourHour, Some("   "));
        let none = config("Europe/London", TimeFormat::TwentyFourHour, None);
        let a = renderer.render_at(&blank, fixed_instant(), 90, 90).unwrap();
        let b = renderer.render_at(&none, fixed_instant(), 90, 90).unwrap();
        assert_eq!(a.data(), b.data());
    }

    #[test]
    fn test_same_inputs_render_identical_faces() {
        let renderer = ClockRenderer::new(TimezoneCatalog::new());
        let config = config("America/New_York", TimeFormat::TwelveHour, Some("NYC"));
        let a = renderer.render_at(&config, fixed_instant(), 90, 90).unwrap();
        let b = renderer.render_at(&config, fixed_instant(), 90, 90).unwrap();
        assert_eq!(a.data(), b.data());
    }

    #[test]
    fn test_narrow_button_wraps_12h_time() {
        let renderer = ClockRenderer::new(TimezoneCatalog::new());
        let config = config("Europe/London", TimeFormat::TwelveHour, None);
        // "2:45 PM" is 70 px in the time font, wider than the button.
        let face = renderer
            .render_at(&config, fixed_instant(), 60, 90)
            .unwrap();
        assert!(has_ink(&face));
    }

    #[test]
    fn test_out_of_range_zone_is_config_error() {
        let catalog = TimezoneCatalog::new();
        let renderer = ClockRenderer::new(catalog);
        let config = ClockConfig {
            label: None,
            timezone_index: catalog.len(),
            format: TimeFormat::TwentyFourHour,
        };
        let err = renderer
            .render_at(&config, fixed_instant(), 90, 90)
            .unwrap_err();
        assert!(matches!(
            err,
            RenderError::Config(ConfigError::TimezoneOutOfRange { .. })
        ));
    }

    #[test]
    fn test_zero_width_is_surface_error() {
        let renderer = ClockRenderer::new(TimezoneCatalog::new());
        let config = config("Europe/London", TimeFormat::TwentyFourHour, None);
        let err = renderer
            .render_at(&config, fixed_instant(), 0, 90)
            .unwrap_err();
        assert!(matches!(err, RenderError::Surface { width: 0, .. }));
    }

    #[test]
    fn test_placeholder_draws_something() {
        let renderer = ClockRenderer::new(TimezoneCatalog::new());
        let face = renderer.render_placeholder(90, 90);
        assert!(has_ink(&face));
        // Unrenderable dimensions still produce a surface.
        let fallback = renderer.render_placeholder(0, 0);
        assert_eq!((fallback.width(), fallback.height()), (1, 1));
    }

    #[test]
    fn test_split_keeps_text_that_fits() {
        assert_eq!(split_for_width("14:45", &FONT_10X20, 50), vec!["14:45"]);
        assert_eq!(split_for_width("2:45 PM", &FONT_10X20, 90), vec!["2:45 PM"]);
    }

    #[test]
    fn test_split_breaks_before_suffix() {
        assert_eq!(
            split_for_width("2:45 PM", &FONT_10X20, 60),
            vec!["2:45", "PM"]
        );
        // No space to break at: the text is clipped rather than split.
        assert_eq!(split_for_width("14:45", &FONT_10X20, 30), vec!["14:45"]);
    }
}
