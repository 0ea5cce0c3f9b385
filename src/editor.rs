/// Editor-facing surface: which controls exist, what options each listbox
/// offers, and which defaults apply to never-set controls.
use crate::catalog::TimezoneCatalog;
use crate::config::{TimeFormat, CONTROL_DISPLAY_NAME, CONTROL_FORMAT, CONTROL_TIMEZONE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    Textbox,
    Listbox,
}

/// Declarative description of one editor control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub kind: ControlKind,
    pub required: bool,
}

/// One selectable entry of a listbox control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// Persisted value (a decimal index string).
    pub value: String,
    /// Text shown to the user.
    pub label: String,
}

impl SelectOption {
    fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// The three controls of the clock editor, in declaration order.
pub const CONTROLS: [ControlSpec; 3] = [
    ControlSpec {
        name: CONTROL_DISPLAY_NAME,
        label: "Display Name",
        description: "Optional: extra text to display above the time.",
        kind: ControlKind::Textbox,
        required: false,
    },
    ControlSpec {
        name: CONTROL_TIMEZONE,
        label: "Timezone",
        description: "The timezone to show the time in.",
        kind: ControlKind::Listbox,
        required: true,
    },
    ControlSpec {
        name: CONTROL_FORMAT,
        label: "Display Format",
        description: "The format to display the time in.",
        kind: ControlKind::Listbox,
        required: true,
    },
];

/// Options for a listbox control. Textboxes and unknown controls have none.
pub fn options_for(catalog: &TimezoneCatalog, control: &str) -> Vec<SelectOption> {
    match control {
        CONTROL_TIMEZONE => list_timezones(catalog),
        CONTROL_FORMAT => list_formats(),
        _ => Vec::new(),
    }
}

/// One option per zone, in the database's enumeration order. An empty
/// catalog yields an empty list; the editor session itself never fails.
pub fn list_timezones(catalog: &TimezoneCatalog) -> Vec<SelectOption> {
    catalog
        .entries()
        .map(|(index, name)| SelectOption::new(index.to_string(), name))
        .collect()
}

/// Exactly two options in fixed order.
pub fn list_formats() -> Vec<SelectOption> {
    [TimeFormat::TwelveHour, TimeFormat::TwentyFourHour]
        .into_iter()
        .map(|format| SelectOption::new(format.wire_index().to_string(), format.label()))
        .collect()
}

/// Default for a control that has never been set. Returns `None` when the
/// stored value must be left alone (already set, or no default exists).
pub fn default_for(
    catalog: &TimezoneCatalog,
    control: &str,
    current: Option<&str>,
) -> Option<String> {
    if current.is_some_and(|value| !value.is_empty()) {
        return None;
    }
    match control {
        CONTROL_TIMEZONE => Some(catalog.default_index().to_string()),
        CONTROL_FORMAT => Some(TimeFormat::default().wire_index().to_string()),
        _ => None,
    }
}
