/// Timezone catalog backed by the bundled IANA database.
/// Identity is positional: widgets persist an index into the database's
/// native enumeration order. That order is stable within a process but not
/// across database updates, so a stored index may resolve to a different
/// zone after an update.
use chrono_tz::{Tz, TZ_VARIANTS};

use crate::error::ConfigError;

/// Zone offered when the timezone control has never been set.
const DEFAULT_ZONE: &str = "UTC";

#[derive(Debug, Clone, Copy)]
pub struct TimezoneCatalog;

impl TimezoneCatalog {
    pub fn new() -> Self {
        Self
    }

    /// Number of zones in the current database.
    pub fn len(&self) -> usize {
        TZ_VARIANTS.len()
    }

    pub fn is_empty(&self) -> bool {
        TZ_VARIANTS.is_empty()
    }

    /// Enumerate `(index, zone name)` pairs in database order. The listing
    /// is rebuilt from the database on every call; nothing is cached.
    pub fn entries(&self) -> impl Iterator<Item = (usize, &'static str)> {
        TZ_VARIANTS.iter().enumerate().map(|(i, tz)| (i, tz.name()))
    }

    /// Resolve a persisted index against the live database.
    pub fn resolve(&self, index: usize) -> Result<Tz, ConfigError> {
        TZ_VARIANTS
            .get(index)
            .copied()
            .ok_or(ConfigError::TimezoneOutOfRange {
                index,
                len: TZ_VARIANTS.len(),
            })
    }

    /// Reverse lookup by IANA name.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        TZ_VARIANTS.iter().position(|tz| tz.name() == name)
    }

    /// Index offered as the default timezone. Resolved by name on every
    /// call so it stays correct if the database ordering shifts.
    pub fn default_index(&self) -> usize {
        self.index_of(DEFAULT_ZONE).unwrap_or(0)
    }
}

impl Default for TimezoneCatalog {
    fn default() -> Self {
        Self::new()
    }
}
