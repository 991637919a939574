use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::projection::ProjectionWindow;

/// Projection settings the calling service persists and passes down per
/// request. The core itself never touches disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectionSettings {
    /// How many years past the reference instant projections cover.
    #[serde(default = "ProjectionSettings::default_horizon_years")]
    pub horizon_years: u32,
}

impl Default for ProjectionSettings {
    fn default() -> Self {
        Self {
            horizon_years: Self::default_horizon_years(),
        }
    }
}

impl ProjectionSettings {
    fn default_horizon_years() -> u32 {
        5
    }

    /// The standard projection window measured from `reference`.
    pub fn window_from(&self, reference: NaiveDateTime) -> ProjectionWindow {
        ProjectionWindow::horizon(reference, self.horizon_years)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let settings: ProjectionSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, ProjectionSettings::default());
        assert_eq!(settings.horizon_years, 5);
    }
}
