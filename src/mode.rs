use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TourError;

/// Camera mode, one per navigation destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraMode {
    /// Follow the car. No scripted transition runs in this mode.
    #[default]
    Home,
    Education,
    Experience,
    Projects,
}

impl CameraMode {
    pub const ALL: [CameraMode; 4] = [
        CameraMode::Home,
        CameraMode::Education,
        CameraMode::Experience,
        CameraMode::Projects,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CameraMode::Home => "home",
            CameraMode::Education => "education",
            CameraMode::Experience => "experience",
            CameraMode::Projects => "projects",
        }
    }

    /// Whether the camera tracks the agent directly instead of running a tween
    pub fn is_tracking(self) -> bool {
        matches!(self, CameraMode::Home)
    }
}

impl fmt::Display for CameraMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CameraMode {
    type Err = TourError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        CameraMode::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| TourError::UnknownMode(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_mode_by_name() {
        for mode in CameraMode::ALL {
            assert_eq!(mode.name().parse::<CameraMode>().unwrap(), mode);
        }
    }

    #[test]
    fn parsing_ignores_case_and_padding() {
        assert_eq!(" Education ".parse::<CameraMode>().unwrap(), CameraMode::Education);
    }

    #[test]
    fn unknown_mode_is_rejected() {
        let err = "contact".parse::<CameraMode>().unwrap_err();
        assert!(matches!(err, TourError::UnknownMode(ref s) if s == "contact"));
    }

    #[test]
    fn home_is_default_and_tracking() {
        assert_eq!(CameraMode::default(), CameraMode::Home);
        assert!(CameraMode::Home.is_tracking());
        assert!(!CameraMode::Experience.is_tracking());
    }
}
