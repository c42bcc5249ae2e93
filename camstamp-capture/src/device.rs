//! Facing-mode and device description types

use serde::{Deserialize, Serialize};

/// Logical selection of front- vs rear-facing camera
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacingMode {
    /// Front (selfie) camera, the web `user` constraint
    Front,
    /// Rear camera, the web `environment` constraint
    Back,
}

impl Default for FacingMode {
    fn default() -> Self {
        Self::Back
    }
}

impl FacingMode {
    /// The other facing mode
    pub fn toggled(&self) -> Self {
        match self {
            FacingMode::Front => FacingMode::Back,
            FacingMode::Back => FacingMode::Front,
        }
    }

    /// Short lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            FacingMode::Front => "front",
            FacingMode::Back => "back",
        }
    }

    /// Equivalent media-capture `facingMode` constraint value
    pub fn constraint(&self) -> &'static str {
        match self {
            FacingMode::Front => "user",
            FacingMode::Back => "environment",
        }
    }

    /// Guess a facing mode from a device name, if the name hints at one
    pub fn guess_from_name(name: &str) -> Option<Self> {
        let lower = name.to_lowercase();
        const FRONT_HINTS: [&str; 3] = ["front", "user", "integrated"];
        const BACK_HINTS: [&str; 3] = ["back", "rear", "environment"];
        if FRONT_HINTS.iter().any(|hint| lower.contains(hint)) {
            Some(FacingMode::Front)
        } else if BACK_HINTS.iter().any(|hint| lower.contains(hint)) {
            Some(FacingMode::Back)
        } else {
            None
        }
    }

    /// Whether a device name matches this facing mode
    pub fn matches_name(&self, name: &str) -> bool {
        Self::guess_from_name(name) == Some(*self)
    }
}

impl std::fmt::Display for FacingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Description of an enumerable camera device
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraDevice {
    /// Backend device identifier
    pub id: String,
    /// Human-readable device name
    pub name: String,
    /// Facing mode guessed from the device name, if any
    pub facing: Option<FacingMode>,
}
