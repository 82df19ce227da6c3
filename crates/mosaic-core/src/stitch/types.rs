use std::fmt;
use std::str::FromStr;

use image::RgbImage;
use serde::{Deserialize, Serialize};

/// Registration model requested from the stitcher.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StitchMode {
    /// Rotation-dominant photo captures (perspective model).
    #[default]
    #[serde(alias = "panorama")]
    Panorama,
    /// Flatbed or scanner-style captures (affine model).
    #[serde(alias = "scans")]
    Scans,
}

impl StitchMode {
    /// Numeric code accepted on the command line.
    pub fn code(self) -> i32 {
        match self {
            Self::Panorama => 0,
            Self::Scans => 1,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Panorama),
            1 => Some(Self::Scans),
            _ => None,
        }
    }
}

impl fmt::Display for StitchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Panorama => write!(f, "Panorama"),
            Self::Scans => write!(f, "Scans"),
        }
    }
}

impl FromStr for StitchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(code) = s.parse::<i32>() {
            return Self::from_code(code)
                .ok_or_else(|| format!("invalid mode {code} (expected 0 or 1)"));
        }
        match s.to_ascii_lowercase().as_str() {
            "panorama" => Ok(Self::Panorama),
            "scans" => Ok(Self::Scans),
            other => Err(format!(
                "invalid mode '{other}' (expected 0/panorama or 1/scans)"
            )),
        }
    }
}

/// Outcome of a single stitch attempt. Only `Ok` denotes success.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StitchStatus {
    Ok,
    NeedMoreImages,
    HomographyEstFail,
    CameraParamsAdjustFail,
}

impl StitchStatus {
    /// Numeric status code reported to the user.
    pub fn code(self) -> i32 {
        match self {
            Self::Ok => 0,
            Self::NeedMoreImages => 1,
            Self::HomographyEstFail => 2,
            Self::CameraParamsAdjustFail => 3,
        }
    }

    pub fn is_ok(self) -> bool {
        self == Self::Ok
    }
}

impl fmt::Display for StitchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => write!(f, "OK"),
            Self::NeedMoreImages => write!(f, "need more images"),
            Self::HomographyEstFail => write!(f, "image registration failed"),
            Self::CameraParamsAdjustFail => write!(f, "layout adjustment failed"),
        }
    }
}

/// Status plus composite. `pano` is `Some` exactly when `status` is `Ok`.
#[derive(Clone, Debug)]
pub struct StitchOutput {
    pub status: StitchStatus,
    pub pano: Option<RgbImage>,
}

impl StitchOutput {
    pub fn success(pano: RgbImage) -> Self {
        Self {
            status: StitchStatus::Ok,
            pano: Some(pano),
        }
    }

    /// A failed attempt. `status` must not be `Ok`.
    pub fn failure(status: StitchStatus) -> Self {
        debug_assert!(!status.is_ok(), "failure() called with Ok status");
        Self { status, pano: None }
    }

    pub fn into_result(self) -> Result<RgbImage, StitchStatus> {
        match (self.status, self.pano) {
            (StitchStatus::Ok, Some(pano)) => Ok(pano),
            (StitchStatus::Ok, None) => Err(StitchStatus::CameraParamsAdjustFail),
            (status, _) => Err(status),
        }
    }
}
