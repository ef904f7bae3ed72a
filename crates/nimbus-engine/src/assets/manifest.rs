use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};

use crate::error::AssetError;

/// Asset manifest describing the images and sounds a scene needs.
/// Loaded from a JSON file before the scene starts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetManifest {
    /// Named images.
    #[serde(default)]
    pub images: BTreeMap<String, ImageDescriptor>,
    /// Named audio clips.
    #[serde(default)]
    pub sounds: BTreeMap<String, SoundDescriptor>,
}

/// Describes a single image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageDescriptor {
    /// Path relative to the page (e.g., "images/cloud.png").
    pub path: String,
    /// Display width override; the intrinsic width is used when absent.
    #[serde(default)]
    pub width: Option<f32>,
    /// Display height override; the intrinsic height is used when absent.
    #[serde(default)]
    pub height: Option<f32>,
}

/// Describes an audio asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoundDescriptor {
    /// Relative path to the audio file.
    pub path: String,
}

impl AssetManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, AssetError> {
        Ok(serde_json::from_str(json)?)
    }
}
