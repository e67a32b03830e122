use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{Colormap, OutputFormat};

pub const DEFAULT_OUTPUT: &str = "contact.png";
pub const DEFAULT_WIDTH: u32 = 3200;
pub const DEFAULT_HEIGHT: u32 = 2400;
/// Largest canvas side, the JPEG frame limit.
pub const MAX_DIMENSION: u32 = 65_535;
/// Largest canvas area in pixels (about 768 MiB of RGB).
pub const MAX_PIXELS: u64 = 1 << 28;

/// Plotting parameters suitable for config files and presets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotParams {
    /// None means infer from the output extension
    pub format: Option<OutputFormat>,
    pub colormap: Colormap,
    pub width: u32,
    pub height: u32,
    /// Lower end of the color scale; None means data minimum
    pub vmin: Option<f64>,
    /// Upper end of the color scale; None means data maximum
    pub vmax: Option<f64>,
    pub x_label: String,
    pub y_label: String,
    pub colorbar_label: String,
    /// If true, write `<output>.json` next to the image
    pub metadata: bool,
}

impl Default for PlotParams {
    fn default() -> Self {
        Self {
            format: None,
            colormap: Colormap::Inferno,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            vmin: None,
            vmax: None,
            x_label: "selection A".to_string(),
            y_label: "selection B".to_string(),
            colorbar_label: "contact percentage [%]".to_string(),
            metadata: false,
        }
    }
}

impl PlotParams {
    /// Load a preset from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let params = serde_json::from_str(&text)?;
        Ok(params)
    }

    /// Resolve the output format for `output`, falling back to PNG.
    pub fn resolve_format(&self, output: &Path) -> OutputFormat {
        self.format
            .or_else(|| OutputFormat::from_path(output))
            .unwrap_or_default()
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 {
            return Err(Error::InvalidArgument {
                arg: "width",
                value: self.width.to_string(),
            });
        }
        if self.height == 0 {
            return Err(Error::InvalidArgument {
                arg: "height",
                value: self.height.to_string(),
            });
        }
        for (arg, side) in [("width", self.width), ("height", self.height)] {
            if side > MAX_DIMENSION {
                return Err(Error::InvalidArgument {
                    arg,
                    value: format!("{} (maximum is {})", side, MAX_DIMENSION),
                });
            }
        }
        if u64::from(self.width) * u64::from(self.height) > MAX_PIXELS {
            return Err(Error::InvalidArgument {
                arg: "size",
                value: format!(
                    "{}x{} (more than {} pixels)",
                    self.width, self.height, MAX_PIXELS
                ),
            });
        }
        if let (Some(lo), Some(hi)) = (self.vmin, self.vmax) {
            if lo > hi {
                return Err(Error::InvalidArgument {
                    arg: "vmin",
                    value: format!("{} (greater than vmax {})", lo, hi),
                });
            }
        }
        for (arg, value) in [("vmin", self.vmin), ("vmax", self.vmax)] {
            if let Some(v) = value {
                if !v.is_finite() {
                    return Err(Error::InvalidArgument {
                        arg,
                        value: v.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}
