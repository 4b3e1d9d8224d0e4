use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Mils (thousandths of an inch) to PDF points.
fn mils_to_pt(mils: u32) -> f32 {
    mils as f32 * 72.0 / 1000.0
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormatError {
    #[error("resolution must be non-zero in both axes, got {0}x{1} dpi")]
    ZeroResolution(u32, u32),

    #[error("media size must be non-zero, got {0}x{1} mils")]
    EmptyMedia(u32, u32),

    #[error("margins leave no printable area on {0}x{1} mils media")]
    NoPrintableArea(u32, u32),

    #[error("invalid page format JSON: {0}")]
    Json(String),
}

/// The paper the document is laid out on. Dimensions are in mils, portrait.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MediaSize {
    IsoA3,
    #[default]
    IsoA4,
    IsoA5,
    NaLetter,
    NaLegal,
    #[serde(rename_all = "camelCase")]
    Custom { width_mils: u32, height_mils: u32 },
}

impl MediaSize {
    pub fn dimensions_mils(&self) -> (u32, u32) {
        match *self {
            MediaSize::IsoA3 => (11690, 16540),
            MediaSize::IsoA4 => (8270, 11690),
            MediaSize::IsoA5 => (5830, 8270),
            MediaSize::NaLetter => (8500, 11000),
            MediaSize::NaLegal => (8500, 14000),
            MediaSize::Custom { width_mils, height_mils } => (width_mils, height_mils),
        }
    }

    /// Width and height in PDF points.
    pub fn dimensions_pt(&self) -> (f32, f32) {
        let (w, h) = self.dimensions_mils();
        (mils_to_pt(w), mils_to_pt(h))
    }

    /// Parses the short names used on the command line (`a4`, `letter`, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "a3" | "iso_a3" => Some(MediaSize::IsoA3),
            "a4" | "iso_a4" => Some(MediaSize::IsoA4),
            "a5" | "iso_a5" => Some(MediaSize::IsoA5),
            "letter" | "na_letter" => Some(MediaSize::NaLetter),
            "legal" | "na_legal" => Some(MediaSize::NaLegal),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    pub horizontal_dpi: u32,
    pub vertical_dpi: u32,
}

impl Resolution {
    /// The high-DPI pair used for every pipeline job unless overridden.
    pub const HIGH: Resolution = Resolution {
        horizontal_dpi: 1200,
        vertical_dpi: 600,
    };

    pub fn new(horizontal_dpi: u32, vertical_dpi: u32) -> Self {
        Self {
            horizontal_dpi,
            vertical_dpi,
        }
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Resolution::HIGH
    }
}

/// Page margins. Custom values are in mils.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Margins {
    #[default]
    None,
    /// One centimetre on every side.
    Default,
    Custom {
        top: u32,
        left: u32,
        bottom: u32,
        right: u32,
    },
}

impl Margins {
    const DEFAULT_MILS: u32 = 394;

    /// `(top, left, bottom, right)` in mils.
    pub fn as_mils(&self) -> (u32, u32, u32, u32) {
        match *self {
            Margins::None => (0, 0, 0, 0),
            Margins::Default => (
                Self::DEFAULT_MILS,
                Self::DEFAULT_MILS,
                Self::DEFAULT_MILS,
                Self::DEFAULT_MILS,
            ),
            Margins::Custom {
                top,
                left,
                bottom,
                right,
            } => (top, left, bottom, right),
        }
    }

    /// `(top, left, bottom, right)` in points.
    pub fn as_pt(&self) -> (f32, f32, f32, f32) {
        let (t, l, b, r) = self.as_mils();
        (mils_to_pt(t), mils_to_pt(l), mils_to_pt(b), mils_to_pt(r))
    }
}

/// The page configuration handed to the layout stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageFormat {
    #[serde(default)]
    pub media_size: MediaSize,
    #[serde(default)]
    pub resolution: Resolution,
    #[serde(default)]
    pub margins: Margins,
}

impl PageFormat {
    /// ISO A4, 1200x600 dpi, no margins.
    pub fn fixed() -> Self {
        Self {
            media_size: MediaSize::IsoA4,
            resolution: Resolution::HIGH,
            margins: Margins::None,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, FormatError> {
        let format: PageFormat =
            serde_json::from_str(json).map_err(|e| FormatError::Json(e.to_string()))?;
        format.validate()?;
        Ok(format)
    }

    /// The area inside the margins, in points: `(x, y_from_top, width, height)`.
    pub fn printable_area_pt(&self) -> (f32, f32, f32, f32) {
        let (page_w, page_h) = self.media_size.dimensions_pt();
        let (top, left, bottom, right) = self.margins.as_pt();
        (left, top, page_w - left - right, page_h - top - bottom)
    }

    pub fn validate(&self) -> Result<(), FormatError> {
        let Resolution {
            horizontal_dpi,
            vertical_dpi,
        } = self.resolution;
        if horizontal_dpi == 0 || vertical_dpi == 0 {
            return Err(FormatError::ZeroResolution(horizontal_dpi, vertical_dpi));
        }

        let (w, h) = self.media_size.dimensions_mils();
        if w == 0 || h == 0 {
            return Err(FormatError::EmptyMedia(w, h));
        }

        let (top, left, bottom, right) = self.margins.as_mils();
        if left.saturating_add(right) >= w || top.saturating_add(bottom) >= h {
            return Err(FormatError::NoPrintableArea(w, h));
        }
        Ok(())
    }
}
