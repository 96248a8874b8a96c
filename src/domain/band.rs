//! Spectral band groups and output resolution
//!
//! Each [`Band`] names a group of channels the exporter knows how to render
//! (for Sentinel-2: RGB is B4/B3/B2, RE is B7/B6/B5, and so on). Bands map to
//! a [`ResolutionClass`] that decides the pixel size of the exported tile.

use std::fmt;

/// Spectral band group requested from the exporter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Band {
    /// True colour (B4, B3, B2)
    Rgb,
    /// Red edge 1-3 (B7, B6, B5)
    Re,
    /// Red edge 4 (B8A)
    Re4,
    /// Near infrared (B8)
    Nir,
    /// Short-wave infrared 1 (B11)
    Swir1,
    /// Short-wave infrared 2 (B12)
    Swir2,
    /// Colour infrared (B8, B4, B3)
    Ir,
}

impl Band {
    /// Every band, in sweep order
    pub const ALL: [Band; 7] = [
        Band::Rgb,
        Band::Re,
        Band::Re4,
        Band::Nir,
        Band::Swir1,
        Band::Swir2,
        Band::Ir,
    ];

    /// Name passed to the exporter and used as the directory name
    pub fn as_str(&self) -> &'static str {
        match self {
            Band::Rgb => "RGB",
            Band::Re => "RE",
            Band::Re4 => "RE4",
            Band::Nir => "NIR",
            Band::Swir1 => "SWIR1",
            Band::Swir2 => "SWIR2",
            Band::Ir => "IR",
        }
    }

    /// Resolution class used when sweeping bands
    ///
    /// The 10 m Sentinel-2 groups (RGB, NIR, IR) are exported at high
    /// resolution; the 20 m groups at low resolution.
    pub fn resolution_class(&self) -> ResolutionClass {
        match self {
            Band::Rgb | Band::Ir | Band::Nir => ResolutionClass::High,
            _ => ResolutionClass::Low,
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output resolution class of a band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionClass {
    /// 2048 x 2048
    High,
    /// 1024 x 1024
    Low,
}

impl ResolutionClass {
    /// Edge length of the square tile in pixels
    pub fn pixels(&self) -> u32 {
        match self {
            ResolutionClass::High => 2048,
            ResolutionClass::Low => 1024,
        }
    }

    /// Square dimensions for this class
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::square(self.pixels())
    }
}

/// Height and width handed to the exporter
///
/// Values are kept exactly as supplied on the command line. Nothing here
/// checks that they are numeric; the exporter rejects bad values itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dimensions {
    pub height: String,
    pub width: String,
}

impl Dimensions {
    /// Dimensions from raw, unvalidated values
    pub fn new(height: impl Into<String>, width: impl Into<String>) -> Self {
        Self {
            height: height.into(),
            width: width.into(),
        }
    }

    /// Square tile of `pixels` x `pixels`
    pub fn square(pixels: u32) -> Self {
        let px = pixels.to_string();
        Self::new(px.clone(), px)
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.height, self.width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(Band::Rgb, ResolutionClass::High; "rgb is high")]
    #[test_case(Band::Re, ResolutionClass::Low; "re is low")]
    #[test_case(Band::Re4, ResolutionClass::Low; "re4 is low")]
    #[test_case(Band::Nir, ResolutionClass::High; "nir is high")]
    #[test_case(Band::Swir1, ResolutionClass::Low; "swir1 is low")]
    #[test_case(Band::Swir2, ResolutionClass::Low; "swir2 is low")]
    #[test_case(Band::Ir, ResolutionClass::High; "ir is high")]
    fn test_resolution_class(band: Band, expected: ResolutionClass) {
        assert_eq!(band.resolution_class(), expected);
    }

    #[test]
    fn test_sweep_order() {
        let names: Vec<&str> = Band::ALL.iter().map(Band::as_str).collect();
        assert_eq!(
            names,
            vec!["RGB", "RE", "RE4", "NIR", "SWIR1", "SWIR2", "IR"]
        );
    }

    #[test]
    fn test_resolution_dimensions() {
        assert_eq!(ResolutionClass::High.dimensions(), Dimensions::new("2048", "2048"));
        assert_eq!(ResolutionClass::Low.dimensions(), Dimensions::new("1024", "1024"));
    }

    #[test]
    fn test_dimensions_keep_raw_values() {
        let dims = Dimensions::new("12abc", "1024");
        assert_eq!(dims.height, "12abc");
        assert_eq!(dims.to_string(), "12abcx1024");
    }
}
