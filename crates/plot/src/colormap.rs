//! Discrete colormaps for integer facies codes

// crate modules
use crate::error::{Error, Result};

// standard library
use std::collections::BTreeMap;
use std::str::FromStr;

// external crates
use clap::ValueEnum;
use image::Rgb;
use palette::{Mix, Srgb};

/// Named colormaps, sampled into a fixed number of levels for plotting
///
/// Each map is defined by evenly spaced colour stops and interpolated linearly
/// between them, so the first and last levels are always the end colours.
///
/// ```rust
/// # use ftools_plot::Colormap;
/// let colormap: Colormap = "magma".parse().unwrap();
/// assert_eq!(colormap, Colormap::Magma);
/// assert!("jet".parse::<Colormap>().is_err());
/// ```
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, ValueEnum)]
pub enum Colormap {
    /// Perceptually uniform purple to yellow
    #[default]
    Viridis,
    /// Perceptually uniform blue to yellow through pink
    Plasma,
    /// Black to pale yellow through red
    Inferno,
    /// Black to pale pink through purple
    Magma,
    /// Colour vision deficiency friendly blue to yellow
    Cividis,
    /// Black to white
    Gray,
}

impl Colormap {
    /// Sample `levels` colours evenly across the map
    ///
    /// A single level is the first colour of the map.
    pub fn sample(&self, levels: usize) -> Vec<Rgb<u8>> {
        (0..levels)
            .map(|i| match levels {
                1 => 0.0,
                _ => i as f32 / (levels - 1) as f32,
            })
            .map(|t| self.at(t))
            .collect()
    }

    /// Lookup table for the given codes
    ///
    /// Colours are spread over `0..=max_code` as if the map had one level per
    /// code, but only the codes passed in are stored.
    pub fn lookup_table(&self, codes: &[i64]) -> LookupTable {
        let max_code = codes.iter().max().copied().unwrap_or_default().max(0);
        let colours = codes
            .iter()
            .map(|code| (*code, self.at(level_fraction(*code, max_code))))
            .collect();

        LookupTable {
            colormap: *self,
            max_code,
            colours,
        }
    }

    /// Colour at fraction `t` along the map, clamped to `[0, 1]`
    pub fn at(&self, t: f32) -> Rgb<u8> {
        let stops = self.stops();
        let scaled = t.clamp(0.0, 1.0) * (stops.len() - 1) as f32;
        let index = (scaled.floor() as usize).min(stops.len() - 2);

        let colour = to_srgb(&stops[index])
            .mix(to_srgb(&stops[index + 1]), scaled - index as f32)
            .into_format::<u8>();
        Rgb([colour.red, colour.green, colour.blue])
    }

    /// Evenly spaced colour stops
    fn stops(&self) -> &'static [[u8; 3]] {
        match self {
            Colormap::Viridis => &VIRIDIS,
            Colormap::Plasma => &PLASMA,
            Colormap::Inferno => &INFERNO,
            Colormap::Magma => &MAGMA,
            Colormap::Cividis => &CIVIDIS,
            Colormap::Gray => &GRAY,
        }
    }
}

impl FromStr for Colormap {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "viridis" => Ok(Colormap::Viridis),
            "plasma" => Ok(Colormap::Plasma),
            "inferno" => Ok(Colormap::Inferno),
            "magma" => Ok(Colormap::Magma),
            "cividis" => Ok(Colormap::Cividis),
            "gray" | "grey" => Ok(Colormap::Gray),
            _ => Err(Error::UnknownColormap(s.to_string())),
        }
    }
}

impl std::fmt::Display for Colormap {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            Colormap::Viridis => "viridis",
            Colormap::Plasma => "plasma",
            Colormap::Inferno => "inferno",
            Colormap::Magma => "magma",
            Colormap::Cividis => "cividis",
            Colormap::Gray => "gray",
        };
        write!(f, "{name}")
    }
}

/// Fixed colour for every facies code
///
/// Negative codes take the first colour and anything past the largest code
/// takes the last. Codes missing from the table are interpolated on demand.
///
/// ```rust
/// # use ftools_plot::Colormap;
/// let lut = Colormap::Gray.lookup_table(&[0, 2]);
/// assert_eq!(lut.len(), 2);
/// assert_eq!(lut.colour(-1), lut.colour(0));
/// assert_eq!(lut.colour(0).0, [0, 0, 0]);
/// assert_eq!(lut.colour(2).0, [255, 255, 255]);
///
/// // any code fits, however large
/// let lut = Colormap::Gray.lookup_table(&[0, i64::MAX]);
/// assert_eq!(lut.colour(i64::MAX).0, [255, 255, 255]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTable {
    colormap: Colormap,
    max_code: i64,
    colours: BTreeMap<i64, Rgb<u8>>,
}

impl LookupTable {
    /// Colour for a facies code
    pub fn colour(&self, code: i64) -> Rgb<u8> {
        match self.colours.get(&code) {
            Some(colour) => *colour,
            None => self.colormap.at(level_fraction(code, self.max_code)),
        }
    }

    /// Number of codes in the table
    pub fn len(&self) -> usize {
        self.colours.len()
    }

    /// True if the table has no codes
    pub fn is_empty(&self) -> bool {
        self.colours.is_empty()
    }

    /// Codes and colours in ascending code order
    pub fn iter(&self) -> impl Iterator<Item = (i64, Rgb<u8>)> + '_ {
        self.colours.iter().map(|(code, colour)| (*code, *colour))
    }
}

/// Position of `code` along a map with one level for each of `0..=max_code`
fn level_fraction(code: i64, max_code: i64) -> f32 {
    match max_code {
        m if m <= 0 => 0.0,
        m => code.clamp(0, m) as f32 / m as f32,
    }
}

fn to_srgb(stop: &[u8; 3]) -> Srgb<f32> {
    Srgb::new(stop[0], stop[1], stop[2]).into_format::<f32>()
}

const VIRIDIS: [[u8; 3]; 5] = [
    [0x44, 0x01, 0x54],
    [0x3b, 0x52, 0x8b],
    [0x21, 0x91, 0x8c],
    [0x5e, 0xc9, 0x62],
    [0xfd, 0xe7, 0x25],
];

const PLASMA: [[u8; 3]; 5] = [
    [0x0d, 0x08, 0x87],
    [0x7e, 0x03, 0xa8],
    [0xcc, 0x47, 0x78],
    [0xf8, 0x95, 0x40],
    [0xf0, 0xf9, 0x21],
];

const INFERNO: [[u8; 3]; 5] = [
    [0x00, 0x00, 0x04],
    [0x57, 0x10, 0x6e],
    [0xbc, 0x37, 0x54],
    [0xf9, 0x8e, 0x09],
    [0xfc, 0xff, 0xa4],
];

const MAGMA: [[u8; 3]; 5] = [
    [0x00, 0x00, 0x04],
    [0x51, 0x12, 0x7c],
    [0xb7, 0x37, 0x79],
    [0xfc, 0x89, 0x61],
    [0xfc, 0xfd, 0xbf],
];

const CIVIDIS: [[u8; 3]; 5] = [
    [0x00, 0x22, 0x4e],
    [0x41, 0x4d, 0x6b],
    [0x7c, 0x7b, 0x78],
    [0xbc, 0xaf, 0x6f],
    [0xfe, 0xe8, 0x38],
];

const GRAY: [[u8; 3]; 2] = [[0x00, 0x00, 0x00], [0xff, 0xff, 0xff]];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_colours() {
        let colours = Colormap::Viridis.sample(8);
        assert_eq!(colours.len(), 8);
        assert_eq!(colours[0], Rgb([0x44, 0x01, 0x54]));
        assert_eq!(colours[7], Rgb([0xfd, 0xe7, 0x25]));
    }

    #[test]
    fn stops_are_hit_exactly() {
        let colours = Colormap::Plasma.sample(5);
        for (colour, stop) in colours.iter().zip(PLASMA.iter()) {
            assert_eq!(colour.0, *stop);
        }
    }

    #[test]
    fn gray_midpoint() {
        let mid = Colormap::Gray.at(0.5);
        assert!(mid.0.iter().all(|c| (127..=128).contains(c)));
    }

    #[test]
    fn single_level() {
        assert_eq!(Colormap::Magma.sample(1), vec![Rgb([0, 0, 4])]);
        assert_eq!(Colormap::Magma.lookup_table(&[0]).len(), 1);

        let lut = Colormap::Magma.lookup_table(&[-3]);
        assert_eq!(lut.len(), 1);
        assert_eq!(lut.colour(-3), Rgb([0, 0, 4]));
        assert!(Colormap::Magma.lookup_table(&[]).is_empty());
    }

    #[test]
    fn lookup_matches_sampling() {
        let codes = (0..8).collect::<Vec<i64>>();
        let lut = Colormap::Viridis.lookup_table(&codes);
        let sampled = Colormap::Viridis.sample(8);
        for (code, colour) in lut.iter() {
            assert_eq!(colour, sampled[code as usize]);
        }
    }

    #[test]
    fn lookup_clamps() {
        let lut = Colormap::Cividis.lookup_table(&[0, 1, 3]);
        assert_eq!(lut.len(), 3);
        assert_eq!(lut.colour(-5), lut.colour(0));
        assert_eq!(lut.colour(99), lut.colour(3));
        assert_eq!(lut.colour(0), Rgb([0x00, 0x22, 0x4e]));
        assert_eq!(lut.colour(3), Rgb([0xfe, 0xe8, 0x38]));

        // missing codes sit between their neighbours
        assert_eq!(lut.colour(2), Colormap::Cividis.sample(4)[2]);
    }

    #[test]
    fn lookup_huge_codes() {
        let lut = Colormap::Viridis.lookup_table(&[i64::MIN, 0, 4_000_000_000, i64::MAX]);
        assert_eq!(lut.len(), 4);
        assert_eq!(lut.colour(i64::MIN), Rgb([0x44, 0x01, 0x54]));
        assert_eq!(lut.colour(0), Rgb([0x44, 0x01, 0x54]));
        assert_eq!(lut.colour(i64::MAX), Rgb([0xfd, 0xe7, 0x25]));
    }

    #[test]
    fn names() {
        for colormap in Colormap::value_variants() {
            let parsed: Colormap = colormap.to_string().parse().unwrap();
            assert_eq!(parsed, *colormap);
        }
        assert_eq!("Grey".parse::<Colormap>().unwrap(), Colormap::Gray);
        assert!(matches!(
            "rainbow".parse::<Colormap>(),
            Err(Error::UnknownColormap(_))
        ));
    }
}
