//! Slice panels rendered straight to RGB images

// crate modules
use crate::colormap::{Colormap, LookupTable};
use crate::error::{Error, Result};

// ftools modules
use ftools_facies::{Slice2D, Volume};

// standard library
use std::path::Path;

// external crates
use image::{ImageFormat, Rgb, RgbImage};
use itertools::Itertools;
use log::debug;

/// Slices plotted by default, matching a 128 cell deep grid
pub const DEFAULT_SLICES: [usize; 9] = [1, 16, 32, 48, 64, 80, 96, 112, 128];

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

/// Row of z slices through a volume with a discrete colour bar
///
/// Every slice becomes a tile of `nx` rows by `ny` columns, each cell drawn as
/// a `scale` x `scale` block of pixels. Tiles are laid out left to right in
/// the order requested, after a colour bar on the left.
///
/// ```text
/// +----------------------------------------------+
/// | [bar]  [slice 1]  [slice 16]  ...  [slice n] |
/// +----------------------------------------------+
/// ```
///
/// The colour bar has one band per unique code in the volume, lowest code at
/// the bottom. All tiles share a single lookup table of `max_code + 1`
/// colours, so the same code has the same colour in every slice.
///
/// ```rust, no_run
/// # use ftools_plot::{Colormap, SlicePanel};
/// # use ftools_facies::{read_facies_file, Dimensions};
/// let file = read_facies_file("./runs/ti_001.out", Dimensions::default()).unwrap();
///
/// let panel = SlicePanel::builder()
///     .slices(vec![1, 64, 128])
///     .colormap(Colormap::Cividis)
///     .scale(2)
///     .build();
///
/// panel.save(file.volume(), "./runs/ti_001_slices.png").unwrap();
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SlicePanel {
    /// 1-indexed z slices to plot
    pub slices: Vec<usize>,
    /// Colormap sampled for the facies codes
    pub colormap: Colormap,
    /// Pixels per cell edge
    pub scale: u32,
    /// Pixels of background between tiles and around the border
    pub gap: u32,
}

impl SlicePanel {
    /// Start with the default configuration
    pub fn new() -> Self {
        Default::default()
    }

    /// Get an instance of the [SlicePanelBuilder]
    pub fn builder() -> SlicePanelBuilder {
        SlicePanelBuilder::default()
    }

    /// Draw the panel for a volume
    ///
    /// Fails if no slices are set, or with
    /// [IndexOutOfRange](ftools_facies::Error::IndexOutOfRange) for any slice
    /// outside of `1..=nz`.
    pub fn render(&self, volume: &Volume) -> Result<RgbImage> {
        if self.slices.is_empty() {
            return Err(Error::NoSlices);
        }

        let tiles = self
            .slices
            .iter()
            .map(|index| volume.extract_slice(*index))
            .collect::<ftools_facies::Result<Vec<Slice2D>>>()?;

        debug!("Rendering slices {}", self.slices.iter().join(", "));

        let codes = volume.unique_codes();
        let lut = self.colormap.lookup_table(&codes);

        let d = volume.dimensions();
        let scale = self.scale.max(1);
        let tile_height = d.nx as u32 * scale;
        let tile_width = d.ny as u32 * scale;
        let bar_width = Self::bar_width(tile_height);

        let n_tiles = tiles.len() as u32;
        let width = self.gap + bar_width + n_tiles * (self.gap + tile_width) + self.gap;
        let height = tile_height + 2 * self.gap;

        let mut image = RgbImage::from_pixel(width, height, BACKGROUND);
        self.draw_colour_bar(&mut image, &codes, &lut, bar_width, tile_height);

        let mut left = self.gap + bar_width + self.gap;
        for tile in &tiles {
            Self::draw_tile(&mut image, tile, &lut, left, self.gap, scale);
            left += tile_width + self.gap;
        }

        Ok(image)
    }

    /// Draw the panel and write it as a PNG image
    pub fn save<P: AsRef<Path>>(&self, volume: &Volume, path: P) -> Result<()> {
        let image = self.render(volume)?;
        image.save_with_format(path.as_ref(), ImageFormat::Png)?;
        debug!("Written {}", path.as_ref().display());
        Ok(())
    }
}

impl SlicePanel {
    /// Width of the colour bar for a given tile height
    fn bar_width(tile_height: u32) -> u32 {
        (tile_height / 12).max(4)
    }

    /// Stacked bands for every unique code, lowest at the bottom
    fn draw_colour_bar(
        &self,
        image: &mut RgbImage,
        codes: &[i64],
        lut: &LookupTable,
        bar_width: u32,
        bar_height: u32,
    ) {
        if codes.is_empty() {
            return;
        }

        let n = codes.len() as u32;
        for row in 0..bar_height {
            // bands measured from the bottom of the bar
            let band = (((bar_height - 1 - row) * n) / bar_height).min(n - 1);
            let colour = lut.colour(codes[band as usize]);
            for col in 0..bar_width {
                image.put_pixel(self.gap + col, self.gap + row, colour);
            }
        }
    }

    /// Slice rows down the image, columns across
    fn draw_tile(image: &mut RgbImage, tile: &Slice2D, lut: &LookupTable, left: u32, top: u32, scale: u32) {
        for (x, row) in tile.rows().enumerate() {
            for (y, code) in row.iter().enumerate() {
                let colour = lut.colour(*code);
                let (px, py) = (left + y as u32 * scale, top + x as u32 * scale);
                for dy in 0..scale {
                    for dx in 0..scale {
                        image.put_pixel(px + dx, py + dy, colour);
                    }
                }
            }
        }
    }
}

impl Default for SlicePanel {
    fn default() -> Self {
        SlicePanelBuilder::default().build()
    }
}

/// Builder implementation for [SlicePanel] configuration
///
/// Any number of parameters can be set this way (including none), and the
/// final [SlicePanel] is made with [build()](SlicePanelBuilder::build).
///
/// ```rust
/// # use ftools_plot::{Colormap, SlicePanel};
/// let panel = SlicePanel::builder()
///     .slices(vec![1, 2])
///     .colormap(Colormap::Gray)
///     .scale(4)
///     .gap(2)
///     .build();
///
/// assert_eq!(panel.slices, vec![1, 2]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SlicePanelBuilder {
    slices: Vec<usize>,
    colormap: Colormap,
    scale: u32,
    gap: u32,
}

impl SlicePanelBuilder {
    /// Create a new instance of the builder with default parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the [SlicePanel] type
    pub fn build(self) -> SlicePanel {
        SlicePanel {
            slices: self.slices,
            colormap: self.colormap,
            scale: self.scale,
            gap: self.gap,
        }
    }

    /// 1-indexed z slices to plot, in panel order
    pub fn slices(mut self, slices: Vec<usize>) -> Self {
        self.slices = slices;
        self
    }

    /// Colormap for the facies codes, viridis by default
    pub fn colormap(mut self, colormap: Colormap) -> Self {
        self.colormap = colormap;
        self
    }

    /// Pixels per cell edge, at least 1
    pub fn scale(mut self, scale: u32) -> Self {
        self.scale = scale.max(1);
        self
    }

    /// Pixels of white space between tiles
    pub fn gap(mut self, gap: u32) -> Self {
        self.gap = gap;
        self
    }
}

impl Default for SlicePanelBuilder {
    fn default() -> Self {
        Self {
            slices: DEFAULT_SLICES.to_vec(),
            colormap: Colormap::default(),
            scale: 1,
            gap: 8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ftools_facies::Dimensions;

    fn cube() -> Volume {
        Volume::parse((0..8).collect(), Dimensions::new(2, 2, 2)).unwrap()
    }

    fn panel() -> SlicePanel {
        SlicePanel::builder()
            .slices(vec![1, 2])
            .colormap(Colormap::Gray)
            .gap(2)
            .build()
    }

    #[test]
    fn panel_size() {
        let image = panel().render(&cube()).unwrap();
        // gap + bar + 2 * (gap + tile) + gap
        assert_eq!(image.dimensions(), (2 + 4 + 2 * (2 + 2) + 2, 2 + 2 + 2));
    }

    #[test]
    fn tile_pixels() {
        let image = panel().render(&cube()).unwrap();
        let lut = Colormap::Gray.lookup_table(&cube().unique_codes());

        // slice 1 is [[7, 5], [6, 4]], slice 2 is [[3, 1], [2, 0]]
        assert_eq!(*image.get_pixel(8, 2), lut.colour(7));
        assert_eq!(*image.get_pixel(9, 2), lut.colour(5));
        assert_eq!(*image.get_pixel(8, 3), lut.colour(6));
        assert_eq!(*image.get_pixel(9, 3), lut.colour(4));
        assert_eq!(*image.get_pixel(12, 2), lut.colour(3));
        assert_eq!(*image.get_pixel(13, 3), lut.colour(0));

        // gaps stay white
        assert_eq!(*image.get_pixel(0, 0), BACKGROUND);
        assert_eq!(*image.get_pixel(10, 2), BACKGROUND);
    }

    #[test]
    fn scaled_tiles() {
        let panel = SlicePanel::builder().slices(vec![2]).scale(3).gap(0).build();
        let image = panel.render(&cube()).unwrap();
        assert_eq!(image.dimensions(), (4 + 6, 6));

        let lut = Colormap::Viridis.lookup_table(&cube().unique_codes());
        for (px, py) in [(4, 0), (6, 2), (7, 0), (9, 5)] {
            let expected = match (py / 3, (px - 4) / 3) {
                (0, 0) => 3,
                (0, 1) => 1,
                (1, 0) => 2,
                _ => 0,
            };
            assert_eq!(*image.get_pixel(px, py), lut.colour(expected));
        }
    }

    #[test]
    fn colour_bar_bands() {
        let volume = Volume::parse(vec![0, 0, 0, 0, 2, 2, 2, 2], Dimensions::new(2, 2, 2)).unwrap();
        let panel = SlicePanel::builder().slices(vec![1]).scale(4).gap(0).build();
        let image = panel.render(&volume).unwrap();
        let lut = Colormap::Viridis.lookup_table(&[0, 2]);

        // 8 pixel tall bar, code 0 in the bottom half and code 2 on top
        assert_eq!(*image.get_pixel(0, 7), lut.colour(0));
        assert_eq!(*image.get_pixel(0, 0), lut.colour(2));
    }

    #[test]
    fn huge_codes() {
        let codes = vec![0, 0, 0, 0, i64::MAX, i64::MAX, i64::MAX, i64::MAX];
        let volume = Volume::parse(codes, Dimensions::new(2, 2, 2)).unwrap();
        let panel = SlicePanel::builder().slices(vec![1, 2]).gap(0).build();
        let image = panel.render(&volume).unwrap();

        // slice 1 holds the huge code, slice 2 the zeros
        assert_eq!(*image.get_pixel(4, 0), Rgb([0xfd, 0xe7, 0x25]));
        assert_eq!(*image.get_pixel(6, 0), Rgb([0x44, 0x01, 0x54]));
    }

    #[test]
    fn invalid_slices() {
        let panel = SlicePanel::builder().slices(vec![1, 3]).build();
        assert!(matches!(
            panel.render(&cube()),
            Err(Error::Facies(ftools_facies::Error::IndexOutOfRange { index: 3, .. }))
        ));

        let panel = SlicePanel::builder().slices(vec![]).build();
        assert!(matches!(panel.render(&cube()), Err(Error::NoSlices)));
    }
}
