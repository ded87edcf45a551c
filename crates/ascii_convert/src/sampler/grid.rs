/// One sampled cell as normalized RGBA channels, each in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorSample {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl ColorSample {
    pub fn from_rgba8(pixel: [u8; 4]) -> Self {
        Self {
            r: pixel[0] as f32 / 255.0,
            g: pixel[1] as f32 / 255.0,
            b: pixel[2] as f32 / 255.0,
            a: pixel[3] as f32 / 255.0,
        }
    }

    /// Packed 8-bit channels, rounded with a +0.5 bias before truncation.
    pub fn to_rgba8(&self) -> [u8; 4] {
        [
            (self.r * 255.0 + 0.5) as u8,
            (self.g * 255.0 + 0.5) as u8,
            (self.b * 255.0 + 0.5) as u8,
            (self.a * 255.0 + 0.5) as u8,
        ]
    }

    /// Perceptual brightness from weighted RGB channels; alpha is
    /// ignored. Reversal replaces the value with its complement.
    ///
    /// Accumulated in f64 so that pure white lands on exactly 1.0 after
    /// narrowing.
    pub fn luminance(&self, reversed: bool) -> f32 {
        let luminance =
            (0.2126 * self.r as f64 + 0.7152 * self.g as f64 + 0.0722 * self.b as f64) as f32;
        if reversed {
            1.0 - luminance
        } else {
            luminance
        }
    }
}

/// Dense row-major grid of color samples, fully populated at
/// construction.
#[derive(Clone, Debug)]
pub struct SampleGrid {
    width: u32,
    height: u32,
    samples: Vec<ColorSample>,
}

impl SampleGrid {
    pub fn new(width: u32, height: u32, samples: Vec<ColorSample>) -> Self {
        assert_eq!(width as usize * height as usize, samples.len());
        Self { width, height, samples }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Cell at (row, col), or `None` when the index falls outside the
    /// grid. Callers treat a miss as "contribute nothing".
    pub fn get(&self, row: u32, col: u32) -> Option<&ColorSample> {
        if row >= self.height || col >= self.width {
            return None;
        }
        self.samples.get(row as usize * self.width as usize + col as usize)
    }
}
