use std::cmp::Ordering;

/// One printable character paired with the brightness it stands for.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphEntry {
    pub glyph: char,
    pub brightness: f32,
}

/// Ordered brightness-to-character lookup table.
///
/// Entries are sorted by brightness descending exactly once at
/// construction and never re-sorted afterward.
#[derive(Clone, Debug)]
pub struct GlyphTable {
    entries: Vec<GlyphEntry>,
}

impl GlyphTable {
    pub fn new<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (char, f32)>,
    {
        let mut entries: Vec<GlyphEntry> = pairs
            .into_iter()
            .map(|(glyph, brightness)| GlyphEntry { glyph, brightness })
            .collect();
        assert!(!entries.is_empty(), "glyph table must contain at least one entry");
        // Stable sort: entries of equal brightness keep insertion order.
        entries.sort_by(|a, b| b.brightness.partial_cmp(&a.brightness).unwrap_or(Ordering::Equal));
        Self { entries }
    }

    /// Builds a table from a dark-to-bright charset, spreading the
    /// characters evenly over [0, 1].
    pub fn from_charset(charset: impl Into<String>) -> Self {
        let chars: Vec<char> = charset.into().chars().collect();
        assert!(chars.len() >= 2, "charset must contain at least two characters");
        let step = 1.0 / (chars.len() - 1) as f32;
        Self::new(chars.into_iter().enumerate().map(|(index, ch)| (ch, index as f32 * step)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[GlyphEntry] {
        &self.entries
    }

    /// Returns the first entry, scanning bright to dark, whose brightness
    /// the luminance clears. Falls back to the darkest entry when the
    /// luminance lies below every threshold.
    pub fn glyph_for(&self, luminance: f32) -> char {
        match self.entries.iter().find(|entry| entry.brightness <= luminance) {
            Some(entry) => entry.glyph,
            None => self.entries[self.entries.len() - 1].glyph,
        }
    }
}

impl Default for GlyphTable {
    fn default() -> Self {
        Self::new([
            (' ', 1.0),
            ('`', 0.95),
            ('.', 0.92),
            (',', 0.9),
            ('-', 0.8),
            ('~', 0.75),
            ('+', 0.7),
            ('<', 0.65),
            ('>', 0.6),
            ('o', 0.55),
            ('=', 0.5),
            ('*', 0.35),
            ('%', 0.3),
            ('X', 0.1),
            ('@', 0.0),
        ])
    }
}
