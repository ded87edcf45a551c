use crate::glyph::table::GlyphTable;
use crate::sampler::grid::SampleGrid;

/// Walks the grid row-major and maps each cell's luminance to a glyph,
/// separating cells with a single space and rows with a newline. A
/// missing cell contributes nothing; it never aborts the conversion.
pub(crate) fn assemble(grid: &SampleGrid, table: &GlyphTable, reversed: bool) -> String {
    let mut output =
        String::with_capacity((grid.width() as usize * 2 + 1) * grid.height() as usize);

    for row in 0..grid.height() {
        for col in 0..grid.width() {
            if let Some(sample) = grid.get(row, col) {
                output.push(table.glyph_for(sample.luminance(reversed)));
                output.push(' ');
            }
        }
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use crate::sampler::grid::ColorSample;

    use super::*;

    fn grid_of(levels: &[f32], width: u32, height: u32) -> SampleGrid {
        let samples = levels
            .iter()
            .map(|&level| ColorSample { r: level, g: level, b: level, a: 1.0 })
            .collect();
        SampleGrid::new(width, height, samples)
    }

    #[test]
    fn cells_are_space_separated_with_trailing_newline() {
        let grid = grid_of(&[1.0, 0.0, 1.0, 0.0], 2, 2);
        let text = assemble(&grid, &GlyphTable::default(), false);
        assert_eq!(text, "  @ \n  @ \n");
    }

    #[test]
    fn row_count_matches_grid_height() {
        let grid = grid_of(&[0.5; 12], 4, 3);
        let text = assemble(&grid, &GlyphTable::default(), false);
        assert_eq!(text.split_terminator('\n').count(), 3);
    }

    #[test]
    fn reversal_flips_the_chosen_glyph() {
        let grid = grid_of(&[1.0], 1, 1);
        let table = GlyphTable::default();
        assert_eq!(assemble(&grid, &table, false), "  \n");
        assert_eq!(assemble(&grid, &table, true), "@ \n");
    }
}
