use super::glyphs::{LetterCase, random_glyph};
use super::state::AnimationState;
use crate::config::Config;
use std::io;

/// One of the three rows of the grid
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Row {
    Top,
    Middle,
    Bottom,
}

impl Row {
    pub const ALL: [Row; 3] = [Row::Top, Row::Middle, Row::Bottom];

    pub(crate) fn index(self) -> usize {
        match self {
            Row::Top => 0,
            Row::Middle => 1,
            Row::Bottom => 2,
        }
    }
}

/// Something the grid can be painted on.
pub trait RenderTarget {
    /// The number of cells in a row
    fn cell_count(&self, row: Row) -> usize;

    /// Throw away every cell in a row and create `count` new ones.
    fn set_cell_count(&mut self, row: Row, count: usize);

    fn set_text(&mut self, row: Row, index: usize, ch: char);

    fn set_revealed(&mut self, row: Row, index: usize, revealed: bool);

    /// Publish a fully painted frame.
    fn present(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A single grid cell
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub revealed: bool,
}

/// An in memory grid of cells
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CellGrid {
    rows: [Vec<Cell>; 3],
}

impl CellGrid {
    pub fn row(&self, row: Row) -> &[Cell] {
        &self.rows[row.index()]
    }

    /// The characters in a row as a string
    pub fn text(&self, row: Row) -> String {
        self.row(row).iter().map(|cell| cell.ch).collect()
    }
}

impl RenderTarget for CellGrid {
    fn cell_count(&self, row: Row) -> usize {
        self.rows[row.index()].len()
    }

    fn set_cell_count(&mut self, row: Row, count: usize) {
        self.rows[row.index()] = vec![Cell::default(); count];
    }

    fn set_text(&mut self, row: Row, index: usize, ch: char) {
        if let Some(cell) = self.rows[row.index()].get_mut(index) {
            cell.ch = ch;
        }
    }

    fn set_revealed(&mut self, row: Row, index: usize, revealed: bool) {
        if let Some(cell) = self.rows[row.index()].get_mut(index) {
            cell.revealed = revealed;
        }
    }
}

/// Where the word starts within a middle row of `width` cells.
///
/// The first and last cells are always noise; the word is centered in the cells in between.
pub fn word_start(width: usize, word_length: usize) -> usize {
    let available = width.saturating_sub(2);
    1 + available.saturating_sub(word_length) / 2
}

/// Rebuild every row if any of them isn't `width` cells wide.
///
/// Returns whether the rows were rebuilt.
pub fn ensure_grid_size<T: RenderTarget + ?Sized>(
    target: &mut T,
    width: usize,
    letter_case: LetterCase,
    rng: &mut fastrand::Rng,
) -> bool {
    if Row::ALL.iter().all(|row| target.cell_count(*row) == width) {
        return false;
    }
    log::debug!("rebuilding grid with {width} cells per row");
    rebuild_grid(target, width, letter_case, rng);
    true
}

fn rebuild_grid<T: RenderTarget + ?Sized>(
    target: &mut T,
    width: usize,
    letter_case: LetterCase,
    rng: &mut fastrand::Rng,
) {
    for row in Row::ALL {
        target.set_cell_count(row, width);
        paint_noise(target, row, 0..width, letter_case, rng);
    }
}

/// Paint a whole frame and present it.
///
/// When `force_rebuild` is set the rows are recreated even if their width is right.
pub fn render<T: RenderTarget + ?Sized>(
    target: &mut T,
    config: &Config,
    state: &AnimationState,
    rng: &mut fastrand::Rng,
    force_rebuild: bool,
) -> io::Result<()> {
    let width = config.grid_width();
    let letter_case = config.letter_case();
    if force_rebuild {
        rebuild_grid(target, width, letter_case, rng);
    } else {
        ensure_grid_size(target, width, letter_case, rng);
    }

    paint_noise(target, Row::Top, 0..width, letter_case, rng);
    paint_noise(target, Row::Bottom, 0..width, letter_case, rng);

    let word: Vec<char> = config.word(state.word_index()).chars().collect();
    let start = word_start(width, word.len());
    let end = start + word.len();
    for index in 0..width {
        let literal = match index {
            index if (start..end).contains(&index) && index < width - 1 => {
                let offset = index - start;
                (offset < state.reveal_index()).then(|| word[offset])
            }
            _ => None,
        };
        match literal {
            Some(ch) => {
                target.set_text(Row::Middle, index, ch);
                target.set_revealed(Row::Middle, index, true);
            }
            None => {
                target.set_text(Row::Middle, index, random_glyph(rng, letter_case));
                target.set_revealed(Row::Middle, index, false);
            }
        }
    }
    target.present()
}

fn paint_noise<T: RenderTarget + ?Sized>(
    target: &mut T,
    row: Row,
    cells: std::ops::Range<usize>,
    letter_case: LetterCase,
    rng: &mut fastrand::Rng,
) {
    for index in cells {
        target.set_text(row, index, random_glyph(rng, letter_case));
        target.set_revealed(row, index, false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scramble::Phase;
    use rstest::rstest;
    use std::time::Duration;

    fn config(words: &str) -> Config {
        let mut config = Config::default();
        config.set_word_text(words);
        config
    }

    /// A state showing the first `revealed` characters of the first word
    fn revealing(revealed: u64) -> AnimationState {
        let mut state = AnimationState::starting_in(Phase::Revealing, Duration::ZERO);
        let config = config("ABCDEFGHIJKLMNOPQRSTUVWXYZ");
        state.advance(config.reveal_speed() * revealed as u32, &config);
        state
    }

    #[rstest]
    #[case::only_word(4, 2, 1)]
    #[case::even_padding(6, 2, 2)]
    #[case::odd_padding(7, 2, 2)]
    #[case::empty_word(2, 0, 1)]
    #[case::long_word(12, 10, 1)]
    fn centering(#[case] width: usize, #[case] word_length: usize, #[case] expected: usize) {
        assert_eq!(word_start(width, word_length), expected);
    }

    #[rstest]
    #[case::single("HI", 4)]
    #[case::many("A,LONGEST,MID", 9)]
    #[case::blank(" , ", 2)]
    fn rows_match_width(#[case] words: &str, #[case] width: usize) {
        let config = config(words);
        let mut grid = CellGrid::default();
        let mut rng = fastrand::Rng::with_seed(1);
        render(&mut grid, &config, &AnimationState::new(Duration::ZERO), &mut rng, false).unwrap();
        for row in Row::ALL {
            assert_eq!(grid.cell_count(row), width);
        }
    }

    #[test]
    fn revealed_prefix_is_literal() {
        let config = config("HI");
        let mut grid = CellGrid::default();
        let mut rng = fastrand::Rng::with_seed(3);
        render(&mut grid, &config, &revealing(1), &mut rng, false).unwrap();

        let middle = grid.row(Row::Middle);
        assert_eq!(middle[1], Cell { ch: 'H', revealed: true });
        assert!(!middle[0].revealed);
        assert!(!middle[2].revealed);
        assert!(!middle[3].revealed);

        render(&mut grid, &config, &revealing(2), &mut rng, false).unwrap();
        let middle = grid.row(Row::Middle);
        assert_eq!(middle[1], Cell { ch: 'H', revealed: true });
        assert_eq!(middle[2], Cell { ch: 'I', revealed: true });
    }

    #[test]
    fn shorter_word_is_centered_between_padding() {
        // the longest word sets the width, the current one is centered in it
        let config = config("GO,ABCDEF");
        let mut grid = CellGrid::default();
        let mut rng = fastrand::Rng::with_seed(9);
        render(&mut grid, &config, &revealing(2), &mut rng, false).unwrap();

        let revealed: Vec<(usize, char)> = grid
            .row(Row::Middle)
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.revealed)
            .map(|(index, cell)| (index, cell.ch))
            .collect();
        assert_eq!(revealed, [(3, 'G'), (4, 'O')]);
    }

    #[test]
    fn outer_rows_are_noise() {
        let config = config("HELLO");
        let mut grid = CellGrid::default();
        let mut rng = fastrand::Rng::with_seed(5);
        for _ in 0..20 {
            render(&mut grid, &config, &revealing(5), &mut rng, false).unwrap();
            for row in [Row::Top, Row::Bottom] {
                assert!(grid.row(row).iter().all(|cell| !cell.revealed));
                assert!(grid.text(row).chars().all(|ch| ch.is_ascii_uppercase() || ch.is_ascii_digit()));
            }
        }
    }

    #[test]
    fn lowercase_noise() {
        let mut config = config("word");
        config.set_letter_case(LetterCase::Lower);
        let mut grid = CellGrid::default();
        let mut rng = fastrand::Rng::with_seed(5);
        render(&mut grid, &config, &revealing(4), &mut rng, false).unwrap();
        assert_eq!(&grid.text(Row::Middle)[1..5], "word");
        for row in Row::ALL {
            assert!(!grid.text(row).chars().any(|ch| ch.is_ascii_uppercase()));
        }
    }

    #[test]
    fn noise_changes_between_renders() {
        let config = config("ABCDEFGHIJKLMNOP");
        let mut grid = CellGrid::default();
        let mut rng = fastrand::Rng::with_seed(11);
        let state = AnimationState::new(Duration::ZERO);
        render(&mut grid, &config, &state, &mut rng, false).unwrap();
        let first = grid.text(Row::Top);
        render(&mut grid, &config, &state, &mut rng, false).unwrap();
        assert_ne!(grid.text(Row::Top), first);
    }

    #[test]
    fn drifted_rows_are_rebuilt() {
        let config = config("HI");
        let mut grid = CellGrid::default();
        let mut rng = fastrand::Rng::with_seed(2);
        grid.set_cell_count(Row::Bottom, 9);
        assert!(ensure_grid_size(&mut grid, config.grid_width(), LetterCase::Upper, &mut rng));
        for row in Row::ALL {
            assert_eq!(grid.cell_count(row), 4);
        }
        assert!(!ensure_grid_size(&mut grid, config.grid_width(), LetterCase::Upper, &mut rng));
    }

    #[test]
    fn empty_word_has_nothing_revealed() {
        let config = config(",,");
        let mut grid = CellGrid::default();
        let mut rng = fastrand::Rng::with_seed(2);
        render(&mut grid, &config, &revealing(3), &mut rng, false).unwrap();
        assert_eq!(grid.cell_count(Row::Middle), 2);
        assert!(grid.row(Row::Middle).iter().all(|cell| !cell.revealed));
    }
}
