#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Text rendering contracts for grid world adapters.
//!
//! [`to_grid`] projects a [`WorldState`] onto a dense grid of [`Glyph`]
//! markers. Adapters present those grids through a [`RenderingBackend`];
//! [`TextRenderer`] writes them to any [`std::io::Write`] sink.

use std::{fmt, io::Write};

use anyhow::{Context, Result as AnyResult};
use gridworld_core::Coord;
use gridworld_world::WorldState;

/// Fixed marker drawn for a single cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Glyph {
    /// Cell with nothing on it.
    Empty,
    /// Cell occupied by the player.
    Player,
    /// Cell holding the key.
    Key,
    /// Cell holding the lock.
    Lock,
    /// Cell inside the pit rectangle.
    Pit,
    /// Beacon marking a pit corner.
    Beacon,
}

impl Glyph {
    /// Character used when printing the glyph.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Empty => '-',
            Self::Player => 'P',
            Self::Key => 'K',
            Self::Lock => 'L',
            Self::Pit => 'X',
            Self::Beacon => 'B',
        }
    }
}

/// Dense row-major projection of a world state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridView {
    cells: Vec<Glyph>,
    rows: usize,
    cols: usize,
}

impl GridView {
    fn filled(rows: usize, cols: usize) -> Self {
        Self {
            cells: vec![Glyph::Empty; rows * cols],
            rows,
            cols,
        }
    }

    /// Number of rows in the view.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns in the view.
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Glyph drawn at the provided cell, if it lies within the view.
    #[must_use]
    pub fn glyph(&self, coord: Coord) -> Option<Glyph> {
        self.index(coord).and_then(|index| self.cells.get(index).copied())
    }

    /// Iterator over the rows of the view, northern row first.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Glyph]> {
        self.cells.chunks(self.cols.max(1))
    }

    fn plot(&mut self, coord: Option<Coord>, glyph: Glyph) {
        if let Some(index) = coord.and_then(|coord| self.index(coord)) {
            if let Some(cell) = self.cells.get_mut(index) {
                *cell = glyph;
            }
        }
    }

    fn index(&self, coord: Coord) -> Option<usize> {
        let row = usize::try_from(coord.row()).ok()?;
        let col = usize::try_from(coord.col()).ok()?;
        (row < self.rows && col < self.cols).then_some(row * self.cols + col)
    }
}

impl fmt::Display for GridView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.iter_rows() {
            for glyph in row {
                write!(f, "{}", glyph.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Projects the state onto a grid of glyphs.
///
/// Markers are drawn in a fixed order so later layers win: player, key, lock,
/// the pit rectangle, then beacons. A player standing in the pit therefore
/// shows as [`Glyph::Pit`].
#[must_use]
pub fn to_grid(state: &WorldState) -> GridView {
    let shape = state.grid_shape();
    let rows = usize::try_from(shape.rows()).unwrap_or(0);
    let cols = usize::try_from(shape.cols()).unwrap_or(0);
    let mut grid = GridView::filled(rows, cols);

    grid.plot(Some(state.player()), Glyph::Player);
    grid.plot(state.key(), Glyph::Key);
    grid.plot(state.lock(), Glyph::Lock);

    if let Some(pit) = state.pit() {
        for row in pit.start().row()..=pit.end().row() {
            for col in pit.start().col()..=pit.end().col() {
                grid.plot(Some(Coord::new(row, col)), Glyph::Pit);
            }
        }
    }

    for beacon in state.beacons() {
        grid.plot(Some(beacon), Glyph::Beacon);
    }

    grid
}

/// Renders the grid followed by the player's key status.
#[must_use]
pub fn render(state: &WorldState) -> String {
    format!("{}has_key: {}\n", to_grid(state), state.has_key())
}

/// Rendering backend capable of presenting world states.
pub trait RenderingBackend {
    /// Presents a single state, optionally annotated with a caption.
    fn present(&mut self, state: &WorldState, caption: Option<&str>) -> AnyResult<()>;
}

/// Backend that writes text frames to an output stream.
#[derive(Debug)]
pub struct TextRenderer<W> {
    out: W,
}

impl<W: Write> TextRenderer<W> {
    /// Creates a renderer writing to `out`.
    #[must_use]
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Consumes the renderer, yielding the underlying stream.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RenderingBackend for TextRenderer<W> {
    fn present(&mut self, state: &WorldState, caption: Option<&str>) -> AnyResult<()> {
        if let Some(caption) = caption {
            writeln!(self.out, "{caption}").context("failed to write frame caption")?;
        }
        write!(self.out, "{}", render(state)).context("failed to write frame")?;
        writeln!(self.out).context("failed to write frame separator")?;
        self.out.flush().context("failed to flush frame")
    }
}
