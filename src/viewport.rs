#![warn(clippy::all, clippy::pedantic)]
use crate::error::{EditorError, Result};
use crate::Key;
use std::io;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub rows: usize,
    pub cols: usize,
}

impl Size {
    /// Takes the result of a window size query, as `(columns, rows)`.
    /// Returns the viewport size.
    ///
    /// # Errors
    ///
    /// Returns `SizeQuery` if the query failed or reported zero columns.
    pub fn from_query(query: io::Result<(u16, u16)>) -> Result<Self> {
        match query {
            Ok((0, _)) => Err(EditorError::SizeQuery {
                reason: "terminal reported zero columns",
                source: None,
            }),
            Ok((cols, rows)) => Ok(Self {
                rows: usize::from(rows),
                cols: usize::from(cols),
            }),
            Err(e) => Err(EditorError::SizeQuery {
                reason: "window size query failed",
                source: Some(e),
            }),
        }
    }
}

/// 0-based cursor offsets into the viewport.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

/// The visible area and the cursor inside it.
///
/// The cursor may sit one past the last column or row: `x` is bounded by
/// `cols` and `y` by `rows`, not by `cols - 1` and `rows - 1`.
#[derive(Debug, Default)]
pub struct Viewport {
    size: Size,
    cursor: Position,
}

impl Viewport {
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self {
            size,
            cursor: Position::default(),
        }
    }

    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    #[must_use]
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Takes itself and a key.
    /// Moves the cursor one cell in the key's direction, if it has one.
    pub fn move_cursor(&mut self, key: Key) {
        let Position { x, y } = &mut self.cursor;
        match key {
            Key::ArrowLeft => *x = x.saturating_sub(1),
            Key::ArrowRight => {
                if *x < self.size.cols {
                    *x += 1;
                }
            }
            Key::ArrowUp => *y = y.saturating_sub(1),
            Key::ArrowDown => {
                if *y < self.size.rows {
                    *y += 1;
                }
            }
            _ => (),
        }
    }

    /// Takes itself and `PageUp` or `PageDown`.
    /// Moves the cursor a full screen height up or down.
    pub fn page(&mut self, key: Key) {
        let step = match key {
            Key::PageUp => Key::ArrowUp,
            Key::PageDown => Key::ArrowDown,
            _ => return,
        };
        for _ in 0..self.size.rows {
            self.move_cursor(step);
        }
    }
}
