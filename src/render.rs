#![warn(clippy::all, clippy::pedantic)]
use crate::error::{EditorError, Result};
use crate::{Position, Size, Viewport};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    terminal::{Clear, ClearType},
    Command,
};
use std::fmt;
use std::io::{self, Write};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Moves the cursor to the top-left corner with the bare `CSI H` form.
pub struct CursorHome;

impl Command for CursorHome {
    fn write_ansi(&self, f: &mut impl fmt::Write) -> fmt::Result {
        f.write_str("\x1b[H")
    }

    #[cfg(windows)]
    fn execute_winapi(&self) -> io::Result<()> {
        crossterm::execute!(io::stdout(), MoveTo(0, 0))
    }
}

/// One full screen of output, built up front and written in one go.
#[derive(Default)]
pub struct Frame {
    buf: Vec<u8>,
}

impl Frame {
    /// Takes the viewport and the product name for the banner.
    /// Builds the bytes that repaint the whole screen.
    ///
    /// # Errors
    ///
    /// Returns an error if a control sequence cannot be encoded.
    pub fn compose(viewport: &Viewport, product_name: &str) -> io::Result<Self> {
        let mut frame = Self::default();
        queue!(frame.buf, Hide, CursorHome)?;
        frame.draw_rows(viewport.size(), product_name)?;
        let Position { x, y } = viewport.cursor();
        queue!(frame.buf, MoveTo(to_u16(x), to_u16(y)), Show)?;
        Ok(frame)
    }

    /// Takes itself and an output stream.
    /// Writes the frame with a single write and flushes it.
    ///
    /// # Errors
    ///
    /// Returns `OutputWrite` if the stream rejects the frame.
    pub fn flush_to(self, out: &mut impl Write) -> Result<()> {
        out.write_all(&self.buf)
            .and_then(|()| out.flush())
            .map_err(EditorError::OutputWrite)
    }

    #[cfg(test)]
    fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    fn draw_rows(&mut self, size: Size, product_name: &str) -> io::Result<()> {
        for row in 0..size.rows {
            if row == size.rows / 2 {
                self.buf
                    .extend_from_slice(&welcome_line(product_name, size.cols));
            } else {
                self.buf.push(b'~');
            }
            queue!(self.buf, Clear(ClearType::UntilNewLine))?;
            if row + 1 < size.rows {
                self.buf.extend_from_slice(b"\r\n");
            }
        }
        Ok(())
    }
}

/// Takes the product name and the screen width.
/// Returns the banner row: a tilde, padding, and the truncated message.
///
/// The padding is one space short of true centering.
#[must_use]
pub fn welcome_line(product_name: &str, cols: usize) -> Vec<u8> {
    let message = format!("{product_name} -- Version {VERSION}");
    let end = message
        .char_indices()
        .nth(cols)
        .map_or(message.len(), |(i, _)| i);
    let shown = &message[..end];
    let width = shown.chars().count();
    let padding = (cols - width) / 2;
    let mut line = Vec::with_capacity(1 + padding + shown.len());
    line.push(b'~');
    line.resize(padding.saturating_sub(1) + 1, b' ');
    line.extend_from_slice(shown.as_bytes());
    line
}

// `MoveTo` adds one to each coordinate.
#[allow(clippy::cast_possible_truncation)]
fn to_u16(n: usize) -> u16 {
    n.min(usize::from(u16::MAX - 1)) as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Key;

    const BANNER: &str = "Text Editor -- Version 0.0.1";

    fn frame_text(viewport: &Viewport) -> String {
        let frame = Frame::compose(viewport, "Text Editor").unwrap();
        String::from_utf8(frame.as_bytes().to_vec()).unwrap()
    }

    fn rows_of(text: &str) -> Vec<&str> {
        let body = text
            .strip_prefix("\x1b[?25l\x1b[H")
            .expect("frame starts with hide + home");
        let end = body.rfind("\x1b[K").expect("rows end with erase") + 3;
        body[..end].split("\r\n").collect()
    }

    #[test]
    fn test_frame_layout() {
        let viewport = Viewport::new(Size { rows: 3, cols: 40 });
        let text = frame_text(&viewport);
        assert!(text.starts_with("\x1b[?25l\x1b[H"));
        assert!(text.ends_with("\x1b[1;1H\x1b[?25h"));
        let rows = rows_of(&text);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], "~\x1b[K");
        assert_eq!(rows[2], "~\x1b[K");
        assert!(rows[1].contains(BANNER));
        assert!(!text.contains("\x1b[K\r\n\x1b[1;1H"));
    }

    #[test]
    fn test_banner_row_and_padding_on_80x24() {
        let viewport = Viewport::new(Size { rows: 24, cols: 80 });
        let text = frame_text(&viewport);
        let rows = rows_of(&text);
        assert_eq!(rows.len(), 24);
        let banner_rows: Vec<usize> = rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.contains(BANNER))
            .map(|(i, _)| i)
            .collect();
        assert_eq!(banner_rows, vec![12]);
        let spaces = (80 - BANNER.len()) / 2 - 1;
        assert_eq!(rows[12], format!("~{}{BANNER}\x1b[K", " ".repeat(spaces)));
    }

    #[test]
    fn test_banner_is_truncated_to_width() {
        assert_eq!(welcome_line("Text Editor", 10), b"~Text Edito".to_vec());
        assert_eq!(welcome_line("Text Editor", 1), b"~T".to_vec());
    }

    #[test]
    fn test_banner_cuts_on_char_boundary() {
        let line = welcome_line("Éditeur", 3);
        assert_eq!(line, "~Édi".as_bytes().to_vec());
        assert!(std::str::from_utf8(&line).is_ok());

        let line = welcome_line("Éditeur", 60);
        let text = std::str::from_utf8(&line).unwrap();
        let message = "Éditeur -- Version 0.0.1";
        let spaces = (60 - message.chars().count()) / 2 - 1;
        assert_eq!(text, format!("~{}{message}", " ".repeat(spaces)));
    }

    #[test]
    fn test_banner_with_no_room_for_padding() {
        let cols = BANNER.len() + 1;
        assert_eq!(welcome_line("Text Editor", cols), format!("~{BANNER}").into_bytes());
    }

    #[test]
    fn test_banner_uses_product_name() {
        let line = welcome_line("Scratch", 80);
        assert!(line.ends_with(b"Scratch -- Version 0.0.1"));
    }

    #[test]
    fn test_cursor_position_is_one_based() {
        let mut viewport = Viewport::new(Size { rows: 10, cols: 20 });
        viewport.move_cursor(Key::ArrowRight);
        viewport.move_cursor(Key::ArrowRight);
        viewport.move_cursor(Key::ArrowDown);
        let text = frame_text(&viewport);
        assert!(text.ends_with("\x1b[2;3H\x1b[?25h"));
    }

    #[test]
    fn test_empty_viewport_still_places_cursor() {
        let viewport = Viewport::new(Size { rows: 0, cols: 5 });
        assert_eq!(frame_text(&viewport), "\x1b[?25l\x1b[H\x1b[1;1H\x1b[?25h");
    }

    #[test]
    fn test_flush_writes_once() {
        struct CountingWriter {
            writes: usize,
            bytes: Vec<u8>,
        }

        impl Write for CountingWriter {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                self.writes += 1;
                self.bytes.extend_from_slice(buf);
                Ok(buf.len())
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let viewport = Viewport::new(Size { rows: 24, cols: 80 });
        let frame = Frame::compose(&viewport, "Text Editor").unwrap();
        let expected = frame.as_bytes().to_vec();
        let mut out = CountingWriter {
            writes: 0,
            bytes: Vec::new(),
        };
        frame.flush_to(&mut out).unwrap();
        assert_eq!(out.writes, 1);
        assert_eq!(out.bytes, expected);
    }

    #[test]
    fn test_flush_error() {
        struct Broken;

        impl Write for Broken {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::ErrorKind::BrokenPipe.into())
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let frame = Frame::compose(&Viewport::default(), "Text Editor").unwrap();
        assert!(matches!(
            frame.flush_to(&mut Broken),
            Err(EditorError::OutputWrite(_))
        ));
    }
}
