#![warn(clippy::all, clippy::pedantic)]
use crate::config::Config;
use crate::error::{EditorError, Result};
use crate::key::{ctrl_key, Key, KeyReader};
use crate::render::Frame;
use crate::{Size, Viewport};
use std::io::{Read, Write};
use tracing::{debug, info};

const QUIT: Key = Key::Char(ctrl_key(b'q'));

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum State {
    #[default]
    Running,
    Terminated,
}

/// Why a session ended without an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    Quit,
}

pub struct Editor<R, W> {
    state: State,
    viewport: Viewport,
    keys: KeyReader<R>,
    output: W,
    product_name: String,
    wasd_navigation: bool,
}

impl<R: Read, W: Write> Editor<R, W> {
    /// Takes the input and output streams, the size query result and the config.
    /// Builds an `Editor` ready to draw its first frame.
    ///
    /// # Errors
    ///
    /// Returns `SizeQuery` if the size is unusable. Nothing is drawn in that case.
    pub fn new(input: R, output: W, size: Result<Size>, config: &Config) -> Result<Self> {
        let size = size?;
        info!("viewport is {}x{}", size.cols, size.rows);
        Ok(Self {
            state: State::default(),
            viewport: Viewport::new(size),
            keys: KeyReader::new(input),
            output,
            product_name: config.editor.product_name.clone(),
            wasd_navigation: config.input.wasd_navigation,
        })
    }

    /// Takes itself.
    /// Draws the screen, then handles keys until Ctrl-Q or an error.
    ///
    /// # Errors
    ///
    /// Returns the first error raised while reading keys or drawing.
    pub fn run(&mut self) -> Result<Exit> {
        self.refresh_screen()?;
        while self.state() == State::Running {
            self.process_keypress()?;
            if self.state == State::Running {
                self.refresh_screen()?;
            }
        }
        info!("session terminated by quit key");
        Ok(Exit::Quit)
    }

    #[must_use]
    pub fn state(&self) -> State {
        self.state
    }

    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Takes itself.
    /// Redraws the screen.
    ///
    /// # Errors
    ///
    /// Returns `OutputWrite` if the frame cannot be written.
    fn refresh_screen(&mut self) -> Result<()> {
        let frame = Frame::compose(&self.viewport, &self.product_name)
            .map_err(EditorError::OutputWrite)?;
        frame.flush_to(&mut self.output)
    }

    /// Takes itself.
    /// Reads one key and applies it.
    ///
    /// # Errors
    ///
    /// Returns `InputRead` if the key cannot be read.
    fn process_keypress(&mut self) -> Result<()> {
        let key = self.keys.read_key()?;
        debug!("key {key:?}");
        if key == QUIT {
            self.state = State::Terminated;
            return Ok(());
        }
        match self.navigation(key) {
            Some(page @ (Key::PageUp | Key::PageDown)) => self.viewport.page(page),
            Some(direction) => self.viewport.move_cursor(direction),
            None => (),
        }
        Ok(())
    }

    /// Takes itself and a key.
    /// Returns the movement the key stands for, if any.
    fn navigation(&self, key: Key) -> Option<Key> {
        match key {
            Key::ArrowUp
            | Key::ArrowDown
            | Key::ArrowLeft
            | Key::ArrowRight
            | Key::PageUp
            | Key::PageDown => Some(key),
            Key::Char(c) if self.wasd_navigation => match c {
                b'w' => Some(Key::ArrowUp),
                b'a' => Some(Key::ArrowLeft),
                b's' => Some(Key::ArrowDown),
                b'd' => Some(Key::ArrowRight),
                _ => None,
            },
            _ => None,
        }
    }
}
