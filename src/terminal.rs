#![warn(clippy::all, clippy::pedantic)]
use crate::error::{EditorError, Result};
use crate::render::CursorHome;
use crate::Size;
use crossterm::{
    execute,
    terminal::{Clear, ClearType},
};
use std::io;
use std::os::fd::{AsRawFd, RawFd};
use tracing::{debug, error};

pub struct Terminal;

impl Terminal {
    /// Takes nothing.
    /// Returns the terminal's size.
    ///
    /// # Errors
    ///
    /// Will return `SizeQuery` if the size cannot be queried
    /// or the terminal reports zero columns.
    pub fn size() -> Result<Size> {
        Size::from_query(crossterm::terminal::size())
    }

    /// Takes nothing.
    /// Clears the whole screen and homes the cursor.
    ///
    /// # Errors
    ///
    /// Will return `OutputWrite` if stdout cannot be written.
    pub fn clear_screen() -> Result<()> {
        execute!(io::stdout(), Clear(ClearType::All), CursorHome).map_err(EditorError::OutputWrite)
    }
}

/// Holds the terminal in raw mode and puts it back when dropped.
pub struct RawMode {
    fd: RawFd,
    original: libc::termios,
    active: bool,
}

impl RawMode {
    /// Takes the read timeout in tenths of a second.
    /// Switches stdin to raw mode.
    ///
    /// # Errors
    ///
    /// Will return `ConfigQuery` if the current settings cannot be read
    /// and `ConfigApply` if the raw settings cannot be installed.
    pub fn enable(read_timeout_ds: u8) -> Result<Self> {
        Self::enable_on(io::stdin().as_raw_fd(), read_timeout_ds)
    }

    /// Takes a terminal file descriptor and the read timeout.
    /// Switches that terminal to raw mode. The descriptor must stay
    /// open for as long as the returned guard lives.
    ///
    /// # Errors
    ///
    /// Same as `enable`.
    pub fn enable_on(fd: RawFd, read_timeout_ds: u8) -> Result<Self> {
        let original = get_termios(fd).map_err(EditorError::ConfigQuery)?;
        let raw = make_raw(&original, read_timeout_ds);
        set_termios(fd, &raw).map_err(EditorError::ConfigApply)?;
        debug!("raw mode enabled on fd {fd}");
        Ok(Self {
            fd,
            original,
            active: true,
        })
    }

    /// Takes itself.
    /// Reinstalls the settings captured by `enable`.
    ///
    /// # Errors
    ///
    /// Will return `ConfigApply` if the settings cannot be installed.
    pub fn disable(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        set_termios(self.fd, &self.original).map_err(EditorError::ConfigApply)?;
        self.active = false;
        debug!("raw mode disabled on fd {}", self.fd);
        Ok(())
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        if let Err(e) = self.disable() {
            error!("failed to restore terminal: {e}");
        }
    }
}

/// Takes the captured settings and the read timeout.
/// Returns the raw variant of those settings.
fn make_raw(original: &libc::termios, read_timeout_ds: u8) -> libc::termios {
    let mut raw = *original;
    raw.c_lflag &= !(libc::ECHO | libc::ICANON | libc::IEXTEN | libc::ISIG);
    raw.c_iflag &= !(libc::IXON | libc::ICRNL);
    raw.c_oflag &= !libc::OPOST;
    raw.c_cc[libc::VMIN] = 0;
    raw.c_cc[libc::VTIME] = read_timeout_ds;
    raw
}

fn get_termios(fd: RawFd) -> io::Result<libc::termios> {
    let mut termios = unsafe { std::mem::zeroed::<libc::termios>() };
    let result = unsafe { libc::tcgetattr(fd, &mut termios) };
    if result != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(termios)
}

fn set_termios(fd: RawFd, termios: &libc::termios) -> io::Result<()> {
    let result = unsafe { libc::tcsetattr(fd, libc::TCSAFLUSH, termios) };
    if result != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}
