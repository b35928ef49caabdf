#![warn(clippy::all, clippy::pedantic)]
use std::io;
use thiserror::Error;

/// Every way an editor session can abort. All of them are fatal.
#[derive(Error, Debug)]
pub enum EditorError {
    #[error("tcgetattr error")]
    ConfigQuery(#[source] io::Error),

    #[error("tcsetattr error")]
    ConfigApply(#[source] io::Error),

    #[error("read error")]
    InputRead(#[source] io::Error),

    #[error("getWindowSize error: {reason}")]
    SizeQuery {
        reason: &'static str,
        #[source]
        source: Option<io::Error>,
    },

    #[error("write error")]
    OutputWrite(#[source] io::Error),
}

pub type Result<T> = std::result::Result<T, EditorError>;
