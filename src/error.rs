use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("failed to read asset {path}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("asset {path} contains no frame data")]
    EmptyFrame { path: PathBuf },
    #[error("sound {path} could not be decoded")]
    Undecodable {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },
}

/// Anything that can stop the game from starting or keep the terminal from
/// being driven.
#[derive(Error, Debug)]
pub enum GameError {
    #[error("terminal I/O failed")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Asset(#[from] AssetError),
    #[error("terminal is {cols}x{rows}, the game needs at least {need_cols}x{need_rows}")]
    TerminalTooSmall {
        cols: u16,
        rows: u16,
        need_cols: u16,
        need_rows: u16,
    },
}
