//! Explosion frames.
//!
//! Each frame lives in its own numbered text file (`explosion1.txt`,
//! `explosion2.txt`, ...); the lines of a file are the rows of the frame.
//! The stock frames are compiled into the binary; a directory named by
//! `ALIEN_INVASION_ASSETS` replaces them at startup.

use std::path::{Path, PathBuf};

use crate::error::AssetError;

/// Number of frames in the explosion animation.
pub const EXPLOSION_FRAMES: usize = 9;

/// Environment variable naming a directory to load assets from instead of
/// the built-in ones.
pub const ASSET_DIR_VAR: &str = "ALIEN_INVASION_ASSETS";

const BUNDLED_FRAMES: [&str; EXPLOSION_FRAMES] = [
    include_str!("../assets/explosion1.txt"),
    include_str!("../assets/explosion2.txt"),
    include_str!("../assets/explosion3.txt"),
    include_str!("../assets/explosion4.txt"),
    include_str!("../assets/explosion5.txt"),
    include_str!("../assets/explosion6.txt"),
    include_str!("../assets/explosion7.txt"),
    include_str!("../assets/explosion8.txt"),
    include_str!("../assets/explosion9.txt"),
];

/// One frame of text art, top row first.
pub type Frame = Vec<String>;

#[derive(Clone, Debug, PartialEq)]
pub struct ExplosionSheet {
    frames: Vec<Frame>,
}

impl ExplosionSheet {
    /// Build a sheet from frames already in memory.  Blank frames are
    /// rejected the same way the file loader rejects them.
    pub fn from_frames(frames: Vec<Frame>) -> Result<Self, AssetError> {
        for (i, frame) in frames.iter().enumerate() {
            if frame.iter().all(|row| row.trim().is_empty()) {
                return Err(AssetError::EmptyFrame {
                    path: PathBuf::from(format!("<frame {}>", i + 1)),
                });
            }
        }
        Ok(ExplosionSheet { frames })
    }

    /// The frames compiled into the binary.
    pub fn bundled() -> Result<Self, AssetError> {
        let frames = BUNDLED_FRAMES
            .iter()
            .map(|text| text.lines().map(str::to_owned).collect())
            .collect();
        Self::from_frames(frames)
    }

    /// Read `explosion1.txt` ..= `explosion9.txt` from `dir`.
    pub fn load(dir: &Path) -> Result<Self, AssetError> {
        let mut frames = Vec::with_capacity(EXPLOSION_FRAMES);
        for i in 1..=EXPLOSION_FRAMES {
            let path = dir.join(format!("explosion{}.txt", i));
            let text = std::fs::read_to_string(&path).map_err(|source| {
                AssetError::Unreadable {
                    path: path.clone(),
                    source,
                }
            })?;
            let frame: Frame = text.lines().map(str::to_owned).collect();
            if frame.iter().all(|row| row.trim().is_empty()) {
                return Err(AssetError::EmptyFrame { path });
            }
            frames.push(frame);
        }
        tracing::info!(dir = %dir.display(), frames = frames.len(), "explosion frames loaded");
        Ok(ExplosionSheet { frames })
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frame(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }
}

/// The asset directory override, if one is set.
pub fn asset_dir_override() -> Option<PathBuf> {
    std::env::var_os(ASSET_DIR_VAR).map(PathBuf::from)
}
