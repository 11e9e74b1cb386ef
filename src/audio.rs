//! Sound effects.
//!
//! The two effects are WAV files decoded once at startup into a
//! `SoundBank`.  `Speaker` plays them through `rodio`; `Silent` stands in
//! when there is no output device.

use std::fmt;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rodio::decoder::DecoderError;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, StreamError};

use crate::error::AssetError;

const BUNDLED_ALIEN_HIT: &[u8] = include_bytes!("../assets/alien_hit.wav");
const BUNDLED_SHIP_HIT: &[u8] = include_bytes!("../assets/ship_hit.wav");

/// Sound effects the game asks for.  Playback is fire-and-forget: the game
/// never waits on it and never learns whether it worked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sound {
    AlienHit,
    ShipHit,
}

impl Sound {
    pub const ALL: [Sound; 2] = [Sound::AlienHit, Sound::ShipHit];

    pub fn file_name(self) -> &'static str {
        match self {
            Sound::AlienHit => "alien_hit.wav",
            Sound::ShipHit => "ship_hit.wav",
        }
    }
}

pub trait Audio {
    fn play(&mut self, sound: Sound);
}

impl<A: Audio + ?Sized> Audio for Box<A> {
    fn play(&mut self, sound: Sound) {
        (**self).play(sound);
    }
}

/// Discards every request.
#[derive(Clone, Copy, Debug, Default)]
pub struct Silent;

impl Audio for Silent {
    fn play(&mut self, _sound: Sound) {}
}

// ── Decoded sounds ────────────────────────────────────────────────────────────

type MemoryDecoder = Decoder<Cursor<Arc<[u8]>>>;

/// Encoded bytes of one effect, known to decode.
#[derive(Clone)]
pub struct SoundHandle {
    bytes: Arc<[u8]>,
}

impl SoundHandle {
    pub fn from_memory(bytes: impl Into<Arc<[u8]>>) -> Result<Self, DecoderError> {
        let handle = SoundHandle {
            bytes: bytes.into(),
        };
        handle.decoder()?;
        Ok(handle)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn decoder(&self) -> Result<MemoryDecoder, DecoderError> {
        Decoder::new(Cursor::new(Arc::clone(&self.bytes)))
    }
}

impl fmt::Debug for SoundHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SoundHandle")
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[derive(Clone, Debug)]
pub struct SoundBank {
    alien_hit: SoundHandle,
    ship_hit: SoundHandle,
}

impl SoundBank {
    /// The effects compiled into the binary.
    pub fn bundled() -> Result<Self, AssetError> {
        let decode = |sound: Sound, bytes: &'static [u8]| {
            SoundHandle::from_memory(bytes).map_err(|source| AssetError::Undecodable {
                path: PathBuf::from(format!("<bundled {}>", sound.file_name())),
                source,
            })
        };
        Ok(SoundBank {
            alien_hit: decode(Sound::AlienHit, BUNDLED_ALIEN_HIT)?,
            ship_hit: decode(Sound::ShipHit, BUNDLED_SHIP_HIT)?,
        })
    }

    /// Read and decode `alien_hit.wav` and `ship_hit.wav` from `dir`.
    pub fn load(dir: &Path) -> Result<Self, AssetError> {
        let read = |sound: Sound| -> Result<SoundHandle, AssetError> {
            let path = dir.join(sound.file_name());
            let bytes = std::fs::read(&path).map_err(|source| AssetError::Unreadable {
                path: path.clone(),
                source,
            })?;
            SoundHandle::from_memory(bytes)
                .map_err(|source| AssetError::Undecodable { path, source })
        };
        let bank = SoundBank {
            alien_hit: read(Sound::AlienHit)?,
            ship_hit: read(Sound::ShipHit)?,
        };
        tracing::info!(dir = %dir.display(), "sounds loaded");
        Ok(bank)
    }

    pub fn get(&self, sound: Sound) -> &SoundHandle {
        match sound {
            Sound::AlienHit => &self.alien_hit,
            Sound::ShipHit => &self.ship_hit,
        }
    }
}

// ── Output device ─────────────────────────────────────────────────────────────

/// Plays effects on the default output device.  Each request gets its own
/// detached sink, so overlapping effects mix.
pub struct Speaker {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    bank: SoundBank,
}

impl Speaker {
    pub fn try_new(bank: SoundBank) -> Result<Self, StreamError> {
        let (_stream, handle) = OutputStream::try_default()?;
        Ok(Speaker {
            _stream,
            handle,
            bank,
        })
    }
}

impl Audio for Speaker {
    fn play(&mut self, sound: Sound) {
        let source = match self.bank.get(sound).decoder() {
            Ok(source) => source,
            Err(err) => {
                tracing::warn!(?sound, "failed to decode sound: {err}");
                return;
            }
        };
        match Sink::try_new(&self.handle) {
            Ok(sink) => {
                sink.append(source);
                sink.detach();
            }
            Err(err) => tracing::warn!(?sound, "failed to play sound: {err}"),
        }
    }
}

/// A speaker on the default device, or `Silent` if none can be opened.
pub fn open_output(bank: SoundBank) -> Box<dyn Audio> {
    match Speaker::try_new(bank) {
        Ok(speaker) => Box::new(speaker),
        Err(err) => {
            tracing::warn!("no audio output, continuing silently: {err}");
            Box::new(Silent)
        }
    }
}
