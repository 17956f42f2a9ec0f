//! Audio cues for a match, played as terminal bells
//!
//! An [`AudioCues`] value is acquired when a match screen is entered and dropped
//! when it is left. Output failures switch the cues off for the rest of the
//! match instead of surfacing an error.

use std::io::{self, Write};

use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Consumption,
    Death,
}

impl Cue {
    fn bells(self) -> usize {
        match self {
            Cue::Consumption => 1,
            Cue::Death => 2,
        }
    }
}

pub struct AudioCues {
    sink: Option<Box<dyn Write + Send>>,
    played: usize,
}

impl AudioCues {
    /// Bells go to stderr, which is where the terminal UI draws
    pub fn acquire(enabled: bool) -> Self {
        let sink: Option<Box<dyn Write + Send>> = if enabled {
            Some(Box::new(io::stderr()))
        } else {
            None
        };
        Self::with_sink(sink)
    }

    pub fn with_sink(sink: Option<Box<dyn Write + Send>>) -> Self {
        debug!(enabled = sink.is_some(), "audio cues acquired");
        Self { sink, played: 0 }
    }

    pub fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    /// Cues successfully written so far
    pub fn played(&self) -> usize {
        self.played
    }

    pub fn play(&mut self, cue: Cue) {
        let Some(sink) = self.sink.as_mut() else {
            return;
        };

        let bells = vec![b'\x07'; cue.bells()];
        match sink.write_all(&bells).and_then(|()| sink.flush()) {
            Ok(()) => self.played += 1,
            Err(err) => {
                warn!("audio output failed, muting: {err}");
                self.sink = None;
            }
        }
    }
}

impl Drop for AudioCues {
    fn drop(&mut self) {
        debug!(played = self.played, "audio cues released");
    }
}
