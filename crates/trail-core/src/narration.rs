//! Single-slot speech narration.
//!
//! At most one utterance is ever current. Starting a new one hard-cancels the
//! previous one first. Every utterance gets a fresh [`UtteranceId`] so that
//! the late `end`/`error` events a speech engine fires for a cancelled
//! utterance can be told apart from those of the current one.

use std::fmt;

use crate::constants::{SPEECH_LANG, SPEECH_RATE};
use crate::effect::Effect;
use crate::error::PlaybackError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct UtteranceId(pub u64);

impl fmt::Display for UtteranceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "u{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Voice {
    pub lang: &'static str,
    pub rate: f32,
}

impl Default for Voice {
    fn default() -> Self {
        Self {
            lang: SPEECH_LANG,
            rate: SPEECH_RATE,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SpeechCommand {
    Speak {
        utterance: UtteranceId,
        text: String,
        voice: Voice,
    },
    Cancel,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NarrationState {
    Idle,
    Playing {
        point_id: &'static str,
        utterance: UtteranceId,
    },
}

/// Read-only view of the narration slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NarrationSession {
    pub active_point_id: Option<&'static str>,
    pub is_playing: bool,
}

#[derive(Debug)]
pub struct Narrator {
    supported: bool,
    voice: Voice,
    state: NarrationState,
    next_utterance: u64,
}

impl Narrator {
    pub fn new(supported: bool, voice: Voice) -> Self {
        Self {
            supported,
            voice,
            state: NarrationState::Idle,
            next_utterance: 1,
        }
    }

    #[inline]
    pub fn state(&self) -> NarrationState {
        self.state
    }

    pub fn session(&self) -> NarrationSession {
        match self.state {
            NarrationState::Idle => NarrationSession {
                active_point_id: None,
                is_playing: false,
            },
            NarrationState::Playing { point_id, .. } => NarrationSession {
                active_point_id: Some(point_id),
                is_playing: true,
            },
        }
    }

    fn is_current(&self, utterance: UtteranceId) -> bool {
        matches!(self.state, NarrationState::Playing { utterance: u, .. } if u == utterance)
    }

    pub fn play(
        &mut self,
        point_id: &'static str,
        text: &str,
        out: &mut Vec<Effect>,
    ) -> Result<UtteranceId, PlaybackError> {
        if !self.supported {
            return Err(PlaybackError::Unsupported);
        }
        if let NarrationState::Playing {
            point_id: prev,
            utterance,
        } = self.state
        {
            log::info!("[narrator] interrupting {} ({})", prev, utterance);
            out.push(SpeechCommand::Cancel.into());
        }
        let utterance = UtteranceId(self.next_utterance);
        self.next_utterance += 1;
        self.state = NarrationState::Playing {
            point_id,
            utterance,
        };
        log::info!("[narrator] playing {} ({})", point_id, utterance);
        out.push(
            SpeechCommand::Speak {
                utterance,
                text: text.to_owned(),
                voice: self.voice,
            }
            .into(),
        );
        Ok(utterance)
    }

    /// Cancel whatever is playing. Returns the interrupted point id.
    pub fn stop(&mut self, out: &mut Vec<Effect>) -> Option<&'static str> {
        let stopped = match self.state {
            NarrationState::Playing { point_id, .. } => Some(point_id),
            NarrationState::Idle => None,
        };
        self.state = NarrationState::Idle;
        out.push(SpeechCommand::Cancel.into());
        stopped
    }

    pub fn on_start(&mut self, utterance: UtteranceId) -> bool {
        let current = self.is_current(utterance);
        if current {
            log::debug!("[narrator] {} started", utterance);
        }
        current
    }

    pub fn on_end(&mut self, utterance: UtteranceId) -> bool {
        if !self.is_current(utterance) {
            return false;
        }
        log::debug!("[narrator] {} finished", utterance);
        self.state = NarrationState::Idle;
        true
    }

    /// Returns the error when it concerns the current utterance.
    pub fn on_error(
        &mut self,
        utterance: UtteranceId,
        error: PlaybackError,
    ) -> Option<PlaybackError> {
        if !self.is_current(utterance) {
            return None;
        }
        log::warn!("[narrator] {} failed: {}", utterance, error);
        self.state = NarrationState::Idle;
        Some(error)
    }
}
