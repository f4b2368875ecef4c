//! Optional speech-to-text input.
//!
//! The chat never depends on a recognizer being present. Until a platform
//! recognizer is confirmed the composer uses [`NoSpeech`] and the microphone
//! control stays disabled.

use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpeechError {
    #[error("speech recognition is not supported on this platform")]
    Unsupported,
    #[error("speech recognition failed: {0}")]
    Recognizer(String),
}

/// Receives the full transcript recognized so far, replacing the previous one.
pub type TranscriptSink = Box<dyn FnMut(String)>;

pub trait SpeechInput {
    fn is_supported(&self) -> bool;
    fn is_listening(&self) -> bool;
    fn start(&mut self, on_transcript: TranscriptSink) -> Result<(), SpeechError>;
    fn stop(&mut self);
}

impl<T: SpeechInput + ?Sized> SpeechInput for Box<T> {
    fn is_supported(&self) -> bool {
        (**self).is_supported()
    }

    fn is_listening(&self) -> bool {
        (**self).is_listening()
    }

    fn start(&mut self, on_transcript: TranscriptSink) -> Result<(), SpeechError> {
        (**self).start(on_transcript)
    }

    fn stop(&mut self) {
        (**self).stop()
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NoSpeech;

impl SpeechInput for NoSpeech {
    fn is_supported(&self) -> bool {
        false
    }

    fn is_listening(&self) -> bool {
        false
    }

    fn start(&mut self, _on_transcript: TranscriptSink) -> Result<(), SpeechError> {
        Err(SpeechError::Unsupported)
    }

    fn stop(&mut self) {}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DictationEvent {
    /// Listening began; the caller should clear its draft.
    Started,
    Stopped,
    Ignored,
}

/// Microphone toggle wired to the composer draft.
pub struct Dictation<C> {
    capture: C,
}

impl<C: SpeechInput> Dictation<C> {
    pub fn new(capture: C) -> Self {
        Self { capture }
    }

    pub fn is_supported(&self) -> bool {
        self.capture.is_supported()
    }

    pub fn is_listening(&self) -> bool {
        self.capture.is_listening()
    }

    /// Starts or stops listening. Does nothing while a reply is pending.
    pub fn toggle(
        &mut self,
        busy: bool,
        on_transcript: impl FnMut(String) + 'static,
    ) -> Result<DictationEvent, SpeechError> {
        if busy || !self.capture.is_supported() {
            return Ok(DictationEvent::Ignored);
        }
        if self.capture.is_listening() {
            self.capture.stop();
            return Ok(DictationEvent::Stopped);
        }
        if let Err(err) = self.capture.start(Box::new(on_transcript)) {
            warn!(error = %err, "could not start speech recognition");
            return Err(err);
        }
        Ok(DictationEvent::Started)
    }

    /// Sending a message ends any dictation in progress.
    pub fn stop_for_submit(&mut self) {
        if self.capture.is_listening() {
            self.capture.stop();
        }
    }
}
