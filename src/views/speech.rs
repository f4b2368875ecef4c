//! Speech capture through the webview's `SpeechRecognition` API.

use crate::speech::{SpeechError, SpeechInput, TranscriptSink};
use dioxus::prelude::*;
use serde::Deserialize;
use tracing::{debug, warn};

const AVAILABILITY_SCRIPT: &str =
    "return !!(window.SpeechRecognition || window.webkitSpeechRecognition);";

const START_SCRIPT: &str = r#"
const Recognition = window.SpeechRecognition || window.webkitSpeechRecognition;
if (!Recognition) {
    dioxus.send({ kind: "error", message: "not-supported" });
    dioxus.send({ kind: "end" });
} else {
    const recognition = new Recognition();
    recognition.continuous = false;
    recognition.interimResults = true;
    recognition.lang = "en-US";
    recognition.onresult = (event) => {
        const text = Array.from(event.results)
            .map((result) => result[0].transcript)
            .join("");
        dioxus.send({ kind: "transcript", text });
    };
    recognition.onerror = (event) => dioxus.send({ kind: "error", message: String(event.error) });
    recognition.onend = () => {
        window.__smilebotRecognition = null;
        dioxus.send({ kind: "end" });
    };
    window.__smilebotRecognition = recognition;
    recognition.start();
}
"#;

const STOP_SCRIPT: &str = r#"
if (window.__smilebotRecognition) {
    window.__smilebotRecognition.stop();
}
"#;

/// Messages posted back by [`START_SCRIPT`].
#[derive(Debug, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum RecognitionEvent {
    Transcript { text: String },
    Error { message: String },
    End,
}

pub struct WebSpeech {
    listening: Signal<bool>,
    task: Option<Task>,
}

impl WebSpeech {
    /// `listening` is flipped back to false when the recognizer ends on its own.
    pub fn new(listening: Signal<bool>) -> Self {
        Self {
            listening,
            task: None,
        }
    }

    pub async fn is_available() -> bool {
        match document::eval(AVAILABILITY_SCRIPT).join::<bool>().await {
            Ok(available) => available,
            Err(err) => {
                debug!(error = ?err, "speech availability check failed");
                false
            }
        }
    }
}

impl SpeechInput for WebSpeech {
    fn is_supported(&self) -> bool {
        true
    }

    fn is_listening(&self) -> bool {
        *self.listening.read()
    }

    fn start(&mut self, mut on_transcript: TranscriptSink) -> Result<(), SpeechError> {
        if let Some(previous) = self.task.take() {
            previous.cancel();
        }
        let mut listening = self.listening;
        listening.set(true);

        let mut recognition = document::eval(START_SCRIPT);
        self.task = Some(spawn(async move {
            loop {
                match recognition.recv::<RecognitionEvent>().await {
                    Ok(RecognitionEvent::Transcript { text }) => on_transcript(text),
                    Ok(RecognitionEvent::Error { message }) => {
                        warn!(%message, "speech recognition error");
                    }
                    Ok(RecognitionEvent::End) => break,
                    Err(err) => {
                        warn!(error = ?err, "lost speech recognition channel");
                        break;
                    }
                }
            }
            listening.set(false);
        }));
        Ok(())
    }

    fn stop(&mut self) {
        let _ = document::eval(STOP_SCRIPT);
        if let Some(task) = self.task.take() {
            task.cancel();
        }
        self.listening.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::RecognitionEvent;

    #[test]
    fn decodes_recognizer_messages() {
        let transcript: RecognitionEvent =
            serde_json::from_str(r#"{"kind":"transcript","text":"does flossing hurt"}"#).unwrap();
        assert_eq!(
            transcript,
            RecognitionEvent::Transcript {
                text: "does flossing hurt".into()
            }
        );

        let error: RecognitionEvent =
            serde_json::from_str(r#"{"kind":"error","message":"no-speech"}"#).unwrap();
        assert_eq!(
            error,
            RecognitionEvent::Error {
                message: "no-speech".into()
            }
        );

        let end: RecognitionEvent = serde_json::from_str(r#"{"kind":"end"}"#).unwrap();
        assert_eq!(end, RecognitionEvent::End);
    }
}
