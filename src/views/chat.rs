use crate::speech::{Dictation, DictationEvent, NoSpeech, SpeechInput};
use crate::types::{ChatMessage, Role};
use crate::ui::{AppSession, BackendHandle};
use crate::views::markdown::markdown_to_html;
use crate::views::speech::WebSpeech;
use dioxus::events::Key;
use dioxus::prelude::*;
use tracing::{debug, warn};

const IMAGE_DOWNLOAD_NAME: &str = "dental-diagram.png";

/// Follow-ups are offered only under the newest assistant reply, and not while waiting.
fn visible_suggestions(messages: &[ChatMessage], busy: bool) -> Option<Vec<String>> {
    if busy {
        return None;
    }
    let last = messages.last().filter(|msg| msg.is_assistant())?;
    last.suggested_questions.clone()
}

#[component]
pub fn ChatView(session: Signal<AppSession>) -> Element {
    let mut session = session;
    let backend = use_context::<BackendHandle>();
    let mut draft = use_signal(String::new);
    let mic_active = use_signal(|| false);
    let mut dictation =
        use_signal(|| Dictation::new(Box::new(NoSpeech) as Box<dyn SpeechInput>));
    use_future(move || async move {
        if WebSpeech::is_available().await {
            let mut control = dictation;
            control.set(Dictation::new(
                Box::new(WebSpeech::new(mic_active)) as Box<dyn SpeechInput>
            ));
        } else {
            debug!("speech recognition unavailable, microphone disabled");
        }
    });
    let mut zoomed_image = use_signal(|| Option::<String>::None);

    let send = use_callback(move |text: String| {
        let pending = match session.with_mut(|s| s.begin(&text)) {
            Ok(pending) => pending,
            Err(err) => {
                debug!(error = %err, "ignoring submission");
                return;
            }
        };
        draft.set(String::new());
        dictation.with_mut(|d| d.stop_for_submit());

        let backend = backend.clone();
        spawn(async move {
            let result = backend.0.generate(&pending.history).await;
            session.with_mut(|s| s.finish(pending.ticket, result));
        });
    });

    let messages = session.read().conversation().messages().to_vec();
    let busy = session.read().is_busy();
    let banner = session.read().last_error().map(str::to_string);
    let suggestions = visible_suggestions(&messages, busy);
    let listening = dictation.read().is_listening();
    let speech_supported = dictation.read().is_supported();
    let placeholder = if listening {
        "Listening..."
    } else {
        "Ask a dental question..."
    };
    let mic_title = if !speech_supported {
        "Voice input not supported"
    } else if listening {
        "Stop listening"
    } else {
        "Speak your question"
    };

    rsx! {
        div { class: "main-container",
            div { class: "chat-wrap",
                div { id: "chat-list", class: "chat-list",
                    for (i, msg) in messages.iter().enumerate() {
                        MessageRow {
                            key: "{i}",
                            message: msg.clone(),
                            on_zoom: move |url: String| zoomed_image.set(Some(url)),
                        }
                    }
                    if let Some(questions) = suggestions {
                        SuggestedQuestions {
                            questions,
                            on_pick: move |question: String| send.call(question),
                        }
                    }
                    if busy {
                        div { class: "message-row assistant",
                            div { class: "shimmer-line",
                                span { class: "shimmer-text", "Thinking..." }
                            }
                        }
                    }
                }
            }

            if let Some(text) = banner {
                div { class: "error-banner", role: "alert", "{text}" }
            }

            form { class: "composer no-divider",
                onsubmit: move |ev| {
                    ev.prevent_default();
                    send.call(draft());
                },
                div { class: "composer-inner",
                    div { class: "hstack", style: "gap: 0.5rem; width: 100%; align-items: center;",
                        input {
                            r#type: "text",
                            value: "{draft}",
                            placeholder: placeholder,
                            disabled: busy,
                            autofocus: true,
                            oninput: move |ev| draft.set(ev.value()),
                            onkeydown: move |ev| {
                                if ev.key() == Key::Enter && !ev.modifiers().shift() {
                                    ev.prevent_default();
                                    send.call(draft());
                                }
                            },
                        }
                        button {
                            class: format_args!("btn btn-ghost mic {}", if listening { "listening" } else { "" }),
                            r#type: "button",
                            title: mic_title,
                            disabled: busy || !speech_supported,
                            onclick: move |_| {
                                let busy = session.read().is_busy();
                                if !dictation.read().is_listening() {
                                    draft.set(String::new());
                                }
                                let result = dictation.with_mut(|d| {
                                    d.toggle(busy, move |text| draft.set(text))
                                });
                                match result {
                                    Ok(DictationEvent::Started) => debug!("dictation started"),
                                    Ok(_) => {}
                                    Err(err) => warn!(error = %err, "dictation unavailable"),
                                }
                            },
                            "Mic"
                        }
                        button {
                            class: "btn btn-primary",
                            r#type: "submit",
                            disabled: busy || draft().trim().is_empty(),
                            "Send"
                        }
                    }
                }
            }

            if let Some(url) = zoomed_image() {
                ImageViewer { url, on_close: move |_| zoomed_image.set(None) }
            }
        }
    }
}

#[component]
fn MessageRow(message: ChatMessage, on_zoom: EventHandler<String>) -> Element {
    let side = match message.role {
        Role::User => "user",
        Role::Assistant => "assistant",
    };
    let content_html = markdown_to_html(&message.content);

    rsx! {
        div { class: "message-row {side}",
            if message.is_assistant() {
                div { class: "avatar assistant", "\u{1F468}\u{200D}\u{2695}\u{FE0F}" }
            }
            div { class: "message-stack",
                div { class: "bubble {side}",
                    if let Some(url) = message.image_url.clone() {
                        Diagram { url, on_zoom }
                    }
                    if message.is_assistant() {
                        div { class: "md", dangerous_inner_html: "{content_html}" }
                    } else {
                        p { class: "plain", "{message.content}" }
                    }
                }
            }
        }
    }
}

#[component]
fn SuggestedQuestions(questions: Vec<String>, on_pick: EventHandler<String>) -> Element {
    rsx! {
        div { class: "suggestions",
            p { class: "text-muted", "Try asking:" }
            div { class: "suggestion-list",
                for question in questions {
                    SuggestionChip { question, on_pick }
                }
            }
        }
    }
}

#[component]
fn SuggestionChip(question: String, on_pick: EventHandler<String>) -> Element {
    let label = question.clone();
    rsx! {
        button {
            class: "tag-pill",
            r#type: "button",
            onclick: move |_| on_pick.call(question.clone()),
            "{label}"
        }
    }
}

#[component]
fn Diagram(url: String, on_zoom: EventHandler<String>) -> Element {
    let src = url.clone();
    rsx! {
        div { class: "diagram",
            img {
                src: "{src}",
                alt: "Generated dental diagram",
                onclick: move |_| on_zoom.call(url.clone()),
            }
            a {
                class: "action-btn diagram-download",
                href: "{src}",
                download: IMAGE_DOWNLOAD_NAME,
                title: "Download diagram",
                "Download"
            }
        }
    }
}

#[component]
fn ImageViewer(url: String, on_close: EventHandler<()>) -> Element {
    rsx! {
        div {
            class: "image-overlay",
            role: "dialog",
            tabindex: "0",
            autofocus: true,
            onclick: move |_| on_close.call(()),
            onkeydown: move |ev| {
                if ev.key() == Key::Escape {
                    on_close.call(());
                }
            },
            img {
                class: "image-zoomed",
                src: "{url}",
                alt: "Generated dental diagram - zoomed",
                onclick: move |ev| ev.stop_propagation(),
            }
            button {
                class: "btn btn-ghost image-close",
                r#type: "button",
                title: "Close image view",
                onclick: move |_| on_close.call(()),
                "Close"
            }
        }
    }
}
