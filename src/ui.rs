use crate::ai::{ModelBackend, UnconfiguredBackend, backend_from_settings};
use crate::config::Settings;
use crate::conversation::ConversationStore;
use crate::session::ChatSession;
use crate::storage::KeyValueStore;
use crate::theme::APP_CSS;
use crate::views::ChatView;
use dioxus::prelude::*;
use std::sync::Arc;
use tracing::{error, warn};

const PERSONA_TITLE: &str = "Dr. Rahul Birajdar, BDS - Dental Specialist";
const MODEL_DOCS_URL: &str =
    "https://ai.google.dev/gemini-api/docs/models/gemini#gemini-2.5-flash-image";

pub type AppSession = ChatSession<Arc<dyn KeyValueStore>>;

/// Shared handle to the model backend, provided through context.
#[derive(Clone)]
pub struct BackendHandle(pub Arc<dyn ModelBackend>);

fn load_settings() -> Settings {
    Settings::from_env().unwrap_or_else(|err| {
        warn!(error = %err, "invalid configuration, falling back to defaults");
        Settings::default()
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn open_storage(settings: &Settings) -> Arc<dyn KeyValueStore> {
    use crate::storage::FileStore;
    match &settings.data_dir {
        Some(dir) => Arc::new(FileStore::new(dir.clone())),
        None => Arc::new(FileStore::in_data_dir()),
    }
}

#[cfg(target_arch = "wasm32")]
fn open_storage(_settings: &Settings) -> Arc<dyn KeyValueStore> {
    Arc::new(crate::storage::MemoryStore::new())
}

fn open_backend(settings: &Settings) -> BackendHandle {
    match backend_from_settings(settings) {
        Ok(backend) => BackendHandle(backend),
        Err(err) => {
            error!(error = %err, "failed to initialize AI backend");
            BackendHandle(Arc::new(UnconfiguredBackend))
        }
    }
}

#[component]
pub fn App() -> Element {
    let settings = use_hook(load_settings);
    let backend = settings.clone();
    use_context_provider(move || open_backend(&backend));
    let session = use_signal(move || {
        let store = ConversationStore::with_key(open_storage(&settings), settings.history_key.clone());
        ChatSession::open(store)
    });

    rsx! {
        style { dangerous_inner_html: APP_CSS }
        AppHeader { session }
        ChatView { session }
    }
}

#[component]
fn AppHeader(session: Signal<AppSession>) -> Element {
    let mut session = session;
    rsx! {
        div { class: "header no-divider",
            div { class: "header-content",
                div { class: "hstack", style: "gap: 0.75rem; align-items: center;",
                    div { class: "avatar assistant large", "\u{1F468}\u{200D}\u{2695}\u{FE0F}" }
                    div {
                        h1 { class: "header-title", "{PERSONA_TITLE}" }
                        a {
                            class: "header-link",
                            href: MODEL_DOCS_URL,
                            target: "_blank",
                            rel: "noopener noreferrer",
                            "Powered by Gemini 2.5 Flash Image"
                        }
                    }
                }
                button {
                    class: "btn btn-ghost",
                    r#type: "button",
                    title: "Start a new chat",
                    onclick: move |_| session.with_mut(|s| s.start_new_conversation()),
                    "New Chat"
                }
            }
        }
    }
}
