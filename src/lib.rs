//! Chat with Dr. Rahul Birajdar, a dental-advice assistant.
//!
//! The core is UI-agnostic: [`session::ChatSession`] owns the conversation and
//! the single pending request, [`parser`] normalizes model replies and
//! [`conversation::ConversationStore`] persists history. The Dioxus shell in
//! [`ui`] is built only with a platform feature.

pub mod ai;
pub mod config;
pub mod conversation;
pub mod error;
pub mod logging;
pub mod parser;
pub mod session;
pub mod speech;
pub mod storage;
pub mod types;

#[cfg(feature = "dioxus")]
pub mod theme;
#[cfg(feature = "dioxus")]
pub mod ui;
#[cfg(feature = "dioxus")]
pub mod views;

pub use error::{ChatError, ChatResult};
