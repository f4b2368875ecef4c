pub mod chat;
pub mod markdown;
pub mod speech;

pub use chat::ChatView;
