//! Interactive REPL for the vouch runtime.

mod chatbot;

pub use chatbot::{ChatBot, ChatBotConfig, StdinReviewer, demo_corpus};
