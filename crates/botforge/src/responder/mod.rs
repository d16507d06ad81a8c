//! Multilingual canned-response action

pub mod language;
pub mod messages;
pub mod resolver;

pub use language::{Language, LanguageDetector, WhatlangDetector};
pub use messages::{LocalizedMessage, ResponderMessages};
pub use resolver::{
    ACTION_NAME, DETECTED_LANGUAGE_SLOT, Resolution, ResolutionSource, ResponseResolver,
};
