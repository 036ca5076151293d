//! Platform-independent pieces of the reaction translator: the country to
//! language table, reaction resolution, duplicate detection, configuration,
//! and the translation seam.

pub mod config;
pub mod dedupe;
pub mod errors;
pub mod langcode;
pub mod message;
pub mod reaction;
pub mod translation;

pub use dedupe::already_posted;
pub use errors::TranslateError;
pub use langcode::{LanguageCode, LanguageTable};
pub use message::{RenderedBlock, ThreadMessage};
pub use reaction::ReactionResolver;
pub use translation::{TranslationResult, Translator};
