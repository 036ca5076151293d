use crate::langcode::{LanguageCode, LanguageTable};

const FLAG_PREFIX: &str = "flag-";

/// Maps reaction names to target languages.
#[derive(Clone, Debug, Default)]
pub struct ReactionResolver {
    table: LanguageTable,
}

impl ReactionResolver {
    pub fn new(table: LanguageTable) -> Self {
        Self { table }
    }

    /// Returns `None` for reactions that do not name a supported country.
    pub fn resolve(&self, reaction: &str) -> Option<LanguageCode> {
        country_candidate(reaction).and_then(|country| self.table.get(country))
    }

    pub fn table(&self) -> &LanguageTable {
        &self.table
    }
}

/// `flag-br` yields `br`; anything else is its own candidate.
pub fn country_candidate(reaction: &str) -> Option<&str> {
    let Some(rest) = reaction.strip_prefix(FLAG_PREFIX) else {
        return Some(reaction);
    };

    let end = rest.find(|ch: char| !is_word_char(ch)).unwrap_or(rest.len());
    let token = &rest[..end];
    (!token.is_empty()).then_some(token)
}

fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}
