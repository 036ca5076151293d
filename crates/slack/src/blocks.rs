use reacjilator_core::LanguageCode;
use serde::Serialize;

pub const UNSUPPORTED_LANGUAGE_TEXT: &str = "_Sorry, the language is not supported!_ :persevere:";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TextObject {
    #[serde(rename = "plain_text")]
    Plain { text: String },
    Mrkdwn { text: String },
}

impl TextObject {
    pub fn plain(text: impl Into<String>) -> Self {
        Self::Plain { text: text.into() }
    }

    pub fn mrkdwn(text: impl Into<String>) -> Self {
        Self::Mrkdwn { text: text.into() }
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Plain { text } | Self::Mrkdwn { text } => text,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Section { block_id: String, text: TextObject },
    Context { block_id: String, elements: Vec<TextObject> },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MessageTemplate {
    pub fallback_text: String,
    pub blocks: Vec<Block>,
}

impl MessageTemplate {
    /// Text of the leading section block, the part a later duplicate check compares.
    pub fn primary_text(&self) -> Option<&str> {
        match self.blocks.first() {
            Some(Block::Section { text, .. }) => Some(text.text()),
            _ => None,
        }
    }
}

pub struct MessageBuilder {
    fallback_text: String,
    blocks: Vec<Block>,
}

impl MessageBuilder {
    pub fn new(fallback_text: impl Into<String>) -> Self {
        Self { fallback_text: fallback_text.into(), blocks: Vec::new() }
    }

    pub fn section<F>(mut self, block_id: impl Into<String>, build: F) -> Self
    where
        F: FnOnce(&mut SectionBuilder),
    {
        let mut builder = SectionBuilder::default();
        build(&mut builder);
        self.blocks.push(Block::Section { block_id: block_id.into(), text: builder.build() });
        self
    }

    pub fn context<F>(mut self, block_id: impl Into<String>, build: F) -> Self
    where
        F: FnOnce(&mut ContextBuilder),
    {
        let mut builder = ContextBuilder::default();
        build(&mut builder);
        self.blocks.push(Block::Context { block_id: block_id.into(), elements: builder.build() });
        self
    }

    pub fn build(self) -> MessageTemplate {
        MessageTemplate { fallback_text: self.fallback_text, blocks: self.blocks }
    }
}

#[derive(Default)]
pub struct SectionBuilder {
    text: Option<TextObject>,
}

impl SectionBuilder {
    pub fn mrkdwn(&mut self, text: impl Into<String>) -> &mut Self {
        self.text = Some(TextObject::mrkdwn(text));
        self
    }

    fn build(self) -> TextObject {
        self.text.unwrap_or_else(|| TextObject::plain(""))
    }
}

#[derive(Default)]
pub struct ContextBuilder {
    elements: Vec<TextObject>,
}

impl ContextBuilder {
    pub fn mrkdwn(&mut self, text: impl Into<String>) -> &mut Self {
        self.elements.push(TextObject::mrkdwn(text));
        self
    }

    fn build(self) -> Vec<TextObject> {
        self.elements
    }
}

/// Threaded reply carrying a translation, attributed to the reaction that asked for it.
pub fn translation_message(
    translation: &str,
    reaction: &str,
    language: LanguageCode,
) -> MessageTemplate {
    MessageBuilder::new(format!("_Here is a translation to_ :{reaction}: _({language})_"))
        .section("reacji.translation.body.v1", |section| {
            section.mrkdwn(translation);
        })
        .context("reacji.translation.attribution.v1", |context| {
            context.mrkdwn(format!(
                "A translation of the original message to :{reaction}: _({language})_"
            ));
        })
        .build()
}

pub fn unsupported_language_message() -> MessageTemplate {
    MessageBuilder::new(UNSUPPORTED_LANGUAGE_TEXT)
        .section("reacji.translation.unsupported.v1", |section| {
            section.mrkdwn(UNSUPPORTED_LANGUAGE_TEXT);
        })
        .build()
}
