/// A message returned from a thread lookup, reduced to what translation needs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ThreadMessage {
    pub text: Option<String>,
    pub ts: String,
    pub thread_ts: Option<String>,
    pub bot_generated: bool,
    pub blocks: Vec<RenderedBlock>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderedBlock {
    pub block_type: String,
    pub text: Option<String>,
}

impl ThreadMessage {
    /// Replies go under the thread root when the message already sits in a thread.
    pub fn thread_anchor(&self) -> &str {
        self.thread_ts.as_deref().unwrap_or(&self.ts)
    }

    /// Text worth sending to a translator; empty text counts as absent.
    pub fn source_text(&self) -> Option<&str> {
        self.text.as_deref().filter(|text| !text.is_empty())
    }

    /// Text of the first rendered block.
    pub fn primary_text(&self) -> Option<&str> {
        self.blocks.first().and_then(|block| block.text.as_deref())
    }
}
