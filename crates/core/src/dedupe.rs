use crate::message::ThreadMessage;

/// True when a bot-generated message in the thread already carries `candidate`
/// as its primary block text.
pub fn already_posted(thread: &[ThreadMessage], candidate: &str) -> bool {
    thread
        .iter()
        .any(|message| message.bot_generated && message.primary_text() == Some(candidate))
}
