//! Slack side of the reaction translator.
//!
//! - **Socket Mode** (`socket`) - WebSocket event loop with reconnection, no public URL needed
//! - **Events** (`events`) - envelope parsing and routing of `reaction_added`
//! - **Web API** (`web`) - `conversations.replies` and `chat.postMessage`
//! - **Block Kit** (`blocks`) - translation and apology replies
//! - **Orchestration** (`translate`) - reaction to threaded translation
//!
//! # Getting Started
//!
//! 1. Create a Slack app at https://api.slack.com/apps
//! 2. Enable Socket Mode and subscribe to the `reaction_added` bot event
//! 3. Grant `reactions:read`, `channels:history`, `groups:history` and `chat:write`
//! 4. Set env vars: `SLACK_APP_TOKEN`, `SLACK_BOT_TOKEN`
//!
//! # Architecture
//!
//! ```text
//! Socket Mode → EventDispatcher → ReactionAddedHandler → ReactionTranslator
//!                                                          ↓          ↓
//!                                                   Slack Web API  Translator
//! ```

pub mod blocks;
pub mod events;
pub mod socket;
pub mod translate;
pub mod web;
