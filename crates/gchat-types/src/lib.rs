//! Shared types for the Google Chat translator bot
//!
//! Google Chat delivers interaction events as loosely shaped JSON. This crate
//! turns that JSON into a typed [`InboundEvent`] once, at the boundary, and
//! defines the [`ReplyPayload`] the bot answers with.

pub mod events;
pub mod reply;

pub use events::{InboundEvent, MessagePayload, Space, SpaceType, Thread};
pub use reply::ReplyPayload;
