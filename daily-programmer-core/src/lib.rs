#![doc = "daily-programmer-core: core logic library for daily-programmer."]

//! This crate turns Daily Programmer challenge announcements posted in a chat
//! channel into a Markdown page and publishes it to the `gh-pages` branch of a
//! git repository.
//!
//! Fetching the channel history is left to the caller; everything from a raw
//! message to a pushed commit lives here.
//!
//! # Usage
//! Build a [`helper::DailyProgrammerHelper`] with
//! [`helper::DailyProgrammerHelper::from_config`] and feed it a
//! [`contract::ChannelHistory`] or a single [`contract::Message`].

pub mod aggregate;
pub mod config;
pub mod contract;
pub mod helper;
pub mod matcher;
pub mod publish;
pub mod transform;
pub mod writer;
