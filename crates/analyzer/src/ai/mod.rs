//! Generative model access via the Claude API

pub mod client;

pub use client::ClaudeClient;
