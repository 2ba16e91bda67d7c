#![forbid(unsafe_code)]

//! Pulse-generator settings menu, driven by scripted rotary-encoder input
//! and rendered to a character LCD frame.

pub mod app;
pub mod cli;
