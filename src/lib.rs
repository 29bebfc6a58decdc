//! Opt-Out IVR - telephony webhook service for voice opt-outs
//!
//! A stateless decision engine: each webhook from the telephony platform
//! carries the collect attempt and the caller's key presses, and the service
//! answers with the next instructions (play, collect, pause). Pressing `1`
//! registers an opt-out with the consent service before confirming.
//!
//! The crate follows a ports-and-adapters layout:
//! - `domain` - verbs, classification and the decision table
//! - `ports` - traits for opt-out registration and the audit log
//! - `application` - command/query handlers
//! - `adapters` - HTTP routers, the consent service client, storage
//! - `config` - environment-driven configuration

pub mod adapters;
pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
