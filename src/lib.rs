//! CCB WhoIs Library
//!
//! Looks people up by name in Church Community Builder (CCB) and republishes
//! the XML person record as JSON for a chat-bot integration.
//!
//! # Modules
//!
//! - `api`: HTTP-facing components.
//! - `core`: Request building, transcoding and the lookup pipeline.
//! - `integrations`: External service clients.
//! - `app`: Router construction and middleware.
//! - `ccb_client`: CCB API client.
//! - `ccb_models`: CCB person record types.
//! - `config`: Configuration management.
//! - `errors`: Error handling types.
//! - `handlers`: HTTP request handlers.
//! - `name_query`: Free-text name to search parameters.
//! - `services`: WhoIs lookup pipeline.
//! - `transcoder`: XML to JSON conversion of CCB responses.

pub mod api;
pub mod core;
pub mod integrations;

pub mod app;
pub mod ccb_client;
pub mod ccb_models;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod name_query;
pub mod services;
pub mod transcoder;
