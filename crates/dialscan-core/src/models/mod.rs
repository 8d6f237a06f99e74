//! Data models for extracted contacts and pipeline configuration.

pub mod config;
pub mod contact;
