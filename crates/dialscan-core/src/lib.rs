//! Core library for screenshot phone number extraction.
//!
//! This crate provides:
//! - An OCR capability trait with a pure-Rust ONNX implementation
//! - Phone number cleaning, validation and formatting per numbering scheme
//! - Candidate matching, confidence scoring and name/email association
//! - Contact data models and pipeline configuration

pub mod error;
pub mod models;
pub mod ocr;
pub mod contacts;

pub use error::{DialscanError, OcrError, Result};
pub use models::contact::{ContactSummary, ExtractedContact, NormalizedNumber, PhoneMatch, RawCandidate};
pub use models::config::DialscanConfig;
pub use ocr::{OcrResult, TextBox, TextRecognizer};
#[cfg(feature = "native")]
pub use ocr::PureOcrEngine;
pub use contacts::{ContactExtractor, ContactParser};
pub use contacts::rules::{IndianScheme, NumberingScheme};
