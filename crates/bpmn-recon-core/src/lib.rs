//! BPMN Reconstruction Core Types
//!
//! This crate provides the foundational types used to rebuild a BPMN diagram
//! from independent detector outputs. It includes:
//!
//! - **Geometry**: Points and regions in image space ([`geometry`] module)
//! - **Predictions**: Raw detector records ([`prediction`] module)
//! - **Identifiers**: Per-pass unique identifiers ([`identifier::IdRegistry`])
//! - **Categories**: Detector label tables ([`category`] module)
//! - **Semantic**: The reconstructed diagram graph ([`semantic`] module)

pub mod category;
pub mod geometry;
pub mod identifier;
pub mod prediction;
pub mod semantic;
