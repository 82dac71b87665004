//! Semantic diagram model types.
//!
//! This module contains the graph that the reconstruction engine builds from
//! raw detections and that the exporter serializes.
//!
//! # Pipeline Position
//!
//! ```text
//! Detections (boxes, arrows, OCR words)
//!     ↓ factory
//! Elements + unlinked Flows
//!     ↓ linking, text association
//! Linked, named Elements and Flows
//!     ↓ partition + assemble
//! Diagram (these types)
//!     ↓ export
//! BPMN 2.0 XML
//! ```
//!
//! # Organization
//!
//! - [`element`] - Flow nodes and participants: [`Element`], [`FlowNode`], [`Participant`]
//! - [`flow`] - Sequence and message flows: [`Flow`], [`FlowKind`]
//! - [`diagram`] - Containers: [`Process`], [`Collaboration`], [`Diagram`]

pub mod diagram;
pub mod element;
pub mod flow;

pub use diagram::*;
pub use element::*;
pub use flow::*;

use crate::prediction::TextFragment;

/// Joins name fragments with single spaces, in attachment order.
pub(crate) fn display_name(fragments: &[TextFragment]) -> String {
    fragments
        .iter()
        .map(TextFragment::text)
        .collect::<Vec<_>>()
        .join(" ")
}
