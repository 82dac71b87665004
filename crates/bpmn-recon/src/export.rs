//! Export functionality for reconstructed diagrams.
//!
//! This module provides the [`Exporter`] trait that defines the interface for
//! turning a reconstructed [`Diagram`] into an exchange format. It is the
//! final stage of the reconstruction pipeline.
//!
//! # Pipeline Position
//!
//! ```text
//! Detections
//!     ↓ factory
//! Elements + Flows
//!     ↓ linking, text association
//! Linked, named graph
//!     ↓ partition, assemble
//! Diagram
//!     ↓ export (this module)
//! BPMN 2.0 XML
//! ```
//!
//! # Available Backends
//!
//! - [`bpmn`] — BPMN 2.0 XML via [`bpmn::BpmnExporter`]
//!
//! Export operations return [`Error`], which converts into
//! [`ReconError::Export`](crate::ReconError::Export) at the crate boundary.

/// BPMN 2.0 XML export backend.
pub mod bpmn;

use bpmn_recon_core::semantic::Diagram;

/// The document returned for images the detectors could not use.
///
/// A single start event in a single process. The string is a constant, so
/// repeated calls are byte-identical.
pub const FALLBACK_DOCUMENT: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8"?>"#,
    r#"<bpmn2:definitions xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" "#,
    r#"xmlns:bpmn2="http://www.omg.org/spec/BPMN/20100524/MODEL" "#,
    r#"xmlns:bpmndi="http://www.omg.org/spec/BPMN/20100524/DI" "#,
    r#"xmlns:dc="http://www.omg.org/spec/DD/20100524/DC" "#,
    r#"xmlns:di="http://www.omg.org/spec/DD/20100524/DI" "#,
    r#"xsi:schemaLocation="http://www.omg.org/spec/BPMN/20100524/MODEL BPMN20.xsd" "#,
    r#"id="sample-diagram" targetNamespace="http://bpmn.io/schema/bpmn">"#,
    r#"<bpmn2:process id="Process_1" isExecutable="false">"#,
    r#"<bpmn2:startEvent id="StartEvent_1" />"#,
    r#"</bpmn2:process>"#,
    r#"<bpmndi:BPMNDiagram id="BPMNDiagram_1">"#,
    r#"<bpmndi:BPMNPlane id="BPMNPlane_1" bpmnElement="Process_1">"#,
    r#"<bpmndi:BPMNShape id="_BPMNShape_StartEvent_2" bpmnElement="StartEvent_1">"#,
    r#"<dc:Bounds height="36.0" width="36.0" x="412.0" y="240.0" />"#,
    r#"</bpmndi:BPMNShape>"#,
    r#"</bpmndi:BPMNPlane>"#,
    r#"</bpmndi:BPMNDiagram>"#,
    r#"</bpmn2:definitions>"#,
);

/// Abstraction for diagram export backends.
///
/// Implementors write a [`Diagram`] in a specific output format into their
/// own buffer. See the [`bpmn`] module for the built-in BPMN implementation.
pub trait Exporter {
    /// Exports a reconstructed diagram.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the diagram cannot be expressed in the
    /// target format, or [`Error::Xml`] if writing the markup fails.
    fn export_diagram(&mut self, diagram: &Diagram) -> Result<(), Error>;
}

/// Errors that can occur during diagram export.
#[derive(Debug)]
pub enum Error {
    /// A rendering or conversion failure described by `message`.
    Render(String),
    /// A failure reported by the XML writer.
    Xml(quick_xml::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Xml(err) => write!(f, "XML error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Xml(err) => Some(err),
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Self::Xml(err)
    }
}
