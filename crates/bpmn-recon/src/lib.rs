//! bpmn-recon - Reconstructs BPMN 2.0 diagrams from detector output.
//!
//! Three independent detectors look at an image of a process diagram: an
//! object detector finds elements and pools, a keypoint detector finds arrows
//! with their head and tail, and an OCR engine finds words. This crate turns
//! those unlinked detections into a connected, named, pool-partitioned graph
//! and writes it as a BPMN 2.0 document.

pub mod config;
pub mod detections;
pub mod export;

mod assemble;
mod error;
mod factory;
mod linking;
mod partition;
mod text;

pub use bpmn_recon_core::{category, geometry, identifier, prediction, semantic};

pub use detections::Detections;
pub use error::ReconError;

use log::{debug, info, trace};

use bpmn_recon_core::identifier::IdRegistry;

use config::AppConfig;
use export::{Exporter, bpmn::BpmnExporter};

/// Builder for reconstructing and rendering BPMN diagrams.
///
/// This provides an API for processing detector output through decoding,
/// reconstruction, and rendering stages.
///
/// # Examples
///
/// ```rust
/// use bpmn_recon::{DiagramBuilder, config::AppConfig};
///
/// let source = r#"{
///     "objects": [
///         {"class_id": 21, "bbox": [0, 0, 36, 36]},
///         {"class_id": 16, "bbox": [200, 0, 236, 36]}
///     ],
///     "keypoints": [
///         {"class_id": 0, "bbox": [36, 16, 200, 20], "head": [200, 18], "tail": [36, 18]}
///     ]
/// }"#;
///
/// let builder = DiagramBuilder::new(AppConfig::default().with_seed(Some(1)));
///
/// // Decode detector output
/// let detections = builder.parse(source)
///     .expect("Failed to parse");
///
/// // Reconstruct the semantic model
/// let diagram = builder.reconstruct(&detections);
/// assert_eq!(diagram.flows().count(), 1);
///
/// // Render it as BPMN
/// let xml = builder.render_bpmn(&diagram)
///     .expect("Failed to render");
/// assert!(xml.contains("bpmn:sequenceFlow"));
/// ```
#[derive(Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration with the matching tolerances
    ///   and identifier settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Decode detector output from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ReconError::Input`] when the JSON is malformed or does not
    /// have the expected shape.
    pub fn parse(&self, source: &str) -> Result<Detections, ReconError> {
        info!("Parsing detections");

        let detections = Detections::from_json(source)?;

        debug!(
            objects = detections.objects.len(),
            keypoints = detections.keypoints.len(),
            texts = detections.texts.len(),
            unusable_image = detections.unusable_image;
            "Detections parsed successfully"
        );
        Ok(detections)
    }

    /// Reconstruct a semantic diagram from detections.
    ///
    /// Runs the factory, linking, text association, partitioning, and
    /// assembly stages in order. Every call uses a fresh identifier
    /// registry. This never fails: noisy input degrades the result instead.
    pub fn reconstruct(&self, detections: &Detections) -> semantic::Diagram {
        info!("Reconstructing diagram");

        let mut registry = match self.config.ids().seed() {
            Some(seed) => IdRegistry::with_seed(seed),
            None => IdRegistry::new(),
        };

        let mut elements = factory::build_elements(&detections.element_predictions(), &mut registry);
        let flows = factory::build_flows(&detections.flow_predictions(), &mut registry);
        debug!(elements = elements.len(), flows = flows.len(); "Elements and flows built");

        let mut flows = linking::link_flows(&mut elements, flows, self.config.linking());

        text::associate_text(
            &mut elements,
            &mut flows,
            detections.text_fragments(),
            self.config.text(),
        );

        let split = partition::partition(elements, flows, &mut registry, self.config.pool());
        let diagram = assemble::assemble(split, &mut registry);

        info!(
            processes = diagram.processes().len(),
            nodes = diagram.nodes().count(),
            flows = diagram.flows().count();
            "Diagram reconstructed"
        );
        trace!(diagram:?; "Reconstructed diagram");

        diagram
    }

    /// Render a semantic diagram to a BPMN 2.0 XML string.
    ///
    /// # Errors
    ///
    /// Returns [`ReconError::Export`] if the diagram cannot be written, for
    /// example when a flow has an unresolved endpoint.
    pub fn render_bpmn(&self, diagram: &semantic::Diagram) -> Result<String, ReconError> {
        info!("Rendering BPMN");

        let mut exporter = BpmnExporter::new();
        exporter.export_diagram(diagram)?;
        let xml = exporter.finish()?;

        info!(bytes = xml.len(); "BPMN rendered successfully");
        Ok(xml)
    }

    /// Convert detections straight to a BPMN document.
    ///
    /// Detections flagged as coming from an unusable image bypass the
    /// pipeline and yield [`export::FALLBACK_DOCUMENT`].
    ///
    /// # Errors
    ///
    /// Returns [`ReconError::Export`] if rendering fails.
    pub fn convert(&self, detections: &Detections) -> Result<String, ReconError> {
        if detections.unusable_image {
            info!("Unusable image, returning the fallback document");
            return Ok(export::FALLBACK_DOCUMENT.to_string());
        }

        let diagram = self.reconstruct(detections);
        self.render_bpmn(&diagram)
    }
}
