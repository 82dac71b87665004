//! Turns raw predictions into typed elements and flows.
//!
//! Each prediction's class label is looked up in the category tables of
//! [`bpmn_recon_core::category`]. Labels with no entry are detector noise and
//! are skipped; so are data associations, which the detector recognizes but
//! the diagram does not model.

use log::{debug, trace};

use bpmn_recon_core::{
    category::{ElementCategory, FlowCategory},
    identifier::IdRegistry,
    prediction::{ElementPrediction, FlowPrediction},
    semantic::{Element, Flow, FlowNode, Participant},
};

/// Builds one element per mappable object prediction, in input order.
pub fn build_elements(predictions: &[ElementPrediction], registry: &mut IdRegistry) -> Vec<Element> {
    predictions
        .iter()
        .filter_map(|prediction| build_element(prediction, registry))
        .collect()
}

fn build_element(prediction: &ElementPrediction, registry: &mut IdRegistry) -> Option<Element> {
    let Some(category) = ElementCategory::from_label(prediction.label()) else {
        debug!(label = prediction.label(); "Skipping object with unmapped label");
        return None;
    };

    let element = match category {
        ElementCategory::Node { kind, subtype } => {
            let id = registry.generate(kind.id_prefix());
            Element::Node(FlowNode::new(id, kind, subtype, prediction.clone()))
        }
        ElementCategory::Participant => {
            let id = registry.generate("Participant");
            let process_ref = registry.generate("Process");
            Element::Participant(Participant::new(id, process_ref, prediction.clone()))
        }
    };

    trace!(id = element.id().as_str(), label = prediction.label(); "Built element");
    Some(element)
}

/// Builds one unlinked flow per mappable keypoint prediction, in input order.
pub fn build_flows(predictions: &[FlowPrediction], registry: &mut IdRegistry) -> Vec<Flow> {
    predictions
        .iter()
        .filter_map(|prediction| build_flow(prediction, registry))
        .collect()
}

fn build_flow(prediction: &FlowPrediction, registry: &mut IdRegistry) -> Option<Flow> {
    let Some(category) = FlowCategory::from_label(prediction.label()) else {
        debug!(label = prediction.label(); "Skipping arrow with unmapped label");
        return None;
    };
    let Some(kind) = category.flow_kind() else {
        debug!(category:? = category; "Skipping arrow without a flow variant");
        return None;
    };

    let id = registry.generate(kind.id_prefix());
    trace!(id = id.as_str(), kind:% = kind; "Built flow");
    Some(Flow::new(id, kind, prediction.clone()))
}
