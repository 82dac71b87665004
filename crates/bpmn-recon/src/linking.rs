//! Attaches every flow to the nodes its arrow connects.
//!
//! Each endpoint is resolved containment first: among the candidate nodes
//! whose box, padded by the containment margin, contains the arrow point,
//! the one with the nearest center wins. When no box contains the point the
//! nearest center over all candidates wins instead.
//!
//! The tail resolves to the source and the head to the target. The target
//! search always excludes the chosen source, so jitter around one node
//! cannot produce a self-loop. Message flows additionally prefer a target
//! in a different pool than the source.
//!
//! Participants are never candidates. A flow whose endpoint cannot be
//! resolved is dropped.

use log::{debug, info, trace};

use bpmn_recon_core::{
    geometry::{Insets, Point},
    semantic::{Element, Flow, FlowKind},
};

use crate::config::LinkingConfig;

/// Resolves endpoints against a fixed set of elements.
pub struct Linker<'a> {
    elements: &'a [Element],
    candidates: Vec<usize>,
    margin: f32,
}

impl<'a> Linker<'a> {
    pub fn new(elements: &'a [Element], config: &LinkingConfig) -> Self {
        let candidates = elements
            .iter()
            .enumerate()
            .filter(|(_, element)| !element.is_participant())
            .map(|(index, _)| index)
            .collect();

        Self {
            elements,
            candidates,
            margin: config.containment_margin(),
        }
    }

    /// Returns the element indices of the source and target for `flow`.
    pub fn resolve(&self, flow: &Flow) -> Option<(usize, usize)> {
        let prediction = flow.prediction();

        let source = self.nearest(prediction.tail(), &self.candidates)?;

        let others: Vec<usize> = self
            .candidates
            .iter()
            .copied()
            .filter(|&index| index != source)
            .collect();

        let target = match flow.kind() {
            FlowKind::Sequence => self.nearest(prediction.head(), &others)?,
            FlowKind::Message => {
                let source_pool = self.owning_pool(source);
                let foreign: Vec<usize> = others
                    .iter()
                    .copied()
                    .filter(|&index| self.owning_pool(index) != source_pool)
                    .collect();

                if foreign.is_empty() {
                    debug!(
                        flow = flow.id().as_str();
                        "No message target outside the source pool, using all candidates"
                    );
                    self.nearest(prediction.head(), &others)?
                } else {
                    self.nearest(prediction.head(), &foreign)?
                }
            }
        };

        Some((source, target))
    }

    /// Index of the first participant whose box contains the element's center.
    fn owning_pool(&self, index: usize) -> Option<usize> {
        let center = self.elements[index].center();
        self.elements.iter().position(|element| {
            element
                .as_participant()
                .is_some_and(|participant| participant.bounds().contains_point(center))
        })
    }

    fn nearest(&self, point: Point, pool: &[usize]) -> Option<usize> {
        let padding = Insets::uniform(self.margin);
        let containing: Vec<usize> = pool
            .iter()
            .copied()
            .filter(|&index| {
                self.elements[index]
                    .bounds()
                    .add_padding(padding)
                    .contains_point(point)
            })
            .collect();

        let search = if containing.is_empty() {
            pool
        } else {
            &containing
        };

        let nearest = search.iter().copied().min_by(|&a, &b| {
            let distance_a = self.elements[a].center().distance(point);
            let distance_b = self.elements[b].center().distance(point);
            distance_a.total_cmp(&distance_b)
        })?;

        trace!(
            element = self.elements[nearest].id().as_str(),
            contained = !containing.is_empty();
            "Resolved endpoint"
        );
        Some(nearest)
    }
}

/// Links every flow to its source and target nodes.
///
/// Resolved flows are returned in input order with both references set, and
/// their identifiers are recorded in the `outgoing` list of the source and
/// the `incoming` list of the target. Unresolvable flows are dropped.
pub fn link_flows(elements: &mut [Element], flows: Vec<Flow>, config: &LinkingConfig) -> Vec<Flow> {
    info!(flows = flows.len(); "Linking flows");

    let resolved: Vec<(Flow, Option<(usize, usize)>)> = {
        let linker = Linker::new(elements, config);
        flows
            .into_iter()
            .map(|flow| {
                let endpoints = linker.resolve(&flow);
                (flow, endpoints)
            })
            .collect()
    };

    let mut linked = Vec::with_capacity(resolved.len());
    for (mut flow, endpoints) in resolved {
        let Some((source, target)) = endpoints else {
            debug!(flow = flow.id().as_str(); "Dropping flow with unresolvable endpoint");
            continue;
        };

        let source_id = elements[source].id().clone();
        let target_id = elements[target].id().clone();

        if let Some(node) = elements[source].as_node_mut() {
            node.add_outgoing(flow.id().clone());
        }
        if let Some(node) = elements[target].as_node_mut() {
            node.add_incoming(flow.id().clone());
        }

        trace!(
            flow = flow.id().as_str(),
            source = source_id.as_str(),
            target = target_id.as_str();
            "Linked flow"
        );
        flow.connect(source_id, target_id);
        linked.push(flow);
    }

    debug!(linked = linked.len(); "Flows linked");
    linked
}
