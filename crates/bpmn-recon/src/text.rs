//! Attaches recognized words to the elements and flows they label.
//!
//! Every fragment goes to the single candidate whose anchor is nearest to the
//! fragment center. The anchor of a node or flow is its center. A pool is
//! anchored at the middle of its left edge, where its title is written.

use log::{debug, info, trace};

use bpmn_recon_core::{
    geometry::Point,
    prediction::TextFragment,
    semantic::{Element, Flow},
};

use crate::config::TextConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Element(usize),
    Flow(usize),
}

fn anchor(element: &Element) -> Point {
    match element {
        Element::Node(node) => node.center(),
        Element::Participant(participant) => participant.label_anchor(),
    }
}

/// Appends each fragment to the name of its nearest element or flow.
///
/// Fragments are consumed in input order, so a name is built in reading order
/// of the OCR output. Fragments farther than `max_distance` from every
/// candidate are discarded; without a limit every fragment is attached as
/// long as at least one candidate exists.
pub fn associate_text(
    elements: &mut [Element],
    flows: &mut [Flow],
    fragments: Vec<TextFragment>,
    config: &TextConfig,
) {
    info!(fragments = fragments.len(); "Associating text");

    let anchors: Vec<(Target, Point)> = elements
        .iter()
        .enumerate()
        .map(|(index, element)| (Target::Element(index), anchor(element)))
        .chain(
            flows
                .iter()
                .enumerate()
                .map(|(index, flow)| (Target::Flow(index), flow.center())),
        )
        .collect();

    let mut discarded = 0usize;
    for fragment in fragments {
        let center = fragment.center();
        let Some((target, distance)) = anchors
            .iter()
            .map(|&(target, point)| (target, point.distance(center)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
        else {
            discarded += 1;
            continue;
        };

        if config.max_distance().is_some_and(|limit| distance > limit) {
            trace!(text = fragment.text(), distance; "Fragment too far from any candidate");
            discarded += 1;
            continue;
        }

        match target {
            Target::Element(index) => {
                trace!(text = fragment.text(), element = elements[index].id().as_str(); "Attached text");
                elements[index].push_name(fragment);
            }
            Target::Flow(index) => {
                trace!(text = fragment.text(), flow = flows[index].id().as_str(); "Attached text");
                flows[index].push_name(fragment);
            }
        }
    }

    if discarded > 0 {
        debug!(discarded; "Discarded unattached text fragments");
    }
}
