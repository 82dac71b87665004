//! Builds the final [`Diagram`] from a partition.

use log::debug;

use bpmn_recon_core::{
    identifier::IdRegistry,
    semantic::{Collaboration, Diagram},
};

use crate::partition::Partition;

/// Assembles the diagram root.
///
/// A collaboration is created only when at least one pool was detected; it
/// lists every pool, including those whose process turned out empty.
pub fn assemble(partition: Partition, registry: &mut IdRegistry) -> Diagram {
    let (processes, participants, message_flows) = partition.into_parts();

    let collaboration = if participants.is_empty() {
        None
    } else {
        Some(Collaboration::new(
            registry.generate("Collaboration"),
            participants,
            message_flows,
        ))
    };

    let id = registry.generate("BPMNDiagram");
    let definitions_id = registry.generate("Definitions");

    debug!(
        diagram = id.as_str(),
        processes = processes.len(),
        collaboration = collaboration.is_some();
        "Diagram assembled"
    );

    Diagram::new(id, definitions_id, processes, collaboration)
}

#[cfg(test)]
mod tests {
    use bpmn_recon_core::{
        geometry::Bounds,
        identifier::Id,
        prediction::ElementPrediction,
        semantic::{Element, FlowNode, NodeKind, Participant},
    };

    use super::*;
    use crate::{config::PoolConfig, partition::partition};

    fn task(id: &str) -> Element {
        Element::Node(FlowNode::new(
            Id::new(id),
            NodeKind::Task,
            "task",
            ElementPrediction::new(9, Bounds::from_corners(10.0, 10.0, 50.0, 50.0)),
        ))
    }

    #[test]
    fn test_assemble_without_pools() {
        let mut registry = IdRegistry::with_seed(11);
        let split = partition(vec![task("A")], Vec::new(), &mut registry, &PoolConfig::default());

        let diagram = assemble(split, &mut registry);

        assert!(diagram.collaboration().is_none());
        assert_eq!(diagram.processes().len(), 1);
        assert!(diagram.id().as_str().starts_with("BPMNDiagram_"));
        assert!(diagram.definitions_id().as_str().starts_with("Definitions_"));
    }

    #[test]
    fn test_assemble_with_pools_lists_every_pool() {
        let mut registry = IdRegistry::with_seed(12);
        let elements = vec![
            Element::Participant(Participant::new(
                Id::new("Full"),
                Id::new("Process_full"),
                ElementPrediction::new(30, Bounds::from_corners(0.0, 0.0, 100.0, 100.0)),
            )),
            Element::Participant(Participant::new(
                Id::new("Empty"),
                Id::new("Process_empty"),
                ElementPrediction::new(30, Bounds::from_corners(0.0, 200.0, 100.0, 300.0)),
            )),
            task("A"),
        ];
        let split = partition(elements, Vec::new(), &mut registry, &PoolConfig::default());

        let diagram = assemble(split, &mut registry);

        let collaboration = diagram.collaboration().expect("pools yield a collaboration");
        assert!(collaboration.id().as_str().starts_with("Collaboration_"));
        assert_eq!(collaboration.participants().len(), 2);
        assert_eq!(collaboration.participants()[1].process_ref(), None);
        assert_eq!(diagram.processes().len(), 1);
        assert_eq!(diagram.processes()[0].id(), &Id::new("Process_full"));
    }
}
