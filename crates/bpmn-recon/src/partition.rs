//! Distributes nodes and flows over the processes of the detected pools.
//!
//! Without pools, a single process owns everything. With pools, ownership is
//! decided in two rounds:
//!
//! 1. Each pool, in detection order, claims every unclaimed node and flow
//!    whose box lies strictly inside its own box.
//! 2. Unclaimed message flows belong to the collaboration. Any other
//!    leftover goes to the nearest pool whose process already owns
//!    something, measured center to center. A pool that received such
//!    leftovers is grown until every node it owns fits inside it.
//!
//! A pool whose process stays empty loses its process reference.

use indexmap::IndexSet;
use log::{debug, info, trace};

use bpmn_recon_core::{
    geometry::{Bounds, Point},
    identifier::IdRegistry,
    semantic::{Element, Flow, FlowKind, FlowNode, Participant, Process},
};

use crate::config::PoolConfig;

/// Outcome of partitioning: the owning processes plus what the
/// collaboration will hold.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    processes: Vec<Process>,
    participants: Vec<Participant>,
    message_flows: Vec<Flow>,
}

impl Partition {
    pub fn into_parts(self) -> (Vec<Process>, Vec<Participant>, Vec<Flow>) {
        (self.processes, self.participants, self.message_flows)
    }
}

/// An item waiting for an owner.
enum Item {
    Node(FlowNode),
    Flow(Flow),
}

impl Item {
    fn bounds(&self) -> Bounds {
        match self {
            Self::Node(node) => node.bounds(),
            Self::Flow(flow) => flow.bounds(),
        }
    }

    fn center(&self) -> Point {
        match self {
            Self::Node(node) => node.center(),
            Self::Flow(flow) => flow.center(),
        }
    }
}

/// Splits linked elements and flows into processes.
pub fn partition(
    elements: Vec<Element>,
    flows: Vec<Flow>,
    registry: &mut IdRegistry,
    config: &PoolConfig,
) -> Partition {
    let mut participants = Vec::new();
    let mut nodes = Vec::new();
    for element in elements {
        match element {
            Element::Node(node) => nodes.push(node),
            Element::Participant(participant) => participants.push(participant),
        }
    }

    if participants.is_empty() {
        info!(nodes = nodes.len(), flows = flows.len(); "No pools detected, using a single process");
        let mut process = Process::new(registry.generate("Process"));
        nodes.into_iter().for_each(|node| process.push_node(node));
        flows.into_iter().for_each(|flow| process.push_flow(flow));
        return Partition {
            processes: vec![process],
            participants,
            message_flows: Vec::new(),
        };
    }

    info!(pools = participants.len(), nodes = nodes.len(); "Partitioning into pools");

    let mut pending: Vec<Option<Item>> = nodes
        .into_iter()
        .map(Item::Node)
        .chain(flows.into_iter().map(Item::Flow))
        .map(Some)
        .collect();

    // Round one: strict containment, first pool wins.
    let mut owned: Vec<Vec<Item>> = participants.iter().map(|_| Vec::new()).collect();
    for (pool_index, participant) in participants.iter().enumerate() {
        let pool_bounds = participant.bounds();
        for slot in pending.iter_mut() {
            if slot
                .as_ref()
                .is_some_and(|item| pool_bounds.strictly_contains(&item.bounds()))
            {
                owned[pool_index].extend(slot.take());
            }
        }
        trace!(pool = participant.id().as_str(), claimed = owned[pool_index].len(); "Pool claimed contained items");
    }

    // Unclaimed message flows cross pools and stay with the collaboration.
    let mut message_flows = Vec::new();
    let mut orphans = Vec::new();
    for item in pending.into_iter().flatten() {
        match item {
            Item::Flow(flow) if flow.kind() == FlowKind::Message => message_flows.push(flow),
            item => orphans.push(item),
        }
    }

    // Round two: leftovers go to the nearest pool that owns something.
    let non_empty: Vec<usize> = (0..participants.len())
        .filter(|&index| !owned[index].is_empty())
        .collect();
    let all: Vec<usize> = (0..participants.len()).collect();
    let eligible = if non_empty.is_empty() { &all } else { &non_empty };

    let mut repaired: IndexSet<usize> = IndexSet::new();
    for item in orphans {
        let center = item.center();
        let Some(pool_index) = eligible.iter().copied().min_by(|&a, &b| {
            let distance_a = participants[a].center().distance(center);
            let distance_b = participants[b].center().distance(center);
            distance_a.total_cmp(&distance_b)
        }) else {
            continue;
        };

        debug!(pool = participants[pool_index].id().as_str(); "Assigning orphan to nearest pool");
        owned[pool_index].push(item);
        repaired.insert(pool_index);
    }

    for &pool_index in &repaired {
        let covered = owned[pool_index]
            .iter()
            .filter_map(|item| match item {
                Item::Node(node) => Some(node.bounds()),
                Item::Flow(_) => None,
            })
            .reduce(|acc, bounds| acc.merge(&bounds));

        if let Some(covered) = covered {
            let participant = &participants[pool_index];
            let grown = participant
                .bounds()
                .grow_to_cover(&covered, config.boundary_margin());
            if grown != participant.bounds() {
                debug!(pool = participant.id().as_str(); "Growing pool to cover its elements");
                let resized = participant.with_bounds(grown);
                participants[pool_index] = resized;
            }
        }
    }

    let mut processes = Vec::new();
    for (participant, items) in participants.iter_mut().zip(owned) {
        if items.is_empty() {
            if let Some(process_ref) = participant.clear_process_ref() {
                debug!(pool = participant.id().as_str(), process = process_ref.as_str(); "Pool owns nothing, dropping its process");
            }
            continue;
        }
        let Some(process_ref) = participant.process_ref() else {
            continue;
        };

        let mut process = Process::new(process_ref.clone());
        for item in items {
            match item {
                Item::Node(node) => process.push_node(node),
                Item::Flow(flow) => process.push_flow(flow),
            }
        }
        processes.push(process);
    }

    debug!(processes = processes.len(), message_flows = message_flows.len(); "Partitioning finished");

    Partition {
        processes,
        participants,
        message_flows,
    }
}

#[cfg(test)]
mod tests {
    use bpmn_recon_core::{
        identifier::Id,
        prediction::{ElementPrediction, FlowPrediction},
        semantic::NodeKind,
    };
    use float_cmp::assert_approx_eq;

    use super::*;

    impl Partition {
        fn processes(&self) -> &[Process] {
            &self.processes
        }

        fn participants(&self) -> &[Participant] {
            &self.participants
        }

        fn message_flows(&self) -> &[Flow] {
            &self.message_flows
        }
    }

    fn task(id: &str, x1: f32, y1: f32, x2: f32, y2: f32) -> Element {
        Element::Node(FlowNode::new(
            Id::new(id),
            NodeKind::Task,
            "task",
            ElementPrediction::new(9, Bounds::from_corners(x1, y1, x2, y2)),
        ))
    }

    fn pool(id: &str, x1: f32, y1: f32, x2: f32, y2: f32) -> Element {
        Element::Participant(Participant::new(
            Id::new(id),
            Id::new(&format!("Process_{id}")),
            ElementPrediction::new(30, Bounds::from_corners(x1, y1, x2, y2)),
        ))
    }

    fn flow(id: &str, kind: FlowKind, x1: f32, y1: f32, x2: f32, y2: f32) -> Flow {
        let mut flow = Flow::new(
            Id::new(id),
            kind,
            FlowPrediction::new(
                0,
                Bounds::from_corners(x1, y1, x2, y2),
                Point::new(x2, y2),
                Point::new(x1, y1),
            ),
        );
        flow.connect(Id::new("a"), Id::new("b"));
        flow
    }

    fn node_ids(process: &Process) -> Vec<&str> {
        process.nodes().iter().map(|node| node.id().as_str()).collect()
    }

    #[test]
    fn test_without_pools_single_process_owns_everything() {
        let mut registry = IdRegistry::with_seed(1);
        let elements = vec![task("A", 0.0, 0.0, 10.0, 10.0), task("B", 50.0, 0.0, 60.0, 10.0)];
        let flows = vec![
            flow("S", FlowKind::Sequence, 10.0, 5.0, 50.0, 5.0),
            flow("M", FlowKind::Message, 10.0, 5.0, 50.0, 5.0),
        ];

        let partition = partition(elements, flows, &mut registry, &PoolConfig::default());

        assert!(partition.participants().is_empty());
        assert_eq!(partition.processes().len(), 1);
        let process = &partition.processes()[0];
        assert!(process.id().as_str().starts_with("Process_"));
        assert_eq!(node_ids(process), vec!["A", "B"]);
        assert_eq!(process.flows().len(), 2);
        assert!(partition.message_flows().is_empty());
    }

    #[test]
    fn test_empty_input_still_yields_one_process() {
        let mut registry = IdRegistry::with_seed(2);
        let partition = partition(Vec::new(), Vec::new(), &mut registry, &PoolConfig::default());

        assert_eq!(partition.processes().len(), 1);
        assert!(partition.processes()[0].is_empty());
    }

    #[test]
    fn test_strict_containment_three_in_one_out() {
        let mut registry = IdRegistry::with_seed(3);
        let elements = vec![
            pool("P", 0.0, 0.0, 500.0, 200.0),
            task("In1", 50.0, 50.0, 100.0, 100.0),
            task("In2", 150.0, 50.0, 200.0, 100.0),
            task("In3", 250.0, 50.0, 300.0, 100.0),
            task("Out", 600.0, 50.0, 650.0, 100.0),
        ];

        let partition = partition(elements, Vec::new(), &mut registry, &PoolConfig::default());

        let process = &partition.processes()[0];
        // The three contained tasks are claimed first; the outsider is an
        // orphan and joins the only non-empty pool afterwards.
        assert_eq!(node_ids(process), vec!["In1", "In2", "In3", "Out"]);

        let participant = &partition.participants()[0];
        assert_approx_eq!(f32, participant.bounds().max_x(), 670.0);
        assert_approx_eq!(f32, participant.bounds().min_x(), 0.0);
        assert_approx_eq!(f32, participant.bounds().max_y(), 200.0);
    }

    #[test]
    fn test_shared_edge_is_not_contained() {
        let mut registry = IdRegistry::with_seed(4);
        let elements = vec![
            pool("P", 0.0, 0.0, 500.0, 200.0),
            pool("Q", 0.0, 300.0, 500.0, 500.0),
            task("Inside", 50.0, 50.0, 100.0, 100.0),
            task("Flush", 0.0, 350.0, 50.0, 400.0),
        ];

        let partition = partition(elements, Vec::new(), &mut registry, &PoolConfig::default());

        // "Flush" touches Q's left edge, so Q claims nothing and the orphan
        // goes to the nearest non-empty pool, P.
        assert_eq!(partition.processes().len(), 1);
        assert_eq!(node_ids(&partition.processes()[0]), vec!["Inside", "Flush"]);
        assert_eq!(partition.participants()[1].process_ref(), None);
        assert_eq!(
            partition.participants()[0].process_ref(),
            Some(&Id::new("Process_P"))
        );
    }

    #[test]
    fn test_first_pool_wins_overlaps() {
        let mut registry = IdRegistry::with_seed(5);
        let elements = vec![
            pool("Outer", 0.0, 0.0, 1000.0, 1000.0),
            pool("Inner", 100.0, 100.0, 500.0, 500.0),
            task("A", 200.0, 200.0, 250.0, 250.0),
        ];

        let partition = partition(elements, Vec::new(), &mut registry, &PoolConfig::default());

        assert_eq!(partition.processes().len(), 1);
        assert_eq!(partition.processes()[0].id(), &Id::new("Process_Outer"));
        assert_eq!(partition.participants()[1].process_ref(), None);
    }

    #[test]
    fn test_message_flows_go_to_collaboration() {
        let mut registry = IdRegistry::with_seed(6);
        let elements = vec![
            pool("P", 0.0, 0.0, 500.0, 200.0),
            pool("Q", 0.0, 300.0, 500.0, 500.0),
            task("A", 50.0, 50.0, 100.0, 100.0),
            task("B", 50.0, 350.0, 100.0, 400.0),
        ];
        let flows = vec![
            flow("M", FlowKind::Message, 75.0, 100.0, 80.0, 350.0),
            flow("S", FlowKind::Sequence, 100.0, 75.0, 150.0, 80.0),
        ];

        let partition = partition(elements, flows, &mut registry, &PoolConfig::default());

        assert_eq!(partition.message_flows().len(), 1);
        assert_eq!(partition.message_flows()[0].id(), &Id::new("M"));
        assert_eq!(partition.processes().len(), 2);
        assert_eq!(partition.processes()[0].flows().len(), 1);
        assert!(partition.processes()[1].flows().is_empty());
    }

    #[test]
    fn test_contained_message_flow_belongs_to_its_pool() {
        let mut registry = IdRegistry::with_seed(9);
        let elements = vec![
            pool("P", 0.0, 0.0, 500.0, 200.0),
            pool("Q", 0.0, 300.0, 500.0, 500.0),
            task("A", 50.0, 50.0, 100.0, 100.0),
        ];
        let flows = vec![flow("M", FlowKind::Message, 60.0, 350.0, 200.0, 360.0)];

        let partition = partition(elements, flows, &mut registry, &PoolConfig::default());

        assert!(partition.message_flows().is_empty());
        let process_ids: Vec<&str> = partition
            .processes()
            .iter()
            .map(|process| process.id().as_str())
            .collect();
        assert_eq!(process_ids, vec!["Process_P", "Process_Q"]);
        assert_eq!(partition.processes()[1].flows()[0].id(), &Id::new("M"));
        assert_eq!(
            partition.participants()[1].process_ref(),
            Some(&Id::new("Process_Q"))
        );
    }

    #[test]
    fn test_containment_runs_before_orphan_repair() {
        let mut registry = IdRegistry::with_seed(10);
        let elements = vec![
            pool("P", 0.0, 0.0, 500.0, 200.0),
            pool("Q", 0.0, 300.0, 500.0, 500.0),
            task("Straddler", 400.0, 180.0, 450.0, 230.0),
            task("A", 50.0, 50.0, 100.0, 100.0),
            task("B", 50.0, 350.0, 100.0, 400.0),
        ];

        let partition = partition(elements, Vec::new(), &mut registry, &PoolConfig::default());

        // The straddler is listed first but only joins P after the
        // containment round.
        assert_eq!(node_ids(&partition.processes()[0]), vec!["A", "Straddler"]);
        assert_eq!(node_ids(&partition.processes()[1]), vec!["B"]);

        let grown = partition.participants()[0].bounds();
        assert_approx_eq!(f32, grown.max_y(), 250.0);
        assert_approx_eq!(f32, grown.max_x(), 500.0);
        assert_eq!(
            partition.participants()[1].bounds(),
            Bounds::from_corners(0.0, 300.0, 500.0, 500.0)
        );
    }

    #[test]
    fn test_orphans_fall_back_to_any_pool_when_all_empty() {
        let mut registry = IdRegistry::with_seed(7);
        let elements = vec![
            pool("Far", 1000.0, 1000.0, 1100.0, 1100.0),
            pool("Near", 0.0, 0.0, 100.0, 100.0),
            task("Outside", 150.0, 20.0, 200.0, 60.0),
        ];

        let partition = partition(elements, Vec::new(), &mut registry, &PoolConfig::default());

        assert_eq!(partition.processes().len(), 1);
        assert_eq!(partition.processes()[0].id(), &Id::new("Process_Near"));
        assert_eq!(partition.participants()[0].process_ref(), None);

        let near = &partition.participants()[1];
        assert_approx_eq!(f32, near.bounds().max_x(), 220.0);
        assert_approx_eq!(f32, near.bounds().min_x(), 0.0);
        assert_approx_eq!(f32, near.bounds().min_y(), 0.0);
    }

    #[test]
    fn test_orphan_flows_do_not_grow_pools() {
        let mut registry = IdRegistry::with_seed(8);
        let elements = vec![
            pool("P", 0.0, 0.0, 500.0, 200.0),
            task("A", 50.0, 50.0, 100.0, 100.0),
        ];
        let flows = vec![flow("S", FlowKind::Sequence, 100.0, 75.0, 900.0, 75.0)];

        let partition = partition(elements, flows, &mut registry, &PoolConfig::default());

        assert_eq!(partition.processes()[0].flows().len(), 1);
        assert_eq!(
            partition.participants()[0].bounds(),
            Bounds::from_corners(0.0, 0.0, 500.0, 200.0)
        );
    }

    mod proptest_tests {
        use proptest::prelude::*;

        use super::*;

        fn task_strategy() -> impl Strategy<Value = (f32, f32, f32, f32)> {
            (-200.0f32..1200.0, -200.0f32..1200.0, 10.0f32..100.0, 10.0f32..100.0)
        }

        fn pool_strategy() -> impl Strategy<Value = (f32, f32, f32, f32)> {
            (0.0f32..800.0, 0.0f32..800.0, 100.0f32..600.0, 100.0f32..600.0)
        }

        fn check_pools_only_grow(
            pools: Vec<(f32, f32, f32, f32)>,
            tasks: Vec<(f32, f32, f32, f32)>,
        ) -> Result<(), TestCaseError> {
            let original: Vec<Bounds> = pools
                .iter()
                .map(|&(x, y, w, h)| Bounds::from_corners(x, y, x + w, y + h))
                .collect();
            let elements: Vec<Element> = pools
                .iter()
                .enumerate()
                .map(|(i, &(x, y, w, h))| pool(&format!("P{i}"), x, y, x + w, y + h))
                .chain(
                    tasks
                        .iter()
                        .enumerate()
                        .map(|(i, &(x, y, w, h))| task(&format!("T{i}"), x, y, x + w, y + h)),
                )
                .collect();

            let mut registry = IdRegistry::with_seed(0);
            let partition = partition(elements, Vec::new(), &mut registry, &PoolConfig::default());

            let assigned: usize = partition.processes().iter().map(|p| p.nodes().len()).sum();
            prop_assert_eq!(assigned, tasks.len());

            for (participant, before) in partition.participants().iter().zip(&original) {
                let after = participant.bounds();
                prop_assert!(after.min_x() <= before.min_x());
                prop_assert!(after.min_y() <= before.min_y());
                prop_assert!(after.max_x() >= before.max_x());
                prop_assert!(after.max_y() >= before.max_y());
            }

            for process in partition.processes() {
                let owner = partition
                    .participants()
                    .iter()
                    .find(|participant| participant.process_ref() == Some(process.id()));
                prop_assert!(owner.is_some());
            }
            Ok(())
        }

        proptest! {
            #[test]
            fn pools_only_grow(
                pools in prop::collection::vec(pool_strategy(), 1..4),
                tasks in prop::collection::vec(task_strategy(), 0..10),
            ) {
                check_pools_only_grow(pools, tasks)?;
            }
        }
    }
}
