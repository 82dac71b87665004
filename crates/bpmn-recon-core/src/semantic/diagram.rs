//! Containers of the reconstructed graph: processes, collaboration, diagram.

use crate::{
    identifier::Id,
    semantic::{Flow, FlowNode, Participant},
};

/// The nodes and flows that belong to one pool, or to the whole diagram when
/// no pool was detected.
#[derive(Debug, Clone, PartialEq)]
pub struct Process {
    id: Id,
    nodes: Vec<FlowNode>,
    flows: Vec<Flow>,
}

impl Process {
    /// Create an empty process.
    pub fn new(id: Id) -> Self {
        Self {
            id,
            nodes: Vec::new(),
            flows: Vec::new(),
        }
    }

    pub fn id(&self) -> &Id {
        &self.id
    }

    pub fn nodes(&self) -> &[FlowNode] {
        &self.nodes
    }

    pub fn flows(&self) -> &[Flow] {
        &self.flows
    }

    pub fn push_node(&mut self, node: FlowNode) {
        self.nodes.push(node);
    }

    pub fn push_flow(&mut self, flow: Flow) {
        self.flows.push(flow);
    }

    /// Returns `true` if the process owns neither nodes nor flows.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.flows.is_empty()
    }

    /// Returns `true` if a node with the given identifier belongs to this process.
    pub fn contains_node(&self, id: &Id) -> bool {
        self.nodes.iter().any(|node| node.id() == id)
    }
}

/// The pools of a diagram and the message flows exchanged between them.
#[derive(Debug, Clone, PartialEq)]
pub struct Collaboration {
    id: Id,
    participants: Vec<Participant>,
    message_flows: Vec<Flow>,
}

impl Collaboration {
    pub fn new(id: Id, participants: Vec<Participant>, message_flows: Vec<Flow>) -> Self {
        Self {
            id,
            participants,
            message_flows,
        }
    }

    pub fn id(&self) -> &Id {
        &self.id
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn message_flows(&self) -> &[Flow] {
        &self.message_flows
    }
}

/// Root of the reconstructed graph.
///
/// A diagram is built once per reconstruction pass and is read-only
/// afterwards; only the exporter consumes it.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagram {
    id: Id,
    definitions_id: Id,
    processes: Vec<Process>,
    collaboration: Option<Collaboration>,
}

impl Diagram {
    pub fn new(
        id: Id,
        definitions_id: Id,
        processes: Vec<Process>,
        collaboration: Option<Collaboration>,
    ) -> Self {
        Self {
            id,
            definitions_id,
            processes,
            collaboration,
        }
    }

    pub fn id(&self) -> &Id {
        &self.id
    }

    pub fn definitions_id(&self) -> &Id {
        &self.definitions_id
    }

    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    pub fn collaboration(&self) -> Option<&Collaboration> {
        self.collaboration.as_ref()
    }

    /// Iterates over every flow node of every process.
    pub fn nodes(&self) -> impl Iterator<Item = &FlowNode> {
        self.processes.iter().flat_map(|process| process.nodes())
    }

    /// Iterates over every flow: process flows first, then collaboration
    /// message flows.
    pub fn flows(&self) -> impl Iterator<Item = &Flow> {
        let message_flows = self
            .collaboration
            .iter()
            .flat_map(|collaboration| collaboration.message_flows());
        self.processes
            .iter()
            .flat_map(|process| process.flows())
            .chain(message_flows)
    }

    /// Looks up a flow node by identifier across all processes.
    pub fn find_node(&self, id: &Id) -> Option<&FlowNode> {
        self.nodes().find(|node| node.id() == id)
    }
}
