//! Flow nodes and participants.

use std::fmt;

use crate::{
    geometry::{Bounds, Point},
    identifier::Id,
    prediction::{ElementPrediction, TextFragment},
    semantic::display_name,
};

/// The BPMN variant of a flow node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    StartEvent,
    EndEvent,
    IntermediateThrowEvent,
    IntermediateCatchEvent,
    Gateway,
    Task,
    TextAnnotation,
}

impl NodeKind {
    /// Prefix used when minting identifiers for this kind.
    pub fn id_prefix(self) -> &'static str {
        match self {
            Self::StartEvent => "StartEvent",
            Self::EndEvent => "EndEvent",
            Self::IntermediateThrowEvent => "IntermediateThrowEvent",
            Self::IntermediateCatchEvent => "IntermediateCatchEvent",
            Self::Gateway => "Gateway",
            Self::Task => "Task",
            Self::TextAnnotation => "TextAnnotation",
        }
    }

    /// Whether this kind is one of the four event kinds.
    pub fn is_event(self) -> bool {
        matches!(
            self,
            Self::StartEvent
                | Self::EndEvent
                | Self::IntermediateThrowEvent
                | Self::IntermediateCatchEvent
        )
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id_prefix())
    }
}

/// A flow node: anything a flow can start or end at.
///
/// The `subtype` tag tells the concrete flavor within the kind, for example
/// `timerEventDefinition` for a timer start event or `parallelGateway` for a
/// gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowNode {
    id: Id,
    kind: NodeKind,
    subtype: &'static str,
    prediction: ElementPrediction,
    name: Vec<TextFragment>,
    incoming: Vec<Id>,
    outgoing: Vec<Id>,
}

impl FlowNode {
    /// Create a new flow node with no name and no connected flows.
    pub fn new(id: Id, kind: NodeKind, subtype: &'static str, prediction: ElementPrediction) -> Self {
        Self {
            id,
            kind,
            subtype,
            prediction,
            name: Vec::new(),
            incoming: Vec::new(),
            outgoing: Vec::new(),
        }
    }

    /// Get the node identifier.
    pub fn id(&self) -> &Id {
        &self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn subtype(&self) -> &'static str {
        self.subtype
    }

    pub fn prediction(&self) -> &ElementPrediction {
        &self.prediction
    }

    pub fn bounds(&self) -> Bounds {
        self.prediction.bounds()
    }

    pub fn center(&self) -> Point {
        self.prediction.center()
    }

    /// Display name: the attached fragments joined with single spaces.
    pub fn name(&self) -> String {
        display_name(&self.name)
    }

    pub fn name_fragments(&self) -> &[TextFragment] {
        &self.name
    }

    /// Appends a text fragment to the name.
    pub fn push_name(&mut self, fragment: TextFragment) {
        self.name.push(fragment);
    }

    /// Identifiers of flows ending at this node.
    pub fn incoming(&self) -> &[Id] {
        &self.incoming
    }

    /// Identifiers of flows starting at this node.
    pub fn outgoing(&self) -> &[Id] {
        &self.outgoing
    }

    pub fn add_incoming(&mut self, flow: Id) {
        self.incoming.push(flow);
    }

    pub fn add_outgoing(&mut self, flow: Id) {
        self.outgoing.push(flow);
    }
}

/// A pool: a named container that owns one process.
///
/// Participants are never flow endpoints, so they carry no incoming or
/// outgoing lists.
#[derive(Debug, Clone, PartialEq)]
pub struct Participant {
    id: Id,
    process_ref: Option<Id>,
    prediction: ElementPrediction,
    name: Vec<TextFragment>,
}

impl Participant {
    /// Create a participant together with the identifier of its process.
    pub fn new(id: Id, process_ref: Id, prediction: ElementPrediction) -> Self {
        Self {
            id,
            process_ref: Some(process_ref),
            prediction,
            name: Vec::new(),
        }
    }

    pub fn id(&self) -> &Id {
        &self.id
    }

    /// Identifier of the owned process, or `None` once the process was
    /// found to be empty.
    pub fn process_ref(&self) -> Option<&Id> {
        self.process_ref.as_ref()
    }

    /// Marks the owned process as empty, returning its former identifier.
    pub fn clear_process_ref(&mut self) -> Option<Id> {
        self.process_ref.take()
    }

    pub fn prediction(&self) -> &ElementPrediction {
        &self.prediction
    }

    pub fn bounds(&self) -> Bounds {
        self.prediction.bounds()
    }

    pub fn center(&self) -> Point {
        self.prediction.center()
    }

    /// Point used to match pool titles: the middle of the left edge.
    ///
    /// Pool labels are written vertically along the left border, so the
    /// geometric center would pull them toward interior elements.
    pub fn label_anchor(&self) -> Point {
        self.bounds().left_middle()
    }

    pub fn name(&self) -> String {
        display_name(&self.name)
    }

    pub fn name_fragments(&self) -> &[TextFragment] {
        &self.name
    }

    pub fn push_name(&mut self, fragment: TextFragment) {
        self.name.push(fragment);
    }

    /// Returns this participant resized to `bounds`.
    pub fn with_bounds(&self, bounds: Bounds) -> Self {
        Self {
            prediction: self.prediction.with_bounds(bounds),
            ..self.clone()
        }
    }
}

/// Any element built from an object-detector box.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Node(FlowNode),
    Participant(Participant),
}

impl Element {
    pub fn id(&self) -> &Id {
        match self {
            Self::Node(node) => node.id(),
            Self::Participant(participant) => participant.id(),
        }
    }

    pub fn bounds(&self) -> Bounds {
        match self {
            Self::Node(node) => node.bounds(),
            Self::Participant(participant) => participant.bounds(),
        }
    }

    pub fn center(&self) -> Point {
        self.bounds().center()
    }

    pub fn name(&self) -> String {
        match self {
            Self::Node(node) => node.name(),
            Self::Participant(participant) => participant.name(),
        }
    }

    pub fn push_name(&mut self, fragment: TextFragment) {
        match self {
            Self::Node(node) => node.push_name(fragment),
            Self::Participant(participant) => participant.push_name(fragment),
        }
    }

    pub fn as_node(&self) -> Option<&FlowNode> {
        match self {
            Self::Node(node) => Some(node),
            Self::Participant(_) => None,
        }
    }

    pub fn as_node_mut(&mut self) -> Option<&mut FlowNode> {
        match self {
            Self::Node(node) => Some(node),
            Self::Participant(_) => None,
        }
    }

    pub fn as_participant(&self) -> Option<&Participant> {
        match self {
            Self::Participant(participant) => Some(participant),
            Self::Node(_) => None,
        }
    }

    pub fn is_participant(&self) -> bool {
        matches!(self, Self::Participant(_))
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}
