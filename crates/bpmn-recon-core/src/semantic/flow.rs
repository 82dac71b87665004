//! Sequence and message flows.

use std::fmt;

use crate::{
    geometry::{Bounds, Point},
    identifier::Id,
    prediction::{FlowPrediction, TextFragment},
    semantic::display_name,
};

/// The BPMN variant of a flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowKind {
    /// Control flow between nodes of the same pool.
    Sequence,
    /// Message exchange between nodes of different pools.
    Message,
}

impl FlowKind {
    /// Prefix used when minting identifiers for this kind.
    pub fn id_prefix(self) -> &'static str {
        match self {
            Self::Sequence => "SequenceFlow",
            Self::Message => "MessageFlow",
        }
    }
}

impl fmt::Display for FlowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id_prefix())
    }
}

/// A detected arrow and the two nodes it connects.
///
/// Both references start out unresolved. The linking stage fills them in and
/// drops every flow it cannot fully resolve, so a flow reaching a
/// [`Diagram`](crate::semantic::Diagram) is always linked at both ends.
#[derive(Debug, Clone, PartialEq)]
pub struct Flow {
    id: Id,
    kind: FlowKind,
    prediction: FlowPrediction,
    name: Vec<TextFragment>,
    source_ref: Option<Id>,
    target_ref: Option<Id>,
}

impl Flow {
    /// Create a new, unlinked flow.
    pub fn new(id: Id, kind: FlowKind, prediction: FlowPrediction) -> Self {
        Self {
            id,
            kind,
            prediction,
            name: Vec::new(),
            source_ref: None,
            target_ref: None,
        }
    }

    pub fn id(&self) -> &Id {
        &self.id
    }

    pub fn kind(&self) -> FlowKind {
        self.kind
    }

    pub fn prediction(&self) -> &FlowPrediction {
        &self.prediction
    }

    pub fn bounds(&self) -> Bounds {
        self.prediction.bounds()
    }

    pub fn center(&self) -> Point {
        self.prediction.center()
    }

    pub fn name(&self) -> String {
        display_name(&self.name)
    }

    pub fn push_name(&mut self, fragment: TextFragment) {
        self.name.push(fragment);
    }

    /// Identifier of the node the flow starts at.
    pub fn source_ref(&self) -> Option<&Id> {
        self.source_ref.as_ref()
    }

    /// Identifier of the node the flow ends at.
    pub fn target_ref(&self) -> Option<&Id> {
        self.target_ref.as_ref()
    }

    /// Resolves both ends of the flow.
    pub fn connect(&mut self, source: Id, target: Id) {
        self.source_ref = Some(source);
        self.target_ref = Some(target);
    }

    /// Returns `true` when both ends are resolved.
    pub fn is_linked(&self) -> bool {
        self.source_ref.is_some() && self.target_ref.is_some()
    }
}
