//! Detector class labels and what they mean.
//!
//! The object detector and the keypoint detector report integer class
//! labels. This module maps those labels to diagram semantics:
//!
//! - [`ElementCategory::from_label`] - object-detector labels to an element
//!   variant plus its subtype tag
//! - [`FlowCategory::from_label`] - keypoint-detector labels to a flow variant
//!
//! Labels missing from the tables are detector noise and map to `None`.

use crate::semantic::{FlowKind, NodeKind};

/// What an object-detector label turns into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementCategory {
    /// A flow node of the given kind with its subtype tag.
    Node {
        kind: NodeKind,
        subtype: &'static str,
    },
    /// A pool.
    Participant,
}

impl ElementCategory {
    /// Looks up the category for an object-detector label.
    ///
    /// # Examples
    ///
    /// ```
    /// use bpmn_recon_core::{category::ElementCategory, semantic::NodeKind};
    ///
    /// assert_eq!(
    ///     ElementCategory::from_label(8),
    ///     Some(ElementCategory::Node {
    ///         kind: NodeKind::StartEvent,
    ///         subtype: "timerEventDefinition",
    ///     })
    /// );
    /// assert_eq!(ElementCategory::from_label(30), Some(ElementCategory::Participant));
    /// assert_eq!(ElementCategory::from_label(99), None);
    /// ```
    pub fn from_label(label: u32) -> Option<Self> {
        use NodeKind::*;

        let (kind, subtype) = match label {
            0 => (EndEvent, "compensateEventDefinition"),
            1 => (IntermediateCatchEvent, "timerEventDefinition"),
            2 => (IntermediateCatchEvent, "signalEventDefinition"),
            3 => (IntermediateCatchEvent, "messageEventDefinition"),
            4 => (EndEvent, "escalationEventDefinition"),
            5 => (Gateway, "inclusiveGateway"),
            6 => (Gateway, "eventBasedGateway"),
            7 => (StartEvent, "signalEventDefinition"),
            8 => (StartEvent, "timerEventDefinition"),
            9 => (Task, "task"),
            10 => (StartEvent, "conditionalEventDefinition"),
            11 => (EndEvent, "messageEventDefinition"),
            12 => (Task, "dataObjectReference"),
            13 => (Gateway, "exclusiveGateway"),
            14 => (Gateway, "complexGateway"),
            15 => (Task, "dataStoreReference"),
            16 => (EndEvent, "endEvent"),
            17 => (Gateway, "parallelGateway"),
            18 => (TextAnnotation, ""),
            19 => (IntermediateThrowEvent, "escalationEventDefinition"),
            20 => (IntermediateCatchEvent, "conditionalEventDefinition"),
            21 => (StartEvent, "startEvent"),
            22 => (StartEvent, "messageEventDefinition"),
            23 => (IntermediateThrowEvent, "signalEventDefinition"),
            24 => (IntermediateThrowEvent, "intermediateThrowEvent"),
            25 => (EndEvent, "errorEventDefinition"),
            26 => (IntermediateThrowEvent, "linkEventDefinition"),
            27 => (IntermediateThrowEvent, "messageEventDefinition"),
            28 => (IntermediateThrowEvent, "compensateEventDefinition"),
            29 => (EndEvent, "signalEventDefinition"),
            30 => return Some(Self::Participant),
            31 => (EndEvent, "terminateEventDefinition"),
            32 => (IntermediateCatchEvent, "linkEventDefinition"),
            _ => return None,
        };

        Some(Self::Node { kind, subtype })
    }
}

/// What a keypoint-detector label turns into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowCategory {
    Sequence,
    /// Recognized by the detector but never turned into a flow.
    DataAssociation,
    Message,
}

impl FlowCategory {
    /// Looks up the category for a keypoint-detector label.
    pub fn from_label(label: u32) -> Option<Self> {
        match label {
            0 => Some(Self::Sequence),
            1 => Some(Self::DataAssociation),
            2 => Some(Self::Message),
            _ => None,
        }
    }

    /// The flow variant built for this category, if any.
    pub fn flow_kind(self) -> Option<FlowKind> {
        match self {
            Self::Sequence => Some(FlowKind::Sequence),
            Self::Message => Some(FlowKind::Message),
            Self::DataAssociation => None,
        }
    }
}
