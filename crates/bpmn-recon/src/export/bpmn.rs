//! BPMN 2.0 XML export.
//!
//! [`BpmnExporter`] writes a [`Diagram`] as a BPMN 2.0 document with a
//! diagram-interchange section, so that modelers such as bpmn.io can open it
//! with the detected layout. All markup goes through the [`quick_xml`] writer,
//! which escapes attribute values and text content.
//!
//! # Document layout
//!
//! ```text
//! definitions
//! ├── collaboration            (only when pools exist)
//! │   ├── participant*
//! │   └── messageFlow*
//! ├── process*                 (nodes first, then flows)
//! └── BPMNDiagram
//!     └── BPMNPlane            (collaboration, or the first process)
//!         ├── BPMNShape*       (pools, then nodes)
//!         └── BPMNEdge*        (two waypoints: tail, head)
//! ```

use log::{debug, info};
use quick_xml::{
    Writer,
    events::{BytesDecl, BytesText, Event},
};

use bpmn_recon_core::{
    geometry::{Bounds, Point},
    semantic::{Collaboration, Diagram, Flow, FlowKind, FlowNode, NodeKind, Participant, Process},
};

use super::{Error, Exporter};

const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
const BPMN_NAMESPACE: &str = "http://www.omg.org/spec/BPMN/20100524/MODEL";
const BPMNDI_NAMESPACE: &str = "http://www.omg.org/spec/BPMN/20100524/DI";
const DC_NAMESPACE: &str = "http://www.omg.org/spec/DD/20100524/DC";
const DI_NAMESPACE: &str = "http://www.omg.org/spec/DD/20100524/DI";
const TARGET_NAMESPACE: &str = "http://bpmn.io/schema/bpmn";

const PLANE_ID: &str = "BPMNPlane_1";

type XmlWriter = Writer<Vec<u8>>;

/// Writes diagrams as BPMN 2.0 XML into an in-memory buffer.
///
/// # Examples
///
/// ```
/// use bpmn_recon::export::{Exporter, bpmn::BpmnExporter};
/// use bpmn_recon_core::{identifier::Id, semantic::{Diagram, Process}};
///
/// let diagram = Diagram::new(
///     Id::new("BPMNDiagram_1"),
///     Id::new("Definitions_1"),
///     vec![Process::new(Id::new("Process_1"))],
///     None,
/// );
///
/// let mut exporter = BpmnExporter::new();
/// exporter.export_diagram(&diagram).expect("diagram should export");
/// let xml = exporter.finish().expect("output is UTF-8");
///
/// assert!(xml.contains(r#"bpmnElement="Process_1""#));
/// ```
pub struct BpmnExporter {
    writer: XmlWriter,
}

impl BpmnExporter {
    /// Creates an exporter that indents nested elements by two spaces.
    pub fn new() -> Self {
        Self {
            writer: Writer::new_with_indent(Vec::new(), b' ', 2),
        }
    }

    /// Consumes the exporter and returns the written document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the buffer is not valid UTF-8.
    pub fn finish(self) -> Result<String, Error> {
        String::from_utf8(self.writer.into_inner())
            .map_err(|err| Error::Render(format!("Output is not valid UTF-8: {err}")))
    }
}

impl Default for BpmnExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Exporter for BpmnExporter {
    fn export_diagram(&mut self, diagram: &Diagram) -> Result<(), Error> {
        info!(diagram = diagram.id().as_str(); "Exporting BPMN document");

        if let Some(flow) = diagram.flows().find(|flow| !flow.is_linked()) {
            return Err(Error::Render(format!(
                "Flow `{}` has an unresolved endpoint",
                flow.id()
            )));
        }

        let plane_target = diagram
            .collaboration()
            .map(Collaboration::id)
            .or_else(|| diagram.processes().first().map(Process::id))
            .ok_or_else(|| {
                Error::Render("Diagram has neither a collaboration nor a process".to_string())
            })?;

        self.writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        self.writer
            .create_element("bpmn:definitions")
            .with_attribute(("xmlns:xsi", XSI_NAMESPACE))
            .with_attribute(("xmlns:bpmn", BPMN_NAMESPACE))
            .with_attribute(("xmlns:bpmndi", BPMNDI_NAMESPACE))
            .with_attribute(("xmlns:dc", DC_NAMESPACE))
            .with_attribute(("xmlns:di", DI_NAMESPACE))
            .with_attribute(("id", diagram.definitions_id().as_str()))
            .with_attribute(("targetNamespace", TARGET_NAMESPACE))
            .write_inner_content::<_, quick_xml::Error>(|writer| {
                if let Some(collaboration) = diagram.collaboration() {
                    write_collaboration(writer, collaboration)?;
                }
                for process in diagram.processes() {
                    write_process(writer, process)?;
                }
                write_interchange(writer, diagram, plane_target.as_str())
            })?;

        debug!("BPMN document written");
        Ok(())
    }
}

fn write_collaboration(writer: &mut XmlWriter, collaboration: &Collaboration) -> quick_xml::Result<()> {
    writer
        .create_element("bpmn:collaboration")
        .with_attribute(("id", collaboration.id().as_str()))
        .write_inner_content::<_, quick_xml::Error>(|writer| {
            for participant in collaboration.participants() {
                write_participant(writer, participant)?;
            }
            for flow in collaboration.message_flows() {
                write_flow(writer, flow)?;
            }
            Ok(())
        })?;
    Ok(())
}

fn write_participant(writer: &mut XmlWriter, participant: &Participant) -> quick_xml::Result<()> {
    let name = participant.name();
    let mut element = writer
        .create_element("bpmn:participant")
        .with_attribute(("id", participant.id().as_str()))
        .with_attribute(("name", name.as_str()));
    if let Some(process_ref) = participant.process_ref() {
        element = element.with_attribute(("processRef", process_ref.as_str()));
    }
    element.write_empty()?;
    Ok(())
}

fn write_process(writer: &mut XmlWriter, process: &Process) -> quick_xml::Result<()> {
    writer
        .create_element("bpmn:process")
        .with_attribute(("id", process.id().as_str()))
        .with_attribute(("isExecutable", "false"))
        .write_inner_content::<_, quick_xml::Error>(|writer| {
            for node in process.nodes() {
                write_node(writer, node)?;
            }
            for flow in process.flows() {
                write_flow(writer, flow)?;
            }
            Ok(())
        })?;
    Ok(())
}

/// The qualified tag of an event kind, or `None` for other kinds.
fn event_tag(kind: NodeKind) -> Option<&'static str> {
    match kind {
        NodeKind::StartEvent => Some("bpmn:startEvent"),
        NodeKind::EndEvent => Some("bpmn:endEvent"),
        NodeKind::IntermediateThrowEvent => Some("bpmn:intermediateThrowEvent"),
        NodeKind::IntermediateCatchEvent => Some("bpmn:intermediateCatchEvent"),
        NodeKind::Gateway | NodeKind::Task | NodeKind::TextAnnotation => None,
    }
}

fn write_node(writer: &mut XmlWriter, node: &FlowNode) -> quick_xml::Result<()> {
    let name = node.name();
    let id = node.id().as_str();

    if node.kind() == NodeKind::TextAnnotation {
        writer
            .create_element("bpmn:textAnnotation")
            .with_attribute(("id", id))
            .write_inner_content::<_, quick_xml::Error>(|writer| {
                writer
                    .create_element("bpmn:text")
                    .write_text_content(BytesText::new(&name))?;
                Ok(())
            })?;
        return Ok(());
    }

    if let Some(tag) = event_tag(node.kind()) {
        let element = writer
            .create_element(tag)
            .with_attribute(("id", id))
            .with_attribute(("name", name.as_str()));

        // An event whose subtype is its own base tag carries no definition.
        if tag.strip_prefix("bpmn:") == Some(node.subtype()) {
            element.write_empty()?;
        } else {
            let definition = format!("bpmn:{}", node.subtype());
            element.write_inner_content::<_, quick_xml::Error>(|writer| {
                writer.create_element(definition.as_str()).write_empty()?;
                Ok(())
            })?;
        }
        return Ok(());
    }

    let tag = format!("bpmn:{}", node.subtype());
    writer
        .create_element(tag.as_str())
        .with_attribute(("id", id))
        .with_attribute(("name", name.as_str()))
        .write_empty()?;
    Ok(())
}

fn write_flow(writer: &mut XmlWriter, flow: &Flow) -> quick_xml::Result<()> {
    let tag = match flow.kind() {
        FlowKind::Sequence => "bpmn:sequenceFlow",
        FlowKind::Message => "bpmn:messageFlow",
    };
    let name = flow.name();
    let source = flow.source_ref().map(|id| id.as_str()).unwrap_or_default();
    let target = flow.target_ref().map(|id| id.as_str()).unwrap_or_default();

    writer
        .create_element(tag)
        .with_attribute(("id", flow.id().as_str()))
        .with_attribute(("name", name.as_str()))
        .with_attribute(("sourceRef", source))
        .with_attribute(("targetRef", target))
        .write_empty()?;
    Ok(())
}

fn write_interchange(writer: &mut XmlWriter, diagram: &Diagram, plane_target: &str) -> quick_xml::Result<()> {
    writer
        .create_element("bpmndi:BPMNDiagram")
        .with_attribute(("id", diagram.id().as_str()))
        .write_inner_content::<_, quick_xml::Error>(|writer| {
            writer
                .create_element("bpmndi:BPMNPlane")
                .with_attribute(("id", PLANE_ID))
                .with_attribute(("bpmnElement", plane_target))
                .write_inner_content::<_, quick_xml::Error>(|writer| {
                    if let Some(collaboration) = diagram.collaboration() {
                        for participant in collaboration.participants() {
                            write_shape(writer, participant.id().as_str(), participant.bounds(), true)?;
                        }
                    }
                    for node in diagram.nodes() {
                        write_shape(writer, node.id().as_str(), node.bounds(), false)?;
                    }
                    for flow in diagram.flows() {
                        let prediction = flow.prediction();
                        write_edge(writer, flow.id().as_str(), prediction.tail(), prediction.head())?;
                    }
                    Ok(())
                })?;
            Ok(())
        })?;
    Ok(())
}

fn write_shape(writer: &mut XmlWriter, id: &str, bounds: Bounds, horizontal: bool) -> quick_xml::Result<()> {
    let shape_id = format!("{id}_di");
    let mut shape = writer
        .create_element("bpmndi:BPMNShape")
        .with_attribute(("id", shape_id.as_str()))
        .with_attribute(("bpmnElement", id));
    if horizontal {
        shape = shape.with_attribute(("isHorizontal", "true"));
    }

    let x = bounds.min_x().to_string();
    let y = bounds.min_y().to_string();
    let width = bounds.width().to_string();
    let height = bounds.height().to_string();

    shape.write_inner_content::<_, quick_xml::Error>(|writer| {
        writer
            .create_element("dc:Bounds")
            .with_attribute(("x", x.as_str()))
            .with_attribute(("y", y.as_str()))
            .with_attribute(("width", width.as_str()))
            .with_attribute(("height", height.as_str()))
            .write_empty()?;
        Ok(())
    })?;
    Ok(())
}

fn write_edge(writer: &mut XmlWriter, id: &str, tail: Point, head: Point) -> quick_xml::Result<()> {
    let edge_id = format!("{id}_di");
    writer
        .create_element("bpmndi:BPMNEdge")
        .with_attribute(("id", edge_id.as_str()))
        .with_attribute(("bpmnElement", id))
        .write_inner_content::<_, quick_xml::Error>(|writer| {
            for point in [tail, head] {
                let x = point.x().to_string();
                let y = point.y().to_string();
                writer
                    .create_element("di:waypoint")
                    .with_attribute(("x", x.as_str()))
                    .with_attribute(("y", y.as_str()))
                    .write_empty()?;
            }
            Ok(())
        })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use bpmn_recon_core::{
        identifier::Id,
        prediction::{ElementPrediction, FlowPrediction, TextFragment},
    };

    use super::*;

    fn node(id: &str, kind: NodeKind, subtype: &'static str, name: &str) -> FlowNode {
        let mut node = FlowNode::new(
            Id::new(id),
            kind,
            subtype,
            ElementPrediction::new(0, Bounds::from_corners(10.0, 20.0, 46.0, 56.0)),
        );
        if !name.is_empty() {
            node.push_name(TextFragment::from_ocr_box(name, 0.0, 0.0, 1.0, 1.0));
        }
        node
    }

    fn linked_flow(id: &str, kind: FlowKind, source: &str, target: &str) -> Flow {
        let mut flow = Flow::new(
            Id::new(id),
            kind,
            FlowPrediction::new(
                0,
                Bounds::from_corners(46.0, 38.0, 120.0, 40.0),
                Point::new(120.0, 40.0),
                Point::new(46.0, 38.0),
            ),
        );
        flow.connect(Id::new(source), Id::new(target));
        flow
    }

    fn export(diagram: &Diagram) -> String {
        let mut exporter = BpmnExporter::new();
        exporter.export_diagram(diagram).expect("export should succeed");
        exporter.finish().expect("output should be UTF-8")
    }

    fn single_process(nodes: Vec<FlowNode>, flows: Vec<Flow>) -> Diagram {
        let mut process = Process::new(Id::new("Process_1"));
        nodes.into_iter().for_each(|node| process.push_node(node));
        flows.into_iter().for_each(|flow| process.push_flow(flow));
        Diagram::new(
            Id::new("BPMNDiagram_1"),
            Id::new("Definitions_1"),
            vec![process],
            None,
        )
    }

    #[test]
    fn test_document_skeleton() {
        let xml = export(&single_process(Vec::new(), Vec::new()));

        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains(r#"id="Definitions_1""#));
        assert!(xml.contains(r#"targetNamespace="http://bpmn.io/schema/bpmn""#));
        assert!(xml.contains(r#"<bpmn:process id="Process_1" isExecutable="false""#));
        assert!(xml.contains(r#"<bpmndi:BPMNDiagram id="BPMNDiagram_1">"#));
        assert!(xml.contains(r#"<bpmndi:BPMNPlane id="BPMNPlane_1" bpmnElement="Process_1""#));
        assert!(!xml.contains("bpmn:collaboration"));
        assert!(xml.trim_end().ends_with("</bpmn:definitions>"));
    }

    #[test]
    fn test_plain_event_is_self_closing() {
        let xml = export(&single_process(
            vec![node("StartEvent_1", NodeKind::StartEvent, "startEvent", "Begin")],
            Vec::new(),
        ));

        assert!(xml.contains(r#"<bpmn:startEvent id="StartEvent_1" name="Begin"/>"#));
    }

    #[test]
    fn test_event_definition_is_nested() {
        let xml = export(&single_process(
            vec![node(
                "IntermediateCatchEvent_1",
                NodeKind::IntermediateCatchEvent,
                "timerEventDefinition",
                "",
            )],
            Vec::new(),
        ));

        assert!(xml.contains(r#"<bpmn:intermediateCatchEvent id="IntermediateCatchEvent_1" name="">"#));
        assert!(xml.contains("<bpmn:timerEventDefinition/>"));
        assert!(xml.contains("</bpmn:intermediateCatchEvent>"));
    }

    #[test]
    fn test_gateways_and_tasks_use_subtype_tag() {
        let xml = export(&single_process(
            vec![
                node("Gateway_1", NodeKind::Gateway, "parallelGateway", ""),
                node("Task_1", NodeKind::Task, "dataStoreReference", "Orders"),
            ],
            Vec::new(),
        ));

        assert!(xml.contains(r#"<bpmn:parallelGateway id="Gateway_1" name=""/>"#));
        assert!(xml.contains(r#"<bpmn:dataStoreReference id="Task_1" name="Orders"/>"#));
    }

    #[test]
    fn test_text_annotation_body() {
        let xml = export(&single_process(
            vec![node("TextAnnotation_1", NodeKind::TextAnnotation, "", "Check stock")],
            Vec::new(),
        ));

        assert!(xml.contains(r#"<bpmn:textAnnotation id="TextAnnotation_1">"#));
        assert!(xml.contains("<bpmn:text>Check stock</bpmn:text>"));
    }

    #[test]
    fn test_names_are_escaped() {
        let xml = export(&single_process(
            vec![node("Task_1", NodeKind::Task, "task", "Ship & \"bill\" <now>")],
            Vec::new(),
        ));

        assert!(xml.contains("Ship &amp; &quot;bill&quot; &lt;now&gt;"));
        assert!(!xml.contains("Ship & "));
    }

    #[test]
    fn test_shapes_and_edges() {
        let xml = export(&single_process(
            vec![
                node("Task_a", NodeKind::Task, "task", ""),
                node("Task_b", NodeKind::Task, "task", ""),
            ],
            vec![linked_flow("SequenceFlow_1", FlowKind::Sequence, "Task_a", "Task_b")],
        ));

        assert!(xml.contains(
            r#"<bpmn:sequenceFlow id="SequenceFlow_1" name="" sourceRef="Task_a" targetRef="Task_b"/>"#
        ));
        assert!(xml.contains(r#"<bpmndi:BPMNShape id="Task_a_di" bpmnElement="Task_a">"#));
        assert!(xml.contains(r#"<dc:Bounds x="10" y="20" width="36" height="36"/>"#));
        assert!(xml.contains(r#"<bpmndi:BPMNEdge id="SequenceFlow_1_di" bpmnElement="SequenceFlow_1">"#));

        let tail = xml.find(r#"<di:waypoint x="46" y="38"/>"#).expect("tail waypoint");
        let head = xml.find(r#"<di:waypoint x="120" y="40"/>"#).expect("head waypoint");
        assert!(tail < head);
    }

    #[test]
    fn test_collaboration_and_pools() {
        let mut process = Process::new(Id::new("Process_a"));
        process.push_node(node("Task_a", NodeKind::Task, "task", ""));

        let mut sales = Participant::new(
            Id::new("Participant_a"),
            Id::new("Process_a"),
            ElementPrediction::new(30, Bounds::from_corners(0.0, 0.0, 600.0, 200.0)),
        );
        sales.push_name(TextFragment::from_ocr_box("Sales", 0.0, 0.0, 1.0, 1.0));
        let mut empty = Participant::new(
            Id::new("Participant_b"),
            Id::new("Process_b"),
            ElementPrediction::new(30, Bounds::from_corners(0.0, 300.0, 600.0, 500.0)),
        );
        empty.clear_process_ref();

        let collaboration = Collaboration::new(
            Id::new("Collaboration_1"),
            vec![sales, empty],
            vec![linked_flow("MessageFlow_1", FlowKind::Message, "Task_a", "Task_a")],
        );
        let diagram = Diagram::new(
            Id::new("BPMNDiagram_1"),
            Id::new("Definitions_1"),
            vec![process],
            Some(collaboration),
        );

        let xml = export(&diagram);

        assert!(xml.contains(r#"<bpmn:collaboration id="Collaboration_1">"#));
        assert!(xml.contains(
            r#"<bpmn:participant id="Participant_a" name="Sales" processRef="Process_a"/>"#
        ));
        assert!(xml.contains(r#"<bpmn:participant id="Participant_b" name=""/>"#));
        assert!(xml.contains(r#"<bpmn:messageFlow id="MessageFlow_1""#));
        assert!(xml.contains(r#"bpmnElement="Collaboration_1""#));
        assert!(xml.contains(
            r#"<bpmndi:BPMNShape id="Participant_a_di" bpmnElement="Participant_a" isHorizontal="true">"#
        ));
        assert!(!xml.contains("Process_b"));

        let collaboration_at = xml.find("<bpmn:collaboration").expect("collaboration");
        let process_at = xml.find("<bpmn:process").expect("process");
        assert!(collaboration_at < process_at);
    }

    #[test]
    fn test_unlinked_flow_is_rejected() {
        let mut process = Process::new(Id::new("Process_1"));
        process.push_flow(Flow::new(
            Id::new("SequenceFlow_1"),
            FlowKind::Sequence,
            FlowPrediction::new(0, Bounds::default(), Point::default(), Point::default()),
        ));
        let diagram = Diagram::new(Id::new("D"), Id::new("Defs"), vec![process], None);

        let mut exporter = BpmnExporter::new();
        let err = exporter.export_diagram(&diagram).expect_err("unlinked flow");
        assert!(matches!(err, Error::Render(_)));
    }

    #[test]
    fn test_diagram_without_plane_target_is_rejected() {
        let diagram = Diagram::new(Id::new("D"), Id::new("Defs"), Vec::new(), None);

        let mut exporter = BpmnExporter::new();
        assert!(exporter.export_diagram(&diagram).is_err());
    }
}
