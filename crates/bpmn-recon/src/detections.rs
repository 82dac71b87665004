//! Detector output as handed over by the orchestration layer.
//!
//! A [`Detections`] snapshot bundles the results of the three detectors that
//! run on one image. The snapshot is decoded from JSON:
//!
//! ```json
//! {
//!   "unusable_image": false,
//!   "objects":   [{ "class_id": 9, "bbox": [100, 0, 180, 40] }],
//!   "keypoints": [{ "class_id": 0, "bbox": [40, 15, 100, 25], "head": [100, 20], "tail": [40, 20] }],
//!   "texts":     [{ "text": "Review", "bbox": [110, 14, 40, 12] }]
//! }
//! ```
//!
//! Object and keypoint boxes are corner pairs `[x1, y1, x2, y2]`; OCR boxes
//! are `[x, y, width, height]`. Every field is optional and defaults to empty.

use serde::Deserialize;

use bpmn_recon_core::{
    geometry::{Bounds, Point},
    prediction::{ElementPrediction, FlowPrediction, TextFragment},
};

use crate::ReconError;

/// One object-detector result.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ObjectDetection {
    pub class_id: u32,
    pub bbox: [f32; 4],
}

/// One keypoint-detector result.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct KeypointDetection {
    pub class_id: u32,
    pub bbox: [f32; 4],
    pub head: [f32; 2],
    pub tail: [f32; 2],
}

/// One OCR result.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OcrText {
    pub text: String,
    pub bbox: [f32; 4],
}

/// A consistent snapshot of all detector results for one image.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Detections {
    /// Set by the orchestration layer when the image could not be used.
    #[serde(default)]
    pub unusable_image: bool,

    #[serde(default)]
    pub objects: Vec<ObjectDetection>,

    #[serde(default)]
    pub keypoints: Vec<KeypointDetection>,

    #[serde(default)]
    pub texts: Vec<OcrText>,
}

impl Detections {
    /// Decodes a snapshot from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ReconError::Input`] carrying the source text when the JSON
    /// is malformed or does not match the expected shape.
    pub fn from_json(source: &str) -> Result<Self, ReconError> {
        serde_json::from_str(source).map_err(|err| ReconError::new_input_error(err, source))
    }

    /// A snapshot carrying only the unusable-image signal.
    pub fn unusable() -> Self {
        Self {
            unusable_image: true,
            ..Self::default()
        }
    }

    pub fn element_predictions(&self) -> Vec<ElementPrediction> {
        self.objects
            .iter()
            .map(|object| {
                let [x1, y1, x2, y2] = object.bbox;
                ElementPrediction::new(object.class_id, Bounds::from_corners(x1, y1, x2, y2))
            })
            .collect()
    }

    pub fn flow_predictions(&self) -> Vec<FlowPrediction> {
        self.keypoints
            .iter()
            .map(|keypoint| {
                let [x1, y1, x2, y2] = keypoint.bbox;
                FlowPrediction::new(
                    keypoint.class_id,
                    Bounds::from_corners(x1, y1, x2, y2),
                    Point::from(keypoint.head),
                    Point::from(keypoint.tail),
                )
            })
            .collect()
    }

    pub fn text_fragments(&self) -> Vec<TextFragment> {
        self.texts
            .iter()
            .map(|ocr| {
                let [x, y, width, height] = ocr.bbox;
                TextFragment::from_ocr_box(ocr.text.clone(), x, y, width, height)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_full_snapshot() {
        let source = r#"{
            "objects": [{"class_id": 21, "bbox": [0, 0, 40, 40]}],
            "keypoints": [{"class_id": 0, "bbox": [40, 15, 100, 25], "head": [100, 20], "tail": [40, 20]}],
            "texts": [{"text": "Start", "bbox": [2, 42, 30, 10]}]
        }"#;
        let detections = Detections::from_json(source).expect("valid snapshot");

        assert!(!detections.unusable_image);

        let elements = detections.element_predictions();
        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].label(), 21);
        assert_eq!(elements[0].bounds().width(), 40.0);

        let flows = detections.flow_predictions();
        assert_eq!(flows[0].head(), Point::new(100.0, 20.0));
        assert_eq!(flows[0].tail(), Point::new(40.0, 20.0));

        let texts = detections.text_fragments();
        assert_eq!(texts[0].text(), "Start");
        assert_eq!(texts[0].bounds().max_x(), 32.0);
        assert_eq!(texts[0].bounds().max_y(), 52.0);
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let detections = Detections::from_json("{}").expect("empty object is valid");
        assert_eq!(detections, Detections::default());
    }

    #[test]
    fn test_unusable_signal() {
        let detections =
            Detections::from_json(r#"{"unusable_image": true}"#).expect("valid snapshot");
        assert_eq!(detections, Detections::unusable());
    }

    #[test]
    fn test_malformed_input_is_reported() {
        let source = r#"{"objects": [{"class_id": "task"}]}"#;
        let err = Detections::from_json(source).expect_err("class_id must be numeric");

        match err {
            ReconError::Input { err, src } => {
                assert_eq!(src, source);
                assert_eq!(err.line(), 1);
            }
            other => panic!("Expected Input error, got {other:?}"),
        }
    }
}
