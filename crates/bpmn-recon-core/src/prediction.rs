//! Raw detections produced by the external detectors.
//!
//! These records are the only input of the reconstruction engine:
//!
//! - [`ElementPrediction`] - a typed box from the object detector
//! - [`FlowPrediction`] - a typed arrow box with head and tail keypoints
//! - [`TextFragment`] - a recognized OCR word with its box
//!
//! Predictions are immutable once created. Each element or flow prediction is
//! owned by exactly one [`Element`](crate::semantic::Element) or
//! [`Flow`](crate::semantic::Flow) after the factory consumes it.

use crate::geometry::{Bounds, Point};

/// An object-detector box with its class label.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementPrediction {
    label: u32,
    bounds: Bounds,
}

impl ElementPrediction {
    /// Creates a prediction from a class label and its region.
    pub fn new(label: u32, bounds: Bounds) -> Self {
        Self { label, bounds }
    }

    /// Detector class label.
    pub fn label(&self) -> u32 {
        self.label
    }

    /// Detected region.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Center of the detected region.
    pub fn center(&self) -> Point {
        self.bounds.center()
    }

    /// Returns a copy of this prediction covering a different region.
    pub fn with_bounds(&self, bounds: Bounds) -> Self {
        Self {
            label: self.label,
            bounds,
        }
    }
}

/// A keypoint-detector arrow: class label, box and the two arrow endpoints.
///
/// The `tail` is where the arrow starts and the `head` is where the arrowhead
/// points.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowPrediction {
    label: u32,
    bounds: Bounds,
    head: Point,
    tail: Point,
}

impl FlowPrediction {
    /// Creates a flow prediction.
    pub fn new(label: u32, bounds: Bounds, head: Point, tail: Point) -> Self {
        Self {
            label,
            bounds,
            head,
            tail,
        }
    }

    /// Detector class label.
    pub fn label(&self) -> u32 {
        self.label
    }

    /// Box around the whole arrow.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Center of the arrow box.
    pub fn center(&self) -> Point {
        self.bounds.center()
    }

    /// Arrowhead position.
    pub fn head(&self) -> Point {
        self.head
    }

    /// Arrow start position.
    pub fn tail(&self) -> Point {
        self.tail
    }
}

/// A word recognized by the OCR engine.
#[derive(Debug, Clone, PartialEq)]
pub struct TextFragment {
    text: String,
    bounds: Bounds,
}

impl TextFragment {
    /// Creates a fragment from its text and region.
    pub fn new(text: impl Into<String>, bounds: Bounds) -> Self {
        Self {
            text: text.into(),
            bounds,
        }
    }

    /// Creates a fragment from an OCR box given as `x, y, width, height`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bpmn_recon_core::prediction::TextFragment;
    /// # use bpmn_recon_core::geometry::Point;
    /// let fragment = TextFragment::from_ocr_box("Approve", 10.0, 20.0, 60.0, 12.0);
    /// assert_eq!(fragment.text(), "Approve");
    /// assert_eq!(fragment.center(), Point::new(40.0, 26.0));
    /// ```
    pub fn from_ocr_box(text: impl Into<String>, x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(text, Bounds::new_from_top_left(Point::new(x, y), width, height))
    }

    /// Recognized text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Region of the recognized text.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Center of the recognized text.
    pub fn center(&self) -> Point {
        self.bounds.center()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_prediction_with_bounds_keeps_label() {
        let prediction = ElementPrediction::new(30, Bounds::from_corners(0.0, 0.0, 10.0, 10.0));
        let resized = prediction.with_bounds(Bounds::from_corners(-20.0, -20.0, 30.0, 30.0));

        assert_eq!(resized.label(), 30);
        assert_eq!(resized.bounds().width(), 50.0);
        assert_eq!(prediction.bounds().width(), 10.0);
    }

    #[test]
    fn test_flow_prediction_endpoints() {
        let flow = FlowPrediction::new(
            0,
            Bounds::from_corners(40.0, 15.0, 100.0, 25.0),
            Point::new(100.0, 20.0),
            Point::new(40.0, 20.0),
        );

        assert_eq!(flow.head(), Point::new(100.0, 20.0));
        assert_eq!(flow.tail(), Point::new(40.0, 20.0));
        assert_eq!(flow.center(), Point::new(70.0, 20.0));
    }

    #[test]
    fn test_text_fragment_ocr_box() {
        let fragment = TextFragment::from_ocr_box("Order", 5.0, 5.0, 40.0, 10.0);
        assert_eq!(fragment.bounds().max_x(), 45.0);
        assert_eq!(fragment.bounds().max_y(), 15.0);
    }
}
