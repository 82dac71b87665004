//! Geometric primitives for detected diagram regions.
//!
//! Every detection coming out of the object detector, the keypoint detector
//! and the OCR engine is described with the types in this module.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in image space
//! - [`Bounds`] - A rectangular region defined by minimum and maximum coordinates
//! - [`Insets`] - Margin values for four sides
//!
//! # Coordinate System
//!
//! Detections use image coordinates, which also match the BPMN diagram
//! interchange coordinates:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! - **Origin**: Top-left corner of the source image
//! - **X-axis**: Increases rightward
//! - **Y-axis**: Increases downward

/// A 2D point in image coordinate space.
///
/// # Examples
///
/// ```
/// # use bpmn_recon_core::geometry::Point;
/// let tail = Point::new(40.0, 20.0);
/// let head = Point::new(100.0, 20.0);
///
/// assert_eq!(tail.distance(head), 60.0);
/// assert_eq!(tail.midpoint(head), Point::new(70.0, 20.0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Creates a new point with the specified x-coordinate
    pub fn with_x(mut self, x: f32) -> Self {
        self.x = x;
        self
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Calculates the midpoint between this point and another point
    pub fn midpoint(self, other: Point) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    /// Calculates the hypotenuse (Euclidean distance from origin)
    pub fn hypot(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Euclidean distance between two points.
    pub fn distance(self, other: Point) -> f32 {
        self.sub_point(other).hypot()
    }
}

impl From<[f32; 2]> for Point {
    fn from([x, y]: [f32; 2]) -> Self {
        Self::new(x, y)
    }
}

/// Represents a rectangular region with minimum and maximum coordinates.
///
/// The width and height of a region are always non-negative and its center is
/// derived from the corners on every call, so a region can never carry a stale
/// center after its corners change.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates bounds from two opposite corners as reported by a detector.
    ///
    /// Corners are normalized, so swapped coordinates still yield a region
    /// with non-negative width and height.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bpmn_recon_core::geometry::Bounds;
    /// let bounds = Bounds::from_corners(180.0, 40.0, 100.0, 0.0);
    /// assert_eq!(bounds.min_x(), 100.0);
    /// assert_eq!(bounds.width(), 80.0);
    /// assert_eq!(bounds.height(), 40.0);
    /// ```
    pub fn from_corners(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            min_x: x1.min(x2),
            min_y: y1.min(y2),
            max_x: x1.max(x2),
            max_y: y1.max(y2),
        }
    }

    /// Creates bounds from a top-left point and a width/height pair
    pub fn new_from_top_left(top_left: Point, width: f32, height: f32) -> Self {
        Self::from_corners(
            top_left.x,
            top_left.y,
            top_left.x + width,
            top_left.y + height,
        )
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f32 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f32 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f32 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Returns the center point of the bounds
    pub fn center(self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Returns the top-left corner as a Point
    pub fn min_point(self) -> Point {
        Point {
            x: self.min_x,
            y: self.min_y,
        }
    }

    /// Point on the left edge at the vertical middle of the bounds.
    pub fn left_middle(self) -> Point {
        self.center().with_x(self.min_x)
    }

    /// Returns `true` if the point lies inside the bounds, edges included.
    pub fn contains_point(self, point: Point) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }

    /// Returns `true` if `other` lies strictly inside these bounds.
    ///
    /// Shared edges do not count as containment.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bpmn_recon_core::geometry::Bounds;
    /// let pool = Bounds::from_corners(0.0, 0.0, 500.0, 200.0);
    /// let task = Bounds::from_corners(50.0, 50.0, 130.0, 110.0);
    /// let flush = Bounds::from_corners(0.0, 50.0, 80.0, 110.0);
    ///
    /// assert!(pool.strictly_contains(&task));
    /// assert!(!pool.strictly_contains(&flush));
    /// ```
    pub fn strictly_contains(&self, other: &Self) -> bool {
        self.min_x < other.min_x
            && self.min_y < other.min_y
            && self.max_x > other.max_x
            && self.max_y > other.max_y
    }

    /// Merges two bounds to create a larger bounds that contains both.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bpmn_recon_core::geometry::Bounds;
    /// let start = Bounds::from_corners(0.0, 0.0, 40.0, 40.0);
    /// let task = Bounds::from_corners(100.0, 10.0, 180.0, 70.0);
    ///
    /// let combined = start.merge(&task);
    /// assert_eq!(combined.min_x(), 0.0);
    /// assert_eq!(combined.max_y(), 70.0);
    /// assert_eq!(combined.width(), 180.0);
    /// ```
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Expands the bounds by adding insets.
    pub fn add_padding(&self, insets: Insets) -> Self {
        Self {
            min_x: self.min_x - insets.left(),
            min_y: self.min_y - insets.top(),
            max_x: self.max_x + insets.right(),
            max_y: self.max_y + insets.bottom(),
        }
    }

    /// Grows the bounds so that `content` fits inside with `margin` to spare.
    ///
    /// Each edge is handled on its own: when `content` reaches or passes an
    /// edge, that edge moves to the content edge plus `margin`. Edges that
    /// already clear the content are left untouched, so the result never
    /// shrinks.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bpmn_recon_core::geometry::Bounds;
    /// let pool = Bounds::from_corners(0.0, 0.0, 300.0, 100.0);
    /// let content = Bounds::from_corners(20.0, 30.0, 340.0, 80.0);
    ///
    /// let grown = pool.grow_to_cover(&content, 20.0);
    /// assert_eq!(grown.min_x(), 0.0);
    /// assert_eq!(grown.max_x(), 360.0);
    /// assert_eq!(grown.max_y(), 100.0);
    /// ```
    pub fn grow_to_cover(&self, content: &Self, margin: f32) -> Self {
        let mut grown = *self;
        if content.min_x <= self.min_x {
            grown.min_x = content.min_x - margin;
        }
        if content.min_y <= self.min_y {
            grown.min_y = content.min_y - margin;
        }
        if content.max_x >= self.max_x {
            grown.max_x = content.max_x + margin;
        }
        if content.max_y >= self.max_y {
            grown.max_y = content.max_y + margin;
        }
        grown
    }
}

/// Represents spacing around a region with potentially different values for
/// each side
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Insets {
    top: f32,
    right: f32,
    bottom: f32,
    left: f32,
}

impl Insets {
    /// Creates new insets with specified values for each side
    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Creates uniform insets with the same value for all sides
    pub fn uniform(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Returns the top inset value
    pub fn top(self) -> f32 {
        self.top
    }

    /// Returns the right inset value
    pub fn right(self) -> f32 {
        self.right
    }

    /// Returns the bottom inset value
    pub fn bottom(self) -> f32 {
        self.bottom
    }

    /// Returns the left inset value
    pub fn left(self) -> f32 {
        self.left
    }
}
