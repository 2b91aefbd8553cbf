use serde::{Deserialize, Serialize};

/// A canvas position in pixels. Serialized as a `[x, y]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        ((other.x - self.x).powi(2) + (other.y - self.y).powi(2)).sqrt()
    }

    /// Whether two points land on the same integer pixel.
    ///
    /// Canvas coordinates coming back from the renderer are rounded, so
    /// eraser matching compares at pixel resolution.
    pub fn same_pixel(&self, other: &Point) -> bool {
        self.x.round() == other.x.round() && self.y.round() == other.y.round()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<Point> for (f64, f64) {
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}

/// Dominant axis of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Orientation of the displacement `from -> to`. Ties go horizontal.
    pub fn between(from: Point, to: Point) -> Self {
        let dx = (to.x - from.x).abs();
        let dy = (to.y - from.y).abs();
        if dx >= dy {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        }
    }
}

/// An axis-aligned line segment.
///
/// The end point is always snapped onto the dominant axis of the start point,
/// so a `Segment` can never be diagonal. Deserialization goes through the
/// same snapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawSegment")]
pub struct Segment {
    start: Point,
    end: Point,
}

#[derive(Deserialize)]
struct RawSegment {
    start: Point,
    end: Point,
}

impl From<RawSegment> for Segment {
    fn from(raw: RawSegment) -> Self {
        Segment::new(raw.start, raw.end)
    }
}

impl Segment {
    /// Build a segment from two arbitrary points, snapping `end` to the
    /// dominant axis relative to `start`.
    pub fn new(start: Point, end: Point) -> Self {
        let end = match Orientation::between(start, end) {
            Orientation::Horizontal => Point::new(end.x, start.y),
            Orientation::Vertical => Point::new(start.x, end.y),
        };
        Self { start, end }
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    pub fn orientation(&self) -> Orientation {
        Orientation::between(self.start, self.end)
    }

    /// Extent along the dominant axis.
    pub fn length(&self) -> f64 {
        match self.orientation() {
            Orientation::Horizontal => (self.end.x - self.start.x).abs(),
            Orientation::Vertical => (self.end.y - self.start.y).abs(),
        }
    }

    /// Straight-line distance between the endpoints.
    pub fn euclidean_length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    /// Coordinate that stays fixed along the segment (y for horizontal, x for vertical).
    pub fn cross_coord(&self) -> f64 {
        match self.orientation() {
            Orientation::Horizontal => self.start.y,
            Orientation::Vertical => self.start.x,
        }
    }

    /// `(min, max)` interval covered along the dominant axis.
    pub fn span(&self) -> (f64, f64) {
        let (a, b) = match self.orientation() {
            Orientation::Horizontal => (self.start.x, self.end.x),
            Orientation::Vertical => (self.start.y, self.end.y),
        };
        (a.min(b), a.max(b))
    }

    /// Point on the segment's line at the given position along its dominant axis.
    pub fn point_at(&self, along: f64) -> Point {
        match self.orientation() {
            Orientation::Horizontal => Point::new(along, self.start.y),
            Orientation::Vertical => Point::new(self.start.x, along),
        }
    }

    /// Endpoint-set equality at pixel resolution, ignoring direction.
    pub fn same_endpoints(&self, a: Point, b: Point) -> bool {
        (self.start.same_pixel(&a) && self.end.same_pixel(&b))
            || (self.start.same_pixel(&b) && self.end.same_pixel(&a))
    }
}

/// An axis-aligned rectangle given by two opposite corners.
///
/// Corners are kept as drawn; nothing is snapped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub start: Point,
    pub end: Point,
}

impl Rect {
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn width(&self) -> f64 {
        (self.end.x - self.start.x).abs()
    }

    pub fn height(&self) -> f64 {
        (self.end.y - self.start.y).abs()
    }

    /// Area in square pixels.
    pub fn area_px(&self) -> f64 {
        self.width() * self.height()
    }

    /// Area in square meters for the given pixel scale.
    pub fn area_m2(&self, meters_per_pixel: f64) -> f64 {
        self.area_px() * meters_per_pixel * meters_per_pixel
    }

    /// `(min, max)` corners regardless of drag direction.
    pub fn normalized(&self) -> (Point, Point) {
        (
            Point::new(self.start.x.min(self.end.x), self.start.y.min(self.end.y)),
            Point::new(self.start.x.max(self.end.x), self.start.y.max(self.end.y)),
        )
    }

    /// Whether `a`/`b` describe the same rectangle at pixel resolution.
    pub fn same_corners(&self, a: Point, b: Point) -> bool {
        let (min, max) = self.normalized();
        let (omin, omax) = Rect::new(a, b).normalized();
        min.same_pixel(&omin) && max.same_pixel(&omax)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tie_snaps_horizontal() {
        let s = Segment::new(Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        assert_eq!(s.orientation(), Orientation::Horizontal);
        assert_eq!(s.end(), Point::new(10.0, 0.0));
    }

    #[test]
    fn vertical_snap_keeps_start_x() {
        let s = Segment::new(Point::new(5.0, 5.0), Point::new(8.0, 50.0));
        assert_eq!(s.orientation(), Orientation::Vertical);
        assert_eq!(s.end(), Point::new(5.0, 50.0));
        assert_eq!(s.length(), 45.0);
    }

    #[test]
    fn span_is_ordered_for_reversed_segments() {
        let s = Segment::new(Point::new(100.0, 0.0), Point::new(20.0, 3.0));
        assert_eq!(s.span(), (20.0, 100.0));
        assert_eq!(s.cross_coord(), 0.0);
    }

    #[test]
    fn deserialize_snaps() {
        let s: Segment = serde_json::from_str(r#"{"start":[0,0],"end":[30,4]}"#).unwrap();
        assert_eq!(s.end(), Point::new(30.0, 0.0));
    }

    #[test]
    fn endpoint_matching_ignores_direction() {
        let s = Segment::new(Point::new(0.0, 0.0), Point::new(40.0, 0.0));
        assert!(s.same_endpoints(Point::new(40.2, 0.0), Point::new(0.0, 0.0)));
        assert!(!s.same_endpoints(Point::new(0.0, 0.0), Point::new(41.0, 0.0)));
    }
}
