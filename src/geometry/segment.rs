use super::point::PlanarPoint;

/// A straight piece of a polyline in the local plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: PlanarPoint,
    pub end: PlanarPoint,
}

/// Closest point of a segment to some query point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentProjection {
    /// Position of the closest point as a fraction of the segment, in `[0, 1]`.
    pub fraction: f64,
    pub distance_km: f64,
}

impl Segment {
    pub fn new(start: PlanarPoint, end: PlanarPoint) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(self.end)
    }

    /// Project `point` onto the segment, clamped to its endpoints.
    pub fn project(&self, point: PlanarPoint) -> SegmentProjection {
        let dx = self.end.x - self.start.x;
        let dy = self.end.y - self.start.y;
        let length_sq = dx * dx + dy * dy;
        let fraction = if length_sq == 0.0 {
            0.0
        } else {
            (((point.x - self.start.x) * dx + (point.y - self.start.y) * dy) / length_sq)
                .clamp(0.0, 1.0)
        };
        let closest = PlanarPoint {
            x: self.start.x + fraction * dx,
            y: self.start.y + fraction * dy,
        };
        SegmentProjection {
            fraction,
            distance_km: point.distance_to(closest),
        }
    }
}
