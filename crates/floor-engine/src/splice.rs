use tracing::{debug, instrument};

use plan_types::{Point, Segment, Wall};

/// Outcome of cutting an opening into a floor's walls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpliceResult {
    /// Whether a wall was split.
    pub modified: bool,
    /// Start of the opening after alignment.
    pub start: Point,
    /// End of the opening after alignment.
    pub end: Point,
}

impl SpliceResult {
    /// The opening's segment after alignment.
    pub fn segment(&self) -> Segment {
        Segment::new(self.start, self.end)
    }
}

/// Cut `opening` into the first wall it overlaps.
///
/// A wall qualifies when it has the same orientation as the opening, its
/// fixed coordinate is within `align_tolerance` of the opening's, and the
/// two intervals overlap by more than `min_overlap`. That wall is replaced
/// by the (up to two) non-empty pieces left on either side of the overlap,
/// in place, and the opening is snapped onto the overlap interval.
///
/// Only the first matching wall is split. Without a match the walls are
/// untouched and the opening keeps its own endpoints.
#[instrument(skip(walls), fields(walls = walls.len()))]
pub fn splice_opening(
    walls: &mut Vec<Wall>,
    opening: Segment,
    align_tolerance: f64,
    min_overlap: f64,
) -> SpliceResult {
    let orientation = opening.orientation();
    let (open_min, open_max) = opening.span();

    let hit = walls.iter().enumerate().find_map(|(idx, wall)| {
        let seg = wall.segment;
        if seg.orientation() != orientation {
            return None;
        }
        if (seg.cross_coord() - opening.cross_coord()).abs() > align_tolerance {
            return None;
        }
        let (wall_min, wall_max) = seg.span();
        let overlap_min = wall_min.max(open_min);
        let overlap_max = wall_max.min(open_max);
        (overlap_max - overlap_min > min_overlap).then_some((idx, overlap_min, overlap_max))
    });

    let Some((idx, overlap_min, overlap_max)) = hit else {
        debug!("no wall under opening");
        return SpliceResult {
            modified: false,
            start: opening.start(),
            end: opening.end(),
        };
    };

    let wall = walls.remove(idx).segment;
    let (wall_min, wall_max) = wall.span();

    let mut pieces = Vec::with_capacity(2);
    if overlap_min > wall_min {
        pieces.push(Wall {
            segment: Segment::new(wall.point_at(wall_min), wall.point_at(overlap_min)),
        });
    }
    if wall_max > overlap_max {
        pieces.push(Wall {
            segment: Segment::new(wall.point_at(overlap_max), wall.point_at(wall_max)),
        });
    }
    debug!(
        wall_index = idx,
        overlap_min,
        overlap_max,
        remainders = pieces.len(),
        "wall split around opening"
    );
    for (offset, piece) in pieces.into_iter().enumerate() {
        walls.insert(idx + offset, piece);
    }

    SpliceResult {
        modified: true,
        start: wall.point_at(overlap_min),
        end: wall.point_at(overlap_max),
    }
}
