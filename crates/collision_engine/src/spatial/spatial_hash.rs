//! Uniform-grid spatial hash for broad-phase collision detection
//!
//! Partitions a bounded rectangular world into `rows x cols` equal cells
//! and bins colliders into every cell their shape truly overlaps (an
//! exact per-cell test, not just the bounding box). The extra work per
//! insertion buys smaller candidate sets during queries. Cell membership
//! is cached per collider so repeated candidate queries between fills
//! cost O(cached cell count).

use std::collections::{HashMap, HashSet};

use log::{debug, trace};

use crate::core::error::CollisionError;
use crate::foundation::math::Vec2;
use crate::physics::body::ColliderId;
use crate::shapes::{Rect, Shape};

/// Uniform grid broad phase over a bounded world
#[derive(Debug)]
pub struct SpatialHash {
    /// World bounds covered by the grid
    bounds: Rect,
    /// Number of rows
    rows: usize,
    /// Number of columns
    cols: usize,
    /// Cell width (`bounds width / cols`)
    cell_width: f32,
    /// Cell height (`bounds height / rows`)
    cell_height: f32,
    /// One bucket of collider ids per cell, row-major
    buckets: Vec<Vec<ColliderId>>,
    /// Cached cell indices per registered collider
    register: HashMap<ColliderId, Vec<usize>>,
    /// Bounds change queued for the next clear
    pending_bounds: Option<Rect>,
}

impl SpatialHash {
    /// Create a spatial hash over `bounds` with `rows x cols` cells
    ///
    /// Zero rows/cols or empty bounds are configuration errors.
    pub fn new(bounds: Rect, rows: usize, cols: usize) -> Result<Self, CollisionError> {
        if rows == 0 || cols == 0 {
            return Err(CollisionError::InvalidGrid { rows, cols });
        }
        if bounds.is_empty() {
            return Err(CollisionError::EmptyBounds { bounds });
        }
        let cell_width = bounds.width() / cols as f32;
        let cell_height = bounds.height() / rows as f32;
        Ok(Self {
            bounds,
            rows,
            cols,
            cell_width,
            cell_height,
            buckets: vec![Vec::new(); rows * cols],
            register: HashMap::new(),
            pending_bounds: None,
        })
    }

    /// World bounds currently covered
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Grid row count
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Grid column count
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Size of one cell
    pub fn cell_size(&self) -> Vec2 {
        Vec2::new(self.cell_width, self.cell_height)
    }

    /// Queue new world bounds, applied atomically at the next clear
    ///
    /// Resizing mid-iteration would invalidate cached cell indices, so
    /// the change is deferred.
    pub fn queue_resize(&mut self, bounds: Rect) {
        self.pending_bounds = Some(bounds);
    }

    /// Clear all buckets and the registration cache
    ///
    /// Applies a queued resize before anything else.
    pub fn clear(&mut self) {
        if let Some(bounds) = self.pending_bounds.take() {
            if bounds.is_empty() {
                debug!("ignoring queued resize to empty bounds {bounds:?}");
            } else {
                debug!("applying queued grid resize to {bounds:?}");
                self.bounds = bounds;
                self.cell_width = bounds.width() / self.cols as f32;
                self.cell_height = bounds.height() / self.rows as f32;
            }
        }
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        self.register.clear();
    }

    /// Rebuild the grid from a set of colliders
    ///
    /// Inserts each collider into every cell its shape truly overlaps and
    /// caches the resulting cell list. Cache entries for colliders no
    /// longer present are purged.
    pub fn fill<'a>(&mut self, items: impl IntoIterator<Item = (ColliderId, &'a Shape)>) {
        if self.pending_bounds.is_some() {
            self.clear();
        } else {
            for bucket in &mut self.buckets {
                bucket.clear();
            }
        }

        let mut seen: HashSet<ColliderId> = HashSet::new();
        let mut inserted = 0usize;
        for (id, shape) in items {
            let cells = self.cells_for_insert(shape);
            for &cell in &cells {
                self.buckets[cell].push(id);
            }
            seen.insert(id);
            self.register.insert(id, cells);
            inserted += 1;
        }
        self.register.retain(|id, _| seen.contains(id));
        trace!("spatial hash filled with {inserted} colliders across {} occupied cells", self.occupied_cells());
    }

    /// Cached cell indices for a registered collider
    pub fn candidate_cells(&self, id: ColliderId) -> Option<&[usize]> {
        self.register.get(&id).map(Vec::as_slice)
    }

    /// Cell indices for an ad-hoc shape not tracked by the hash
    ///
    /// Computes candidates from the shape's bounding box, refined by an
    /// exact per-cell overlap test.
    pub fn cells_for_query(&self, shape: &Shape) -> Vec<usize> {
        let (row_min, col_min, row_max, col_max) = self.cell_range(shape.bounding_box());
        let mut cells = Vec::new();
        for row in row_min..=row_max {
            for col in col_min..=col_max {
                let cell_rect = Shape::Rect(self.cell_rect(row, col));
                if cell_rect.overlap(shape) {
                    cells.push(self.cell_index(row, col));
                }
            }
        }
        cells
    }

    /// The collider ids stored in one cell
    pub fn bucket(&self, cell: usize) -> &[ColliderId] {
        &self.buckets[cell]
    }

    /// Number of cells that currently hold at least one collider
    pub fn occupied_cells(&self) -> usize {
        self.buckets.iter().filter(|b| !b.is_empty()).count()
    }

    /// Total number of (collider, cell) entries
    pub fn entry_count(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    /// World rectangle of one cell
    pub fn cell_rect(&self, row: usize, col: usize) -> Rect {
        let min = Vec2::new(
            self.bounds.min.x + col as f32 * self.cell_width,
            self.bounds.min.y + row as f32 * self.cell_height,
        );
        Rect::new(min, min + Vec2::new(self.cell_width, self.cell_height))
    }

    /// Row-major index of a cell
    fn cell_index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Clamped (row, col) of a world point; never out of range
    fn cell_coords(&self, point: Vec2) -> (usize, usize) {
        let col = ((point.x - self.bounds.min.x) / self.cell_width).floor();
        let row = ((point.y - self.bounds.min.y) / self.cell_height).floor();
        let col = (col.max(0.0) as usize).min(self.cols - 1);
        let row = (row.max(0.0) as usize).min(self.rows - 1);
        (row, col)
    }

    /// Clamped cell range covered by a bounding box
    fn cell_range(&self, bb: Rect) -> (usize, usize, usize, usize) {
        let (row_min, col_min) = self.cell_coords(bb.min);
        let (row_max, col_max) = self.cell_coords(bb.max);
        (row_min, col_min, row_max, col_max)
    }

    /// Cell indices a shape is inserted into
    ///
    /// Exact per-cell overlap refinement; a shape fully outside the
    /// bounds still lands in its clamped edge cells so it remains
    /// queryable.
    fn cells_for_insert(&self, shape: &Shape) -> Vec<usize> {
        let (row_min, col_min, row_max, col_max) = self.cell_range(shape.bounding_box());
        let mut cells = Vec::new();
        for row in row_min..=row_max {
            for col in col_min..=col_max {
                let cell_rect = Shape::Rect(self.cell_rect(row, col));
                if cell_rect.overlap(shape) {
                    cells.push(self.cell_index(row, col));
                }
            }
        }
        if cells.is_empty() {
            for row in row_min..=row_max {
                for col in col_min..=col_max {
                    cells.push(self.cell_index(row, col));
                }
            }
        }
        cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::body::BodyKey;
    use crate::shapes::Circle;
    use slotmap::SlotMap;

    fn test_ids(n: usize) -> Vec<ColliderId> {
        let mut keys: SlotMap<BodyKey, ()> = SlotMap::with_key();
        (0..n).map(|_| ColliderId::new(keys.insert(()), 0)).collect()
    }

    fn grid_10x10() -> SpatialHash {
        SpatialHash::new(Rect::from_xywh(0.0, 0.0, 100.0, 100.0), 10, 10).unwrap()
    }

    #[test]
    fn test_construction_rejects_bad_config() {
        let bounds = Rect::from_xywh(0.0, 0.0, 100.0, 100.0);
        assert!(matches!(
            SpatialHash::new(bounds, 0, 10),
            Err(CollisionError::InvalidGrid { .. })
        ));
        assert!(matches!(
            SpatialHash::new(bounds, 10, 0),
            Err(CollisionError::InvalidGrid { .. })
        ));
        let empty = Rect::from_xywh(0.0, 0.0, 0.0, 50.0);
        assert!(matches!(
            SpatialHash::new(empty, 10, 10),
            Err(CollisionError::EmptyBounds { .. })
        ));
    }

    #[test]
    fn test_small_shape_lands_in_single_cell() {
        // Bounding box (2,2,3,3) on a 10x10 grid of 10-unit cells
        let mut grid = grid_10x10();
        let ids = test_ids(1);
        let shape = Shape::Rect(Rect::from_xywh(2.0, 2.0, 3.0, 3.0));
        grid.fill([(ids[0], &shape)]);
        let cells = grid.candidate_cells(ids[0]).unwrap();
        assert_eq!(cells, &[0]);
        assert_eq!(grid.bucket(0), &[ids[0]]);
    }

    #[test]
    fn test_straddling_shape_spans_four_cells() {
        // Bounding box (8,8,4,4) crosses the first cell boundary in x and y
        let mut grid = grid_10x10();
        let ids = test_ids(1);
        let shape = Shape::Rect(Rect::from_xywh(8.0, 8.0, 4.0, 4.0));
        grid.fill([(ids[0], &shape)]);
        let mut cells = grid.candidate_cells(ids[0]).unwrap().to_vec();
        cells.sort_unstable();
        // Cells (0,0), (0,1), (1,0), (1,1) in row-major order
        assert_eq!(cells, vec![0, 1, 10, 11]);
    }

    #[test]
    fn test_exact_cell_test_beats_bounding_box() {
        // A diagonal segment's AABB covers many cells the segment never
        // touches; the exact test must exclude cell (0, 9)
        let mut grid = grid_10x10();
        let ids = test_ids(1);
        let shape = Shape::Segment(crate::shapes::Segment::new(
            Vec2::new(1.0, 1.0),
            Vec2::new(99.0, 99.0),
        ));
        grid.fill([(ids[0], &shape)]);
        let cells = grid.candidate_cells(ids[0]).unwrap();
        let corner_cell = 9; // row 0, col 9
        assert!(!cells.contains(&corner_cell));
        // But the diagonal cells are present
        assert!(cells.contains(&0));
        assert!(cells.contains(&(5 * 10 + 5)));
    }

    #[test]
    fn test_out_of_bounds_shape_clamps_to_edge_cell() {
        let mut grid = grid_10x10();
        let ids = test_ids(1);
        let shape = Shape::Circle(Circle::new(Vec2::new(150.0, 150.0), 3.0));
        grid.fill([(ids[0], &shape)]);
        let cells = grid.candidate_cells(ids[0]).unwrap();
        assert_eq!(cells, &[99]); // bottom-right cell (9, 9)
    }

    #[test]
    fn test_stale_register_entries_purged() {
        let mut grid = grid_10x10();
        let ids = test_ids(2);
        let a = Shape::Circle(Circle::new(Vec2::new(15.0, 15.0), 3.0));
        let b = Shape::Circle(Circle::new(Vec2::new(55.0, 55.0), 3.0));
        grid.fill([(ids[0], &a), (ids[1], &b)]);
        assert!(grid.candidate_cells(ids[1]).is_some());

        grid.fill([(ids[0], &a)]);
        assert!(grid.candidate_cells(ids[0]).is_some());
        assert!(grid.candidate_cells(ids[1]).is_none());
    }

    #[test]
    fn test_queued_resize_applies_on_clear() {
        let mut grid = grid_10x10();
        grid.queue_resize(Rect::from_xywh(0.0, 0.0, 200.0, 200.0));
        // Not applied until clear
        approx::assert_relative_eq!(grid.cell_size().x, 10.0);
        grid.clear();
        approx::assert_relative_eq!(grid.cell_size().x, 20.0);
    }

    #[test]
    fn test_query_cells_for_adhoc_shape() {
        let grid = grid_10x10();
        let probe = Shape::Circle(Circle::new(Vec2::new(5.0, 5.0), 2.0));
        let cells = grid.cells_for_query(&probe);
        assert_eq!(cells, vec![0]);
        // Fully outside probes produce no candidates
        let outside = Shape::Circle(Circle::new(Vec2::new(500.0, 500.0), 2.0));
        assert!(grid.cells_for_query(&outside).is_empty());
    }

    #[test]
    fn test_broad_phase_soundness_random_circles() {
        use rand::{Rng, SeedableRng};
        let mut rng = rand::rngs::StdRng::seed_from_u64(0x5EED);
        let mut grid = grid_10x10();
        let ids = test_ids(40);

        let circles: Vec<Circle> = (0..40)
            .map(|_| {
                Circle::new(
                    Vec2::new(rng.gen_range(0.0..100.0), rng.gen_range(0.0..100.0)),
                    rng.gen_range(1.0..8.0),
                )
            })
            .collect();
        let shapes: Vec<Shape> = circles.iter().map(|c| Shape::Circle(*c)).collect();
        grid.fill(ids.iter().copied().zip(shapes.iter()));

        // Every truly overlapping pair must share at least one cell
        for i in 0..circles.len() {
            for j in (i + 1)..circles.len() {
                if circles[i].intersects(&circles[j]) {
                    let cells_i = grid.candidate_cells(ids[i]).unwrap();
                    let cells_j = grid.candidate_cells(ids[j]).unwrap();
                    assert!(
                        cells_i.iter().any(|c| cells_j.contains(c)),
                        "overlapping circles {i} and {j} share no grid cell"
                    );
                }
            }
        }
    }
}
