//! # Space Partitioning
//!
//! Binary splitting of the city area into blocks separated by roads.
//!
//! Work happens on lots: rectangles measured in cells, so a lot at `(x, y)`
//! of size `w x h` covers `x..x + w` by `y..y + h`. Each split cuts a lot in
//! two with a road strip of `road_width` cells. A lot that is not split again
//! becomes a block: a walled [`Structure`] inset one cell from the lot edge
//! so a strip of pavement always separates buildings from roads.

use crate::config::BLOCK_MARGIN;
use crate::generation::{Axis, GenerationConfig, Road, Structure};
use crate::{SprawlError, SprawlResult};
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Output of the partitioner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partition {
    /// Walled block outlines, one per leaf lot
    pub blocks: Vec<Structure>,
    /// Road strips in cell extents
    pub roads: Vec<Structure>,
}

/// Splits a bounding rectangle into blocks and roads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partitioner {
    pub min_block_size: i32,
    pub road_width: i32,
    /// Lots at this depth are never split again
    pub max_depth: u32,
    /// Splits performed before every remaining lot becomes a block
    pub max_iterations: u32,
}

impl Partitioner {
    pub fn new(min_block_size: i32, road_width: i32) -> Self {
        Self {
            min_block_size,
            road_width,
            max_depth: 9,
            max_iterations: 512,
        }
    }

    pub fn from_config(config: &GenerationConfig) -> Self {
        Self {
            min_block_size: config.min_block_size,
            road_width: config.road_width,
            max_depth: config.max_division_depth,
            max_iterations: config.max_split_iterations,
        }
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Smallest lot that still yields a block of `min_block_size`.
    pub fn lot_size(&self) -> i32 {
        self.min_block_size + BLOCK_MARGIN
    }

    /// Smallest lot side that can be split in two with a road between.
    pub fn split_span(&self) -> i32 {
        2 * self.lot_size() + self.road_width
    }

    /// Partitions `bounds` into blocks and roads.
    ///
    /// # Examples
    ///
    /// ```
    /// use rand::SeedableRng;
    /// use sprawl::generation::{Partitioner, Structure};
    ///
    /// let mut rng = rand::rngs::StdRng::seed_from_u64(1);
    /// let partition = Partitioner::new(10, 3)
    ///     .partition(Structure::new(0, 0, 40, 40), &mut rng)
    ///     .unwrap();
    /// assert!(partition.blocks.len() >= 2);
    /// assert!(!partition.roads.is_empty());
    /// ```
    pub fn partition(&self, bounds: Structure, rng: &mut StdRng) -> SprawlResult<Partition> {
        if self.min_block_size < 1 {
            return Err(SprawlError::InvalidConfig(format!(
                "minimum block size {} is not positive",
                self.min_block_size
            )));
        }
        let min_lot = self.lot_size();
        if bounds.width < min_lot || bounds.height < min_lot {
            return Err(SprawlError::InvalidConfig(format!(
                "bounds {}x{} cannot hold a block of {} (lot {})",
                bounds.width, bounds.height, self.min_block_size, min_lot
            )));
        }
        if self.road_width < 1 {
            return Err(SprawlError::InvalidConfig(format!(
                "road width {} is not positive",
                self.road_width
            )));
        }

        let span = self.split_span();
        let mut partition = Partition::default();
        let mut stack = vec![(bounds, 0u32)];
        let mut splits = 0u32;

        while let Some((lot, depth)) = stack.pop() {
            let can_split_x = lot.width >= span;
            let can_split_y = lot.height >= span;

            if depth >= self.max_depth || !(can_split_x || can_split_y) {
                partition.blocks.push(block_in_lot(lot));
                continue;
            }
            if splits >= self.max_iterations {
                warn!(
                    "Partition split cap {} reached, keeping {:?} as a block",
                    self.max_iterations,
                    lot.as_tuple()
                );
                partition.blocks.push(block_in_lot(lot));
                continue;
            }
            splits += 1;

            let axis = match (can_split_x, can_split_y) {
                (true, true) => {
                    if rng.gen_bool(0.5) {
                        Axis::Vertical
                    } else {
                        Axis::Horizontal
                    }
                }
                (true, false) => Axis::Vertical,
                _ => Axis::Horizontal,
            };

            let (first, road, second) = self.split_lot(lot, axis, rng);
            partition.roads.push(road);
            stack.push((second, depth + 1));
            stack.push((first, depth + 1));
        }

        let before = partition.roads.len();
        partition.roads = merge_continuous_roads(partition.roads);
        debug!(
            "Partitioned {:?} into {} blocks and {} roads ({} before merging)",
            bounds.as_tuple(),
            partition.blocks.len(),
            partition.roads.len(),
            before
        );

        Ok(partition)
    }

    /// Cuts `lot` with a road running along `axis`. Both halves keep at
    /// least `lot_size` cells across the cut.
    fn split_lot(
        &self,
        lot: Structure,
        axis: Axis,
        rng: &mut StdRng,
    ) -> (Structure, Structure, Structure) {
        let min_lot = self.lot_size();
        let road = self.road_width;

        match axis {
            Axis::Vertical => {
                let offset = rng.gen_range(min_lot..=lot.width - min_lot - road);
                (
                    Structure::new(lot.x1, lot.y1, offset, lot.height),
                    Structure::new(lot.x1 + offset, lot.y1, road, lot.height),
                    Structure::new(
                        lot.x1 + offset + road,
                        lot.y1,
                        lot.width - offset - road,
                        lot.height,
                    ),
                )
            }
            Axis::Horizontal => {
                let offset = rng.gen_range(min_lot..=lot.height - min_lot - road);
                (
                    Structure::new(lot.x1, lot.y1, lot.width, offset),
                    Structure::new(lot.x1, lot.y1 + offset, lot.width, road),
                    Structure::new(
                        lot.x1,
                        lot.y1 + offset + road,
                        lot.width,
                        lot.height - offset - road,
                    ),
                )
            }
        }
    }
}

/// Partitions with the default depth and iteration caps.
pub fn partition(
    bounds: Structure,
    min_block_size: i32,
    road_width: i32,
    rng: &mut StdRng,
) -> SprawlResult<Partition> {
    Partitioner::new(min_block_size, road_width).partition(bounds, rng)
}

/// The walled block that sits on a lot.
pub fn block_in_lot(lot: Structure) -> Structure {
    Structure::new(
        lot.x1 + 1,
        lot.y1 + 1,
        lot.width - BLOCK_MARGIN,
        lot.height - BLOCK_MARGIN,
    )
}

/// Joins roads that run the same way with the same thickness and meet end to
/// end, repeating until no pair can be joined.
pub fn merge_continuous_roads(mut roads: Vec<Structure>) -> Vec<Structure> {
    while let Some((i, j, joined)) = find_joinable(&roads) {
        roads[i] = joined;
        roads.remove(j);
    }
    roads
}

fn find_joinable(roads: &[Structure]) -> Option<(usize, usize, Structure)> {
    for (i, a) in roads.iter().enumerate() {
        for (j, b) in roads.iter().enumerate().skip(i + 1) {
            if let Some(joined) = join_roads(a, b) {
                return Some((i, j, joined));
            }
        }
    }
    None
}

fn join_roads(a: &Structure, b: &Structure) -> Option<Structure> {
    let axis = Road::new(*a).axis;
    if axis != Road::new(*b).axis {
        return None;
    }

    match axis {
        Axis::Horizontal if a.y1 == b.y1 && a.height == b.height => {
            if a.x1 + a.width == b.x1 {
                Some(Structure::new(a.x1, a.y1, a.width + b.width, a.height))
            } else if b.x1 + b.width == a.x1 {
                Some(Structure::new(b.x1, a.y1, a.width + b.width, a.height))
            } else {
                None
            }
        }
        Axis::Vertical if a.x1 == b.x1 && a.width == b.width => {
            if a.y1 + a.height == b.y1 {
                Some(Structure::new(a.x1, a.y1, a.width, a.height + b.height))
            } else if b.y1 + b.height == a.y1 {
                Some(Structure::new(a.x1, b.y1, a.width, a.height + b.height))
            } else {
                None
            }
        }
        _ => None,
    }
}
