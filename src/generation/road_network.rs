//! # Road Network
//!
//! Paints road strips into a level, cleans up their junctions and carves the
//! city's single exit out through the border band.

use crate::config::EXIT_SPAN;
use crate::generation::{Axis, Road, Side, Structure};
use crate::{Level, Position, SprawlError, SprawlResult, TileType};
use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Roads as painted, plus the exit cells on the map boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoadNetwork {
    pub roads: Vec<Road>,
    pub exits: Vec<Position>,
}

impl RoadNetwork {
    /// Picks an exit road, stretches it through the border band and paints
    /// every road.
    ///
    /// `inner` is the partitioned area; the band of `border_width` cells
    /// around it runs out to the map edge.
    pub fn build(
        level: &mut Level,
        strips: &[Structure],
        inner: Structure,
        border_width: i32,
        rng: &mut StdRng,
    ) -> SprawlResult<Self> {
        let mut roads: Vec<Road> = strips.iter().copied().map(Road::new).collect();
        let exits = select_exit(&mut roads, inner, border_width, rng)?;
        paint_roads(level, &roads)?;

        info!(
            "Built {} roads with exit at {:?}",
            roads.len(),
            exits.first()
        );
        Ok(Self { roads, exits })
    }
}

/// Paints road strips and returns them as [`Road`]s.
///
/// Each road gets a divider down its centerline and plain lanes either side.
/// Where a road meets one painted before it, the junction patch is
/// overwritten with plain road so no divider runs through the crossing.
pub fn build_roads(level: &mut Level, strips: &[Structure]) -> SprawlResult<Vec<Road>> {
    let roads: Vec<Road> = strips.iter().copied().map(Road::new).collect();
    paint_roads(level, &roads)?;
    Ok(roads)
}

fn paint_roads(level: &mut Level, roads: &[Road]) -> SprawlResult<()> {
    for (i, road) in roads.iter().enumerate() {
        let divider = TileType::RoadDivider {
            vertical: road.is_vertical(),
        };
        for pos in road.center_line() {
            level.set_tile(pos, divider)?;
        }
        for pos in road.lanes() {
            level.set_tile(pos, TileType::Road)?;
        }

        for other in &roads[..i] {
            if let Some(patch) = road.junction_with(other) {
                trace!(
                    "Junction of {:?} and {:?} ({} cells)",
                    road.bounds.as_tuple(),
                    other.bounds.as_tuple(),
                    patch.len()
                );
                for pos in patch {
                    level.set_tile(pos, TileType::Road)?;
                }
            }
        }
    }
    Ok(())
}

/// Side of `inner` that an end of `road` sits flush against.
fn touching_sides(road: &Road, inner: Structure) -> Vec<Side> {
    let b = road.bounds;
    match road.axis {
        Axis::Vertical => {
            let mut sides = Vec::new();
            if b.y1 == inner.y1 {
                sides.push(Side::Top);
            }
            if b.y1 + b.height == inner.y1 + inner.height {
                sides.push(Side::Bottom);
            }
            sides
        }
        Axis::Horizontal => {
            let mut sides = Vec::new();
            if b.x1 == inner.x1 {
                sides.push(Side::Left);
            }
            if b.x1 + b.width == inner.x1 + inner.width {
                sides.push(Side::Right);
            }
            sides
        }
    }
}

/// Chooses the exit road, extends it by `border_width` out to the map edge
/// and returns the exit cells on the boundary.
///
/// Roads are tried in shuffled order; the first whose end meets the border
/// band wins. Fails when no road reaches the band at all.
pub fn select_exit(
    roads: &mut [Road],
    inner: Structure,
    border_width: i32,
    rng: &mut StdRng,
) -> SprawlResult<Vec<Position>> {
    let mut order: Vec<usize> = (0..roads.len()).collect();
    order.shuffle(rng);

    let chosen = order.into_iter().find_map(|index| {
        touching_sides(&roads[index], inner)
            .choose(rng)
            .map(|side| (index, *side))
    });

    let (index, side) = chosen.ok_or_else(|| {
        SprawlError::GenerationFailed(format!(
            "none of {} roads reaches the border of {:?}",
            roads.len(),
            inner.as_tuple()
        ))
    })?;

    let road = &mut roads[index];
    road.bounds = extend(road.bounds, side, border_width);
    debug!("Exit road {:?} leaves through the {:?} side", road.bounds.as_tuple(), side);

    let b = road.bounds;
    let boundary: Vec<Position> = match side {
        Side::Top => (b.x1..b.x1 + b.width).map(|x| Position::new(x, b.y1)).collect(),
        Side::Bottom => (b.x1..b.x1 + b.width)
            .map(|x| Position::new(x, b.y1 + b.height - 1))
            .collect(),
        Side::Left => (b.y1..b.y1 + b.height).map(|y| Position::new(b.x1, y)).collect(),
        Side::Right => (b.y1..b.y1 + b.height)
            .map(|y| Position::new(b.x1 + b.width - 1, y))
            .collect(),
    };

    let skip = boundary.len().saturating_sub(EXIT_SPAN) / 2;
    Ok(boundary.into_iter().skip(skip).take(EXIT_SPAN).collect())
}

fn extend(bounds: Structure, side: Side, by: i32) -> Structure {
    match side {
        Side::Top => Structure::new(bounds.x1, bounds.y1 - by, bounds.width, bounds.height + by),
        Side::Bottom => Structure::new(bounds.x1, bounds.y1, bounds.width, bounds.height + by),
        Side::Left => Structure::new(bounds.x1 - by, bounds.y1, bounds.width + by, bounds.height),
        Side::Right => Structure::new(bounds.x1, bounds.y1, bounds.width + by, bounds.height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn dividers_in(level: &Level, xs: std::ops::Range<i32>, ys: std::ops::Range<i32>) -> usize {
        let mut count = 0;
        for y in ys {
            for x in xs.clone() {
                if matches!(
                    level.get_tile(Position::new(x, y)),
                    Some(TileType::RoadDivider { .. })
                ) {
                    count += 1;
                }
            }
        }
        count
    }

    #[test]
    fn test_crossing_roads_leave_no_divider_in_junction() {
        let mut level = Level::new(0, 12, 12);
        let strips = [Structure::new(0, 5, 10, 3), Structure::new(5, 0, 3, 10)];
        let roads = build_roads(&mut level, &strips).unwrap();

        assert_eq!(roads[0].axis, Axis::Horizontal);
        assert_eq!(roads[1].axis, Axis::Vertical);
        assert_eq!(dividers_in(&level, 5..8, 5..8), 0);
        assert!(level
            .positions_where(|t| t == TileType::Road)
            .contains(&Position::new(6, 6)));

        // Dividers survive away from the junction.
        assert_eq!(
            level.get_tile(Position::new(1, 6)),
            Some(TileType::RoadDivider { vertical: false })
        );
        assert_eq!(
            level.get_tile(Position::new(6, 1)),
            Some(TileType::RoadDivider { vertical: true })
        );
    }

    #[test]
    fn test_tee_junction_order_independent() {
        let strips = [Structure::new(10, 0, 3, 30), Structure::new(0, 12, 10, 3)];
        for order in [[0, 1], [1, 0]] {
            let mut level = Level::new(0, 30, 30);
            let ordered: Vec<Structure> = order.iter().map(|i| strips[*i]).collect();
            build_roads(&mut level, &ordered).unwrap();
            assert_eq!(dividers_in(&level, 10..13, 12..15), 0);
            assert_eq!(dividers_in(&level, 10..13, 0..12), 12);
        }
    }

    #[test]
    fn test_exit_extends_to_map_edge() {
        let inner = Structure::new(3, 3, 24, 24);
        let mut level = Level::new(0, 30, 30);
        let strips = [Structure::new(13, 3, 3, 24)];

        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            let network = RoadNetwork::build(&mut level, &strips, inner, 3, &mut rng).unwrap();

            assert_eq!(network.exits.len(), EXIT_SPAN);
            let road = network.roads[0];
            assert_eq!(road.length(), 27);
            for exit in &network.exits {
                assert!(level.is_boundary(*exit));
                assert!(road.contains(*exit));
                assert!(level.get_tile(*exit).is_some_and(TileType::is_road));
            }
        }
    }

    #[test]
    fn test_exit_picks_a_road_touching_the_band() {
        let inner = Structure::new(2, 2, 40, 30);
        let mut roads = vec![
            // Interior road touching nothing
            Road::new(Structure::new(10, 10, 3, 5)),
            Road::new(Structure::new(2, 15, 40, 3)),
        ];
        let mut rng = StdRng::seed_from_u64(3);
        let exits = select_exit(&mut roads, inner, 2, &mut rng).unwrap();

        assert_eq!(roads[0].bounds, Structure::new(10, 10, 3, 5));
        assert_eq!(roads[1].bounds.width, 42);
        assert!(exits.iter().all(|pos| pos.x == 0 || pos.x == 43));
        assert!(exits.iter().all(|pos| (15..18).contains(&pos.y)));
    }

    #[test]
    fn test_no_exit_road_is_an_error() {
        let inner = Structure::new(2, 2, 40, 30);
        let mut roads = vec![Road::new(Structure::new(10, 10, 3, 5))];
        let mut rng = StdRng::seed_from_u64(3);
        assert!(matches!(
            select_exit(&mut roads, inner, 2, &mut rng),
            Err(SprawlError::GenerationFailed(_))
        ));
    }
}
