//! # City Generation
//!
//! The full city pass, run once per world:
//!
//! 1. Plant the border band around the map
//! 2. Partition the inner area into blocks and roads
//! 3. Paint the roads and carve the exit through the band
//! 4. Turn each block into a park or a building of one or more storeys
//! 5. Link consecutive storeys with stair shafts
//! 6. Assign purposes and furnish rooms
//! 7. Pick the player's spawn point and validate the result

use crate::generation::{
    construct_building, furnish, plant_park, Building, GenerationConfig, Generator, Partitioner,
    Road, RoadNetwork, RoomPurpose, Structure,
};
use crate::utils::reachable_from;
use crate::{Level, Position, SprawlError, SprawlResult, TileType, World};
use log::{debug, info, warn};
use noise::{NoiseFn, Simplex};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

/// A generated city: the world the game plays in, plus the layout it was
/// built from.
#[derive(Debug, Clone)]
pub struct City {
    pub world: World,
    /// Every building storey, street level first within each building
    pub buildings: Vec<Building>,
    pub parks: Vec<Structure>,
    pub roads: Vec<Road>,
}

/// Generator for complete multi-level cities.
#[derive(Debug, Clone, Default)]
pub struct CityGenerator;

impl CityGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Plants grass and noise-clustered trees everywhere outside `inner`.
    fn plant_border(&self, level: &mut Level, inner: Structure, rng: &mut StdRng) -> SprawlResult<()> {
        let noise = Simplex::new(rng.gen::<u32>());
        let inside = |pos: Position| {
            pos.x >= inner.x1
                && pos.x < inner.x1 + inner.width
                && pos.y >= inner.y1
                && pos.y < inner.y1 + inner.height
        };

        for pos in level.positions_where(|_| true) {
            if inside(pos) {
                continue;
            }
            let density = noise.get([pos.x as f64 * 0.21, pos.y as f64 * 0.21]);
            let tile = if density + rng.gen_range(-0.25..0.25) > 0.2 {
                TileType::Tree
            } else {
                TileType::Grass
            };
            level.set_tile(pos, tile)?;
        }
        Ok(())
    }

    /// Builds every storey of the building on `block` and links them with
    /// stairs.
    fn raise_building(
        &self,
        world: &mut World,
        block: Structure,
        config: &GenerationConfig,
        rng: &mut StdRng,
    ) -> SprawlResult<Vec<Building>> {
        let storeys = rng.gen_range(1..=config.level_count);
        let mut built = Vec::with_capacity(storeys);
        for storey in 0..storeys {
            let level = world.level_mut(storey)?;
            built.push(construct_building(level, block, config, storey == 0, rng)?);
        }

        for lower in 0..storeys.saturating_sub(1) {
            match self.stair_spot(world, lower, block, rng) {
                Some(pos) => world.add_stair_shaft(lower, pos)?,
                None => warn!(
                    "No shared floor for stairs between levels {} and {} of {:?}",
                    lower,
                    lower + 1,
                    block.as_tuple()
                ),
            }
        }

        debug!("Raised {} storeys on {:?}", storeys, block.as_tuple());
        Ok(built)
    }

    /// A plain floor cell inside `block` on both `lower` and the level above.
    fn stair_spot(
        &self,
        world: &World,
        lower: usize,
        block: Structure,
        rng: &mut StdRng,
    ) -> Option<Position> {
        let below = world.get_level(lower)?;
        let above = world.get_level(lower + 1)?;
        let candidates: Vec<Position> = block
            .inner()
            .into_iter()
            .filter(|pos| {
                below.get_tile(*pos) == Some(TileType::Floor)
                    && above.get_tile(*pos) == Some(TileType::Floor)
            })
            .collect();
        candidates.choose(rng).copied()
    }

    /// Gives each required purpose to one street-level room, then fills
    /// every other room from the filler list.
    fn assign_purposes(
        &self,
        buildings: &mut [Building],
        config: &GenerationConfig,
        rng: &mut StdRng,
    ) {
        let mut street_rooms: Vec<(usize, usize)> = buildings
            .iter()
            .enumerate()
            .filter(|(_, building)| building.level == 0)
            .flat_map(|(b, building)| (0..building.rooms.len()).map(move |r| (b, r)))
            .collect();
        street_rooms.shuffle(rng);

        let mut starved = Vec::new();
        for purpose in &config.required_purposes {
            match street_rooms.pop() {
                Some((b, r)) => buildings[b].rooms[r].purpose = Some(*purpose),
                None => starved.push(purpose.name()),
            }
        }
        if !starved.is_empty() {
            warn!("Not enough rooms for required purposes: {}", starved.join(", "));
        }

        for room in buildings.iter_mut().flat_map(|b| b.rooms.iter_mut()) {
            if room.purpose.is_none() {
                room.purpose = config.filler_purposes.choose(rng).copied();
            }
        }
    }

    /// A street-level building floor cell the player can walk out of the
    /// city from, falling back to the exit itself.
    fn choose_spawn(&self, world: &World, buildings: &[Building], rng: &mut StdRng) -> SprawlResult<Position> {
        let exit = *world.exits.first().ok_or_else(|| {
            SprawlError::GenerationFailed("city has no exit to spawn near".to_string())
        })?;
        let street = world
            .get_level(0)
            .ok_or_else(|| SprawlError::GenerationFailed("street level missing".to_string()))?;

        let reached = reachable_from(street, exit);
        let candidates: Vec<Position> = buildings
            .iter()
            .filter(|building| building.level == 0)
            .flat_map(|building| building.outline.inner())
            .filter(|pos| {
                reached.contains(pos)
                    && matches!(
                        street.get_tile(*pos),
                        Some(TileType::Floor | TileType::ReservedFloor)
                    )
            })
            .collect();

        Ok(match candidates.choose(rng) {
            Some(pos) => *pos,
            None => {
                warn!("No reachable building floor for the player, spawning at the exit");
                exit
            }
        })
    }

    /// Runs the whole pipeline and keeps the layout alongside the world.
    pub fn generate_city(&self, config: &GenerationConfig, rng: &mut StdRng) -> SprawlResult<City> {
        config.validate()?;
        let inner = config.inner_bounds().ok_or_else(|| {
            SprawlError::InvalidConfig("border leaves no room for the city".to_string())
        })?;

        info!(
            "Generating {}x{} city with {} levels (seed {})",
            config.map_width, config.map_height, config.level_count, config.seed
        );
        let mut world = World::new(config.map_width, config.map_height, config.level_count);

        self.plant_border(world.level_mut(0)?, inner, rng)?;

        let partition = Partitioner::from_config(config).partition(inner, rng)?;
        info!(
            "Partitioned into {} blocks and {} roads",
            partition.blocks.len(),
            partition.roads.len()
        );

        let network = RoadNetwork::build(
            world.level_mut(0)?,
            &partition.roads,
            inner,
            config.border_width,
            rng,
        )?;
        world.exits = network.exits.clone();

        let mut buildings = Vec::new();
        let mut parks = Vec::new();
        for block in &partition.blocks {
            if rng.gen_bool(config.park_chance) {
                plant_park(world.level_mut(0)?, *block, config.trees_per_park, rng)?;
                parks.push(*block);
            } else {
                buildings.extend(self.raise_building(&mut world, *block, config, rng)?);
            }
        }
        info!(
            "Placed {} building storeys, {} parks and {} stair shafts",
            buildings.len(),
            parks.len(),
            world.stairs.shaft_count()
        );

        self.assign_purposes(&mut buildings, config, rng);
        if config.furnish_rooms {
            for building in &buildings {
                let level = world.level_mut(building.level)?;
                for room in &building.rooms {
                    if let Some(purpose) = room.purpose {
                        furnish(level, room, purpose, rng)?;
                    }
                }
            }
        }

        world.player_spawn = self.choose_spawn(&world, &buildings, rng)?;

        let city = City {
            world,
            buildings,
            parks,
            roads: network.roads,
        };
        self.validate(&city, config)?;
        Ok(city)
    }
}

impl Generator<City> for CityGenerator {
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> SprawlResult<City> {
        self.generate_city(config, rng)
    }

    /// Checks the guarantees the rest of the game relies on: exits sit on
    /// the map boundary, every stair has its partner, and every street door
    /// can be walked to from the exit.
    fn validate(&self, city: &City, config: &GenerationConfig) -> SprawlResult<()> {
        let world = &city.world;
        if world.levels.len() != config.level_count {
            return Err(SprawlError::GenerationFailed(format!(
                "expected {} levels, found {}",
                config.level_count,
                world.levels.len()
            )));
        }

        let street = world
            .get_level(0)
            .ok_or_else(|| SprawlError::GenerationFailed("street level missing".to_string()))?;
        let Some(&exit) = world.exits.first() else {
            return Err(SprawlError::GenerationFailed("city has no exit".to_string()));
        };
        if let Some(bad) = world.exits.iter().find(|pos| !street.is_boundary(**pos)) {
            return Err(SprawlError::GenerationFailed(format!(
                "exit ({}, {}) is not on the map boundary",
                bad.x, bad.y
            )));
        }

        for (up, down) in world.stairs.up.iter().zip(&world.stairs.down) {
            let paired = down.level == up.level + 1
                && down.position == up.position
                && world.get_level(up.level).and_then(|l| l.get_tile(up.position))
                    == Some(TileType::StairsUp)
                && world.get_level(down.level).and_then(|l| l.get_tile(down.position))
                    == Some(TileType::StairsDown);
            if !paired {
                return Err(SprawlError::GenerationFailed(format!(
                    "stairs at {:?} on level {} have no partner",
                    up.position, up.level
                )));
            }
        }
        if world.stairs.up.len() != world.stairs.down.len() {
            return Err(SprawlError::GenerationFailed(
                "stair registry is unbalanced".to_string(),
            ));
        }

        let reached = reachable_from(street, exit);
        for building in &city.buildings {
            if let Some(door) = building.exterior_door {
                if !reached.contains(&door) {
                    return Err(SprawlError::GenerationFailed(format!(
                        "door ({}, {}) of {:?} cannot be reached from the exit",
                        door.x,
                        door.y,
                        building.outline.as_tuple()
                    )));
                }
            }
        }

        Ok(())
    }

    fn generator_type(&self) -> &'static str {
        "CityGenerator"
    }
}

/// Purposes used across a city, counted per purpose.
pub fn purpose_counts(buildings: &[Building]) -> Vec<(RoomPurpose, usize)> {
    let mut counts: Vec<(RoomPurpose, usize)> = Vec::new();
    for purpose in buildings.iter().flat_map(|b| b.rooms.iter().filter_map(|r| r.purpose)) {
        match counts.iter_mut().find(|(p, _)| *p == purpose) {
            Some((_, n)) => *n += 1,
            None => counts.push((purpose, 1)),
        }
    }
    counts
}
