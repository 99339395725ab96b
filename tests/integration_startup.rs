//! Integration tests for generating whole cities end to end.

use sprawl::generation::utils::create_rng;
use sprawl::{
    reachable_from, CityGenerator, GenerationConfig, Generator, SprawlError, SprawlResult,
    TileType,
};

fn street_only(seed: u64) -> GenerationConfig {
    let mut config = GenerationConfig::for_testing(seed);
    config.furnish_rooms = false;
    config
}

#[test]
fn test_city_generates_for_many_seeds() -> SprawlResult<()> {
    for seed in 0..10 {
        let config = GenerationConfig::for_testing(seed);
        let mut rng = create_rng(&config);
        let city = CityGenerator::new().generate(&config, &mut rng)?;

        assert_eq!(city.world.levels.len(), config.level_count);
        assert!(!city.world.exits.is_empty(), "seed {} has no exit", seed);
        assert!(!city.roads.is_empty());
    }
    Ok(())
}

#[test]
fn test_exits_lie_on_the_boundary_and_are_road() -> SprawlResult<()> {
    let config = GenerationConfig::for_testing(1234);
    let mut rng = create_rng(&config);
    let city = CityGenerator::new().generate(&config, &mut rng)?;
    let street = city.world.get_level(0).unwrap();

    for exit in &city.world.exits {
        assert!(street.is_boundary(*exit), "{:?}", exit);
        assert!(street.get_tile(*exit).is_some_and(TileType::is_road));
        assert!(city.world.is_exit(*exit));
    }
    Ok(())
}

#[test]
fn test_same_seed_same_city() -> SprawlResult<()> {
    let config = GenerationConfig::for_testing(9001);
    let first = CityGenerator::new().generate(&config, &mut create_rng(&config))?;
    let second = CityGenerator::new().generate(&config, &mut create_rng(&config))?;
    assert_eq!(first.world, second.world);

    let other = GenerationConfig::for_testing(9002);
    let third = CityGenerator::new().generate(&other, &mut create_rng(&other))?;
    assert_ne!(first.world, third.world);
    Ok(())
}

#[test]
fn test_blocks_never_overlap() -> SprawlResult<()> {
    for seed in [3, 17, 99] {
        let config = GenerationConfig::for_testing(seed);
        let city = CityGenerator::new().generate(&config, &mut create_rng(&config))?;

        let mut footprints: Vec<_> = city
            .buildings
            .iter()
            .filter(|b| b.level == 0)
            .map(|b| b.outline)
            .collect();
        footprints.extend(city.parks.iter().copied());

        for (i, a) in footprints.iter().enumerate() {
            for b in &footprints[i + 1..] {
                assert!(!a.intersects(b), "{:?} overlaps {:?}", a, b);
            }
        }
    }
    Ok(())
}

/// Checks that every street room, every open floor cell in a street building
/// and every street stair can be walked to from the exit.
fn assert_street_reachable(config: &GenerationConfig) -> SprawlResult<()> {
    let city = CityGenerator::new().generate(config, &mut create_rng(config))?;
    let street = city.world.get_level(0).unwrap();
    let reached = reachable_from(street, city.world.exits[0]);
    let seed = config.seed;

    for building in city.buildings.iter().filter(|b| b.level == 0) {
        let door = building.exterior_door.expect("street storeys have a door");
        assert!(reached.contains(&door));
        for room in &building.rooms {
            assert!(
                room.bounds.inner().iter().any(|pos| reached.contains(pos)),
                "room {:?} cut off (seed {})",
                room.bounds,
                seed
            );
        }
        for pos in building.outline.inner() {
            if street.get_tile(pos).is_some_and(TileType::is_walkable) {
                assert!(reached.contains(&pos), "pocket at {:?} (seed {})", pos, seed);
            }
        }
    }
    for up in city.world.stairs.up.iter().filter(|s| s.level == 0) {
        assert!(reached.contains(&up.position), "stair {:?} (seed {})", up.position, seed);
    }
    Ok(())
}

#[test]
fn test_every_street_room_reachable_from_exit() -> SprawlResult<()> {
    for seed in [5, 6, 7, 8] {
        assert_street_reachable(&street_only(seed))?;
    }
    Ok(())
}

#[test]
fn test_furnished_rooms_stay_reachable_from_exit() -> SprawlResult<()> {
    for seed in 0..8 {
        let mut config = GenerationConfig::new(seed);
        config.park_chance = 0.0;
        assert!(config.furnish_rooms);
        assert_street_reachable(&config)?;
    }
    Ok(())
}

#[test]
fn test_player_spawns_inside_or_at_exit() -> SprawlResult<()> {
    let config = GenerationConfig::for_testing(64);
    let city = CityGenerator::new().generate(&config, &mut create_rng(&config))?;
    let street = city.world.get_level(0).unwrap();
    let spawn = city.world.player_spawn;

    assert!(street.get_tile(spawn).is_some_and(TileType::is_walkable));
    let in_building = city
        .buildings
        .iter()
        .any(|b| b.level == 0 && b.outline.is_inner(spawn));
    assert!(in_building || city.world.is_exit(spawn));
    Ok(())
}

#[test]
fn test_config_too_small_is_rejected() {
    let mut config = GenerationConfig::for_testing(1);
    config.map_width = 12;
    config.map_height = 12;
    let result = CityGenerator::new().generate(&config, &mut create_rng(&config));
    assert!(matches!(result, Err(SprawlError::InvalidConfig(_))));
}

#[test]
fn test_config_from_json_drives_generation() -> SprawlResult<()> {
    let config = GenerationConfig::from_json_str(
        r#"{ "seed": 7, "map_width": 50, "map_height": 36, "level_count": 1, "park_chance": 0.0 }"#,
    )?;
    let city = CityGenerator::new().generate(&config, &mut create_rng(&config))?;

    assert_eq!(city.world.levels.len(), 1);
    assert!(city.parks.is_empty());
    assert!(city.world.stairs.up.is_empty());
    assert!(city.buildings.iter().all(|b| b.level == 0));
    Ok(())
}
