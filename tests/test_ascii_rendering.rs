//! Tests for the text preview of generated levels.

use sprawl::generation::utils::create_rng;
use sprawl::{CityGenerator, GenerationConfig, Generator, SprawlResult, TileType};

#[test]
fn test_rendered_level_matches_grid() -> SprawlResult<()> {
    let config = GenerationConfig::for_testing(314);
    let city = CityGenerator::new().generate(&config, &mut create_rng(&config))?;

    for level in &city.world.levels {
        let text = level.render_ascii();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), config.map_height as usize);

        for (y, line) in lines.iter().enumerate() {
            assert_eq!(line.chars().count(), config.map_width as usize);
            for (x, glyph) in line.chars().enumerate() {
                assert_eq!(glyph, level.tiles[y][x].glyph());
            }
        }
    }
    Ok(())
}

#[test]
fn test_street_level_shows_walls_and_doors() -> SprawlResult<()> {
    let mut config = GenerationConfig::for_testing(2718);
    config.park_chance = 0.0;
    let city = CityGenerator::new().generate(&config, &mut create_rng(&config))?;
    let text = city.world.get_level(0).unwrap().render_ascii();

    assert!(text.contains('╔'));
    assert!(text.contains('╝'));
    assert!(text.contains('+'));
    assert!(text.contains('"'));
    Ok(())
}

#[test]
fn test_world_serializes_to_json() -> SprawlResult<()> {
    let config = GenerationConfig::for_testing(5);
    let city = CityGenerator::new().generate(&config, &mut create_rng(&config))?;

    let json = serde_json::to_string(&city.world)?;
    let back: sprawl::World = serde_json::from_str(&json)?;
    assert_eq!(back, city.world);
    assert_eq!(
        back.get_level(0).unwrap().get_tile(back.exits[0]).map(TileType::is_road),
        Some(true)
    );
    Ok(())
}
