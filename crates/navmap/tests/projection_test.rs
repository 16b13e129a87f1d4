//! Integration test for world to map UV projection and layer selection.

use std::sync::Arc;

use navmap::common::{TextureHandle, Vec2, Vec3};
use navmap::model::{
    world_to_map_uv, EntityTable, LayerDefinition, MarkerVisualConfig, NavEvent, WorldBounds,
};
use navmap::NavigationSubsystem;

fn layer(name: &str, priority: i32, min: f32, max: f32) -> LayerDefinition {
    LayerDefinition::new(
        name,
        TextureHandle::new(priority.unsigned_abs()),
        Vec3::new(min, min, 0.0),
        Vec3::new(max, max, 0.0),
        priority,
    )
}

#[test]
fn test_projection_round_trip() {
    let bounds = [
        WorldBounds::new(Vec3::new(-500.0, 20.0, 0.0), Vec3::new(1500.0, 80.0, 0.0)),
        WorldBounds::square(0.0, 1.0),
        WorldBounds::square(-50_000.0, 50_000.0),
    ];

    for bounds in bounds {
        let extent = bounds.extent();
        for (fx, fy) in [(0.5, 0.5), (0.01, 0.99), (0.73, 0.12), (0.999, 0.001)] {
            let point = Vec3::new(
                bounds.min.x + fx * extent.x,
                bounds.min.y + fy * extent.y,
                0.0,
            );
            let uv = bounds.project(point).unwrap();
            assert!((0.0..=1.0).contains(&uv.x) && (0.0..=1.0).contains(&uv.y));

            let back = bounds.unproject(uv);
            let tolerance = extent.x.max(extent.y) * 1e-5;
            assert!((back.x - point.x).abs() <= tolerance, "{bounds:?} {point:?} {back:?}");
            assert!((back.y - point.y).abs() <= tolerance, "{bounds:?} {point:?} {back:?}");
        }

        for outside in [
            Vec3::new(bounds.min.x - 1.0, bounds.min.y + extent.y * 0.5, 0.0),
            Vec3::new(bounds.max.x + 1.0, bounds.min.y + extent.y * 0.5, 0.0),
            Vec3::new(bounds.min.x + extent.x * 0.5, bounds.max.y + 1.0, 0.0),
        ] {
            assert!(bounds.project(outside).is_none());
        }
    }
}

#[test]
fn test_projection_orientation() {
    let bounds = WorldBounds::square(0.0, 100.0);
    // North (+X) is the top of the map, east (+Y) is the right.
    let north_east = bounds.project(Vec3::new(90.0, 90.0, 0.0)).unwrap();
    assert!(north_east.abs_diff_eq(Vec2::new(0.9, 0.1), 1e-5));
}

#[test]
fn test_degenerate_and_missing_layers_fail() {
    let flat = WorldBounds::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(100.0, 0.00001, 0.0));
    assert!(flat.project(Vec3::new(50.0, 0.0, 0.0)).is_none());
    assert!(world_to_map_uv(None, Vec3::ZERO).is_none());
}

#[test]
fn test_layer_priority() {
    let mut entities = EntityTable::new();
    let player = entities.spawn(Vec3::new(25.0, 25.0, 0.0));

    let mut nav = NavigationSubsystem::new();
    nav.load_layers(vec![layer("B", 5, 0.0, 100.0), layer("A", 10, 0.0, 50.0)]);
    nav.set_tracked_player(Some(player), &entities);
    assert_eq!(nav.current_layer().map(|l| l.name.as_str()), Some("A"));

    entities.set_position(player, Vec3::new(75.0, 75.0, 0.0));
    nav.tick(0.016, &entities);
    assert_eq!(nav.current_layer().map(|l| l.name.as_str()), Some("B"));

    entities.set_position(player, Vec3::new(200.0, 200.0, 0.0));
    nav.tick(0.016, &entities);
    assert!(nav.current_layer().is_none());

    let names: Vec<_> = nav
        .events()
        .drain()
        .into_iter()
        .filter_map(|event| match event {
            NavEvent::LayerChanged { name, .. } => Some(name),
            NavEvent::MarkersChanged { .. } => None,
        })
        .collect();
    assert_eq!(
        names,
        vec![Some("A".to_string()), Some("B".to_string()), None]
    );
}

#[test]
fn test_reload_reselects_at_last_position() {
    let mut entities = EntityTable::new();
    let player = entities.spawn(Vec3::new(25.0, 25.0, 0.0));

    let mut nav = NavigationSubsystem::new();
    nav.load_layers(vec![layer("old", 0, 0.0, 100.0)]);
    nav.set_tracked_player(Some(player), &entities);
    assert_eq!(nav.current_layer().map(|l| l.name.as_str()), Some("old"));

    nav.events().drain();

    nav.load_layers(vec![layer("new", 0, 0.0, 100.0)]);
    assert_eq!(nav.current_layer().map(|l| l.name.as_str()), Some("new"));
    assert_eq!(
        nav.events().drain(),
        vec![NavEvent::LayerChanged {
            layer: nav.current_layer_id(),
            name: Some("new".to_string()),
        }]
    );

    // Reloading the same catalog keeps the layer and stays quiet.
    nav.load_layers(vec![layer("new", 0, 0.0, 100.0)]);
    assert_eq!(nav.current_layer().map(|l| l.name.as_str()), Some("new"));
    assert!(!nav.events().has_events());
}

#[test]
fn test_layer_change_survives_startup_registration_burst() {
    let mut entities = EntityTable::new();
    let hero = entities.spawn(Vec3::new(25.0, 25.0, 0.0));
    let poi = Some(Arc::new(MarkerVisualConfig::default()));

    let mut nav = NavigationSubsystem::new();
    nav.load_layers(vec![layer("world", 0, 0.0, 100.0)]);
    for i in 0..1000 {
        let at = Vec3::new((i % 100) as f32, (i / 100) as f32, 0.0);
        assert!(nav.register_marker(None, poi.clone(), "Quests", Some(at), &entities).is_valid());
    }
    nav.set_tracked_player(Some(hero), &entities);

    let events = nav.events().drain();
    assert_eq!(
        events,
        vec![
            NavEvent::MarkersChanged { active: 1000 },
            NavEvent::LayerChanged {
                layer: nav.current_layer_id(),
                name: Some("world".to_string()),
            },
        ]
    );
}
