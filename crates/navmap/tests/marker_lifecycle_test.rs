//! Integration test for marker registration, expiry and eviction.

use std::sync::Arc;

use navmap::common::Vec3;
use navmap::model::{EntityTable, MarkerId, MarkerVisualConfig, NavEvent};
use navmap::NavigationSubsystem;

fn config(lifetime: f32) -> Option<Arc<MarkerVisualConfig>> {
    Some(Arc::new(MarkerVisualConfig {
        lifetime,
        ..Default::default()
    }))
}

fn markers_changed(nav: &NavigationSubsystem) -> usize {
    nav.events()
        .drain()
        .into_iter()
        .filter(|event| matches!(event, NavEvent::MarkersChanged { .. }))
        .count()
}

#[test]
fn test_tracked_registration_is_idempotent() {
    let mut entities = EntityTable::new();
    let x = entities.spawn(Vec3::new(5.0, 5.0, 0.0));
    let mut nav = NavigationSubsystem::new();

    let first = nav.register_marker(Some(x), config(0.0), "L", None, &entities);
    let second = nav.register_marker(Some(x), config(3.0), "L", None, &entities);

    assert!(first.is_valid());
    assert_eq!(first, second);
    assert_eq!(nav.markers().len(), 1);
    assert_eq!(nav.lookup_id_for_entity(x), Some(first));
    // The first config wins.
    assert_eq!(nav.marker(first).map(|m| m.config.lifetime), Some(0.0));
}

#[test]
fn test_lifetime_expiry() {
    let entities = EntityTable::new();
    let mut nav = NavigationSubsystem::new();

    let ping = nav.register_marker(None, config(2.0), "Pings", Some(Vec3::ZERO), &entities);
    let quest = nav.register_marker(None, config(0.0), "Quests", Some(Vec3::ZERO), &entities);

    nav.tick(1.0, &entities);
    let remaining = nav.marker(ping).map(|m| m.remaining_lifetime).unwrap();
    assert!((remaining - 1.0).abs() < 1e-6);

    nav.tick(1.5, &entities);
    assert!(nav.marker(ping).is_none());

    for _ in 0..1000 {
        nav.tick(10.0, &entities);
    }
    assert!(nav.marker(quest).is_some());
}

#[test]
fn test_batched_change_notification() {
    let entities = EntityTable::new();
    let mut nav = NavigationSubsystem::new();

    for i in 0..3 {
        nav.register_marker(None, config(0.5), "Pings", Some(Vec3::new(i as f32, 0.0, 0.0)), &entities);
    }
    nav.register_marker(None, config(0.0), "Quests", Some(Vec3::ZERO), &entities);
    // Undrained registrations coalesce into one pending notification.
    assert_eq!(nav.events().drain(), vec![NavEvent::MarkersChanged { active: 4 }]);

    assert_eq!(nav.tick(1.0, &entities), 3);
    let events = nav.events().drain();
    assert_eq!(events, vec![NavEvent::MarkersChanged { active: 1 }]);

    // Nothing expired: nothing announced.
    assert_eq!(nav.tick(1.0, &entities), 0);
    assert_eq!(markers_changed(&nav), 0);
}

#[test]
fn test_stale_entity_cleanup() {
    let mut entities = EntityTable::new();
    let npc = entities.spawn(Vec3::new(1.0, 1.0, 0.0));
    let mut nav = NavigationSubsystem::new();

    let id = nav.register_marker(Some(npc), config(100.0), "Npcs", None, &entities);
    nav.tick(0.1, &entities);
    assert!(nav.marker(id).is_some());

    entities.despawn(npc);
    // A new entity may reuse the slot; the old handle must stay dead.
    let newcomer = entities.spawn(Vec3::ZERO);
    assert_ne!(newcomer, npc);

    assert_eq!(nav.tick(0.1, &entities), 1);
    assert!(nav.marker(id).is_none());
    assert_eq!(nav.lookup_id_for_entity(npc), None);
}

#[test]
fn test_unregister_ignores_unknown_ids() {
    let entities = EntityTable::new();
    let mut nav = NavigationSubsystem::new();
    let id = nav.register_marker(None, config(0.0), "Quests", Some(Vec3::ZERO), &entities);
    markers_changed(&nav);

    assert!(!nav.unregister_marker(MarkerId::INVALID));
    assert!(!nav.unregister_marker(MarkerId(9999)));
    assert_eq!(markers_changed(&nav), 0);

    assert!(nav.unregister_marker(id));
    assert!(!nav.unregister_marker(id));
    assert_eq!(markers_changed(&nav), 1);
}

#[test]
fn test_unregister_layer_batches() {
    let entities = EntityTable::new();
    let mut nav = NavigationSubsystem::new();
    for i in 0..4 {
        nav.register_marker(None, config(0.0), "Pings", Some(Vec3::new(i as f32, 0.0, 0.0)), &entities);
    }
    let keep = nav.register_marker(None, config(0.0), "Quests", Some(Vec3::ZERO), &entities);
    markers_changed(&nav);

    assert_eq!(nav.markers().markers_in_layer("Pings").count(), 4);
    assert_eq!(nav.unregister_marker_layer("Pings"), 4);
    assert_eq!(markers_changed(&nav), 1);
    assert_eq!(nav.markers().len(), 1);
    assert!(nav.marker(keep).is_some());
}

#[test]
fn test_ids_are_never_reused() {
    let entities = EntityTable::new();
    let mut nav = NavigationSubsystem::new();
    let first = nav.register_marker(None, config(0.0), "A", Some(Vec3::ZERO), &entities);
    nav.unregister_marker(first);
    let second = nav.register_marker(None, config(0.0), "A", Some(Vec3::ZERO), &entities);
    assert!(second > first);
}
