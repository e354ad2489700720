use glam::DVec2;

use crate::config::{CombatPolicy, SimConfig};
use crate::enums::*;
use crate::error::SimError;
use crate::events::SimEvent;
use crate::input::{KeyState, ARROW_UP, KEY_RIGHT, KEY_UP};
use crate::state::{EntityView, FrameSnapshot, Visual};
use crate::types::{Aabb, EntityId, FrameClock};

#[test]
fn test_aabb_center_and_radius() {
    let aabb = Aabb::new(DVec2::new(400.0, 400.0), DVec2::new(15.0, 15.0));
    assert_eq!(aabb.center(), DVec2::new(407.5, 407.5));
    assert_eq!(aabb.radius(), 7.5);
    assert_eq!(aabb.max(), DVec2::new(415.0, 415.0));
}

#[test]
fn test_clock_advance_accumulates() {
    let mut clock = FrameClock::default();
    clock.advance(0.5);
    clock.advance(0.25);
    assert_eq!(clock.frame, 2);
    assert_eq!(clock.delta_time, 0.25);
    assert_eq!(clock.elapsed_secs, 0.75);
}

#[test]
fn test_clock_delta_from_timestamps() {
    let mut clock = FrameClock::default();
    assert_eq!(clock.delta_from_timestamp(1000.0), 0.0, "first stamp only records");
    assert!((clock.delta_from_timestamp(1016.0) - 0.016).abs() < 1e-12);
    assert_eq!(clock.delta_from_timestamp(900.0), 0.0, "backwards time clamps to zero");
}

#[test]
fn test_key_state_defaults_to_released() {
    let mut keys = KeyState::pressed([KEY_UP, KEY_RIGHT]);
    assert!(keys.is_down(KEY_UP));
    assert!(!keys.is_down(ARROW_UP));
    keys.release(KEY_UP);
    assert!(!keys.is_down(KEY_UP));
    assert_eq!(keys.held().collect::<Vec<_>>(), vec![KEY_RIGHT]);
}

#[test]
fn test_key_state_deserializes_from_plain_map() {
    let keys: KeyState = serde_json::from_str(r#"{"w": true, "ArrowUp": false}"#).unwrap();
    assert!(keys.is_down("w"));
    assert!(!keys.any_down(&[ARROW_UP]));
}

#[test]
fn test_default_config_is_valid() {
    assert_eq!(SimConfig::default().validate(), Ok(()));
}

#[test]
fn test_partial_config_fills_defaults() {
    let config = SimConfig::from_json_str(
        r#"{ "collision": { "broad_phase": "brute_force" }, "creep": { "speed": 3.5 } }"#,
    )
    .unwrap();
    assert_eq!(config.collision.broad_phase, BroadPhase::BruteForce);
    assert_eq!(config.creep.speed, 3.5);
    assert_eq!(config.creep.health, 100);
    assert_eq!(config.bounds.width, 800.0);
}

#[test]
fn test_config_rejects_bad_values() {
    let err = SimConfig::from_json_str(r#"{ "creep": { "shoot_interval": 0.0 } }"#).unwrap_err();
    assert!(matches!(err, SimError::Config(_)));

    let err = SimConfig::from_json_str(r#"{ "creep": { "health": 0 } }"#).unwrap_err();
    assert!(matches!(err, SimError::Config(_)));

    let err = SimConfig::from_json_str(r#"{ "movement_smoothing": 1.5 }"#).unwrap_err();
    assert!(matches!(err, SimError::Config(_)));

    let err = SimConfig::from_json_str("not json").unwrap_err();
    assert!(matches!(err, SimError::Config(_)));
}

#[test]
fn test_default_policy_friendly_fire() {
    let policy = CombatPolicy::default();
    assert!(!policy.damages(Some(EntityType::Creep), EntityType::Creep));
    assert!(policy.damages(Some(EntityType::Environment), EntityType::Creep));
    assert!(policy.damages(None, EntityType::Creep));
    assert!(!policy.damages(None, EntityType::Environment));
}

#[test]
fn test_default_policy_consumption() {
    let policy = CombatPolicy::default();
    assert!(!policy.consumes(Some(EntityType::Creep), EntityType::Creep));
    assert!(!policy.consumes(Some(EntityType::Creep), EntityType::Environment));
    assert!(policy.consumes(None, EntityType::Creep));
    assert!(policy.consumes(None, EntityType::Environment));
    assert!(!policy.consumes(None, EntityType::Bullet));

    let walled = CombatPolicy {
        walls_stop_bullets: true,
        ..CombatPolicy::default()
    };
    assert!(walled.consumes(Some(EntityType::Creep), EntityType::Environment));
}

#[test]
fn test_inverted_policy_lets_creep_fire_hurt() {
    let policy = CombatPolicy {
        creep_fire_hurts_creeps: true,
        creep_fire_consumed_on_hit: true,
        ..CombatPolicy::default()
    };
    assert!(policy.damages(Some(EntityType::Creep), EntityType::Creep));
    assert!(policy.consumes(Some(EntityType::Creep), EntityType::Creep));
}

#[test]
fn test_error_display() {
    let err = SimError::invalid("Bullet::new", "zero-length direction");
    assert_eq!(
        err.to_string(),
        "invalid argument in Bullet::new: zero-length direction"
    );
}

/// Snapshots and events go over the wire as JSON.
#[test]
fn test_snapshot_serde() {
    let snapshot = FrameSnapshot {
        entities: vec![EntityView {
            id: EntityId(7),
            entity_type: EntityType::Creep,
            center: DVec2::new(1.0, 2.0),
            bounds: Aabb::new(DVec2::ZERO, DVec2::new(2.0, 4.0)),
            visual: Visual::Creep {
                rotation: 0.5,
                breath_scale: 1.0,
                health: 90,
            },
        }],
        ..Default::default()
    };
    let json = serde_json::to_string(&snapshot).unwrap();
    let back: FrameSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(snapshot, back);
}

#[test]
fn test_event_serde_is_tagged() {
    let event = SimEvent::Removed {
        id: EntityId(3),
        entity_type: EntityType::Bullet,
        cause: RemovalCause::Expired,
        position: DVec2::new(10.0, 0.0),
        frame: 120,
    };
    let json = serde_json::to_string(&event).unwrap();
    assert!(json.contains(r#""type":"Removed""#));
    let back: SimEvent = serde_json::from_str(&json).unwrap();
    assert_eq!(event, back);
}
