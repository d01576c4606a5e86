use agent_nexus::core::components::Agent;
use agent_nexus::field::agents::agent_position;
use bevy::math::Vec2;
use bevy::prelude::Color;
use std::f32::consts::PI;

const RADII: Vec2 = Vec2::new(512.0, 180.0);

#[test]
fn path_satisfies_ellipse_identity() {
    // For phase 0 the oscillators share their argument, so every position
    // lies on the configured ellipse: (x/rx)^2 + (y/ry)^2 == 1.
    let mut t = 0.0f32;
    for _ in 0..500 {
        let p = agent_position(0.0, t, RADII);
        let lhs = (p.x / RADII.x).powi(2) + (p.y / RADII.y).powi(2);
        assert!((lhs - 1.0).abs() < 1e-4, "off ellipse at t={t}: {lhs}");
        t += 0.02;
    }
}

#[test]
fn opposite_phase_mirrors_horizontally() {
    for i in 0..100 {
        let t = i as f32 * 0.07;
        let a = agent_position(0.0, t, RADII);
        let b = agent_position(PI, t, RADII);
        assert!((a.x + b.x).abs() < 1e-3, "x should mirror at t={t}");
        assert!((a.y - b.y).abs() < 1e-3, "y should coincide at t={t}");
    }
}

#[test]
fn position_is_deterministic_in_t() {
    let a = agent_position(0.0, 3.2, RADII);
    let b = agent_position(0.0, 3.2, RADII);
    assert_eq!(a, b);
}

#[test]
fn trail_never_exceeds_capacity() {
    let mut agent = Agent::new(0.0, Color::WHITE);
    for i in 0..200 {
        agent.push_history(Vec2::new(i as f32, 0.0), 40);
        assert!(agent.history.len() <= 40);
    }
    assert_eq!(agent.history.len(), 40);
}

#[test]
fn trail_keeps_most_recent_in_insertion_order() {
    let mut agent = Agent::new(0.0, Color::WHITE);
    for i in 0..100 {
        agent.push_history(Vec2::new(i as f32, 0.0), 40);
    }
    // Oldest surviving entry is #60, newest is #99, in order.
    let xs: Vec<f32> = agent.history.iter().map(|p| p.x).collect();
    assert_eq!(xs.first(), Some(&60.0));
    assert_eq!(xs.last(), Some(&99.0));
    assert!(xs.windows(2).all(|w| w[1] == w[0] + 1.0));
}

#[test]
fn shrinking_limit_evicts_from_the_front() {
    let mut agent = Agent::new(0.0, Color::WHITE);
    for i in 0..10 {
        agent.push_history(Vec2::new(i as f32, 0.0), 10);
    }
    agent.push_history(Vec2::new(10.0, 0.0), 4);
    let xs: Vec<f32> = agent.history.iter().map(|p| p.x).collect();
    assert_eq!(xs, vec![7.0, 8.0, 9.0, 10.0]);
}
