//! End-to-end behaviour of the hunting scene, driven through the public API.

use duck_hunt::{
    Aim, BirdCapsules, BirdPose, CollisionSettings, DistanceMetric, FlapAnimation, Heading,
    HitRadii, Mat4, ShotOutcome, SimConfig, Simulation, Sphere, Vec3, origin_of,
};

const DT: f32 = 1.0 / 60.0;

/// No random spawns, shots fly in world units.
fn manual() -> SimConfig {
    SimConfig::duck_hunt()
        .spawn_chance(0.0)
        .spawn_immediately(false)
        .launch_frame(Mat4::IDENTITY)
}

#[test]
fn bird_crossing_the_sky_escapes_unharmed() {
    let mut sim = Simulation::with_seed(manual(), 1).unwrap();
    let bird = sim.spawn_bird(Heading::Right, 10.0, -5.0);
    assert_eq!(sim.bird(bird).unwrap().world_position().x, -80.0);

    let mut escaped_at = None;
    for frame in 1..4000 {
        let report = sim.tick(frame as f32 * DT, Aim::default());
        assert!(report.hits.is_empty());
        if report.escaped.contains(&bird) {
            escaped_at = Some(frame);
            break;
        }
        assert!(sim.bird(bird).unwrap().world_position().x <= 68.0);
    }

    // 148 units at 0.05 per tick.
    let frame = escaped_at.expect("bird never escaped");
    assert!((2955..=2965).contains(&frame), "escaped after {frame} ticks");
    assert_eq!(sim.bird_count(), 0);
    assert_eq!(sim.birds_hit(), 0);
}

#[test]
fn projectile_reaches_its_end_point_then_expires() {
    let mut sim = Simulation::with_seed(manual(), 2).unwrap();
    let shot = sim.spawn_projectile(Vec3::new(0.0, 0.0, 50.0), Vec3::new(0.0, 0.0, -50.0));

    sim.tick(1.0 / 3.0, Aim::default());
    let center = sim.projectile(shot).unwrap().center();
    assert!(center.abs_diff_eq(Vec3::new(0.0, 0.0, -50.0), 1e-3));

    let report = sim.tick(1.0, Aim::default());
    assert!(report.expired.is_empty());
    assert!(sim.projectile(shot).is_some());

    let report = sim.tick(1.8, Aim::default());
    assert_eq!(report.expired, vec![shot]);
    assert!(sim.projectile(shot).is_none());
}

#[test]
fn only_the_bird_in_reach_is_hit() {
    let mut sim = Simulation::with_seed(manual(), 3).unwrap();
    let low = sim.spawn_bird(Heading::Right, 5.0, -5.0);
    let high = sim.spawn_bird(Heading::Right, 14.0, -5.0);
    sim.tick(0.0, Aim::default());

    let target = sim.capsules(low).unwrap().center_point + sim.bird(low).unwrap().velocity;
    let shot = sim.spawn_projectile(target, target);
    let report = sim.tick(DT, Aim::default());

    assert_eq!(report.hits.len(), 1);
    assert_eq!(report.hits[0].bird, low);
    assert_eq!(report.hits[0].projectile, shot);
    assert!(sim.bird(low).is_none());
    assert!(sim.bird(high).is_some());
    assert_eq!(sim.birds_hit(), 1);
}

#[test]
fn second_shot_inside_cooldown_is_rejected() {
    let mut sim = Simulation::with_seed(manual(), 4).unwrap();

    sim.request_shoot();
    let first = sim.tick(0.0, Aim::default()).shot;
    assert!(matches!(first, Some(ShotOutcome::Fired(_))));
    let ammo = sim.ammo_remaining();

    sim.request_shoot();
    let second = sim.tick(0.5, Aim::default()).shot;
    assert_eq!(second, Some(ShotOutcome::CoolingDown));
    assert_eq!(sim.projectile_count(), 1);
    assert_eq!(sim.ammo_remaining(), ammo);
}

#[test]
fn chest_sits_three_tenths_toward_the_beak() {
    let animation = FlapAnimation::default();
    let frames = [
        Mat4::IDENTITY,
        Mat4::from_translation(Vec3::new(-40.0, 9.0, -12.0)) * Mat4::from_rotation_y(1.2),
        Mat4::from_translation(Vec3::new(33.0, 6.5, -1.0)) * Mat4::from_rotation_y(-1.9),
    ];
    for frame in frames {
        for step in 0..40 {
            let pose = BirdPose::solve(frame, step as f32 * 0.07, &animation);
            let caps = BirdCapsules::from_pose(&pose);
            let tail = origin_of(pose.body);
            let beak = origin_of(pose.beak);
            assert!(caps.center_point.abs_diff_eq(tail * 0.7 + beak * 0.3, 1e-4));
            assert!(caps.body_vector.abs_diff_eq(beak - tail, 1e-4));
        }
    }
}

#[test]
fn sphere_on_the_chest_always_hits() {
    let animation = FlapAnimation::default();
    let radii = HitRadii::default();
    for metric in [DistanceMetric::Line, DistanceMetric::Segment] {
        let settings = CollisionSettings {
            metric,
            broad_phase: true,
        };
        for step in 0..60 {
            let frame = Mat4::from_translation(Vec3::new(step as f32 - 30.0, 8.0, -6.0))
                * Mat4::from_rotation_y(step as f32 * 0.3);
            let pose = BirdPose::solve(frame, step as f32 * 0.05, &animation);
            let caps = BirdCapsules::from_pose(&pose);
            let shot = Sphere::new(caps.center_point, 0.01);
            assert!(settings.sphere_hits_bird(&caps, radii, shot));
        }
    }
}

#[test]
fn collision_test_is_repeatable() {
    let pose = BirdPose::solve(Mat4::IDENTITY, 0.4, &FlapAnimation::default());
    let caps = BirdCapsules::from_pose(&pose);
    let settings = CollisionSettings::default();
    let radii = HitRadii::default();

    for offset in [0.0, 0.4, 0.8, 1.5, 3.0, 10.0] {
        let shot = Sphere::new(caps.center_point + Vec3::new(0.0, offset, 0.0), 0.25);
        let first = settings.sphere_hits_bird(&caps, radii, shot);
        for _ in 0..5 {
            assert_eq!(settings.sphere_hits_bird(&caps, radii, shot), first);
        }
    }
}

#[test]
fn restart_brings_a_new_bird_in() {
    let config = SimConfig::duck_hunt().spawn_chance(0.0).starting_ammo(Some(3));
    let mut sim = Simulation::with_seed(config, 5).unwrap();
    assert_eq!(sim.tick(0.0, Aim::default()).spawned.len(), 1);

    sim.request_shoot();
    sim.tick(DT, Aim::default());
    assert_eq!(sim.ammo_remaining(), Some(2));

    sim.restart();
    assert_eq!(sim.bird_count(), 0);
    assert_eq!(sim.ammo_remaining(), Some(3));
    assert_eq!(sim.birds_hit(), 0);
    assert_eq!(sim.tick(2.0 * DT, Aim::default()).spawned.len(), 1);
}

#[test]
fn demo_shots_arc_and_never_run_out() {
    let mut sim = Simulation::with_seed(SimConfig::bird_demo().spawn_chance(0.0), 6).unwrap();
    for frame in 0..600 {
        if frame % 200 == 0 {
            sim.request_shoot();
        }
        sim.tick(frame as f32 * DT, Aim::default());
    }
    assert_eq!(sim.ammo_remaining(), None);
    assert!(!sim.lose_condition_reached());
}
