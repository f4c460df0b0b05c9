//! Integration tests for tryon-solver.

use glam::Vec3;
use tryon_body::{BodyProxyBuilder, CollisionPrimitive, Landmark, LandmarkFrame};
use tryon_material::MaterialKind;
use tryon_mesh::generators::{quad, quad_grid, tshirt_template};
use tryon_mesh::TriangleMesh;
use tryon_solver::{ClothConfig, ClothEngine, DistanceConstraint, ParticleState};
use tryon_types::{GarmentHandle, TryOnError};

const DT: f32 = 1.0 / 60.0;

fn engine(config: ClothConfig) -> ClothEngine {
    ClothEngine::new(config).unwrap()
}

fn single_particle(p: Vec3) -> TriangleMesh {
    TriangleMesh::from_interleaved(&[p.x, p.y, p.z], &[], &[]).unwrap()
}

// ─── Config Tests ─────────────────────────────────────────────

#[test]
fn default_config_is_valid() {
    let cfg = ClothConfig::default();
    assert!(cfg.validate().is_ok());
    assert_eq!(cfg.iterations, 10);
    assert!((cfg.gravity_vector() - Vec3::new(0.0, -9.81, 0.0)).length() < 1e-6);
    assert!(ClothConfig::debug().validate().is_ok());
    assert!(ClothConfig::high_quality().iterations > cfg.iterations);
}

#[test]
fn config_rejects_bad_values() {
    let mut cfg = ClothConfig::default();
    cfg.iterations = 0;
    assert!(ClothEngine::new(cfg).is_err());

    let mut cfg = ClothConfig::default();
    cfg.friction = 1.5;
    assert!(cfg.validate().is_err());

    let mut cfg = ClothConfig::default();
    cfg.materials.silk.stiffness = -0.1;
    assert!(cfg.validate().is_err());
}

#[test]
fn config_partial_toml() {
    let cfg: ClothConfig = toml::from_str("iterations = 20\ndamping = 0.95\n").unwrap();
    assert_eq!(cfg.iterations, 20);
    assert_eq!(cfg.damping, 0.95);
    assert_eq!(cfg.collision_margin, ClothConfig::default().collision_margin);
    assert_eq!(cfg.ground_height, Some(-2.0));
}

#[test]
fn config_json_round_trip() {
    let mut cfg = ClothConfig::high_quality();
    cfg.ground_height = Some(-1.5);
    cfg.materials.denim.stiffness = 0.75;
    let json = serde_json::to_string(&cfg).unwrap();
    let back: ClothConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, cfg);
    assert!(back.validate().is_ok());
}

// ─── Constraint Tests ─────────────────────────────────────────

fn two_particles(a: Vec3, wa: f32, b: Vec3, wb: f32) -> ParticleState {
    let mut state = ParticleState::default();
    state.push(a, wa);
    state.push(b, wb);
    state
}

#[test]
fn coincident_ends_are_left_alone() {
    let p = Vec3::new(0.2, 1.0, -0.3);
    let mut state = two_particles(p, 1.0, p, 1.0);
    let c = DistanceConstraint {
        a: 0,
        b: 1,
        rest_length: 0.5,
        stiffness: 1.0,
    };
    for _ in 0..10 {
        c.project(&mut state);
    }
    for i in 0..2 {
        let q = state.position(i);
        assert!(q.is_finite());
        assert_eq!(q, p);
    }
}

#[test]
fn relax_keeps_collapsed_garment_finite() {
    let mut eng = engine(ClothConfig::default());
    let h = eng.add_garment(Some(&quad(1.0, 1.0)), MaterialKind::Silk).unwrap();
    let p = Vec3::new(0.0, 0.5, 0.0);
    eng.set_particle_positions(h, &[p; 4]).unwrap();
    assert!(eng.constraints().iter().all(|c| c.rest_length > 0.0));

    eng.relax(20);
    for q in eng.particle_positions(h).unwrap() {
        assert!(q.is_finite());
        assert_eq!(q, p);
    }
}

#[test]
fn pinned_ends_are_never_corrected() {
    let a = Vec3::ZERO;
    let b = Vec3::new(2.0, 0.0, 0.0);
    let mut state = two_particles(a, 0.0, b, 0.0);
    let c = DistanceConstraint {
        a: 0,
        b: 1,
        rest_length: 0.5,
        stiffness: 1.0,
    };
    assert!((c.error(&state) - 1.5).abs() < 1e-6);
    c.project(&mut state);
    assert_eq!(state.position(0), a);
    assert_eq!(state.position(1), b);
}

#[test]
fn stretched_constraint_moves_only_free_end() {
    let a = Vec3::ZERO;
    let mut state = two_particles(a, 0.0, Vec3::new(2.0, 0.0, 0.0), 1.0);
    let c = DistanceConstraint {
        a: 0,
        b: 1,
        rest_length: 0.5,
        stiffness: 1.0,
    };
    c.project(&mut state);
    assert_eq!(state.position(0), a);
    assert!((state.position(1) - Vec3::new(0.5, 0.0, 0.0)).length() < 1e-6);
}

// ─── Garment Lifecycle Tests ──────────────────────────────────

#[test]
fn add_garment_without_mesh_fails_cleanly() {
    let mut eng = engine(ClothConfig::default());
    let err = eng.add_garment(None, MaterialKind::Cotton).unwrap_err();
    assert!(matches!(err, TryOnError::NoMesh));
    assert_eq!(eng.particle_count(), 0);
    assert!(eng.constraints().is_empty());
}

#[test]
fn add_garment_builds_particles_and_edge_constraints() {
    let mut eng = engine(ClothConfig::static_relaxation());
    let mesh = quad(1.0, 1.0);
    let h = eng.add_garment(Some(&mesh), MaterialKind::Silk).unwrap();

    assert_eq!(h, GarmentHandle(0));
    assert_eq!(eng.particle_count(), 4);
    // 5 unique edges: 4 sides + 1 diagonal.
    assert_eq!(eng.constraints().len(), 5);

    let silk = ClothConfig::default().materials.silk;
    for c in eng.constraints() {
        assert_eq!(c.stiffness, silk.stiffness);
    }
    assert!((eng.constraints()[2].rest_length - 2f32.sqrt()).abs() < 1e-6);
    assert!(eng.particles().inv_mass.iter().all(|&w| (w - 1.0 / silk.particle_mass).abs() < 1e-6));
    assert_eq!(eng.particle_positions(h).unwrap(), mesh.positions());
    assert!(eng.particle_velocities(h).unwrap().iter().all(|v| *v == Vec3::ZERO));
}

#[test]
fn anchor_heuristic_pins_top_corners_to_shoulders() {
    let mut eng = engine(ClothConfig::default());
    let mesh = tshirt_template();
    eng.add_garment(Some(&mesh), MaterialKind::Cotton).unwrap();

    let anchored: Vec<(usize, Landmark)> = eng
        .particles()
        .anchor
        .iter()
        .enumerate()
        .filter_map(|(i, a)| a.map(|lm| (i, lm)))
        .collect();
    assert_eq!(anchored, vec![(0, Landmark::LeftShoulder), (14, Landmark::RightShoulder)]);
    assert_eq!(eng.particles().inv_mass[0], 0.0);
    assert_eq!(eng.particles().inv_mass[14], 0.0);
    assert!(eng.particles().inv_mass[7] > 0.0);
}

#[test]
fn pin_vertex_rejects_out_of_range() {
    let mut eng = engine(ClothConfig::static_relaxation());
    let h = eng.add_garment(Some(&quad(1.0, 1.0)), MaterialKind::Cotton).unwrap();
    assert!(eng.pin_vertex(h, 4, None).is_err());
    assert!(eng.pin_vertex(GarmentHandle(9), 0, None).is_err());
    assert!(eng.pin_vertex(h, 3, None).is_ok());
}

#[test]
fn remove_garment_keeps_other_garment_indices() {
    let cfg = ClothConfig {
        anchor: None,
        ..Default::default()
    };
    let first = quad(1.0, 1.0);
    let second = quad_grid(3, 3, 1.0, 1.0);

    let mut both = engine(cfg.clone());
    let a = both.add_garment(Some(&first), MaterialKind::Denim).unwrap();
    let b = both.add_garment(Some(&second), MaterialKind::Silk).unwrap();
    both.pin_vertex(b, 0, None).unwrap();
    both.remove_garment(a).unwrap();

    let mut alone = engine(cfg);
    let c = alone.add_garment(Some(&second), MaterialKind::Silk).unwrap();
    alone.pin_vertex(c, 0, None).unwrap();

    for _ in 0..50 {
        both.step(DT).unwrap();
        alone.step(DT).unwrap();
    }

    assert_eq!(both.particle_positions(b).unwrap(), alone.particle_positions(c).unwrap());
    assert!(matches!(both.particle_positions(a), Err(TryOnError::UnknownGarment(_))));
    assert!(both.remove_garment(a).is_err());
    assert_eq!(both.active_garment_count(), 1);
    assert_eq!(both.active_garments().collect::<Vec<_>>(), vec![b]);
    // Tombstoned slots are not reclaimed.
    assert_eq!(both.particle_count(), 4 + 16);
}

#[test]
fn reset_clears_everything() {
    let mut eng = engine(ClothConfig::default());
    eng.add_garment(Some(&quad(1.0, 1.0)), MaterialKind::Cotton).unwrap();
    eng.update_collision_body(&[CollisionPrimitive::sphere(Vec3::ZERO, 0.3)]);
    eng.reset();
    assert_eq!(eng.particle_count(), 0);
    assert!(eng.constraints().is_empty());
    assert!(eng.primitives().is_empty());
    assert_eq!(eng.active_garment_count(), 0);
    assert!(eng.step(DT).is_ok());
}

// ─── Step Tests ───────────────────────────────────────────────

#[test]
fn step_rejects_non_positive_dt() {
    let mut eng = engine(ClothConfig::default());
    assert!(eng.step(0.0).is_err());
    assert!(eng.step(-DT).is_err());
    assert!(eng.step(f32::NAN).is_err());
}

#[test]
fn pinned_quad_settles_under_gravity() {
    let mut eng = engine(ClothConfig {
        anchor: None,
        ..Default::default()
    });
    let mesh = quad(1.0, 1.0);
    let h = eng.add_garment(Some(&mesh), MaterialKind::Cotton).unwrap();
    // Raised top-left corner.
    eng.pin_vertex(h, 3, None).unwrap();
    let start = eng.particle_positions(h).unwrap();

    for _ in 0..1000 {
        eng.step(DT).unwrap();
    }

    let end = eng.particle_positions(h).unwrap();
    assert_eq!(end[3], start[3], "pinned corner moved");

    let max_speed = eng
        .particle_velocities(h)
        .unwrap()
        .iter()
        .map(|v| v.length())
        .fold(0.0f32, f32::max);
    assert!(max_speed < 1e-3, "still moving: {max_speed}");

    let centroid = |ps: &[Vec3]| (ps[0] + ps[1] + ps[2]) / 3.0;
    assert!(centroid(&end).y < centroid(&start).y - 0.2);
    for p in &end[..3] {
        assert!(p.y < end[3].y);
    }

    let residual = eng.constraint_residual(h).unwrap();
    assert!(residual.max < 0.01, "edges overstretched: {residual:?}");
}

#[test]
fn relaxation_error_decreases_monotonically() {
    let mut eng = engine(ClothConfig::static_relaxation());
    let mesh = quad_grid(3, 3, 1.0, 1.0);
    let h = eng.add_garment(Some(&mesh), MaterialKind::Cotton).unwrap();
    eng.pin_vertex(h, 0, None).unwrap();

    let stretched: Vec<Vec3> = mesh
        .positions()
        .iter()
        .enumerate()
        .map(|(i, p)| Vec3::new(p.x * 1.3, p.y * 1.3, 0.05 * (((i * 7) % 5) as f32 - 2.0)))
        .collect();
    eng.set_particle_positions(h, &stretched).unwrap();

    let mut previous = eng.constraint_residual(h).unwrap().total;
    assert!(previous > 1.0);
    for _ in 0..300 {
        eng.relax(1);
        let total = eng.constraint_residual(h).unwrap().total;
        assert!(total <= previous + 1e-5, "error grew: {previous} -> {total}");
        previous = total;
    }
    assert!(eng.constraint_residual(h).unwrap().max < 1e-3);
}

#[test]
fn particle_inside_sphere_is_pushed_to_margin() {
    let cfg = ClothConfig::static_relaxation();
    let margin = cfg.collision_margin;
    let mut eng = engine(cfg);
    let start = Vec3::new(0.1, 0.05, 0.0);
    let h = eng.add_garment(Some(&single_particle(start)), MaterialKind::Cotton).unwrap();
    eng.update_collision_body(&[CollisionPrimitive::sphere(Vec3::ZERO, 0.3)]);

    assert_eq!(eng.resolve_collisions(), 1);

    let p = eng.particle_positions(h).unwrap()[0];
    assert!((p.length() - (0.3 + margin)).abs() < 1e-5);
    assert!((p.normalize() - start.normalize()).length() < 1e-5);
}

#[test]
fn colliding_particles_end_outside_every_primitive() {
    let cfg = ClothConfig::default();
    let margin = cfg.collision_margin;
    let mut eng = engine(cfg);
    let mut builder = BodyProxyBuilder::default();
    let prims = builder.build(&LandmarkFrame::reference_pose());
    eng.update_collision_body(&prims);
    let h = eng.add_garment(Some(&tshirt_template()), MaterialKind::Cotton).unwrap();

    for _ in 0..30 {
        eng.step(DT).unwrap();
        for (i, p) in eng.particle_positions(h).unwrap().iter().enumerate() {
            if eng.particles().inv_mass[i] == 0.0 {
                continue;
            }
            for prim in &prims {
                assert!(p.distance(prim.center) >= prim.radius + margin - 1e-4);
            }
        }
    }
}

#[test]
fn anchored_particles_follow_primitive_exactly() {
    let mut eng = engine(ClothConfig::default());
    let h = eng.add_garment(Some(&tshirt_template()), MaterialKind::Denim).unwrap();
    let mut builder = BodyProxyBuilder::default();
    let mut frame = LandmarkFrame::reference_pose();

    for step in 0..60 {
        frame = frame.translated(Vec3::new(0.002 * (step as f32 * 0.3).sin(), 0.0, 0.0));
        let prims = builder.build(&frame);
        eng.update_collision_body(&prims);
        let stats = eng.step(DT).unwrap();
        assert_eq!(stats.anchored, 2);

        let center = |lm: Landmark| {
            prims.iter().find(|p| p.landmark == Some(lm)).map(|p| p.center).unwrap()
        };
        let positions = eng.particle_positions(h).unwrap();
        assert_eq!(positions[0], center(Landmark::LeftShoulder));
        assert_eq!(positions[14], center(Landmark::RightShoulder));
    }
}

#[test]
fn pinned_without_anchor_stays_put() {
    let mut eng = engine(ClothConfig {
        anchor: None,
        ..Default::default()
    });
    let h = eng.add_garment(Some(&quad(1.0, 1.0)), MaterialKind::Cotton).unwrap();
    eng.pin_vertex(h, 2, None).unwrap();
    eng.update_collision_body(&[CollisionPrimitive::at_landmark(
        Landmark::RightShoulder,
        Vec3::new(5.0, 5.0, 5.0),
        0.08,
    )]);
    let before = eng.particle_positions(h).unwrap()[2];
    eng.step(DT).unwrap();
    assert_eq!(eng.particle_positions(h).unwrap()[2], before);
}

#[test]
fn external_force_applies_for_one_step() {
    let mut eng = engine(ClothConfig::static_relaxation());
    let h = eng.add_garment(Some(&quad(1.0, 1.0)), MaterialKind::Cotton).unwrap();

    eng.apply_external_force(Vec3::new(60.0, 0.0, 0.0));
    eng.step(DT).unwrap();
    let v1 = eng.particle_velocities(h).unwrap();
    for v in &v1 {
        assert!((v.x - 1.0).abs() < 1e-4);
    }

    eng.step(DT).unwrap();
    let v2 = eng.particle_velocities(h).unwrap();
    for (a, b) in v1.iter().zip(&v2) {
        assert!((*a - *b).length() < 1e-4, "force leaked into second step");
    }
}

#[test]
fn ground_plane_stops_falling_particles() {
    let mut eng = engine(ClothConfig {
        anchor: None,
        ..Default::default()
    });
    let h = eng
        .add_garment(Some(&single_particle(Vec3::new(0.0, -1.9, 0.0))), MaterialKind::Cotton)
        .unwrap();
    for _ in 0..120 {
        eng.step(DT).unwrap();
        assert!(eng.particle_positions(h).unwrap()[0].y >= -2.0);
    }
    assert_eq!(eng.particle_positions(h).unwrap()[0].y, -2.0);
}

#[test]
fn full_friction_removes_tangential_contact_velocity() {
    let mut eng = engine(ClothConfig {
        friction: 1.0,
        ..ClothConfig::static_relaxation()
    });
    let h = eng
        .add_garment(Some(&single_particle(Vec3::new(0.0, 0.3, 0.0))), MaterialKind::Cotton)
        .unwrap();
    eng.update_collision_body(&[CollisionPrimitive::sphere(Vec3::ZERO, 0.3)]);
    eng.apply_external_force(Vec3::new(60.0, 0.0, 0.0));
    let stats = eng.step(DT).unwrap();
    assert_eq!(stats.contacts, 1);

    let p = eng.particle_positions(h).unwrap()[0];
    let v = eng.particle_velocities(h).unwrap()[0];
    let n = p.normalize();
    assert!(v.cross(n).length() < 1e-4, "tangential velocity survived: {v:?}");
    assert!(v.dot(n) >= 0.0);
}

#[test]
fn identical_inputs_give_identical_results() {
    let run = || {
        let mut eng = engine(ClothConfig::default());
        let h = eng.add_garment(Some(&tshirt_template()), MaterialKind::Wool).unwrap();
        let mut builder = BodyProxyBuilder::default();
        for _ in 0..20 {
            eng.update_collision_body(&builder.build(&LandmarkFrame::reference_pose()));
            eng.step(DT).unwrap();
        }
        eng.particle_positions(h).unwrap()
    };
    assert_eq!(run(), run());
}
