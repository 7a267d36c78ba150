use balloonsim::simulation::constraints::MinDistanceSpring;
use balloonsim::simulation::integrator::{constraint_set, floor_of, gravity_set};
use balloonsim::{euler_step_with, initialize, step, Floor, NVec2, Parameters, Particle, ParticleCollection, SimError};

use float_cmp::approx_eq;
use test_case::test_case;

/// Two particles at rest, `p2 - p1 = offset`
pub fn two_particles(offset: NVec2, mass: f64) -> ParticleCollection {
    let p1 = Particle::new(NVec2::new(100.0, 100.0), 1.0, mass).unwrap();
    let p2 = Particle::new(NVec2::new(100.0, 100.0) + offset, 1.0, mass).unwrap();
    ParticleCollection::from_particles(vec![p1, p2]).unwrap()
}

/// Constants for tests: the classic balloon values, unit-mass friendly
pub fn test_params() -> Parameters {
    Parameters {
        gravity: 0.01,
        min_distance: 15.0,
        spring_constant: 0.1,
        bounce_factor: -0.8,
        floor_y: 600.0,
    }
}

/// Parameters with no gravity and a floor far away, so only springs act
pub fn springs_only() -> Parameters {
    Parameters {
        gravity: 0.0,
        floor_y: 1.0e9,
        ..test_params()
    }
}

pub fn spring() -> MinDistanceSpring {
    MinDistanceSpring {
        min_distance: 15.0,
        spring_constant: 0.1,
    }
}

pub fn classic_ring() -> ParticleCollection {
    initialize(12, NVec2::new(400.0, 300.0), 50.0, 10.0, 0.1).unwrap()
}

// ==================================================================================
// Particle
// ==================================================================================

#[test]
fn apply_force_divides_by_mass() {
    let mut p = Particle::new(NVec2::new(0.0, 0.0), 1.0, 0.5).unwrap();
    p.apply_force(NVec2::new(1.0, -2.0));

    assert_eq!(p.v, NVec2::new(2.0, -4.0));
    assert_eq!(p.x, NVec2::zeros(), "apply_force must not move the particle");
}

#[test]
fn integrate_adds_velocity_once() {
    let mut p = Particle::new(NVec2::new(1.0, 2.0), 1.0, 1.0)
        .unwrap()
        .with_velocity(NVec2::new(0.5, -0.25));
    p.integrate();

    assert_eq!(p.x, NVec2::new(1.5, 1.75));
    assert_eq!(p.v, NVec2::new(0.5, -0.25));
}

#[test_case(0.0 ; "zero mass")]
#[test_case(-1.0 ; "negative mass")]
fn particle_rejects_non_positive_mass(mass: f64) {
    let err = Particle::new(NVec2::zeros(), 1.0, mass).unwrap_err();
    assert_eq!(err, SimError::NonPositiveMass(mass));
}

#[test]
fn particle_rejects_negative_radius() {
    let err = Particle::new(NVec2::zeros(), -0.5, 1.0).unwrap_err();
    assert_eq!(err, SimError::NegativeRadius(-0.5));
}

#[test]
fn particle_rejects_nan() {
    assert!(matches!(
        Particle::new(NVec2::zeros(), 1.0, f64::NAN),
        Err(SimError::NonFiniteValue(_))
    ));
    assert!(matches!(
        Particle::new(NVec2::new(f64::INFINITY, 0.0), 1.0, 1.0),
        Err(SimError::NonFiniteValue(_))
    ));
}

#[test]
fn particle_rejects_mass_without_finite_inverse() {
    let err = Particle::new(NVec2::zeros(), 1.0, 5e-324).unwrap_err();
    assert_eq!(err, SimError::InvalidParameter { name: "mass", value: 5e-324 });

    // smallest normal mass still has a finite inverse
    let p = Particle::new(NVec2::zeros(), 1.0, f64::MIN_POSITIVE).unwrap();
    assert!((1.0 / p.mass()).is_finite());
}

// ==================================================================================
// Initialization
// ==================================================================================

#[test]
fn ring_is_evenly_spaced_on_circle() {
    let ring = classic_ring();
    let center = NVec2::new(400.0, 300.0);

    assert_eq!(ring.len(), 12);
    assert_eq!(ring.frame(), 0);
    for p in ring.particles() {
        assert!(approx_eq!(f64, (p.x - center).norm(), 50.0, epsilon = 1e-9));
        assert_eq!(p.v, NVec2::zeros());
        assert_eq!(p.radius(), 10.0);
        assert_eq!(p.mass(), 0.1);
    }

    // First particle at angle 0, fourth at a quarter turn (y grows downward)
    let p0 = ring.get(0).unwrap().x;
    let p3 = ring.get(3).unwrap().x;
    assert!(approx_eq!(f64, p0.x, 450.0, epsilon = 1e-9));
    assert!(approx_eq!(f64, p0.y, 300.0, epsilon = 1e-9));
    assert!(approx_eq!(f64, p3.x, 400.0, epsilon = 1e-9));
    assert!(approx_eq!(f64, p3.y, 350.0, epsilon = 1e-9));

    // Neighbours are 2 * 50 * sin(15 deg) apart
    let spacing = (ring.get(1).unwrap().x - p0).norm();
    assert!(approx_eq!(f64, spacing, 100.0 * (15f64.to_radians()).sin(), epsilon = 1e-9));
}

#[test_case(0, 10.0, 0.1 => SimError::EmptyRing ; "no particles")]
#[test_case(12, 10.0, 0.0 => SimError::NonPositiveMass(0.0) ; "zero mass")]
#[test_case(12, -1.0, 0.1 => SimError::NegativeRadius(-1.0) ; "negative radius")]
#[test_case(12, 10.0, 5e-324 => SimError::InvalidParameter { name: "mass", value: 5e-324 } ; "subnormal mass")]
fn initialize_rejects_bad_input(count: usize, particle_radius: f64, mass: f64) -> SimError {
    initialize(count, NVec2::new(400.0, 300.0), 50.0, particle_radius, mass).unwrap_err()
}

#[test]
fn step_always_advances_the_frame() {
    assert_eq!(ParticleCollection::from_particles(Vec::new()).unwrap_err(), SimError::EmptyRing);

    let p = Particle::new(NVec2::new(10.0, 10.0), 1.0, 1.0).unwrap();
    let mut one = ParticleCollection::from_particles(vec![p]).unwrap();
    for expected in 1..=3 {
        assert_eq!(step(&mut one, &test_params()).frame, expected);
    }
    assert_eq!(one.frame(), 3);
}

#[test]
fn segments_close_the_loop() {
    let ring = classic_ring();
    let segments: Vec<_> = ring.segments().collect();

    assert_eq!(segments.len(), 12);
    for (i, (a, b)) in segments.iter().enumerate() {
        assert_eq!(*a, ring.get(i).unwrap().x);
        assert_eq!(*b, ring.get((i + 1) % 12).unwrap().x);
    }
}

// ==================================================================================
// Constraint solver
// ==================================================================================

#[test]
fn spring_force_for_overlap_of_ten() {
    // distance 5, min distance 15 -> overlap 10 -> |F| = 10 * 0.1 = 1
    let mut ps = two_particles(NVec2::new(3.0, 4.0), 1.0);
    let f = spring()
        .pair_force(ps.get(0).unwrap(), ps.get(1).unwrap())
        .expect("pair is closer than min distance");

    assert!(approx_eq!(f64, f.norm(), 1.0, epsilon = 1e-12));
    assert!(approx_eq!(f64, f.x, 0.6, epsilon = 1e-12));
    assert!(approx_eq!(f64, f.y, 0.8, epsilon = 1e-12));

    // Each particle's velocity changes by force / mass in opposite directions
    constraint_set(&springs_only()).apply(&mut ps);
    let v0 = ps.get(0).unwrap().v;
    let v1 = ps.get(1).unwrap().v;
    assert_eq!(v0, f);
    assert_eq!(v1, -f);
}

#[test_case(NVec2::new(5.0, 0.0) ; "horizontal")]
#[test_case(NVec2::new(-2.0, 7.0) ; "up left")]
#[test_case(NVec2::new(0.1, -0.3) ; "almost touching")]
#[test_case(NVec2::new(-9.0, -11.0) ; "just inside")]
fn spring_forces_are_exact_negations(offset: NVec2) {
    let ps = two_particles(offset, 1.0);
    let mut out = vec![NVec2::zeros(); 2];
    constraint_set(&springs_only()).accumulate_forces(&ps, &mut out);

    assert_ne!(out[0], NVec2::zeros());
    assert_eq!(out[0], -out[1]);
}

#[test]
fn spring_velocity_changes_are_opposite_with_mass() {
    let mut ps = two_particles(NVec2::new(5.0, 0.0), 0.5);
    constraint_set(&springs_only()).apply(&mut ps);

    // |F| = 1, m = 0.5 -> |dv| = 2
    assert_eq!(ps.get(0).unwrap().v, NVec2::new(2.0, 0.0));
    assert_eq!(ps.get(1).unwrap().v, NVec2::new(-2.0, 0.0));
}

#[test]
fn no_spring_force_beyond_min_distance() {
    let ps = two_particles(NVec2::new(15.0, 0.0), 1.0);
    assert!(spring().pair_force(ps.get(0).unwrap(), ps.get(1).unwrap()).is_none());

    let ring = classic_ring();
    let mut out = vec![NVec2::new(1.0, 1.0); ring.len()];
    constraint_set(&test_params()).accumulate_forces(&ring, &mut out);
    assert!(out.iter().all(|f| *f == NVec2::zeros()));
}

#[test]
fn coincident_particles_use_fallback_direction() {
    let mut ps = two_particles(NVec2::zeros(), 1.0);
    let f = spring().pair_force(ps.get(0).unwrap(), ps.get(1).unwrap()).unwrap();

    // full overlap of 15 along +x
    assert_eq!(f, NVec2::new(1.5, 0.0));

    constraint_set(&springs_only()).apply(&mut ps);
    for p in ps.particles() {
        assert!(p.v.x.is_finite() && p.v.y.is_finite());
    }
    assert_eq!(ps.get(0).unwrap().v, NVec2::new(1.5, 0.0));
    assert_eq!(ps.get(1).unwrap().v, NVec2::new(-1.5, 0.0));
}

#[test]
fn spring_forces_sum_to_zero_over_the_ring() {
    let ring = initialize(12, NVec2::new(400.0, 300.0), 20.0, 5.0, 1.0).unwrap();
    let mut out = vec![NVec2::zeros(); ring.len()];
    constraint_set(&test_params()).accumulate_forces(&ring, &mut out);

    let net: NVec2 = out.iter().sum();
    assert!(out.iter().any(|f| *f != NVec2::zeros()));
    assert!(net.norm() < 1e-12, "net spring force not zero: {:?}", net);
}

#[test]
fn reused_force_buffer_matches_fresh_apply() {
    let mut fresh = initialize(12, NVec2::new(400.0, 300.0), 20.0, 5.0, 1.0).unwrap();
    let mut reused = fresh.clone();
    let springs = constraint_set(&springs_only());

    // stale values and the wrong length must not leak into the result
    let mut buf = vec![NVec2::new(7.0, -3.0); 40];
    springs.apply(&mut fresh);
    springs.apply_with(&mut reused, &mut buf);
    assert_eq!(reused, fresh);
    assert_eq!(buf.len(), 12);

    let mut short = vec![NVec2::new(1.0, 1.0); 2];
    springs.apply(&mut fresh);
    springs.apply_with(&mut reused, &mut short);
    assert_eq!(reused, fresh);
}

// ==================================================================================
// Boundary resolver
// ==================================================================================

#[test_case(-0.8 ; "classic")]
#[test_case(-0.5 ; "soft")]
#[test_case(-0.1 ; "mud")]
#[test_case(0.0 ; "dead stop")]
fn bounce_loses_energy(bounce_factor: f64) {
    let floor = Floor {
        y: 600.0,
        bounce_factor,
    };
    let mut p = Particle::new(NVec2::new(10.0, 595.0), 10.0, 1.0)
        .unwrap()
        .with_velocity(NVec2::new(0.3, 4.0));

    assert!(floor.resolve(&mut p));
    assert_eq!(p.x.y, 590.0);
    assert_eq!(p.v.y, 4.0 * bounce_factor);
    assert!(p.v.y.abs() < 4.0);
    assert_eq!(p.v.x, 0.3, "floor must not touch horizontal velocity");
}

#[test]
fn resting_on_floor_is_not_a_bounce() {
    let floor = Floor {
        y: 600.0,
        bounce_factor: -0.8,
    };
    let mut p = Particle::new(NVec2::new(0.0, 590.0), 10.0, 1.0)
        .unwrap()
        .with_velocity(NVec2::new(0.0, -1.0));

    assert!(!floor.resolve(&mut p));
    assert_eq!(p.x.y, 590.0);
    assert_eq!(p.v.y, -1.0);
}

// ==================================================================================
// Simulation step
// ==================================================================================

#[test]
fn single_particle_hits_floor() {
    let params = test_params();
    let p = Particle::new(NVec2::new(400.0, params.floor_y - 10.0 + 1.0), 10.0, 1.0)
        .unwrap()
        .with_velocity(NVec2::new(0.0, 2.0));
    let mut ps = ParticleCollection::from_particles(vec![p]).unwrap();

    let report = step(&mut ps, &params);
    let p = ps.get(0).unwrap();

    assert_eq!(report.bounces, 1);
    assert_eq!(report.frame, 1);
    assert_eq!(p.x.y, params.floor_y - 10.0);
    assert_eq!(p.v.y, (2.0 + params.gravity) * params.bounce_factor);
}

#[test]
fn gravity_acceleration_scales_with_inverse_mass() {
    let params = test_params();
    let light = Particle::new(NVec2::new(0.0, 0.0), 1.0, 0.5).unwrap();
    let heavy = Particle::new(NVec2::new(100.0, 0.0), 1.0, 2.0).unwrap();
    let mut ps = ParticleCollection::from_particles(vec![light, heavy]).unwrap();

    step(&mut ps, &params);

    assert_eq!(ps.get(0).unwrap().v.y, params.gravity / 0.5);
    assert_eq!(ps.get(1).unwrap().v.y, params.gravity / 2.0);
}

#[test]
fn free_fall_ring_only_feels_gravity() {
    let params = test_params();
    let mut ring = classic_ring();
    let start: Vec<NVec2> = ring.positions().collect();

    for n in 1..=5 {
        step(&mut ring, &params);
        let expected_vy = n as f64 * params.gravity / 0.1;
        for (p, x0) in ring.particles().iter().zip(&start) {
            assert_eq!(p.v.x, 0.0);
            assert!(approx_eq!(f64, p.v.y, expected_vy, epsilon = 1e-12));
            assert_eq!(p.x.x, x0.x);
        }
    }
}

#[test]
fn spring_forces_move_positions_one_step_later() {
    let params = springs_only();
    let mut ps = two_particles(NVec2::new(5.0, 0.0), 1.0);

    // Frame 1: nothing moves yet, springs only reach the velocities
    step(&mut ps, &params);
    assert_eq!(ps.get(0).unwrap().x, NVec2::new(100.0, 100.0));
    assert_eq!(ps.get(1).unwrap().x, NVec2::new(105.0, 100.0));
    assert_eq!(ps.get(0).unwrap().v, NVec2::new(1.0, 0.0));
    assert_eq!(ps.get(1).unwrap().v, NVec2::new(-1.0, 0.0));

    // Frame 2: integration uses the spring velocities from frame 1
    step(&mut ps, &params);
    assert_eq!(ps.get(0).unwrap().x, NVec2::new(101.0, 100.0));
    assert_eq!(ps.get(1).unwrap().x, NVec2::new(104.0, 100.0));
}

#[test]
fn floor_invariant_holds_every_frame() {
    let params = test_params();
    let mut ring = classic_ring();

    for _ in 0..3000 {
        step(&mut ring, &params);
        for p in ring.particles() {
            assert!(
                p.bottom() <= params.floor_y + 1e-9,
                "frame {}: particle below floor at y = {}",
                ring.frame(),
                p.x.y
            );
        }
    }
    assert_eq!(ring.len(), 12);
    assert_eq!(ring.frame(), 3000);
}

#[test]
fn step_with_shared_scratch_matches_step() {
    let params = test_params();
    let forces = gravity_set(&params);
    let constraints = constraint_set(&params);
    let floor = floor_of(&params);

    let mut a = classic_ring();
    let mut b = classic_ring();
    let mut scratch = Vec::new();
    for _ in 0..300 {
        let ra = step(&mut a, &params);
        let rb = euler_step_with(&mut b, &forces, &constraints, &floor, &mut scratch);
        assert_eq!(ra, rb);
    }
    assert_eq!(a, b);
}

#[test]
fn runs_are_bit_identical() {
    let params = test_params();
    let mut a = classic_ring();
    let mut b = classic_ring();

    for _ in 0..1000 {
        let ra = step(&mut a, &params);
        let rb = step(&mut b, &params);
        assert_eq!(ra, rb);
    }
    assert_eq!(a, b);
    for (pa, pb) in a.particles().iter().zip(b.particles()) {
        assert_eq!(pa.x.x.to_bits(), pb.x.x.to_bits());
        assert_eq!(pa.x.y.to_bits(), pb.x.y.to_bits());
    }
}

// ==================================================================================
// Parameters
// ==================================================================================

#[test]
fn default_parameters_are_valid() {
    assert_eq!(Parameters::default(), test_params());
    assert!(Parameters::default().validate().is_ok());
}

#[test_case(0.5 ; "positive")]
#[test_case(-1.0 ; "no loss")]
#[test_case(-1.5 ; "gains energy")]
fn bounce_factor_outside_range_is_rejected(bounce_factor: f64) {
    let params = Parameters {
        bounce_factor,
        ..test_params()
    };
    assert_eq!(params.validate(), Err(SimError::InvalidBounceFactor(bounce_factor)));
}

#[test]
fn negative_spring_settings_are_rejected() {
    let params = Parameters {
        min_distance: -1.0,
        ..test_params()
    };
    assert!(matches!(
        params.validate(),
        Err(SimError::InvalidParameter { name: "min_distance", .. })
    ));

    let params = Parameters {
        spring_constant: -0.1,
        ..test_params()
    };
    assert!(matches!(
        params.validate(),
        Err(SimError::InvalidParameter { name: "spring_constant", .. })
    ));

    let params = Parameters {
        gravity: f64::NAN,
        ..test_params()
    };
    assert_eq!(params.validate(), Err(SimError::NonFiniteValue("gravity")));
}
