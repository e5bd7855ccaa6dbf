//! Property-based tests for the fly camera.

use bevy::prelude::*;
use proptest::prelude::*;

use crate::camera::{FlyCamera, PITCH_LIMIT};

fn any_delta() -> impl Strategy<Value = f32> {
    prop_oneof![
        -5000.0f32..5000.0,
        Just(f32::MAX),
        Just(f32::MIN),
        Just(f32::INFINITY),
        Just(f32::NEG_INFINITY),
        Just(f32::NAN),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Pitch stays within the limit for arbitrary pointer deltas.
    #[test]
    fn prop_pitch_always_clamped(
        deltas in prop::collection::vec((any_delta(), any_delta()), 1..50),
    ) {
        let mut camera = FlyCamera::default();
        for (dx, dy) in deltas {
            camera.process_look(dx, dy);
            prop_assert!(camera.pitch() >= -PITCH_LIMIT && camera.pitch() <= PITCH_LIMIT);
            prop_assert!(camera.front().is_finite());
        }
    }

    /// The basis stays orthonormal after any look sequence.
    #[test]
    fn prop_basis_orthonormal(
        deltas in prop::collection::vec((-2000.0f32..2000.0, -2000.0f32..2000.0), 1..50),
    ) {
        let mut camera = FlyCamera::default();
        for (dx, dy) in deltas {
            camera.process_look(dx, dy);
        }
        prop_assert!((camera.front().length() - 1.0).abs() < 1e-4);
        prop_assert!((camera.right().length() - 1.0).abs() < 1e-4);
        prop_assert!(camera.front().dot(camera.right()).abs() < 1e-4);
        prop_assert!(camera.front().dot(camera.up()).abs() < 1e-4);
    }

    /// Following converges on the offset position for a fixed target.
    #[test]
    fn prop_follow_converges(
        x in -500.0f32..500.0,
        z in -500.0f32..500.0,
        dt in 0.005f32..0.1,
    ) {
        let target = Vec3::new(x, 0.0, z);
        let mut camera = FlyCamera::default();
        for _ in 0..2000 {
            camera.follow(target, dt);
        }
        let desired = crate::camera::follow_position(target);
        prop_assert!(camera.position.distance(desired) < 1e-2);
    }
}
