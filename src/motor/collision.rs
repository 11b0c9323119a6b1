//! Discrete overlap resolution: every penetrating body contributes one
//! minimum-translation vector, and their sum pushes the candidate position
//! out of solid geometry.

use avian3d::collision::collider::contact_query::contact_manifolds;
use avian3d::prelude::*;
use bevy::prelude::*;

use super::components::PlayerMotor;

/// Colliders the motor can be pushed out of. Motor bodies are excluded, which
/// also keeps the body from resolving against itself.
pub type StaticGeometry<'w, 's> = Query<
    'w,
    's,
    (&'static Collider, &'static Position, &'static Rotation),
    Without<PlayerMotor>,
>;

/// Pushes `candidate` out of penetrating geometry. Broad phase by AABB, then
/// a penetration test per candidate body; the deepest contact of each pair
/// yields one minimum-translation vector and the sum of all of them is
/// applied at once.
///
/// Single pass and unordered: deeply overlapping multi-body stacks can stay
/// slightly penetrating after one step and finish resolving on later steps.
pub fn resolve(
    query_pipeline: &SpatialQueryPipeline,
    geometry: &StaticGeometry,
    collider: &Collider,
    candidate: Vec3,
    rotation: Quat,
) -> Vec3 {
    let aabb = collider.aabb(candidate, rotation);

    let mut corrections = Vec::new();
    for other in query_pipeline.aabb_intersections_with_aabb(aabb) {
        let Ok((other_collider, other_position, other_rotation)) = geometry.get(other) else {
            continue;
        };

        let mut manifolds = Vec::new();
        contact_manifolds(
            collider,
            candidate,
            rotation,
            other_collider,
            other_position.0,
            other_rotation.0,
            0.0,
            &mut manifolds,
        );

        // One minimum-translation vector per overlapping body.
        let deepest = manifolds
            .iter()
            .filter_map(|manifold| {
                manifold
                    .find_deepest_contact()
                    .map(|contact| (manifold.normal, contact.penetration))
            })
            .max_by(|a, b| a.1.total_cmp(&b.1));

        if let Some((normal, depth)) = deepest {
            if depth > 0.0 {
                // The manifold normal points from this body into the other.
                corrections.push((-normal, depth));
            }
        }
    }

    candidate + accumulate(&corrections)
}

/// Sum of minimum-translation vectors, direction times depth.
pub fn accumulate(corrections: &[(Vec3, f32)]) -> Vec3 {
    corrections
        .iter()
        .fold(Vec3::ZERO, |sum, (direction, depth)| {
            sum + *direction * *depth
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_penetrations_produce_no_correction() {
        assert_eq!(accumulate(&[]), Vec3::ZERO);
    }

    #[test]
    fn orthogonal_penetrations_sum_as_vectors() {
        let corrections = [(Vec3::X, 0.3), (Vec3::Z, 0.1)];
        let total = accumulate(&corrections);
        // the vector sum, not the max of the two
        assert_eq!(total, Vec3::new(0.3, 0.0, 0.1));
    }

    #[test]
    fn opposing_penetrations_cancel() {
        let corrections = [(Vec3::X, 0.2), (Vec3::NEG_X, 0.2)];
        assert_eq!(accumulate(&corrections), Vec3::ZERO);
    }
}
