//! Ground classification: an overlap test first, then a downward sweep.

use avian3d::prelude::*;
use bevy::prelude::*;

/// Outcome of one ground check, consumed within the step that produced it.
pub enum GroundCheck {
    /// The collider already interpenetrates something. A sweep started from
    /// inside a shape reports garbage, so this is detected up front; there is
    /// no contact normal in this branch.
    Overlapping,
    /// The downward sweep hit a surface within range.
    Swept { normal: Vec3, point: Vec3 },
    /// Nothing within ground-check range.
    Airborne,
}

/// Distance the body would fall in one step under gravity. Long enough to
/// detect grounding before the next step lands it.
pub fn check_length(gravity_magnitude: f32, fixed_dt: f32) -> f32 {
    gravity_magnitude * fixed_dt
}

/// A surface counts as ground when its normal tilts away from +Y by less
/// than the configured max slope angle.
pub fn is_walkable(normal: Vec3, max_slope_angle: f32) -> bool {
    normal.angle_between(Vec3::Y).abs() < max_slope_angle
}

/// Classifies the ground under a body: overlap test first (a sweep from an
/// interpenetrating start is undefined), then a sweep straight down by twice
/// the check length. The nearest non-self hit supplies the contact.
pub fn classify(
    query_pipeline: &SpatialQueryPipeline,
    entity: Entity,
    collider: &Collider,
    position: Vec3,
    rotation: Quat,
    check_length: f32,
) -> GroundCheck {
    let filter = SpatialQueryFilter::default().with_excluded_entities([entity]);

    let overlapping = query_pipeline.shape_intersections(collider, position, rotation, &filter);
    if !overlapping.is_empty() {
        return GroundCheck::Overlapping;
    }

    let config = ShapeCastConfig::from_max_distance(check_length * 2.0);
    match query_pipeline.cast_shape(collider, position, rotation, Dir3::NEG_Y, &config, &filter) {
        Some(hit) => GroundCheck::Swept {
            normal: hit.normal1,
            point: hit.point1,
        },
        None => GroundCheck::Airborne,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_ground_is_walkable() {
        assert!(is_walkable(Vec3::Y, 45_f32.to_radians()));
    }

    #[test]
    fn gentle_slope_is_walkable() {
        let normal = Quat::from_rotation_z(20_f32.to_radians()) * Vec3::Y;
        assert!(is_walkable(normal, 45_f32.to_radians()));
    }

    #[test]
    fn steep_slope_is_not_walkable() {
        let normal = Quat::from_rotation_z(60_f32.to_radians()) * Vec3::Y;
        assert!(!is_walkable(normal, 45_f32.to_radians()));
    }

    #[test]
    fn wall_is_not_walkable() {
        assert!(!is_walkable(Vec3::X, 45_f32.to_radians()));
    }

    #[test]
    fn check_length_covers_one_step_of_gravity() {
        let len = check_length(9.81, 0.02);
        assert!((len - 0.1962).abs() < 1e-4);
    }
}
