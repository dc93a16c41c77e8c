//! Fibonacci-sphere placement of gallery items
//!
//! Golden-angle spiral from the north pole (y = 1) to the south pole
//! (y = -1). Each item faces outward: oriented toward twice its own position,
//! never toward the origin, so the picture side is visible from outside.

use nalgebra::{Isometry3, Point3, Rotation3, Translation3, UnitQuaternion, Vector3};
use std::f32::consts::PI;

/// Unit-sphere position of item `index` out of `total`
pub fn fibonacci_point(index: usize, total: usize) -> Vector3<f32> {
    let golden_angle = PI * (3.0 - 5f32.sqrt());

    // A lone item sits on the equator facing the camera
    let y = if total > 1 {
        1.0 - (index as f32 / (total - 1) as f32) * 2.0
    } else {
        0.0
    };
    let radius_at_y = (1.0 - y * y).max(0.0).sqrt();
    let theta = golden_angle * index as f32;

    Vector3::new(theta.cos() * radius_at_y, y, theta.sin() * radius_at_y)
}

/// Rotation turning an item's local +Z toward `outward`
fn face_outward(outward: &Vector3<f32>) -> UnitQuaternion<f32> {
    // Poles are parallel to +Y; fall back to +Z as the up hint there
    let up = if outward.cross(&Vector3::y()).norm() < 1e-6 {
        Vector3::z()
    } else {
        Vector3::y()
    };
    UnitQuaternion::from_rotation_matrix(&Rotation3::face_towards(outward, &up))
}

/// Pose of one item on a sphere of `radius`, in the group's local frame
pub fn item_pose(index: usize, total: usize, radius: f32) -> Isometry3<f32> {
    let unit = fibonacci_point(index, total);
    let position = Point3::from(unit * radius);
    let look_at = Point3::from(unit * radius * 2.0);
    Isometry3::from_parts(
        Translation3::from(position.coords),
        face_outward(&(look_at - position)),
    )
}

/// Poses for every item, in index order
pub fn sphere_layout(total: usize, radius: f32) -> Vec<Isometry3<f32>> {
    (0..total).map(|i| item_pose(i, total, radius)).collect()
}

/// Group rotation for the sphere's yaw (`rotation.x` drag) and pitch
/// (`rotation.y` drag), applied pitch-then-yaw as an XYZ Euler rotation
pub fn group_rotation(yaw: f32, pitch: f32) -> UnitQuaternion<f32> {
    UnitQuaternion::from_axis_angle(&Vector3::x_axis(), pitch)
        * UnitQuaternion::from_axis_angle(&Vector3::y_axis(), yaw)
}
