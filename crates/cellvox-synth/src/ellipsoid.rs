//! Deformed-sphere membership test.

use nalgebra::{Point3, Vector3};

/// An axis-aligned deformed sphere in voxel coordinates.
///
/// Membership uses the weighted-distance inequality
/// `Σ (wᵢ·(pᵢ − cᵢ))² ≤ r²` where `wᵢ` is the per-axis deformation factor:
/// a factor above 1 compresses the object along that axis, a factor below 1
/// stretches it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    /// Center in voxel coordinates.
    pub center: Point3<f64>,
    /// Undeformed radius in voxels.
    pub radius: f64,
    /// Per-axis deformation factors, all positive.
    pub deformation: Vector3<f64>,
}

impl Ellipsoid {
    /// Creates an ellipsoid.
    #[must_use]
    pub const fn new(center: Point3<f64>, radius: f64, deformation: Vector3<f64>) -> Self {
        Self {
            center,
            radius,
            deformation,
        }
    }

    /// Creates an undeformed sphere.
    #[must_use]
    pub fn sphere(center: Point3<f64>, radius: f64) -> Self {
        Self::new(center, radius, Vector3::new(1.0, 1.0, 1.0))
    }

    /// Whether the point satisfies the weighted-distance inequality.
    ///
    /// A non-positive radius contains nothing: a degenerate sample
    /// contributes no voxels.
    #[must_use]
    pub fn contains(&self, point: Point3<f64>) -> bool {
        if self.radius <= 0.0 {
            return false;
        }
        let d = point - self.center;
        let w = self.deformation.component_mul(&d);
        w.norm_squared() <= self.radius * self.radius
    }

    /// Half extent along one axis: the weighted ball reaches `r / wᵢ`.
    #[must_use]
    pub fn half_extent(&self, axis: usize) -> f64 {
        if self.radius <= 0.0 || self.deformation[axis] <= 0.0 {
            return 0.0;
        }
        self.radius / self.deformation[axis]
    }
}
