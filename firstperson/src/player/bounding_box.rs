use crate::math_prelude::*;

/// Axis aligned bounding box.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    min: Vec3,
    max: Vec3,
}

impl Aabb {
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Vec3>,
    {
        let mut points = points.into_iter();
        let first = points.next()?;
        Some(points.fold(Self::new(first, first), |bb, p| Self {
            min: bb.min.min(p),
            max: bb.max.max(p),
        }))
    }

    pub fn min(&self) -> Vec3 {
        self.min
    }
    pub fn max(&self) -> Vec3 {
        self.max
    }
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Vertical offset that rests the box on a floor at height `ground_y`.
    pub fn ground_offset(&self, ground_y: f32) -> Vec3 {
        Vec3::new(0.0, ground_y - self.min.y, 0.0)
    }

    pub fn snapped_to_ground(&self, ground_y: f32) -> Self {
        self.translated(self.ground_offset(ground_y))
    }

    /// Offset that centers the box over `anchor` on the x/z plane with its
    /// bottom at `anchor.y`.
    pub fn placement_offset(&self, anchor: Vec3) -> Vec3 {
        let center = self.center();
        Vec3::new(anchor.x - center.x, 0.0, anchor.z - center.z) + self.ground_offset(anchor.y)
    }

    /// Corner `i` takes max.x when bit 0 is set, max.y for bit 1, max.z for bit 2.
    pub fn corners(&self) -> [Vec3; 8] {
        let mut corners = [Vec3::ZERO; 8];
        for (i, corner) in corners.iter_mut().enumerate() {
            *corner = Vec3::new(
                if i & 1 == 0 { self.min.x } else { self.max.x },
                if i & 2 == 0 { self.min.y } else { self.max.y },
                if i & 4 == 0 { self.min.z } else { self.max.z },
            );
        }
        corners
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_points_spans_all_points() {
        let bb = Aabb::from_points(vec![
            Vec3::new(1.0, -2.0, 0.5),
            Vec3::new(-1.0, 3.0, 0.0),
            Vec3::new(0.0, 0.0, 4.0),
        ])
        .unwrap();
        assert_eq!(bb.min(), Vec3::new(-1.0, -2.0, 0.0));
        assert_eq!(bb.max(), Vec3::new(1.0, 3.0, 4.0));
        assert_eq!(bb.center(), Vec3::new(0.0, 0.5, 2.0));
    }

    #[test]
    fn from_no_points() {
        assert_eq!(Aabb::from_points(Vec::new()), None);
    }

    #[test]
    fn snap_rests_on_ground() {
        let bb = Aabb::new(Vec3::new(-1.0, -0.7, -1.0), Vec3::new(1.0, 1.3, 1.0));
        let snapped = bb.snapped_to_ground(0.0);
        assert_eq!(snapped.min().y, 0.0);
        assert!((snapped.max().y - 2.0).abs() < 1e-6);
        assert_eq!(snapped.size(), bb.size());

        let floating = Aabb::new(Vec3::new(0.0, 4.0, 0.0), Vec3::ONE * 5.0);
        assert_eq!(floating.ground_offset(1.0), Vec3::new(0.0, -3.0, 0.0));
    }

    #[test]
    fn placement_centers_over_anchor() {
        let bb = Aabb::new(Vec3::new(2.0, -1.0, 2.0), Vec3::new(4.0, 1.0, 6.0));
        let placed = bb.translated(bb.placement_offset(Vec3::new(0.0, 0.5, -3.0)));
        assert!(placed.center().x.abs() < 1e-6);
        assert!((placed.center().z + 3.0).abs() < 1e-6);
        assert!((placed.min().y - 0.5).abs() < 1e-6);
    }

    #[test]
    fn corners_are_distinct() {
        let bb = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let corners = bb.corners();
        assert_eq!(corners[0], Vec3::ZERO);
        assert_eq!(corners[7], Vec3::ONE);
        assert_eq!(corners[5], Vec3::new(1.0, 0.0, 1.0));
    }
}
