/// Axis-aligned bounding box in viewport coordinates (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Aabb {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Strict overlap: boxes that only share an edge do not collide.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }
}

/// Anything that takes part in collision checks.
pub trait Bounded {
    fn bounds(&self) -> Aabb;

    fn collides_with<T: Bounded + ?Sized>(&self, other: &T) -> bool {
        self.bounds().overlaps(&other.bounds())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlapping_boxes() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::new(5.0, 5.0, 10.0, 10.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let right = Aabb::new(10.0, 0.0, 5.0, 5.0);
        let below = Aabb::new(0.0, 10.0, 5.0, 5.0);
        assert!(!a.overlaps(&right));
        assert!(!a.overlaps(&below));
    }

    #[test]
    fn test_contained_box_overlaps() {
        let outer = Aabb::new(0.0, 0.0, 36.0, 20.0);
        let inner = Aabb::new(10.0, 9.0, 10.0, 2.0);
        assert!(outer.overlaps(&inner));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_overlap_is_symmetric(
                ax in -50.0f32..350.0, ay in -50.0f32..290.0,
                aw in 1.0f32..40.0, ah in 1.0f32..40.0,
                bx in -50.0f32..350.0, by in -50.0f32..290.0,
                bw in 1.0f32..40.0, bh in 1.0f32..40.0,
            ) {
                let a = Aabb::new(ax, ay, aw, ah);
                let b = Aabb::new(bx, by, bw, bh);
                prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
            }
        }
    }
}
