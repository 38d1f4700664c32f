use crate::config::Viewport;
use crate::random::RandomSource;

/// Background star. Purely decorative, never collides.
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub speed: f32,
}

impl Star {
    pub fn new(x: f32, y: f32, size: f32, speed: f32) -> Self {
        Self { x, y, size, speed }
    }

    /// Star anywhere in the viewport with size and speed in `[1, 3)`.
    pub fn random<R: RandomSource + ?Sized>(viewport: Viewport, rng: &mut R) -> Self {
        let x = rng.offset_from(0.0, viewport.width);
        let y = rng.offset_from(0.0, viewport.height);
        let size = rng.offset_from(1.0, 2.0);
        let speed = rng.offset_from(1.0, 2.0);
        Self::new(x, y, size, speed)
    }

    /// Drifts left and wraps to the right edge at a fresh height.
    pub fn update<R: RandomSource + ?Sized>(&mut self, viewport: Viewport, rng: &mut R) {
        self.x -= self.speed;
        if self.x < 0.0 {
            self.x = viewport.width;
            self.y = rng.offset_from(0.0, viewport.height);
        }
    }
}

/// A full field of `count` random stars.
pub fn create_star_field<R: RandomSource + ?Sized>(
    count: usize,
    viewport: Viewport,
    rng: &mut R,
) -> Vec<Star> {
    (0..count).map(|_| Star::random(viewport, rng)).collect()
}
