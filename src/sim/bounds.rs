//! Playfield bounds
//!
//! Every stored piece position goes through `clamp_position`, so the
//! invariant `0 <= pos <= viewport - size` holds by construction.

use glam::Vec2;
use rand::Rng;

/// Largest legal origin on each axis for a piece of `size`
#[inline]
pub fn max_origin(size: Vec2, viewport: Vec2) -> Vec2 {
    (viewport - size).max(Vec2::ZERO)
}

/// Restrict `position` to `[0, viewport - size]` on each axis.
///
/// NaN collapses to 0 so a bad pointer sample can never escape the field.
pub fn clamp_position(position: Vec2, size: Vec2, viewport: Vec2) -> Vec2 {
    let hi = max_origin(size, viewport);
    let axis = |v: f32, hi: f32| if v.is_nan() { 0.0 } else { v.clamp(0.0, hi) };
    Vec2::new(axis(position.x, hi.x), axis(position.y, hi.y))
}

/// Uniform origin in `[0, viewport - size)` on each axis
pub fn random_position<R: Rng + ?Sized>(rng: &mut R, size: Vec2, viewport: Vec2) -> Vec2 {
    let hi = max_origin(size, viewport);
    let x = if hi.x > 0.0 { rng.random_range(0.0..hi.x) } else { 0.0 };
    let y = if hi.y > 0.0 { rng.random_range(0.0..hi.y) } else { 0.0 };
    Vec2::new(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const VIEWPORT: Vec2 = Vec2::new(800.0, 600.0);
    const SIZE: Vec2 = Vec2::new(80.0, 80.0);

    #[test]
    fn test_clamp_in_bounds_unchanged() {
        let p = Vec2::new(295.0, 295.0);
        assert_eq!(clamp_position(p, SIZE, VIEWPORT), p);
    }

    #[test]
    fn test_clamp_far_out_of_range() {
        let p = clamp_position(Vec2::new(-1.0e9, 1.0e9), SIZE, VIEWPORT);
        assert_eq!(p, Vec2::new(0.0, 520.0));
        assert_eq!(clamp_position(p, SIZE, VIEWPORT), p);
    }

    #[test]
    fn test_clamp_nan_and_infinity() {
        let p = clamp_position(Vec2::new(f32::NAN, f32::INFINITY), SIZE, VIEWPORT);
        assert_eq!(p, Vec2::new(0.0, 520.0));
    }

    #[test]
    fn test_oversized_piece_pins_to_origin() {
        let size = Vec2::new(900.0, 80.0);
        assert_eq!(clamp_position(Vec2::new(50.0, 50.0), size, VIEWPORT), Vec2::new(0.0, 50.0));

        let mut rng = Pcg32::seed_from_u64(3);
        assert_eq!(random_position(&mut rng, size, VIEWPORT).x, 0.0);
    }

    #[test]
    fn test_random_position_within_field() {
        let mut rng = Pcg32::seed_from_u64(12345);
        for _ in 0..1000 {
            let p = random_position(&mut rng, SIZE, VIEWPORT);
            assert!(p.x >= 0.0 && p.x <= 720.0);
            assert!(p.y >= 0.0 && p.y <= 520.0);
        }
    }

    #[test]
    fn test_random_position_deterministic_per_seed() {
        let mut a = Pcg32::seed_from_u64(7);
        let mut b = Pcg32::seed_from_u64(7);
        assert_eq!(
            random_position(&mut a, SIZE, VIEWPORT),
            random_position(&mut b, SIZE, VIEWPORT)
        );
    }
}
