// Level 4: the finale. No input; the bonus lands after a short delay while
// particle bursts repeat for as long as the level is shown.

use std::f64::consts::TAU;

use crate::rng::Rng;

pub const BONUS_POINTS: u32 = 100;
pub const COMPLETE_AFTER_MS: u32 = 2000;
pub const BURST_INTERVAL_MS: u32 = 700;
pub const PARTICLE_LIFETIME_MS: u32 = 1000;
pub const PARTICLES_PER_BURST: usize = 50;

pub static COLORS: [&str; 5] = ["#ff6b9d", "#ffd166", "#7bc6ff", "#b388ff", "#ff9cd6"];

/// One spark: origin plus its travel offset over the particle lifetime.
#[derive(Clone, Copy, Debug)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub dx: f64,
    pub dy: f64,
    pub color: &'static str,
}

/// A ring of sparks around a random center in the upper 60% of the viewport.
pub fn burst(rng: &mut impl Rng, width: f64, height: f64) -> Vec<Particle> {
    let cx = rng.unit() * width;
    let cy = rng.unit() * height * 0.6;
    (0..PARTICLES_PER_BURST)
        .map(|i| {
            let angle = TAU * i as f64 / PARTICLES_PER_BURST as f64;
            let velocity = 100.0 + rng.unit() * 100.0;
            Particle {
                x: cx,
                y: cy,
                dx: angle.cos() * velocity,
                dy: angle.sin() * velocity,
                color: rng.pick(&COLORS).copied().unwrap_or(COLORS[0]),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::XorShift;

    #[test]
    fn burst_shares_one_center_within_upper_viewport() {
        let mut rng = XorShift::seeded(42);
        let ps = burst(&mut rng, 800.0, 600.0);
        assert_eq!(ps.len(), PARTICLES_PER_BURST);
        let (x, y) = (ps[0].x, ps[0].y);
        assert!((0.0..800.0).contains(&x));
        assert!((0.0..360.0).contains(&y));
        for p in &ps {
            assert_eq!((p.x, p.y), (x, y));
            let speed = (p.dx * p.dx + p.dy * p.dy).sqrt();
            assert!((100.0 - 1e-9..200.0).contains(&speed));
            assert!(COLORS.contains(&p.color));
        }
    }
}
