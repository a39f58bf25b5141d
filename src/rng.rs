//! Small seedable random source.
//!
//! Gameplay only needs uniform index draws and shuffles, so a xorshift64*
//! generator seeded from `getrandom` is enough. Tests seed it explicitly.

pub trait Rng {
    fn next_u64(&mut self) -> u64;

    /// Uniform draw from `0..len`. Returns 0 for an empty range.
    fn below(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        let len = len as u64;
        // Reject the tail that would bias the modulo.
        let zone = u64::MAX - (u64::MAX % len);
        loop {
            let v = self.next_u64();
            if v < zone {
                return (v % len) as usize;
            }
        }
    }

    /// Uniform float in `[0, 1)`.
    fn unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Fisher–Yates, in place.
    fn shuffle<T>(&mut self, items: &mut [T])
    where
        Self: Sized,
    {
        for i in (1..items.len()).rev() {
            let j = self.below(i + 1);
            items.swap(i, j);
        }
    }

    fn pick<'a, T>(&mut self, pool: &'a [T]) -> Option<&'a T>
    where
        Self: Sized,
    {
        if pool.is_empty() {
            None
        } else {
            pool.get(self.below(pool.len()))
        }
    }
}

#[derive(Clone, Debug)]
pub struct XorShift {
    state: u64,
}

impl XorShift {
    pub fn seeded(seed: u64) -> Self {
        // Zero is a fixed point of xorshift.
        let state = if seed == 0 { 0x9E37_79B9_7F4A_7C15 } else { seed };
        Self { state }
    }

    pub fn from_entropy() -> Self {
        let mut buf = [0u8; 8];
        let seed = match getrandom::getrandom(&mut buf) {
            Ok(()) => u64::from_le_bytes(buf),
            Err(e) => {
                log::warn!("getrandom failed ({e}), seeding from clock");
                web_sys::window()
                    .and_then(|w| w.performance())
                    .map(|p| p.now().to_bits())
                    .unwrap_or(0)
            }
        };
        Self::seeded(seed)
    }
}

impl Rng for XorShift {
    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }
}
