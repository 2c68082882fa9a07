//! Initial world population.
//!
//! Random seeding draws one decimal digit per cell. A cell starts out firing when its digit is
//! *strictly greater* than the density weight, so a larger weight gives fewer firing cells. The
//! effective probability is [`firing_probability`].

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::cell::Cell;
use crate::world::World;

/// Density weight used when none is given
pub const DEFAULT_DENSITY_WEIGHT: i32 = 7;

/// A source of uniformly distributed digits in `[0, 10)`
pub trait DigitSource {
    fn next_digit(&mut self) -> u8;
}

/// Reproducible digit source backed by ChaCha8
#[derive(Clone, Debug)]
pub struct SeedRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl SeedRng {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed from the operating system. The chosen seed is kept so the run can be reproduced.
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl DigitSource for SeedRng {
    fn next_digit(&mut self) -> u8 {
        self.inner.gen_range(0..10)
    }
}

/// Populate `world`.
///
/// Without `randomize` every cell becomes `Ready`. Otherwise cells are visited row by row, and
/// each one draws a digit from `digits`: it fires if the digit exceeds `density_weight`, and is
/// `Ready` otherwise.
pub fn seed<D>(world: &mut World, randomize: bool, density_weight: i32, digits: &mut D)
where
    D: DigitSource + ?Sized,
{
    if !randomize {
        world.fill(Cell::Ready);
        return;
    }

    for cell in world.cells_mut() {
        *cell = if i32::from(digits.next_digit()) > density_weight {
            Cell::Firing
        } else {
            Cell::Ready
        };
    }
}

/// Probability that a single cell starts out firing for the given weight
pub fn firing_probability(density_weight: i32) -> f64 {
    (9 - i64::from(density_weight)).clamp(0, 10) as f64 / 10f64
}

#[cfg(test)]
mod test {
    use super::DigitSource;
    use super::SeedRng;
    use super::firing_probability;
    use super::seed;
    use crate::world::World;

    /// Hands out a fixed sequence of digits, over and over
    struct Digits(Vec<u8>, usize);

    impl DigitSource for Digits {
        fn next_digit(&mut self) -> u8 {
            let d = self.0[self.1 % self.0.len()];
            self.1 += 1;
            d
        }
    }

    #[test]
    fn blank_seed_is_all_ready() {
        let mut world: World = "@ *\n* @".parse().unwrap();
        seed(&mut world, false, 7, &mut Digits(vec![9], 0));

        let census = world.census();
        assert_eq!(census.ready, 4);
        assert_eq!(census.firing + census.refractory, 0);
    }

    #[test]
    fn threshold_is_strict() {
        let mut world = World::new(5, 2).unwrap();
        let mut digits = Digits((0..10).collect(), 0);

        seed(&mut world, true, 7, &mut digits);

        insta::assert_snapshot!(world.to_string(), @r"
        ` ` ` ` `
        ` ` ` @ @
        ");
    }

    #[test]
    fn random_seed_overwrites_everything() {
        let mut world: World = "* * *".parse().unwrap();
        seed(&mut world, true, 7, &mut Digits(vec![0], 0));

        assert_eq!(world, "` ` `".parse::<World>().unwrap());
    }

    #[test]
    fn weight_bounds() {
        let mut world = World::new(10, 10).unwrap();

        seed(&mut world, true, 9, &mut SeedRng::new(1));
        assert_eq!(world.census().firing, 0);

        seed(&mut world, true, -1, &mut SeedRng::new(1));
        assert_eq!(world.census().firing, 100);
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let mut a = World::new(16, 16).unwrap();
        let mut b = World::new(16, 16).unwrap();

        seed(&mut a, true, 7, &mut SeedRng::new(42));
        seed(&mut b, true, 7, &mut SeedRng::new(42));

        assert_eq!(a, b);
        assert_eq!(SeedRng::new(42).seed(), 42);
    }

    #[test]
    fn digits_are_in_range() {
        let mut rng = SeedRng::new(7);
        let mut seen = [false; 10];

        for _ in 0..1_000 {
            let d = rng.next_digit() as usize;
            assert!(d < 10);
            seen[d] = true;
        }

        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn probability() {
        assert_eq!(firing_probability(7), 0.2);
        assert_eq!(firing_probability(0), 0.9);
        assert_eq!(firing_probability(9), 0.0);
        assert_eq!(firing_probability(-1), 1.0);
        assert_eq!(firing_probability(-20), 1.0);
        assert_eq!(firing_probability(30), 0.0);
        assert_eq!(firing_probability(i32::MIN), 1.0);
        assert_eq!(firing_probability(i32::MAX), 0.0);
    }
}
