//! Reseeding random stream handed to geometry providers.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Borrowed random generator that restarts from a fixed seed on every [`get`](Self::get).
///
/// Providers that pick face variants call `get` once per query and draw the
/// same sequence each time, without allocating a new generator.
pub struct RandomSupplier<'a> {
    rng: &'a mut StdRng,
    seed: u64,
}

impl<'a> RandomSupplier<'a> {
    pub fn new(rng: &'a mut StdRng, seed: u64) -> Self {
        Self { rng, seed }
    }

    /// Reseed the shared generator and return it.
    pub fn get(&mut self) -> &mut StdRng {
        *self.rng = StdRng::seed_from_u64(self.seed);
        &mut *self.rng
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}
