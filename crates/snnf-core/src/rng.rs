// Process-wide random generator
//
// Tensor::random() draws from a thread-local StdRng. It starts seeded from
// OS entropy, so two runs differ by default. Call `manual_seed(s)` to make
// every subsequent draw on this thread reproducible, or pass your own
// generator to `Tensor::random_with` / `Tensor::init_with`.

use std::cell::RefCell;

use rand::rngs::StdRng;
use rand::SeedableRng;

thread_local! {
    static GLOBAL_RNG: RefCell<StdRng> = RefCell::new(StdRng::from_entropy());
}

/// Reseed this thread's generator.
pub fn manual_seed(seed: u64) {
    GLOBAL_RNG.with(|rng| *rng.borrow_mut() = StdRng::seed_from_u64(seed));
}

/// Reseed this thread's generator from OS entropy.
pub fn reseed_from_entropy() {
    GLOBAL_RNG.with(|rng| *rng.borrow_mut() = StdRng::from_entropy());
}

/// Run `f` with exclusive access to this thread's generator.
pub fn with_rng<R>(f: impl FnOnce(&mut StdRng) -> R) -> R {
    GLOBAL_RNG.with(|rng| f(&mut rng.borrow_mut()))
}
