//! Utility modules for the simulator.
//!
//! Currently the seedable random number generator behind reproducible
//! artifact noise.

mod random;

pub use random::Random;
