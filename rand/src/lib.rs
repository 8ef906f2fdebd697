pub trait Rand {
    /// The next uniform machine word in `[0, u64::MAX]`.
    fn next_word(&mut self) -> u64;
}

mod default_rand;
pub use default_rand::DefaultRand;

impl<T: xrand::RngCore> Rand for T {
    fn next_word(&mut self) -> u64 {
        self.next_u64()
    }
}
