//! random::seed_stream — reproducible sub-seed generation.
//!
//! Purpose
//! -------
//! Turn one root seed into a deterministic sequence of independent
//! sub-seeds, each used to key one random draw. A salt string separates the
//! sequences of different consumers that share a root seed.
//!
//! Key behaviors
//! -------------
//! - [`SeedStream::next_seed`] advances an owned generator; the same
//!   `(seed, salt)` pair always yields the same sequence.
//! - [`SeedStream::fork`] consumes one sub-seed from a parent stream and
//!   starts a child stream under a new salt, so a caller can thread one
//!   stream through several distributions.
//!
//! Invariants & assumptions
//! ------------------------
//! - Streams are plain values: no global or thread-local state. Sharing a
//!   stream across calls means passing `&mut SeedStream` explicitly.
//! - Sub-seeds are statistically independent for practical purposes; they
//!   are not cryptographically secure.
//!
//! Conventions
//! -----------
//! - Sub-seeds are successive outputs of a `ChaCha8Rng` seeded with the root
//!   seed. The salt selects the ChaCha stream through its FNV-1a digest.
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Stateful, deterministic generator of sub-seeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedStream {
    seed: u64,
    salt: String,
    rng: ChaCha8Rng,
    counter: u64,
}

impl SeedStream {
    /// Stream keyed by `seed` and `salt`.
    pub fn new(seed: u64, salt: &str) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        rng.set_stream(fnv1a(salt.as_bytes()));
        SeedStream { seed, salt: salt.to_string(), rng, counter: 0 }
    }

    /// Stream keyed by a root seed drawn from the thread RNG.
    pub fn from_entropy(salt: &str) -> Self {
        SeedStream::new(rand::rng().random(), salt)
    }

    /// Root seed this stream was created from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn salt(&self) -> &str {
        &self.salt
    }

    /// Number of sub-seeds drawn so far.
    pub fn draws(&self) -> u64 {
        self.counter
    }

    /// Next sub-seed; advances the stream.
    pub fn next_seed(&mut self) -> u64 {
        self.counter += 1;
        self.rng.next_u64()
    }

    /// Child stream under `salt`, keyed by this stream's next sub-seed.
    pub fn fork(&mut self, salt: &str) -> SeedStream {
        SeedStream::new(self.next_seed(), salt)
    }
}

// ---- Helper Methods ----

fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET, |hash, &b| (hash ^ u64::from(b)).wrapping_mul(FNV_PRIME))
}
