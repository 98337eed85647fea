//! Randomized question order.
//!
//! The shuffler permutes whole [`QuestionRecord`]s, so a question can never
//! be separated from its answer key. The source of randomness is a
//! pluggable capability: production code uses [`RandomShuffler`], tests can
//! wrap any closure over `&mut [QuestionRecord]` in a [`FnShuffler`].

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::SessionError;
use crate::models::QuestionRecord;

/// Produces a permutation of question records in place.
pub trait Shuffler {
    fn permute(&mut self, records: &mut [QuestionRecord]);
}

/// Adapts a closure into a [`Shuffler`].
pub struct FnShuffler<F>(pub F);

impl<F> Shuffler for FnShuffler<F>
where
    F: FnMut(&mut [QuestionRecord]),
{
    fn permute(&mut self, records: &mut [QuestionRecord]) {
        (self.0)(records)
    }
}

impl<S: Shuffler + ?Sized> Shuffler for Box<S> {
    fn permute(&mut self, records: &mut [QuestionRecord]) {
        (**self).permute(records)
    }
}

/// Uniform random permutation backed by a [`StdRng`].
#[derive(Debug, Clone)]
pub struct RandomShuffler {
    rng: StdRng,
}

impl RandomShuffler {
    /// Seeded from the thread-local generator; every run differs.
    pub fn new() -> Self {
        Self::seeded(rand::random())
    }

    /// Reproducible order for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomShuffler {
    fn default() -> Self {
        Self::new()
    }
}

impl Shuffler for RandomShuffler {
    fn permute(&mut self, records: &mut [QuestionRecord]) {
        records.shuffle(&mut self.rng);
    }
}

/// Shuffle a non-empty bank.
pub fn shuffle<S: Shuffler + ?Sized>(
    mut records: Vec<QuestionRecord>,
    shuffler: &mut S,
) -> Result<Vec<QuestionRecord>, SessionError> {
    if records.is_empty() {
        return Err(SessionError::EmptyInput);
    }
    shuffler.permute(&mut records);
    Ok(records)
}
