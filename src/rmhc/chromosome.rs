//! Fixed-length move-plan chromosomes.

use serde::{Deserialize, Serialize};

use crate::core::GameRng;

/// A plan of future moves encoded as raw genes.
///
/// Each gene picks one of the deciding player's moves during a replay by
/// reduction modulo the number of legal moves at that turn, so any byte
/// decodes to a legal move no matter how the position unfolds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chromosome {
    /// Raw genes, one per future turn of the deciding player.
    pub genes: Vec<u8>,
}

impl Chromosome {
    /// Create a uniform-random chromosome of the given length.
    pub fn random(length: usize, rng: &mut GameRng) -> Self {
        let genes = (0..length)
            .map(|_| rng.gen_range_usize(0..256) as u8)
            .collect();
        Self { genes }
    }

    /// Number of genes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Check if the chromosome has no genes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Get a gene by position.
    #[must_use]
    pub fn gene(&self, idx: usize) -> u8 {
        self.genes[idx]
    }

    /// Produce a neighbour by re-randomizing each gene with probability
    /// `rate`. A re-randomized gene may draw its old value again.
    pub fn mutate(&self, rate: f64, rng: &mut GameRng) -> Self {
        let genes = self
            .genes
            .iter()
            .map(|&gene| {
                if rng.gen_bool(rate) {
                    rng.gen_range_usize(0..256) as u8
                } else {
                    gene
                }
            })
            .collect();
        Self { genes }
    }
}
