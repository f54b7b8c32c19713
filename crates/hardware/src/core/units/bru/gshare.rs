//! GShare Branch Predictor.
//!
//! GShare correlates global branch history with the branch address using an
//! XOR hash, so the same branch seen under different recent histories trains
//! different counters.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `predict()`: O(1)
//!   - `update()`: O(1)
//! - **Space Complexity:** O(2^N) where N is the history length (12 bits = 4096 counters)
//! - **Best Case:** Branches whose outcome depends on recent global history
//! - **Worst Case:** Uncorrelated branches, or aliasing in a short history

use super::BranchPredictor;
use super::counter::SatCounter;

/// GShare Predictor structure.
#[derive(Clone, Debug)]
pub struct GSharePredictor {
    /// Global History Register storing recent resolved outcomes.
    ghr: u64,
    /// Mask selecting the low `history_bits` bits.
    history_mask: u64,
    /// Pattern History Table, one 2-bit counter per history pattern.
    ///
    /// Dense and pre-filled with weakly taken, which is what an entry that
    /// was never trained must read as.
    pht: Vec<SatCounter>,
}

impl GSharePredictor {
    /// Creates a predictor with a `history_bits`-wide GHR and `2^history_bits` counters.
    pub fn new(history_bits: usize) -> Self {
        let size = 1usize << history_bits;
        Self {
            ghr: 0,
            history_mask: (size as u64) - 1,
            pht: vec![SatCounter::default(); size],
        }
    }

    /// Calculates the index into the Pattern History Table.
    ///
    /// `(pc & mask) ^ ghr`; the GHR is already confined to the mask.
    #[inline]
    pub fn index(&self, pc: u64) -> usize {
        ((pc & self.history_mask) ^ self.ghr) as usize
    }

    /// Current Global History Register value.
    pub fn ghr(&self) -> u64 {
        self.ghr
    }

    /// Mask applied to addresses and history.
    pub fn history_mask(&self) -> u64 {
        self.history_mask
    }

    /// Counter at a PHT index.
    pub fn counter(&self, index: usize) -> SatCounter {
        self.pht[index]
    }

    /// All PHT counters, for inspection.
    pub fn table(&self) -> &[SatCounter] {
        &self.pht
    }
}

impl BranchPredictor for GSharePredictor {
    /// Returns true if the counter at the hashed index is 2 or 3.
    fn predict_branch(&self, pc: u64) -> bool {
        self.pht[self.index(pc)].predicts_taken()
    }

    /// Trains the indexed counter, then shifts the outcome into the GHR.
    ///
    /// The index must be computed before the GHR shift so that it matches
    /// the entry used by the preceding prediction.
    fn update_branch(&mut self, pc: u64, taken: bool) {
        let idx = self.index(pc);
        self.pht[idx].train(taken);
        self.ghr = ((self.ghr << 1) | u64::from(taken)) & self.history_mask;
    }
}
