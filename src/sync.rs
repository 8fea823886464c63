//! Start delays that make a batch of steaks finish together.

use crate::cooking::CookingStep;

pub fn total_duration(steps: &[CookingStep]) -> u32 {
    steps.iter().map(|s| s.duration).sum()
}

/// Pre-start delay per steak: the longest cook starts immediately and every
/// other steak waits out the difference. Without synchronization nobody waits.
pub fn sync_delays(totals: &[u32], synchronize: bool) -> Vec<u32> {
    if !synchronize {
        return vec![0; totals.len()];
    }

    let longest = totals.iter().copied().max().unwrap_or(0);
    totals.iter().map(|total| longest - total).collect()
}

/// Seconds after a common start at which the last steak is ready
pub fn finish_time(totals: &[u32], synchronize: bool) -> u32 {
    sync_delays(totals, synchronize)
        .iter()
        .zip(totals)
        .map(|(delay, total)| delay + total)
        .max()
        .unwrap_or(0)
}
