//! Category allocation: how many slots each category gets for a signal value.
//!
//! Two authored mixtures anchor the extremes of the signal range; the
//! allocator interpolates between them, quantizes the blend with
//! largest-remainder rounding, and rescales to the pool size with a second
//! largest-remainder pass so counts always sum exactly to the pool.
use crate::pool::{Category, Pool};

/// Mixture resolution; authored mixtures are expressed in twentieths.
const MIX_UNITS: usize = 20;

/// Mixture at signal 0, in [`Category::ALL`] order: a calm scene, mostly
/// built up with little flora or sky activity.
const MIX_CALM: [f64; 4] = [3.0, 8.0, 7.0, 2.0];

/// Mixture at signal 1: an overgrown scene, flora and sky take over while
/// housing and traffic recede.
const MIX_BUSY: [f64; 4] = [9.0, 4.0, 2.0, 5.0];

/// Target slot count per category for a pool of `n` slots at `signal`.
///
/// The result always sums to `n`. The signal is clamped into `[0, 1]`.
pub fn target_counts(n: usize, signal: f64) -> [usize; 4] {
    let u = signal.clamp(0.0, 1.0);
    let mut blend = [0.0f64; 4];
    for (i, w) in blend.iter_mut().enumerate() {
        *w = MIX_CALM[i] * (1.0 - u) + MIX_BUSY[i] * u;
    }
    let mix = largest_remainder(&blend, MIX_UNITS);
    let weights = [mix[0] as f64, mix[1] as f64, mix[2] as f64, mix[3] as f64];
    largest_remainder(&weights, n)
}

/// Largest-remainder apportionment of `total` units across four weights.
///
/// Floors the exact shares, then hands leftover units to the largest
/// fractional remainders; remainder ties go to the earlier category so the
/// result is deterministic.
fn largest_remainder(weights: &[f64; 4], total: usize) -> [usize; 4] {
    let mut out = [0usize; 4];
    let weight_sum: f64 = weights.iter().sum();
    if total == 0 || weight_sum <= 0.0 {
        return out;
    }

    let scale = total as f64 / weight_sum;
    let mut remainders = [0.0f64; 4];
    let mut assigned = 0usize;
    for i in 0..4 {
        let exact = weights[i] * scale;
        let floor = exact.floor();
        out[i] = floor as usize;
        remainders[i] = exact - floor;
        assigned += out[i];
    }

    let mut order = [0usize, 1, 2, 3];
    order.sort_by(|a, b| remainders[*b].total_cmp(&remainders[*a]).then(a.cmp(b)));
    let mut leftover = total.saturating_sub(assigned);
    let mut i = 0usize;
    while leftover > 0 {
        out[order[i % 4]] += 1;
        leftover -= 1;
        i += 1;
    }
    out
}

/// Moves slots between categories until the pool matches `targets`.
///
/// Only the minimum number of slots change category: surplus categories
/// donate their highest-id slots first, so long-lived slots keep their
/// category and the scene stays visually stable. Deficit categories are
/// filled in [`Category::ALL`] order. Returns how many slots moved.
pub fn rebalance(pool: &mut Pool, targets: [usize; 4]) -> usize {
    debug_assert_eq!(targets.iter().sum::<usize>(), pool.len());

    let counts = pool.counts();
    let mut deficits: Vec<(Category, usize)> = Category::ALL
        .iter()
        .enumerate()
        .filter_map(|(i, c)| {
            let missing = targets[i].saturating_sub(counts[i]);
            (missing > 0).then_some((*c, missing))
        })
        .collect();

    let mut moved = 0usize;
    for (i, category) in Category::ALL.into_iter().enumerate() {
        let surplus = counts[i].saturating_sub(targets[i]);
        if surplus == 0 {
            continue;
        }
        let mut donors: Vec<u32> = pool
            .slots()
            .iter()
            .filter(|s| s.category == category)
            .map(|s| s.id)
            .collect();
        donors.sort_unstable_by(|a, b| b.cmp(a));
        donors.truncate(surplus);

        for id in donors {
            let Some((receiver, missing)) = deficits.first_mut() else {
                return moved;
            };
            let receiver = *receiver;
            *missing -= 1;
            if *missing == 0 {
                deficits.remove(0);
            }
            if let Some(slot) = pool.slots_mut().iter_mut().find(|s| s.id == id) {
                slot.category = receiver;
                moved += 1;
            }
        }
    }
    moved
}
