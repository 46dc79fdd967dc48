//! Axis-agnostic space distribution.
//!
//! Shares an integer amount of pixels among a set of entries by weight,
//! where every entry can absorb at most `room` pixels. Entries that hit
//! their room drop out and the rest is redistributed among the others.
//! Used both to hand out surplus (room = max - current) and to take away
//! a deficit (weight = room = shrink budget).

/// One participant of a distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Share {
    /// Relative weight. Non-positive weights only count when no entry has a
    /// positive one, in which case the amount is split evenly.
    pub weight: f64,
    /// Most this entry can take.
    pub room: i32,
}

impl Share {
    pub fn new(weight: f64, room: i32) -> Self {
        Self { weight, room }
    }
}

/// Distribute `amount` among `shares`. Returns the amount given to each
/// entry, in input order. The result sums to `amount` unless every entry
/// ran out of room first.
pub(crate) fn distribute(amount: i32, shares: &[Share]) -> Vec<i32> {
    let mut given = vec![0i32; shares.len()];
    let mut left = amount.max(0);
    let mut active: Vec<usize> = (0..shares.len()).filter(|&i| shares[i].room > 0).collect();

    while left > 0 && !active.is_empty() {
        let weighted: Vec<usize> = active
            .iter()
            .copied()
            .filter(|&i| shares[i].weight > 0.0)
            .collect();
        let (round_set, tentative) = if weighted.is_empty() {
            let t = split_even(left, active.len());
            (active.clone(), t)
        } else {
            let weights: Vec<f64> = weighted.iter().map(|&i| shares[i].weight).collect();
            let t = split_weighted(left, &weights);
            (weighted, t)
        };

        // Entries that would overflow get exactly their room and drop out;
        // the rest is computed again for the survivors.
        let mut capped = false;
        for (k, &i) in round_set.iter().enumerate() {
            let room = shares[i].room - given[i];
            if tentative[k] >= room {
                given[i] += room;
                left -= room;
                capped = true;
            }
        }

        if capped {
            active.retain(|&i| given[i] < shares[i].room);
            continue;
        }

        for (k, &i) in round_set.iter().enumerate() {
            given[i] += tentative[k];
            left -= tentative[k];
        }
        break;
    }

    given
}

/// Split `amount` into `count` equal parts, the remainder going to the last
/// parts one pixel each.
pub(crate) fn split_even(amount: i32, count: usize) -> Vec<i32> {
    if count == 0 {
        return Vec::new();
    }
    let n = count as i32;
    let base = amount / n;
    let remainder = (amount % n) as usize;
    (0..count)
        .map(|i| if i >= count - remainder { base + 1 } else { base })
        .collect()
}

/// Split `amount` proportionally to `weights`.
///
/// Shares are computed from the back with a running weight sum; the entry
/// computed last (the first one) receives whatever rounding left over, so
/// the parts always sum to `amount`.
pub(crate) fn split_weighted(amount: i32, weights: &[f64]) -> Vec<i32> {
    let mut out = vec![0i32; weights.len()];
    let mut remaining_weight: f64 = weights.iter().sum();
    let mut remaining = amount;

    for i in (0..weights.len()).rev() {
        let part = if i == 0 || remaining_weight <= 0.0 {
            remaining
        } else {
            ((remaining as f64) * weights[i] / remaining_weight).round() as i32
        };
        let part = part.clamp(0, remaining);
        out[i] = part;
        remaining -= part;
        remaining_weight -= weights[i];
    }

    out
}
