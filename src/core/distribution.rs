//! Spreads a subset of candidate dates across the month instead of taking the first few.
//!
//! Index `i` of the output is picked at `round(i * len / target)`, rounding ties to even.
//! Indices pushed past the end are clamped, duplicates are dropped, and any shortfall is
//! filled with the lowest unused indices. The result is deterministic so that a preview and
//! the subsequent generate call select the same dates.

/// Returns `min(target_count, candidates.len())` items of `candidates`, in their original order.
pub fn select_evenly_distributed<T: Clone>(candidates: &[T], target_count: usize) -> Vec<T> {
    select_indices(candidates.len(), target_count)
        .into_iter()
        .map(|index| candidates[index].clone())
        .collect()
}

/// Indices chosen from a list of `len` candidates, ascending.
pub fn select_indices(len: usize, target_count: usize) -> Vec<usize> {
    if target_count >= len {
        return (0..len).collect();
    }
    if target_count == 0 {
        return Vec::new();
    }

    let step = len as f64 / target_count as f64;
    let mut taken = vec![false; len];
    let mut selected = Vec::with_capacity(target_count);

    for i in 0..target_count {
        let index = ((i as f64 * step).round_ties_even() as usize).min(len - 1);
        if !taken[index] {
            taken[index] = true;
            selected.push(index);
        }
    }

    if selected.len() < target_count {
        let missing = target_count - selected.len();
        let fill: Vec<usize> = (0..len).filter(|i| !taken[*i]).take(missing).collect();
        tracing::debug!("Filling {} gap(s) after de-duplication: {:?}", missing, fill);
        selected.extend(fill);
        selected.sort_unstable();
    }

    tracing::debug!(
        "Selected indices {:?} from {} candidate(s) (step {:.3})",
        selected,
        len,
        step
    );
    selected
}
