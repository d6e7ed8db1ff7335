use crate::domain::model::{CandidateDate, ExistingDates};

/// Candidates split by whether their date already has a slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partitioned {
    pub creatable: Vec<CandidateDate>,
    pub conflicting: Vec<CandidateDate>,
}

/// Splits `candidates` against the dates the store already holds for the same template.
/// Order within each side follows `candidates`.
pub fn partition(candidates: &[CandidateDate], existing: &ExistingDates) -> Partitioned {
    let (conflicting, creatable): (Vec<_>, Vec<_>) = candidates
        .iter()
        .copied()
        .partition(|candidate| existing.contains(&candidate.date));

    if !conflicting.is_empty() {
        tracing::debug!(
            "{} of {} candidate(s) already exist",
            conflicting.len(),
            candidates.len()
        );
    }

    Partitioned {
        creatable,
        conflicting,
    }
}
