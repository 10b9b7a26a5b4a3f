use log::debug;
use snafu::prelude::*;
use std::collections::HashSet;

use crate::config::*;

/// Checks that every ballot only ranks declared candidates, each of them at most once.
///
/// Partial ballots are accepted. The first offending ballot is reported; nothing is corrected.
pub fn validate_ballots(
    ballots: &[Ballot],
    candidates: &[CandidateId],
) -> Result<(), ValidationError> {
    let declared: HashSet<CandidateId> = candidates.iter().cloned().collect();
    for (ballot_index, ballot) in ballots.iter().enumerate() {
        validate_ballot(ballot_index, ballot, &declared, candidates)?;
    }
    debug!("validate_ballots: {} ballots are valid", ballots.len());
    Ok(())
}

// Membership is checked before duplicates.
pub(crate) fn validate_ballot(
    ballot_index: usize,
    ballot: &[CandidateId],
    declared: &HashSet<CandidateId>,
    candidates: &[CandidateId],
) -> Result<(), ValidationError> {
    if let Some(&candidate) = ballot.iter().find(|cid| !declared.contains(cid)) {
        return UndeclaredCandidateSnafu {
            ballot_index,
            candidate,
            allowed: candidates.to_vec(),
        }
        .fail();
    }

    let duplicates = repeated_candidates(ballot);
    ensure!(
        duplicates.is_empty(),
        DuplicateCandidatesSnafu {
            ballot_index,
            duplicates
        }
    );
    Ok(())
}

// The candidates that appear more than once, in order of first appearance.
fn repeated_candidates(ballot: &[CandidateId]) -> Vec<CandidateId> {
    let mut seen: HashSet<CandidateId> = HashSet::new();
    let mut repeated: Vec<CandidateId> = Vec::new();
    for &cid in ballot {
        if !seen.insert(cid) && !repeated.contains(&cid) {
            repeated.push(cid);
        }
    }
    repeated
}
