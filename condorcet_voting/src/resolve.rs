use log::{debug, info};

use crate::config::CandidateId;
use crate::matrix::PairwiseMatrix;

/// Finds the candidate that beats every other candidate head to head, if it exists.
///
/// A single tie against any opponent disqualifies a candidate. At most one candidate can
/// satisfy this condition; the candidates are scanned in the given order.
pub fn find_winner(matrix: &PairwiseMatrix, candidates: &[CandidateId]) -> Option<CandidateId> {
    let winner = candidates.iter().cloned().find(|&cid| {
        candidates
            .iter()
            .filter(|&&opponent| opponent != cid)
            .all(|&opponent| matrix.beats(cid, opponent))
    });
    match winner {
        Some(cid) => info!("find_winner: Condorcet winner found: candidate {}", cid),
        None => info!(
            "find_winner: no Condorcet winner among {:?} (Condorcet paradox)",
            candidates
        ),
    }
    winner
}

/// Computes the Smith set of the given candidates.
///
/// Starting from all the candidates, every candidate that is beaten by each of the other
/// remaining candidates is removed, until no more candidate can be removed. The set never
/// becomes empty: the last candidate has nobody left to be beaten by.
///
/// The members are returned in the order of `candidates`.
pub fn smith_set(matrix: &PairwiseMatrix, candidates: &[CandidateId]) -> Vec<CandidateId> {
    let mut current: Vec<CandidateId> = Vec::with_capacity(candidates.len());
    for &cid in candidates {
        if !current.contains(&cid) {
            current.push(cid);
        }
    }

    loop {
        let dominated: Vec<CandidateId> = current
            .iter()
            .cloned()
            .filter(|&cid| {
                let mut others = current.iter().filter(|&&other| other != cid).peekable();
                others.peek().is_some() && others.all(|&other| matrix.beats(other, cid))
            })
            .collect();
        if dominated.is_empty() {
            break;
        }
        debug!("smith_set: removing dominated candidates {:?}", dominated);
        current.retain(|cid| !dominated.contains(cid));
    }

    info!("smith_set: {:?}", current);
    current
}
