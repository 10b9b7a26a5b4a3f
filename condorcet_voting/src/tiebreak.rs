use log::info;
use std::cmp::Reverse;
use std::collections::HashMap;

use crate::config::*;
use crate::matrix::{MarginMatrix, PairwiseMatrix};

impl TieBreakMethod {
    /// Orders `candidates` from best to worst according to this method.
    ///
    /// The margin and Copeland methods read the tabulated matrices, the Borda method reads
    /// the ballots again. Candidates with equal scores keep their relative order.
    pub fn order(
        &self,
        ballots: &[Ballot],
        matrix: &PairwiseMatrix,
        margins: &MarginMatrix,
        candidates: &[CandidateId],
    ) -> Vec<CandidateId> {
        match self {
            TieBreakMethod::Margin => margin_order(candidates, margins),
            TieBreakMethod::Copeland => copeland_order(candidates, matrix),
            TieBreakMethod::Borda => borda_order(ballots, candidates),
        }
    }
}

// Sorts by decreasing score. The sort is stable.
fn sort_by_score<S: Ord + Copy>(
    candidates: &[CandidateId],
    scores: &HashMap<CandidateId, S>,
) -> Vec<CandidateId> {
    let mut ranked = candidates.to_vec();
    ranked.sort_by_key(|cid| Reverse(scores.get(cid).copied()));
    ranked
}

/// Minimax: candidates are ranked by their worst defeat, the smallest defeat first.
///
/// The score of a candidate is its most negative margin against a single opponent, or 0
/// if it is never beaten.
pub fn margin_order(candidates: &[CandidateId], margins: &MarginMatrix) -> Vec<CandidateId> {
    let scores: HashMap<CandidateId, i64> = candidates
        .iter()
        .map(|&cid| {
            let worst_margin = candidates
                .iter()
                .filter(|&&opponent| opponent != cid)
                .map(|&opponent| margins.get(cid, opponent))
                .fold(0, i64::min);
            (cid, worst_margin)
        })
        .collect();
    let ranked = sort_by_score(candidates, &scores);
    info!("margin_order: ranking by margins: {:?}", ranked);
    ranked
}

/// Copeland: number of pairwise victories minus number of pairwise defeats.
///
/// Pairwise ties count as neither.
pub fn copeland_order(candidates: &[CandidateId], matrix: &PairwiseMatrix) -> Vec<CandidateId> {
    let scores: HashMap<CandidateId, i64> = candidates
        .iter()
        .map(|&cid| {
            let score: i64 = candidates
                .iter()
                .filter(|&&opponent| opponent != cid)
                .map(|&opponent| {
                    if matrix.beats(cid, opponent) {
                        1
                    } else if matrix.beats(opponent, cid) {
                        -1
                    } else {
                        0
                    }
                })
                .sum();
            (cid, score)
        })
        .collect();
    let ranked = sort_by_score(candidates, &scores);
    info!("copeland_order: ranking by Copeland score: {:?}", ranked);
    ranked
}

/// Borda count over the ballots.
///
/// On a ballot of length n, the candidate at position i (starting at 0) receives n - 1 - i
/// points. Only the given candidates accumulate points; the ballot length still counts every
/// entry, so shorter ballots award fewer points.
pub fn borda_order(ballots: &[Ballot], candidates: &[CandidateId]) -> Vec<CandidateId> {
    let mut scores: HashMap<CandidateId, u64> = candidates.iter().map(|&cid| (cid, 0)).collect();
    for ballot in ballots.iter() {
        let n = ballot.len();
        for (i, cid) in ballot.iter().enumerate() {
            if let Some(score) = scores.get_mut(cid) {
                *score += (n - 1 - i) as u64;
            }
        }
    }
    let ranked = sort_by_score(candidates, &scores);
    info!("borda_order: ranking by Borda count: {:?}", ranked);
    ranked
}
