use log::{debug, info};

use crate::config::*;
use crate::matrix::{MarginMatrix, PairwiseMatrix};
use crate::resolve::find_winner;

/// Builds the full ranking from matrices already tabulated over (at least) the given candidates.
///
/// At each level, the Condorcet winner of the remaining candidates is appended and removed.
/// When a level has no winner, the tie-break method orders all the remaining candidates
/// and the composition stops.
pub(crate) fn compose_ranking(
    ballots: &[Ballot],
    matrix: &PairwiseMatrix,
    margins: &MarginMatrix,
    candidates: &[CandidateId],
    method: TieBreakMethod,
) -> Vec<CandidateId> {
    let mut remaining: Vec<CandidateId> = Vec::with_capacity(candidates.len());
    for &cid in candidates {
        if !remaining.contains(&cid) {
            remaining.push(cid);
        }
    }

    let mut ranking: Vec<CandidateId> = Vec::with_capacity(remaining.len());
    while !remaining.is_empty() {
        // The counts between two remaining candidates do not depend on the eliminated ones.
        match find_winner(matrix, &remaining) {
            Some(winner) => {
                debug!(
                    "compose_ranking: level {}: winner {} among {:?}",
                    ranking.len() + 1,
                    winner,
                    remaining
                );
                ranking.push(winner);
                remaining.retain(|&cid| cid != winner);
            }
            None => {
                info!(
                    "compose_ranking: no winner among {:?}, breaking the tie with the {} method",
                    remaining, method
                );
                ranking.extend(method.order(ballots, matrix, margins, &remaining));
                break;
            }
        }
    }
    info!("compose_ranking: final ranking: {:?}", ranking);
    ranking
}

/// Computes the complete ranking of the candidates, best first.
///
/// Ballots are not validated: undeclared identifiers are ignored.
pub fn compute_full_ranking(
    ballots: &[Ballot],
    candidates: &[CandidateId],
    method: TieBreakMethod,
) -> Vec<CandidateId> {
    let matrix = PairwiseMatrix::tabulate(ballots, candidates);
    let margins = matrix.margins();
    compose_ranking(ballots, &matrix, &margins, candidates, method)
}

fn is_tied(margins: &MarginMatrix, a: CandidateId, b: CandidateId) -> bool {
    margins.get(a, b).abs() <= TIE_MARGIN_THRESHOLD && margins.get(b, a).abs() <= TIE_MARGIN_THRESHOLD
}

/// Finds the groups of consecutive candidates in the ranking that are practically tied.
///
/// Two neighbours are tied when their head-to-head margin is at most `TIE_MARGIN_THRESHOLD`
/// in absolute value. A group keeps growing as long as its last member is tied with the
/// next candidate. Groups have at least two members and do not overlap.
pub fn identify_ties(ranking: &[CandidateId], margins: &MarginMatrix) -> Vec<Vec<CandidateId>> {
    let mut ties: Vec<Vec<CandidateId>> = Vec::new();
    let mut start = 0;
    while start < ranking.len() {
        let mut end = start + 1;
        while end < ranking.len() && is_tied(margins, ranking[end - 1], ranking[end]) {
            end += 1;
        }
        if end - start >= 2 {
            ties.push(ranking[start..end].to_vec());
        }
        start = end;
    }
    debug!("identify_ties: {:?}", ties);
    ties
}
