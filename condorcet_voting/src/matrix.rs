use log::debug;
use std::collections::HashMap;

use crate::config::{Ballot, CandidateId, PairwiseComparison};

// Maps the declared candidates to their row/column in the dense matrices.
// Only the first occurrence of a repeated identifier is kept.
#[derive(Eq, PartialEq, Debug, Clone)]
struct CandidateIndex {
    candidates: Vec<CandidateId>,
    positions: HashMap<CandidateId, usize>,
}

impl CandidateIndex {
    fn new(declared: &[CandidateId]) -> CandidateIndex {
        let mut candidates: Vec<CandidateId> = Vec::with_capacity(declared.len());
        let mut positions: HashMap<CandidateId, usize> = HashMap::with_capacity(declared.len());
        for &cid in declared {
            if !positions.contains_key(&cid) {
                positions.insert(cid, candidates.len());
                candidates.push(cid);
            }
        }
        CandidateIndex {
            candidates,
            positions,
        }
    }

    fn len(&self) -> usize {
        self.candidates.len()
    }

    fn cell(&self, a: CandidateId, b: CandidateId) -> Option<usize> {
        if a == b {
            return None;
        }
        let ia = self.positions.get(&a)?;
        let ib = self.positions.get(&b)?;
        Some(ia * self.len() + ib)
    }
}

/// Pairwise win matrix: get(A, B) = number of ballots ranking A strictly ahead of B.
///
/// Entries exist for every ordered pair of distinct declared candidates. Looking up a pair
/// that involves an undeclared candidate, or a candidate against itself, returns 0.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct PairwiseMatrix {
    index: CandidateIndex,
    wins: Vec<u64>,
}

impl PairwiseMatrix {
    /// Counts, for every ordered pair of declared candidates, the ballots that prefer the first one.
    ///
    /// Identifiers that are not declared are skipped: the ballots are expected to be
    /// validated beforehand.
    pub fn tabulate(ballots: &[Ballot], candidates: &[CandidateId]) -> PairwiseMatrix {
        let index = CandidateIndex::new(candidates);
        let n = index.len();
        let mut wins: Vec<u64> = vec![0; n * n];
        for ballot in ballots.iter() {
            for (i, &earlier) in ballot.iter().enumerate() {
                for &later in ballot[i + 1..].iter() {
                    if let Some(cell) = index.cell(earlier, later) {
                        wins[cell] += 1;
                    }
                }
            }
        }
        let res = PairwiseMatrix { index, wins };
        debug!("tabulate: {} ballots, matrix: {:?}", ballots.len(), res.rows());
        res
    }

    /// The declared candidates, without repetitions.
    pub fn candidates(&self) -> &[CandidateId] {
        &self.index.candidates
    }

    /// Number of ballots that rank `a` strictly ahead of `b`.
    pub fn get(&self, a: CandidateId, b: CandidateId) -> u64 {
        self.index.cell(a, b).map(|c| self.wins[c]).unwrap_or(0)
    }

    /// True if strictly more ballots prefer `a` over `b` than `b` over `a`.
    pub fn beats(&self, a: CandidateId, b: CandidateId) -> bool {
        self.get(a, b) > self.get(b, a)
    }

    pub fn comparison(&self, a: CandidateId, b: CandidateId) -> PairwiseComparison {
        let votes_for_a = self.get(a, b);
        let votes_for_b = self.get(b, a);
        PairwiseComparison {
            candidate_a: a,
            candidate_b: b,
            votes_for_a,
            votes_for_b,
            margin: votes_for_a as i64 - votes_for_b as i64,
        }
    }

    /// Rows of the matrix in declared order, without the diagonal.
    pub fn rows(&self) -> Vec<(CandidateId, Vec<(CandidateId, u64)>)> {
        self.candidates()
            .iter()
            .map(|&a| {
                let row = self
                    .candidates()
                    .iter()
                    .filter(|&&b| b != a)
                    .map(|&b| (b, self.get(a, b)))
                    .collect();
                (a, row)
            })
            .collect()
    }

    /// The margin of victory for every ordered pair of declared candidates.
    pub fn margins(&self) -> MarginMatrix {
        let n = self.index.len();
        let mut margins: Vec<i64> = vec![0; n * n];
        for i in 0..n {
            for j in 0..n {
                if i != j {
                    margins[i * n + j] = self.wins[i * n + j] as i64 - self.wins[j * n + i] as i64;
                }
            }
        }
        MarginMatrix {
            index: self.index.clone(),
            margins,
        }
    }
}

/// Margin matrix: get(A, B) = wins(A, B) - wins(B, A).
///
/// Always antisymmetric: get(A, B) == -get(B, A).
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct MarginMatrix {
    index: CandidateIndex,
    margins: Vec<i64>,
}

impl MarginMatrix {
    pub fn candidates(&self) -> &[CandidateId] {
        &self.index.candidates
    }

    pub fn get(&self, a: CandidateId, b: CandidateId) -> i64 {
        self.index.cell(a, b).map(|c| self.margins[c]).unwrap_or(0)
    }

    /// Rows of the matrix in declared order, without the diagonal.
    pub fn rows(&self) -> Vec<(CandidateId, Vec<(CandidateId, i64)>)> {
        self.candidates()
            .iter()
            .map(|&a| {
                let row = self
                    .candidates()
                    .iter()
                    .filter(|&&b| b != a)
                    .map(|&b| (b, self.get(a, b)))
                    .collect();
                (a, row)
            })
            .collect()
    }
}

/// Computes the margin matrix of `matrix`, restricted to the given candidates.
pub fn margins(matrix: &PairwiseMatrix, candidates: &[CandidateId]) -> MarginMatrix {
    let index = CandidateIndex::new(candidates);
    let n = index.len();
    let mut margins: Vec<i64> = vec![0; n * n];
    for (i, &a) in index.candidates.iter().enumerate() {
        for (j, &b) in index.candidates.iter().enumerate() {
            if i != j {
                margins[i * n + j] = matrix.get(a, b) as i64 - matrix.get(b, a) as i64;
            }
        }
    }
    MarginMatrix { index, margins }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ballots() -> Vec<Ballot> {
        vec![vec![1, 2, 3], vec![1, 3, 2], vec![2, 1, 3]]
    }

    #[test]
    fn tabulate_counts_every_ordered_pair() {
        let m = PairwiseMatrix::tabulate(&ballots(), &[1, 2, 3]);
        assert_eq!(m.get(1, 2), 2);
        assert_eq!(m.get(2, 1), 1);
        assert_eq!(m.get(1, 3), 3);
        assert_eq!(m.get(3, 1), 0);
        assert_eq!(m.get(2, 3), 2);
        assert_eq!(m.get(3, 2), 1);
        assert_eq!(m.get(1, 1), 0);
    }

    #[test]
    fn tabulate_partial_ballots() {
        let m = PairwiseMatrix::tabulate(&[vec![1, 2], vec![2, 3], vec![1, 3, 2]], &[1, 2, 3]);
        assert_eq!(m.get(1, 2), 2);
        assert_eq!(m.get(2, 1), 0);
        assert_eq!(m.get(2, 3), 1);
        assert_eq!(m.get(3, 2), 1);
        assert_eq!(m.get(1, 3), 1);
        assert_eq!(m.get(3, 1), 0);
    }

    #[test]
    fn tabulate_skips_undeclared_candidates() {
        let m = PairwiseMatrix::tabulate(&[vec![1, 99, 2]], &[1, 2]);
        assert_eq!(m.get(1, 2), 1);
        assert_eq!(m.get(1, 99), 0);
        assert_eq!(m.get(99, 2), 0);
        assert_eq!(m.candidates(), &[1, 2]);
    }

    #[test]
    fn tabulate_tolerates_repeated_candidates() {
        let m = PairwiseMatrix::tabulate(&[vec![2, 1, 2]], &[1, 2, 1]);
        assert_eq!(m.candidates(), &[1, 2]);
        assert_eq!(m.get(2, 1), 1);
        assert_eq!(m.get(1, 2), 1);
    }

    #[test]
    fn empty_matrix() {
        let m = PairwiseMatrix::tabulate(&[], &[]);
        assert!(m.candidates().is_empty());
        assert!(m.rows().is_empty());
        assert!(m.margins().rows().is_empty());
    }

    #[test]
    fn margins_are_antisymmetric() {
        let m = PairwiseMatrix::tabulate(&ballots(), &[1, 2, 3]);
        let mm = m.margins();
        assert_eq!(mm.get(1, 2), 1);
        assert_eq!(mm.get(2, 1), -1);
        assert_eq!(mm.get(1, 3), 3);
        assert_eq!(mm.get(3, 1), -3);
        assert_eq!(mm, margins(&m, &[1, 2, 3]));
    }

    #[test]
    fn margins_of_a_subset() {
        let m = PairwiseMatrix::tabulate(&ballots(), &[1, 2, 3]);
        let mm = margins(&m, &[2, 3]);
        assert_eq!(mm.candidates(), &[2, 3]);
        assert_eq!(mm.get(2, 3), 1);
        assert_eq!(mm.get(1, 2), 0);
    }

    #[test]
    fn comparison_details() {
        let m = PairwiseMatrix::tabulate(&[vec![1, 2], vec![2, 1], vec![1, 2]], &[1, 2]);
        let c = m.comparison(1, 2);
        assert_eq!(c.candidate_a, 1);
        assert_eq!(c.candidate_b, 2);
        assert_eq!(c.votes_for_a, 2);
        assert_eq!(c.votes_for_b, 1);
        assert_eq!(c.margin, 1);
        assert_eq!(c.winner(), Some(1));
        assert!(m.beats(1, 2));
        assert!(!m.beats(2, 1));
    }

    #[test]
    fn rows_skip_the_diagonal() {
        let m = PairwiseMatrix::tabulate(&ballots(), &[1, 2, 3]);
        assert_eq!(
            m.rows(),
            vec![
                (1, vec![(2, 2), (3, 3)]),
                (2, vec![(1, 1), (3, 2)]),
                (3, vec![(1, 0), (2, 1)]),
            ]
        );
    }
}
