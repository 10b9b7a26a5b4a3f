mod config;
mod matrix;
mod ranking;
mod resolve;
mod stability;
mod tiebreak;
mod validate;
use log::{debug, info};

pub use crate::config::*;
pub use crate::matrix::{margins, MarginMatrix, PairwiseMatrix};
pub use crate::ranking::{compute_full_ranking, identify_ties};
pub use crate::resolve::{find_winner, smith_set};
pub use crate::stability::{analyze_stability, StabilityReport};
pub use crate::tiebreak::{borda_order, copeland_order, margin_order};
pub use crate::validate::validate_ballots;

pub mod builder;
pub mod manual;

/// A Condorcet election engine.
///
/// It only holds the rules of the election: the same system can run any number of
/// elections, from any number of threads.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct CondorcetSystem {
    rules: VoteRules,
}

impl CondorcetSystem {
    pub fn new(rules: &VoteRules) -> CondorcetSystem {
        CondorcetSystem { rules: *rules }
    }

    pub fn tie_break_method(&self) -> TieBreakMethod {
        self.rules.tie_break_method
    }

    pub fn validate(
        &self,
        ballots: &[Ballot],
        candidates: &[CandidateId],
    ) -> Result<(), ValidationError> {
        validate_ballots(ballots, candidates)
    }

    /// The complete ranking of the candidates, using the tie-break method of this system.
    pub fn compute_full_ranking(
        &self,
        ballots: &[Ballot],
        candidates: &[CandidateId],
    ) -> Vec<CandidateId> {
        compute_full_ranking(ballots, candidates, self.rules.tie_break_method)
    }

    /// Runs the full election.
    ///
    /// Arguments:
    /// * `ballots` the rankings of the voters, most preferred candidate first. They may be partial.
    /// * `candidates` the declared candidates. Every candidate found on a ballot must be declared.
    pub fn conduct_election(
        &self,
        ballots: &[Ballot],
        candidates: &[CandidateId],
    ) -> Result<ElectionResult, ValidationError> {
        info!(
            "Processing {:?} ballots, candidates: {:?}, rules: {:?}",
            ballots.len(),
            candidates,
            self.rules
        );
        validate_ballots(ballots, candidates)?;

        let pairwise_matrix = PairwiseMatrix::tabulate(ballots, candidates);
        let margin_matrix = pairwise_matrix.margins();
        debug!("conduct_election: margins: {:?}", margin_matrix.rows());

        let winner = find_winner(&pairwise_matrix, candidates);
        let smith = smith_set(&pairwise_matrix, candidates);
        let ranking = ranking::compose_ranking(
            ballots,
            &pairwise_matrix,
            &margin_matrix,
            candidates,
            self.rules.tie_break_method,
        );
        let ties = identify_ties(&ranking, &margin_matrix);
        info!(
            "conduct_election: winner: {:?} ranking: {:?} ties: {:?}",
            winner, ranking, ties
        );

        Ok(ElectionResult {
            winner,
            pairwise_matrix,
            vote_count: ballots.len(),
            candidates: candidates.to_vec(),
            smith_set: smith,
            ranking,
            ties,
            margin_matrix,
        })
    }
}

impl Default for CondorcetSystem {
    fn default() -> Self {
        CondorcetSystem::new(&VoteRules::DEFAULT_RULES)
    }
}

/// Runs an election with the given rules.
///
/// This is a shortcut for `CondorcetSystem::new(rules).conduct_election(ballots, candidates)`.
pub fn run_election(
    ballots: &[Ballot],
    candidates: &[CandidateId],
    rules: &VoteRules,
) -> Result<ElectionResult, ValidationError> {
    CondorcetSystem::new(rules).conduct_election(ballots, candidates)
}
