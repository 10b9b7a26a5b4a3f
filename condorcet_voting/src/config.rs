// ********* Input data structures ***********

use snafu::prelude::*;
use std::fmt::Display;
use std::str::FromStr;

use crate::matrix::{MarginMatrix, PairwiseMatrix};

/// The identifier of a candidate.
///
/// The engine does not care what a candidate stands for (an activity, a proposal, a person).
pub type CandidateId = u32;

/// One voter's ranking, most preferred candidate first.
///
/// A ballot may be partial: the candidates it omits do not take part in the pairwise
/// comparisons of this ballot.
pub type Ballot = Vec<CandidateId>;

/// Two candidates whose margins are both within this bound are reported as tied.
pub const TIE_MARGIN_THRESHOLD: i64 = 1;

// ******** Output data structures *********

/// The detailed head-to-head comparison between two candidates.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct PairwiseComparison {
    pub candidate_a: CandidateId,
    pub candidate_b: CandidateId,
    pub votes_for_a: u64,
    pub votes_for_b: u64,
    /// votes_for_a - votes_for_b
    pub margin: i64,
}

impl PairwiseComparison {
    /// The candidate preferred by strictly more ballots, if any.
    pub fn winner(&self) -> Option<CandidateId> {
        match self.votes_for_a.cmp(&self.votes_for_b) {
            std::cmp::Ordering::Greater => Some(self.candidate_a),
            std::cmp::Ordering::Less => Some(self.candidate_b),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// The outcome of one election.
///
/// It is built once by the election and can only be read afterwards.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ElectionResult {
    pub(crate) winner: Option<CandidateId>,
    pub(crate) pairwise_matrix: PairwiseMatrix,
    pub(crate) vote_count: usize,
    pub(crate) candidates: Vec<CandidateId>,
    pub(crate) smith_set: Vec<CandidateId>,
    pub(crate) ranking: Vec<CandidateId>,
    pub(crate) ties: Vec<Vec<CandidateId>>,
    pub(crate) margin_matrix: MarginMatrix,
}

impl ElectionResult {
    /// The Condorcet winner over the full candidate set, if there is one.
    pub fn winner(&self) -> Option<CandidateId> {
        self.winner
    }

    pub fn pairwise_matrix(&self) -> &PairwiseMatrix {
        &self.pairwise_matrix
    }

    /// Total number of ballots cast.
    pub fn vote_count(&self) -> usize {
        self.vote_count
    }

    /// The candidates as declared by the caller.
    pub fn candidates(&self) -> &[CandidateId] {
        &self.candidates
    }

    pub fn smith_set(&self) -> &[CandidateId] {
        &self.smith_set
    }

    /// The full ranking, best candidate first.
    pub fn ranking(&self) -> &[CandidateId] {
        &self.ranking
    }

    /// Groups of adjacent candidates in the ranking whose head-to-head margins are negligible.
    pub fn ties(&self) -> &[Vec<CandidateId>] {
        &self.ties
    }

    pub fn margin_matrix(&self) -> &MarginMatrix {
        &self.margin_matrix
    }
}

/// Errors raised when the ballots are not consistent with the declared candidates.
#[derive(Debug, Snafu, Eq, PartialEq, Clone)]
#[snafu(visibility(pub(crate)))]
pub enum ValidationError {
    #[snafu(display(
        "ballot {ballot_index}: candidate {candidate} is not valid (allowed candidates: {allowed:?})"
    ))]
    UndeclaredCandidate {
        ballot_index: usize,
        candidate: CandidateId,
        allowed: Vec<CandidateId>,
    },
    #[snafu(display("ballot {ballot_index}: duplicate candidates {duplicates:?}"))]
    DuplicateCandidates {
        ballot_index: usize,
        duplicates: Vec<CandidateId>,
    },
}

impl ValidationError {
    /// The position of the offending ballot in the input.
    pub fn ballot_index(&self) -> usize {
        match self {
            ValidationError::UndeclaredCandidate { ballot_index, .. } => *ballot_index,
            ValidationError::DuplicateCandidates { ballot_index, .. } => *ballot_index,
        }
    }
}

/// Errors in the election rules.
#[derive(Debug, Snafu, Eq, PartialEq, Clone)]
#[snafu(visibility(pub(crate)))]
pub enum ConfigurationError {
    #[snafu(display("unknown tie breaking method: {name:?} (expected margin, copeland or borda)"))]
    UnknownTieBreakMethod { name: String },
}

// ********* Configuration **********

/// How to order the candidates that remain once no Condorcet winner can be found.
///
/// - Margin (also known as minimax) ranks candidates by their least bad defeat.
/// - Copeland ranks candidates by the number of pairwise victories minus defeats.
/// - Borda ranks candidates by their positions on the ballots.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Default)]
pub enum TieBreakMethod {
    #[default]
    Margin,
    Copeland,
    Borda,
}

impl TieBreakMethod {
    pub const ALL: [TieBreakMethod; 3] = [
        TieBreakMethod::Margin,
        TieBreakMethod::Copeland,
        TieBreakMethod::Borda,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TieBreakMethod::Margin => "margin",
            TieBreakMethod::Copeland => "copeland",
            TieBreakMethod::Borda => "borda",
        }
    }
}

impl FromStr for TieBreakMethod {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "margin" => Ok(TieBreakMethod::Margin),
            "copeland" => Ok(TieBreakMethod::Copeland),
            "borda" => Ok(TieBreakMethod::Borda),
            x => UnknownTieBreakMethodSnafu { name: x }.fail(),
        }
    }
}

impl Display for TieBreakMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct VoteRules {
    pub tie_break_method: TieBreakMethod,
}

impl VoteRules {
    pub const DEFAULT_RULES: VoteRules = VoteRules {
        tie_break_method: TieBreakMethod::Margin,
    };
}

/// Settings for the ballot perturbation analysis.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct StabilityRules {
    /// Number of sub-sampled elections to run.
    pub simulations: u32,
    /// Every sample leaves out `n / drop_divisor` of the `n` ballots (at least one ballot is kept).
    pub drop_divisor: usize,
    pub seed: u64,
}

impl StabilityRules {
    pub const DEFAULT_RULES: StabilityRules = StabilityRules {
        simulations: 100,
        drop_divisor: 10,
        seed: 0,
    };
}
