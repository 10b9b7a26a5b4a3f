use std::collections::HashSet;

pub use crate::config::*;
use crate::validate::validate_ballot;
use crate::CondorcetSystem;

/// A builder for collecting ballots one at a time.
///
/// When the candidates are declared first, every ballot is checked as soon as it is added.
///
/// ```
/// pub use condorcet_voting::builder::Builder;
/// pub use condorcet_voting::VoteRules;
/// # use condorcet_voting::ValidationError;
///
/// let mut builder = Builder::new(&VoteRules::DEFAULT_RULES).candidates(&[1, 2, 3]);
///
/// builder.add_ballot(&[1, 2, 3])?;
/// builder.add_weighted_ballot(&[2, 1], 2)?;
/// assert!(builder.add_ballot(&[1, 4]).is_err());
///
/// let result = builder.conduct()?;
/// assert_eq!(result.winner(), Some(2));
/// assert_eq!(result.vote_count(), 3);
///
/// # Ok::<(), ValidationError>(())
/// ```
pub struct Builder {
    pub(crate) _rules: VoteRules,
    pub(crate) _candidates: Option<(Vec<CandidateId>, HashSet<CandidateId>)>,
    pub(crate) _ballots: Vec<Ballot>,
}

impl Builder {
    pub fn new(rules: &VoteRules) -> Builder {
        Builder {
            _rules: *rules,
            _candidates: None,
            _ballots: Vec::new(),
        }
    }

    /// Declares the candidates of the election.
    ///
    /// The ballots added so far are discarded.
    pub fn candidates(self, cands: &[CandidateId]) -> Builder {
        Builder {
            _rules: self._rules,
            _candidates: Some((cands.to_vec(), cands.iter().cloned().collect())),
            _ballots: Vec::new(),
        }
    }

    /// Adds a single ballot, most preferred candidate first.
    pub fn add_ballot(&mut self, ranking: &[CandidateId]) -> Result<(), ValidationError> {
        self.add_weighted_ballot(ranking, 1)
    }

    /// Adds `count` identical ballots.
    ///
    /// An error refers to the ballot by its insertion position. Nothing is added when the
    /// ballot is rejected.
    pub fn add_weighted_ballot(
        &mut self,
        ranking: &[CandidateId],
        count: u32,
    ) -> Result<(), ValidationError> {
        if let Some((cands, declared)) = &self._candidates {
            validate_ballot(self._ballots.len(), ranking, declared, cands)?;
        }
        for _ in 0..count {
            self._ballots.push(ranking.to_vec());
        }
        Ok(())
    }

    pub fn ballots(&self) -> &[Ballot] {
        &self._ballots
    }

    /// The declared candidates, or else all the candidates found on the ballots in order of
    /// first appearance.
    pub fn candidate_list(&self) -> Vec<CandidateId> {
        if let Some((cands, _)) = &self._candidates {
            return cands.clone();
        }
        let mut seen: HashSet<CandidateId> = HashSet::new();
        self._ballots
            .iter()
            .flatten()
            .cloned()
            .filter(|cid| seen.insert(*cid))
            .collect()
    }

    /// Runs the election over the ballots added so far.
    pub fn conduct(&self) -> Result<ElectionResult, ValidationError> {
        CondorcetSystem::new(&self._rules).conduct_election(&self._ballots, &self.candidate_list())
    }
}
