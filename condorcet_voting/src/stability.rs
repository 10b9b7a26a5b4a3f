use log::{debug, info};
use rand::seq::index::sample;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::config::*;
use crate::CondorcetSystem;

/// How much an election outcome depends on the exact set of ballots.
#[derive(PartialEq, Debug, Clone)]
pub struct StabilityReport {
    /// The winner of the election over all the ballots.
    pub base_winner: Option<CandidateId>,
    /// Fraction of the sub-sampled elections that have the same winner (or the same absence of winner).
    pub winner_stability: f64,
    /// Fraction of the sub-sampled elections that produce exactly the same ranking.
    pub ranking_stability: f64,
    /// 1.0 if the full election has a Condorcet winner, 0.0 otherwise.
    pub condorcet_efficiency: f64,
    pub simulations: u32,
}

/// The number of ballots kept in every sample.
fn sample_size(num_ballots: usize, drop_divisor: usize) -> usize {
    let dropped = num_ballots.checked_div(drop_divisor).unwrap_or(0);
    std::cmp::max(1, num_ballots - dropped).min(num_ballots)
}

/// Re-runs the election on random subsets of the ballots and measures how often the outcome stays the same.
///
/// Every simulation draws, without replacement, all the ballots but `n / drop_divisor` of them.
/// The draws only depend on `rules.seed`.
pub fn analyze_stability(
    system: &CondorcetSystem,
    ballots: &[Ballot],
    candidates: &[CandidateId],
    rules: &StabilityRules,
) -> Result<StabilityReport, ValidationError> {
    let base = system.conduct_election(ballots, candidates)?;
    let kept = sample_size(ballots.len(), rules.drop_divisor);
    info!(
        "analyze_stability: {} simulations keeping {} of {} ballots, seed {}",
        rules.simulations,
        kept,
        ballots.len(),
        rules.seed
    );

    let mut rng = ChaCha20Rng::seed_from_u64(rules.seed);
    let mut same_winner: u32 = 0;
    let mut same_ranking: u32 = 0;
    for sim_id in 0..rules.simulations {
        let sampled: Vec<Ballot> = sample(&mut rng, ballots.len(), kept)
            .into_iter()
            .map(|idx| ballots[idx].clone())
            .collect();
        let sim = system.conduct_election(&sampled, candidates)?;
        debug!(
            "analyze_stability: simulation {}: winner {:?} ranking {:?}",
            sim_id,
            sim.winner(),
            sim.ranking()
        );
        if sim.winner() == base.winner() {
            same_winner += 1;
        }
        if sim.ranking() == base.ranking() {
            same_ranking += 1;
        }
    }

    let fraction = |count: u32| -> f64 {
        if rules.simulations == 0 {
            0.0
        } else {
            count as f64 / rules.simulations as f64
        }
    };
    let report = StabilityReport {
        base_winner: base.winner(),
        winner_stability: fraction(same_winner),
        ranking_stability: fraction(same_ranking),
        condorcet_efficiency: if base.winner().is_some() { 1.0 } else { 0.0 },
        simulations: rules.simulations,
    };
    info!("analyze_stability: {:?}", report);
    Ok(report)
}
