use std::collections::HashSet;

use condorcet_voting::*;
use proptest::prelude::*;

// Candidates 1..=n and ballots that rank any subset of them, in any order.
fn election() -> impl Strategy<Value = (Vec<CandidateId>, Vec<Ballot>)> {
    (0usize..6).prop_flat_map(|n| {
        let candidates: Vec<CandidateId> = (1..=n as CandidateId).collect();
        let ballot = Just(candidates.clone())
            .prop_shuffle()
            .prop_flat_map(|perm| {
                let len = perm.len();
                (Just(perm), 0..=len)
            })
            .prop_map(|(perm, k)| perm[..k].to_vec());
        (Just(candidates), prop::collection::vec(ballot, 0..15))
    })
}

fn method() -> impl Strategy<Value = TieBreakMethod> {
    prop::sample::select(TieBreakMethod::ALL.to_vec())
}

fn conduct(
    candidates: &[CandidateId],
    ballots: &[Ballot],
    tie_break_method: TieBreakMethod,
) -> ElectionResult {
    run_election(ballots, candidates, &VoteRules { tie_break_method }).unwrap()
}

proptest! {
    #[test]
    fn at_most_one_winner((candidates, ballots) in election()) {
        let m = PairwiseMatrix::tabulate(&ballots, &candidates);
        let undefeated: Vec<CandidateId> = candidates
            .iter()
            .cloned()
            .filter(|&c| candidates.iter().filter(|&&o| o != c).all(|&o| m.beats(c, o)))
            .collect();
        prop_assert!(undefeated.len() <= 1);
        prop_assert_eq!(find_winner(&m, &candidates), undefeated.first().cloned());
    }

    #[test]
    fn smith_set_dominates((candidates, ballots) in election()) {
        let m = PairwiseMatrix::tabulate(&ballots, &candidates);
        let smith = smith_set(&m, &candidates);
        prop_assert_eq!(smith.is_empty(), candidates.is_empty());
        for inside in smith.iter() {
            prop_assert!(candidates.contains(inside));
            for outside in candidates.iter().filter(|c| !smith.contains(c)) {
                prop_assert!(m.beats(*inside, *outside));
            }
        }
        if let Some(w) = find_winner(&m, &candidates) {
            prop_assert!(smith.contains(&w));
        }
    }

    #[test]
    fn margins_are_antisymmetric((candidates, ballots) in election()) {
        let m = PairwiseMatrix::tabulate(&ballots, &candidates);
        let mm = m.margins();
        for &a in candidates.iter() {
            for &b in candidates.iter() {
                prop_assert_eq!(mm.get(a, b), -mm.get(b, a));
                prop_assert!(m.get(a, b) + m.get(b, a) <= ballots.len() as u64);
            }
        }
    }

    #[test]
    fn ranking_is_a_permutation((candidates, ballots) in election(), method in method()) {
        let ranking = compute_full_ranking(&ballots, &candidates, method);
        let mut sorted = ranking.clone();
        sorted.sort_unstable();
        prop_assert_eq!(sorted, candidates.clone());

        let m = PairwiseMatrix::tabulate(&ballots, &candidates);
        let mm = m.margins();
        for order in [
            margin_order(&candidates, &mm),
            copeland_order(&candidates, &m),
            borda_order(&ballots, &candidates),
        ] {
            let as_set: HashSet<CandidateId> = order.iter().cloned().collect();
            prop_assert_eq!(order.len(), candidates.len());
            prop_assert_eq!(as_set.len(), candidates.len());
        }
    }

    #[test]
    fn elections_are_deterministic((candidates, ballots) in election(), method in method()) {
        let first = conduct(&candidates, &ballots, method);
        let second = conduct(&candidates, &ballots, method);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn winner_comes_first((candidates, ballots) in election(), method in method()) {
        let result = conduct(&candidates, &ballots, method);
        if let Some(w) = result.winner() {
            prop_assert_eq!(result.ranking().first(), Some(&w));
            prop_assert!(result.smith_set().contains(&w));
        }
        prop_assert_eq!(result.vote_count(), ballots.len());
    }

    #[test]
    fn ties_are_disjoint_runs((candidates, ballots) in election(), method in method()) {
        let result = conduct(&candidates, &ballots, method);
        let mut seen: HashSet<CandidateId> = HashSet::new();
        for group in result.ties() {
            prop_assert!(group.len() >= 2);
            let start = result
                .ranking()
                .iter()
                .position(|c| *c == group[0])
                .unwrap();
            prop_assert_eq!(&result.ranking()[start..start + group.len()], &group[..]);
            for pair in group.windows(2) {
                prop_assert!(result.margin_matrix().get(pair[0], pair[1]).abs() <= TIE_MARGIN_THRESHOLD);
            }
            for c in group {
                prop_assert!(seen.insert(*c));
            }
        }
    }
}
