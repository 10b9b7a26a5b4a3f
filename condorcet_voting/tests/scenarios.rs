use condorcet_voting::builder::Builder;
use condorcet_voting::*;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn system(tie_break_method: TieBreakMethod) -> CondorcetSystem {
    CondorcetSystem::new(&VoteRules { tie_break_method })
}

#[test]
fn clear_winner() {
    init();
    let ballots = vec![vec![1, 2, 3], vec![1, 3, 2], vec![2, 1, 3]];
    let result = CondorcetSystem::default()
        .conduct_election(&ballots, &[1, 2, 3])
        .unwrap();
    assert_eq!(result.winner(), Some(1));
    let m = result.pairwise_matrix();
    assert_eq!(m.get(1, 2), 2);
    assert_eq!(m.get(1, 3), 3);
    assert_eq!(m.get(2, 3), 2);
    assert_eq!(result.vote_count(), 3);
    assert_eq!(result.candidates(), &[1, 2, 3]);
    assert_eq!(result.smith_set(), &[1]);
    assert_eq!(result.ranking(), &[1, 2, 3]);
    assert_eq!(result.margin_matrix().get(1, 3), 3);
}

#[test]
fn condorcet_paradox() {
    init();
    let ballots = vec![vec![1, 2, 3], vec![2, 3, 1], vec![3, 1, 2]];
    for method in TieBreakMethod::ALL {
        let result = system(method).conduct_election(&ballots, &[1, 2, 3]).unwrap();
        assert_eq!(result.winner(), None);
        assert_eq!(result.smith_set(), &[1, 2, 3]);
        assert_eq!(result.ranking().len(), 3);
        // Every margin is 1: the whole ranking is one tie.
        assert_eq!(result.ties(), &[vec![1, 2, 3]]);
    }
}

#[test]
fn undeclared_candidate() {
    init();
    let err = CondorcetSystem::default()
        .conduct_election(&[vec![1, 2, 99]], &[1, 2, 3])
        .unwrap_err();
    assert_eq!(err.ballot_index(), 0);
    assert!(matches!(
        err,
        ValidationError::UndeclaredCandidate { candidate: 99, .. }
    ));
    assert!(err.to_string().contains("99"));
}

#[test]
fn duplicate_candidate() {
    init();
    let err = CondorcetSystem::default()
        .conduct_election(&[vec![1, 1, 2]], &[1, 2, 3])
        .unwrap_err();
    assert_eq!(
        err,
        ValidationError::DuplicateCandidates {
            ballot_index: 0,
            duplicates: vec![1],
        }
    );
}

#[test]
fn single_candidate() {
    init();
    let result = CondorcetSystem::default()
        .conduct_election(&[vec![1], vec![1]], &[1])
        .unwrap();
    assert_eq!(result.winner(), Some(1));
    assert_eq!(result.ranking(), &[1]);
    assert_eq!(result.smith_set(), &[1]);
    assert!(result.ties().is_empty());
}

#[test]
fn empty_election() {
    init();
    let result = CondorcetSystem::default().conduct_election(&[], &[]).unwrap();
    assert_eq!(result.winner(), None);
    assert!(result.ranking().is_empty());
    assert!(result.smith_set().is_empty());
    assert!(result.ties().is_empty());
    assert_eq!(result.vote_count(), 0);
}

#[test]
fn every_tie_break_method_ranks_everybody() {
    init();
    let ballots = vec![
        vec![1, 2, 3, 4],
        vec![2, 3, 4, 1],
        vec![3, 4, 1, 2],
        vec![4, 1, 2, 3],
        vec![1, 3],
    ];
    for name in ["margin", "copeland", "borda"] {
        let method: TieBreakMethod = name.parse().unwrap();
        let result = system(method)
            .conduct_election(&ballots, &[1, 2, 3, 4])
            .unwrap();
        assert_eq!(result.ranking().len(), 4, "method {}", name);
        let mut sorted = result.ranking().to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![1, 2, 3, 4]);
    }
}

#[test]
fn methods_can_disagree() {
    init();
    // 1 > 2 by 3, 2 > 3 by 1, 3 > 1 by 1
    let ballots = vec![
        vec![1, 2, 3],
        vec![1, 2, 3],
        vec![2, 3, 1],
        vec![3, 1, 2],
        vec![3, 1, 2],
    ];
    let ranking = |m| system(m).compute_full_ranking(&ballots, &[1, 2, 3]);
    assert_eq!(ranking(TieBreakMethod::Margin), vec![1, 3, 2]);
    assert_eq!(ranking(TieBreakMethod::Copeland), vec![1, 2, 3]);
    assert_eq!(ranking(TieBreakMethod::Borda), vec![1, 3, 2]);
}

#[test]
fn smith_set_above_a_loser() {
    init();
    // 1 > 2 > 3 while 1 ties 3, and everybody prefers them to 4.
    let ballots = vec![
        vec![1, 2, 3, 4],
        vec![2, 3, 1, 4],
        vec![3, 1, 2, 4],
        vec![1, 2, 3, 4],
    ];
    let result = CondorcetSystem::default()
        .conduct_election(&ballots, &[4, 3, 2, 1])
        .unwrap();
    assert_eq!(result.winner(), None);
    assert_eq!(result.smith_set(), &[3, 2, 1]);
    assert_eq!(result.ranking().last(), Some(&4));
}

#[test]
fn partial_ballots() {
    init();
    // 3 is never compared with 2.
    let ballots = vec![vec![1, 2], vec![3, 1], vec![1], vec![2, 1]];
    let result = CondorcetSystem::default()
        .conduct_election(&ballots, &[1, 2, 3])
        .unwrap();
    assert_eq!(result.pairwise_matrix().get(3, 2), 0);
    assert_eq!(result.pairwise_matrix().get(2, 3), 0);
    assert_eq!(result.winner(), None);
    assert!(result.pairwise_matrix().comparison(2, 3).winner().is_none());
}

#[test]
fn builder_and_system_agree() {
    init();
    let ballots = vec![vec![2, 1, 3], vec![2, 3], vec![1, 2, 3], vec![3, 2, 1]];
    let mut builder = Builder::new(&VoteRules::DEFAULT_RULES).candidates(&[1, 2, 3]);
    for b in ballots.iter() {
        builder.add_ballot(b).unwrap();
    }
    let from_builder = builder.conduct().unwrap();
    let direct = run_election(&ballots, &[1, 2, 3], &VoteRules::DEFAULT_RULES).unwrap();
    assert_eq!(from_builder, direct);
    assert_eq!(direct.winner(), Some(2));
}

#[test]
fn system_is_shared_between_threads() {
    init();
    let system = CondorcetSystem::default();
    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                let ballots = vec![vec![1, 2, 3]; i + 1];
                system.conduct_election(&ballots, &[1, 2, 3]).unwrap().winner()
            })
        })
        .collect();
    for h in handles {
        assert_eq!(h.join().unwrap(), Some(1));
    }
}
