//! Property tests for distribution: conservation, monotonic loads, ledger
//! coverage, spread and tally totals.

use proptest::prelude::*;
use triage_allocation::{distribute, CategoryTally};
use triage_models::{ClassifiedIssue, Team};

fn roster(loads: &[i64]) -> Team {
    loads
        .iter()
        .enumerate()
        .fold(Team::new("T1", "Server_Team"), |team, (i, load)| {
            team.with_member(format!("m{}", i), *load)
        })
}

proptest! {
    #[test]
    fn total_load_is_conserved(
        loads in prop::collection::vec(0i64..50, 1..12),
        total in 0i64..200,
    ) {
        let mut team = roster(&loads);
        let before = team.total_load();
        distribute(&mut team, total).unwrap();
        prop_assert_eq!(team.total_load() - before, total);
    }

    #[test]
    fn loads_never_decrease(
        loads in prop::collection::vec(0i64..50, 1..12),
        total in 0i64..200,
    ) {
        let mut team = roster(&loads);
        distribute(&mut team, total).unwrap();
        for (member, initial) in team.members.iter().zip(&loads) {
            prop_assert!(member.current_load >= *initial);
        }
    }

    #[test]
    fn ledger_covers_every_member_once_issues_exist(
        loads in prop::collection::vec(0i64..50, 1..12),
        total in 1i64..200,
    ) {
        let mut team = roster(&loads);
        let ledger = distribute(&mut team, total).unwrap();

        prop_assert_eq!(ledger.len(), team.members.len());
        for member in &team.members {
            let entry = ledger.get(member.key.as_str()).unwrap();
            prop_assert!(entry.after >= entry.before);
            prop_assert!(entry.delta() <= 2);
            prop_assert_eq!(entry.after, member.current_load);
        }
    }

    #[test]
    fn zero_issues_changes_nothing(loads in prop::collection::vec(0i64..50, 0..12)) {
        let mut team = roster(&loads);
        let original = team.clone();
        let ledger = distribute(&mut team, 0).unwrap();
        prop_assert!(ledger.is_empty());
        prop_assert_eq!(team, original);
    }

    #[test]
    fn spread_stays_within_initial_spread_plus_two(
        n in 1usize..10,
        total in 0i64..300,
    ) {
        let mut team = roster(&vec![0; n]);
        distribute(&mut team, total).unwrap();
        let max = team.members.iter().map(|m| m.current_load).max().unwrap();
        let min = team.members.iter().map(|m| m.current_load).min().unwrap();
        prop_assert!(max - min <= 2);
    }

    #[test]
    fn tally_total_matches_input_len(categories in prop::collection::vec("[A-C]?", 0..100)) {
        let issues: Vec<_> = categories
            .iter()
            .enumerate()
            .map(|(i, c)| ClassifiedIssue::new(i.to_string(), c.as_str()))
            .collect();
        let tally = CategoryTally::from_issues(&issues);
        prop_assert_eq!(tally.total(), issues.len());
        prop_assert_eq!(CategoryTally::from_issues_parallel(&issues), tally);
    }
}
