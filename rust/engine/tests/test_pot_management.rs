use holdem_engine::pot::PotManager;

#[test]
fn heads_up_simple_side_pot() {
    let pm = PotManager::from_contributions([500, 1000]);
    assert_eq!(pm.main_pot(), 1000);
    assert_eq!(pm.side_pots(), vec![500]);
    assert_eq!(pm.pots()[1].eligible, vec![1]);
}

#[test]
fn equal_stacks_no_side_pot() {
    let pm = PotManager::from_contributions([1000, 1000]);
    assert_eq!(pm.main_pot(), 2000);
    assert!(pm.side_pots().is_empty());
}

#[test]
fn three_levels_make_two_side_pots() {
    let pm = PotManager::from_contributions([100, 300, 600]);
    assert_eq!(pm.main_pot(), 300);
    assert_eq!(pm.side_pots(), vec![400, 300]);
    assert_eq!(pm.pots()[0].eligible, vec![0, 1, 2]);
    assert_eq!(pm.pots()[1].eligible, vec![1, 2]);
    assert_eq!(pm.pots()[2].eligible, vec![2]);
    assert_eq!(pm.total(), 1000);
}

#[test]
fn folded_short_contribution_does_not_split_the_pot() {
    let pm = PotManager::from_entries([(0, 30, false), (1, 200, true), (2, 200, true)]);
    assert_eq!(pm.pots().len(), 1);
    assert_eq!(pm.total(), 430);
}
