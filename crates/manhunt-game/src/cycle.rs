//! Target-cycle construction.
//!
//! A round links every living player into one closed hunting loop: each
//! player targets exactly one other, and following targets from any player
//! walks the whole loop back to the start. Both halves of the construction
//! are pure -- a uniform shuffle and a wrap-around link -- so they can be
//! tested with a seeded RNG without a database.

use manhunt_types::{Player, PlayerId, TargetAssignment};
use rand::Rng;

/// Minimum number of living players needed to draw a cycle.
///
/// With one player there is nobody to hunt; the cycle manager leaves all
/// target links untouched below this threshold.
pub const MIN_CYCLE_SIZE: usize = 2;

/// Shuffle the ids of the given players into a uniformly random order.
///
/// Fisher-Yates over the id vector; every permutation is equally likely for
/// a uniform `rng`.
pub fn shuffled_ids<R: Rng>(rng: &mut R, players: &[Player]) -> Vec<PlayerId> {
    let mut ids: Vec<PlayerId> = players.iter().map(|p| p.id).collect();
    let len = ids.len();
    for i in 0..len {
        let j = rng.random_range(i..len);
        ids.swap(i, j);
    }
    ids
}

/// Link an ordering into a single closed cycle.
///
/// Each id targets its successor and the last wraps around to the first,
/// so the result covers every id exactly once as hunter and exactly once
/// as target. For two or more ids nobody targets themself. Fewer than
/// [`MIN_CYCLE_SIZE`] ids produce an empty batch.
pub fn link_ring(order: &[PlayerId]) -> Vec<TargetAssignment> {
    if order.len() < MIN_CYCLE_SIZE {
        return Vec::new();
    }

    order
        .iter()
        .zip(order.iter().cycle().skip(1))
        .map(|(player, target)| TargetAssignment {
            player_id: *player,
            target_id: *target,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, BTreeSet};

    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    fn make_players(count: usize) -> Vec<Player> {
        (0..count)
            .map(|i| Player {
                id: PlayerId::new(),
                name: format!("Player {i}"),
                code: format!("CODE-{i}"),
                is_alive: true,
                mission_id: None,
                target_id: None,
            })
            .collect()
    }

    /// Walk target links from `start` until returning to it, counting steps.
    fn steps_to_return(
        links: &BTreeMap<PlayerId, PlayerId>,
        start: PlayerId,
    ) -> Option<usize> {
        let mut current = start;
        for step in 1..=links.len() {
            current = *links.get(&current)?;
            if current == start {
                return Some(step);
            }
        }
        None
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let players = make_players(9);
        let mut rng = SmallRng::seed_from_u64(7);

        let shuffled = shuffled_ids(&mut rng, &players);

        let original: BTreeSet<PlayerId> = players.iter().map(|p| p.id).collect();
        let reordered: BTreeSet<PlayerId> = shuffled.iter().copied().collect();
        assert_eq!(original, reordered);
        assert_eq!(shuffled.len(), players.len());
    }

    #[test]
    fn shuffle_is_deterministic_per_seed() {
        let players = make_players(6);
        let first = shuffled_ids(&mut SmallRng::seed_from_u64(42), &players);
        let second = shuffled_ids(&mut SmallRng::seed_from_u64(42), &players);
        assert_eq!(first, second);
    }

    #[test]
    fn ring_closes_after_exactly_n_steps() {
        for n in 2..=10 {
            let players = make_players(n);
            let mut rng = SmallRng::seed_from_u64(1234);
            let order = shuffled_ids(&mut rng, &players);
            let ring = link_ring(&order);
            assert_eq!(ring.len(), n);

            let links: BTreeMap<PlayerId, PlayerId> = ring
                .iter()
                .map(|a| (a.player_id, a.target_id))
                .collect();

            for player in &players {
                assert_eq!(
                    steps_to_return(&links, player.id),
                    Some(n),
                    "cycle of {n} players must close after exactly {n} steps"
                );
            }
        }
    }

    #[test]
    fn ring_has_no_self_targets() {
        let players = make_players(5);
        let mut rng = SmallRng::seed_from_u64(99);
        let order = shuffled_ids(&mut rng, &players);

        for assignment in link_ring(&order) {
            assert_ne!(assignment.player_id, assignment.target_id);
        }
    }

    #[test]
    fn ring_covers_every_player_as_hunter_and_target() {
        let players = make_players(8);
        let mut rng = SmallRng::seed_from_u64(5);
        let order = shuffled_ids(&mut rng, &players);
        let ring = link_ring(&order);

        let hunters: BTreeSet<PlayerId> = ring.iter().map(|a| a.player_id).collect();
        let targets: BTreeSet<PlayerId> = ring.iter().map(|a| a.target_id).collect();
        let everyone: BTreeSet<PlayerId> = players.iter().map(|p| p.id).collect();
        assert_eq!(hunters, everyone);
        assert_eq!(targets, everyone);
    }

    #[test]
    fn fewer_than_two_players_yields_no_assignments() {
        assert!(link_ring(&[]).is_empty());
        assert!(link_ring(&[PlayerId::new()]).is_empty());
    }

    #[test]
    fn two_players_hunt_each_other() {
        let players = make_players(2);
        let order: Vec<PlayerId> = players.iter().map(|p| p.id).collect();
        let ring = link_ring(&order);
        assert_eq!(ring.len(), 2);

        let links: BTreeMap<PlayerId, PlayerId> =
            ring.iter().map(|a| (a.player_id, a.target_id)).collect();
        let (first, second) = (players.first(), players.get(1));
        let (Some(first), Some(second)) = (first, second) else {
            return;
        };
        assert_eq!(links.get(&first.id), Some(&second.id));
        assert_eq!(links.get(&second.id), Some(&first.id));
    }
}
