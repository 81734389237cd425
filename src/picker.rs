//! Constrained random sampling over the song catalog.
//!
//! Filtering always runs in the same order: blacklist first, then the
//! favorites switch, then the level range. Whatever survives is shuffled and
//! cut down to the requested count. Nothing in here can fail; contradictory
//! criteria simply leave nothing to pick from.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

use crate::models::{SelectionCriteria, Song};

/// Whether a single song passes every filter in `criteria`.
pub fn is_eligible(song: &Song, criteria: &SelectionCriteria) -> bool {
    if song.is_blacklisted {
        return false;
    }
    if criteria.only_favorites && !song.is_favorite {
        return false;
    }
    let min_ok = criteria.min_level.map_or(true, |min| song.level >= min);
    let max_ok = criteria.max_level.map_or(true, |max| song.level <= max);
    min_ok && max_ok
}

/// Draw up to `criteria.count` distinct songs using the supplied random
/// source. Every permutation of the eligible songs is equally likely, so the
/// result is a uniform sample without replacement.
pub fn pick_with<R: Rng + ?Sized>(
    songs: &[Song],
    criteria: &SelectionCriteria,
    rng: &mut R,
) -> Vec<Song> {
    let mut eligible: Vec<Song> = songs
        .iter()
        .filter(|song| is_eligible(song, criteria))
        .cloned()
        .collect();

    if eligible.is_empty() {
        return eligible;
    }

    let count = criteria.count.min(eligible.len());
    eligible.shuffle(rng);
    eligible.truncate(count);
    eligible
}

/// Same as [`pick_with`], seeded from the wall clock on every call.
pub fn pick(songs: &[Song], criteria: &SelectionCriteria) -> Vec<Song> {
    let mut rng = time_seeded_rng();
    pick_with(songs, criteria, &mut rng)
}

fn time_seeded_rng() -> Pcg64 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default();
    Pcg64::seed_from_u64(nanos)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use pretty_assertions::assert_eq;

    use super::*;

    fn song(id: i64, level: u32, is_favorite: bool, is_blacklisted: bool) -> Song {
        Song {
            id,
            title: format!("Song {id}"),
            artist: String::new(),
            chart: String::new(),
            link: String::new(),
            level,
            is_favorite,
            is_blacklisted,
            color: "#BAE1FF".into(),
        }
    }

    fn sample_catalog() -> Vec<Song> {
        vec![
            song(1, 5, false, false),
            song(2, 8, false, true),
            song(3, 3, true, false),
        ]
    }

    fn sorted_ids(songs: &[Song]) -> Vec<i64> {
        let mut ids: Vec<i64> = songs.iter().map(|s| s.id).collect();
        ids.sort_unstable();
        ids
    }

    fn wide_catalog() -> Vec<Song> {
        (1..=40)
            .map(|id| song(id, (id % 15) as u32 + 1, id % 3 == 0, id % 7 == 0))
            .collect()
    }

    #[test]
    fn unset_bounds_keep_everything_but_the_blacklist() {
        let criteria = SelectionCriteria::from_bounds(0, 0, false, 5);
        let result = pick(&sample_catalog(), &criteria);
        assert_eq!(sorted_ids(&result), vec![1, 3]);
    }

    #[test]
    fn favorites_only_returns_favorites() {
        let criteria = SelectionCriteria {
            only_favorites: true,
            count: 5,
            ..SelectionCriteria::default()
        };
        let result = pick(&sample_catalog(), &criteria);
        assert_eq!(sorted_ids(&result), vec![3]);
    }

    #[test]
    fn level_range_narrows_to_single_song() {
        let criteria = SelectionCriteria::from_bounds(4, 10, false, 1);
        let result = pick(&sample_catalog(), &criteria);
        assert_eq!(sorted_ids(&result), vec![1]);
    }

    #[test]
    fn one_sided_bounds() {
        let catalog = sample_catalog();
        let at_least_four = SelectionCriteria {
            min_level: Some(4),
            count: 10,
            ..SelectionCriteria::default()
        };
        assert_eq!(sorted_ids(&pick(&catalog, &at_least_four)), vec![1]);

        let at_most_four = SelectionCriteria {
            max_level: Some(4),
            count: 10,
            ..SelectionCriteria::default()
        };
        assert_eq!(sorted_ids(&pick(&catalog, &at_most_four)), vec![3]);
    }

    #[test]
    fn bounds_are_inclusive() {
        let criteria = SelectionCriteria::from_bounds(5, 5, false, 10);
        assert_eq!(sorted_ids(&pick(&sample_catalog(), &criteria)), vec![1]);
    }

    #[test]
    fn inverted_range_yields_nothing() {
        let criteria = SelectionCriteria::from_bounds(10, 2, false, 10);
        assert!(pick(&sample_catalog(), &criteria).is_empty());
    }

    #[test]
    fn empty_catalog_yields_nothing() {
        assert!(pick(&[], &SelectionCriteria::default()).is_empty());
    }

    #[test]
    fn zero_count_yields_nothing() {
        let criteria = SelectionCriteria {
            count: 0,
            ..SelectionCriteria::default()
        };
        assert!(pick(&sample_catalog(), &criteria).is_empty());
    }

    #[test]
    fn blacklist_wins_over_favorite() {
        let catalog = vec![song(1, 5, true, true), song(2, 5, true, false)];
        let criteria = SelectionCriteria {
            only_favorites: true,
            count: 10,
            ..SelectionCriteria::default()
        };
        assert_eq!(sorted_ids(&pick(&catalog, &criteria)), vec![2]);
    }

    #[test]
    fn result_obeys_filters_count_and_uniqueness() {
        let catalog = wide_catalog();
        for seed in 0..50u64 {
            let mut rng = Pcg64::seed_from_u64(seed);
            let criteria = SelectionCriteria {
                min_level: Some(3),
                max_level: Some(12),
                only_favorites: seed % 2 == 0,
                count: (seed % 9) as usize + 1,
            };
            let eligible = catalog
                .iter()
                .filter(|s| is_eligible(s, &criteria))
                .count();
            let result = pick_with(&catalog, &criteria, &mut rng);

            assert_eq!(result.len(), criteria.count.min(eligible));
            let unique: HashSet<i64> = result.iter().map(|s| s.id).collect();
            assert_eq!(unique.len(), result.len());
            for picked in &result {
                assert!(!picked.is_blacklisted);
                assert!((3..=12).contains(&picked.level));
                if criteria.only_favorites {
                    assert!(picked.is_favorite);
                }
            }
        }
    }

    #[test]
    fn large_count_returns_the_whole_eligible_set() {
        let catalog = wide_catalog();
        let criteria = SelectionCriteria {
            count: 1_000,
            ..SelectionCriteria::default()
        };
        let expected: Vec<i64> = catalog
            .iter()
            .filter(|s| !s.is_blacklisted)
            .map(|s| s.id)
            .collect();

        let mut first = Pcg64::seed_from_u64(1);
        let mut second = Pcg64::seed_from_u64(2);
        let a = pick_with(&catalog, &criteria, &mut first);
        let b = pick_with(&catalog, &criteria, &mut second);

        assert_eq!(sorted_ids(&a), expected);
        assert_eq!(sorted_ids(&b), expected);
        assert_ne!(
            a.iter().map(|s| s.id).collect::<Vec<_>>(),
            b.iter().map(|s| s.id).collect::<Vec<_>>(),
            "different seeds should shuffle 35 songs differently"
        );
    }

    #[test]
    fn fixed_seed_reproduces_the_same_pick() {
        let catalog = wide_catalog();
        let criteria = SelectionCriteria {
            count: 5,
            ..SelectionCriteria::default()
        };
        let a = pick_with(&catalog, &criteria, &mut Pcg64::seed_from_u64(42));
        let b = pick_with(&catalog, &criteria, &mut Pcg64::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn input_is_left_untouched() {
        let catalog = wide_catalog();
        let snapshot = catalog.clone();
        let _ = pick(&catalog, &SelectionCriteria::default());
        assert_eq!(catalog, snapshot);
    }
}
