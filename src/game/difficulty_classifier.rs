use std::cell::RefCell;

use log::{debug, warn};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

use crate::metadata::MovieMetadata;
use crate::model::{Difficulty, MovieRecord, MAX_KNOWN_ACTORS};

/// Actor count at which the classification roll is not nudged at all.
const FULL_CAST: usize = 2 * MAX_KNOWN_ACTORS;
const NUDGE_SCALE: f64 = 200.0;

const BASE_XP: u64 = 10;
const PAR_MOVES: u32 = 6;
const XP_PER_MOVE_UNDER_PAR: u64 = 5;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClassificationError {
    #[error("movie record has no id (title {0:?})")]
    MissingId(String),
}

/// XP for a win: `floor((10 + max(0, (6 - moves) * 5)) * multiplier)`.
///
/// A win always takes at least one move; zero is treated as one.
pub fn xp_for(moves: u32, difficulty: Difficulty) -> u64 {
    xp_with_multiplier(moves, difficulty.xp_multiplier())
}

pub(crate) fn xp_with_multiplier(moves: u32, multiplier: f64) -> u64 {
    let moves = moves.max(1);
    let bonus = PAR_MOVES.saturating_sub(moves) as u64 * XP_PER_MOVE_UNDER_PAR;
    ((BASE_XP + bonus) as f64 * multiplier).floor() as u64
}

fn validate(movie: &MovieRecord) -> Result<(), ClassificationError> {
    if movie.id == 0 {
        return Err(ClassificationError::MissingId(movie.title.clone()));
    }
    Ok(())
}

/// Sparse cast data pushes the roll down, towards HARD, by up to 0.1.
fn nudge(movie_a: &MovieRecord, movie_b: &MovieRecord) -> f64 {
    let actor_count = movie_a.known_actor_count() + movie_b.known_actor_count();
    (actor_count as f64 - FULL_CAST as f64) / NUDGE_SCALE
}

pub fn try_classify_with_rng<R: Rng + ?Sized>(
    movie_a: &MovieRecord,
    movie_b: &MovieRecord,
    rng: &mut R,
) -> Result<Difficulty, ClassificationError> {
    validate(movie_a)?;
    validate(movie_b)?;
    let roll = rng.random::<f64>() + nudge(movie_a, movie_b);
    Ok(Difficulty::from_roll(roll))
}

/// Classifies a pair; malformed records fall back to MEDIUM.
pub fn classify_with_rng<R: Rng + ?Sized>(
    movie_a: &MovieRecord,
    movie_b: &MovieRecord,
    rng: &mut R,
) -> Difficulty {
    match try_classify_with_rng(movie_a, movie_b, rng) {
        Ok(difficulty) => {
            debug!(
                target: "difficulty",
                "{} / {} classified as {}",
                movie_a.title,
                movie_b.title,
                difficulty
            );
            difficulty
        }
        Err(e) => {
            warn!(target: "difficulty", "Falling back to MEDIUM: {}", e);
            Difficulty::Medium
        }
    }
}

pub struct DifficultyClassifier {
    seed: u64,
    rng: RefCell<StdRng>,
}

impl DifficultyClassifier {
    pub fn new(seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(|| rand::rng().next_u64());
        Self {
            seed,
            rng: RefCell::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn classify(&self, movie_a: &MovieRecord, movie_b: &MovieRecord) -> Difficulty {
        classify_with_rng(movie_a, movie_b, &mut *self.rng.borrow_mut())
    }

    /// Looks up missing casts before classifying. Lookup failures count as an
    /// empty cast.
    pub fn classify_with_metadata(
        &self,
        movie_a: &MovieRecord,
        movie_b: &MovieRecord,
        metadata: &dyn MovieMetadata,
    ) -> Difficulty {
        let movie_a = enrich(movie_a, metadata);
        let movie_b = enrich(movie_b, metadata);
        self.classify(&movie_a, &movie_b)
    }
}

fn enrich(movie: &MovieRecord, metadata: &dyn MovieMetadata) -> MovieRecord {
    if movie.actors.is_some() || movie.id == 0 {
        return movie.clone();
    }
    let actors = metadata.actors_for_movie(movie.id).unwrap_or_else(|e| {
        warn!(target: "difficulty", "Cast lookup for {} failed: {}", movie.id, e);
        Vec::new()
    });
    movie.clone().with_actors(actors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MetadataError;
    use crate::model::{Actor, ActorId, MovieId};
    use std::cell::Cell;

    fn movie_with_cast(id: MovieId, cast: usize) -> MovieRecord {
        let actors = (0..cast as u64)
            .map(|i| Actor::new(id * 100 + i, format!("Actor {}", i)))
            .collect();
        MovieRecord::new(id, format!("Movie {}", id)).with_actors(actors)
    }

    /// Always yields the same word, so every f64 drawn is (almost) `value`.
    struct FixedRoll(u64);

    impl RngCore for FixedRoll {
        fn next_u32(&mut self) -> u32 {
            (self.0 >> 32) as u32
        }

        fn next_u64(&mut self) -> u64 {
            self.0
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            for chunk in dest.chunks_mut(8) {
                chunk.copy_from_slice(&self.0.to_le_bytes()[..chunk.len()]);
            }
        }
    }

    fn rng_rolling(value: f64) -> FixedRoll {
        // random::<f64>() uses the top 53 bits of next_u64()
        FixedRoll(((value * (1u64 << 53) as f64) as u64) << 11)
    }

    #[test]
    fn test_xp_formula() {
        assert_eq!(xp_for(2, Difficulty::Easy), 30);
        assert_eq!(xp_for(1, Difficulty::Easy), 35);
        assert_eq!(xp_for(6, Difficulty::Easy), 10);
        assert_eq!(xp_for(9, Difficulty::Easy), 10);
        assert_eq!(xp_for(3, Difficulty::Medium), 37);
        assert_eq!(xp_for(4, Difficulty::Hard), 50);
        assert_eq!(xp_for(0, Difficulty::Easy), xp_for(1, Difficulty::Easy));
    }

    #[test]
    fn test_full_cast_is_not_nudged() {
        let a = movie_with_cast(1, 10);
        let b = movie_with_cast(2, 12);
        assert_eq!(nudge(&a, &b), 0.0);
        assert_eq!(
            classify_with_rng(&a, &b, &mut rng_rolling(0.56)),
            Difficulty::Easy
        );
        assert_eq!(
            classify_with_rng(&a, &b, &mut rng_rolling(0.3)),
            Difficulty::Medium
        );
        assert_eq!(
            classify_with_rng(&a, &b, &mut rng_rolling(0.1)),
            Difficulty::Hard
        );
    }

    #[test]
    fn test_sparse_cast_biases_towards_hard() {
        let a = MovieRecord::new(1, "Unknown A");
        let b = MovieRecord::new(2, "Unknown B");
        assert!((nudge(&a, &b) + 0.1).abs() < 1e-12);
        // 0.6 would be EASY with a full cast
        assert_eq!(
            classify_with_rng(&a, &b, &mut rng_rolling(0.6)),
            Difficulty::Medium
        );
        assert_eq!(
            classify_with_rng(&a, &b, &mut rng_rolling(0.25)),
            Difficulty::Hard
        );
    }

    #[test]
    fn test_malformed_record_falls_back_to_medium() {
        let a = MovieRecord::new(0, "No id");
        let b = movie_with_cast(2, 10);
        assert_eq!(
            try_classify_with_rng(&a, &b, &mut rng_rolling(0.9)),
            Err(ClassificationError::MissingId("No id".to_string()))
        );
        assert_eq!(
            classify_with_rng(&a, &b, &mut rng_rolling(0.9)),
            Difficulty::Medium
        );
    }

    #[test]
    fn test_seeded_classifier_is_reproducible() {
        let a = movie_with_cast(1, 3);
        let b = movie_with_cast(2, 7);
        let first = DifficultyClassifier::new(Some(42));
        let second = DifficultyClassifier::new(Some(42));
        for _ in 0..20 {
            assert_eq!(first.classify(&a, &b), second.classify(&a, &b));
        }
    }

    #[test]
    fn test_distribution_roughly_matches_targets() {
        let classifier = DifficultyClassifier::new(Some(7));
        let a = movie_with_cast(1, 10);
        let b = movie_with_cast(2, 10);
        let mut counts = [0usize; 3];
        for _ in 0..10_000 {
            match classifier.classify(&a, &b) {
                Difficulty::Easy => counts[0] += 1,
                Difficulty::Medium => counts[1] += 1,
                Difficulty::Hard => counts[2] += 1,
            }
        }
        assert!((4_200..4_800).contains(&counts[0]), "{:?}", counts);
        assert!((3_200..3_800).contains(&counts[1]), "{:?}", counts);
        assert!((1_700..2_300).contains(&counts[2]), "{:?}", counts);
    }

    struct CountingMetadata {
        lookups: Cell<usize>,
        fail: bool,
    }

    impl MovieMetadata for CountingMetadata {
        fn actors_for_movie(&self, movie_id: MovieId) -> Result<Vec<Actor>, MetadataError> {
            self.lookups.set(self.lookups.get() + 1);
            if self.fail {
                return Err(MetadataError::Unavailable("offline".to_string()));
            }
            Ok(movie_with_cast(movie_id, 10).actors.unwrap_or_default())
        }

        fn movies_for_actor(&self, _actor_id: ActorId) -> Result<Vec<MovieRecord>, MetadataError> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_metadata_only_fetched_for_unknown_casts() {
        let metadata = CountingMetadata {
            lookups: Cell::new(0),
            fail: false,
        };
        let classifier = DifficultyClassifier::new(Some(1));
        classifier.classify_with_metadata(
            &MovieRecord::new(1, "Unknown"),
            &movie_with_cast(2, 4),
            &metadata,
        );
        assert_eq!(metadata.lookups.get(), 1);

        let enriched = enrich(&MovieRecord::new(3, "Unknown"), &metadata);
        assert_eq!(enriched.known_actor_count(), 10);
    }

    #[test]
    fn test_metadata_failure_counts_as_empty_cast() {
        let metadata = CountingMetadata {
            lookups: Cell::new(0),
            fail: true,
        };
        let enriched = enrich(&MovieRecord::new(3, "Unknown"), &metadata);
        assert_eq!(enriched.actors, Some(Vec::new()));
    }
}
