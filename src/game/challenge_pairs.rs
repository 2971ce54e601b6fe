//! Daily challenge pairs shipped with the game.
//!
//! The order is significant: the pair for a date is chosen by
//! `days_since_epoch(date) % len`, so appending is safe but reordering changes
//! every future day's challenge.

use crate::model::{Actor, MoviePair, MovieRecord};

struct BundledMovie {
    id: u64,
    title: &'static str,
    year: u16,
    actors: &'static [(u64, &'static str)],
}

const THE_MATRIX: BundledMovie = BundledMovie {
    id: 603,
    title: "The Matrix",
    year: 1999,
    actors: &[
        (6384, "Keanu Reeves"),
        (2975, "Laurence Fishburne"),
        (530, "Carrie-Anne Moss"),
        (1331, "Hugo Weaving"),
    ],
};

const INCEPTION: BundledMovie = BundledMovie {
    id: 27205,
    title: "Inception",
    year: 2010,
    actors: &[
        (6193, "Leonardo DiCaprio"),
        (24045, "Joseph Gordon-Levitt"),
        (2524, "Tom Hardy"),
        (3895, "Michael Caine"),
        (2037, "Cillian Murphy"),
    ],
};

const TITANIC: BundledMovie = BundledMovie {
    id: 597,
    title: "Titanic",
    year: 1997,
    actors: &[
        (6193, "Leonardo DiCaprio"),
        (204, "Kate Winslet"),
        (1954, "Billy Zane"),
    ],
};

const THE_DARK_KNIGHT: BundledMovie = BundledMovie {
    id: 155,
    title: "The Dark Knight",
    year: 2008,
    actors: &[
        (3894, "Christian Bale"),
        (1810, "Heath Ledger"),
        (3895, "Michael Caine"),
        (64, "Gary Oldman"),
        (6383, "Aaron Eckhart"),
    ],
};

const PULP_FICTION: BundledMovie = BundledMovie {
    id: 680,
    title: "Pulp Fiction",
    year: 1994,
    actors: &[
        (8891, "John Travolta"),
        (2231, "Samuel L. Jackson"),
        (139, "Uma Thurman"),
        (62, "Bruce Willis"),
    ],
};

const JURASSIC_PARK: BundledMovie = BundledMovie {
    id: 329,
    title: "Jurassic Park",
    year: 1993,
    actors: &[
        (4783, "Sam Neill"),
        (4784, "Laura Dern"),
        (4785, "Jeff Goldblum"),
        (2231, "Samuel L. Jackson"),
    ],
};

const FIGHT_CLUB: BundledMovie = BundledMovie {
    id: 550,
    title: "Fight Club",
    year: 1999,
    actors: &[
        (287, "Brad Pitt"),
        (819, "Edward Norton"),
        (1283, "Helena Bonham Carter"),
    ],
};

const THE_SHAWSHANK_REDEMPTION: BundledMovie = BundledMovie {
    id: 278,
    title: "The Shawshank Redemption",
    year: 1994,
    actors: &[(504, "Tim Robbins"), (192, "Morgan Freeman")],
};

const FORREST_GUMP: BundledMovie = BundledMovie {
    id: 13,
    title: "Forrest Gump",
    year: 1994,
    actors: &[(31, "Tom Hanks"), (32, "Robin Wright"), (33, "Gary Sinise")],
};

const THE_DEPARTED: BundledMovie = BundledMovie {
    id: 1422,
    title: "The Departed",
    year: 2006,
    actors: &[
        (6193, "Leonardo DiCaprio"),
        (1892, "Matt Damon"),
        (514, "Jack Nicholson"),
    ],
};

const SE7EN: BundledMovie = BundledMovie {
    id: 807,
    title: "Se7en",
    year: 1995,
    actors: &[
        (287, "Brad Pitt"),
        (192, "Morgan Freeman"),
        (1979, "Kevin Spacey"),
    ],
};

const INTERSTELLAR: BundledMovie = BundledMovie {
    id: 157336,
    title: "Interstellar",
    year: 2014,
    actors: &[
        (10297, "Matthew McConaughey"),
        (1813, "Anne Hathaway"),
        (83002, "Jessica Chastain"),
        (3895, "Michael Caine"),
    ],
};

const THE_GODFATHER: BundledMovie = BundledMovie {
    id: 238,
    title: "The Godfather",
    year: 1972,
    actors: &[
        (3084, "Marlon Brando"),
        (1158, "Al Pacino"),
        (3085, "James Caan"),
    ],
};

const GOODFELLAS: BundledMovie = BundledMovie {
    id: 769,
    title: "GoodFellas",
    year: 1990,
    actors: &[
        (380, "Robert De Niro"),
        (11477, "Ray Liotta"),
        (4517, "Joe Pesci"),
    ],
};

const HEAT: BundledMovie = BundledMovie {
    id: 949,
    title: "Heat",
    year: 1995,
    actors: &[
        (1158, "Al Pacino"),
        (380, "Robert De Niro"),
        (5576, "Val Kilmer"),
    ],
};

const GLADIATOR: BundledMovie = BundledMovie {
    id: 98,
    title: "Gladiator",
    year: 2000,
    actors: &[
        (934, "Russell Crowe"),
        (73421, "Joaquin Phoenix"),
        (935, "Connie Nielsen"),
    ],
};

const SAVING_PRIVATE_RYAN: BundledMovie = BundledMovie {
    id: 857,
    title: "Saving Private Ryan",
    year: 1998,
    actors: &[
        (31, "Tom Hanks"),
        (1892, "Matt Damon"),
        (3197, "Tom Sizemore"),
    ],
};

const JOHN_WICK: BundledMovie = BundledMovie {
    id: 245891,
    title: "John Wick",
    year: 2014,
    actors: &[(6384, "Keanu Reeves"), (6837, "Michael Nyqvist")],
};

const PAIRS: &[(BundledMovie, BundledMovie)] = &[
    (THE_MATRIX, INCEPTION),
    (TITANIC, THE_DARK_KNIGHT),
    (PULP_FICTION, JURASSIC_PARK),
    (FIGHT_CLUB, THE_SHAWSHANK_REDEMPTION),
    (FORREST_GUMP, THE_DEPARTED),
    (SE7EN, INTERSTELLAR),
    (THE_GODFATHER, GOODFELLAS),
    (HEAT, GLADIATOR),
    (SAVING_PRIVATE_RYAN, TITANIC),
    (JOHN_WICK, THE_DARK_KNIGHT),
];

impl BundledMovie {
    fn to_record(&self) -> MovieRecord {
        let actors = self
            .actors
            .iter()
            .map(|&(id, name)| Actor::new(id, name))
            .collect();
        MovieRecord {
            year: Some(self.year),
            ..MovieRecord::new(self.id, self.title).with_actors(actors)
        }
    }
}

pub fn bundled_pairs() -> Vec<MoviePair> {
    PAIRS
        .iter()
        .map(|(start, target)| MoviePair {
            start: start.to_record(),
            target: target.to_record(),
        })
        .collect()
}
