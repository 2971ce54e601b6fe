use serde::{Deserialize, Serialize};

pub type MovieId = u64;
pub type ActorId = u64;

/// Cast lists from the metadata service are truncated to this many entries.
pub const MAX_KNOWN_ACTORS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    pub name: String,
}

impl Actor {
    pub fn new(id: ActorId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub id: MovieId,
    pub title: String,
    #[serde(default)]
    pub year: Option<u16>,
    /// `None` when the cast has not been looked up yet.
    #[serde(default)]
    pub actors: Option<Vec<Actor>>,
}

impl MovieRecord {
    pub fn new(id: MovieId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            year: None,
            actors: None,
        }
    }

    pub fn with_actors(mut self, actors: Vec<Actor>) -> Self {
        self.actors = Some(actors);
        self
    }

    pub fn known_actor_count(&self) -> usize {
        self.actors
            .as_ref()
            .map(|actors| actors.len().min(MAX_KNOWN_ACTORS))
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoviePair {
    pub start: MovieRecord,
    pub target: MovieRecord,
}

/// One step of a submitted connection path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PathNode {
    Movie { id: MovieId, title: String },
    Actor { id: ActorId, name: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_actor_count_is_capped() {
        let actors = (0..14).map(|i| Actor::new(i, format!("Actor {}", i))).collect();
        let movie = MovieRecord::new(1, "Crowded").with_actors(actors);
        assert_eq!(movie.known_actor_count(), MAX_KNOWN_ACTORS);
        assert_eq!(MovieRecord::new(2, "Unknown").known_actor_count(), 0);
    }

    #[test]
    fn test_path_node_is_tagged() {
        let node = PathNode::Actor {
            id: 6384,
            name: "Keanu Reeves".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&node).unwrap(),
            r#"{"kind":"actor","id":6384,"name":"Keanu Reeves"}"#
        );
    }
}
