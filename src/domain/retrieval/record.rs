use serde::Serialize;

/// A record returned by a nearest-neighbor search. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetrievedRecord {
    pub id: String,
    pub text: String,
    /// Squared L2 distance to the query; smaller is closer
    pub distance: f32,
}

impl RetrievedRecord {
    pub fn new(id: impl Into<String>, text: impl Into<String>, distance: f32) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            distance,
        }
    }

    /// Similarity in (0, 1], derived from the distance
    pub fn similarity(&self) -> f32 {
        1.0 / (1.0 + self.distance.max(0.0))
    }
}
