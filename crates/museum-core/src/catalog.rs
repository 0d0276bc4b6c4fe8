//! Static exhibit catalog: where each frame hangs and where its trigger sits.
//!
//! The catalog is ordered; the proximity detector walks it in this order every
//! frame. Validation happens once, here, so per-frame distance checks never see
//! a non-finite coordinate.

use crate::constants::{CENTER_TRIGGER_STANDOFF, TRIGGER_WALL_INSET};
use fnv::FnvHashMap;
use glam::Vec2;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("parse catalog TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("exhibit #{index} has an empty id")]
    EmptyId { index: usize },
    #[error("duplicate exhibit id `{0}`")]
    DuplicateId(String),
    #[error("exhibit `{id}` has a non-finite coordinate")]
    NonFinite { id: String },
}

/// Which wall a frame hangs on; decides trigger placement and zoom geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WallSide {
    Left,
    Right,
    Center,
}

impl WallSide {
    /// Trigger point for a frame at `frame` (x, z) on this wall.
    #[must_use]
    pub fn default_trigger(self, frame: Vec2) -> Vec2 {
        match self {
            WallSide::Left => Vec2::new(-TRIGGER_WALL_INSET, frame.y),
            WallSide::Right => Vec2::new(TRIGGER_WALL_INSET, frame.y),
            WallSide::Center => Vec2::new(frame.x, frame.y + CENTER_TRIGGER_STANDOFF),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExhibitDescriptor {
    pub id: String,
    /// Frame center on the floor plane `(x, z)`.
    pub frame_position: Vec2,
    /// Center of the activation circle `(x, z)`.
    pub trigger_position: Vec2,
    pub wall: WallSide,
}

impl ExhibitDescriptor {
    /// Frame on `wall` with its trigger at the standard rope-line position.
    pub fn on_wall(id: impl Into<String>, frame_position: Vec2, wall: WallSide) -> Self {
        Self {
            id: id.into(),
            frame_position,
            trigger_position: wall.default_trigger(frame_position),
            wall,
        }
    }

    #[must_use]
    pub fn with_trigger(mut self, trigger_position: Vec2) -> Self {
        self.trigger_position = trigger_position;
        self
    }

    fn is_finite(&self) -> bool {
        self.frame_position.is_finite() && self.trigger_position.is_finite()
    }
}

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default, rename = "exhibit")]
    exhibits: Vec<CatalogEntry>,
}

#[derive(Deserialize)]
struct CatalogEntry {
    id: String,
    position: [f32; 2],
    wall: WallSide,
    trigger: Option<[f32; 2]>,
}

impl From<CatalogEntry> for ExhibitDescriptor {
    fn from(e: CatalogEntry) -> Self {
        let d = ExhibitDescriptor::on_wall(e.id, Vec2::from(e.position), e.wall);
        match e.trigger {
            Some(t) => d.with_trigger(Vec2::from(t)),
            None => d,
        }
    }
}

/// Ordered, id-indexed, read-only list of exhibits.
#[derive(Clone, Debug, Default)]
pub struct ExhibitCatalog {
    exhibits: Vec<ExhibitDescriptor>,
    index: FnvHashMap<String, usize>,
}

impl ExhibitCatalog {
    pub fn new(exhibits: Vec<ExhibitDescriptor>) -> Result<Self, CatalogError> {
        let mut index = FnvHashMap::default();
        for (i, e) in exhibits.iter().enumerate() {
            if e.id.trim().is_empty() {
                return Err(CatalogError::EmptyId { index: i });
            }
            if !e.is_finite() {
                return Err(CatalogError::NonFinite { id: e.id.clone() });
            }
            if index.insert(e.id.clone(), i).is_some() {
                return Err(CatalogError::DuplicateId(e.id.clone()));
            }
        }
        Ok(Self { exhibits, index })
    }

    /// Parse `[[exhibit]]` tables:
    ///
    /// ```toml
    /// [[exhibit]]
    /// id = "first-light"
    /// position = [-3.5, 1.5]
    /// wall = "left"
    /// # trigger = [-2.1, 1.5]   # optional override
    /// ```
    pub fn from_toml_str(text: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(text)?;
        Self::new(file.exhibits.into_iter().map(Into::into).collect())
    }

    /// The stock twelve-frame corridor: six frames per side wall, 3.5 apart.
    pub fn default_gallery() -> Self {
        const LEFT: [(&str, f32); 6] = [
            ("stanford-selection", 1.5),
            ("oracle-data-science", -2.0),
            ("ycombinator-selection", -5.5),
            ("microsoft-internship", -9.0),
            ("open-source-contributor", -12.5),
            ("ai-research-publication", -16.0),
        ];
        const RIGHT: [(&str, f32); 6] = [
            ("drexel-selection", 1.5),
            ("oracle-genai", -2.0),
            ("hackeverse-organizer", -5.5),
            ("ai-projects-portfolio", -9.0),
            ("founder-saas", -12.5),
            ("google-ai-ambassador", -16.0),
        ];
        let left = LEFT
            .iter()
            .map(|&(id, z)| ExhibitDescriptor::on_wall(id, Vec2::new(-3.5, z), WallSide::Left));
        let right = RIGHT
            .iter()
            .map(|&(id, z)| ExhibitDescriptor::on_wall(id, Vec2::new(3.5, z), WallSide::Right));
        let exhibits: Vec<_> = left.chain(right).collect();
        let index = exhibits
            .iter()
            .enumerate()
            .map(|(i, e)| (e.id.clone(), i))
            .collect();
        Self { exhibits, index }
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ExhibitDescriptor> {
        self.index.get(id).map(|&i| &self.exhibits[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExhibitDescriptor> {
        self.exhibits.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[ExhibitDescriptor] {
        &self.exhibits
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.exhibits.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exhibits.is_empty()
    }
}
