/// Sprite lookup with procedural fallbacks.
///
/// A sprite is either text art read from `<dir>/<name>.txt` or a filled
/// primitive shape in a fixed colour. Missing or unreadable art is never an
/// error for the game: the fallback is substituted and a warning logged.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::entities::{EnemyTier, PowerUpKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpriteId {
    Spaceship,
    Alien10,
    Alien30,
    Alien50,
    Bullet,
    PowerUp,
    HeartPowerUp,
}

impl SpriteId {
    pub const ALL: [SpriteId; 7] = [
        SpriteId::Spaceship,
        SpriteId::Alien10,
        SpriteId::Alien30,
        SpriteId::Alien50,
        SpriteId::Bullet,
        SpriteId::PowerUp,
        SpriteId::HeartPowerUp,
    ];

    /// Logical asset name; also the art file stem.
    pub fn name(self) -> &'static str {
        match self {
            SpriteId::Spaceship => "spaceship",
            SpriteId::Alien10 => "alien1",
            SpriteId::Alien30 => "alien2",
            SpriteId::Alien50 => "alien3",
            SpriteId::Bullet => "bullet",
            SpriteId::PowerUp => "powerup",
            SpriteId::HeartPowerUp => "heart_powerup",
        }
    }

    pub fn for_enemy(tier: EnemyTier) -> Self {
        match tier {
            EnemyTier::Ten => SpriteId::Alien10,
            EnemyTier::Thirty => SpriteId::Alien30,
            EnemyTier::Fifty => SpriteId::Alien50,
        }
    }

    /// Speed and rapid fire share one sprite; hearts get their own.
    pub fn for_power_up(kind: PowerUpKind) -> Self {
        match kind {
            PowerUpKind::Speed | PowerUpKind::RapidFire => SpriteId::PowerUp,
            PowerUpKind::Heart => SpriteId::HeartPowerUp,
        }
    }
}

// ── Fallback primitives ───────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const BLUE: Rgb = Rgb(0, 0, 255);
pub const GREEN: Rgb = Rgb(0, 255, 0);
pub const RED: Rgb = Rgb(255, 0, 0);
pub const CYAN: Rgb = Rgb(0, 255, 255);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    /// Apex at top-center, base along the bottom edge.
    Triangle,
    /// Inscribed in the bounding box.
    Circle,
    Rectangle,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Sprite {
    /// Text art, one string per row, drawn from the top-left of the box.
    Art(Vec<String>),
    Fallback { shape: Shape, color: Rgb },
}

/// The documented stand-in for each sprite.
pub fn fallback(id: SpriteId) -> Sprite {
    let (shape, color) = match id {
        SpriteId::Spaceship => (Shape::Triangle, BLUE),
        SpriteId::Alien10 => (Shape::Circle, GREEN),
        SpriteId::Alien30 => (Shape::Circle, RED),
        SpriteId::Alien50 => (Shape::Circle, BLUE),
        SpriteId::Bullet => (Shape::Rectangle, RED),
        SpriteId::PowerUp => (Shape::Rectangle, CYAN),
        SpriteId::HeartPowerUp => (Shape::Circle, RED),
    };
    Sprite::Fallback { shape, color }
}

// ── Loading ───────────────────────────────────────────────────────────────────

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{path} contains no art")]
    Empty { path: PathBuf },
}

pub trait AssetProvider {
    fn sprite(&self, id: SpriteId) -> &Sprite;
}

#[derive(Clone, Debug)]
pub struct AssetLibrary {
    sprites: HashMap<SpriteId, Sprite>,
}

impl AssetLibrary {
    /// Every sprite set to its fallback.
    pub fn fallbacks() -> Self {
        Self {
            sprites: SpriteId::ALL.iter().map(|&id| (id, fallback(id))).collect(),
        }
    }

    /// Load art from `dir` where available, falling back per sprite.
    pub fn load(dir: Option<&Path>) -> Self {
        let mut library = Self::fallbacks();
        let Some(dir) = dir else {
            return library;
        };
        for id in SpriteId::ALL {
            let path = dir.join(format!("{}.txt", id.name()));
            match load_art(&path) {
                Ok(rows) => {
                    debug!(asset = id.name(), rows = rows.len(), "loaded sprite art");
                    library.sprites.insert(id, Sprite::Art(rows));
                }
                Err(e) => warn!(asset = id.name(), "{e}; using fallback shape"),
            }
        }
        library
    }

    pub fn is_fallback(&self, id: SpriteId) -> bool {
        matches!(self.sprites.get(&id), None | Some(Sprite::Fallback { .. }))
    }
}

impl AssetProvider for AssetLibrary {
    fn sprite(&self, id: SpriteId) -> &Sprite {
        // Built from SpriteId::ALL, so every id is present.
        &self.sprites[&id]
    }
}

/// Read a text-art file, dropping trailing blank lines.
pub fn load_art(path: &Path) -> Result<Vec<String>, AssetError> {
    let text = fs::read_to_string(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut rows: Vec<String> = text.lines().map(|l| l.trim_end().to_string()).collect();
    while rows.last().is_some_and(|r| r.is_empty()) {
        rows.pop();
    }
    if rows.is_empty() {
        return Err(AssetError::Empty {
            path: path.to_path_buf(),
        });
    }
    Ok(rows)
}
