//! Shared entity data: bounding boxes, the common entity base, and the
//! small tag enums the rest of the game dispatches on.

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned bounding box in logical units. `x`/`y` is the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn center_x(&self) -> i32 {
        self.x + self.w / 2
    }

    /// True when the two boxes share a non-empty intersection.
    /// Boxes that only touch along an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

// ── Entity base ───────────────────────────────────────────────────────────────

/// Position, size, velocity and lifecycle flag common to every moving object.
#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    pub rect: Rect,
    pub dx: i32,
    pub dy: i32,
    pub alive: bool,
}

impl Entity {
    pub fn new(rect: Rect, dx: i32, dy: i32) -> Self {
        Self {
            rect,
            dx,
            dy,
            alive: true,
        }
    }

    /// Apply one tick of velocity.
    pub fn advance(&mut self) {
        self.rect.x += self.dx;
        self.rect.y += self.dy;
    }

    pub fn kill(&mut self) {
        self.alive = false;
    }
}

// ── Tags ──────────────────────────────────────────────────────────────────────

/// Enemy point tiers. Higher tiers descend faster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnemyTier {
    Ten,
    Thirty,
    Fifty,
}

impl EnemyTier {
    pub const ALL: [EnemyTier; 3] = [EnemyTier::Ten, EnemyTier::Thirty, EnemyTier::Fifty];

    pub fn points(self) -> u32 {
        match self {
            EnemyTier::Ten => 10,
            EnemyTier::Thirty => 30,
            EnemyTier::Fifty => 50,
        }
    }

    /// Descent speed at the reference resolution, before vertical scaling.
    pub fn base_speed(self) -> i32 {
        match self {
            EnemyTier::Ten => 2,
            EnemyTier::Thirty => 3,
            EnemyTier::Fifty => 4,
        }
    }

    /// How many enemies of this tier a full wave holds.
    pub fn wave_count(self) -> usize {
        match self {
            EnemyTier::Ten => 5,
            EnemyTier::Thirty => 3,
            EnemyTier::Fifty => 2,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PowerUpKind {
    /// Doubles the player's speed for a while.
    Speed,
    /// Drops the shot cooldown to 5 ticks for a while.
    RapidFire,
    /// One extra life, up to the maximum.
    Heart,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [PowerUpKind::Speed, PowerUpKind::RapidFire, PowerUpKind::Heart];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Menu,
    Playing,
    GameOver,
    Victory,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuOption {
    NewGame,
    HighScore,
    Exit,
}

impl MenuOption {
    pub const ALL: [MenuOption; 3] = [MenuOption::NewGame, MenuOption::HighScore, MenuOption::Exit];

    pub fn label(self) -> &'static str {
        match self {
            MenuOption::NewGame => "New Game",
            MenuOption::HighScore => "High Score",
            MenuOption::Exit => "Exit",
        }
    }
}
