//! Decorative parallax background
//!
//! Nothing here affects gameplay. Clouds and background symbols drift on
//! their own and keep moving between runs; hills and the floor grid are tied
//! to the scroll speed and only move while a run is active.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;

const CLOUD_COUNT: usize = 5;
const HILL_COUNT: usize = 3;
const SYMBOL_COUNT: usize = 50;

/// Hills scroll at this fraction of the world speed
const HILL_PARALLAX: f32 = 0.3;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cloud {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
}

impl Cloud {
    fn new(rng: &mut impl Rng) -> Self {
        let mut cloud = Self {
            pos: Vec2::ZERO,
            width: 0.0,
            height: 0.0,
            speed: 0.0,
        };
        cloud.respawn(rng);
        cloud.pos.x = rng.random::<f32>() * GAME_WIDTH;
        cloud
    }

    fn respawn(&mut self, rng: &mut impl Rng) {
        self.pos = Vec2::new(
            GAME_WIDTH + 100.0,
            rng.random::<f32>() * (GROUND_Y - 150.0),
        );
        self.width = rng.random::<f32>() * 60.0 + 40.0;
        self.height = self.width * 0.6;
        self.speed = rng.random::<f32>() * 0.5 + 0.2;
    }

    fn update(&mut self, rng: &mut impl Rng) {
        self.pos.x -= self.speed;
        if self.pos.x + self.width < 0.0 {
            self.respawn(rng);
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hill {
    pub x: f32,
    pub width: f32,
    pub height: f32,
    /// Darker of the two greens
    pub dark: bool,
}

impl Hill {
    fn new(rng: &mut impl Rng) -> Self {
        let mut hill = Self {
            x: 0.0,
            width: 0.0,
            height: 0.0,
            dark: false,
        };
        hill.respawn(rng);
        hill.x = rng.random::<f32>() * GAME_WIDTH;
        hill
    }

    fn respawn(&mut self, rng: &mut impl Rng) {
        self.x = GAME_WIDTH + 200.0;
        self.width = rng.random::<f32>() * 150.0 + 100.0;
        self.height = rng.random::<f32>() * 80.0 + 40.0;
        self.dark = rng.random_bool(0.5);
    }

    fn update(&mut self, rng: &mut impl Rng, scroll_speed: f32) {
        self.x -= scroll_speed * HILL_PARALLAX;
        if self.x + self.width < 0.0 {
            self.respawn(rng);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SymbolShape {
    Circle,
    Square,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SymbolTint {
    Magenta,
    Cyan,
}

/// Faint outline drifting behind everything else
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Symbol {
    pub pos: Vec2,
    pub size: f32,
    pub speed: f32,
    pub shape: SymbolShape,
    pub tint: SymbolTint,
}

impl Symbol {
    fn new(rng: &mut impl Rng) -> Self {
        Self {
            pos: Vec2::new(
                GAME_WIDTH + rng.random::<f32>() * 500.0,
                rng.random::<f32>() * (GROUND_Y - 100.0),
            ),
            size: rng.random::<f32>() * 20.0 + 10.0,
            speed: rng.random::<f32>() * 2.0 + 1.0,
            tint: if rng.random_bool(0.5) {
                SymbolTint::Magenta
            } else {
                SymbolTint::Cyan
            },
            shape: if rng.random_bool(0.5) {
                SymbolShape::Circle
            } else {
                SymbolShape::Square
            },
        }
    }

    fn update(&mut self, rng: &mut impl Rng) {
        self.pos.x -= self.speed;
        if self.pos.x + self.size < 0.0 {
            self.pos.x = GAME_WIDTH + 100.0;
            self.pos.y = rng.random::<f32>() * (GROUND_Y - 100.0);
        }
    }
}

/// All background decoration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenery {
    pub clouds: Vec<Cloud>,
    pub hills: Vec<Hill>,
    pub symbols: Vec<Symbol>,
    /// Horizontal offset of the floor grid, in [0, GRID_SPACING)
    pub grid_offset: f32,
}

impl Scenery {
    pub fn new(rng: &mut impl Rng) -> Self {
        Self {
            symbols: (0..SYMBOL_COUNT).map(|_| Symbol::new(rng)).collect(),
            clouds: (0..CLOUD_COUNT).map(|_| Cloud::new(rng)).collect(),
            hills: (0..HILL_COUNT).map(|_| Hill::new(rng)).collect(),
            grid_offset: 0.0,
        }
    }

    /// Advance one tick. `scroll_speed` is `None` while no run is active.
    pub fn update(&mut self, rng: &mut impl Rng, scroll_speed: Option<f32>) {
        for symbol in &mut self.symbols {
            symbol.update(rng);
        }
        for cloud in &mut self.clouds {
            cloud.update(rng);
        }

        if let Some(speed) = scroll_speed {
            self.grid_offset = (self.grid_offset + speed) % GRID_SPACING;
            for hill in &mut self.hills {
                hill.update(rng, speed);
            }
        }
    }
}
