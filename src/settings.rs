//! Game settings
//!
//! Defaults reproduce the classic 800x800 arena with three players. A host page
//! may override them with JSON (the canvas `data-settings` attribute).

use anyhow::{Context, Result, bail, ensure};
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::consts::*;

/// Highest selectable player (keys 1-9)
pub const MAX_ROSTER: usize = 9;
/// Largest canvas dimension browsers accept
pub const MAX_CANVAS_SIZE: f32 = 32767.0;

/// Starting description of one player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSpec {
    pub color: Color,
    /// Label drawn inside the circle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl PlayerSpec {
    pub fn new(color: Color) -> Self {
        Self { color, name: None }
    }

    pub fn named(color: Color, name: impl Into<String>) -> Self {
        Self {
            color,
            name: Some(name.into()),
        }
    }
}

/// Arena and roster configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub arena_width: f32,
    pub arena_height: f32,
    /// Background grid spacing
    pub grid_spacing: f32,
    /// Food pool size, kept constant during play
    pub food_count: usize,
    /// Players created at startup, in selector order
    pub roster: Vec<PlayerSpec>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            grid_spacing: GRID_SPACING,
            food_count: FOOD_COUNT,
            roster: vec![
                PlayerSpec::new(Color::BLUE),
                PlayerSpec::new(Color::RED),
                PlayerSpec::new(Color::GREEN),
            ],
        }
    }
}

impl Settings {
    /// Parse and validate settings JSON; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json).context("malformed settings JSON")?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject settings the simulation can't run with
    pub fn validate(&self) -> Result<()> {
        let size = 1.0..=MAX_CANVAS_SIZE;
        ensure!(
            size.contains(&self.arena_width) && size.contains(&self.arena_height),
            "arena must be between 1x1 and {MAX_CANVAS_SIZE}x{MAX_CANVAS_SIZE}, got {}x{}",
            self.arena_width,
            self.arena_height
        );
        ensure!(
            size.contains(&self.grid_spacing),
            "grid spacing must be between 1 and {MAX_CANVAS_SIZE}, got {}",
            self.grid_spacing
        );
        if self.roster.is_empty() {
            bail!("roster needs at least one player");
        }
        ensure!(
            self.roster.len() <= MAX_ROSTER,
            "roster has {} players, at most {} are selectable",
            self.roster.len(),
            MAX_ROSTER
        );
        Ok(())
    }

    /// Settings from optional host JSON, falling back to defaults
    pub fn load(json: Option<&str>) -> Self {
        let Some(json) = json.filter(|s| !s.trim().is_empty()) else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::from_json(json) {
            Ok(settings) => {
                log::info!(
                    "Loaded settings: {}x{} arena, {} food, {} players",
                    settings.arena_width,
                    settings.arena_height,
                    settings.food_count,
                    settings.roster.len()
                );
                settings
            }
            Err(e) => {
                log::warn!("Ignoring settings: {e:#}");
                Self::default()
            }
        }
    }
}
