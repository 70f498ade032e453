//! The slide configuration record and its merge rules.
//!
//! A [`SlideConfig`] is what one name's directives decode to, and also what a
//! scope inherits from its parents. Three operations define its lifecycle:
//!
//! - [`SlideConfig::override_with`] merges a child's partial configuration
//!   onto an inherited one: present fields win, absent fields keep the
//!   inherited value. Child directives refine, they never blank out.
//! - [`SlideConfig::cement`] fixes the display mode the first time a mode
//!   directive appears. Once a name has committed to weighted or overshadow
//!   display, a directive for the other mode is an error.
//! - [`SlideConfig::resolve`] fills every still-unset field with its default.
//!   This happens only at the moment a slide is committed to the plan, never
//!   while the walk is still descending, since an unset field must stay
//!   unset for deeper directives to claim it.

use chrono::NaiveDateTime;
use std::time::Duration;
use thiserror::Error;

/// Display duration for slides that never saw a `dur` directive.
pub const DEFAULT_DURATION: Duration = Duration::from_secs(5);

/// Weight for slides that never saw a `wg` directive.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Frequency schedule for overshadow slides that never saw one.
pub const DEFAULT_FREQUENCIES: &[u32] = &[8];

/// Raised when one name combines weighted and overshadow directives.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("weighted (`wg`) and overshadow (`all`/`single`) directives cannot be combined")]
pub struct ModeConflict;

/// Per-scope slide configuration, inherited and overridden top-down.
///
/// Every field is optional: a freshly parsed name sets only what its tokens
/// name, and inheritance fills in the rest. Defaults are applied by
/// [`resolve`](Self::resolve) when a slide is committed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlideConfig {
    /// Stop showing the slide after this instant (`till` directive).
    pub expire_after: Option<NaiveDateTime>,
    /// Per-slide display duration (`dur` directive).
    pub duration: Option<Duration>,
    /// Flag the scope when it yields more slides than this (`maxfiles`).
    pub max_slides: Option<u32>,
    /// Weighted or overshadow display, once a directive cements it.
    pub mode: Option<DisplayMode>,
}

/// The two mutually-exclusive ways a slide participates in the show.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayMode {
    /// Normal rotation, picked with a configurable weight.
    Weighted(WeightedMode),
    /// Frequency-gated rotation shown as a group.
    Overshadow(OvershadowMode),
}

/// Partial settings for the weighted rotation (`wg`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightedMode {
    pub weight: Option<f64>,
}

/// Partial settings for the overshadow rotation (`all`/`single`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OvershadowMode {
    /// Frequency schedule, indexed by pool size when a subtree is pooled.
    pub frequencies: Option<Vec<u32>>,
    /// `true`: every file is its own group. `false`: the subtree pools.
    pub one_at_a_time: Option<bool>,
}

/// A configuration with every gap filled, ready to commit a slide.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub duration: Duration,
    pub mode: ResolvedMode,
}

/// [`DisplayMode`] with defaults applied.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedMode {
    Weighted { weight: f64 },
    Overshadow { frequencies: Vec<u32>, one_at_a_time: bool },
}

impl SlideConfig {
    /// Merge `incoming` onto `self`, returning the combined configuration.
    ///
    /// Present incoming fields win; absent ones keep the base value. Merging
    /// an empty configuration returns the base unchanged.
    pub fn override_with(&self, incoming: &SlideConfig) -> SlideConfig {
        SlideConfig {
            expire_after: incoming.expire_after.or(self.expire_after),
            duration: incoming.duration.or(self.duration),
            max_slides: incoming.max_slides.or(self.max_slides),
            mode: incoming.mode.clone().or_else(|| self.mode.clone()),
        }
    }

    /// Fix the display mode the first time a mode directive appears.
    ///
    /// Unset: initialize the requested variant empty, for the directive to
    /// fill. Same variant already set: no-op, the directive refines it.
    /// Other variant set: [`ModeConflict`].
    pub fn cement(&mut self, overshadow: bool) -> Result<(), ModeConflict> {
        match (&self.mode, overshadow) {
            (None, true) => self.mode = Some(DisplayMode::Overshadow(OvershadowMode::default())),
            (None, false) => self.mode = Some(DisplayMode::Weighted(WeightedMode::default())),
            (Some(DisplayMode::Overshadow(_)), true) => {}
            (Some(DisplayMode::Weighted(_)), false) => {}
            _ => return Err(ModeConflict),
        }
        Ok(())
    }

    /// Fill every unset field with its default.
    ///
    /// Only called when a slide is committed. A configuration without a mode
    /// becomes a weight-1.0 weighted slide; gaps inside a set mode take that
    /// mode's defaults.
    pub fn resolve(&self) -> ResolvedConfig {
        let mode = match &self.mode {
            Some(DisplayMode::Overshadow(overshadow)) => ResolvedMode::Overshadow {
                frequencies: overshadow
                    .frequencies
                    .clone()
                    .filter(|frequencies| !frequencies.is_empty())
                    .unwrap_or_else(|| DEFAULT_FREQUENCIES.to_vec()),
                one_at_a_time: overshadow.one_at_a_time.unwrap_or(true),
            },
            Some(DisplayMode::Weighted(weighted)) => ResolvedMode::Weighted {
                weight: weighted.weight.unwrap_or(DEFAULT_WEIGHT),
            },
            None => ResolvedMode::Weighted {
                weight: DEFAULT_WEIGHT,
            },
        };
        ResolvedConfig {
            duration: self.duration.unwrap_or(DEFAULT_DURATION),
            mode,
        }
    }
}
