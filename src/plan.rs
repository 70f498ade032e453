//! The slide plan: everything one traversal produces.
//!
//! A [`SlidePlan`] starts empty, is appended to while the walk runs, and is
//! handed back untouched afterwards. Serializes to JSON so callers can keep
//! it as a manifest next to the content it describes.
//!
//! Weighted slides land in per-weight buckets whose order is the order the
//! weights were first seen, keeping the plan deterministic for a given
//! listing order. Overshadow slides land in groups: one file per group normally, one
//! group for a whole subtree when the walk pooled it.
//!
//! Paths are stored with any leading separator stripped, so a plan built
//! from an absolute root and one built from a relative root display alike.

use crate::config::{ResolvedMode, SlideConfig};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How bad a [`Diagnostic`] is. None of them stops the walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// A slide in the weighted rotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalSlide {
    pub path: String,
    pub duration: Duration,
}

/// All slides sharing one weight, in the order they were collected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightBucket {
    pub weight: f64,
    pub slides: Vec<NormalSlide>,
}

/// Slides shown as a set, gated by a shared frequency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OvershadowGroup {
    pub files: Vec<String>,
    pub frequency: u32,
    pub duration: Duration,
}

/// A problem attached to the path that caused it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub path: String,
    pub text: String,
}

/// The accumulated result of one traversal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SlidePlan {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub weighted: Vec<WeightBucket>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub overshadow_groups: Vec<OvershadowGroup>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<Diagnostic>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub expired: Vec<String>,
}

impl SlidePlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit a slide under `config`, defaults filled.
    ///
    /// Weighted slides go into their weight's bucket, created on first use.
    /// Overshadow slides each open a one-file group; pooling a subtree into
    /// a shared group is the walk's job, not the plan's.
    pub fn add_slide(&mut self, path: &str, config: &SlideConfig) {
        let resolved = config.resolve();
        match resolved.mode {
            ResolvedMode::Weighted { weight } => {
                self.bucket_mut(weight).push(NormalSlide {
                    path: strip_leading_slash(path).to_string(),
                    duration: resolved.duration,
                });
            }
            ResolvedMode::Overshadow { frequencies, .. } => {
                // A group of one: the schedule tapers at pool size 1.
                let index = 1usize.min(frequencies.len() - 1);
                self.add_overshadow_group(
                    vec![path.to_string()],
                    frequencies[index],
                    resolved.duration,
                );
            }
        }
    }

    /// Append a ready-made overshadow group.
    pub fn add_overshadow_group(&mut self, files: Vec<String>, frequency: u32, duration: Duration) {
        self.overshadow_groups.push(OvershadowGroup {
            files: files
                .into_iter()
                .map(|file| strip_leading_slash(&file).to_string())
                .collect(),
            frequency,
            duration,
        });
    }

    pub fn add_error(&mut self, path: &str, text: &str) {
        self.push_message(Severity::Error, path, text);
    }

    pub fn add_warning(&mut self, path: &str, text: &str) {
        self.push_message(Severity::Warning, path, text);
    }

    pub fn add_expired(&mut self, path: &str) {
        self.expired.push(strip_leading_slash(path).to_string());
    }

    /// Move everything except overshadow groups from `sub` into `self`,
    /// returning those groups for the caller to pool.
    ///
    /// Diagnostics and expired slides must survive a pooled subtree; weighted
    /// buckets can appear there too when a deeper name switches the mode back.
    pub fn absorb(&mut self, sub: SlidePlan) -> Vec<OvershadowGroup> {
        for bucket in sub.weighted {
            self.bucket_mut(bucket.weight).extend(bucket.slides);
        }
        self.messages.extend(sub.messages);
        self.expired.extend(sub.expired);
        sub.overshadow_groups
    }

    fn push_message(&mut self, severity: Severity, path: &str, text: &str) {
        self.messages.push(Diagnostic {
            severity,
            path: strip_leading_slash(path).to_string(),
            text: text.to_string(),
        });
    }

    fn bucket_mut(&mut self, weight: f64) -> &mut Vec<NormalSlide> {
        let index = match self.weighted.iter().position(|bucket| bucket.weight == weight) {
            Some(index) => index,
            None => {
                self.weighted.push(WeightBucket {
                    weight,
                    slides: Vec::new(),
                });
                self.weighted.len() - 1
            }
        };
        &mut self.weighted[index].slides
    }
}

fn strip_leading_slash(path: &str) -> &str {
    path.strip_prefix('/').unwrap_or(path)
}
