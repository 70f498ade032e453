//! # Showplan
//!
//! Turns a directory tree of annotated image filenames into a slideshow
//! ordering plan. Your filesystem is the data source: directory and file
//! names carry `@`-separated directives that control how long a slide stays
//! on screen, how often it is picked, when it stops being shown, and whether
//! a whole subtree rotates as one "overshadow" group.
//!
//! # The Directive Language
//!
//! Everything after the first `@` in a name is configuration; the part before
//! it is the slide's literal name. Tokens are matched case-insensitively by
//! prefix:
//!
//! | Token | Payload | Meaning |
//! |-------|---------|---------|
//! | `till` | `DDMMYYYY`, `DDMMYY`, or `DDMM` | stop showing the slide after this date |
//! | `dur` | seconds | per-slide display duration |
//! | `maxfiles` | count | flag the directory when it yields more slides |
//! | `wg` | weight, `_` as decimal point | weighted rotation (`wg2_5` = weight 2.5) |
//! | `all` | `_`-joined frequencies | pool the subtree into one overshadow group |
//! | `single` | frequency | each file is its own overshadow group |
//!
//! The day-month-only `till` form guesses the year from the file's
//! modification time: the intended expiration is assumed to lie "soon" around
//! that date, so the year before, the same year, and the year after are tried
//! against a window from 90 days back to 274 days ahead.
//!
//! Directives cascade: a directory's configuration is inherited by everything
//! below it, and any entry may refine the inherited values with its own
//! tokens. A name like `vacation@wg2@dur10/` makes every slide underneath
//! show for ten seconds at weight 2 unless a deeper name says otherwise.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`directive`] | parses one name's `@`-tokens into a partial [`config::SlideConfig`] |
//! | [`expiry`] | resolves 8/6/4-digit `till` payloads against a reference date |
//! | [`config`] | the configuration record: override, mode cementing, defaults |
//! | [`plan`] | the [`plan::SlidePlan`] accumulator the walk appends into |
//! | [`walk`] | recursive traversal, inheritance threading, overshadow pooling |
//! | [`fsaccess`] | the [`fsaccess::FileSystemAccess`] seam and its `std::fs` implementation |
//!
//! # Design Decisions
//!
//! ## Display Mode as a Sum Type
//!
//! A slide is either weighted or part of an overshadow rotation, never both.
//! [`config::DisplayMode`] makes that a two-variant enum, so cementing a mode
//! and filling its defaults are exhaustive matches. Combining `wg` with
//! `all`/`single` on one name is rejected at parse time.
//!
//! ## Inheritance by Value
//!
//! Each step of the walk derives a fresh merged configuration
//! ([`config::SlideConfig::override_with`]) and hands it down by value.
//! Parent scopes never observe a child's refinements, and there is no shared
//! mutable configuration to deep-copy defensively.
//!
//! ## One Accumulator per Traversal
//!
//! All results land in a single [`plan::SlidePlan`] passed down the recursion
//! exclusively (`&mut`). The only exception is a pooled overshadow subtree,
//! which collects into a fresh plan so the pool can be folded back as one
//! group with one frequency.
//!
//! ## Diagnostics over Failures
//!
//! A malformed name, a non-image file, or an over-long directory never aborts
//! the walk. Problems become [`plan::Diagnostic`] messages attached to the
//! offending path, and the traversal always completes with a full plan.

pub mod config;
pub mod directive;
pub mod expiry;
pub mod fsaccess;
pub mod plan;
pub mod walk;

#[cfg(test)]
pub(crate) mod test_helpers;
