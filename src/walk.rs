//! Recursive traversal: inheritance threading and slide classification.
//!
//! [`collect_slides`] walks one directory, derives each entry's effective
//! configuration by merging its name's directives onto the inherited ones,
//! and either recurses (directories) or commits the entry to the plan
//! (files). It never fails: every per-entry problem becomes a diagnostic on
//! the plan and the walk moves on.
//!
//! ## Overshadow pooling
//!
//! A directory whose effective mode is overshadow with `one_at_a_time`
//! off (an `all` directive, possibly inherited) turns its whole subtree
//! into one rotation group. The subtree is walked into a fresh plan, then
//! folded back: all files from the sub-plan's overshadow groups become one
//! group whose frequency is picked from the directive's schedule by pool
//! size: `frequencies[min(pool, len - 1)]`, a schedule that tapers off and
//! clamps at its last entry. Nested `all` directories pool innermost-first;
//! the outer pool flattens them and the outer schedule wins.

use crate::config::{DisplayMode, ResolvedMode, SlideConfig};
use crate::directive;
use crate::fsaccess::FileSystemAccess;
use crate::plan::SlidePlan;
use tracing::{debug, trace};

/// Suffixes accepted as slides without a warning, compared case-insensitively.
pub const IMAGE_SUFFIXES: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".bmp", ".tiff", ".tif"];

/// Walk `root`/`relative_path` and append everything found to `plan`.
///
/// `inherited` is the configuration accumulated from enclosing scopes; pass
/// `SlideConfig::default()` at the top. Returns the number of slides the
/// scope yielded, sub-scopes included; expired and skipped entries don't
/// count.
pub fn collect_slides(
    plan: &mut SlidePlan,
    root: &str,
    relative_path: &str,
    inherited: &SlideConfig,
    fs: &dyn FileSystemAccess,
) -> usize {
    let dir_path = fs.join(root, relative_path);
    debug!(dir = %dir_path, "collecting slides");

    let entries = match fs.list_dir(&dir_path) {
        Ok(entries) => entries,
        Err(err) => {
            plan.add_error(relative_path, &format!("cannot list directory: {err}"));
            return 0;
        }
    };

    let mut slide_count = 0;
    for name in entries {
        let full_path = fs.join(&dir_path, &name);
        let relative = fs.join(relative_path, &name);

        let modified = match fs.get_file_modification_time(&full_path) {
            Ok(modified) => modified,
            Err(err) => {
                plan.add_error(&relative, &format!("cannot read modification time: {err}"));
                continue;
            }
        };
        let entry_config = match directive::parse_slide_name(&fs.get_file_main_name(&name), modified)
        {
            Ok(parsed) => inherited.override_with(&parsed),
            Err(err) => {
                plan.add_error(&relative, &err.to_string());
                continue;
            }
        };

        if fs.is_dir(&full_path) {
            if pools_subtree(&entry_config) {
                debug!(dir = %relative, "pooling overshadow subtree");
                let mut sub = SlidePlan::new();
                slide_count += collect_slides(&mut sub, root, &relative, &entry_config, fs);
                merge_pooled(plan, sub, &entry_config);
            } else {
                slide_count += collect_slides(plan, root, &relative, &entry_config, fs);
            }
        } else {
            let suffix = fs.get_file_suffix(&name);
            if !IMAGE_SUFFIXES.contains(&suffix.to_lowercase().as_str()) {
                plan.add_warning(
                    &relative,
                    &format!("file suffix `{suffix}` is not an image suffix"),
                );
            }
            let expired = entry_config
                .expire_after
                .is_some_and(|cutoff| cutoff.date() < fs.current_date());
            if expired {
                trace!(file = %relative, "expired");
                plan.add_expired(&relative);
            } else {
                trace!(file = %relative, "added");
                plan.add_slide(&relative, &entry_config);
                slide_count += 1;
            }
        }
    }

    if let Some(max_slides) = inherited.max_slides {
        if slide_count > max_slides as usize {
            plan.add_error(
                relative_path,
                &format!("{slide_count} slides collected where at most {max_slides} were allowed"),
            );
        }
    }
    slide_count
}

/// Does this directory's configuration pool its subtree into one group?
fn pools_subtree(config: &SlideConfig) -> bool {
    matches!(
        &config.mode,
        Some(DisplayMode::Overshadow(overshadow)) if !overshadow.one_at_a_time.unwrap_or(true)
    )
}

/// Fold a pooled subtree's plan back into the parent.
///
/// Diagnostics, expired slides, and any weighted buckets carry over as they
/// are. The sub-plan's overshadow groups are flattened into a single pool
/// and re-appended as one group whose frequency is the pooling directive's
/// schedule tapered by pool size.
fn merge_pooled(parent: &mut SlidePlan, sub: SlidePlan, config: &SlideConfig) {
    let groups = parent.absorb(sub);
    let files: Vec<String> = groups.into_iter().flat_map(|group| group.files).collect();
    if files.is_empty() {
        return;
    }
    let resolved = config.resolve();
    let ResolvedMode::Overshadow { frequencies, .. } = resolved.mode else {
        return;
    };
    let index = files.len().min(frequencies.len() - 1);
    debug!(pool = files.len(), frequency = frequencies[index], "pooled overshadow group");
    parent.add_overshadow_group(files, frequencies[index], resolved.duration);
}
