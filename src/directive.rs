//! Parsing one name's `@`-tokens into a partial [`SlideConfig`].
//!
//! The parser sees a single main name (extension already stripped) and knows
//! nothing about inheritance: it reports exactly what this name says, leaving
//! every unmentioned field unset for the walk to fill from parent scopes.
//!
//! Tokens are matched case-insensitively by prefix. The prefixes are disjoint
//! by construction, so matching order does not matter. A token matching no
//! known prefix is ignored, so names annotated for a newer vocabulary still
//! parse. Repeated tokens of the same kind overwrite each other left to
//! right; the only cross-token rule is that weighted and overshadow
//! directives cannot both appear on one name.

use crate::config::{DisplayMode, ModeConflict, SlideConfig};
use crate::expiry::{self, ExpiryError};
use chrono::NaiveDateTime;
use std::num::ParseIntError;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DirectiveError {
    #[error(transparent)]
    Expiry(#[from] ExpiryError),
    #[error(transparent)]
    ModeConflict(#[from] ModeConflict),
    #[error("`{token}` does not carry a valid integer")]
    BadInteger {
        token: String,
        #[source]
        source: ParseIntError,
    },
    #[error("`{token}` does not carry a valid weight")]
    BadWeight { token: String },
    #[error("`all` needs at least one frequency")]
    EmptyFrequencies,
}

/// Decode the directives embedded in a main name.
///
/// `modified` is the file's modification time, the reference for resolving
/// yearless `till` dates. The segment before the first `@` is the slide's
/// literal name and carries no configuration.
pub fn parse_slide_name(
    main_name: &str,
    modified: NaiveDateTime,
) -> Result<SlideConfig, DirectiveError> {
    let mut config = SlideConfig::default();

    for token in main_name.split('@').skip(1) {
        let token = token.to_lowercase();
        if let Some(payload) = token.strip_prefix("till") {
            config.expire_after = Some(expiry::resolve_expiry(modified, payload)?);
        } else if let Some(payload) = token.strip_prefix("maxfiles") {
            config.max_slides = Some(parse_integer(&token, payload)?);
        } else if let Some(payload) = token.strip_prefix("dur") {
            let seconds: u64 = parse_integer(&token, payload)?;
            config.duration = Some(Duration::from_secs(seconds));
        } else if let Some(payload) = token.strip_prefix("wg") {
            config.cement(false)?;
            let weight = payload
                .replace('_', ".")
                .parse::<f64>()
                .map_err(|_| DirectiveError::BadWeight {
                    token: token.clone(),
                })?;
            if let Some(DisplayMode::Weighted(weighted)) = &mut config.mode {
                weighted.weight = Some(weight);
            }
        } else if let Some(payload) = token.strip_prefix("all") {
            config.cement(true)?;
            let frequencies = payload
                .split('_')
                .map(|frequency| parse_integer(&token, frequency))
                .collect::<Result<Vec<u32>, _>>()?;
            if frequencies.is_empty() {
                return Err(DirectiveError::EmptyFrequencies);
            }
            if let Some(DisplayMode::Overshadow(overshadow)) = &mut config.mode {
                overshadow.one_at_a_time = Some(false);
                overshadow.frequencies = Some(frequencies);
            }
        } else if let Some(payload) = token.strip_prefix("single") {
            config.cement(true)?;
            let frequency = parse_integer(&token, payload)?;
            if let Some(DisplayMode::Overshadow(overshadow)) = &mut config.mode {
                overshadow.one_at_a_time = Some(true);
                overshadow.frequencies = Some(vec![frequency]);
            }
        }
    }
    Ok(config)
}

fn parse_integer<T>(token: &str, payload: &str) -> Result<T, DirectiveError>
where
    T: std::str::FromStr<Err = ParseIntError>,
{
    payload.parse().map_err(|source| DirectiveError::BadInteger {
        token: token.to_string(),
        source,
    })
}
