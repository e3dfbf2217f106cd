use regex::{Regex, RegexBuilder};

use crate::error::{ValueError, ValueResult};

/// Canonical flag order, as reported by `flags`.
const FLAG_ORDER: &str = "dgimsuvy";

/// A compiled pattern matcher: source text, flags, and the compiled program.
#[derive(Clone, Debug)]
pub struct RegExpData {
    source: String,
    flags: String,
    compiled: Regex,
}

impl RegExpData {
    /// Compile `source` with `flags`.
    ///
    /// Flags may appear in any order but at most once each, and `u` and `v`
    /// are mutually exclusive. `i`, `m` and `s` change matching; `d`, `g`, `y`
    /// are recorded only.
    pub fn new(source: &str, flags: &str) -> ValueResult<Self> {
        let flags = normalize_flags(flags)?;
        let source = if source.is_empty() { "(?:)" } else { source };

        let compiled = RegexBuilder::new(source)
            .case_insensitive(flags.contains('i'))
            .multi_line(flags.contains('m'))
            .dot_matches_new_line(flags.contains('s'))
            .build()
            .map_err(|e| ValueError::InvalidPattern {
                pattern: source.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            source: source.to_string(),
            flags,
            compiled,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn flags(&self) -> &str {
        &self.flags
    }

    pub fn global(&self) -> bool {
        self.flags.contains('g')
    }

    pub fn ignore_case(&self) -> bool {
        self.flags.contains('i')
    }

    pub fn multiline(&self) -> bool {
        self.flags.contains('m')
    }

    pub fn sticky(&self) -> bool {
        self.flags.contains('y')
    }

    pub fn is_match(&self, haystack: &str) -> bool {
        self.compiled.is_match(haystack)
    }

    pub fn regex(&self) -> &Regex {
        &self.compiled
    }
}

impl PartialEq for RegExpData {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source && self.flags == other.flags
    }
}

fn normalize_flags(flags: &str) -> ValueResult<String> {
    let mut seen = [false; FLAG_ORDER.len()];
    for flag in flags.chars() {
        let slot = FLAG_ORDER
            .find(flag)
            .ok_or_else(|| ValueError::InvalidFlags(flags.to_string()))?;
        if seen[slot] {
            return Err(ValueError::InvalidFlags(flags.to_string()));
        }
        seen[slot] = true;
    }
    if flags.contains('u') && flags.contains('v') {
        return Err(ValueError::InvalidFlags(flags.to_string()));
    }
    Ok(FLAG_ORDER
        .chars()
        .zip(seen)
        .filter_map(|(flag, present)| present.then_some(flag))
        .collect())
}
