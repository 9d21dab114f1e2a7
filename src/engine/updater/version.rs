//! Version Ordering
//!
//! Theme release tags are not always strict semver: they may be short
//! (`3.18`), prefixed (`v3.18.2`), carry a fourth component (`3.18.0.1`) or
//! zero-padded parts (`3.08`). The numeric release is compared as a list of
//! integers of any length; a pre-release suffix is ordered by semver rules.

use semver::Prerelease;
use std::cmp::Ordering;

#[derive(Debug, Clone)]
pub struct ThemeVersion {
    release: Vec<u64>,
    pre: Prerelease,
}

impl ThemeVersion {
    pub fn release(&self) -> &[u64] {
        &self.release
    }

    pub fn pre(&self) -> &Prerelease {
        &self.pre
    }
}

impl Ord for ThemeVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        // Missing components count as zero, so `3.18` == `3.18.0`
        let len = self.release.len().max(other.release.len());
        for i in 0..len {
            let a = self.release.get(i).copied().unwrap_or(0);
            let b = other.release.get(i).copied().unwrap_or(0);
            match a.cmp(&b) {
                Ordering::Equal => continue,
                unequal => return unequal,
            }
        }
        // An empty pre-release sorts after any non-empty one
        self.pre.cmp(&other.pre)
    }
}

impl PartialEq for ThemeVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ThemeVersion {}

impl PartialOrd for ThemeVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Parse a theme version. Build metadata (`+...`) is ignored.
pub fn parse_version(raw: &str) -> Option<ThemeVersion> {
    let trimmed = raw.trim();
    let trimmed = trimmed
        .strip_prefix('v')
        .or_else(|| trimmed.strip_prefix('V'))
        .unwrap_or(trimmed);

    let without_build = trimmed.split('+').next().unwrap_or_default();
    let (core, pre) = match without_build.split_once('-') {
        Some((_, "")) => return None,
        Some((core, pre)) => (core, Prerelease::new(pre).ok()?),
        None => (without_build, Prerelease::EMPTY),
    };

    let release = core
        .split('.')
        .map(|part| {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            part.parse::<u64>().ok()
        })
        .collect::<Option<Vec<u64>>>()?;

    Some(ThemeVersion { release, pre })
}

/// `true` only if both versions parse and `current` is strictly older
pub fn is_older(current: &str, remote: &str) -> bool {
    match (parse_version(current), parse_version(remote)) {
        (Some(current), Some(remote)) => current < remote,
        _ => false,
    }
}
