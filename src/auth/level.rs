//! Permission levels.
//!
//! A level is an integer severity with a fixed set of named values. Levels
//! only compare against other levels; there is no conversion from a raw
//! integer, so a stray number can never be mistaken for a permission.

use serde::Deserialize;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Ordered severity tier governing which commands a user may invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct PermissionLevel(u16);

impl PermissionLevel {
    /// Everyone, including users with no mapped roles.
    pub const DEFAULT: Self = Self(0);
    /// Trusted helpers.
    pub const MODERATOR: Self = Self(25);
    /// Server administrators.
    pub const ADMIN: Self = Self(50);
    /// Server owners and bot admins.
    pub const OWNER: Self = Self(900);

    /// All levels, lowest first.
    pub const ALL: [Self; 4] = [Self::DEFAULT, Self::MODERATOR, Self::ADMIN, Self::OWNER];

    /// Numeric severity.
    #[inline]
    pub const fn value(self) -> u16 {
        self.0
    }

    /// Lowercase name, as used in config files.
    pub const fn name(self) -> &'static str {
        match self.0 {
            0 => "default",
            25 => "moderator",
            50 => "admin",
            _ => "owner",
        }
    }
}

impl Default for PermissionLevel {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Compare two levels by severity.
#[inline]
pub fn compare(a: PermissionLevel, b: PermissionLevel) -> Ordering {
    a.cmp(&b)
}

impl fmt::Display for PermissionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown permission level name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown permission level '{0}' (expected default, moderator, admin or owner)")]
pub struct ParseLevelError(String);

impl FromStr for PermissionLevel {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseLevelError(s.to_string()))
    }
}

impl TryFrom<String> for PermissionLevel {
    type Error = ParseLevelError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
