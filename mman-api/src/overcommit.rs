//! Overcommit accounting modes
//!
//! Only the enumeration lives here. The accounting itself belongs to the
//! commit-limit subsystem, which reads the mode from its sysctl.

use core::fmt;

use crate::error::{invalid_argument, Error};

/// Heuristic mode: refuse requests larger than physical memory plus swap
pub const OVERCOMMIT_GUESS: u32 = 0;
/// Never refuse below the architectural address space limit
pub const OVERCOMMIT_ALWAYS: u32 = 1;
/// Strict mode: cap at roughly half of physical memory (minus huge page
/// reservations) plus swap
pub const OVERCOMMIT_NEVER: u32 = 2;

/// Overcommit accounting mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u32)]
pub enum OvercommitPolicy {
    /// See [`OVERCOMMIT_GUESS`]
    #[default]
    Guess = OVERCOMMIT_GUESS,
    /// See [`OVERCOMMIT_ALWAYS`]
    Always = OVERCOMMIT_ALWAYS,
    /// See [`OVERCOMMIT_NEVER`]
    Never = OVERCOMMIT_NEVER,
}

impl OvercommitPolicy {
    /// Raw sysctl value
    pub const fn as_raw(self) -> u32 {
        self as u32
    }
}

impl TryFrom<u32> for OvercommitPolicy {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            OVERCOMMIT_GUESS => Ok(OvercommitPolicy::Guess),
            OVERCOMMIT_ALWAYS => Ok(OvercommitPolicy::Always),
            OVERCOMMIT_NEVER => Ok(OvercommitPolicy::Never),
            _ => Err(invalid_argument("unknown overcommit mode")),
        }
    }
}

impl fmt::Display for OvercommitPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OvercommitPolicy::Guess => write!(f, "guess"),
            OvercommitPolicy::Always => write!(f, "always"),
            OvercommitPolicy::Never => write!(f, "never"),
        }
    }
}
