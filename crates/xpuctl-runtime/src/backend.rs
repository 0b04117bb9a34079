//! Backend identification.

use std::fmt;
use std::str::FromStr;

use crate::error::RuntimeError;

/// Runtime backend a device is exposed through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[non_exhaustive]
pub enum Backend {
    OpenCl,
    LevelZero,
    Cuda,
    Host,
}

impl Backend {
    /// Every backend the runtime can report, in enumeration order.
    pub const ALL: [Backend; 4] = [
        Backend::OpenCl,
        Backend::LevelZero,
        Backend::Cuda,
        Backend::Host,
    ];

    /// Canonical lowercase token, as spelled in filter strings.
    pub fn token(self) -> &'static str {
        match self {
            Backend::OpenCl => "opencl",
            Backend::LevelZero => "level_zero",
            Backend::Cuda => "cuda",
            Backend::Host => "host",
        }
    }

    pub(crate) fn parse_token(token: &str) -> Option<Backend> {
        Backend::ALL.iter().copied().find(|b| b.token() == token)
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Backend {
    type Err = RuntimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Backend::parse_token(s).ok_or_else(|| RuntimeError::InvalidFilter {
            filter: s.to_string(),
            reason: "unknown backend".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_round_trip() {
        for backend in Backend::ALL {
            assert_eq!(backend.token().parse::<Backend>().ok(), Some(backend));
        }
    }

    #[test]
    fn unknown_token_is_rejected() {
        assert!("vulkan".parse::<Backend>().is_err());
        assert!("OPENCL".parse::<Backend>().is_err());
    }
}
