//! Agent roles
//!
//! Four fixed specializations applied to otherwise-identical orchestration
//! logic via different system instructions. Default pipeline ordering:
//! architect → {backend, frontend} → qa.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Accepted role names, in pipeline order
pub const ACCEPTED_ROLES: &[&str] = &["architect", "backend", "frontend", "qa"];

/// One of the four agent specializations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentRole {
    /// System design and overall approach; runs first
    Architect,
    /// Server-side implementation
    Backend,
    /// Client-side implementation
    Frontend,
    /// Testing and quality concerns; runs last
    Qa,
}

impl AgentRole {
    /// All roles in pipeline order
    pub const ALL: [Self; 4] = [Self::Architect, Self::Backend, Self::Frontend, Self::Qa];

    /// Lowercase wire name
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Architect => "architect",
            Self::Backend => "backend",
            Self::Frontend => "frontend",
            Self::Qa => "qa",
        }
    }

    /// Human-readable label used in context entries and persisted turns
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Architect => "Architect",
            Self::Backend => "Backend",
            Self::Frontend => "Frontend",
            Self::Qa => "QA",
        }
    }
}

impl fmt::Display for AgentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgentRole {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "architect" => Ok(Self::Architect),
            "backend" => Ok(Self::Backend),
            "frontend" => Ok(Self::Frontend),
            "qa" => Ok(Self::Qa),
            _ => Err(Error::unknown_role(s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_all_known_roles() {
        for name in ACCEPTED_ROLES {
            assert!(name.parse::<AgentRole>().is_ok());
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("Architect".parse::<AgentRole>().unwrap(), AgentRole::Architect);
        assert_eq!("  QA  ".parse::<AgentRole>().unwrap(), AgentRole::Qa);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!("designer".parse::<AgentRole>().is_err());
        assert!("".parse::<AgentRole>().is_err());
    }

    #[test]
    fn test_wire_name_round_trip() {
        for role in AgentRole::ALL {
            assert_eq!(role.as_str().parse::<AgentRole>().unwrap(), role);
        }
    }
}
