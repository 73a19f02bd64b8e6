use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::input::expand_key;

/// The fixed team. Every table column and every derived computation iterates
/// this set exhaustively, so it is closed on purpose.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TeamMember {
    Joanna,
    Tatiana,
    Leman,
    Anastasia,
}

impl TeamMember {
    pub const ALL: [TeamMember; 4] = [
        TeamMember::Joanna,
        TeamMember::Tatiana,
        TeamMember::Leman,
        TeamMember::Anastasia,
    ];

    pub const COUNT: usize = Self::ALL.len();

    pub fn index(self) -> usize {
        match self {
            TeamMember::Joanna => 0,
            TeamMember::Tatiana => 1,
            TeamMember::Leman => 2,
            TeamMember::Anastasia => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TeamMember::Joanna => "Joanna",
            TeamMember::Tatiana => "Tatiana",
            TeamMember::Leman => "Leman",
            TeamMember::Anastasia => "Anastasia",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            TeamMember::Joanna => "Mezini, J.",
            TeamMember::Tatiana => "Klassen, T.",
            TeamMember::Leman => "Özel, L.",
            TeamMember::Anastasia => "Legbaum, A.",
        }
    }
}

impl fmt::Display for TeamMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TeamMember {
    type Err = anyhow::Error;

    /// Case-insensitive, accepts any unique prefix ("jo", "tat", "a").
    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_lowercase();
        if key.is_empty() {
            return Err(anyhow!("Empty member name"));
        }
        let candidates: Vec<String> = Self::ALL.iter().map(|m| m.name().to_lowercase()).collect();
        let candidate_refs: Vec<&str> = candidates.iter().map(String::as_str).collect();
        let full = expand_key(&key, &candidate_refs)?;

        Self::ALL
            .into_iter()
            .find(|m| m.name().to_lowercase() == full)
            .ok_or_else(|| anyhow!("Unknown member: '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_all_order() {
        for (i, member) in TeamMember::ALL.iter().enumerate() {
            assert_eq!(member.index(), i);
        }
    }

    #[test]
    fn test_parse_member_prefix() {
        assert_eq!("Joanna".parse::<TeamMember>().unwrap(), TeamMember::Joanna);
        assert_eq!("jo".parse::<TeamMember>().unwrap(), TeamMember::Joanna);
        assert_eq!("TAT".parse::<TeamMember>().unwrap(), TeamMember::Tatiana);
        assert_eq!("l".parse::<TeamMember>().unwrap(), TeamMember::Leman);
        assert_eq!("a".parse::<TeamMember>().unwrap(), TeamMember::Anastasia);

        assert!("x".parse::<TeamMember>().is_err());
        assert!("".parse::<TeamMember>().is_err());
    }

    #[test]
    fn test_serde_uses_plain_names() {
        let json = serde_json::to_string(&TeamMember::Leman).unwrap();
        assert_eq!(json, "\"Leman\"");
        let back: TeamMember = serde_json::from_str("\"Anastasia\"").unwrap();
        assert_eq!(back, TeamMember::Anastasia);
    }
}
