//! Projects, boards, team members and the signed-in user.

use serde::{Deserialize, Serialize};

/// A board holding a project's sprints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Server-assigned id.
    pub id: String,
    /// Board name.
    #[serde(default)]
    pub name: Option<String>,
}

/// A project and its boards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Server-assigned id.
    pub id: String,
    /// Project name.
    pub name: String,
    /// Boards; the first one is used.
    #[serde(default)]
    pub boards: Vec<Board>,
}

/// A member of a project's team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    /// User id.
    pub id: String,
    /// Given name.
    #[serde(default)]
    pub first_name: String,
    /// Family name.
    #[serde(default)]
    pub last_name: String,
    /// Contact email.
    #[serde(default)]
    pub email: Option<String>,
}

impl TeamMember {
    /// "First Last", trimmed.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

/// Identity of the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User id.
    pub id: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
}

impl CurrentUser {
    /// "First Last", trimmed.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

/// Initials for an avatar badge.
///
/// Multi-word names use the first letter of the first and last words; a
/// single word uses its first two characters. Empty input gives `?`.
pub fn initials(name: &str) -> String {
    let name = name.trim();
    if name.is_empty() {
        return "?".to_string();
    }
    let parts: Vec<&str> = name.split_whitespace().collect();
    let raw: String = if parts.len() > 1 {
        parts[0].chars().take(1).chain(parts[parts.len() - 1].chars().take(1)).collect()
    } else {
        name.chars().take(2).collect()
    };
    raw.to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initials() {
        assert_eq!(initials("Ada Lovelace"), "AL");
        assert_eq!(initials("Grace Brewster Hopper"), "GH");
        assert_eq!(initials("root"), "RO");
        assert_eq!(initials("x"), "X");
        assert_eq!(initials(""), "?");
    }

    #[test]
    fn test_full_name_trims_missing_parts() {
        let member = TeamMember {
            id: "u1".into(),
            first_name: "Linus".into(),
            last_name: String::new(),
            email: None,
        };
        assert_eq!(member.full_name(), "Linus");
    }
}
