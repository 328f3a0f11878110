//! Declared external dependencies

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DependencyError;

/// Version part of a dependency coordinate
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VersionSelector {
    /// `+`: newest available
    Latest,
    /// `1.2.+`: newest with the given prefix (stored without the `+`)
    Prefix(String),
    /// A fixed version
    Exact(String),
}

impl VersionSelector {
    /// Dynamic selectors resolve differently as new versions are published
    pub fn is_dynamic(&self) -> bool {
        !matches!(self, Self::Exact(_))
    }
}

impl std::fmt::Display for VersionSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Latest => write!(f, "+"),
            Self::Prefix(prefix) => write!(f, "{}+", prefix),
            Self::Exact(version) => write!(f, "{}", version),
        }
    }
}

/// A `group:artifact:version[:classifier]` dependency declaration
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Dependency {
    pub group: String,
    pub artifact: String,
    pub version: VersionSelector,
    pub classifier: Option<String>,
}

impl FromStr for Dependency {
    type Err = DependencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let coordinate = s.trim();
        let parts: Vec<&str> = coordinate.split(':').collect();

        let valid_part = |p: &str| !p.is_empty() && !p.chars().any(char::is_whitespace);
        if !(3..=4).contains(&parts.len()) || !parts.iter().all(|p| valid_part(p)) {
            return Err(DependencyError::InvalidCoordinate(s.to_string()));
        }

        let selector = parts[2];
        let version = if selector == "+" {
            VersionSelector::Latest
        } else if let Some(prefix) = selector.strip_suffix('+') {
            if !prefix.ends_with('.') || prefix.contains('+') {
                return Err(DependencyError::InvalidSelector {
                    coordinate: coordinate.to_string(),
                    selector: selector.to_string(),
                });
            }
            VersionSelector::Prefix(prefix.to_string())
        } else if selector.contains('+') {
            return Err(DependencyError::InvalidSelector {
                coordinate: coordinate.to_string(),
                selector: selector.to_string(),
            });
        } else {
            VersionSelector::Exact(selector.to_string())
        };

        Ok(Self {
            group: parts[0].to_string(),
            artifact: parts[1].to_string(),
            version,
            classifier: parts.get(3).map(|c| c.to_string()),
        })
    }
}

impl TryFrom<String> for Dependency {
    type Error = DependencyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Dependency> for String {
    fn from(dependency: Dependency) -> Self {
        dependency.to_string()
    }
}

impl std::fmt::Display for Dependency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.artifact, self.version)?;
        if let Some(classifier) = &self.classifier {
            write!(f, ":{}", classifier)?;
        }
        Ok(())
    }
}
