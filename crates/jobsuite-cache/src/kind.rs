//! The three cached entity kinds.

use std::fmt;

/// Entity kinds the cache tracks, each with its own slice, snapshot file,
/// and refresh timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Estimates,
    Clients,
    Projects,
}

impl EntityKind {
    pub const ALL: [Self; 3] = [Self::Estimates, Self::Clients, Self::Projects];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Estimates => "estimates",
            Self::Clients => "clients",
            Self::Projects => "projects",
        }
    }

    /// Snapshot file name for this kind.
    #[must_use]
    pub fn snapshot_file(self) -> String {
        format!("jobsuite_cache_{}.json", self.as_str())
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "estimates" => Ok(Self::Estimates),
            "clients" => Ok(Self::Clients),
            "projects" => Ok(Self::Projects),
            other => Err(format!(
                "unknown entity kind '{other}' (expected estimates, clients, or projects)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn snapshot_files_are_kind_scoped() {
        assert_eq!(
            EntityKind::Estimates.snapshot_file(),
            "jobsuite_cache_estimates.json"
        );
        assert_eq!(
            EntityKind::Projects.snapshot_file(),
            "jobsuite_cache_projects.json"
        );
    }

    #[test]
    fn parses_kind_names() {
        assert_eq!("clients".parse::<EntityKind>(), Ok(EntityKind::Clients));
        assert!("comments".parse::<EntityKind>().is_err());
    }
}
