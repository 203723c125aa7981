/// Shared types used across the codebase

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The two entity kinds the service stores.
/// Campaign is the parent side of the relationship, AdGroup the child side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Campaign,
    AdGroup,
}

impl EntityKind {
    /// Prefix callers use to scope a field or filter to this entity ("adGroup.status")
    pub fn prefix(&self) -> &'static str {
        match self {
            EntityKind::Campaign => "campaign",
            EntityKind::AdGroup => "adGroup",
        }
    }

    pub fn table(&self) -> Table {
        match self {
            EntityKind::Campaign => Table::Campaign,
            EntityKind::AdGroup => Table::AdGroup,
        }
    }

    /// The other side of the join
    pub fn other(&self) -> EntityKind {
        match self {
            EntityKind::Campaign => EntityKind::AdGroup,
            EntityKind::AdGroup => EntityKind::Campaign,
        }
    }
}

/// Physical tables backing the entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Table {
    Campaign,
    AdGroup,
}

impl Table {
    pub fn name(&self) -> &'static str {
        match self {
            Table::Campaign => "campaign",
            Table::AdGroup => "ad_group",
        }
    }
}

/// Lifecycle tag shared by campaigns and ad groups.
/// Deletion is logical: rows are never removed, only marked DELETED.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Active,
    Paused,
    Deleted,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Active => "ACTIVE",
            Status::Paused => "PAUSED",
            Status::Deleted => "DELETED",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(Status::Active),
            "PAUSED" => Ok(Status::Paused),
            "DELETED" => Ok(Status::Deleted),
            other => Err(format!("unknown status: {}", other)),
        }
    }
}
