//! Semantic column roles.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical meaning a column can carry in a static-fire log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnRole {
    Time,
    Thrust,
    Temperature,
    Pressure,
}

impl ColumnRole {
    pub const ALL: [ColumnRole; 4] = [
        ColumnRole::Time,
        ColumnRole::Thrust,
        ColumnRole::Temperature,
        ColumnRole::Pressure,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ColumnRole::Time => "time",
            ColumnRole::Thrust => "thrust",
            ColumnRole::Temperature => "temperature",
            ColumnRole::Pressure => "pressure",
        }
    }

    /// Lower-case keywords matched by substring against lower-cased headers.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            ColumnRole::Time => &[
                "time",
                "t",
                "timestamp",
                "datetime",
                "time_s",
                "seconds",
                "ms",
                "milliseconds",
            ],
            ColumnRole::Thrust => &["thrust", "force", "f", "thrust_n", "thrust_lbs", "newtons"],
            ColumnRole::Temperature => &[
                "temp",
                "temperature",
                "temp_c",
                "temp_f",
                "celsius",
                "fahrenheit",
            ],
            ColumnRole::Pressure => &[
                "pressure",
                "press",
                "psi",
                "bar",
                "pa",
                "pressure_psi",
                "pressure_bar",
            ],
        }
    }
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role → header assignments. Unresolved roles are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnRoleMap(BTreeMap<ColumnRole, String>);

impl ColumnRoleMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, role: ColumnRole, header: impl Into<String>) {
        self.0.insert(role, header.into());
    }

    pub fn get(&self, role: ColumnRole) -> Option<&str> {
        self.0.get(&role).map(String::as_str)
    }

    pub fn time(&self) -> Option<&str> {
        self.get(ColumnRole::Time)
    }

    pub fn thrust(&self) -> Option<&str> {
        self.get(ColumnRole::Thrust)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ColumnRole, &str)> {
        self.0.iter().map(|(role, header)| (*role, header.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_accessors() {
        let mut roles = ColumnRoleMap::new();
        assert!(roles.is_empty());
        roles.insert(ColumnRole::Time, "Time (s)");
        roles.insert(ColumnRole::Thrust, "Thrust_N");
        assert_eq!(roles.time(), Some("Time (s)"));
        assert_eq!(roles.thrust(), Some("Thrust_N"));
        assert_eq!(roles.get(ColumnRole::Pressure), None);
        assert_eq!(roles.len(), 2);
    }

    #[test]
    fn iteration_follows_role_order() {
        let mut roles = ColumnRoleMap::new();
        roles.insert(ColumnRole::Pressure, "psi");
        roles.insert(ColumnRole::Time, "t");
        let order: Vec<ColumnRole> = roles.iter().map(|(role, _)| role).collect();
        assert_eq!(order, vec![ColumnRole::Time, ColumnRole::Pressure]);
    }
}
