//! Choosing the time and thrust columns of a dataset.

use std::fmt;

use serde::Serialize;

use thrust_model::{ColumnRoleMap, ColumnType, RawDataset};

use crate::options::AnalysisOptions;

/// How a column pair was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SelectionSource {
    /// Named by the caller.
    Explicit,
    /// Resolved from header keywords.
    Roles,
    /// Picked from inferred column types.
    AutoDetected,
}

impl fmt::Display for SelectionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SelectionSource::Explicit => "explicit",
            SelectionSource::Roles => "roles",
            SelectionSource::AutoDetected => "auto-detected",
        })
    }
}

/// The (time, thrust) column pair used for metric extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSelection {
    pub time: String,
    pub thrust: String,
    pub source: SelectionSource,
}

/// Outcome of column selection: a pair, or the reason there is none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Selected(ColumnSelection),
    /// A column named by the caller does not exist.
    UnknownColumn(String),
    /// Neither roles nor column types yield a usable pair.
    NotFound,
}

/// Picks the columns to analyse.
///
/// Explicit overrides take precedence over detected roles for the role they
/// name. When roles do not give both columns and no override is set, the
/// first timestamp-or-number column becomes time and the first other number
/// column becomes thrust.
pub fn select_columns(
    dataset: &RawDataset,
    roles: &ColumnRoleMap,
    options: &AnalysisOptions,
) -> Selection {
    if options.has_column_overrides() {
        let time = options.time_column.as_deref().or(roles.time());
        let thrust = options.thrust_column.as_deref().or(roles.thrust());
        for name in [time, thrust].into_iter().flatten() {
            if dataset.column_index(name).is_none() {
                return Selection::UnknownColumn(name.to_string());
            }
        }
        if let (Some(time), Some(thrust)) = (time, thrust) {
            return Selection::Selected(ColumnSelection {
                time: time.to_string(),
                thrust: thrust.to_string(),
                source: SelectionSource::Explicit,
            });
        }
        return Selection::NotFound;
    }

    if let (Some(time), Some(thrust)) = (roles.time(), roles.thrust()) {
        return Selection::Selected(ColumnSelection {
            time: time.to_string(),
            thrust: thrust.to_string(),
            source: SelectionSource::Roles,
        });
    }

    auto_detect(dataset).map_or(Selection::NotFound, Selection::Selected)
}

fn auto_detect(dataset: &RawDataset) -> Option<ColumnSelection> {
    let time = dataset
        .headers_where(ColumnType::is_time_like)
        .into_iter()
        .next()?;
    let thrust = dataset
        .headers_where(|column_type| column_type == ColumnType::Number)
        .into_iter()
        .find(|header| *header != time)?;
    Some(ColumnSelection {
        time: time.to_string(),
        thrust: thrust.to_string(),
        source: SelectionSource::AutoDetected,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use thrust_model::{ColumnRole, TypeInference};

    fn dataset(columns: &[(&str, ColumnType)]) -> RawDataset {
        RawDataset {
            headers: columns.iter().map(|(name, _)| (*name).to_string()).collect(),
            rows: Vec::new(),
            inferred_types: columns
                .iter()
                .map(|(_, column_type)| TypeInference::new(*column_type, 1.0))
                .collect(),
            warnings: Vec::new(),
        }
    }

    fn roles(time: Option<&str>, thrust: Option<&str>) -> ColumnRoleMap {
        let mut map = ColumnRoleMap::new();
        if let Some(time) = time {
            map.insert(ColumnRole::Time, time);
        }
        if let Some(thrust) = thrust {
            map.insert(ColumnRole::Thrust, thrust);
        }
        map
    }

    #[test]
    fn roles_win_when_both_resolve() {
        let data = dataset(&[("time", ColumnType::Number), ("thrust", ColumnType::Number)]);
        let selection = select_columns(
            &data,
            &roles(Some("time"), Some("thrust")),
            &AnalysisOptions::default(),
        );
        assert_eq!(
            selection,
            Selection::Selected(ColumnSelection {
                time: "time".to_string(),
                thrust: "thrust".to_string(),
                source: SelectionSource::Roles,
            })
        );
    }

    #[test]
    fn falls_back_to_column_types() {
        let data = dataset(&[
            ("label", ColumnType::String),
            ("clock", ColumnType::Timestamp),
            ("load", ColumnType::Number),
        ]);
        let Selection::Selected(selection) =
            select_columns(&data, &roles(None, None), &AnalysisOptions::default())
        else {
            panic!("expected a selection");
        };
        assert_eq!(selection.time, "clock");
        assert_eq!(selection.thrust, "load");
        assert_eq!(selection.source, SelectionSource::AutoDetected);
    }

    #[test]
    fn fallback_needs_two_distinct_columns() {
        let data = dataset(&[("x", ColumnType::Number), ("y", ColumnType::String)]);
        assert_eq!(
            select_columns(&data, &roles(None, None), &AnalysisOptions::default()),
            Selection::NotFound
        );
    }

    #[test]
    fn explicit_override_replaces_one_role() {
        let data = dataset(&[
            ("time", ColumnType::Number),
            ("thrust", ColumnType::Number),
            ("load_cell_2", ColumnType::Number),
        ]);
        let options = AnalysisOptions::default().with_thrust_column("load_cell_2");
        let Selection::Selected(selection) =
            select_columns(&data, &roles(Some("time"), Some("thrust")), &options)
        else {
            panic!("expected a selection");
        };
        assert_eq!(selection.time, "time");
        assert_eq!(selection.thrust, "load_cell_2");
        assert_eq!(selection.source, SelectionSource::Explicit);
    }

    #[test]
    fn unknown_override_is_reported() {
        let data = dataset(&[("time", ColumnType::Number)]);
        let options = AnalysisOptions::default().with_thrust_column("force");
        assert_eq!(
            select_columns(&data, &roles(Some("time"), None), &options),
            Selection::UnknownColumn("force".to_string())
        );
    }
}
