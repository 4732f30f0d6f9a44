//! Column role detection from header names.

use thrust_model::{ColumnRole, ColumnRoleMap};

/// Maps each role to the first header containing one of its keywords.
///
/// Matching is case-insensitive substring containment. Roles are resolved
/// independently, so one header may serve several roles. Unmatched roles are
/// absent from the map.
pub fn detect_column_roles<S: AsRef<str>>(headers: &[S]) -> ColumnRoleMap {
    let lowered: Vec<String> = headers
        .iter()
        .map(|header| header.as_ref().to_lowercase())
        .collect();

    let mut roles = ColumnRoleMap::new();
    for role in ColumnRole::ALL {
        let matched = lowered.iter().position(|header| {
            role.keywords()
                .iter()
                .any(|keyword| header.contains(keyword))
        });
        if let Some(idx) = matched {
            roles.insert(role, headers[idx].as_ref());
        }
    }
    roles
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_standard_headers() {
        let roles = detect_column_roles(&["Time (s)", "Thrust (N)", "Chamber Pressure", "Temp_C"]);
        assert_eq!(roles.time(), Some("Time (s)"));
        assert_eq!(roles.thrust(), Some("Thrust (N)"));
        assert_eq!(roles.get(ColumnRole::Pressure), Some("Chamber Pressure"));
        assert_eq!(roles.get(ColumnRole::Temperature), Some("Temp_C"));
    }

    #[test]
    fn first_matching_header_wins() {
        let roles = detect_column_roles(&["force_lbf", "thrust_n"]);
        assert_eq!(roles.thrust(), Some("force_lbf"));
    }

    #[test]
    fn short_keywords_match_as_substrings() {
        // "t" is a time keyword, so any header containing it qualifies.
        let roles = detect_column_roles(&["sample", "Thrust"]);
        assert_eq!(roles.time(), Some("Thrust"));
        assert_eq!(roles.thrust(), Some("Thrust"));
    }

    #[test]
    fn unmatched_roles_are_absent() {
        let roles = detect_column_roles(&["x", "y"]);
        assert!(roles.is_empty());
        let none: [&str; 0] = [];
        assert!(detect_column_roles(&none).is_empty());
    }
}
