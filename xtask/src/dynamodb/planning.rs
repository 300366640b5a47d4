//! Pure functions for calculating deployment plans (Functional Core).

use super::config::TableConfig;

/// Represents the current state of a table.
#[derive(Debug, Clone)]
pub struct TableState {
    pub status: TableStatus,
    /// Name of the HASH key attribute, if DynamoDB reported one.
    pub partition_key: Option<String>,
    /// Whether the table also has a RANGE key.
    pub has_sort_key: bool,
}

/// Table status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableStatus {
    Active,
    Creating,
    Updating,
    Deleting,
}

/// Planned changes for deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployPlan {
    /// Table doesn't exist, needs to be created.
    CreateTable { config: TableConfig },
    /// Table exists with a key schema the server can't use.
    ///
    /// Key schemas are immutable, so this can only be fixed by destroying
    /// the table first.
    KeySchemaMismatch {
        table_name: String,
        expected: String,
        found: String,
    },
    /// Table is up to date, no changes needed.
    NoChanges { table_name: String },
}

/// Plan for destroying a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestroyPlan {
    /// Table exists and will be deleted.
    DeleteTable { table_name: String },
    /// Table doesn't exist, nothing to do.
    AlreadyGone { table_name: String },
}

/// Pure function: Calculate what changes are needed to reach desired state.
pub fn calculate_deploy_plan(current: Option<&TableState>, desired: &TableConfig) -> DeployPlan {
    let Some(state) = current else {
        return DeployPlan::CreateTable {
            config: desired.clone(),
        };
    };

    let expected = desired.partition_key.name.as_str();
    match state.partition_key.as_deref() {
        Some(found) if found == expected && !state.has_sort_key => DeployPlan::NoChanges {
            table_name: desired.table_name.clone(),
        },
        found => DeployPlan::KeySchemaMismatch {
            table_name: desired.table_name.clone(),
            expected: format!("HASH {expected}"),
            found: describe_key_schema(found, state.has_sort_key),
        },
    }
}

fn describe_key_schema(partition_key: Option<&str>, has_sort_key: bool) -> String {
    let hash = match partition_key {
        Some(name) => format!("HASH {name}"),
        None => "no HASH key".to_string(),
    };

    if has_sort_key {
        format!("{hash} + RANGE key")
    } else {
        hash
    }
}

/// Pure function: Calculate destroy plan.
pub fn calculate_destroy_plan(current: Option<&TableState>, table_name: &str) -> DestroyPlan {
    match current {
        Some(_) => DestroyPlan::DeleteTable {
            table_name: table_name.to_string(),
        },
        None => DestroyPlan::AlreadyGone {
            table_name: table_name.to_string(),
        },
    }
}

/// Pure function: Format a deploy plan for display.
pub fn format_deploy_plan(plan: &DeployPlan) -> Vec<String> {
    match plan {
        DeployPlan::CreateTable { config } => vec![
            format!("+ Create table: {}", config.table_name),
            format!("  Partition key: {} (S)", config.partition_key.name),
            "  Billing: PAY_PER_REQUEST".to_string(),
        ],
        DeployPlan::KeySchemaMismatch {
            table_name,
            expected,
            found,
        } => vec![
            format!("! Table '{table_name}' has an incompatible key schema"),
            format!("  Expected: {expected}"),
            format!("  Found: {found}"),
            "  Run with --destroy first to recreate it".to_string(),
        ],
        DeployPlan::NoChanges { table_name } => {
            vec![format!("= Table '{}' is up to date", table_name)]
        }
    }
}

/// Pure function: Format a destroy plan for display.
pub fn format_destroy_plan(plan: &DestroyPlan) -> Vec<String> {
    match plan {
        DestroyPlan::DeleteTable { table_name } => {
            vec![format!(
                "- Delete table: {} (ALL DATA WILL BE LOST)",
                table_name
            )]
        }
        DestroyPlan::AlreadyGone { table_name } => {
            vec![format!("= Table '{}' does not exist", table_name)]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamodb::config::todos_table_config;

    fn state(partition_key: Option<&str>, has_sort_key: bool) -> TableState {
        TableState {
            status: TableStatus::Active,
            partition_key: partition_key.map(str::to_string),
            has_sort_key,
        }
    }

    #[test]
    fn test_missing_table_is_created() {
        let desired = todos_table_config();

        let plan = calculate_deploy_plan(None, &desired);

        assert_eq!(plan, DeployPlan::CreateTable { config: desired });
    }

    #[test]
    fn test_matching_table_needs_no_changes() {
        let desired = todos_table_config().with_table_name("todos-dev");

        let plan = calculate_deploy_plan(Some(&state(Some("id"), false)), &desired);

        assert_eq!(
            plan,
            DeployPlan::NoChanges {
                table_name: "todos-dev".to_string()
            }
        );
    }

    #[test]
    fn test_wrong_partition_key_is_reported() {
        let desired = todos_table_config();

        let plan = calculate_deploy_plan(Some(&state(Some("PK"), true)), &desired);

        assert_eq!(
            plan,
            DeployPlan::KeySchemaMismatch {
                table_name: "Todos".to_string(),
                expected: "HASH id".to_string(),
                found: "HASH PK + RANGE key".to_string(),
            }
        );
    }

    #[test]
    fn test_extra_sort_key_is_reported() {
        let desired = todos_table_config();

        let plan = calculate_deploy_plan(Some(&state(Some("id"), true)), &desired);

        assert!(matches!(plan, DeployPlan::KeySchemaMismatch { .. }));
    }

    #[test]
    fn test_destroy_plan() {
        assert_eq!(
            calculate_destroy_plan(Some(&state(Some("id"), false)), "Todos"),
            DestroyPlan::DeleteTable {
                table_name: "Todos".to_string()
            }
        );
        assert_eq!(
            calculate_destroy_plan(None, "Todos"),
            DestroyPlan::AlreadyGone {
                table_name: "Todos".to_string()
            }
        );
    }

    #[test]
    fn test_format_create_plan() {
        let lines = format_deploy_plan(&DeployPlan::CreateTable {
            config: todos_table_config(),
        });

        assert_eq!(lines[0], "+ Create table: Todos");
        assert_eq!(lines[1], "  Partition key: id (S)");
    }
}
