use crate::output::OutputWriter;
use serde::Serialize;

/// One action the command would take, shown instead of taking it
#[derive(Debug, Clone, Serialize)]
pub struct PlannedAction {
    pub action_type: ActionType,
    pub description: String,
    pub details: Vec<String>,
}

/// Kinds of planned actions
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    ProcessFile,
    WriteFile,
}

impl PlannedAction {
    /// Create a new planned action
    pub fn new(action_type: ActionType, description: impl Into<String>) -> Self {
        Self {
            action_type,
            description: description.into(),
            details: Vec::new(),
        }
    }

    /// Add a detail line to the planned action
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.details.push(detail.into());
        self
    }
}

/// Display planned actions in dry-run mode
pub fn display_planned_actions(output: &OutputWriter, actions: &[PlannedAction]) {
    if output.is_json() {
        let _ = output.result(serde_json::json!({
            "dry_run": true,
            "planned_actions": actions,
        }));
    } else {
        output.section("Planned Actions (Dry Run)");
        for (i, action) in actions.iter().enumerate() {
            let mut line = format!("{}. {:?}: {}", i + 1, action.action_type, action.description);
            if !action.details.is_empty() {
                line.push_str(&format!(" ({})", action.details.join(", ")));
            }
            output.info(line);
        }
        output.info("\nNo files were processed. Run without --dry-run to execute these actions.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_planned_action_creation() {
        let action = PlannedAction::new(ActionType::ProcessFile, "Ingest sites.xml")
            .with_detail("Format: XML")
            .with_detail("Size: 2048 bytes");

        assert_eq!(action.description, "Ingest sites.xml");
        assert_eq!(action.details.len(), 2);
    }

    #[test]
    fn test_action_type_serialization() {
        let action = PlannedAction::new(ActionType::WriteFile, "Write CSV export");
        let json = serde_json::to_string(&action).unwrap();
        assert!(json.contains("write_file"));
    }
}
