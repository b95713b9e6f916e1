//! Validate command implementation

use super::load_model;
use crate::cli::error::CliError;
use crate::model::TableSelection;
use crate::models::DuplicatePolicy;
use crate::validation::{RelationshipValidationResult, RelationshipValidator};

/// Format the relationship report, one line per dropped declaration
pub fn format_report(result: &RelationshipValidationResult) -> Vec<String> {
    let mut lines = Vec::new();
    for dangling in &result.dangling {
        lines.push(format!(
            "dangling: {} -> {} (missing {})",
            dangling.from,
            dangling.to,
            dangling.missing_entities.join(", ")
        ));
    }
    for unsupported in &result.unsupported {
        lines.push(format!(
            "unsupported: {} -> {} ({} to {})",
            unsupported.from,
            unsupported.to,
            unsupported.cardinality_from,
            unsupported.cardinality_to
        ));
    }
    lines
}

/// Handle the validate command
pub fn handle_validate(
    input: &str,
    policy: DuplicatePolicy,
    selection: &TableSelection,
) -> Result<(), CliError> {
    let model = load_model(input, policy)?;
    let result = RelationshipValidator::new().validate(&model, selection);

    if result.is_clean() {
        println!("Validation successful");
        return Ok(());
    }

    for line in format_report(&result) {
        println!("{}", line);
    }
    Ok(())
}
