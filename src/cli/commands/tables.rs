//! Tables command handler

use super::load_model;
use crate::cli::error::CliError;
use crate::models::DuplicatePolicy;
use crate::validation::TableValidator;

/// Handle the tables command: list entity names after duplicate handling
pub fn handle_tables(input: &str, policy: DuplicatePolicy) -> Result<(), CliError> {
    let model = load_model(input, policy)?;

    for name in model.entity_names() {
        println!("{}", name);
    }

    let conflicts = TableValidator::new().detect_naming_conflicts(&model);
    for conflict in &conflicts.naming_conflicts {
        eprintln!(
            "{}: {} definitions, {} -> {}",
            conflict.name,
            conflict.occurrences,
            conflict.policy,
            conflict.resolved_names.join(", ")
        );
    }
    Ok(())
}
