//! Diagram command handler

use super::{load_model, write_output};
use crate::cli::error::CliError;
use crate::export::{DotExporter, DotOptions, ExportResult, MermaidExporter};
use crate::model::{ResolvedModel, TableSelection};
use crate::models::DuplicatePolicy;
use std::path::PathBuf;

/// Diagram notation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagramFormat {
    /// Mermaid `erDiagram`
    Mermaid,
    /// Graphviz DOT
    Dot,
}

/// Arguments for the diagram command
#[derive(Debug, Clone)]
pub struct DiagramArgs {
    pub input: String,
    pub format: DiagramFormat,
    pub full_metadata: bool,
    pub policy: DuplicatePolicy,
    pub selection: TableSelection,
    pub output: Option<PathBuf>,
}

/// Render the requested notation.
///
/// The ER notation always shows every resolved entity; the selection only
/// narrows the DOT graph.
pub fn render_diagram(model: &ResolvedModel, args: &DiagramArgs) -> ExportResult {
    match args.format {
        DiagramFormat::Mermaid => MermaidExporter::new().export(model),
        DiagramFormat::Dot => DotExporter::new(DotOptions {
            full_metadata: args.full_metadata,
        })
        .export(model, &args.selection),
    }
}

/// Handle the diagram command
pub fn handle_diagram(args: &DiagramArgs) -> Result<(), CliError> {
    let model = load_model(&args.input, args.policy)?;
    let result = render_diagram(&model, args);
    write_output(&result.content, args.output.as_deref())?;

    if let Some(path) = &args.output {
        eprintln!("Wrote {} diagram to {}", result.format, path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelLoader;

    const YAML: &str = r#"
schema:
  - name: Orders
    properties:
      - name: id
        logicalType: integer
        primaryKey: true
  - name: Customers
    properties:
      - name: id
"#;

    fn args(format: DiagramFormat, selection: TableSelection) -> DiagramArgs {
        DiagramArgs {
            input: "-".to_string(),
            format,
            full_metadata: false,
            policy: DuplicatePolicy::AddPostfix,
            selection,
            output: None,
        }
    }

    #[test]
    fn test_mermaid_ignores_selection() {
        let model = ModelLoader::default().load(YAML).unwrap();
        let result = render_diagram(
            &model,
            &args(DiagramFormat::Mermaid, TableSelection::only(["Orders"])),
        );
        assert_eq!(result.format, "mermaid");
        assert!(result.content.contains("Customers {"));
    }

    #[test]
    fn test_dot_honours_selection() {
        let model = ModelLoader::default().load(YAML).unwrap();
        let result = render_diagram(
            &model,
            &args(DiagramFormat::Dot, TableSelection::only(["Orders"])),
        );
        assert_eq!(result.format, "dot");
        assert!(result.content.contains("\"Orders\""));
        assert!(!result.content.contains("\"Customers\""));
    }
}
