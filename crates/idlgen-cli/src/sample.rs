//! # Sample Subcommand
//!
//! Generates one pretty-printed sample JSON file per struct of interest in
//! each input document. Types referenced by those structs resolve against
//! every schema document in the inputs' directories.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use idlgen_core::{QualifiedName, SCOPE_SEPARATOR};
use idlgen_sample::SampleGenerator;
use idlgen_schema::SchemaDocument;

use crate::config::GeneratorConfig;
use crate::inputs::{expand_inputs, load_registry};

/// Characters that cannot appear in generated file names.
const FORBIDDEN_FILENAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*', ' '];

/// Arguments for the `idlgen sample` subcommand.
#[derive(Args, Debug)]
pub struct SampleArgs {
    /// Schema documents to generate samples for. Wildcards are expanded.
    #[arg(value_name = "INPUT", required = true)]
    pub inputs: Vec<String>,

    /// Output directory (overrides `output_dir` from the config file).
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Struct name prefix selecting structs of interest, case-insensitive.
    #[arg(long, value_name = "PREFIX")]
    pub prefix: Option<String>,
}

/// Replace characters that are unsafe in file names with `_`.
pub fn sanitize_filename(name: &str) -> String {
    name.replace(FORBIDDEN_FILENAME_CHARS, "_")
}

/// Output file name for a struct, e.g. `P_NSTEL__C_VehicleSpeed.json`.
pub fn output_file_name(logical_name: &str) -> String {
    format!(
        "{}.json",
        sanitize_filename(&logical_name.replace(SCOPE_SEPARATOR, "__"))
    )
}

fn matches_prefix(name: &QualifiedName, prefix: &str) -> bool {
    name.name()
        .to_uppercase()
        .starts_with(&prefix.to_uppercase())
}

/// Execute the sample subcommand.
///
/// Returns exit code: 0 when every input was processed, 1 if any input
/// was missing or could not be parsed.
pub fn run_sample(args: &SampleArgs, config: &GeneratorConfig) -> Result<u8> {
    let output_dir = args.output.as_ref().unwrap_or(&config.output_dir);
    let prefix = args.prefix.as_deref().unwrap_or(&config.struct_prefix);

    let mut had_failures = false;
    let mut inputs = Vec::new();
    for path in expand_inputs(&args.inputs) {
        if path.is_file() {
            inputs.push(path);
        } else {
            println!("ERROR: input file not found: {}", path.display());
            had_failures = true;
        }
    }

    let (registry, report) = load_registry(&inputs, config.scan_sibling_documents);
    tracing::info!(
        documents = report.documents,
        declarations = report.declarations,
        "loaded type registry"
    );

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output directory {}", output_dir.display()))?;

    let generator = SampleGenerator::new(&registry);
    let mut written = 0usize;
    for input in &inputs {
        match generate_for_document(&generator, input, prefix, output_dir) {
            Ok(count) => written += count,
            Err(e) => {
                println!("ERROR: {}: {e:#}", input.display());
                had_failures = true;
            }
        }
    }

    println!(
        "Generated {written} sample(s) from {} document(s) in {}",
        inputs.len(),
        output_dir.display()
    );

    Ok(u8::from(had_failures))
}

/// Write samples for the structs of interest in one document.
fn generate_for_document(
    generator: &SampleGenerator<'_>,
    input: &Path,
    prefix: &str,
    output_dir: &Path,
) -> Result<usize> {
    let doc = SchemaDocument::load(input)?;
    println!("Processing {}", input.display());

    let mut count = 0usize;
    for (name, _) in doc.structs() {
        if !matches_prefix(&name, prefix) {
            continue;
        }
        let sample = generator.generate_sample(&name.to_qualified_string(), false);
        let json = sample.to_json_pretty()?;

        let logical_name = name.logical_name();
        let unresolved = sample.placeholder_count();
        if unresolved > 0 {
            tracing::warn!(name = %logical_name, unresolved, "sample contains unresolved types");
        }

        let file_name = output_file_name(&logical_name);
        let path = output_dir.join(&file_name);
        std::fs::write(&path, json + "\n")
            .with_context(|| format!("failed to write {}", path.display()))?;

        println!("  {logical_name} -> {file_name}");
        count += 1;
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_replaces_forbidden_characters() {
        assert_eq!(sanitize_filename("a<b>c:d\"e/f\\g|h?i*j k"), "a_b_c_d_e_f_g_h_i_j_k");
        assert_eq!(sanitize_filename("P_NSTEL__C_Speed"), "P_NSTEL__C_Speed");
    }

    #[test]
    fn output_name_flattens_scopes() {
        assert_eq!(output_file_name("P_NSTEL::C_Speed"), "P_NSTEL__C_Speed.json");
        assert_eq!(output_file_name("A::B::C_X"), "A__B__C_X.json");
        assert_eq!(output_file_name("C_Top"), "C_Top.json");
    }

    #[test]
    fn prefix_match_is_case_insensitive() {
        let name = QualifiedName::new(Some("P"), "c_lower");
        assert!(matches_prefix(&name, "C_"));
        assert!(!matches_prefix(&name, "T_"));
        assert!(matches_prefix(&name, ""));
    }
}
