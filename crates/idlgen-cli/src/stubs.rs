//! # Stubs Subcommand
//!
//! Generates a C header and source pair exposing one JSON publish function
//! per module-level struct found in a directory of schema documents. Each
//! function forwards its payload to `<prefix>_agent_publish_json` under the
//! struct's topic name.
//!
//! With `--struct-dir`, every `Wire_*` struct in that directory's headers
//! also gets a function forwarding the raw struct to
//! `<prefix>_agent_publish_struct`.

use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use idlgen_schema::{schema_files, SchemaDocument, Topic};

use crate::config::GeneratorConfig;
use crate::headers::{scan_struct_headers, WireStruct};

/// Arguments for the `idlgen stubs` subcommand.
#[derive(Args, Debug)]
pub struct StubsArgs {
    /// Directory of schema documents to collect topics from.
    #[arg(long, value_name = "DIR")]
    pub xml_dir: PathBuf,

    /// Directory of C headers defining `Wire_*` structs.
    #[arg(long, value_name = "DIR")]
    pub struct_dir: Option<PathBuf>,

    /// Directory for the generated `.h` and `.c` files.
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub output: PathBuf,

    /// Prefix of generated files and functions (overrides `api_prefix`).
    #[arg(long, value_name = "PREFIX")]
    pub api_prefix: Option<String>,
}

/// Topics from every schema document in `dir`, deduplicated and sorted by
/// topic name. Documents that fail to parse are logged and skipped.
pub fn collect_topics(dir: &Path) -> Result<Vec<Topic>> {
    let mut seen = BTreeSet::new();
    let mut topics = Vec::new();
    for path in schema_files(dir)? {
        let doc = match SchemaDocument::load(&path) {
            Ok(doc) => doc,
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    %err,
                    "skipping malformed schema document"
                );
                continue;
            }
        };
        for topic in doc.topics() {
            if seen.insert(topic.topic_name()) {
                topics.push(topic);
            }
        }
    }
    topics.sort_by_key(Topic::topic_name);
    Ok(topics)
}

fn function_name(prefix: &str, topic: &Topic) -> String {
    format!("{prefix}_send_{}_json", topic.api_suffix())
}

fn struct_function_name(prefix: &str, wire: &WireStruct) -> String {
    format!("{prefix}_send_{}_struct", wire.base)
}

/// Render `<prefix>_api.h`.
pub fn render_header(
    prefix: &str,
    topics: &[Topic],
    wires: &[WireStruct],
    headers: &[String],
) -> Result<String, std::fmt::Error> {
    let guard = format!("{}_API_GENERATED_H", prefix.to_uppercase());
    let mut out = String::new();
    writeln!(out, "/**")?;
    writeln!(out, " * @file {prefix}_api.h")?;
    writeln!(out, " * @brief JSON publish API, one function per topic.")?;
    writeln!(out, " *")?;
    writeln!(out, " * Generated by idlgen. Do not edit.")?;
    writeln!(out, " */")?;
    writeln!(out)?;
    writeln!(out, "#ifndef {guard}")?;
    writeln!(out, "#define {guard}")?;
    writeln!(out)?;
    writeln!(out, "#ifdef __cplusplus")?;
    writeln!(out, "extern \"C\" {{")?;
    writeln!(out, "#endif")?;
    writeln!(out)?;
    writeln!(out, "#include \"{prefix}_agent.h\"")?;
    for header in headers {
        writeln!(out, "#include \"{header}\"")?;
    }
    for topic in topics {
        writeln!(out)?;
        writeln!(
            out,
            "/** Publish JSON on topic {} ({}). */",
            topic.topic_name(),
            topic.type_name()
        )?;
        writeln!(
            out,
            "int {}(void* agent, const char* json_data);",
            function_name(prefix, topic)
        )?;
    }
    for wire in wires {
        writeln!(out)?;
        writeln!(
            out,
            "/** Publish {} on topic {} ({}). */",
            wire.full, wire.topic_name, wire.type_name
        )?;
        writeln!(
            out,
            "int {}(void* agent, const {}* data);",
            struct_function_name(prefix, wire),
            wire.full
        )?;
    }
    writeln!(out)?;
    writeln!(out, "#ifdef __cplusplus")?;
    writeln!(out, "}}")?;
    writeln!(out, "#endif")?;
    writeln!(out)?;
    writeln!(out, "#endif /* {guard} */")?;
    Ok(out)
}

/// Render `<prefix>_api.c`.
pub fn render_source(
    prefix: &str,
    topics: &[Topic],
    wires: &[WireStruct],
) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    writeln!(out, "/* Generated by idlgen. Do not edit. */")?;
    writeln!(out)?;
    writeln!(out, "#include \"{prefix}_api.h\"")?;
    for topic in topics {
        writeln!(out)?;
        writeln!(
            out,
            "int {}(void* agent, const char* json_data) {{",
            function_name(prefix, topic)
        )?;
        writeln!(out, "    if (!agent || !json_data) return -1;")?;
        writeln!(
            out,
            "    return {prefix}_agent_publish_json(agent, \"{}\", json_data);",
            topic.topic_name()
        )?;
        writeln!(out, "}}")?;
    }
    for wire in wires {
        writeln!(out)?;
        writeln!(
            out,
            "int {}(void* agent, const {}* data) {{",
            struct_function_name(prefix, wire),
            wire.full
        )?;
        writeln!(out, "    if (!agent || !data) return -1;")?;
        write!(out, "    return {prefix}_agent_publish_struct(agent, ")?;
        writeln!(
            out,
            "\"{}\", \"{}\", data, sizeof({}));",
            wire.topic_name, wire.type_name, wire.full
        )?;
        writeln!(out, "}}")?;
    }
    Ok(out)
}

/// Execute the stubs subcommand.
///
/// Returns exit code: 0 on success, 1 if neither the schema documents nor
/// the struct headers yield anything to publish.
pub fn run_stubs(args: &StubsArgs, config: &GeneratorConfig) -> Result<u8> {
    let prefix = args.api_prefix.as_deref().unwrap_or(&config.api_prefix);

    let topics = collect_topics(&args.xml_dir).with_context(|| {
        format!("failed to collect topics from {}", args.xml_dir.display())
    })?;
    let (wires, headers) = match &args.struct_dir {
        Some(dir) => scan_struct_headers(dir)
            .with_context(|| format!("failed to scan struct headers in {}", dir.display()))?,
        None => (Vec::new(), Vec::new()),
    };
    tracing::info!(
        topics = topics.len(),
        wire_structs = wires.len(),
        headers = headers.len(),
        "collected stub inputs"
    );
    if topics.is_empty() && wires.is_empty() {
        println!(
            "ERROR: no module-level structs found in {}",
            args.xml_dir.display()
        );
        return Ok(1);
    }

    std::fs::create_dir_all(&args.output).with_context(|| {
        format!("failed to create output directory {}", args.output.display())
    })?;

    let header_path = args.output.join(format!("{prefix}_api.h"));
    let source_path = args.output.join(format!("{prefix}_api.c"));
    write_file(
        &header_path,
        &render_header(prefix, &topics, &wires, &headers)?,
    )?;
    write_file(&source_path, &render_source(prefix, &topics, &wires)?)?;

    println!(
        "Generated {} topic function(s) and {} struct function(s):",
        topics.len(),
        wires.len()
    );
    println!("  {}", header_path.display());
    println!("  {}", source_path.display());
    Ok(0)
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}
