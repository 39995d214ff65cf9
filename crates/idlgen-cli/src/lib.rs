//! # idlgen-cli — Command-Line Interface
//!
//! Provides the `idlgen` command-line interface on top of the schema
//! scanner, type registry, and sample synthesizer.
//!
//! ## Subcommands
//!
//! - `idlgen sample` — Sample JSON per struct of interest in the input documents.
//! - `idlgen resolve` — Qualified identity (and optionally sample) of a type reference.
//! - `idlgen stubs` — Publish API stubs for every module-level struct and
//!   every `Wire_*` header struct.
//!
//! ```bash
//! idlgen sample config/generated/*.xml -o output_json
//! idlgen resolve T_VehicleId --schema-dir config/generated --sample
//! idlgen stubs --xml-dir config/generated --struct-dir include -o generated
//! ```
//!
//! ## Crate Policy
//!
//! - Argument parsing lives in `main.rs`; handlers live in their modules.
//! - Resolution and synthesis are delegated to the `idlgen-*` crates.
//! - Handlers return an exit code; I/O failures surface as `anyhow` errors.

pub mod config;
pub mod headers;
pub mod inputs;
pub mod resolve;
pub mod sample;
pub mod stubs;

pub use config::GeneratorConfig;
