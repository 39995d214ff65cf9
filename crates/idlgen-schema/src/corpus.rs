//! # Schema Corpus Loading
//!
//! Loads schema documents from disk and feeds their declarations into a
//! [`TypeRegistry`]. A directory scan registers every `*.xml` document in
//! it; documents that fail to parse are skipped with a warning so one bad
//! file never aborts the rest of the corpus.

use std::path::{Path, PathBuf};

use idlgen_core::{Declaration, QualifiedName, SchemaError, StructDecl, SCOPE_SEPARATOR};
use idlgen_registry::TypeRegistry;

use crate::normalize;
use crate::xml::{parse_document, XmlNode};

/// Extension of schema documents picked up by directory scans.
const SCHEMA_EXTENSION: &str = "xml";

/// A parsed schema document.
#[derive(Debug, Clone)]
pub struct SchemaDocument {
    path: PathBuf,
    root: XmlNode,
}

impl SchemaDocument {
    /// Read and parse a document from disk.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Io`] if the file cannot be read and
    /// [`SchemaError::DocumentParse`] if it is not well-formed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        Self::parse(path, &text)
    }

    /// Parse a document already held in memory. `path` labels errors.
    pub fn parse(path: impl Into<PathBuf>, text: &str) -> Result<Self, SchemaError> {
        let path = path.into();
        let root = parse_document(text, &path.display().to_string())?;
        Ok(Self { path, root })
    }

    /// Where the document came from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The document's root element.
    pub fn root(&self) -> &XmlNode {
        &self.root
    }

    /// Qualified declarations in document order.
    pub fn declarations(&self) -> Vec<Declaration> {
        normalize::declarations(&self.root)
    }

    /// Structs with their namespaces, in document order.
    pub fn structs(&self) -> Vec<(QualifiedName, StructDecl)> {
        normalize::structs_with_namespace(&self.root)
    }

    /// Structs declared inside a module, as publishable topics.
    pub fn topics(&self) -> Vec<Topic> {
        self.structs()
            .into_iter()
            .filter(|(name, _)| name.namespace().is_some())
            .map(|(name, _)| Topic { name })
            .collect()
    }

    /// Register every declaration; returns how many were registered.
    pub fn register_into(&self, registry: &mut TypeRegistry) -> usize {
        let decls = self.declarations();
        let count = decls.len();
        registry.extend(decls);
        count
    }
}

/// A module-level struct exposed as a publish topic.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Topic {
    pub name: QualifiedName,
}

impl Topic {
    /// Wire topic name, e.g. `P_NSTEL__C_VehicleSpeed`.
    ///
    /// Built from the enclosing module's own name, not the full module
    /// path, so nesting does not change what goes on the wire.
    pub fn topic_name(&self) -> String {
        self.name.logical_name().replace(SCOPE_SEPARATOR, "__")
    }

    /// Identifier fragment for generated functions, e.g. `P_NSTEL_C_VehicleSpeed`.
    pub fn api_suffix(&self) -> String {
        self.name.logical_name().replace(SCOPE_SEPARATOR, "_")
    }

    /// Canonical type name, e.g. `P_NSTEL::C_VehicleSpeed`.
    pub fn type_name(&self) -> String {
        self.name.to_qualified_string()
    }
}

/// Outcome of a directory scan.
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    /// Documents parsed and registered.
    pub documents: usize,
    /// Declarations registered across those documents.
    pub declarations: usize,
    /// Documents skipped because they could not be read or parsed.
    pub skipped: Vec<PathBuf>,
}

impl ScanReport {
    /// Fold another report into this one.
    pub fn merge(&mut self, other: ScanReport) {
        self.documents += other.documents;
        self.declarations += other.declarations;
        self.skipped.extend(other.skipped);
    }
}

/// All schema documents directly inside `dir`, sorted by path.
///
/// # Errors
///
/// Returns [`SchemaError::Enumerate`] if `dir` is not a directory.
pub fn schema_files(dir: &Path) -> Result<Vec<PathBuf>, SchemaError> {
    if !dir.is_dir() {
        return Err(SchemaError::Enumerate {
            pattern: dir.display().to_string(),
            reason: "not a directory".to_string(),
        });
    }

    let pattern = format!(
        "{}/*.{SCHEMA_EXTENSION}",
        glob::Pattern::escape(&dir.display().to_string())
    );
    let entries = glob::glob(&pattern).map_err(|e| SchemaError::Enumerate {
        pattern: pattern.clone(),
        reason: e.to_string(),
    })?;

    let mut files = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) if path.is_file() => files.push(path),
            Ok(_) => {}
            Err(err) => tracing::warn!(%err, "skipping unreadable directory entry"),
        }
    }
    files.sort();
    Ok(files)
}

/// Register every schema document in `dir`.
///
/// # Errors
///
/// Fails only if `dir` itself cannot be enumerated. Individual documents
/// that fail to load are logged and listed in [`ScanReport::skipped`].
pub fn scan_directory(dir: &Path, registry: &mut TypeRegistry) -> Result<ScanReport, SchemaError> {
    let mut report = ScanReport::default();

    for path in schema_files(dir)? {
        match SchemaDocument::load(&path) {
            Ok(doc) => {
                let count = doc.register_into(registry);
                tracing::debug!(
                    path = %path.display(),
                    declarations = count,
                    "registered schema document"
                );
                report.documents += 1;
                report.declarations += count;
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "skipping malformed schema document");
                report.skipped.push(path);
            }
        }
    }

    tracing::info!(
        dir = %dir.display(),
        documents = report.documents,
        declarations = report.declarations,
        skipped = report.skipped.len(),
        "scanned schema directory"
    );
    Ok(report)
}
