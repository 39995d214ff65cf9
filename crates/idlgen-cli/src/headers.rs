//! # Wire Struct Headers
//!
//! Finds `typedef struct Wire_<Base>` definitions in a directory of C
//! headers so that `idlgen stubs` can emit one struct publish function per
//! wire struct alongside the JSON ones.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Result};
use regex::Regex;

/// A `Wire_*` struct found in a header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireStruct {
    /// The C type name, e.g. `Wire_P_NSTEL_C_Speed`.
    pub full: String,
    /// The type name without the `Wire_` prefix.
    pub base: String,
    /// File name of the header that defines it.
    pub header: String,
    /// Topic the struct is published on.
    pub topic_name: String,
    /// Qualified type name sent with each publish.
    pub type_name: String,
}

impl WireStruct {
    /// Topic and type name taken from a `Wire struct for <Canonical>` doc
    /// comment.
    fn documented(full: &str, base: &str, header: &str, canonical: &str) -> Self {
        Self {
            full: full.to_string(),
            base: base.to_string(),
            header: header.to_string(),
            topic_name: canonical.replace("::", "__"),
            type_name: canonical.to_string(),
        }
    }

    /// Topic and type name guessed from the base name: the first `_`
    /// separates the module from the struct.
    fn guessed(full: &str, base: &str, header: &str) -> Self {
        Self {
            full: full.to_string(),
            base: base.to_string(),
            header: header.to_string(),
            topic_name: base.replacen('_', "__", 1),
            type_name: base.replacen('_', "::", 1),
        }
    }
}

/// Compiled patterns for recognizing wire structs.
pub struct WireStructScanner {
    documented: Regex,
    bare: Regex,
}

impl WireStructScanner {
    pub fn new() -> Result<Self> {
        let documented = Regex::new(
            r"(?s)/\*\*.*?Wire struct for ([\w:]+).*?\*/\s*typedef struct (Wire_(\w+))",
        )
        .map_err(|e| anyhow!("failed to compile wire struct comment regex: {e}"))?;
        let bare = Regex::new(r"typedef struct (Wire_(\w+))")
            .map_err(|e| anyhow!("failed to compile wire struct regex: {e}"))?;
        Ok(Self { documented, bare })
    }

    /// Wire structs defined in one header's `content`.
    ///
    /// Doc-commented definitions win. Only a header with none of them falls
    /// back to guessing names from every bare `typedef struct Wire_*`.
    pub fn scan(&self, header: &str, content: &str) -> Vec<WireStruct> {
        let documented: Vec<_> = self
            .documented
            .captures_iter(content)
            .map(|c| WireStruct::documented(&c[2], &c[3], header, &c[1]))
            .collect();
        if !documented.is_empty() {
            return documented;
        }
        self.bare
            .captures_iter(content)
            .map(|c| WireStruct::guessed(&c[1], &c[2], header))
            .collect()
    }
}

/// Every `*.h` file directly inside `dir`, sorted.
pub fn header_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        bail!("struct directory {} is not a directory", dir.display());
    }
    let pattern = format!("{}/*.h", glob::Pattern::escape(&dir.display().to_string()));
    let mut files = Vec::new();
    for entry in glob::glob(&pattern)? {
        match entry {
            Ok(path) if path.is_file() => files.push(path),
            Ok(_) => {}
            Err(err) => tracing::warn!(%err, "skipping unreadable directory entry"),
        }
    }
    files.sort();
    Ok(files)
}

/// Wire structs from every header in `dir`, plus the header file names.
///
/// A struct whose C type name was already found in an earlier header is
/// skipped.
pub fn scan_struct_headers(dir: &Path) -> Result<(Vec<WireStruct>, Vec<String>)> {
    let scanner = WireStructScanner::new()?;
    let mut structs: Vec<WireStruct> = Vec::new();
    let mut headers = Vec::new();
    for path in header_files(dir)? {
        let header = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "skipping unreadable header");
                continue;
            }
        };
        for wire in scanner.scan(&header, &content) {
            if structs.iter().any(|w| w.full == wire.full) {
                tracing::debug!(name = %wire.full, header = %header, "duplicate wire struct");
                continue;
            }
            structs.push(wire);
        }
        headers.push(header);
    }
    Ok((structs, headers))
}
