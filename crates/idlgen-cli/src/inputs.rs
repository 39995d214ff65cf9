//! # Input Expansion and Registry Loading
//!
//! Turns command-line input arguments into document paths and loads the
//! type registry those documents need. Each input's directory is scanned at
//! most once, so passing many documents from one folder costs one scan.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use idlgen_registry::TypeRegistry;
use idlgen_schema::{scan_directory, ScanReport, SchemaDocument};

const WILDCARD_CHARS: &[char] = &['*', '?', '['];

/// Expand shell-style wildcards in `patterns`.
///
/// Arguments without wildcard characters pass through unchanged, even if
/// the file does not exist; callers report missing files themselves. A
/// pattern that matches nothing is logged and contributes no paths.
pub fn expand_inputs(patterns: &[String]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for pattern in patterns {
        if !pattern.contains(WILDCARD_CHARS) {
            files.push(PathBuf::from(pattern));
            continue;
        }

        let entries = match glob::glob(pattern) {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!(%pattern, %err, "invalid wildcard pattern");
                continue;
            }
        };

        let before = files.len();
        for entry in entries {
            match entry {
                Ok(path) => files.push(path),
                Err(err) => tracing::warn!(%err, "skipping unreadable match"),
            }
        }
        if files.len() == before {
            tracing::warn!(%pattern, "no files matched pattern");
        }
    }
    files
}

/// The directory holding `input`, made absolute so that `a.xml` and
/// `./a.xml` share one entry.
fn containing_dir(input: &Path) -> PathBuf {
    let absolute = input
        .canonicalize()
        .unwrap_or_else(|_| input.to_path_buf());
    match absolute.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Build a registry for `inputs`.
///
/// With `scan_siblings`, every schema document in each input's directory
/// is registered (each directory once). Otherwise only the inputs are.
/// Documents that cannot be loaded are logged and recorded as skipped.
pub fn load_registry(inputs: &[PathBuf], scan_siblings: bool) -> (TypeRegistry, ScanReport) {
    let mut registry = TypeRegistry::new();
    let mut report = ScanReport::default();

    if scan_siblings {
        let dirs: BTreeSet<PathBuf> = inputs.iter().map(|i| containing_dir(i)).collect();
        for dir in dirs {
            match scan_directory(&dir, &mut registry) {
                Ok(scan) => report.merge(scan),
                Err(err) => tracing::warn!(dir = %dir.display(), %err, "cannot scan directory"),
            }
        }
    } else {
        for input in inputs {
            match SchemaDocument::load(input) {
                Ok(doc) => {
                    report.documents += 1;
                    report.declarations += doc.register_into(&mut registry);
                }
                Err(err) => {
                    tracing::warn!(
                        path = %input.display(),
                        %err,
                        "skipping malformed schema document"
                    );
                    report.skipped.push(input.clone());
                }
            }
        }
    }

    (registry, report)
}

/// Build a registry from every schema document in `dirs`.
///
/// # Errors
///
/// Fails if any directory cannot be enumerated.
pub fn load_schema_dirs(dirs: &[PathBuf]) -> Result<(TypeRegistry, ScanReport)> {
    let mut registry = TypeRegistry::new();
    let mut report = ScanReport::default();
    for dir in dirs {
        let scan = scan_directory(dir, &mut registry)
            .with_context(|| format!("failed to scan schema directory {}", dir.display()))?;
        report.merge(scan);
    }
    Ok((registry, report))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TYPES: &str = r#"<types>
        <module name="P"><typedef name="T_Id" type="long"/></module>
    </types>"#;

    const USER: &str = r#"<types>
        <module name="P">
          <struct name="C_User">
            <member name="A_Id" type="nonBasic" nonBasicTypeName="T_Id"/>
          </struct>
        </module>
    </types>"#;

    #[test]
    fn literal_inputs_pass_through() {
        let files = expand_inputs(&["missing.xml".to_string()]);
        assert_eq!(files, vec![PathBuf::from("missing.xml")]);
    }

    #[test]
    fn wildcards_expand_and_empty_matches_drop() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.xml"), TYPES).unwrap();
        std::fs::write(dir.path().join("b.xml"), USER).unwrap();

        let pattern = format!("{}/*.xml", dir.path().display());
        let none = format!("{}/*.idl", dir.path().display());
        let files = expand_inputs(&[pattern, none]);
        assert_eq!(files, vec![dir.path().join("a.xml"), dir.path().join("b.xml")]);
    }

    #[test]
    fn sibling_scan_registers_whole_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("types.xml"), TYPES).unwrap();
        let user = dir.path().join("user.xml");
        std::fs::write(&user, USER).unwrap();

        let (registry, report) = load_registry(&[user.clone(), user], true);
        assert_eq!(report.documents, 2);
        assert_eq!(registry.resolve_type("T_Id"), "long");
        assert!(registry.lookup_struct("C_User").is_some());
    }

    #[test]
    fn inputs_only_when_siblings_disabled() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("types.xml"), TYPES).unwrap();
        let user = dir.path().join("user.xml");
        std::fs::write(&user, USER).unwrap();

        let (registry, report) = load_registry(&[user], false);
        assert_eq!(report.documents, 1);
        assert_eq!(registry.typedef_count(), 0);
        assert_eq!(registry.struct_count(), 1);
    }

    #[test]
    fn schema_dirs_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_schema_dirs(&[dir.path().join("nope")]).is_err());
        let (registry, _) = load_schema_dirs(&[dir.path().to_path_buf()]).unwrap();
        assert!(registry.is_empty());
    }
}
