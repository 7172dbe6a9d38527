//! Project metadata lookup through `cargo metadata`.
//!
//! Paths are resolved fresh on every invocation; nothing is cached between
//! runs, so a moved `target` directory is picked up immediately.

use crate::error::TaskError;
use crate::process::Runner;
use crate::profile::BuildProfile;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::process::Command;

#[derive(Debug, Deserialize)]
struct Metadata {
    packages: Vec<Package>,
    target_directory: PathBuf,
    workspace_root: PathBuf,
}

#[derive(Debug, Deserialize)]
struct Package {
    name: String,
    manifest_path: PathBuf,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectMetadata {
    pub package: String,
    pub target_dir: PathBuf,
}

/// Ask the toolchain for the kernel package name and its output root.
pub fn query<R: Runner>(
    runner: &mut R,
    cargo: &Path,
    root: &Path,
) -> Result<ProjectMetadata, TaskError> {
    let mut cmd = Command::new(cargo);
    cmd.current_dir(root)
        .args(["metadata", "--format-version", "1", "--no-deps"]);

    let output = runner
        .output(&mut cmd)
        .map_err(|e| TaskError::query(format!("could not run `{}`: {e}", cargo.display())))?;

    if !output.status.success() {
        return Err(TaskError::ToolchainQuery {
            reason: format!("`{} metadata` exited with {}", cargo.display(), output.status),
            status: Some(output.status),
        });
    }

    parse(&output.stdout)
}

/// The package whose manifest sits at the workspace root wins; otherwise the
/// first listed package.
pub fn parse(json: &[u8]) -> Result<ProjectMetadata, TaskError> {
    let meta: Metadata = serde_json::from_slice(json)
        .map_err(|e| TaskError::query(format!("unparseable output: {e}")))?;

    let root_manifest = meta.workspace_root.join("Cargo.toml");
    let package = meta
        .packages
        .iter()
        .find(|p| p.manifest_path == root_manifest)
        .or_else(|| meta.packages.first())
        .ok_or_else(|| TaskError::query("no packages in project"))?;

    Ok(ProjectMetadata {
        package: package.name.clone(),
        target_dir: meta.target_directory,
    })
}

/// Everything later steps need to find the kernel binary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub package: String,
    pub target_dir: PathBuf,
    pub kernel: PathBuf,
}

impl ResolvedPaths {
    pub fn new(meta: ProjectMetadata, target: &str, profile: BuildProfile) -> Self {
        let kernel = meta
            .target_dir
            .join(target_dir_name(target))
            .join(profile.dir_name())
            .join(&meta.package);
        ResolvedPaths {
            package: meta.package,
            target_dir: meta.target_dir,
            kernel,
        }
    }
}

/// Cargo names the output directory of a `*.json` target after its file stem.
pub fn target_dir_name(target: &str) -> &str {
    let path = Path::new(target);
    if path.extension().is_some_and(|ext| ext == "json") {
        path.file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or(target)
    } else {
        target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Vec<u8> {
        json!({
            "packages": [
                { "name": "kfs-macros", "manifest_path": "/src/kfs/macros/Cargo.toml" },
                { "name": "kfs", "manifest_path": "/src/kfs/Cargo.toml" }
            ],
            "target_directory": "/src/kfs/target",
            "workspace_root": "/src/kfs",
            "version": 1
        })
        .to_string()
        .into_bytes()
    }

    #[test]
    fn test_parse_prefers_root_package() {
        let meta = parse(&sample()).unwrap();
        assert_eq!(meta.package, "kfs");
        assert_eq!(meta.target_dir, PathBuf::from("/src/kfs/target"));
    }

    #[test]
    fn test_parse_falls_back_to_first_package() {
        let json = json!({
            "packages": [{ "name": "kernel", "manifest_path": "/w/kernel/Cargo.toml" }],
            "target_directory": "/w/target",
            "workspace_root": "/w"
        });
        let meta = parse(json.to_string().as_bytes()).unwrap();
        assert_eq!(meta.package, "kernel");
    }

    #[test]
    fn test_parse_rejects_malformed_output() {
        assert!(matches!(
            parse(b"error: could not find `Cargo.toml`"),
            Err(TaskError::ToolchainQuery { .. })
        ));
        let empty = json!({ "packages": [], "target_directory": "/t", "workspace_root": "/" });
        assert!(matches!(
            parse(empty.to_string().as_bytes()),
            Err(TaskError::ToolchainQuery { .. })
        ));
    }

    #[test]
    fn test_target_dir_name() {
        assert_eq!(target_dir_name("i386-unknown-none.json"), "i386-unknown-none");
        assert_eq!(target_dir_name("targets/x86-kfs.json"), "x86-kfs");
        assert_eq!(target_dir_name("i686-unknown-linux-gnu"), "i686-unknown-linux-gnu");
    }

    #[test]
    fn test_kernel_path_per_profile() {
        let meta = parse(&sample()).unwrap();
        let debug = ResolvedPaths::new(meta.clone(), "i386-unknown-none.json", BuildProfile::Debug);
        let release = ResolvedPaths::new(meta.clone(), "i386-unknown-none.json", BuildProfile::Release);

        assert_eq!(
            debug.kernel,
            PathBuf::from("/src/kfs/target/i386-unknown-none/debug/kfs")
        );
        assert_eq!(
            release.kernel,
            PathBuf::from("/src/kfs/target/i386-unknown-none/release/kfs")
        );
        assert_eq!(
            debug,
            ResolvedPaths::new(meta, "i386-unknown-none.json", BuildProfile::Debug)
        );
    }
}
