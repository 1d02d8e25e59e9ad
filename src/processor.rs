//! Materialization of a project tree from a template and built-in generators.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use walkdir::WalkDir;

use crate::constants::{SKELETON_DIRS, TEMPLATE_SUFFIX};
use crate::error::{Error, Result};
use crate::generators::{self, Generator, Scaffold};
use crate::renderer::TemplateRenderer;
use crate::template::TemplateHandle;

/// A file every generated project contains, whichever source provides it.
pub struct LogicalFile {
    /// Template file name at the root of the variant directory.
    pub template: &'static str,
    /// Output path relative to the project directory.
    pub target: &'static str,
    pub generator: Generator,
}

static PACKAGE_JSON: LogicalFile = LogicalFile {
    template: "package.json.j2",
    target: "package.json",
    generator: generators::package_json,
};

static TSCONFIG_JSON: LogicalFile = LogicalFile {
    template: "tsconfig.json.j2",
    target: "tsconfig.json",
    generator: generators::tsconfig_json,
};

static ESBUILD_JS: LogicalFile = LogicalFile {
    template: "esbuild.js.j2",
    target: "esbuild.js",
    generator: generators::esbuild_js,
};

static METADATA_JSON: LogicalFile = LogicalFile {
    template: "metadata.json.j2",
    target: "src/metadata.json",
    generator: generators::metadata_json,
};

static EXTENSION_TS: LogicalFile = LogicalFile {
    template: "extension.ts.j2",
    target: "src/extension.ts",
    generator: generators::extension_ts,
};

/// Logical files for a scaffold; the bundler config only exists with a bundler.
pub fn manifest(scaffold: &Scaffold) -> Vec<&'static LogicalFile> {
    let mut files = vec![&PACKAGE_JSON, &TSCONFIG_JSON];
    if scaffold.build.is_bundler() {
        files.push(&ESBUILD_JS);
    }
    files.push(&METADATA_JSON);
    files.push(&EXTENSION_TS);
    files
}

/// Where the content of one logical file comes from.
pub enum FileSource {
    Templated(PathBuf),
    BuiltIn(Generator),
}

/// A logical file with its source decided.
pub struct PlannedFile {
    pub target: &'static str,
    pub source: FileSource,
}

/// How a file in the materialized tree was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Rendered,
    BuiltIn,
    Copied,
}

/// A file written by [`materialize`], relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    pub path: PathBuf,
    pub origin: Origin,
}

/// The outcome of a materialize call.
#[derive(Debug, Default)]
pub struct MaterializedTree {
    pub root: PathBuf,
    pub files: Vec<WrittenFile>,
}

impl MaterializedTree {
    /// Looks up how `path` (relative to the root) was produced.
    pub fn origin_of<P: AsRef<Path>>(&self, path: P) -> Option<Origin> {
        self.files
            .iter()
            .find(|file| file.path == path.as_ref())
            .map(|file| file.origin)
    }

    /// Records a written file; a later write to the same path replaces the earlier record.
    fn record<P: Into<PathBuf>>(&mut self, path: P, origin: Origin) {
        let path = path.into();
        match self.files.iter_mut().find(|file| file.path == path) {
            Some(file) => {
                debug!("Replacing '{}' ({:?}) with {:?} output.", path.display(), file.origin, origin);
                file.origin = origin;
            }
            None => self.files.push(WrittenFile { path, origin }),
        }
    }
}

/// Decides, for every logical file, whether the template or a generator provides it.
///
/// Each file gets exactly one source.
pub fn plan_files(handle: &TemplateHandle, scaffold: &Scaffold) -> Vec<PlannedFile> {
    manifest(scaffold)
        .into_iter()
        .map(|file| {
            let source = match handle.file(file.template) {
                Some(path) => FileSource::Templated(path),
                None => FileSource::BuiltIn(file.generator),
            };
            PlannedFile { target: file.target, source }
        })
        .collect()
}

/// Returns the output name of a marked template file, or `None` for plain files.
pub fn strip_template_suffix(filename: &str) -> Option<&str> {
    filename.strip_suffix(TEMPLATE_SUFFIX).filter(|stem| !stem.is_empty())
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(Error::fs(path))
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(Error::fs(parent))?;
    }
    debug!("Writing file: {}", path.display());
    fs::write(path, content).map_err(Error::fs(path))
}

fn copy_file(source: &Path, dest: &Path) -> Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(Error::fs(parent))?;
    }
    debug!("Copying file: {}", dest.display());
    fs::copy(source, dest).map(|_| ()).map_err(Error::fs(dest))
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).map_err(Error::fs(path))
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}

/// Writes an executable helper script.
pub fn write_script(path: &Path, content: &str) -> Result<()> {
    write_file(path, content)?;
    make_executable(path)
}

/// Mirrors `source_dir` into `target_dir`.
///
/// Directories are recreated, marked files are rendered with the suffix
/// stripped from their name, everything else is copied byte for byte.
/// Symlinks are followed; a symlink pointing back at one of its ancestors
/// aborts the mirror with a `FilesystemError`.
pub fn mirror_tree(
    source_dir: &Path,
    target_dir: &Path,
    renderer: &dyn TemplateRenderer,
    context: &serde_json::Value,
    tree: &mut MaterializedTree,
) -> Result<()> {
    for entry in WalkDir::new(source_dir).follow_links(true).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(source_dir).to_path_buf();
            Error::FilesystemError { path: path.display().to_string(), source: e.into() }
        })?;
        let relative = entry
            .path()
            .strip_prefix(source_dir)
            .map_err(|e| Error::FilesystemError {
                path: entry.path().display().to_string(),
                source: std::io::Error::other(e),
            })?;
        let target = target_dir.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(Error::fs(&target))?;
            continue;
        }

        let file_name = entry.file_name().to_string_lossy();
        match strip_template_suffix(&file_name) {
            Some(output_name) => {
                let target = target.with_file_name(output_name);
                let content = read_file(entry.path())?;
                let rendered =
                    renderer.render(&relative.display().to_string(), &content, context)?;
                write_file(&target, &rendered)?;
                let written = relative_to(&tree.root, &target);
                tree.record(written, Origin::Rendered);
            }
            None => {
                copy_file(entry.path(), &target)?;
                let written = relative_to(&tree.root, &target);
                tree.record(written, Origin::Copied);
            }
        }
    }
    Ok(())
}

fn relative_to(root: &Path, path: &Path) -> PathBuf {
    path.strip_prefix(root).unwrap_or(path).to_path_buf()
}

/// Creates the project tree at `target`.
///
/// # Arguments
/// * `target` - Project directory; must not hold a previous tree
/// * `handle` - Resolved template variant
/// * `scaffold` - Derived identifiers and build choices
/// * `renderer` - Engine for marked template files
///
/// # Errors
/// Any read, write or render failure aborts the call. Files written before the
/// failure are left in place.
pub fn materialize(
    target: &Path,
    handle: &TemplateHandle,
    scaffold: &Scaffold,
    renderer: &dyn TemplateRenderer,
) -> Result<MaterializedTree> {
    let context = scaffold.context();
    let plan = plan_files(handle, scaffold);

    let mut tree = MaterializedTree { root: target.to_path_buf(), files: Vec::new() };

    fs::create_dir_all(target).map_err(Error::fs(target))?;
    for dir in SKELETON_DIRS {
        let dir = target.join(dir);
        fs::create_dir_all(&dir).map_err(Error::fs(&dir))?;
    }

    for planned in plan {
        let path = target.join(planned.target);
        let (content, origin) = match planned.source {
            FileSource::Templated(template) => {
                let content = read_file(&template)?;
                let name = template
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| planned.target.to_string());
                (renderer.render(&name, &content, &context)?, Origin::Rendered)
            }
            FileSource::BuiltIn(generator) => (generator(scaffold)?, Origin::BuiltIn),
        };
        write_file(&path, &content)?;
        tree.record(planned.target, origin);
    }

    if let Some(src_template) = handle.dir.as_ref().map(|dir| dir.join("src")) {
        if src_template.is_dir() {
            debug!("Mirroring '{}'.", src_template.display());
            mirror_tree(&src_template, &target.join("src"), renderer, &context, &mut tree)?;
        }
    }

    for (relative, content) in generators::helper_scripts(scaffold)? {
        write_script(&target.join(relative), &content)?;
        tree.record(relative, Origin::BuiltIn);
    }

    Ok(tree)
}
