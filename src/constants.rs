//! Common constants used throughout gnome-ext.

/// Prefix of the default extension UUID, joined to the directory name with a hyphen.
pub const UUID_PREFIX: &str = "gnome-shell-extension";

/// Appended to the generated extension class name.
pub const CLASS_SUFFIX: &str = "Extension";

/// Appended to the extension name to form the default description.
pub const DESCRIPTION_SUFFIX: &str = "GNOME Shell extension";

/// Marks a template file whose content is rendered instead of copied.
pub const TEMPLATE_SUFFIX: &str = ".j2";

/// GNOME Shell versions declared in generated metadata.
pub const SHELL_VERSIONS: [&str; 4] = ["45", "46", "47", "48"];

/// Generated-artifact patterns written to `.gitignore` after `git init`.
pub const GITIGNORE: &str = "node_modules/\ndist/\n*.zip\n";

/// Environment variable overriding the templates root.
pub const TEMPLATES_DIR_ENV: &str = "GNOME_EXT_TEMPLATES_DIR";

/// Subdirectories created in every generated project.
pub const SKELETON_DIRS: [&str; 4] = ["src", "src/lib", "scripts", "assets"];

/// Project descriptor checked by the orchestration commands.
pub const PACKAGE_JSON: &str = "package.json";
