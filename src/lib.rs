//! gnome-ext scaffolds GNOME Shell extension projects and drives the external
//! tools that build, package, install and test them.

/// Command-line interface module for the gnome-ext application
pub mod cli;

/// Extension identity and identifier derivation
pub mod config;

/// Handling of an already existing project directory
pub mod conflict;

/// Common constants
pub mod constants;

/// The `create` command pipeline
pub mod create;

/// Error types and handling for the gnome-ext application
pub mod error;

/// Optional post-creation steps: git init and dependency install
pub mod finalize;

/// Built-in content generators for every generated file
pub mod generators;

pub mod logger;

/// Serde models of metadata.json and package.json
pub mod metadata;

pub mod output;

/// External process invocation
pub mod process;

/// Project tree materialization from templates and generators
pub mod processor;

/// User input and interaction handling
pub mod prompt;

/// Template rendering functionality
pub mod renderer;

/// Build, pack, install and dev orchestration
pub mod tasks;

/// Template variants and template directory lookup
pub mod template;
