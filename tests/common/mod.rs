#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::path::Path;

use gnome_ext::error::{Error, Result};
use gnome_ext::finalize::{PackageManager, VersionControl};
use gnome_ext::process::{CommandRunner, ExternalCommand};
use gnome_ext::prompt::Prompter;

/// Answers questions from a script; an empty or missing answer takes the default.
#[derive(Default)]
pub struct ScriptedPrompter {
    inputs: RefCell<VecDeque<String>>,
    overwrite: bool,
    pub asked: RefCell<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new(inputs: &[&str], overwrite: bool) -> Self {
        Self {
            inputs: RefCell::new(inputs.iter().map(|s| s.to_string()).collect()),
            overwrite,
            asked: RefCell::new(Vec::new()),
        }
    }

    pub fn asked(&self) -> Vec<String> {
        self.asked.borrow().clone()
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&self, skip: bool, prompt: String) -> Result<bool> {
        if skip {
            return Ok(true);
        }
        self.asked.borrow_mut().push(prompt);
        Ok(self.overwrite)
    }

    fn input(&self, prompt: String, default: Option<String>) -> Result<String> {
        self.asked.borrow_mut().push(prompt);
        let answer = self.inputs.borrow_mut().pop_front().unwrap_or_default();
        match default {
            Some(default) if answer.is_empty() => Ok(default),
            _ => Ok(answer),
        }
    }

    fn select(&self, prompt: String, _items: &[&str], default: usize) -> Result<usize> {
        self.asked.borrow_mut().push(prompt);
        Ok(default)
    }
}

/// Records commands instead of running them.
#[derive(Default)]
pub struct RecordingRunner {
    pub commands: RefCell<Vec<ExternalCommand>>,
    pub fail: bool,
}

impl RecordingRunner {
    pub fn failing() -> Self {
        Self { commands: RefCell::new(Vec::new()), fail: true }
    }

    pub fn command_lines(&self) -> Vec<String> {
        self.commands.borrow().iter().map(|c| c.to_string()).collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, command: &ExternalCommand) -> Result<()> {
        self.commands.borrow_mut().push(command.clone());
        if self.fail {
            return Err(Error::ProcessError {
                command: command.to_string(),
                reason: format!("'{}' not found", command.program),
            });
        }
        Ok(())
    }
}

/// Version control stub that can be told to fail.
#[derive(Default)]
pub struct StubVcs {
    pub fail: bool,
    pub calls: Cell<usize>,
}

impl VersionControl for StubVcs {
    fn init(&self, _dir: &Path) -> Result<()> {
        self.calls.set(self.calls.get() + 1);
        if self.fail {
            return Err(Error::ProcessError {
                command: "git init".to_string(),
                reason: "'git' not found".to_string(),
            });
        }
        Ok(())
    }
}

/// Package manager stub that can be told to fail.
#[derive(Default)]
pub struct StubPackages {
    pub fail: bool,
    pub calls: Cell<usize>,
}

impl PackageManager for StubPackages {
    fn install(&self, _dir: &Path) -> Result<()> {
        self.calls.set(self.calls.get() + 1);
        if self.fail {
            return Err(Error::ProcessError {
                command: "npm install".to_string(),
                reason: "exited with exit status: 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Writes `content` to `root/relative`, creating parent directories.
pub fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}
