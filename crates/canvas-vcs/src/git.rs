//! `git` CLI backend: one blocking child process per operation.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::{Command, Output};

use crate::error::{Result, VcsError};
use crate::repository::{git_date, CommitTimes, Repository};

const AUTHOR_DATE: &str = "GIT_AUTHOR_DATE";
const COMMITTER_DATE: &str = "GIT_COMMITTER_DATE";

/// Runs `git` inside `workdir`.
#[derive(Debug, Clone)]
pub struct GitCli {
    workdir: PathBuf,
    program: OsString,
}

impl GitCli {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
            program: OsString::from("git"),
        }
    }

    /// Use a different executable (e.g. a pinned git build).
    pub fn with_program(mut self, program: impl Into<OsString>) -> Self {
        self.program = program.into();
        self
    }

    /// True when `workdir` already holds a `.git` directory or file.
    pub fn is_repository(&self) -> bool {
        self.workdir.join(".git").exists()
    }

    /// Commit subjects from the first commit to `HEAD`.
    pub fn log_subjects(&self) -> Result<Vec<String>> {
        let out = self.run(&["log", "--reverse", "--format=%s"], &[])?;
        Ok(String::from_utf8_lossy(&out.stdout)
            .lines()
            .map(str::to_string)
            .collect())
    }

    fn run(&self, args: &[&str], envs: &[(&str, String)]) -> Result<Output> {
        let command = describe(&self.program, args);
        #[cfg(feature = "tracing")]
        tracing::trace!(%command, workdir = %self.workdir.display(), "spawn");

        let mut cmd = Command::new(&self.program);
        cmd.args(args).current_dir(&self.workdir);
        for (k, v) in envs {
            cmd.env(k, v);
        }
        let out = cmd
            .output()
            .map_err(|source| VcsError::Spawn {
                command: command.clone(),
                source,
            })?;

        if !out.status.success() {
            return Err(VcsError::CommandFailed {
                command,
                status: out.status.code(),
                stderr: String::from_utf8_lossy(&out.stderr).trim().to_string(),
            });
        }
        Ok(out)
    }
}

fn describe(program: &OsString, args: &[&str]) -> String {
    let mut s = program.to_string_lossy().into_owned();
    for a in args {
        s.push(' ');
        s.push_str(a);
    }
    s
}

impl Repository for GitCli {
    fn init(&self) -> Result<()> {
        if self.is_repository() {
            #[cfg(feature = "tracing")]
            tracing::debug!(workdir = %self.workdir.display(), "repository exists, skipping init");
            return Ok(());
        }
        self.run(&["init"], &[]).map(drop)
    }

    fn configure(&self, key: &str, value: &str) -> Result<()> {
        self.run(&["config", key, value], &[]).map(drop)
    }

    fn stage(&self, paths: &[&str]) -> Result<()> {
        let mut args = Vec::with_capacity(paths.len() + 2);
        args.push("add");
        args.push("--");
        args.extend_from_slice(paths);
        self.run(&args, &[]).map(drop)
    }

    fn commit(&self, message: &str, times: Option<&CommitTimes>) -> Result<()> {
        let envs: Vec<(&str, String)> = match times {
            Some(t) => vec![
                (AUTHOR_DATE, git_date(&t.author)),
                (COMMITTER_DATE, git_date(&t.committer)),
            ],
            None => Vec::new(),
        };
        self.run(&["commit", "--no-verify", "-m", message], &envs)
            .map(drop)
    }

    fn amend(&self, message: &str) -> Result<()> {
        self.run(&["commit", "--amend", "--no-verify", "-m", message], &[])
            .map(drop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_joins_args() {
        let s = describe(&OsString::from("git"), &["commit", "-m", "x"]);
        assert_eq!(s, "git commit -m x");
    }

    #[test]
    fn missing_program_is_a_spawn_error() {
        let dir = tempfile::tempdir().unwrap();
        let git = GitCli::new(dir.path()).with_program("definitely-not-a-git-binary");
        let err = git.configure("user.name", "x").unwrap_err();
        assert!(matches!(err, VcsError::Spawn { .. }));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn init_is_skipped_for_existing_repository() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join(".git")).unwrap();
        // Would fail to spawn if it tried to run anything.
        let git = GitCli::new(dir.path()).with_program("definitely-not-a-git-binary");
        assert!(git.is_repository());
        git.init().unwrap();
    }
}
