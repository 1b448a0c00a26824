use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::os::unix::process::CommandExt;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use super::{describe, pipe, ChildOutcome, ProcessError};
use crate::path::SearchPath;

/// Written before appended output when the target already has content.
pub const APPEND_SEPARATOR: &str = "----------\n";

const EXIT_FAILURE: i32 = 1;
const EXIT_NOT_EXECUTABLE: i32 = 126;
const EXIT_NOT_FOUND: i32 = 127;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Truncate,
    Append,
}

enum Launched {
    Running { program: String, child: Child },
    Failed(ChildOutcome),
}

impl Launched {
    fn wait(self) -> Result<ChildOutcome, ProcessError> {
        match self {
            Launched::Failed(outcome) => Ok(outcome),
            Launched::Running { program, mut child } => {
                let status = match child.wait() {
                    Ok(status) => status,
                    Err(source) => return Err(ProcessError::Wait { program, source }),
                };
                let outcome = ChildOutcome::from_status(status);
                tracing::debug!(%program, pid = child.id(), %outcome, "child finished");
                Ok(outcome)
            }
        }
    }
}

/// Launches external programs with their standard streams wired up and
/// blocks until they finish.
#[derive(Debug, Clone, Default)]
pub struct ProcessExecutor;

impl ProcessExecutor {
    pub fn new() -> Self {
        Self
    }

    /// Run `args` with inherited streams.
    pub fn run(&self, path: &SearchPath, args: &[String]) -> Result<ChildOutcome, ProcessError> {
        self.spawn(path, args, Stdio::inherit(), Stdio::inherit())?
            .wait()
    }

    /// Run `args` with standard output sent to `target`.
    pub fn run_redirect(
        &self,
        path: &SearchPath,
        args: &[String],
        target: &str,
        mode: OutputMode,
    ) -> Result<ChildOutcome, ProcessError> {
        let file = match open_output(target, mode) {
            Ok(file) => file,
            Err(e) => {
                eprintln!("{}: {}", target, describe(&e));
                return Ok(ChildOutcome::Failed(EXIT_FAILURE));
            }
        };

        self.spawn(path, args, Stdio::inherit(), Stdio::from(file))?
            .wait()
    }

    /// Run `left | right`, returning one outcome per side that was launched.
    pub fn run_pipe(
        &self,
        path: &SearchPath,
        left: &[String],
        right: &[String],
    ) -> Result<Vec<ChildOutcome>, ProcessError> {
        if right.is_empty() {
            eprintln!("dsh: |: missing command after pipe");
            return Ok(vec![ChildOutcome::Failed(EXIT_FAILURE)]);
        }

        let (reader, writer) = pipe::pipe().map_err(ProcessError::Pipe)?;

        // Both sides must be running before either is waited on.
        let left = self.spawn(path, left, Stdio::inherit(), Stdio::from(writer))?;
        let right = self.spawn(path, right, Stdio::from(reader), Stdio::inherit())?;

        Ok(vec![left.wait()?, right.wait()?])
    }

    /// Start one child. The `Command`, and with it every descriptor handed in
    /// through `stdin`/`stdout`, is dropped before this returns.
    fn spawn(
        &self,
        path: &SearchPath,
        args: &[String],
        stdin: Stdio,
        stdout: Stdio,
    ) -> Result<Launched, ProcessError> {
        let Some((name, rest)) = args.split_first() else {
            return Ok(Launched::Failed(ChildOutcome::Failed(EXIT_FAILURE)));
        };

        let program = path.resolve(name);
        tracing::debug!(%program, args = ?rest, "spawning");

        let mut command = Command::new(executable_path(&program));
        command
            .arg0(name)
            .args(rest)
            .stdin(stdin)
            .stdout(stdout)
            .stderr(Stdio::inherit());

        let spawned = command.spawn();
        drop(command);

        match spawned {
            Ok(child) => Ok(Launched::Running { program, child }),
            Err(source) if is_fork_failure(&source) => {
                Err(ProcessError::Spawn { program, source })
            }
            Err(e) => {
                eprintln!("{}: {}", name, describe(&e));
                let code = if e.kind() == io::ErrorKind::NotFound {
                    EXIT_NOT_FOUND
                } else {
                    EXIT_NOT_EXECUTABLE
                };
                Ok(Launched::Failed(ChildOutcome::Failed(code)))
            }
        }
    }
}

/// A name without any `/` is taken relative to the working directory, never
/// looked up in the environment's `PATH`.
fn executable_path(program: &str) -> PathBuf {
    if program.contains('/') {
        PathBuf::from(program)
    } else {
        Path::new(".").join(program)
    }
}

fn is_fork_failure(err: &io::Error) -> bool {
    matches!(err.raw_os_error(), Some(libc::EAGAIN) | Some(libc::ENOMEM))
}

fn open_output(target: &str, mode: OutputMode) -> io::Result<File> {
    match mode {
        OutputMode::Truncate => File::create(target),
        OutputMode::Append => {
            let mut file = OpenOptions::new().create(true).append(true).open(target)?;
            if file.metadata()?.len() > 0 {
                file.write_all(APPEND_SEPARATOR.as_bytes())?;
            }
            Ok(file)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn setup() -> (ProcessExecutor, SearchPath, tempfile::TempDir) {
        (
            ProcessExecutor::new(),
            SearchPath::default(),
            tempfile::tempdir().unwrap(),
        )
    }

    #[test]
    fn test_executable_path() {
        assert_eq!(executable_path("/bin/ls"), PathBuf::from("/bin/ls"));
        assert_eq!(executable_path("bin/ls"), PathBuf::from("bin/ls"));
        assert_eq!(executable_path("ls"), PathBuf::from("./ls"));
    }

    #[test]
    fn test_run_reports_exit_status() {
        let (executor, path, _dir) = setup();
        assert_eq!(executor.run(&path, &args(&["true"])).unwrap(), ChildOutcome::Exited(0));
        assert_eq!(executor.run(&path, &args(&["false"])).unwrap(), ChildOutcome::Exited(1));
    }

    #[test]
    fn test_run_reports_signal() {
        let (executor, path, _dir) = setup();
        let outcome = executor
            .run(&path, &args(&["sh", "-c", "kill -9 $$"]))
            .unwrap();
        assert_eq!(outcome, ChildOutcome::Signaled(libc::SIGKILL));
    }

    #[test]
    fn test_missing_program_is_not_fatal() {
        let (executor, path, _dir) = setup();
        let outcome = executor
            .run(&path, &args(&["dsh-no-such-program"]))
            .unwrap();
        assert_eq!(outcome, ChildOutcome::Failed(EXIT_NOT_FOUND));
    }

    #[test]
    fn test_unexecutable_program_is_not_fatal() {
        let (executor, path, dir) = setup();
        let script = dir.path().join("script");
        fs::write(&script, "#!/bin/sh\n").unwrap();

        let outcome = executor
            .run(&path, &[script.display().to_string()])
            .unwrap();
        assert_eq!(outcome, ChildOutcome::Failed(EXIT_NOT_EXECUTABLE));
    }

    #[test]
    fn test_search_path_is_used_instead_of_env_path() {
        let (executor, _, _dir) = setup();
        let empty = SearchPath::new("/dsh-nowhere/").unwrap();
        let outcome = executor.run(&empty, &args(&["true"])).unwrap();
        assert_eq!(outcome, ChildOutcome::Failed(EXIT_NOT_FOUND));
    }

    #[test]
    fn test_redirect_truncates() {
        let (executor, path, dir) = setup();
        let target = dir.path().join("f").display().to_string();

        executor
            .run_redirect(&path, &args(&["echo", "a"]), &target, OutputMode::Truncate)
            .unwrap();
        let outcome = executor
            .run_redirect(&path, &args(&["echo", "b"]), &target, OutputMode::Truncate)
            .unwrap();

        assert!(outcome.success());
        assert_eq!(fs::read_to_string(&target).unwrap(), "b\n");
    }

    #[test]
    fn test_append_separates_runs() {
        let (executor, path, dir) = setup();
        let target = dir.path().join("f").display().to_string();

        executor
            .run_redirect(&path, &args(&["echo", "a"]), &target, OutputMode::Append)
            .unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "a\n");

        executor
            .run_redirect(&path, &args(&["echo", "a"]), &target, OutputMode::Append)
            .unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "a\n----------\na\n");
    }

    #[test]
    fn test_append_to_empty_file_has_no_separator() {
        let (executor, path, dir) = setup();
        let target = dir.path().join("f");
        fs::write(&target, "").unwrap();
        let target = target.display().to_string();

        executor
            .run_redirect(&path, &args(&["echo", "x"]), &target, OutputMode::Append)
            .unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "x\n");
    }

    #[test]
    fn test_unopenable_target_skips_command() {
        let (executor, path, dir) = setup();
        let target = dir.path().join("missing").join("f").display().to_string();
        let marker = dir.path().join("ran");

        let outcome = executor
            .run_redirect(
                &path,
                &args(&["touch", &marker.display().to_string()]),
                &target,
                OutputMode::Truncate,
            )
            .unwrap();

        assert_eq!(outcome, ChildOutcome::Failed(EXIT_FAILURE));
        assert!(!marker.exists());
    }

    #[test]
    fn test_redirect_target_created_even_if_program_missing() {
        let (executor, path, dir) = setup();
        let target = dir.path().join("f");

        let outcome = executor
            .run_redirect(
                &path,
                &args(&["dsh-no-such-program"]),
                &target.display().to_string(),
                OutputMode::Truncate,
            )
            .unwrap();

        assert_eq!(outcome, ChildOutcome::Failed(EXIT_NOT_FOUND));
        assert!(target.exists());
    }

    #[test]
    fn test_pipe_connects_both_sides() {
        let (executor, path, dir) = setup();
        let out = dir.path().join("out").display().to_string();
        let sink = format!("tr a-z A-Z > {}", out);

        let outcomes = executor
            .run_pipe(&path, &args(&["echo", "hi"]), &args(&["sh", "-c", &sink]))
            .unwrap();

        assert_eq!(outcomes, vec![ChildOutcome::Exited(0), ChildOutcome::Exited(0)]);
        assert_eq!(fs::read_to_string(&out).unwrap(), "HI\n");
    }

    #[test]
    fn test_pipe_larger_than_pipe_buffer() {
        let (executor, path, dir) = setup();
        let out = dir.path().join("count").display().to_string();
        let sink = format!("wc -l > {}", out);

        let outcomes = executor
            .run_pipe(&path, &args(&["seq", "1", "200000"]), &args(&["sh", "-c", &sink]))
            .unwrap();

        assert!(outcomes.iter().all(|o| o.success()));
        assert_eq!(fs::read_to_string(&out).unwrap().trim(), "200000");
    }

    #[test]
    fn test_pipe_left_failure_gives_right_eof() {
        let (executor, path, dir) = setup();
        let out = dir.path().join("out");
        let sink = format!("cat > {}", out.display());

        let outcomes = executor
            .run_pipe(&path, &args(&["dsh-no-such-program"]), &args(&["sh", "-c", &sink]))
            .unwrap();

        assert_eq!(
            outcomes,
            vec![ChildOutcome::Failed(EXIT_NOT_FOUND), ChildOutcome::Exited(0)]
        );
        assert_eq!(fs::read_to_string(&out).unwrap(), "");
    }

    #[test]
    fn test_pipe_without_right_side() {
        let (executor, path, _dir) = setup();
        let outcomes = executor.run_pipe(&path, &args(&["echo", "a"]), &[]).unwrap();
        assert_eq!(outcomes, vec![ChildOutcome::Failed(EXIT_FAILURE)]);
    }
}
