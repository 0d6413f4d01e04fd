//! External tool invocation.
//!
//! Every packaging tool (archiver, installer builders, sub-packagers) is run
//! through the [`ToolRunner`] capability so packagers can be exercised with
//! deterministic stand-ins. [`SystemToolRunner`] is the real implementation.

use crate::bundler::error::{Error, Result};
use std::{
    ffi::{OsStr, OsString},
    fmt,
    path::{Path, PathBuf},
    process::Stdio,
};
use tokio::{
    io::{AsyncBufReadExt, AsyncRead, BufReader},
    process::Command,
};

/// A single external tool invocation.
///
/// Environment values are never shown by the `Display` impl; secrets travel
/// through the environment for that reason.
#[derive(Clone, Debug, Default)]
pub struct ToolInvocation {
    /// Executable to run.
    pub program: PathBuf,
    /// Positional arguments.
    pub args: Vec<OsString>,
    /// Extra environment variables.
    pub envs: Vec<(String, String)>,
    /// Working directory, inherited when `None`.
    pub current_dir: Option<PathBuf>,
}

impl ToolInvocation {
    /// Invocation of `program` with no arguments.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            ..Default::default()
        }
    }

    /// Appends one argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Appends several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    /// Sets an environment variable for the child.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    /// Sets the working directory.
    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.current_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// File name of the program, for log prefixes.
    pub fn program_name(&self) -> String {
        self.program
            .file_name()
            .unwrap_or(self.program.as_os_str())
            .to_string_lossy()
            .into_owned()
    }

    /// Returns the environment value for `key`, if set.
    pub fn env_value(&self, key: &str) -> Option<&str> {
        self.envs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Display for ToolInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Runs external tools to completion.
///
/// Implementations must block (await) until the tool exits and must report
/// spawn failures and non-zero exits as errors.
#[allow(async_fn_in_trait)]
pub trait ToolRunner {
    /// Runs `invocation` and waits for it to finish.
    async fn run(&self, invocation: &ToolInvocation) -> Result<()>;
}

impl<T: ToolRunner + ?Sized> ToolRunner for &T {
    async fn run(&self, invocation: &ToolInvocation) -> Result<()> {
        (**self).run(invocation).await
    }
}

/// Runs tools as child processes.
///
/// Output is streamed into the log as it arrives: stdout at info level,
/// stderr at warn level. Stderr is also kept for the error report. No timeout
/// is applied; a hung tool hangs the run.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemToolRunner;

impl ToolRunner for SystemToolRunner {
    async fn run(&self, invocation: &ToolInvocation) -> Result<()> {
        let command = invocation.to_string();
        let name = invocation.program_name();
        log::debug!("Running: {}", command);

        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args)
            .envs(invocation.envs.iter().map(|(k, v)| (k, v)))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &invocation.current_dir {
            cmd.current_dir(dir);
        }

        let mut child = cmd.spawn().map_err(|error| Error::CommandFailed {
            command: command.clone(),
            error,
        })?;

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        let forward_stdout = async {
            if let Some(stdout) = stdout {
                forward_lines(stdout, &name, log::Level::Info).await;
            }
        };

        let capture_stderr = async {
            match stderr {
                Some(stderr) => forward_lines(stderr, &name, log::Level::Warn).await,
                None => Vec::new(),
            }
        };

        let ((), stderr_lines, status) = tokio::join!(forward_stdout, capture_stderr, child.wait());
        let status = status.map_err(|error| Error::CommandFailed {
            command: command.clone(),
            error,
        })?;

        if !status.success() {
            return Err(Error::ToolFailed {
                command,
                code: status.code(),
                stderr: stderr_lines.join("\n"),
            });
        }

        Ok(())
    }
}

/// Logs each line of `stream` at `level` and returns the lines.
///
/// Reads until EOF even after a read error, so the child never sees a
/// closed pipe while it is still writing. Non-UTF-8 bytes are replaced.
async fn forward_lines<S: AsyncRead + Unpin>(
    stream: S,
    name: &str,
    level: log::Level,
) -> Vec<String> {
    let mut reader = BufReader::new(stream);
    let mut lines = Vec::new();
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf)
                    .trim_end_matches(['\n', '\r'])
                    .to_string();
                log::log!(level, "[{}] {}", name, line);
                lines.push(line);
            }
            Err(e) => {
                log::debug!("Stopped reading output of {}: {}", name, e);
                if let Err(e) = tokio::io::copy(&mut reader, &mut tokio::io::sink()).await {
                    log::debug!("Discarding output of {} failed: {}", name, e);
                }
                break;
            }
        }
    }
    lines
}
