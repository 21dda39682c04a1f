//! External tool invocation
//!
//! The packaging and key-import tools are opaque subprocesses. The
//! `ToolRunner` seam keeps every caller pure relative to its inputs:
//! production uses `tokio::process`, tests script the outputs.

use async_trait::async_trait;
use std::process::Stdio;

/// Packaging tool binary
pub const HELM: &str = "helm";

/// Key-import tool binary
pub const GPG: &str = "gpg";

/// One subprocess invocation: program, arguments, environment, stdin
#[derive(Debug, Clone)]
pub struct ToolInvocation {
    pub program: String,
    pub args: Vec<String>,
    pub env: Vec<(String, String)>,
    pub stdin: Option<Vec<u8>>,
}

impl ToolInvocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: Vec::new(),
            stdin: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    pub fn stdin_bytes(mut self, bytes: Vec<u8>) -> Self {
        self.stdin = Some(bytes);
        self
    }
}

/// What a finished subprocess left behind
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// Exit code; `None` when the process was killed by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Both streams, for tools that report diagnostics on either
    pub fn combined(&self) -> String {
        let mut combined = self.stdout.clone();
        if !self.stderr.is_empty() {
            if !combined.is_empty() && !combined.ends_with('\n') {
                combined.push('\n');
            }
            combined.push_str(&self.stderr);
        }
        combined
    }
}

/// Narrow subprocess seam
#[async_trait]
pub trait ToolRunner: Send + Sync {
    async fn run(&self, invocation: ToolInvocation) -> std::io::Result<ToolOutput>;
}

/// Production runner backed by real subprocesses
pub struct ProcessRunner;

#[async_trait]
impl ToolRunner for ProcessRunner {
    async fn run(&self, invocation: ToolInvocation) -> std::io::Result<ToolOutput> {
        let mut command = tokio::process::Command::new(&invocation.program);
        command
            .args(&invocation.args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        for (key, value) in &invocation.env {
            command.env(key, value);
        }
        command.stdin(if invocation.stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        });

        let mut child = command.spawn()?;

        if let Some(bytes) = &invocation.stdin {
            if let Some(mut stdin) = child.stdin.take() {
                use tokio::io::AsyncWriteExt;
                stdin.write_all(bytes).await?;
                // dropping the handle closes the pipe
            }
        }

        let output = child.wait_with_output().await?;
        Ok(ToolOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Scripted runner: hands out canned outputs, records invocations
    pub struct ScriptedRunner {
        outputs: Mutex<VecDeque<ToolOutput>>,
        invocations: Mutex<Vec<ToolInvocation>>,
    }

    impl ScriptedRunner {
        pub fn new(outputs: Vec<ToolOutput>) -> Self {
            Self {
                outputs: Mutex::new(outputs.into()),
                invocations: Mutex::new(Vec::new()),
            }
        }

        pub fn recorded(&self) -> Vec<ToolInvocation> {
            self.invocations.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ToolRunner for ScriptedRunner {
        async fn run(&self, invocation: ToolInvocation) -> std::io::Result<ToolOutput> {
            self.invocations.lock().unwrap().push(invocation);
            self.outputs.lock().unwrap().pop_front().ok_or_else(|| {
                std::io::Error::other("scripted runner ran out of outputs")
            })
        }
    }

    pub fn ok(stdout: &str, stderr: &str) -> ToolOutput {
        ToolOutput {
            code: Some(0),
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
        }
    }

    pub fn failed(code: i32, stderr: &str) -> ToolOutput {
        ToolOutput {
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invocation_builder() {
        let invocation = ToolInvocation::new(HELM)
            .arg("package")
            .arg("--destination")
            .arg("/tmp/out")
            .env("HELM_DEBUG", "1")
            .stdin_bytes(b"secret".to_vec());

        assert_eq!(invocation.program, "helm");
        assert_eq!(invocation.args, vec!["package", "--destination", "/tmp/out"]);
        assert_eq!(invocation.env, vec![("HELM_DEBUG".to_string(), "1".to_string())]);
        assert_eq!(invocation.stdin.as_deref(), Some(b"secret".as_slice()));
    }

    #[test]
    fn test_output_combined() {
        let output = ToolOutput {
            code: Some(0),
            stdout: "line one\n".to_string(),
            stderr: "line two\n".to_string(),
        };
        assert_eq!(output.combined(), "line one\nline two\n");
        assert!(output.success());

        let signal_killed = ToolOutput {
            code: None,
            stdout: String::new(),
            stderr: String::new(),
        };
        assert!(!signal_killed.success());
    }
}
