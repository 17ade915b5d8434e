//! Shared helpers for the behavioral specs

#![allow(dead_code)]

use std::io::Write;
use std::path::{Path, PathBuf};
use std::net::TcpListener;
use std::process::{Child, Command, Output, Stdio};
use std::time::{Duration, Instant};
use tempfile::TempDir;

/// Scope tables shared by most specs
pub const SCOPES: &str = r#"
[scope.dev]
mode = "validate"
[scope.dev.vars]
db = "cases_dev"

[scope.prod]
mode = "apply"
[scope.prod.vars]
db = "cases_prod"
"#;

/// Three ungated phases of passing steps that record themselves in trail.log
pub const ALL_PASS: &str = r#"
[[plan.release.phase]]
name = "Preflight"
[[plan.release.phase.step]]
label = "env-check"
run = "echo Preflight/env-check >> trail.log"
[[plan.release.phase.step]]
label = "lint"
run = "echo Preflight/lint >> trail.log"

[[plan.release.phase]]
name = "Migration"
[[plan.release.phase.step]]
label = "apply"
run = "echo Migration/apply >> trail.log"

[[plan.release.phase]]
name = "Smoke"
[[plan.release.phase.step]]
label = "health"
run = "echo Smoke/health >> trail.log"
"#;

/// A temporary project directory with a `.gk/` marker
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        std::fs::create_dir_all(dir.path().join(".gk/plans")).expect("create .gk/plans");
        Self { dir }
    }

    /// A project with the shared scopes and `plan` under `.gk/plans/`
    pub fn with_plan(plan: &str) -> Self {
        let project = Self::empty();
        project.file(".gk/plans/scopes.toml", SCOPES);
        project.file(".gk/plans/release.toml", plan);
        project
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn file(&self, rel: &str, content: &str) {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent dir");
        }
        std::fs::write(path, content).expect("write file");
    }

    pub fn read(&self, rel: &str) -> String {
        std::fs::read_to_string(self.path().join(rel)).unwrap_or_default()
    }

    pub fn exists(&self, rel: &str) -> bool {
        self.path().join(rel).exists()
    }

    /// Lines step commands appended to `trail.log`
    pub fn trail(&self) -> Vec<String> {
        self.read("trail.log").lines().map(str::to_string).collect()
    }

    pub fn gk(&self) -> Cli {
        Cli::new(self.path().to_path_buf())
    }
}

/// Builder for one `gk` invocation
pub struct Cli {
    dir: PathBuf,
    args: Vec<String>,
    envs: Vec<(String, String)>,
    stdin: Option<String>,
}

impl Cli {
    fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            args: Vec::new(),
            envs: Vec::new(),
            stdin: None,
        }
    }

    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|a| a.to_string()));
        self
    }

    pub fn env(mut self, key: &str, value: impl AsRef<str>) -> Self {
        self.envs.push((key.to_string(), value.as_ref().to_string()));
        self
    }

    /// Operator input; without it stdin is closed
    pub fn stdin(mut self, input: &str) -> Self {
        self.stdin = Some(input.to_string());
        self
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin("gk"));
        cmd.current_dir(&self.dir)
            .args(&self.args)
            .env_remove("GK_ENV")
            .env_remove("GK_UNATTENDED")
            .env_remove("GK_PROJECT_ROOT")
            .env_remove("GK_LOG")
            .env_remove("RUST_LOG")
            .envs(self.envs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }

    /// Start `gk` without waiting for it
    pub fn spawn(self) -> Child {
        self.command().spawn().expect("spawn gk")
    }

    fn output(self) -> Output {
        let mut child = self.command().spawn().expect("spawn gk");
        if let Some(mut stdin) = child.stdin.take() {
            if let Some(input) = &self.stdin {
                // gk may exit before reading (configuration errors)
                let _ = stdin.write_all(input.as_bytes());
            }
        }
        child.wait_with_output().expect("wait for gk")
    }

    /// Expect exit code 0
    pub fn passes(self) -> Run {
        self.exits(0)
    }

    /// Expect a non-zero exit code
    pub fn fails(self) -> Run {
        let run = Run::from(self.output());
        assert_ne!(run.code, Some(0), "expected failure\n{}", run.dump());
        run
    }

    pub fn exits(self, code: i32) -> Run {
        let run = Run::from(self.output());
        assert_eq!(run.code, Some(code), "unexpected exit code\n{}", run.dump());
        run
    }
}

/// Captured result of one invocation
pub struct Run {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl From<Output> for Run {
    fn from(output: Output) -> Self {
        Self {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

impl Run {
    fn dump(&self) -> String {
        format!("--- stdout\n{}--- stderr\n{}", self.stdout, self.stderr)
    }

    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(
            self.stdout.contains(needle),
            "stdout lacks {:?}\n{}",
            needle,
            self.dump()
        );
        self
    }

    pub fn stdout_lacks(self, needle: &str) -> Self {
        assert!(
            !self.stdout.contains(needle),
            "stdout has {:?}\n{}",
            needle,
            self.dump()
        );
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        assert!(
            self.stderr.contains(needle),
            "stderr lacks {:?}\n{}",
            needle,
            self.dump()
        );
        self
    }

    pub fn stderr_lacks(self, needle: &str) -> Self {
        assert!(
            !self.stderr.contains(needle),
            "stderr has {:?}\n{}",
            needle,
            self.dump()
        );
        self
    }

    pub fn stdout_eq(self, expected: &str) -> Self {
        similar_asserts::assert_eq!(self.stdout, expected);
        self
    }

    /// Progress-log lines with the given prefix, e.g. `[phase]`
    pub fn lines_with(&self, prefix: &str) -> Vec<String> {
        self.stdout
            .lines()
            .filter(|l| l.starts_with(prefix))
            .map(str::to_string)
            .collect()
    }
}

/// Serve `status` and `body` to every request on a local port.
///
/// Returns the base URL; the server lives until the test process exits.
pub fn serve(status: u16, body: &str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let body = body.to_string();
    std::thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { continue };
            let mut buf = [0u8; 4096];
            let _ = std::io::Read::read(&mut stream, &mut buf);
            let response = format!(
                "HTTP/1.1 {} X\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            let _ = stream.write_all(response.as_bytes());
        }
    });
    format!("http://{}", addr)
}

/// Wait until `path` exists, up to `limit`
pub fn wait_for_file(path: &Path, limit: Duration) -> bool {
    let start = Instant::now();
    while start.elapsed() < limit {
        if path.exists() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(20));
    }
    false
}
