//! Invocation of the external CV renderer
//!
//! The renderer is run as `<program> <args...> render <file>` with an
//! optional `--output-folder-name <dir>`. Its outcome is reported as a
//! [`RenderResult`] rather than an error, so callers can print it verbatim.

use crate::config::RenderConfig;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::OnceLock;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, info, instrument, warn};

/// Directory the renderer writes to when no output directory is given
pub const DEFAULT_OUTPUT_DIR: &str = "rendercv_output";

static PDF_PATH_REGEX: OnceLock<Option<Regex>> = OnceLock::new();

fn pdf_path_regex() -> Option<&'static Regex> {
    PDF_PATH_REGEX
        .get_or_init(|| Regex::new(r"[\w/\\:.-]+\.pdf").ok())
        .as_ref()
}

/// Outcome of a render attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderResult {
    /// Whether the renderer exited successfully
    pub success: bool,
    /// Path to the produced PDF, when one could be located
    pub pdf: Option<PathBuf>,
    /// Failure description
    pub error: Option<String>,
}

impl RenderResult {
    /// A successful render
    pub fn succeeded(pdf: Option<PathBuf>) -> Self {
        Self {
            success: true,
            pdf,
            error: None,
        }
    }

    /// A failed render
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            pdf: None,
            error: Some(error.into()),
        }
    }
}

/// External renderer command
#[derive(Debug, Clone)]
pub struct Renderer {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl Renderer {
    /// Create a renderer running `program` with leading `args`
    pub fn new(program: impl Into<String>, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args,
            timeout,
        }
    }

    /// Create a renderer from the `[render]` configuration section
    pub fn from_config(config: &RenderConfig) -> Self {
        Self::new(
            config.program.clone(),
            config.args.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Replace the timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Timeout applied to each render
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Arguments passed to the program for one render
    pub fn command_args(&self, cv_file: &Path, output_dir: Option<&Path>) -> Vec<OsString> {
        let mut args: Vec<OsString> = self.args.iter().map(OsString::from).collect();
        args.push("render".into());
        args.push(cv_file.as_os_str().to_owned());
        if let Some(dir) = output_dir {
            args.push("--output-folder-name".into());
            args.push(dir.as_os_str().to_owned());
        }
        args
    }

    /// Render `cv_file`, waiting at most the configured timeout
    ///
    /// The child process is killed if the timeout elapses.
    #[instrument(skip(self), fields(program = %self.program, cv_file = %cv_file.display()))]
    pub async fn render(&self, cv_file: &Path, output_dir: Option<&Path>) -> RenderResult {
        if !cv_file.exists() {
            return RenderResult::failed(format!("File not found: {}", cv_file.display()));
        }

        if let Some(dir) = output_dir {
            if let Err(e) = tokio::fs::create_dir_all(dir).await {
                warn!(error = %e, dir = %dir.display(), "Could not create output directory");
                return RenderResult::failed(e.to_string());
            }
        }

        let args = self.command_args(cv_file, output_dir);
        debug!(?args, "Spawning renderer");

        let child = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn();
        let child = match child {
            Ok(child) => child,
            Err(e) => {
                warn!(error = %e, "Could not start renderer");
                return RenderResult::failed(e.to_string());
            }
        };

        // Dropping the wait future on timeout drops the child, which kills it
        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => return RenderResult::failed(e.to_string()),
            Err(_) => {
                warn!(timeout_secs = self.timeout.as_secs(), "Renderer timed out");
                return RenderResult::failed(format!(
                    "RenderCV timed out after {} seconds",
                    self.timeout.as_secs()
                ));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = match stderr.trim() {
                "" => match output.status.code() {
                    Some(code) => format!("Return code {}", code),
                    None => "Renderer terminated by a signal".to_string(),
                },
                trimmed => trimmed.to_string(),
            };
            info!(status = %output.status, "Renderer failed");
            return RenderResult::failed(message);
        }

        let search_dir = output_dir.unwrap_or_else(|| Path::new(DEFAULT_OUTPUT_DIR));
        let stdout = String::from_utf8_lossy(&output.stdout);
        let pdf = find_pdf_in_dir(search_dir).or_else(|| find_pdf_in_output(&stdout));

        info!(pdf = ?pdf, "Renderer finished");
        RenderResult::succeeded(pdf)
    }
}

/// First `*.pdf` file in `dir`, by file name
pub fn find_pdf_in_dir(dir: &Path) -> Option<PathBuf> {
    let entries = std::fs::read_dir(dir).ok()?;
    let mut pdfs: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.ends_with(".pdf"))
        })
        .collect();
    pdfs.sort();
    pdfs.into_iter().next()
}

/// First PDF path mentioned in renderer output that exists on disk
///
/// Only the first path-like match on each line is considered.
pub fn find_pdf_in_output(stdout: &str) -> Option<PathBuf> {
    let regex = pdf_path_regex()?;
    stdout
        .lines()
        .filter(|line| line.contains(".pdf"))
        .filter_map(|line| regex.find(line))
        .map(|m| PathBuf::from(m.as_str()))
        .find(|candidate| candidate.exists())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_cv(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("cv.yaml");
        fs::write(&path, "cv:\n  name: X\n  sections: {}\n").unwrap();
        path
    }

    /// Renderer running an inline shell script; `$1` is `render`, `$2` the
    /// CV file, `$4` the output directory when one is given
    #[cfg(unix)]
    fn shell(script: &str) -> Renderer {
        Renderer::new(
            "sh",
            vec!["-c".to_string(), script.to_string(), "renderer".to_string()],
            Duration::from_secs(10),
        )
    }

    #[test]
    fn test_command_args() {
        let renderer = Renderer::from_config(&RenderConfig::default());
        let args = renderer.command_args(Path::new("cv.yaml"), Some(Path::new("out")));
        assert_eq!(
            args,
            vec!["-m", "rendercv", "render", "cv.yaml", "--output-folder-name", "out"]
                .into_iter()
                .map(OsString::from)
                .collect::<Vec<_>>()
        );

        let args = renderer.command_args(Path::new("cv.yaml"), None);
        assert_eq!(args.len(), 4);
        assert_eq!(renderer.timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_result_json_shape() {
        let json = serde_json::to_value(RenderResult::failed("boom")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"success": false, "pdf": null, "error": "boom"})
        );
    }

    #[test]
    fn test_find_pdf_in_dir() {
        let dir = TempDir::new().unwrap();
        assert_eq!(find_pdf_in_dir(dir.path()), None);

        fs::write(dir.path().join("notes.txt"), "").unwrap();
        fs::write(dir.path().join("b_CV.pdf"), "").unwrap();
        fs::write(dir.path().join("a_CV.pdf"), "").unwrap();
        assert_eq!(find_pdf_in_dir(dir.path()), Some(dir.path().join("a_CV.pdf")));

        assert_eq!(find_pdf_in_dir(&dir.path().join("missing")), None);
    }

    #[test]
    fn test_find_pdf_in_output_requires_existing_file() {
        let dir = TempDir::new().unwrap();
        let pdf = dir.path().join("Ada_CV.pdf");

        let stdout = format!("Rendering...\nSaved to {}\n", pdf.display());
        assert_eq!(find_pdf_in_output(&stdout), None);

        fs::write(&pdf, "").unwrap();
        assert_eq!(find_pdf_in_output(&stdout), Some(pdf));
        assert_eq!(find_pdf_in_output("no documents here"), None);
    }

    #[tokio::test]
    async fn test_missing_input_file() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("absent.yaml");
        let result = Renderer::from_config(&RenderConfig::default())
            .render(&missing, None)
            .await;

        assert!(!result.success);
        assert_eq!(
            result.error,
            Some(format!("File not found: {}", missing.display()))
        );
    }

    #[tokio::test]
    async fn test_spawn_failure_is_reported() {
        let dir = TempDir::new().unwrap();
        let cv = write_cv(&dir);
        let renderer = Renderer::new(
            "/nonexistent/cvclaw-renderer",
            Vec::new(),
            Duration::from_secs(1),
        );
        let result = renderer.render(&cv, None).await;

        assert!(!result.success);
        assert!(result.error.is_some_and(|e| !e.is_empty()));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_pdf_found_in_output_dir() {
        let dir = TempDir::new().unwrap();
        let cv = write_cv(&dir);
        let out = dir.path().join("pdfs");

        let result = shell(r#"touch "$4/Ada_CV.pdf""#)
            .render(&cv, Some(&out))
            .await;

        assert_eq!(result, RenderResult::succeeded(Some(out.join("Ada_CV.pdf"))));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_pdf_found_from_stdout_hint() {
        let dir = TempDir::new().unwrap();
        let cv = write_cv(&dir);
        let out = dir.path().join("empty_out");
        let pdf = dir.path().join("elsewhere.pdf");
        fs::write(&pdf, "").unwrap();

        let script = format!("echo 'PDF written to {}'", pdf.display());
        let result = shell(&script).render(&cv, Some(&out)).await;

        assert!(result.success);
        assert_eq!(result.pdf, Some(pdf));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_success_without_pdf() {
        let dir = TempDir::new().unwrap();
        let cv = write_cv(&dir);
        let out = dir.path().join("out");

        let result = shell("exit 0").render(&cv, Some(&out)).await;
        assert_eq!(result, RenderResult::succeeded(None));
        assert!(out.is_dir());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failure_reports_trimmed_stderr() {
        let dir = TempDir::new().unwrap();
        let cv = write_cv(&dir);

        let result = shell("echo '  bad theme  ' >&2; exit 3")
            .render(&cv, None)
            .await;
        assert_eq!(result, RenderResult::failed("bad theme"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failure_without_stderr_reports_code() {
        let dir = TempDir::new().unwrap();
        let cv = write_cv(&dir);

        let result = shell("exit 4").render(&cv, None).await;
        assert_eq!(result, RenderResult::failed("Return code 4"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_timeout_kills_renderer() {
        let dir = TempDir::new().unwrap();
        let cv = write_cv(&dir);

        let result = shell("sleep 5")
            .with_timeout(Duration::from_millis(200))
            .render(&cv, None)
            .await;

        assert!(!result.success);
        assert_eq!(
            result.error.as_deref(),
            Some("RenderCV timed out after 0 seconds")
        );
    }
}
