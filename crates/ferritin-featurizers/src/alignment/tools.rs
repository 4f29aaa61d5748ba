use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

const STDERR_TAIL_LINES: usize = 20;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("could not launch {binary:?}: {source}")]
    Launch {
        binary: PathBuf,
        source: std::io::Error,
    },

    #[error("{binary:?} exited with {status}: {stderr}")]
    Exit {
        binary: PathBuf,
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("could not read tool output: {0}")]
    Output(#[from] std::io::Error),
}

/// A sequence or profile search over one database configuration.
///
/// `query` blocks until the tool finishes and returns its raw text output in the
/// tool's native format.
pub trait SearchTool {
    fn query(&self, input_path: &Path) -> Result<String, ToolError>;
}

fn run_command(binary: &Path, mut command: Command) -> Result<(), ToolError> {
    debug!("Launching {command:?}");
    let output = command.output().map_err(|source| ToolError::Launch {
        binary: binary.to_path_buf(),
        source,
    })?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let lines: Vec<&str> = stderr.lines().collect();
        let tail = lines[lines.len().saturating_sub(STDERR_TAIL_LINES)..].join("\n");
        return Err(ToolError::Exit {
            binary: binary.to_path_buf(),
            status: output.status,
            stderr: tail,
        });
    }
    Ok(())
}

/// jackhmmer, one iteration, Stockholm output.
#[derive(Debug, Clone)]
pub struct Jackhmmer {
    binary_path: PathBuf,
    database_path: PathBuf,
    n_cpu: usize,
}

impl Jackhmmer {
    pub fn new(
        binary_path: impl Into<PathBuf>,
        database_path: impl Into<PathBuf>,
        n_cpu: usize,
    ) -> Self {
        Self {
            binary_path: binary_path.into(),
            database_path: database_path.into(),
            n_cpu,
        }
    }
}

impl SearchTool for Jackhmmer {
    fn query(&self, input_path: &Path) -> Result<String, ToolError> {
        let scratch = tempfile::tempdir()?;
        let sto_path = scratch.path().join("output.sto");

        let mut command = Command::new(&self.binary_path);
        command
            .arg("-o")
            .arg("/dev/null")
            .arg("-A")
            .arg(&sto_path)
            .arg("--noali")
            .args(["--F1", "0.0005", "--F2", "0.00005", "--F3", "0.0000005"])
            .args(["--incE", "0.0001", "-E", "0.0001"])
            .arg("--cpu")
            .arg(self.n_cpu.to_string())
            .args(["-N", "1"])
            .arg(input_path)
            .arg(&self.database_path);
        run_command(&self.binary_path, command)?;

        Ok(fs::read_to_string(&sto_path)?)
    }
}

/// hhblits over one or more databases, A3M output.
#[derive(Debug, Clone)]
pub struct HHBlits {
    binary_path: PathBuf,
    databases: Vec<PathBuf>,
    n_cpu: usize,
}

impl HHBlits {
    pub fn new(binary_path: impl Into<PathBuf>, databases: Vec<PathBuf>, n_cpu: usize) -> Self {
        Self {
            binary_path: binary_path.into(),
            databases,
            n_cpu,
        }
    }
}

impl SearchTool for HHBlits {
    fn query(&self, input_path: &Path) -> Result<String, ToolError> {
        let scratch = tempfile::tempdir()?;
        let a3m_path = scratch.path().join("output.a3m");

        let mut command = Command::new(&self.binary_path);
        command
            .arg("-i")
            .arg(input_path)
            .arg("-cpu")
            .arg(self.n_cpu.to_string())
            .arg("-oa3m")
            .arg(&a3m_path)
            .args(["-o", "/dev/null", "-n", "3", "-e", "0.001"])
            .args(["-maxseq", "1000000", "-realign_max", "100000"])
            .args(["-maxfilt", "100000", "-min_prefilter_hits", "1000"]);
        for database in &self.databases {
            command.arg("-d").arg(database);
        }
        run_command(&self.binary_path, command)?;

        Ok(fs::read_to_string(&a3m_path)?)
    }
}

/// hhsearch against template databases, HHR output.
#[derive(Debug, Clone)]
pub struct HHSearch {
    binary_path: PathBuf,
    databases: Vec<PathBuf>,
}

impl HHSearch {
    pub fn new(binary_path: impl Into<PathBuf>, databases: Vec<PathBuf>) -> Self {
        Self {
            binary_path: binary_path.into(),
            databases,
        }
    }
}

impl SearchTool for HHSearch {
    fn query(&self, input_path: &Path) -> Result<String, ToolError> {
        let scratch = tempfile::tempdir()?;
        let hhr_path = scratch.path().join("output.hhr");

        let mut command = Command::new(&self.binary_path);
        command
            .arg("-i")
            .arg(input_path)
            .arg("-o")
            .arg(&hhr_path)
            .args(["-maxseq", "1000000"]);
        for database in &self.databases {
            command.arg("-d").arg(database);
        }
        run_command(&self.binary_path, command)?;

        Ok(fs::read_to_string(&hhr_path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_binary() {
        let tool = Jackhmmer::new("/nonexistent/jackhmmer", "/nonexistent/db.fasta", 1);
        let err = tool.query(Path::new("query.fasta")).unwrap_err();
        assert!(matches!(err, ToolError::Launch { .. }));
    }
}
