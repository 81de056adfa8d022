use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Resolve the taquilla binary, checking both debug and release builds.
pub fn taquilla_binary() -> String {
    let binary_path = if cfg!(debug_assertions) {
        concat!(env!("CARGO_MANIFEST_DIR"), "/target/debug/taquilla")
    } else {
        concat!(env!("CARGO_MANIFEST_DIR"), "/target/release/taquilla")
    };

    if std::path::Path::new(binary_path).exists() {
        binary_path.to_string()
    } else {
        // Fallback to debug
        concat!(env!("CARGO_MANIFEST_DIR"), "/target/debug/taquilla").to_string()
    }
}

/// Helper struct to run taquilla commands in an isolated temp directory
pub struct TaquillaTest {
    pub temp_dir: TempDir,
    binary_path: String,
}

impl TaquillaTest {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");

        TaquillaTest {
            temp_dir,
            binary_path: taquilla_binary(),
        }
    }

    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(&self.binary_path)
            .args(args)
            .current_dir(self.temp_dir.path())
            .output()
            .expect("Failed to execute taquilla command")
    }

    pub fn run_success(&self, args: &[&str]) -> String {
        let output = self.run(args);
        if !output.status.success() {
            panic!(
                "Command {:?} failed with status {:?}\nstdout: {}\nstderr: {}",
                args,
                output.status,
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
        }
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    pub fn run_failure(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            !output.status.success(),
            "Expected command {:?} to fail, but it succeeded",
            args
        );
        String::from_utf8_lossy(&output.stderr).to_string()
    }

    #[allow(dead_code)]
    pub fn config_exists(&self) -> bool {
        self.config_path().exists()
    }

    #[allow(dead_code)]
    pub fn read_config(&self) -> String {
        fs::read_to_string(self.config_path()).expect("Failed to read config file")
    }

    fn config_path(&self) -> std::path::PathBuf {
        self.temp_dir.path().join(".taquilla").join("config.yaml")
    }
}
