use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{exit, Command};

use clap::{Parser, Subcommand, ValueEnum};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

const LAMBDA_PACKAGE: &str = "ops_handlers_lambda";
const LAMBDA_BINARIES: [&str; 3] = ["get_employee", "post_employee", "audit_alert_forwarder"];
/// Entry point name the `provided.al2023` runtime executes.
const BOOTSTRAP_ENTRY: &str = "bootstrap";

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "xtask",
    about = "Task runner for the employee API and audit alert handlers"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run CI checks (fmt, clippy, tests)
    Ci {
        /// Job to run
        #[arg(value_enum, default_value_t = CiJob::All)]
        job: CiJob,
    },
    /// Build the Lambda binaries and zip each one as a deployable bootstrap
    ServerlessPackage {
        /// Compilation target triple for Lambda binaries
        #[arg(long, default_value = "x86_64-unknown-linux-gnu")]
        target: String,
        /// Build profile used for binaries
        #[arg(value_enum, long, default_value_t = BuildProfile::Release)]
        profile: BuildProfile,
        /// Directory receiving one zip per function
        #[arg(long, default_value = "dist")]
        dist_dir: PathBuf,
    },
}

#[derive(Clone, ValueEnum)]
enum CiJob {
    /// Formatting and clippy
    Check,
    /// Unit tests for every crate
    Test,
    /// Run check + test
    All,
}

#[derive(Clone, Copy, ValueEnum)]
enum BuildProfile {
    Debug,
    Release,
}

impl BuildProfile {
    fn dir_name(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Release => "release",
        }
    }

    fn as_cargo_flag(self) -> Option<&'static str> {
        match self {
            Self::Debug => None,
            Self::Release => Some("--release"),
        }
    }
}

// ── helpers ────────────────────────────────────────────────────────

fn step(label: &str) {
    eprintln!("\n=== {label} ===");
}

fn run_cargo(args: &[&str]) {
    eprintln!("+ cargo {}", args.join(" "));
    match Command::new("cargo").args(args).status() {
        Ok(status) if status.success() => {}
        Ok(status) => exit(status.code().unwrap_or(1)),
        Err(error) => fail(&format!("failed to execute cargo: {error}")),
    }
}

fn fail(message: &str) -> ! {
    eprintln!("error: {message}");
    exit(1)
}

// ── packaging ──────────────────────────────────────────────────────

fn build_args<'a>(target: &'a str, profile: BuildProfile) -> Vec<&'a str> {
    let mut args = vec!["build", "-p", LAMBDA_PACKAGE, "--target", target];
    for bin in LAMBDA_BINARIES {
        args.extend(["--bin", bin]);
    }
    args.extend(profile.as_cargo_flag());
    args
}

fn package_serverless_lambdas(target: &str, profile: BuildProfile, dist_dir: &Path) {
    step("Build lambda binaries");
    run_cargo(&build_args(target, profile));

    step("Package lambda zip artifacts");
    let binary_dir = Path::new("target").join(target).join(profile.dir_name());
    if let Err(error) = fs::create_dir_all(dist_dir) {
        fail(&format!("failed to create {}: {error}", dist_dir.display()));
    }

    for bin in LAMBDA_BINARIES {
        let zip_path = dist_dir.join(format!("{bin}.zip"));
        if let Err(message) = write_bootstrap_zip(&binary_dir.join(bin), &zip_path) {
            fail(&message);
        }
        eprintln!("- {}", zip_path.display());
    }
}

fn write_bootstrap_zip(binary_path: &Path, zip_path: &Path) -> Result<(), String> {
    let binary = fs::read(binary_path).map_err(|error| {
        format!(
            "failed to read lambda binary '{}': {error}",
            binary_path.display()
        )
    })?;
    let file = fs::File::create(zip_path)
        .map_err(|error| format!("failed to create '{}': {error}", zip_path.display()))?;

    let mut zip = ZipWriter::new(file);
    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o755);
    zip.start_file(BOOTSTRAP_ENTRY, options)
        .map_err(|error| format!("failed to add bootstrap entry: {error}"))?;
    zip.write_all(&binary)
        .map_err(|error| format!("failed to write bootstrap entry: {error}"))?;
    zip.finish()
        .map(|_| ())
        .map_err(|error| format!("failed to finish '{}': {error}", zip_path.display()))
}

// ── CI jobs ────────────────────────────────────────────────────────

fn ci_check() {
    step("Check formatting");
    run_cargo(&["fmt", "--all", "--", "--check"]);

    step("Clippy");
    run_cargo(&["clippy", "--all-targets", "--", "-D", "warnings"]);
}

fn ci_test() {
    step("Test workspace");
    run_cargo(&["test", "--workspace"]);
}

// ── main ───────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Ci { job } => {
            match job {
                CiJob::Check => ci_check(),
                CiJob::Test => ci_test(),
                CiJob::All => {
                    ci_check();
                    ci_test();
                }
            }
            eprintln!("\nCI job passed.");
        }
        Commands::ServerlessPackage {
            target,
            profile,
            dist_dir,
        } => package_serverless_lambdas(&target, profile, &dist_dir),
    }
}
