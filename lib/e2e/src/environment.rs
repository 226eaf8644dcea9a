use std::{path::PathBuf, process::Command};

use alloy::transports::http::reqwest::Url;
use eyre::Context;

/// Name of the environment variable holding the node's RPC endpoint.
pub const RPC_URL_ENV_VAR_NAME: &str = "RPC_URL";

/// Name of the environment variable holding the compiled artifacts
/// directory.
pub const ARTIFACTS_DIR_ENV_VAR_NAME: &str = "ARTIFACTS_DIR";

/// RPC endpoint used when [`RPC_URL_ENV_VAR_NAME`] is not set. Both Anvil and
/// the Hardhat node listen here by default.
pub const DEFAULT_RPC_URL: &str = "http://localhost:8545";

/// Load the `name` environment variable.
pub(crate) fn env(name: &str) -> eyre::Result<String> {
    std::env::var(name).wrap_err(format!("failed to load {name}"))
}

/// Reads the RPC endpoint from [`RPC_URL_ENV_VAR_NAME`], falling back to
/// [`DEFAULT_RPC_URL`].
///
/// # Errors
///
/// May fail if the configured value is not a valid URL.
pub fn rpc_url() -> eyre::Result<Url> {
    let url = env(RPC_URL_ENV_VAR_NAME)
        .unwrap_or_else(|_| DEFAULT_RPC_URL.to_string());
    url.parse().wrap_err(format!("failed to parse {url} into a URL"))
}

/// Reads the artifacts directory from [`ARTIFACTS_DIR_ENV_VAR_NAME`],
/// falling back to `artifacts` at the workspace root.
///
/// # Errors
///
/// May fail if the variable is unset and the workspace root can't be found.
pub fn artifacts_dir() -> eyre::Result<PathBuf> {
    if let Ok(dir) = env(ARTIFACTS_DIR_ENV_VAR_NAME) {
        return Ok(PathBuf::from(dir));
    }

    Ok(get_workspace_root()?.join("artifacts"))
}

/// Runs the following command to get the workspace root:
///
/// ```bash
/// git rev-parse --show-toplevel
/// ```
fn get_workspace_root() -> eyre::Result<PathBuf> {
    let output = Command::new("git")
        .arg("rev-parse")
        .arg("--show-toplevel")
        .output()
        .wrap_err("should run `git rev-parse --show-toplevel`")?;

    if !output.status.success() {
        eyre::bail!(
            "not inside a git repository; set {ARTIFACTS_DIR_ENV_VAR_NAME}"
        );
    }

    let path = String::from_utf8_lossy(&output.stdout)
        .trim()
        .to_string()
        .parse::<PathBuf>()
        .wrap_err("failed to parse workspace root path")?;
    Ok(path)
}
