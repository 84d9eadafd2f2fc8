use std::io::Write;
use std::path::Path;

use tokio::fs;
use tracing::info;

use panywhere_core::hook::{render_pre_commit_hook, PRE_COMMIT_HOOK_PATH};

use super::CommandResult;

/// Install the pre-commit hook under `repo_root`.
///
/// The hooks directory may already exist. The script is written to a
/// temporary file next to the hook and renamed over it, so the hook is
/// replaced whole on every run.
pub async fn run_install_hook<W: Write>(repo_root: &Path, program: &str, out: &mut W) -> CommandResult {
    let hook_path = repo_root.join(PRE_COMMIT_HOOK_PATH);
    let hooks_dir = hook_path
        .parent()
        .ok_or("pre-commit hook path has no parent directory")?;

    fs::create_dir_all(hooks_dir)
        .await
        .map_err(|e| format!("failed to create {}: {e}", hooks_dir.display()))?;

    let temp_path = hooks_dir.join("pre-commit.tmp");
    fs::write(&temp_path, render_pre_commit_hook(program))
        .await
        .map_err(|e| format!("failed to write {}: {e}", temp_path.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&temp_path, std::fs::Permissions::from_mode(0o755))
            .await
            .map_err(|e| format!("failed to mark hook executable: {e}"))?;
    }

    fs::rename(&temp_path, &hook_path)
        .await
        .map_err(|e| format!("failed to install {}: {e}", hook_path.display()))?;

    info!("Installed pre-commit hook running {program}");
    writeln!(out, "Pre-commit hook installed at {}", hook_path.display())?;

    Ok(())
}
