//! Git pre-commit hook that re-uploads every staged file.

/// Hook location relative to the repository root.
pub const PRE_COMMIT_HOOK_PATH: &str = ".git/hooks/pre-commit";

/// Render the hook script. `program` is the command the hook runs for each
/// staged file; it is single-quoted for the shell.
///
/// Deleted files are filtered out of the staged list since there is nothing
/// left to upload for them.
pub fn render_pre_commit_hook(program: &str) -> String {
    format!(
        r#"#!/bin/bash
staged_files=$(git diff --cached --name-only --diff-filter=ACMR)

for file in $staged_files; do
    {program} upload "$file"
done
"#,
        program = shell_quote(program)
    )
}

fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}
