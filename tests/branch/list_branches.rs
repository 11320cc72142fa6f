use crate::common::command::{init_repository_dir, run_gitlet_command, stdout_of};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn list_branches(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    run_gitlet_command(dir, &["branch", "zeta"]).assert().success();
    run_gitlet_command(dir, &["branch", "alpha"]).assert().success();

    let output = stdout_of(&mut run_gitlet_command(dir, &["branch"]));

    assert_eq!(output, "  alpha\n* master\n  zeta\n");

    Ok(())
}
