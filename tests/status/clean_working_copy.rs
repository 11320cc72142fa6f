use crate::common::command::{init_repository_dir, repository_dir, run_gitlet_command};
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
fn print_only_branch_when_nothing_changed(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_gitlet_command(init_repository_dir.path(), &["status"])
        .assert()
        .success()
        .stdout("On branch master\n");

    Ok(())
}

#[rstest]
fn status_of_empty_repository(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    run_gitlet_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    run_gitlet_command(repository_dir.path(), &["status"])
        .assert()
        .success()
        .stdout("On branch master\n");

    Ok(())
}
