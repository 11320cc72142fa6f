use crate::common::command::{gitlet_file, repository_dir, run_gitlet_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn remote_add_writes_config(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir.path();
    run_gitlet_command(dir, &["init"]).assert().success();

    run_gitlet_command(dir, &["remote", "add", "origin", "../upstream"])
        .assert()
        .success();

    assert_eq!(
        gitlet_file(dir, "config"),
        "[core]\n    bare = false\n\
         [remote \"origin\"]\n    url = ../upstream\n    fetch = +refs/heads/*:refs/remotes/origin/*\n"
    );

    Ok(())
}

#[rstest]
fn remote_add_twice_fails(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir.path();
    run_gitlet_command(dir, &["init"]).assert().success();
    run_gitlet_command(dir, &["remote", "add", "origin", "../a"])
        .assert()
        .success();

    run_gitlet_command(dir, &["remote", "add", "origin", "../b"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("remote origin already exists"));

    Ok(())
}

#[rstest]
fn other_remote_commands_are_unsupported(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir.path();
    run_gitlet_command(dir, &["init"]).assert().success();

    run_gitlet_command(dir, &["remote", "rename", "origin", "upstream"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported"));

    Ok(())
}
