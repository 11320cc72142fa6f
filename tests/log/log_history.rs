use crate::common::command::{
    branch_oid, commit_file, init_repository_dir, repository_dir, run_gitlet_command, stdout_of,
};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn log_lists_commits_newest_first(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let first = branch_oid(dir, "master");
    commit_file(dir, "4.txt", "four", "add 4");
    let second = branch_oid(dir, "master");

    let output = stdout_of(&mut run_gitlet_command(dir, &["log"]));

    let hashes = output
        .lines()
        .filter_map(|line| line.strip_prefix("commit "))
        .collect::<Vec<_>>();
    assert_eq!(hashes, vec![second.as_str(), first.as_str()]);
    assert!(output.contains("\n    add 4\n"));
    assert!(output.contains("\n    Initial commit\n"));
    assert_eq!(output.matches("Date:  ").count(), 2);

    Ok(())
}

#[rstest]
fn log_indents_every_message_line(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    commit_file(dir, "4.txt", "four", "add 4\n\nwith a body line");

    let output = stdout_of(&mut run_gitlet_command(dir, &["log"]));

    assert!(output.contains("\n\n    add 4\n    \n    with a body line\n"));

    Ok(())
}

#[rstest]
fn log_without_commits_fails(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    run_gitlet_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    run_gitlet_command(repository_dir.path(), &["log"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not have any commits yet"));

    Ok(())
}
