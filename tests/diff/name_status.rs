use crate::common::command::{branch_oid, commit_file, init_repository_dir, run_gitlet_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn index_against_working_copy(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("1.txt"), "uno".to_string()));

    run_gitlet_command(dir, &["diff", "--name-status"])
        .assert()
        .success()
        .stdout("M 1.txt\n");

    Ok(())
}

#[rstest]
fn between_two_commits(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let first = branch_oid(dir, "master");
    commit_file(dir, "4.txt", "four", "add 4");
    run_gitlet_command(dir, &["rm", "1.txt"]).assert().success();
    crate::common::command::gitlet_commit(dir, "drop 1").assert().success();

    run_gitlet_command(dir, &["diff", "--name-status", &first, "master"])
        .assert()
        .success()
        .stdout("D 1.txt\nA 4.txt\n");

    Ok(())
}

#[rstest]
fn unknown_revision_fails(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    run_gitlet_command(init_repository_dir.path(), &["diff", "--name-status", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "ambiguous argument nope: unknown revision",
        ));

    Ok(())
}

#[rstest]
fn full_diff_is_unsupported(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    run_gitlet_command(init_repository_dir.path(), &["diff"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported"));

    Ok(())
}
