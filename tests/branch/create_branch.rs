use crate::common::command::{branch_oid, init_repository_dir, repository_dir, run_gitlet_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn create_branch_at_head(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();

    run_gitlet_command(dir, &["branch", "feature"])
        .assert()
        .success()
        .stdout("");

    assert_eq!(branch_oid(dir, "feature"), branch_oid(dir, "master"));

    Ok(())
}

#[rstest]
fn create_duplicate_branch(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    run_gitlet_command(dir, &["branch", "feature"]).assert().success();

    run_gitlet_command(dir, &["branch", "feature"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("A branch named feature already exists"));

    Ok(())
}

#[rstest]
fn create_branch_without_commits(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir.path();
    run_gitlet_command(dir, &["init"]).assert().success();

    run_gitlet_command(dir, &["branch", "feature"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("master not a valid object name"));

    Ok(())
}

#[rstest]
#[case("has space")]
#[case("dots.in.name")]
#[case("nested/name")]
fn create_branch_with_invalid_name(
    init_repository_dir: TempDir,
    #[case] name: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    run_gitlet_command(init_repository_dir.path(), &["branch", name])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot lock the ref"));

    Ok(())
}
