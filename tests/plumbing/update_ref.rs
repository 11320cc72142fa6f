use crate::common::command::{
    branch_oid, commit_file, gitlet_file, init_repository_dir, object_id, run_gitlet_command,
};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn update_ref_through_head_moves_branch(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let first = branch_oid(dir, "master");
    commit_file(dir, "1.txt", "uno", "second");

    run_gitlet_command(dir, &["update-ref", "HEAD", &first])
        .assert()
        .success();

    assert_eq!(branch_oid(dir, "master"), first);
    assert_eq!(gitlet_file(dir, "HEAD"), "ref: refs/heads/master\n");

    Ok(())
}

#[rstest]
fn update_ref_failures(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let blob = object_id("one");

    run_gitlet_command(dir, &["update-ref", "refs/heads/x", "nowhere"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nowhere not a valid SHA1"));

    run_gitlet_command(dir, &["update-ref", "refs/tags/v1", "master"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot lock the ref refs/tags/v1"));

    run_gitlet_command(dir, &["update-ref", "refs/heads/x", &blob])
        .assert()
        .failure()
        .stderr(predicate::str::contains(format!(
            "refs/heads/x cannot refer to non-commit object {blob}"
        )));

    Ok(())
}
