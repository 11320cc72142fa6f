use crate::common::command::{
    branch_oid, commit_file, gitlet_file, init_repository_dir, object_id, run_gitlet_command,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn merge_into_detached_head_is_unsupported(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let first = branch_oid(dir, "master");
    run_gitlet_command(dir, &["checkout", &first]).assert().success();

    run_gitlet_command(dir, &["merge", "master"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported"));

    Ok(())
}

#[rstest]
fn merge_non_commit_fails(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let blob = object_id("one");

    run_gitlet_command(init_repository_dir.path(), &["merge", &blob])
        .assert()
        .failure()
        .stderr(predicate::str::contains(format!("{blob}: expected commit type")));

    run_gitlet_command(init_repository_dir.path(), &["merge", "nowhere"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nowhere: expected commit type"));

    Ok(())
}

#[rstest]
fn merge_refuses_to_overwrite_local_changes(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    run_gitlet_command(dir, &["branch", "feature"]).assert().success();
    run_gitlet_command(dir, &["checkout", "feature"]).assert().success();
    commit_file(dir, "1.txt", "one on feature", "change 1");
    run_gitlet_command(dir, &["checkout", "master"]).assert().success();
    write_file(FileSpec::new(dir.join("1.txt"), "dirty".to_string()));

    run_gitlet_command(dir, &["merge", "feature"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("local changes would be lost\n1.txt\n"));

    assert_eq!(read_file(&dir.join("1.txt")), "dirty");
    assert!(!dir.join(".gitlet/MERGE_HEAD").exists());

    Ok(())
}

#[rstest]
fn merge_refuses_to_drop_staged_change_reverted_on_disk(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    run_gitlet_command(dir, &["branch", "feature"]).assert().success();
    run_gitlet_command(dir, &["checkout", "feature"]).assert().success();
    commit_file(dir, "1.txt", "one on feature", "change 1");
    run_gitlet_command(dir, &["checkout", "master"]).assert().success();
    let master = branch_oid(dir, "master");
    write_file(FileSpec::new(dir.join("1.txt"), "staged".to_string()));
    run_gitlet_command(dir, &["add", "1.txt"]).assert().success();
    write_file(FileSpec::new(dir.join("1.txt"), "one".to_string()));

    run_gitlet_command(dir, &["merge", "feature"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("local changes would be lost\n1.txt\n"));

    assert_eq!(branch_oid(dir, "master"), master);
    assert!(gitlet_file(dir, "index").contains(&object_id("staged")));
    assert_eq!(read_file(&dir.join("1.txt")), "one");

    Ok(())
}
