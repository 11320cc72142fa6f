use crate::common::command::{
    commit_file, gitlet_commit, gitlet_file, object_id, repository_dir, run_gitlet_command,
    stdout_of,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::path::Path;

fn diverge_on_shared_file(dir: &Path) {
    run_gitlet_command(dir, &["init"]).assert().success();
    commit_file(dir, "shared.txt", "base", "A");
    run_gitlet_command(dir, &["branch", "other"]).assert().success();
    commit_file(dir, "shared.txt", "ours", "B");

    run_gitlet_command(dir, &["checkout", "other"]).assert().success();
    commit_file(dir, "shared.txt", "theirs", "C");
    run_gitlet_command(dir, &["checkout", "master"]).assert().success();
}

#[rstest]
fn merge_with_conflicts(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir.path();
    diverge_on_shared_file(dir);

    run_gitlet_command(dir, &["merge", "other"])
        .assert()
        .success()
        .stdout("Automatic merge failed. Fix conflicts and commit the result.\n");

    assert_eq!(
        read_file(&dir.join("shared.txt")),
        "<<<<<<\nours\n======\ntheirs\n>>>>>>\n"
    );
    assert_eq!(
        gitlet_file(dir, "index"),
        format!(
            "shared.txt 1 {}\nshared.txt 2 {}\nshared.txt 3 {}\n",
            object_id("base"),
            object_id("ours"),
            object_id("theirs")
        )
    );
    assert!(dir.join(".gitlet/MERGE_HEAD").is_file());
    assert_eq!(
        gitlet_file(dir, "MERGE_MSG"),
        "Merge other into master\nConflicts:\nshared.txt"
    );

    let status = stdout_of(&mut run_gitlet_command(dir, &["status"]));
    assert!(status.contains("Unmerged paths:\nshared.txt\n"));

    Ok(())
}

#[rstest]
fn commit_with_unresolved_conflicts_fails(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir.path();
    diverge_on_shared_file(dir);
    run_gitlet_command(dir, &["merge", "other"]).assert().success();

    gitlet_commit(dir, "too early")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "U shared.txt\ncannot commit because you have unmerged files",
        ));

    Ok(())
}

#[rstest]
fn resolving_conflicts_completes_the_merge(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir.path();
    diverge_on_shared_file(dir);
    run_gitlet_command(dir, &["merge", "other"]).assert().success();

    write_file(FileSpec::new(dir.join("shared.txt"), "both".to_string()));
    run_gitlet_command(dir, &["add", "shared.txt"]).assert().success();

    gitlet_commit(dir, "ignored")
        .assert()
        .success()
        .stdout("Merge made by the three-way strategy\n");

    assert_eq!(
        gitlet_file(dir, "index"),
        format!("shared.txt 0 {}\n", object_id("both"))
    );
    assert!(!dir.join(".gitlet/MERGE_HEAD").exists());
    assert!(!dir.join(".gitlet/MERGE_MSG").exists());

    Ok(())
}
