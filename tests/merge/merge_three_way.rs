use crate::common::command::{
    branch_oid, commit_file, init_repository_dir, run_gitlet_command, stdout_of,
};
use crate::common::file::read_file;
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

/// History:
///
///   A - B  (master, changes 1.txt)
///    \
///     C    (feature, changes a/2.txt and adds 5.txt)
#[rstest]
fn merge_simple_divergence(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    run_gitlet_command(dir, &["branch", "feature"]).assert().success();
    commit_file(dir, "1.txt", "one on master", "B");
    let master = branch_oid(dir, "master");

    run_gitlet_command(dir, &["checkout", "feature"]).assert().success();
    commit_file(dir, "a/2.txt", "two on feature", "C");
    commit_file(dir, "5.txt", "five", "C'");
    let feature = branch_oid(dir, "feature");
    run_gitlet_command(dir, &["checkout", "master"]).assert().success();

    let output = stdout_of(&mut run_gitlet_command(dir, &["merge", "feature"]));

    assert_eq!(output, "Merge made by the three-way strategy\n");
    assert_eq!(read_file(&dir.join("1.txt")), "one on master");
    assert_eq!(read_file(&dir.join("a/2.txt")), "two on feature");
    assert_eq!(read_file(&dir.join("5.txt")), "five");
    assert!(!dir.join(".gitlet/MERGE_HEAD").exists());
    assert!(!dir.join(".gitlet/MERGE_MSG").exists());

    let merge_commit = read_file(&dir.join(".gitlet/objects").join(branch_oid(dir, "master")));
    assert!(merge_commit.contains(&format!("parent {master}\nparent {feature}\n")));
    assert!(merge_commit.ends_with("    Merge feature into master\n"));

    run_gitlet_command(dir, &["status"])
        .assert()
        .success()
        .stdout("On branch master\n");

    Ok(())
}

#[rstest]
fn merge_keeps_deletion_from_giver(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    run_gitlet_command(dir, &["branch", "feature"]).assert().success();
    commit_file(dir, "1.txt", "one on master", "B");

    run_gitlet_command(dir, &["checkout", "feature"]).assert().success();
    run_gitlet_command(dir, &["rm", "a/b/3.txt"]).assert().success();
    crate::common::command::gitlet_commit(dir, "drop 3").assert().success();
    run_gitlet_command(dir, &["checkout", "master"]).assert().success();

    run_gitlet_command(dir, &["merge", "feature"])
        .assert()
        .success();

    assert!(!dir.join("a/b/3.txt").exists());
    assert!(dir.join("a/2.txt").exists());

    Ok(())
}
