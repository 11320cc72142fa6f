use crate::common::command::{
    branch_oid, commit_file, gitlet_file, repository_dir, run_gitlet_command, stdout_of,
};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn fetch_branch_from_remote(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let upstream = repository_dir.path().join("upstream");
    let local = repository_dir.path().join("local");
    run_gitlet_command(repository_dir.path(), &["init", "upstream"])
        .assert()
        .success();
    commit_file(&upstream, "readme.txt", "hello", "first");
    run_gitlet_command(repository_dir.path(), &["init", "local"])
        .assert()
        .success();
    run_gitlet_command(&local, &["remote", "add", "origin", "../upstream"])
        .assert()
        .success();

    let output = stdout_of(&mut run_gitlet_command(&local, &["fetch", "origin", "master"]));

    // blob, tree and commit
    assert_eq!(output, "From ../upstream\nCount 3\nmaster -> origin/master\n");

    let upstream_head = branch_oid(&upstream, "master");
    assert_eq!(
        gitlet_file(&local, "refs/remotes/origin/master"),
        format!("{upstream_head}\n")
    );
    assert_eq!(
        gitlet_file(&local, "FETCH_HEAD"),
        format!("{upstream_head} branch master of ../upstream\n")
    );
    assert!(local.join(".gitlet/objects").join(&upstream_head).is_file());
    assert!(!local.join("readme.txt").exists());

    Ok(())
}

#[rstest]
fn fetch_all_branches(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let upstream = repository_dir.path().join("upstream");
    let local = repository_dir.path().join("local");
    run_gitlet_command(repository_dir.path(), &["init", "upstream"])
        .assert()
        .success();
    commit_file(&upstream, "readme.txt", "hello", "first");
    run_gitlet_command(&upstream, &["branch", "develop"])
        .assert()
        .success();
    run_gitlet_command(repository_dir.path(), &["init", "local"])
        .assert()
        .success();
    run_gitlet_command(&local, &["remote", "add", "origin", "../upstream"])
        .assert()
        .success();

    run_gitlet_command(&local, &["fetch", "origin"])
        .assert()
        .success()
        .stdout(predicate::str::ends_with(
            "develop -> origin/develop\nmaster -> origin/master\n",
        ));

    assert!(local.join(".gitlet/refs/remotes/origin/develop").is_file());
    assert_eq!(gitlet_file(&local, "FETCH_HEAD").lines().count(), 2);

    Ok(())
}

#[rstest]
fn fetch_reports_forced_update(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let upstream = repository_dir.path().join("upstream");
    let local = repository_dir.path().join("local");
    run_gitlet_command(repository_dir.path(), &["init", "upstream"])
        .assert()
        .success();
    commit_file(&upstream, "readme.txt", "hello", "first");
    let first = branch_oid(&upstream, "master");
    commit_file(&upstream, "readme.txt", "hello again", "second");
    run_gitlet_command(repository_dir.path(), &["init", "local"])
        .assert()
        .success();
    run_gitlet_command(&local, &["remote", "add", "origin", "../upstream"])
        .assert()
        .success();
    run_gitlet_command(&local, &["fetch", "origin", "master"])
        .assert()
        .success();

    run_gitlet_command(&upstream, &["update-ref", "refs/heads/master", &first])
        .assert()
        .success();

    run_gitlet_command(&local, &["fetch", "origin", "master"])
        .assert()
        .success()
        .stdout(predicate::str::ends_with(
            "master -> origin/master (forced)\n",
        ));

    Ok(())
}

#[rstest]
fn fetch_failures(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let upstream = repository_dir.path().join("upstream");
    let local = repository_dir.path().join("local");
    run_gitlet_command(repository_dir.path(), &["init", "upstream"])
        .assert()
        .success();
    run_gitlet_command(repository_dir.path(), &["init", "local"])
        .assert()
        .success();
    run_gitlet_command(&local, &["remote", "add", "origin", "../upstream"])
        .assert()
        .success();
    run_gitlet_command(&local, &["remote", "add", "ghost", "../nowhere"])
        .assert()
        .success();

    run_gitlet_command(&local, &["fetch", "missing", "master"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "missing does not appear to be a git repository",
        ));

    run_gitlet_command(&local, &["fetch", "ghost", "master"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "../nowhere does not appear to be a git repository",
        ));

    run_gitlet_command(&local, &["fetch", "origin", "master"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("couldn't find remote ref master"));

    assert!(upstream.join(".gitlet").is_dir());

    Ok(())
}
