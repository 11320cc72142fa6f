use crate::common::command::{gitlet_file, repository_dir, run_gitlet_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn init_repository_successfully(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir_absolute_path = repository_dir.path().canonicalize()?.display().to_string();

    run_gitlet_command(repository_dir.path(), &["init"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(
            r"^Initialized empty Gitlet repository in .+\.gitlet\n$",
        )?)
        .stdout(predicate::str::contains(dir_absolute_path));

    assert_eq!(gitlet_file(repository_dir.path(), "HEAD"), "ref: refs/heads/master\n");
    assert_eq!(
        gitlet_file(repository_dir.path(), "config"),
        "[core]\n    bare = false\n"
    );
    assert!(repository_dir.path().join(".gitlet/objects").is_dir());
    assert!(repository_dir.path().join(".gitlet/refs/heads").is_dir());

    Ok(())
}

#[rstest]
fn init_at_given_path(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    run_gitlet_command(repository_dir.path(), &["init", "nested/project"])
        .assert()
        .success();

    assert!(repository_dir.path().join("nested/project/.gitlet/HEAD").is_file());

    Ok(())
}
