use crate::common::command::{gitlet_file, init_repository_dir, object_id, run_gitlet_command};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn rm_file_from_working_copy_and_index(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();

    run_gitlet_command(dir, &["rm", "1.txt"]).assert().success();

    assert!(!dir.join("1.txt").exists());
    assert_eq!(
        gitlet_file(dir, "index"),
        format!(
            "a/2.txt 0 {}\na/b/3.txt 0 {}\n",
            object_id("two"),
            object_id("three")
        )
    );

    Ok(())
}

#[rstest]
fn rm_directory_recursively(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();

    run_gitlet_command(dir, &["rm", "-r", "a"]).assert().success();

    assert!(!dir.join("a").exists());
    assert_eq!(
        gitlet_file(dir, "index"),
        format!("1.txt 0 {}\n", object_id("one"))
    );

    Ok(())
}
