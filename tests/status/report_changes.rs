use crate::common::command::{init_repository_dir, run_gitlet_command, stdout_of};
use crate::common::file::{FileSpec, delete_path, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn list_untracked_files_and_directories(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("new.txt"), "new".to_string()));
    write_file(FileSpec::new(dir.join("notes/todo.txt"), "todo".to_string()));
    write_file(FileSpec::new(dir.join("a/untracked.txt"), "inside".to_string()));

    let output = stdout_of(&mut run_gitlet_command(dir, &["status"]));

    assert_eq!(output, "On branch master\nUntracked files:\nnew.txt\nnotes/\n");

    Ok(())
}

#[rstest]
fn report_staged_and_unstaged_changes(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("1.txt"), "uno".to_string()));
    write_file(FileSpec::new(dir.join("a/b/4.txt"), "four".to_string()));
    run_gitlet_command(dir, &["add", "a/b/4.txt"]).assert().success();
    delete_path(&dir.join("a/2.txt"));

    let output = stdout_of(&mut run_gitlet_command(dir, &["status"]));

    assert_eq!(
        output,
        "On branch master\n\
         Changes to be committed:\n\
         A a/b/4.txt\n\
         Changes not staged for commit:\n\
         M 1.txt\n\
         D a/2.txt\n"
    );

    Ok(())
}
