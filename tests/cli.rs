use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn dirtools() -> Command {
    let mut cmd = Command::cargo_bin("dirtools").unwrap();
    cmd.args(["--output-format", "plain", "--no-progress"]);
    cmd
}

#[test]
fn size_reports_megabytes() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir(temp_dir.path().join("nested")).unwrap();
    fs::write(temp_dir.path().join("half.bin"), vec![0u8; 524_288]).unwrap();
    fs::write(temp_dir.path().join("nested").join("half.dat"), vec![0u8; 524_288]).unwrap();

    dirtools()
        .arg("size")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Folder size: 1.00 MB"));
}

#[test]
fn size_of_missing_folder_fails_without_output() {
    dirtools()
        .args(["size", "/definitely/missing/folder"])
        .assert()
        .code(3)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn group_export_writes_csv() {
    let temp_dir = TempDir::new().unwrap();
    let data = temp_dir.path().join("data");
    fs::create_dir(&data).unwrap();
    fs::write(data.join("a.txt"), "hello").unwrap();
    fs::write(data.join("b.txt"), "world").unwrap();
    fs::write(data.join("c.log"), "x").unwrap();
    let export = temp_dir.path().join("groups.csv");

    dirtools()
        .arg("group")
        .arg(&data)
        .arg("--export")
        .arg(&export)
        .assert()
        .success();

    let csv = fs::read_to_string(&export).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "Name,FileCount,TotalSizeMB");
    assert_eq!(lines[1], "\".txt\",2,\"0.00 MB\"");
    assert_eq!(lines[2], "\".log\",1,\"0.00 MB\"");
}

#[test]
fn group_prints_table_without_export() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.rs"), "fn main() {}").unwrap();

    dirtools()
        .arg("group")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(".rs"));
}

#[test]
fn find_then_delete_reports_partial_failure() {
    let temp_dir = TempDir::new().unwrap();
    let data = temp_dir.path().join("data");
    fs::create_dir_all(data.join("sub")).unwrap();
    fs::write(data.join("one.tmp"), "1").unwrap();
    fs::write(data.join("sub").join("two.tmp"), "22").unwrap();
    fs::write(data.join("keep.txt"), "keep").unwrap();
    let manifest = temp_dir.path().join("manifest.txt");

    dirtools()
        .arg("find")
        .arg(&data)
        .arg("tmp")
        .arg("--output")
        .arg(&manifest)
        .assert()
        .success();

    let content = fs::read_to_string(&manifest).unwrap();
    assert!(content.starts_with("size: 0.00 KB,\rfiles: 2\r\n---\n"));

    fs::remove_file(data.join("one.tmp")).unwrap();

    dirtools()
        .arg("delete")
        .arg(&manifest)
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Deleted 1 file(s), 1 failure(s)"));

    assert!(!data.join("sub").join("two.tmp").exists());
    assert!(data.join("keep.txt").exists());
}

#[test]
fn find_lists_matches_on_console() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.log"), "abc").unwrap();
    fs::write(temp_dir.path().join("b.txt"), "abc").unwrap();

    dirtools()
        .arg("find")
        .arg(temp_dir.path())
        .arg(".log")
        .assert()
        .success()
        .stdout(predicate::str::contains("files: 1"))
        .stdout(predicate::str::contains("a.log"))
        .stdout(predicate::str::contains("b.txt").not());
}

#[test]
fn find_rejects_empty_extension() {
    let temp_dir = TempDir::new().unwrap();

    dirtools()
        .arg("find")
        .arg(temp_dir.path())
        .arg("")
        .assert()
        .code(4);
}

#[test]
fn delete_with_missing_manifest_fails() {
    dirtools()
        .args(["delete", "/definitely/missing/manifest.txt"])
        .assert()
        .code(3);
}

#[test]
fn init_config_writes_sample() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("dirtools.toml");

    dirtools()
        .arg("init-config")
        .arg(&config_path)
        .assert()
        .success();

    let content = fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("[manifest]"));
}

#[test]
fn invalid_config_file_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("broken.toml");
    fs::write(&config_path, "[scan]\nmax_depth = 0\n").unwrap();

    dirtools()
        .arg("--config")
        .arg(&config_path)
        .arg("size")
        .arg(temp_dir.path())
        .assert()
        .code(6);
}

#[test]
fn group_of_empty_folder_still_reports() {
    let temp_dir = TempDir::new().unwrap();

    dirtools()
        .arg("group")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Name"))
        .stdout(predicate::str::contains("No files under"));
}

#[test]
fn group_export_failure_keeps_table() {
    let temp_dir = TempDir::new().unwrap();
    let data = temp_dir.path().join("data");
    fs::create_dir(&data).unwrap();
    fs::write(data.join("a.txt"), "hello").unwrap();
    let export = temp_dir.path().join("missing").join("groups.csv");

    dirtools()
        .arg("group")
        .arg(&data)
        .arg("--export")
        .arg(&export)
        .assert()
        .code(5)
        .stdout(predicate::str::contains(".txt"))
        .stderr(predicate::str::contains("Could not write"));

    assert!(!export.exists());
}

#[test]
fn verbose_missing_folder_keeps_stdout_empty() {
    dirtools()
        .args(["-v", "size", "/definitely/missing/folder"])
        .assert()
        .code(3)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("STARTING"));
}
