#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Runs the binary against a private data dir and a config file that does not exist.
fn mdnotes_cmd(temp: &Path) -> Command {
    let mut cmd = Command::new(cargo_bin("mdnotes"));
    cmd.env_remove("MDNOTES_DATA_DIR")
        .env_remove("MDNOTES_LOG")
        .env_remove("MDNOTES_DEFAULT_THEME")
        .arg("--data-dir")
        .arg(temp.join("data"))
        .arg("--config")
        .arg(temp.join("mdnotes.toml"));
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output).unwrap()
}

#[test]
fn test_document_workflow() {
    let temp = TempDir::new().unwrap();

    // 1. Create
    let id = stdout_of(mdnotes_cmd(temp.path()).args(["new", "Shopping", "List"]));
    let id = id.trim().to_string();
    assert!(!id.is_empty());

    // 2. Listed by title
    mdnotes_cmd(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Shopping List"));

    // 3. Save from stdin, addressed by slug
    mdnotes_cmd(temp.path())
        .args(["save", "shopping-list"])
        .write_stdin("# Shopping\n\n- milk\n- eggs\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("(v0)"));

    // 4. Show by id
    mdnotes_cmd(temp.path())
        .args(["show", &id])
        .assert()
        .success()
        .stdout("# Shopping\n\n- milk\n- eggs\n");

    // 5. Second save gets the next version number
    let file = temp.path().join("draft.md");
    fs::write(&file, "# Shopping\n\n- bread\n").unwrap();
    mdnotes_cmd(temp.path())
        .args(["save", &id])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("(v1)"));

    mdnotes_cmd(temp.path())
        .args(["versions", "shopping-list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("v1").and(predicate::str::contains("Manual save")));

    // 6. Delete
    mdnotes_cmd(temp.path())
        .args(["delete", &id])
        .assert()
        .success();
    mdnotes_cmd(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No documents yet."));
}

#[test]
fn test_render_uses_theme() {
    let temp = TempDir::new().unwrap();
    mdnotes_cmd(temp.path()).args(["new", "Styled"]).assert().success();
    mdnotes_cmd(temp.path())
        .args(["save", "styled"])
        .write_stdin("## Heading\n\nSome **bold** text")
        .assert()
        .success();

    mdnotes_cmd(temp.path())
        .args(["render", "styled"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<h2 ").and(predicate::str::contains("color:#333333")));

    mdnotes_cmd(temp.path())
        .args(["render", "styled", "--theme", "dark"])
        .assert()
        .success()
        .stdout(predicate::str::contains("color:#ffffff"));
}

#[test]
fn test_theme_preference_persists() {
    let temp = TempDir::new().unwrap();

    mdnotes_cmd(temp.path()).arg("theme").assert().success().stdout("light\n");
    mdnotes_cmd(temp.path())
        .args(["theme", "toggle"])
        .assert()
        .success()
        .stdout("dark\n");
    mdnotes_cmd(temp.path()).arg("theme").assert().success().stdout("dark\n");

    let stored = fs::read_to_string(temp.path().join("data").join("mdproject_theme")).unwrap();
    assert_eq!(stored, "dark");
}

#[test]
fn test_folders_and_favorites() {
    let temp = TempDir::new().unwrap();
    mdnotes_cmd(temp.path()).args(["folder", "new", "Work"]).assert().success();
    mdnotes_cmd(temp.path())
        .args(["new", "--folder", "work", "Roadmap"])
        .assert()
        .success();
    mdnotes_cmd(temp.path()).args(["new", "Loose"]).assert().success();

    mdnotes_cmd(temp.path())
        .args(["list", "--folder", "Work"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Roadmap").and(predicate::str::contains("Loose").not()));

    mdnotes_cmd(temp.path())
        .args(["fav", "loose"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added"));
    mdnotes_cmd(temp.path())
        .args(["list", "--favorites"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Loose").and(predicate::str::contains("Roadmap").not()));

    // Deleting the folder moves its documents to the root
    mdnotes_cmd(temp.path())
        .args(["folder", "delete", "Work"])
        .assert()
        .success();
    mdnotes_cmd(temp.path())
        .args(["list", "--root"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Roadmap"));
}

#[test]
fn test_restore_and_history() {
    let temp = TempDir::new().unwrap();
    mdnotes_cmd(temp.path()).args(["new", "Journal"]).assert().success();
    for content in ["first", "second"] {
        mdnotes_cmd(temp.path())
            .args(["save", "journal"])
            .write_stdin(content)
            .assert()
            .success();
    }

    let history = stdout_of(mdnotes_cmd(temp.path()).args(["history", "journal"]));
    let history: serde_json::Value = serde_json::from_str(&history).unwrap();
    let first_version = history
        .as_array()
        .unwrap()
        .iter()
        .find(|v| v["content"] == "first")
        .unwrap()["id"]
        .as_str()
        .unwrap()
        .to_string();

    mdnotes_cmd(temp.path())
        .args(["restore", &first_version])
        .assert()
        .success()
        .stdout(predicate::str::contains("v2"));
    mdnotes_cmd(temp.path())
        .args(["show", "journal"])
        .assert()
        .success()
        .stdout("first\n");
}

#[test]
fn test_slug_command() {
    let temp = TempDir::new().unwrap();
    mdnotes_cmd(temp.path())
        .args(["slug", "Hello,", "World!"])
        .assert()
        .success()
        .stdout("hello-world\n");
}

#[test]
fn test_missing_document_fails() {
    let temp = TempDir::new().unwrap();
    mdnotes_cmd(temp.path())
        .args(["show", "does-not-exist"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: Document not found"));
}

#[test]
fn test_config_file_sets_default_theme() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("mdnotes.toml"), "default_theme = \"dark\"\n").unwrap();

    mdnotes_cmd(temp.path()).arg("theme").assert().success().stdout("dark\n");
}
