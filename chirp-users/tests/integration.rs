use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use libchirp::Database;
use tempfile::TempDir;

/// Write a config file whose database lives inside `dir`
fn create_test_config(dir: &Path) -> (PathBuf, String) {
    let db_path = dir.join("chirp.db").to_string_lossy().replace('\\', "/");
    let config_path = dir.join("config.toml");

    let config_content = format!(
        r#"
[database]
path = "{}"
"#,
        db_path
    );

    std::fs::write(&config_path, config_content).unwrap();
    (config_path, db_path)
}

fn chirp_users(config: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_chirp-users"))
        .arg("--config")
        .arg(config)
        .args(args)
        .output()
        .unwrap()
}

#[tokio::test]
async fn test_add_then_list_json() {
    let temp_dir = TempDir::new().unwrap();
    let (config, _) = create_test_config(temp_dir.path());

    let output = chirp_users(
        &config,
        &[
            "add",
            "--id",
            "user_1",
            "--username",
            "alice",
            "--image-url",
            "https://img.example.com/alice.png",
            "--email",
            "alice@example.com",
        ],
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "user_1");

    let output = chirp_users(&config, &["list", "--format", "json"]);
    assert!(output.status.success());

    let users: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(users.as_array().unwrap().len(), 1);
    assert_eq!(users[0]["id"], "user_1");
    assert_eq!(users[0]["username"], "alice");
    assert_eq!(
        users[0]["profile_image_url"],
        "https://img.example.com/alice.png"
    );
    // Only the public projection is printed
    assert!(!String::from_utf8_lossy(&output.stdout).contains("alice@example.com"));
}

#[tokio::test]
async fn test_add_stores_full_record() {
    let temp_dir = TempDir::new().unwrap();
    let (config, db_path) = create_test_config(temp_dir.path());

    let output = chirp_users(
        &config,
        &[
            "add",
            "--id",
            "user_9",
            "--username",
            "@carol",
            "--image-url",
            "https://img.example.com/carol.png",
            "--first-name",
            "Carol",
            "--metadata",
            r#"{"plan":"pro"}"#,
        ],
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let db = Database::new(&db_path).await.unwrap();
    let user = db.get_user("user_9").await.unwrap().unwrap();
    assert_eq!(user.username, "carol");
    assert_eq!(user.first_name.as_deref(), Some("Carol"));
    assert_eq!(user.private_metadata.as_deref(), Some(r#"{"plan":"pro"}"#));
}

#[tokio::test]
async fn test_add_generates_id() {
    let temp_dir = TempDir::new().unwrap();
    let (config, _) = create_test_config(temp_dir.path());

    let output = chirp_users(
        &config,
        &["add", "--username", "dave", "--image-url", "https://img.example.com/d.png"],
    );
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).trim().starts_with("user_"));
}

#[tokio::test]
async fn test_list_text_output() {
    let temp_dir = TempDir::new().unwrap();
    let (config, _) = create_test_config(temp_dir.path());

    for (id, name) in [("user_1", "alice"), ("user_2", "bob")] {
        let url = format!("https://img.example.com/{}.png", name);
        let output = chirp_users(
            &config,
            &["add", "--id", id, "--username", name, "--image-url", &url],
        );
        assert!(output.status.success());
    }

    let output = chirp_users(&config, &["list"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("user_1\t@alice\thttps://img.example.com/alice.png"));
    assert!(stdout.contains("user_2\t@bob"));
}

#[tokio::test]
async fn test_duplicate_username_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let (config, _) = create_test_config(temp_dir.path());

    let first = chirp_users(
        &config,
        &["add", "--id", "user_1", "--username", "alice", "--image-url", "https://a.example/1.png"],
    );
    assert!(first.status.success());

    let second = chirp_users(
        &config,
        &["add", "--id", "user_2", "--username", "alice", "--image-url", "https://a.example/2.png"],
    );
    assert_eq!(second.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&second.stderr).contains("taken"));
}

#[tokio::test]
async fn test_same_id_updates_record() {
    let temp_dir = TempDir::new().unwrap();
    let (config, db_path) = create_test_config(temp_dir.path());

    for url in ["https://a.example/old.png", "https://a.example/new.png"] {
        let output = chirp_users(
            &config,
            &["add", "--id", "user_1", "--username", "alice", "--image-url", url],
        );
        assert!(output.status.success());
    }

    let db = Database::new(&db_path).await.unwrap();
    let users = db.list_users().await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].profile_image_url, "https://a.example/new.png");
}

#[tokio::test]
async fn test_invalid_input_exit_codes() {
    let temp_dir = TempDir::new().unwrap();
    let (config, _) = create_test_config(temp_dir.path());

    let bad_name = chirp_users(
        &config,
        &["add", "--username", "two words", "--image-url", "https://a.example/x.png"],
    );
    assert_eq!(bad_name.status.code(), Some(3));

    let bad_metadata = chirp_users(
        &config,
        &[
            "add",
            "--username",
            "eve",
            "--image-url",
            "https://a.example/x.png",
            "--metadata",
            "{not json",
        ],
    );
    assert_eq!(bad_metadata.status.code(), Some(3));
}

#[test]
fn test_missing_config_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("nope.toml");

    let output = chirp_users(&missing, &["list"]);
    assert_eq!(output.status.code(), Some(1));
}
