use formgate_kernel::config::load_config;
use formgate_kernel::domain::config::FormConfig;
use serial_test::serial;
use std::io::Write;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
#[serial]
fn loads_file_values() {
    let file = write_config(
        r#"
hidden_encryption = true
exempt_request_ids = ["R1", "R7"]
protection_marker = true

[vault]
secret = "from-file"
salt = "node"
"#,
    );

    let cfg: FormConfig = load_config(Some(file.path())).unwrap();
    assert!(cfg.is_exempt("R7"));
    assert!(cfg.protection_marker);
    assert_eq!(cfg.vault.secret, "from-file");
}

#[test]
#[serial]
fn absent_keys_fall_back_to_defaults() {
    let file = write_config("protection_marker = true\n");

    let cfg: FormConfig = load_config(Some(file.path())).unwrap();
    assert!(cfg.hidden_encryption);
    assert!(cfg.exempt_request_ids.is_empty());
    assert_eq!(cfg.vault.salt, "formgate");
}

#[test]
#[serial]
fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let result: Result<FormConfig, _> = load_config(Some(dir.path().join("absent.toml")));
    assert!(result.is_err());
}
