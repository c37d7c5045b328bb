use assert_cmd::Command;

#[test]
fn runs_with_no_plugins_discovered_and_exits_cleanly() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    std::fs::create_dir(dir.path().join("otopi"))?;
    let mut cmd = Command::cargo_bin("otopi")?;
    cmd.arg("--plugin-path").arg(dir.path());
    cmd.assert().success();
    Ok(())
}

#[test]
fn rejects_a_config_file_with_an_unsupported_extension() -> Result<(), Box<dyn std::error::Error>> {
    let file = tempfile::Builder::new().suffix(".ini").tempfile()?;
    let mut cmd = Command::cargo_bin("otopi")?;
    cmd.arg("--config").arg(file.path());
    cmd.assert().failure();
    Ok(())
}
