/// Integration tests running the built binary against a scripted installer
#[cfg(unix)]
mod unix {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};
    use std::process::{Command, Output};

    /// Charges 10 cycles per byte of the module passed after `--wasm`
    const CHARGING_INSTALLER: &str = r#"#!/bin/sh
[ "$1 $2 $6 $7 $8" = "canister install --mode reinstall --with-cycles" ] || exit 9
size=$(wc -c < "$5")
printf '{"cycles": %d}\n' $((size * 10))
"#;

    const FAILING_INSTALLER: &str = r#"#!/bin/sh
echo "boom from installer" >&2
exit 4
"#;

    fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, body).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    fn write_module(dir: &Path, name: &str, size: usize) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, vec![0u8; size]).unwrap();
        path
    }

    fn run_binary(installer: &Path, modules: &[&Path]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_install-cycles"))
            .arg("--dfx")
            .arg(installer)
            .arg("backend")
            .args(modules)
            .env_remove("RUST_LOG")
            .output()
            .unwrap()
    }

    #[test]
    fn test_measures_modules_through_installer() {
        let dir = tempfile::tempdir().unwrap();
        let installer = write_script(dir.path(), "fake-dfx", CHARGING_INSTALLER);
        let small = write_module(dir.path(), "small.wasm", 100);
        let large = write_module(dir.path(), "large.wasm", 200);

        let output = run_binary(&installer, &[&small, &large]);
        let stdout = String::from_utf8(output.stdout).unwrap();
        assert!(
            output.status.success(),
            "stderr: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        let lines: Vec<&str> = stdout.lines().collect();
        assert_eq!(
            lines,
            [
                format!("{}: size=100 bytes cycles=1000", small.display()),
                format!("{}: size=200 bytes cycles=2000", large.display()),
                "Linear approximation: cycles ~= 10.00 * bytes + 0.00".to_string(),
            ]
        );
    }

    #[test]
    fn test_installer_failure_exits_non_zero() {
        let dir = tempfile::tempdir().unwrap();
        let installer = write_script(dir.path(), "broken-dfx", FAILING_INSTALLER);
        let module = write_module(dir.path(), "a.wasm", 100);

        let output = run_binary(&installer, &[&module]);
        assert!(!output.status.success());
        assert!(output.stdout.is_empty());

        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("boom from installer"), "stderr: {}", stderr);
        assert!(stderr.contains("exit status: 4"), "stderr: {}", stderr);
    }

    #[test]
    fn test_empty_installer_flag_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let module = write_module(dir.path(), "a.wasm", 100);

        let output = run_binary(Path::new(""), &[&module]);
        assert!(!output.status.success());
        assert!(String::from_utf8_lossy(&output.stderr).contains("installer.program"));
    }
}
