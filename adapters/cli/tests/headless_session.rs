use std::{
    fs,
    path::PathBuf,
    process::{Command, Output},
};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_turret-survivor"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("failed to launch the turret-survivor binary")
}

fn json_report(args: &[&str]) -> serde_json::Value {
    let output = run(args);
    assert!(
        output.status.success(),
        "run failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout holds a JSON summary")
}

fn scratch_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "turret-survivor-{}-{name}.toml",
        std::process::id()
    ));
    fs::write(&path, contents).expect("scratch config is writable");
    path
}

#[test]
fn json_summary_reports_the_run() {
    let report = json_report(&["--frames", "600", "--seed", "7", "--json"]);

    assert_eq!(report["seed"], 7);
    assert_eq!(report["theme"], "cyber");
    let frames = report["frames_run"].as_u64().expect("frame count");
    assert!(frames >= 1 && frames <= 600);
    let outcome = report["outcome"].as_str().expect("outcome label");
    assert!(["running", "game_over"].contains(&outcome));
    assert!(report["hud"]["health"].is_i64());
    assert!(report["tally"]["spawned"].is_u64());
}

#[test]
fn identical_seeds_replay_identically() {
    let args = ["--frames", "1500", "--seed", "31", "--picker", "random", "--json"];

    assert_eq!(json_report(&args), json_report(&args));
}

#[test]
fn config_file_tunes_the_simulation_and_theme() {
    let path = scratch_file(
        "quiet",
        "[simulation.spawning]\nchance_per_tick = 0.0\nseed = 5\n\n[presentation]\ntheme = \"basic\"\n",
    );
    let config = path.to_string_lossy().into_owned();

    let report = json_report(&["--config", &config, "--frames", "120", "--json"]);
    let _ = fs::remove_file(&path);

    assert_eq!(report["seed"], 5);
    assert_eq!(report["theme"], "basic");
    assert_eq!(report["frames_run"], 120);
    assert_eq!(report["outcome"], "running");
    assert_eq!(report["tally"]["spawned"], 0);
    assert_eq!(report["tally"]["volleys"], 0);
}

#[test]
fn command_line_flags_override_the_config_file() {
    let path = scratch_file("override", "[presentation]\ntheme = \"basic\"\n");
    let config = path.to_string_lossy().into_owned();

    let report = json_report(&[
        "--config", &config, "--theme", "cyber", "--seed", "11", "--frames", "10", "--json",
    ]);
    let _ = fs::remove_file(&path);

    assert_eq!(report["theme"], "cyber");
    assert_eq!(report["seed"], 11);
}

#[test]
fn invalid_tuning_fails_with_a_readable_error() {
    let path = scratch_file("invalid", "[simulation.pools]\nenemy_capacity = 0\n");
    let config = path.to_string_lossy().into_owned();

    let output = run(&["--config", &config]);
    let _ = fs::remove_file(&path);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("holds invalid tuning"), "stderr: {stderr}");
}

#[test]
fn missing_config_file_is_reported() {
    let output = run(&["--config", "/definitely/not/here.toml"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to read config file"), "stderr: {stderr}");
}

#[test]
fn plain_text_summary_is_the_default() {
    let output = run(&["--frames", "30", "--seed", "3"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("outcome: "), "stdout: {stdout}");
    assert!(stdout.contains("seed 3, theme cyber"));
}
