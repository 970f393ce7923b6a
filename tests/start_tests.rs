//! End-to-end tests of the build and start commands against a fake runtime.

mod helpers;

use csp_checker::commands::start::StartOptions;
use csp_checker::commands::{cmd_build, cmd_start};
use csp_checker::runtime::ImageStatus;
use csp_checker::{CheckerError, EnvFilePolicy, ImageTag};
use helpers::{strings, Call, RecordingRuntime, TestEnv};

fn options(domains: &[&str], short_mode: bool, ignore: &[&str]) -> StartOptions {
    StartOptions {
        tag: ImageTag::new("test-image").unwrap(),
        domains: strings(domains),
        short_mode,
        ignore_network_blocks_from: strings(ignore),
        env_file_fallback: false,
    }
}

#[test]
fn test_start_runs_existing_image_from_tool_dir() {
    let env = TestEnv::new();
    let runtime = RecordingRuntime::new(ImageStatus::Present);

    cmd_start(
        &runtime,
        &env.config(),
        &options(&["example.org"], true, &["pxscdn.com", "cdn.example.org"]),
    )
    .unwrap();

    assert_eq!(
        runtime.calls(),
        vec![
            Call::Inspect("test-image".into()),
            Call::Run {
                argv: strings(&[
                    "docker",
                    "run",
                    "--rm",
                    "test-image",
                    "--short",
                    "--ignore-network-blocks-from",
                    "pxscdn.com",
                    "cdn.example.org",
                    "--",
                    "example.org",
                ]),
                cwd: env.base_dir.clone(),
            },
        ]
    );
}

#[test]
fn test_start_builds_missing_image_first() {
    let env = TestEnv::new();
    let runtime = RecordingRuntime::new(ImageStatus::Absent);

    cmd_start(&runtime, &env.config(), &options(&["blog.infinito.nexus"], false, &[])).unwrap();

    let calls = runtime.calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(
        calls[1],
        Call::Build {
            context: env.base_dir.clone(),
            tag: "test-image".into(),
        }
    );

    let (argv, _) = &runtime.run_calls()[0];
    assert!(argv.contains(&"blog.infinito.nexus".to_string()));
    assert!(!argv.contains(&"--ignore-network-blocks-from".to_string()));
}

#[test]
fn test_failed_build_stops_before_run() {
    let env = TestEnv::new();
    let mut runtime = RecordingRuntime::new(ImageStatus::Absent);
    runtime.build_code = 1;

    let err = cmd_start(&runtime, &env.config(), &options(&["example.org"], false, &[]))
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<CheckerError>(),
        Some(CheckerError::Provision { code: Some(1), .. })
    ));
    assert!(runtime.run_calls().is_empty());
}

#[test]
fn test_run_failure_carries_container_exit_code() {
    let env = TestEnv::new();
    let mut runtime = RecordingRuntime::new(ImageStatus::Present);
    runtime.run_code = 3;

    let err = cmd_start(&runtime, &env.config(), &options(&["example.org"], false, &[]))
        .unwrap_err();

    let checker_err = err.downcast_ref::<CheckerError>().unwrap();
    assert!(matches!(checker_err, CheckerError::Invocation { code: Some(3) }));
    assert_eq!(checker_err.exit_code(), 3);
}

#[test]
fn test_start_without_domains_still_runs() {
    let env = TestEnv::new();
    let runtime = RecordingRuntime::new(ImageStatus::Present);

    cmd_start(&runtime, &env.config(), &options(&[], false, &[])).unwrap();

    let (argv, _) = &runtime.run_calls()[0];
    assert_eq!(*argv, strings(&["docker", "run", "--rm", "test-image"]));
}

#[test]
fn test_env_file_fallback_when_configured() {
    let env = TestEnv::new().with_env_file();
    let mut config = env.config();
    config.env_file_policy = EnvFilePolicy::Fallback;
    let runtime = RecordingRuntime::new(ImageStatus::Present);

    cmd_start(&runtime, &config, &options(&[], false, &[])).unwrap();

    let env_file = env.base_dir.join(".env").to_string_lossy().into_owned();
    let (argv, _) = &runtime.run_calls()[0];
    assert_eq!(
        *argv,
        vec![
            "docker".to_string(),
            "run".to_string(),
            "--rm".to_string(),
            "--env-file".to_string(),
            env_file,
            "test-image".to_string(),
        ]
    );
}

#[test]
fn test_env_file_ignored_by_default() {
    let env = TestEnv::new().with_env_file();
    let runtime = RecordingRuntime::new(ImageStatus::Present);

    cmd_start(&runtime, &env.config(), &options(&[], false, &[])).unwrap();

    let (argv, _) = &runtime.run_calls()[0];
    assert!(!argv.contains(&"--env-file".to_string()));
}

#[test]
fn test_build_command_always_builds() {
    let env = TestEnv::new();
    let runtime = RecordingRuntime::new(ImageStatus::Present);

    cmd_build(&runtime, &env.config(), &ImageTag::default()).unwrap();

    assert_eq!(
        runtime.calls(),
        vec![Call::Build {
            context: env.base_dir.clone(),
            tag: "csp-checker:latest".into(),
        }]
    );
    assert_eq!(runtime.build_count(), 1);
}

#[test]
fn test_build_command_propagates_exit_code() {
    let env = TestEnv::new();
    let mut runtime = RecordingRuntime::new(ImageStatus::Absent);
    runtime.build_code = 17;

    let err = cmd_build(&runtime, &env.config(), &ImageTag::default()).unwrap_err();
    assert_eq!(err.downcast_ref::<CheckerError>().unwrap().exit_code(), 17);
}
