mod common;

use common::*;

#[test]
fn test_key_prep_appends_one_line_key_to_env() {
    let env = TestEnv::with_config("site_shortname: acme\n");
    env.write_project_file("env", "DEPLOY_TARGET=git@example.com:acme.git\n");
    env.write_project_file("keys/deploy", "-----BEGIN KEY-----\nabc\n-----END KEY-----\n");

    let result = env.run(&["key-prep", "keys/deploy"]);

    assert_exit_code!(result, 0);
    assert_eq!(
        env.read_project_file("env"),
        "DEPLOY_TARGET=git@example.com:acme.git\n\
         SSH_PRIVATE_KEY=-----BEGIN KEY-----\\nabc\\n-----END KEY-----\\n\n"
    );
    assert_output_contains!(result, "appended to the env file");
}

#[test]
fn test_key_prep_creates_env_file_when_missing() {
    let env = TestEnv::with_config("site_shortname: acme\n");
    env.write_project_file("id_rsa", "line1\r\nline2");

    let result = env.run(&["key-prep", "id_rsa"]);

    assert_exit_code!(result, 0);
    assert_eq!(env.read_project_file("env"), "SSH_PRIVATE_KEY=line1\\n\\nline2\n");
}

#[test]
fn test_missing_key_is_reported_without_failing() {
    let env = TestEnv::with_config("site_shortname: acme\n");

    let result = env.run(&["key-prep", "keys/missing"]);

    assert_exit_code!(result, 0);
    assert!(
        result.stderr.contains("Unable to read the key file"),
        "stderr:\n{}",
        result.stderr
    );
    assert!(!env.project_path("env").exists());
}
