//! Unit tests for token secret loading.

use super::*;
use mockable::MockEnv;
use rstest::rstest;
use std::collections::HashMap;
use std::io::Write;
use tempfile::NamedTempFile;

fn mock_env(vars: HashMap<&'static str, String>) -> MockEnv {
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |key| vars.get(key).cloned());
    env
}

fn secret_file(contents: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents).expect("write secret");
    file
}

fn path_of(file: &NamedTempFile) -> String {
    file.path().to_string_lossy().into_owned()
}

fn missing_path() -> String {
    std::env::temp_dir()
        .join(format!("token-secret-{}", uuid::Uuid::new_v4()))
        .to_string_lossy()
        .into_owned()
}

#[rstest]
#[case(BuildMode::Debug)]
#[case(BuildMode::Release)]
fn inline_secret_wins_over_file(#[case] mode: BuildMode) {
    let file = secret_file(&[b'f'; 48]);
    let env = mock_env(HashMap::from([
        (SECRET_ENV, "i".repeat(40)),
        (SECRET_FILE_ENV, path_of(&file)),
    ]));

    let settings = token_settings_from_env(&env, mode).expect("inline secret accepted");
    assert_eq!(settings.source(), &SecretSource::Inline);
    assert_eq!(settings.secret(), "i".repeat(40).as_bytes());
}

#[rstest]
fn file_secret_drops_trailing_newline() {
    let mut contents = vec![b'k'; 40];
    contents.extend_from_slice(b"\n");
    let file = secret_file(&contents);
    let env = mock_env(HashMap::from([(SECRET_FILE_ENV, path_of(&file))]));

    let settings = token_settings_from_env(&env, BuildMode::Release).expect("file secret");
    assert_eq!(settings.secret(), &[b'k'; 40][..]);
    assert!(matches!(settings.source(), SecretSource::File(_)));
}

#[rstest]
fn release_rejects_short_secret() {
    let env = mock_env(HashMap::from([(SECRET_ENV, "short".to_owned())]));
    let Err(err) = token_settings_from_env(&env, BuildMode::Release) else {
        panic!("short secret must fail in release");
    };
    assert!(matches!(
        err,
        TokenConfigError::SecretTooShort {
            length: 5,
            min_len: TOKEN_SECRET_MIN_LEN
        }
    ));
}

#[rstest]
fn debug_accepts_short_secret() {
    let env = mock_env(HashMap::from([(SECRET_ENV, "short".to_owned())]));
    let settings = token_settings_from_env(&env, BuildMode::Debug).expect("debug tolerates");
    assert_eq!(settings.secret(), b"short");
}

#[rstest]
fn release_without_secret_fails() {
    let env = mock_env(HashMap::from([(SECRET_FILE_ENV, missing_path())]));
    let Err(err) = token_settings_from_env(&env, BuildMode::Release) else {
        panic!("missing secret must fail in release");
    };
    assert!(matches!(err, TokenConfigError::SecretRead { .. }));
}

#[rstest]
#[case(BuildMode::Debug, None)]
#[case(BuildMode::Release, Some("1"))]
fn missing_secret_falls_back_to_ephemeral(#[case] mode: BuildMode, #[case] allow: Option<&str>) {
    let mut vars = HashMap::from([(SECRET_FILE_ENV, missing_path())]);
    if let Some(flag) = allow {
        vars.insert(ALLOW_EPHEMERAL_ENV, flag.to_owned());
    }
    let env = mock_env(vars);

    let first = token_settings_from_env(&env, mode).expect("ephemeral secret");
    let second = token_settings_from_env(&env, mode).expect("ephemeral secret");
    assert_eq!(first.source(), &SecretSource::Ephemeral);
    assert_eq!(first.secret().len(), EPHEMERAL_SECRET_LEN);
    assert_ne!(first.fingerprint(), second.fingerprint());
}

#[rstest]
fn release_rejects_unparseable_ephemeral_flag() {
    let env = mock_env(HashMap::from([
        (ALLOW_EPHEMERAL_ENV, "maybe".to_owned()),
        (SECRET_ENV, "s".repeat(32)),
    ]));
    let Err(err) = token_settings_from_env(&env, BuildMode::Release) else {
        panic!("invalid flag must fail in release");
    };
    assert!(matches!(
        err,
        TokenConfigError::InvalidEnv {
            name: ALLOW_EPHEMERAL_ENV,
            ..
        }
    ));
}

#[rstest]
#[case("1", Some(true))]
#[case("YES", Some(true))]
#[case("n", Some(false))]
#[case("", None)]
fn bool_parsing(#[case] raw: &str, #[case] expected: Option<bool>) {
    assert_eq!(parse_bool(raw), expected);
}
