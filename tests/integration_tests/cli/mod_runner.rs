use docfilter::FilterError;
use docfilter::cli::{Command, OutputMode, run};
use docfilter::config::ClientConfig;

fn run_to_string(cmd: Command, mode: OutputMode) -> Result<String, FilterError> {
    let mut buf = Vec::new();
    run(cmd, mode, &mut buf)?;
    Ok(String::from_utf8(buf).unwrap())
}

#[test]
fn compile_json_output() {
    let json = r#"{"condition":{"parameter":"name","compare":"Contains","value":"bo"}}"#;
    let s = run_to_string(Command::Compile { filter_json: json.into() }, OutputMode::Json).unwrap();
    let v: serde_json::Value = serde_json::from_str(s.trim()).unwrap();
    assert_eq!(v["filter"], r#"{ "name" : { $regex: /.*bo.*/, $options: 'im' } }"#);
}

#[test]
fn update_json_output() {
    let json = r#"{"filterId":"u1","fieldValues":[{"field":"age","value":30}]}"#;
    let s = run_to_string(Command::Update { update_json: json.into() }, OutputMode::Json).unwrap();
    let v: serde_json::Value = serde_json::from_str(s.trim()).unwrap();
    assert_eq!(v["filter"], r#"{ "_id" : { $eq: "u1" } }"#);
    assert_eq!(v["update"], serde_json::json!({"$set": {"age": 30}}));
}

#[test]
fn sort_plain_output() {
    let s = run_to_string(
        Command::Sort { fields: vec!["created:desc".into(), "name".into()] },
        OutputMode::Plain,
    )
    .unwrap();
    assert_eq!(s.trim(), r#"{"created":-1,"name":1}"#);
}

#[test]
fn bad_sort_spec_is_rejected() {
    let r = run_to_string(Command::Sort { fields: vec!["a:up".into()] }, OutputMode::Plain);
    assert!(matches!(r, Err(FilterError::Structural(_))));
}

#[test]
fn show_config_round_trips_through_toml() {
    let config = ClientConfig {
        database_name: Some("app".into()),
        default_page_size: Some(25),
        ..ClientConfig::default()
    };
    let s = run_to_string(Command::ShowConfig { config: config.clone() }, OutputMode::Plain).unwrap();
    assert_eq!(ClientConfig::from_toml_str(&s).unwrap(), config);
    let s = run_to_string(Command::ShowConfig { config }, OutputMode::Json).unwrap();
    assert!(s.contains("\"database_name\":\"app\""));
}

#[test]
fn empty_update_is_reported() {
    let r = run_to_string(Command::Update { update_json: "{}".into() }, OutputMode::Plain);
    assert!(matches!(r, Err(FilterError::EmptyUpdate)));
}
