//! Commands arriving as serialized data, the way a bus transport feeds them.

use dbd::{Command, Dbd, Error, Output};
use tempfile::TempDir;

use crate::common::{layout_config, write_layout};

fn open() -> (TempDir, Dbd) {
    let dir = TempDir::new().unwrap();
    write_layout(dir.path(), "{}");
    let db = Dbd::open(layout_config(dir.path(), 64)).unwrap();
    (dir, db)
}

#[test]
fn json_commands_execute() {
    let (_dir, db) = open();
    let incoming = [
        r#"{"Write":{"path":"/settings/net/ip","value":"10.0.0.2"}}"#,
        r#"{"Read":{"path":"/settings/net/ip"}}"#,
        r#"{"Exists":{"path":"/settings/net/mask"}}"#,
        r#""Ping""#,
    ];
    let cmds: Vec<Command> = incoming
        .iter()
        .map(|raw| serde_json::from_str(raw).unwrap())
        .collect();

    let results = db.executor().execute_many(cmds);
    assert_eq!(results[0], Ok(Output::Unit));
    assert_eq!(results[1], Ok(Output::Value("10.0.0.2".into())));
    assert_eq!(results[2], Ok(Output::Bool(false)));
    assert!(matches!(results[3], Ok(Output::Pong { .. })));
}

#[test]
fn method_calls_execute() {
    let (_dir, db) = open();
    let call = |method: &str, args: &[&str]| {
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        Command::from_method(method, &args).and_then(|cmd| db.executor().execute(cmd))
    };

    assert_eq!(call("write", &["/hostname", "vm1"]), Ok(Output::Unit));
    assert_eq!(
        call("list", &["/"]),
        Ok(Output::Keys(vec![
            "hostname".into(),
            "settings".into(),
            "vms".into()
        ]))
    );
    assert_eq!(
        call("dump", &["/settings"]),
        Ok(Output::Json(r#"{"net":{"ip":"10.0.0.1"}}"#.into()))
    );
    assert!(matches!(call("frobnicate", &[]), Err(Error::Transport { .. })));
    assert!(matches!(call("read", &[]), Err(Error::Transport { .. })));
}

#[test]
fn errors_serialize_for_the_reply() {
    let (_dir, db) = open();
    let err = db
        .executor()
        .execute(Command::Read {
            path: "/".into(),
        })
        .unwrap_err();

    let reply = serde_json::to_value(&err).unwrap();
    let back: Error = serde_json::from_value(reply).unwrap();
    assert_eq!(back, err);
    assert!(back.is_invalid_path());
}
