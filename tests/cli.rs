use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn source_file(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".santa")
        .tempfile()
        .expect("create temp fixture");
    write!(file, "{contents}").expect("write fixture");
    file
}

fn elf() -> Command {
    Command::cargo_bin("elf").expect("built binary")
}

#[test]
fn run_prints_final_value_and_puts_output() {
    let file = source_file("let mut y = 10; y = 20; puts(y)");
    elf()
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("20 \n"))
        .stdout(predicate::str::ends_with("nil\n"));
}

#[test]
fn run_recursive_factorial() {
    let file = source_file("let f = |n| if n <= 1 { 1 } else { n * f(n - 1) }; f(5)");
    elf().arg(file.path()).assert().success().stdout("120\n");
}

#[test]
fn run_threading_then_filter() {
    let file = source_file("[1,2,3,4,5] |> map(|x| x * 2) |> filter(|x| x > 5)");
    elf()
        .arg(file.path())
        .assert()
        .success()
        .stdout("[6, 8, 10]\n");
}

#[test]
fn run_composition_applies_left_to_right() {
    let file = source_file(
        "let add = |x,y| x + y; let double = |x| x * 2; (add(1) >> double)(5)",
    );
    elf().arg(file.path()).assert().success().stdout("12\n");
}

#[test]
fn run_dictionary_merge_is_right_biased() {
    let file = source_file(r#"#{"a": 1} + #{"a": 2, "b": 3}"#);
    elf()
        .arg(file.path())
        .assert()
        .success()
        .stdout("#{\"a\": 2, \"b\": 3}\n");
}

#[test]
fn run_set_literal_sorts_and_dedups() {
    let file = source_file("{3,1,2,2}");
    elf().arg(file.path()).assert().success().stdout("{1, 2, 3}\n");
}

#[test]
fn run_negative_string_repeat_is_a_runtime_error() {
    let file = source_file(r#""a" * -1"#);
    elf()
        .arg(file.path())
        .assert()
        .failure()
        .stdout("[Error] Unsupported operation: String * Integer (< 0)\n");
}

#[test]
fn run_assignment_to_immutable_binding_is_a_runtime_error() {
    let file = source_file("let x = 1; x = 2");
    elf()
        .arg(file.path())
        .assert()
        .failure()
        .stdout("[Error] Variable 'x' is not mutable\n");
}

#[test]
fn tokens_mode_prints_one_json_object_per_line() {
    let file = source_file("let x = 1;");
    elf()
        .arg("tokens")
        .arg(file.path())
        .assert()
        .success()
        .stdout(
            "{\"type\":\"LET\",\"value\":\"let\"}\n\
             {\"type\":\"ID\",\"value\":\"x\"}\n\
             {\"type\":\"=\",\"value\":\"=\"}\n\
             {\"type\":\"INT\",\"value\":\"1\"}\n\
             {\"type\":\";\",\"value\":\";\"}\n",
        );
}

#[test]
fn ast_mode_prints_pretty_json_with_sorted_keys() {
    let file = source_file("1");
    let output = elf()
        .arg("ast")
        .arg(file.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(output).unwrap();
    assert!(text.starts_with("{\n"));
    // `statements` sorts before `type` lexicographically within the
    // top-level Program object.
    assert!(text.find("\"statements\"").unwrap() < text.find("\"type\"").unwrap());
}

#[test]
fn ast_mode_wraps_expression_statements_and_comments() {
    let file = source_file("// greeting\nlet x = 1;");
    let output = elf()
        .arg("ast")
        .arg(file.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "type": "Program",
            "statements": [
                { "type": "Comment", "value": "// greeting" },
                {
                    "type": "Expression",
                    "value": {
                        "type": "Let",
                        "name": { "type": "Identifier", "name": "x" },
                        "value": { "type": "Integer", "value": "1" },
                    },
                },
            ],
        })
    );
}
