//! Unit tests for the `softwrap` CLI entrypoint module.

use super::{
    eager_pass, format_goto_output, format_view_output, lazy_pass, load_buffer, load_config,
    render, run_and_report, Settings,
};
use super::{Cli, Commands};
use clap::Parser;
use softwrap_core::{DocPosition, WrapConfig, WrapError, WrapSegment};
use std::io::Write;
use tempfile::NamedTempFile;

fn temp_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file
}

fn settings(width: usize, height: usize, json: bool) -> Settings {
    Settings {
        config: WrapConfig {
            min_wrap_width: 1,
            gutter_columns: 2,
            reserved_rows: 2,
        },
        width,
        height,
        json,
    }
}

#[test]
fn cli_defaults_match_terminal_fallbacks() {
    let cli = Cli::parse_from(["softwrap", "view", "notes.txt"]);
    assert_eq!(cli.width, 80);
    assert_eq!(cli.height, 30);
    assert!(!cli.json);
    assert!(cli.config.is_none());
    assert!(matches!(cli.command, Commands::View { offset: 0, .. }));
}

#[test]
fn global_flags_parse_after_subcommand() {
    let cli = Cli::parse_from([
        "softwrap", "goto", "notes.txt", "--row", "4", "--width", "40", "--json",
    ]);
    assert_eq!(cli.width, 40);
    assert!(cli.json);
    match cli.command {
        Commands::Goto {
            row,
            preferred_column,
            ..
        } => {
            assert_eq!(row, 4);
            assert_eq!(preferred_column, 0);
        }
        _ => panic!("expected goto command"),
    }
}

#[test]
fn view_output_pads_past_end_of_document() {
    let rows = vec![WrapSegment {
        text: "only".to_string(),
        source_line: 0,
        is_last: true,
    }];
    let output = format_view_output(&rows, 3, false).expect("format");
    assert_eq!(output, "only\n~\n~");

    let json = format_view_output(&rows, 3, true).expect("format");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(value[0]["text"], "only");
    assert_eq!(value[0]["is_last"], true);
}

#[test]
fn goto_output_reports_position() {
    let output = format_goto_output(3, DocPosition::new(2, 7), false).expect("format");
    assert_eq!(output, "row 3 -> 2:7");
}

#[test]
fn config_file_overrides_defaults() {
    let file = temp_file("min_wrap_width = 10\nreserved_rows = 0\n");
    let config = load_config(Some(file.path())).expect("load config");
    assert_eq!(config.min_wrap_width, 10);
    assert_eq!(config.gutter_columns, 2);
    assert_eq!(config.reserved_rows, 0);
}

#[test]
fn invalid_config_file_is_rejected() {
    let file = temp_file("min_wrap_width = 0\n");
    assert!(load_config(Some(file.path())).is_err());

    let file = temp_file("min_wrap_width = \"wide\"\n");
    let err = load_config(Some(file.path())).expect_err("bad type");
    assert!(format!("{:#}", err).contains("failed to parse config"));
}

#[test]
fn missing_file_error_names_the_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("absent.txt");
    let err = load_buffer(&path).expect_err("missing file");
    assert!(format!("{:#}", err).contains("absent.txt"));
}

#[test]
fn view_renders_requested_window() {
    let file = temp_file("hello world\na\nsupercalifragilisticexpialidocious\n");
    let command = Commands::View {
        file: file.path().to_path_buf(),
        offset: 8,
    };
    let output = render(&command, &settings(7, 6, false)).expect("render");
    assert_eq!(output, "lidoc\nious\n\n~");
}

#[test]
fn locate_and_goto_agree() {
    let file = temp_file("hello world\na\nsupercalifragilisticexpialidocious");
    let locate = Commands::Locate {
        file: file.path().to_path_buf(),
        line: 2,
        column: 12,
    };
    let output = render(&locate, &settings(7, 10, true)).expect("render");
    let value: serde_json::Value = serde_json::from_str(&output).expect("valid json");
    assert_eq!(value["location"]["wrapped_index"], 5);
    assert_eq!(value["location"]["visual_column"], 2);

    let goto = Commands::Goto {
        file: file.path().to_path_buf(),
        row: 5,
        preferred_column: 2,
    };
    let output = render(&goto, &settings(7, 10, false)).expect("render");
    assert_eq!(output, "row 5 -> 2:12");
}

#[test]
fn goto_past_end_is_an_error() {
    let file = temp_file("hello world\na");
    let goto = Commands::Goto {
        file: file.path().to_path_buf(),
        row: 3,
        preferred_column: 0,
    };
    let err = render(&goto, &settings(7, 10, false)).expect_err("out of range");
    assert_eq!(
        err.downcast_ref::<WrapError>(),
        Some(&WrapError::WrappedIndexOutOfRange { index: 3, total: 3 })
    );
}

#[test]
fn lazy_pass_wraps_only_the_viewport() {
    let text: String = (0..500).map(|i| format!("line number {}\n", i)).collect();
    let file = temp_file(&text);
    let buffer = load_buffer(file.path()).expect("load");

    let lazy = lazy_pass(&buffer, 78, 28);
    let eager = eager_pass(&buffer, 78);
    assert_eq!(lazy.lines_wrapped, 28);
    assert_eq!(lazy.rows, 28);
    assert_eq!(eager.lines_wrapped, 501);
    assert_eq!(eager.rows, 501);
}

#[test]
fn run_and_report_returns_zero_on_success() {
    let exit_code = run_and_report(|| Ok::<(), &str>(()));
    assert_eq!(exit_code, 0);
}

#[test]
fn run_and_report_returns_non_zero_on_failure() {
    let exit_code = run_and_report(|| Err::<(), &str>("boom"));
    assert_eq!(exit_code, 1);
}
