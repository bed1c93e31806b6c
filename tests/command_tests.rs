use std::io::Write;
use tempfile::NamedTempFile;
use vmstat_tree::commands::{
    execute_function, execute_report, execute_top, execute_tree, validate_limit, FunctionArgs,
    FunctionTarget, ReportArgs, TopArgs, TreeArgs,
};
use vmstat_tree::output::{read_report, read_tree};

fn dataset_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(
        br#"{
            "addresses": {
                "1": "py:<module>:1:app.py",
                "2": "py:load:5:app.py",
                "3": "py:parse:9:app.py"
            },
            "meta": { "argv": "app.py" },
            "profiles": [
                { "frames": [1, 2, 3] },
                { "frames": [1, 2] },
                { "frames": [1, 3] }
            ]
        }"#,
    )
    .unwrap();
    file
}

#[test]
fn test_validate_limit() {
    assert!(validate_limit(1).is_ok());
    assert!(validate_limit(0).is_err());
    assert!(validate_limit(2000).is_err());
}

#[test]
fn test_execute_top() {
    let input = dataset_file();
    let args = TopArgs {
        input: input.path().to_path_buf(),
        ..Default::default()
    };

    assert!(execute_top(&args).is_ok());
}

#[test]
fn test_execute_tree_with_threshold() {
    let input = dataset_file();
    let out_dir = tempfile::tempdir().unwrap();
    let output = out_dir.path().join("tree.json");

    let args = TreeArgs {
        input: input.path().to_path_buf(),
        output: Some(output.clone()),
        threshold: Some(2),
        ..Default::default()
    };
    execute_tree(&args).unwrap();

    let tree = read_tree(&output).unwrap();
    assert_eq!(tree.name(), "py:<module>:1:app.py");
    assert_eq!(tree.count(), 3);
    assert_eq!(tree.children().len(), 1);
    assert_eq!(tree.children()[0].name(), "py:load:5:app.py");
}

#[test]
fn test_execute_function_by_name() {
    let input = dataset_file();
    let args = FunctionArgs {
        input: input.path().to_path_buf(),
        target: FunctionTarget::Name("load".to_string()),
        ..Default::default()
    };

    assert!(execute_function(&args).is_ok());
}

#[test]
fn test_execute_function_unknown_name() {
    let input = dataset_file();
    let args = FunctionArgs {
        input: input.path().to_path_buf(),
        target: FunctionTarget::Name("missing".to_string()),
        ..Default::default()
    };

    assert!(execute_function(&args).is_err());
}

#[test]
fn test_execute_report() {
    let input = dataset_file();
    let out_dir = tempfile::tempdir().unwrap();
    let output = out_dir.path().join("report.json");

    let args = ReportArgs {
        input: input.path().to_path_buf(),
        output: output.clone(),
        limit: 2,
        function: Some(FunctionTarget::Addr(2)),
    };
    execute_report(&args).unwrap();

    let report = read_report(&output).unwrap();
    assert_eq!(report.argv, "app.py");
    assert_eq!(report.profile_count, 3);
    assert_eq!(report.top_functions.len(), 2);
    assert_eq!(report.top_functions[0].count, 3);

    let function = report.function.unwrap();
    assert_eq!(function.total, 2);
    assert_eq!(function.callees.len(), 1);
    assert_eq!(function.callees[0].name, "py:parse:9:app.py");
}

#[test]
fn test_execute_report_function_by_name() {
    let input = dataset_file();
    let out_dir = tempfile::tempdir().unwrap();
    let output = out_dir.path().join("report.json");

    let args = ReportArgs {
        input: input.path().to_path_buf(),
        output: output.clone(),
        limit: 5,
        function: Some(FunctionTarget::Name("load".to_string())),
    };
    execute_report(&args).unwrap();

    let function = read_report(&output).unwrap().function.unwrap();
    assert_eq!(function.addr, "2");
    assert_eq!(function.name, "py:load:5:app.py");
    assert_eq!(function.total, 2);
}
