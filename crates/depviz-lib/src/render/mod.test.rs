use super::*;
use tempfile::TempDir;

#[test]
fn test_write_creates_parent_directories() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("reports").join("nested").join("deps.txt");

    ReportWriter::new(&path).write("A\n└── B").unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, "A\n└── B\n");
}

#[test]
fn test_write_overwrites_existing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.puml");

    let writer = ReportWriter::new(&path);
    writer.write("first\n").unwrap();
    writer.write("second\n").unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "second\n");
}

#[test]
fn test_write_into_file_path_fails() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "x").unwrap();

    let err = ReportWriter::new(blocker.join("out.txt"))
        .write("report")
        .unwrap_err();
    assert!(matches!(err, RenderError::CreateDir { .. }));
}
