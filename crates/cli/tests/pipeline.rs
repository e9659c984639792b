use docsum_core::config::AppConfig;
use std::fs;
use std::io::Write;
use storage::{OutputStore, SearchFilter};
use tempfile::tempdir;

fn write_docx(path: &std::path::Path, paragraphs: &[&str]) {
    let body: String = paragraphs
        .iter()
        .map(|p| format!("<w:p><w:r><w:t>{p}</w:t></w:r></w:p>"))
        .collect();
    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
    );
    let file = fs::File::create(path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    zip.start_file("word/document.xml", zip::write::FileOptions::default())
        .unwrap();
    zip.write_all(xml.as_bytes()).unwrap();
    zip.finish().unwrap();
}

#[test]
fn test_full_pipeline() {
    // 1. Setup input documents
    let temp = tempdir().unwrap();
    let src_dir = temp.path().join("inbox");
    let out_dir = temp.path().join("output");
    fs::create_dir_all(src_dir.join("nested")).unwrap();

    fs::write(
        src_dir.join("invoice.txt"),
        "Invoice INR 4,500 due by 2025-09-28. Please submit payment.",
    )
    .unwrap();
    // Identical bytes under another name.
    fs::write(
        src_dir.join("nested/invoice-copy.txt"),
        "Invoice INR 4,500 due by 2025-09-28. Please submit payment.",
    )
    .unwrap();
    fs::write(src_dir.join("empty.txt"), "").unwrap();
    fs::write(src_dir.join("broken.pdf"), b"%PDF-1.7 garbage").unwrap();
    fs::write(src_dir.join("photo.jpg"), b"not a document").unwrap();
    write_docx(
        &src_dir.join("circular.docx"),
        &[
            "Safety circular for all depot staff.",
            "Near miss reports must be filed within 24 hours.",
        ],
    );

    // 2. Run the batch
    let mut cfg = AppConfig::default();
    cfg.output.per_file_json = true;
    let summary = cli::batch::process_inputs(&cfg, &[src_dir.clone()], &out_dir).unwrap();

    assert_eq!(summary.discovered, 5, "jpg is not a supported extension");
    assert_eq!(summary.processed, 3);
    assert_eq!(summary.not_processed, 2, "empty txt and unreadable pdf");
    assert_eq!(summary.failed, 0);

    // 3. Verify persisted output
    let store = OutputStore::open(&out_dir).unwrap();
    let rows = store.read_log().unwrap();
    assert_eq!(rows.len(), 3);

    let original = rows.iter().find(|r| r.file_name == "invoice.txt").unwrap();
    let copy = rows
        .iter()
        .find(|r| r.file_name == "invoice-copy.txt")
        .unwrap();
    assert_eq!(original.content_hash, copy.content_hash);
    assert_eq!(original.detected_amounts, vec!["INR 4,500"]);
    assert!(original.tags.contains(&"Procurement/Finance".to_string()));

    let circular = rows.iter().find(|r| r.file_name == "circular.docx").unwrap();
    assert!(circular.tags.contains(&"Safety".to_string()));
    assert_eq!(
        circular.action_items,
        vec!["Near miss reports must be filed within 24 hours."]
    );
    assert_eq!(circular.title, "Safety circular for all depot staff.");

    assert!(out_dir.join("route_Procurement_Finance.jsonl").exists());
    assert!(out_dir.join("circular.docx.json").exists());

    let found = store
        .search(&SearchFilter {
            tag: Some("Safety".to_string()),
            ..SearchFilter::default()
        })
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(
        store.find_by_hash(&circular.content_hash).unwrap().as_ref(),
        Some(circular)
    );
}

#[test]
fn empty_input_directory_is_an_error() {
    let temp = tempdir().unwrap();
    let src_dir = temp.path().join("inbox");
    fs::create_dir_all(&src_dir).unwrap();
    fs::write(src_dir.join("notes.md"), "# not supported").unwrap();

    let cfg = AppConfig::default();
    let err = cli::batch::process_inputs(&cfg, &[src_dir], &temp.path().join("out")).unwrap_err();
    assert!(err.to_string().contains("no supported documents"));
}

#[test]
fn custom_tables_file_changes_tags() {
    let temp = tempdir().unwrap();
    let src_dir = temp.path().join("inbox");
    fs::create_dir_all(&src_dir).unwrap();
    fs::write(src_dir.join("weather.txt"), "Heavy monsoon rain expected tomorrow.").unwrap();
    let tables = temp.path().join("tables.toml");
    fs::write(
        &tables,
        "[[tags]]\nlabel = \"Weather\"\nkeywords = [\"monsoon\"]\n",
    )
    .unwrap();

    let mut cfg = AppConfig::default();
    cfg.tables.path = Some(tables.to_string_lossy().into_owned());
    let out_dir = temp.path().join("out");
    cli::batch::process_inputs(&cfg, &[src_dir], &out_dir).unwrap();

    let rows = OutputStore::open(&out_dir).unwrap().read_log().unwrap();
    assert_eq!(rows[0].tags, vec!["Weather"]);
}
