use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use yml2props::{
    from_str, Charset, ConvertOptions, Converter, Error, IncludePatterns, PropertiesMap,
};

fn write_file(root: &Path, relative: &str, charset: Charset, lines: &[&str]) -> PathBuf {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let mut text = lines.join("\n");
    text.push('\n');
    fs::write(&path, charset.encode(&text)).unwrap();
    path.parent().unwrap().to_path_buf()
}

fn load_properties(directory: &Path, name: &str, charset: Charset) -> std::io::Result<PropertiesMap> {
    let bytes = fs::read(directory.join(name))?;
    Ok(from_str(&charset.decode(&bytes)).unwrap())
}

fn options(root: &Path) -> ConvertOptions {
    ConvertOptions::new(root).with_includes(IncludePatterns::parse("**/*.yml,**/*.yaml").unwrap())
}

#[test]
fn test_convert_basic() {
    let temp = TempDir::new().unwrap();
    let directory = write_file(temp.path(), "foo/bar.yml", Charset::Utf8, &["foo:", "  bar: 42"]);

    let report = Converter::new(options(temp.path())).run().unwrap();
    assert!(report.is_success());

    let properties = load_properties(&directory, "bar.properties", Charset::Utf8).unwrap();
    assert_eq!(properties.len(), 1);
    assert_eq!(properties.get("foo.bar"), Some("42"));
    assert!(!directory.join("bar.yml").exists());
}

#[test]
fn test_convert_complex_structure() {
    let temp = TempDir::new().unwrap();
    let directory = write_file(
        temp.path(),
        "foo/bar.yml",
        Charset::Utf8,
        &[
            "root:",
            "  foo:",
            "    bar: 42",
            "    items:",
            "      - prop1: 'value0.1'",
            "        prop2: 'value0.2'",
            "      - prop1: 'value1.1'",
            "        prop2: 'value1.2'",
        ],
    );

    Converter::new(options(temp.path())).run().unwrap();

    let properties = load_properties(&directory, "bar.properties", Charset::Utf8).unwrap();
    assert_eq!(properties.len(), 5);
    assert_eq!(properties.get("root.foo.bar"), Some("42"));
    assert_eq!(properties.get("root.foo.items[0].prop1"), Some("value0.1"));
    assert_eq!(properties.get("root.foo.items[0].prop2"), Some("value0.2"));
    assert_eq!(properties.get("root.foo.items[1].prop1"), Some("value1.1"));
    assert_eq!(properties.get("root.foo.items[1].prop2"), Some("value1.2"));
}

#[test]
fn test_convert_duplicate_sequence_values() {
    let temp = TempDir::new().unwrap();
    let directory = write_file(
        temp.path(),
        "app.yml",
        Charset::Utf8,
        &["items:", "  - a", "  - a", "  - b", "  - a"],
    );

    Converter::new(options(temp.path())).run().unwrap();

    let text = fs::read_to_string(directory.join("app.properties")).unwrap();
    assert_eq!(text, "items[0]=a\nitems[1]=a\nitems[2]=b\nitems[3]=a\n");
}

#[test]
fn test_convert_only_included() {
    let temp = TempDir::new().unwrap();
    let included = write_file(
        temp.path(),
        "included/foo/bar.yml",
        Charset::Utf8,
        &["included:", "  foo:", "    bar: 42"],
    );
    let another_included = write_file(
        temp.path(),
        "included/another/bar.yml",
        Charset::Utf8,
        &["included:", "  another:", "    bar: 42"],
    );
    let excluded = write_file(
        temp.path(),
        "excluded/foo/bar.yml",
        Charset::Utf8,
        &["excluded:", "  foo:", "    bar: 42"],
    );

    let options = ConvertOptions::new(temp.path())
        .with_includes(IncludePatterns::parse("included/**/*.yml").unwrap());
    let report = Converter::new(options).run().unwrap();
    assert_eq!(report.converted.len(), 2);

    assert_eq!(load_properties(&included, "bar.properties", Charset::Utf8).unwrap().len(), 1);
    assert_eq!(
        load_properties(&another_included, "bar.properties", Charset::Utf8)
            .unwrap()
            .len(),
        1
    );

    let missing = load_properties(&excluded, "bar.properties", Charset::Utf8).unwrap_err();
    assert_eq!(missing.kind(), std::io::ErrorKind::NotFound);
    assert!(excluded.join("bar.yml").exists());
}

#[test]
fn test_convert_with_charset_support() {
    let temp = TempDir::new().unwrap();
    let directory = write_file(
        temp.path(),
        "foo/bar.yml",
        Charset::Iso8859_1,
        &["foo:", "  bar: caractères accentués"],
    );

    // Default, and wrong, input charset; keep the source for a second run.
    let wrong = options(temp.path()).with_delete_original(false);
    let report = Converter::new(wrong).run().unwrap();
    assert!(report.is_success());
    let corrupted = load_properties(&directory, "bar.properties", Charset::Utf8).unwrap();
    assert_ne!(corrupted.get("foo.bar"), Some("caractères accentués"));
    assert!(corrupted.get("foo.bar").unwrap().contains('\u{FFFD}'));
    assert!(directory.join("bar.yml").exists());

    let right = options(temp.path())
        .with_input_charset(Charset::Iso8859_1)
        .with_output_charset(Charset::Iso8859_1);
    Converter::new(right).run().unwrap();
    let properties = load_properties(&directory, "bar.properties", Charset::Iso8859_1).unwrap();
    assert_eq!(properties.get("foo.bar"), Some("caractères accentués"));
    assert!(!directory.join("bar.yml").exists());

    // Latin-1 bytes on disk, not UTF-8.
    let bytes = fs::read(directory.join("bar.properties")).unwrap();
    assert!(bytes.contains(&0xE8));
}

#[test]
fn test_ascii_output_escapes_instead_of_losing_characters() {
    let temp = TempDir::new().unwrap();
    let directory = write_file(temp.path(), "app.yml", Charset::Utf8, &["price: 5 €", "name: Zoë"]);

    let options = options(temp.path()).with_output_charset(Charset::UsAscii);
    Converter::new(options).run().unwrap();

    let bytes = fs::read(directory.join("app.properties")).unwrap();
    assert!(bytes.is_ascii());
    let properties = load_properties(&directory, "app.properties", Charset::UsAscii).unwrap();
    assert_eq!(properties.get("price"), Some("5 €"));
    assert_eq!(properties.get("name"), Some("Zoë"));
}

#[test]
fn test_yaml_extension_and_empty_file() {
    let temp = TempDir::new().unwrap();
    let directory = write_file(temp.path(), "conf/empty.yaml", Charset::Utf8, &["# nothing here"]);

    let report = Converter::new(options(temp.path())).run().unwrap();
    assert_eq!(report.converted.len(), 1);
    assert_eq!(report.converted[0].entries, 0);
    assert_eq!(fs::read_to_string(directory.join("empty.properties")).unwrap(), "");
}

#[test]
fn test_failures_do_not_stop_the_batch() {
    let temp = TempDir::new().unwrap();
    let bad = write_file(temp.path(), "a/bad.yml", Charset::Utf8, &["key: [unclosed"]);
    let complex = write_file(temp.path(), "b/complex.yml", Charset::Utf8, &["? [x, y]", ": v"]);
    let good = write_file(temp.path(), "c/good.yml", Charset::Utf8, &["ok: 1"]);

    let report = Converter::new(options(temp.path())).run().unwrap();
    assert_eq!(report.converted.len(), 1);
    assert_eq!(report.failed.len(), 2);

    assert!(bad.join("bad.yml").exists());
    assert!(!bad.join("bad.properties").exists());
    assert!(complex.join("complex.yml").exists());
    assert!(good.join("good.properties").exists());

    let err = report.into_result().unwrap_err();
    assert!(matches!(err, Error::BatchFailed { failed: 2, total: 3 }));
}

#[test]
fn test_missing_input_directory() {
    let temp = TempDir::new().unwrap();
    let result = Converter::new(options(&temp.path().join("nope"))).run();
    assert!(matches!(result, Err(Error::Io(_))));
}
