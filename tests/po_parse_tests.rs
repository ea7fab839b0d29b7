use indoc::indoc;
use pocodec::traits::Parser;
use pocodec::{Catalog, CatalogEntry, Codec, Error, Gender, ReadOptions};
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;

const FRENCH: &str = indoc! {r#"
    # French translation of demo.
    # Copyright (C) 2024 Demo Authors
    #
    msgid ""
    msgstr ""
    "Project-Id-Version: demo 1.0\n"
    "Report-Msgid-Bugs-To: bugs@example.com\n"
    "POT-Creation-Date: 2024-01-01 12:00+0000\n"
    "Language: fr\n"
    "MIME-Version: 1.0\n"
    "Content-Type: text/plain; charset=UTF-8\n"
    "Content-Transfer-Encoding: 8bit\n"
    "Plural-Forms: nplurals=2; plural=(n > 1);\n"

    #. Shown on the start screen
    #: src/app.rs:10
    msgid "Hello"
    msgstr "Bonjour"

    #: src/files.rs:22 src/files.rs:40
    #, c-format
    msgid "%d file"
    msgid_plural "%d files"
    msgstr[0] "%d fichier"
    msgstr[1] "%d fichiers"

    msgctxt "gender-feminine"
    msgid "Welcome"
    msgstr "Bienvenue"

    # Needs review
    #, fuzzy
    msgid ""
    "A long message "
    "split over lines"
    msgstr ""
    "Un long message "
    "sur plusieurs lignes"

    #~ msgid "Obsolete"
    #~ msgstr "Obsolète"
"#};

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

fn read_entries(paths: &[&PathBuf]) -> Result<Vec<CatalogEntry>, Error> {
    let mut codec = Codec::new();
    for path in paths {
        codec.add_path(path)?;
    }
    codec.parse().collect()
}

#[test]
fn test_header_then_message_yields_two_entries() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "fr.po",
        indoc! {r#"
            msgid ""
            msgstr ""
            "Project-Id-Version: demo 1.0\n"
            "Language: fr\n"
            "Content-Type: text/plain; charset=UTF-8\n"

            msgid "Hello"
            msgstr "Bonjour"
        "#},
    );

    let entries = read_entries(&[&path]).unwrap();
    assert_eq!(entries.len(), 2);

    let metadata = entries[0].as_metadata().expect("first entry is the header");
    assert_eq!(metadata.get("Project-Id-Version"), Some("demo 1.0"));
    assert_eq!(metadata.language(), Some("fr"));
    assert_eq!(metadata.get("content-type"), Some("text/plain; charset=UTF-8"));

    let string = entries[1].as_localized_string().expect("second entry is a string");
    assert_eq!(string.untranslated_singular_value.as_deref(), Some("Hello"));
    assert_eq!(string.translations(), vec!["Bonjour"]);
}

#[test]
fn test_full_catalog() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "fr.po", FRENCH);
    let mut codec = Codec::new();
    codec.add_path(&path).unwrap();
    let catalog = codec.read_catalog().unwrap();

    let metadata = catalog.metadata.as_ref().unwrap();
    assert_eq!(metadata.len(), 8);
    assert_eq!(metadata.plural_count(), Some(2));
    assert_eq!(metadata.language_identifier().unwrap().language.as_str(), "fr");

    // Hello, plural, welcome, multi-line and the trailing obsolete block.
    assert_eq!(catalog.strings.len(), 5);

    let hello = catalog.find_string("Hello").unwrap();
    assert_eq!(hello.developer_comments.as_deref(), Some("Shown on the start screen"));
    assert_eq!(hello.references, Some(vec!["src/app.rs:10".to_string()]));

    let files = catalog.find_string("%d file").unwrap();
    assert!(files.is_plural());
    assert_eq!(files.untranslated_plural_value.as_deref(), Some("%d files"));
    assert_eq!(files.translations(), vec!["%d fichier", "%d fichiers"]);
    assert_eq!(files.string_format_hint.as_deref(), Some("c-format"));
    assert_eq!(files.references.as_ref().map(Vec::len), Some(2));

    let welcome = catalog.find_string("Welcome").unwrap();
    assert_eq!(welcome.gender, Some(Gender::Feminine));
    assert_eq!(welcome.context, None);

    let long = catalog.find_string("A long message split over lines").unwrap();
    assert_eq!(long.translations(), vec!["Un long message sur plusieurs lignes"]);
    assert_eq!(long.translator_comments.as_deref(), Some("Needs review"));
    assert!(long.is_fuzzy());

    let obsolete = &catalog.strings[4];
    assert_eq!(obsolete.untranslated_singular_value, None);
    assert_eq!(obsolete.translated_values, None);
}

#[test]
fn test_concatenated_literals_on_one_line() {
    let catalog = Catalog::from_str("msgid \"foo\" \"bar\"\nmsgstr \"\"\n").unwrap();
    assert_eq!(
        catalog.strings[0].untranslated_singular_value.as_deref(),
        Some("foobar")
    );
}

#[test]
fn test_out_of_order_plural_indices() {
    let catalog = Catalog::from_str(indoc! {r#"
        msgid "day"
        msgid_plural "days"
        msgstr[2] "dni"
        msgstr[0] "dzień"
    "#})
    .unwrap();
    let values = catalog.strings[0].translated_values.as_ref().unwrap();
    assert_eq!(values.keys().copied().collect::<Vec<_>>(), vec![0, 2]);
    assert_eq!(catalog.strings[0].translations(), vec!["dzie\u{144}", "dni"]);
}

#[test]
fn test_gender_contexts() {
    let catalog = Catalog::from_str(indoc! {r#"
        msgctxt "Gender-Masculine"
        msgid "tired"
        msgstr "fatigué"

        msgctxt "menu item, masculine form"
        msgid "new"
        msgstr "nouveau"
    "#})
    .unwrap();

    assert_eq!(catalog.strings[0].gender, Some(Gender::Masculine));
    assert_eq!(catalog.strings[0].context, None);
    assert_eq!(catalog.strings[1].gender, Some(Gender::Masculine));
    assert_eq!(
        catalog.strings[1].context.as_deref(),
        Some("menu item, masculine form")
    );
}

#[test]
fn test_header_without_colon_line_is_a_message() {
    let catalog = Catalog::from_str(indoc! {r#"
        msgid ""
        msgstr ""
        "Project-Id-Version: demo\n"
        "Language: fr\n"
        "Content-Type: text/plain\n"
        "not a header line\n"
    "#})
    .unwrap();
    assert!(catalog.metadata.is_none());
    assert_eq!(catalog.strings.len(), 1);
    assert_eq!(
        catalog.strings[0].untranslated_singular_value.as_deref(),
        Some("")
    );
}

#[test]
fn test_header_recognized_only_in_first_file() {
    let dir = TempDir::new().unwrap();
    let french = write_file(&dir, "fr.po", FRENCH);
    let template = write_file(
        &dir,
        "demo.pot",
        indoc! {r#"
            msgid ""
            msgstr ""
            "Project-Id-Version: demo 1.0\n"
            "Language: \n"
            "Content-Type: text/plain; charset=UTF-8\n"

            msgid "Hello"
            msgstr ""
        "#},
    );

    let entries = read_entries(&[&french, &template]).unwrap();
    let metadata_count = entries.iter().filter(|e| e.as_metadata().is_some()).count();
    assert_eq!(metadata_count, 1);
    assert!(entries[0].as_metadata().is_some());
    // The template's header is read as an ordinary entry.
    assert_eq!(entries.len(), 1 + 5 + 2);
}

#[test]
fn test_error_aborts_the_whole_parse() {
    let dir = TempDir::new().unwrap();
    let good = write_file(&dir, "good.po", "msgid \"a\"\nmsgstr \"A\"\n");
    let bad = write_file(&dir, "bad.po", "msgid \"b\"\nmsgstr[one] \"B\"\n");

    let error = read_entries(&[&good, &bad]).unwrap_err();
    match error {
        Error::Lex { origin, line, .. } => {
            assert!(origin.ends_with("bad.po"));
            assert_eq!(line, 2);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_oversized_plural_index_fails_the_parse() {
    let error = Catalog::from_str(
        "msgid \"a\"\nmsgid_plural \"b\"\nmsgstr[0] \"zero\"\nmsgstr[99999999999999999999999] \"big\"\n",
    )
    .unwrap_err();
    assert!(matches!(error, Error::Lex { line: 4, .. }), "unexpected error: {error}");
}

#[test]
fn test_partial_consumption_then_new_parse() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "fr.po", FRENCH);
    let mut codec = Codec::new();
    codec.add_path(&path).unwrap();

    let first_two = codec
        .parse()
        .take(2)
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert_eq!(first_two.len(), 2);

    let all = codec.read_catalog().unwrap();
    assert!(all.metadata.is_some());
    assert_eq!(all.strings.len(), 5);
}

#[test]
fn test_crlf_and_legacy_encoding() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("legacy.po");
    std::fs::write(&path, b"msgid \"Cafe\"\r\nmsgstr \"Caf\xe9\"\r\n").unwrap();

    let mut codec = Codec::with_options(
        ReadOptions::new().with_encoding(Some(encoding_rs::WINDOWS_1252)),
    );
    codec.add_path(&path).unwrap();
    let catalog = codec.read_catalog().unwrap();
    assert_eq!(catalog.strings[0].translations(), vec!["Café"]);
}

#[test]
fn test_serialized_shape_skips_absent_fields() {
    let catalog = Catalog::from_str("msgid \"Hello\"\nmsgstr \"Bonjour\"\n").unwrap();
    let json = serde_json::to_value(&catalog.strings[0]).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "untranslated_singular_value": "Hello",
            "translated_values": { "0": "Bonjour" }
        })
    );
}
