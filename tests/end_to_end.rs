//! End-to-end scenarios against the public API, covering the documented
//! translation scenarios and the filesystem-boundary components (special
//! files, atomic install) that unit tests cannot exercise across a real
//! directory tree.

use std::fs;
use std::io::Cursor;

use rstest::rstest;

use wc_translate::error::TranslateError;
use wc_translate::install::{install_file, StagedInstall};
use wc_translate::keyword::{KeywordTable, RevisionMetadata};
use wc_translate::special::{create_special, detranslate_special};
use wc_translate::{translate, TranslateOptions};

fn run(input: &[u8], opts: &TranslateOptions) -> Vec<u8> {
    let mut out = Vec::new();
    let mut src = Cursor::new(input);
    translate(&mut src, &mut out, opts).unwrap();
    out
}

#[rstest]
#[case(b"a\nb\nc".as_slice(), b"\r\n".as_slice(), b"a\r\nb\r\nc".as_slice())]
#[case(b"a\r\nb\r\n".as_slice(), b"\n".as_slice(), b"a\nb\n".as_slice())]
#[case(b"a\rb\rc".as_slice(), b"\n".as_slice(), b"a\nb\nc".as_slice())]
fn eol_normalization_table(#[case] input: &[u8], #[case] eol_out: &[u8], #[case] expected: &[u8]) {
    let opts = TranslateOptions {
        eol_out: Some(eol_out.to_vec()),
        ..Default::default()
    };
    assert_eq!(run(input, &opts), expected);
}

#[test]
fn mixed_eol_without_repair_is_rejected() {
    let opts = TranslateOptions {
        eol_out: Some(b"\n".to_vec()),
        ..Default::default()
    };
    let mut out = Vec::new();
    let mut src = Cursor::new(b"a\nb\r\nc".as_slice());
    let err = translate(&mut src, &mut out, &opts).unwrap_err();
    assert!(matches!(err, TranslateError::InconsistentEol { .. }));
}

#[rstest]
#[case("Rev", "$Rev$", "$Rev: 9 $")]
#[case("Author", "$Author$", "$Author: carol $")]
fn keyword_expand_table(#[case] spec: &str, #[case] input: &str, #[case] expected: &str) {
    let table = KeywordTable::build(
        spec,
        &RevisionMetadata {
            revision: Some(9),
            author: Some("carol"),
            ..Default::default()
        },
    );
    let opts = TranslateOptions {
        keywords: Some(table),
        expand: true,
        ..Default::default()
    };
    assert_eq!(run(input.as_bytes(), &opts), expected.as_bytes());
}

#[test]
fn symlink_round_trip_through_special_file_descriptor() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("target.txt");
    fs::write(&target, b"payload").unwrap();

    let link = dir.path().join("link");
    #[cfg(unix)]
    std::os::unix::fs::symlink(&target, &link).unwrap();
    #[cfg(not(unix))]
    fs::write(&link, b"not a symlink on this platform").unwrap();

    let descriptor = dir.path().join("descriptor");
    detranslate_special(&link, &descriptor).unwrap();

    #[cfg(unix)]
    {
        let contents = fs::read_to_string(&descriptor).unwrap();
        assert_eq!(contents, format!("link {}", target.to_string_lossy()));

        let recreated = dir.path().join("recreated");
        create_special(&descriptor, &recreated).unwrap();
        assert!(fs::symlink_metadata(&recreated).unwrap().file_type().is_symlink());
        assert_eq!(fs::read_to_string(&recreated).unwrap(), "payload");
    }
}

#[test]
fn atomic_install_never_leaves_a_partial_destination_on_commit_success() {
    let dir = tempfile::tempdir().unwrap();
    let dst = dir.path().join("checked-out.txt");

    install_file(&mut Cursor::new(b"first version"), &dst, false).unwrap();
    assert_eq!(fs::read(&dst).unwrap(), b"first version");

    install_file(&mut Cursor::new(b"second version"), &dst, false).unwrap();
    assert_eq!(fs::read(&dst).unwrap(), b"second version");

    let remaining: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(remaining.len(), 1, "only the final destination should remain: {remaining:?}");
}

#[test]
fn canceling_a_staged_install_leaves_no_trace() {
    let dir = tempfile::tempdir().unwrap();
    let dst = dir.path().join("never-committed.txt");

    let mut staged = StagedInstall::begin(&dst, false).unwrap();
    staged.write_all_from(&mut Cursor::new(b"abandoned")).unwrap();
    wc_translate::install::install_delete(staged);

    assert!(!dst.exists());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}
