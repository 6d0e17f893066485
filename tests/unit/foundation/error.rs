use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        WeaveError::internal("t", "x")
            .to_string()
            .contains("internal error:")
    );
    assert!(
        WeaveError::reference_not_found("t", "x")
            .to_string()
            .contains("reference not found:")
    );
    assert!(
        WeaveError::code_merge("t", "x")
            .to_string()
            .contains("code merge error:")
    );
    assert!(
        WeaveError::unimplemented("t", "x")
            .to_string()
            .contains("unimplemented feature:")
    );
    assert!(WeaveError::codec("x").to_string().contains("codec error:"));
}

#[test]
fn tag_and_kind_are_exposed() {
    let err = WeaveError::code_merge("merge.class_collision", "pkg.Hero");
    assert_eq!(err.kind(), ErrorKind::CodeMerge);
    assert_eq!(err.tag(), Some("merge.class_collision"));
    assert!(err.to_string().contains("[merge.class_collision] pkg.Hero"));
    assert_eq!(WeaveError::codec("x").tag(), None);
}

#[test]
fn innermost_document_context_wins() {
    let err = WeaveError::internal("t", "x")
        .in_document("donor")
        .in_document("host");
    assert_eq!(err.document(), Some("donor"));
    assert!(err.to_string().ends_with("(document 'donor')"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = WeaveError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
    assert_eq!(err.kind(), ErrorKind::Other);
}
