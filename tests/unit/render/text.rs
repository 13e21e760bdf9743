use super::*;

#[test]
fn garbage_font_bytes_are_rejected() {
    let err = TextStamper::from_bytes(vec![0, 1, 2, 3], 32.0).unwrap_err();
    assert!(matches!(err, RideError::Text(_)));
}

#[test]
fn missing_font_file_is_an_io_error() {
    let err = TextStamper::from_path(Path::new("target/does/not/exist.ttf"), 32.0).unwrap_err();
    assert!(matches!(err, RideError::Io { .. }));
}

#[test]
fn escape_xml_handles_markup() {
    assert_eq!(escape_xml("A & B <c>"), "A &amp; B &lt;c&gt;");
    assert_eq!(escape_xml("it's \"x\""), "it&apos;s &quot;x&quot;");
}

#[test]
fn family_names_are_quoted_for_css() {
    assert_eq!(css_family("DejaVu Sans"), "'DejaVu Sans'");
    assert_eq!(css_family("Ma'am Grotesk"), "\"Ma'am Grotesk\"");
    assert_eq!(css_family("Odd'\"Face"), "OddFace");
    // Survives XML escaping and decodes back to a balanced CSS string.
    assert_eq!(
        escape_xml(&css_family("Ma'am Grotesk")),
        "&quot;Ma&apos;am Grotesk&quot;"
    );
}

#[test]
fn system_font_rasterizes_ink() {
    // Headless CI images may ship without fonts.
    let Ok(stamper) = TextStamper::system_default(24.0) else {
        return;
    };
    let mask = stamper.rasterize("Dist: 12km", 300).unwrap().unwrap();
    assert_eq!(mask.width, 300);
    assert_eq!(mask.coverage.len(), (mask.width * mask.height) as usize);
    assert!(mask.baseline <= mask.height);
    assert!(mask.coverage.iter().any(|&c| c > 0));

    assert!(stamper.rasterize("   ", 300).unwrap().is_none());
    assert!(stamper.rasterize("x", 0).unwrap().is_none());
}
