//! Filename extraction from a `Content-Disposition` header value.

/// Parse the `filename=` token out of a `Content-Disposition` header.
///
/// The returned name is a save label only: quotes are stripped and any path
/// components are discarded, so a hostile header cannot steer the write
/// location. Returns `None` when the header carries no usable filename;
/// callers fall back to a generic default.
pub fn parse_filename(disposition: &str) -> Option<String> {
    let (_, rest) = disposition.split_once("filename=")?;
    let raw = rest.split(';').next().unwrap_or(rest).trim();
    let unquoted: String = raw.chars().filter(|c| *c != '"' && *c != '\'').collect();

    // Keep only the final path component
    let name = unquoted
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or("")
        .trim()
        .to_string();

    if name.is_empty() || name == "." || name == ".." {
        None
    } else {
        Some(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attachment_with_quoted_filename() {
        assert_eq!(
            parse_filename(r#"attachment; filename="report.pdf""#),
            Some("report.pdf".to_string())
        );
    }

    #[test]
    fn test_unquoted_filename() {
        assert_eq!(
            parse_filename("attachment; filename=notes.txt"),
            Some("notes.txt".to_string())
        );
    }

    #[test]
    fn test_filename_followed_by_parameter() {
        assert_eq!(
            parse_filename(r#"attachment; filename="a b.bin"; size=42"#),
            Some("a b.bin".to_string())
        );
    }

    #[test]
    fn test_no_filename_token() {
        assert_eq!(parse_filename("attachment"), None);
        assert_eq!(parse_filename("inline; size=1"), None);
    }

    #[test]
    fn test_path_components_are_stripped() {
        assert_eq!(
            parse_filename(r#"attachment; filename="../../etc/passwd""#),
            Some("passwd".to_string())
        );
        assert_eq!(
            parse_filename(r#"attachment; filename="C:\tmp\evil.exe""#),
            Some("evil.exe".to_string())
        );
    }

    #[test]
    fn test_empty_or_dot_names_rejected() {
        assert_eq!(parse_filename(r#"attachment; filename="""#), None);
        assert_eq!(parse_filename("attachment; filename=.."), None);
        assert_eq!(parse_filename("attachment; filename=dir/"), None);
    }
}
