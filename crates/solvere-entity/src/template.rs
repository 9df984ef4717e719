//! Geometry template rewriting.
//!
//! Templates are VRML97 snippets whose top node is a `Transform`. Anything
//! above that line (headers, comments) is dropped and the node is renamed
//! so the animation can route channels to it.

use solvere_core::InputError;

/// Delimiter around a substitution index, as in `$2$`.
const TAG_DELIMITER: char = '$';
const COMMENT: char = '#';

/// Index of the first line naming a `Transform` node.
fn transform_line<S: AsRef<str>>(lines: &[S]) -> Result<usize, InputError> {
    lines
        .iter()
        .position(|line| line.as_ref().contains("Transform"))
        .ok_or(InputError::MissingTransform)
}

/// Rewrite a body geometry template.
///
/// The `Transform` line becomes `DEF <tag> Transform {`. In every kept
/// line, each `$N$` ahead of a `#` comment is replaced by the N-th
/// (1-based) substitution line.
pub fn rewrite_body<S, T>(
    lines: &[S],
    tag: &str,
    substitutions: &[T],
) -> Result<Vec<String>, InputError>
where
    S: AsRef<str>,
    T: AsRef<str>,
{
    let start = transform_line(lines)?;
    let mut out = Vec::with_capacity(lines.len() - start);
    out.push(format!("DEF {tag} Transform {{"));

    for (idx, line) in lines.iter().enumerate().skip(start + 1) {
        out.push(substitute(line.as_ref(), idx + 1, substitutions)?);
    }
    Ok(out)
}

/// Rewrite an arrow template so its nodes carry the entity tag.
///
/// Every occurrence of `keyword` from the `Transform` line on is replaced
/// by `tag`.
pub fn retag_arrow<S: AsRef<str>>(
    lines: &[S],
    keyword: &str,
    tag: &str,
) -> Result<Vec<String>, InputError> {
    let start = transform_line(lines)?;
    Ok(lines[start..]
        .iter()
        .map(|line| line.as_ref().replace(keyword, tag))
        .collect())
}

/// Replace the `$N$` tags of one line. `line_no` is only used in errors.
fn substitute<T: AsRef<str>>(
    line: &str,
    line_no: usize,
    substitutions: &[T],
) -> Result<String, InputError> {
    let (code, comment) = match line.find(COMMENT) {
        Some(at) => line.split_at(at),
        None => (line, ""),
    };
    if !code.contains(TAG_DELIMITER) {
        return Ok(line.to_string());
    }

    let mut out = String::with_capacity(line.len());
    let mut rest = code;
    while let Some(open) = rest.find(TAG_DELIMITER) {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let close = after
            .find(TAG_DELIMITER)
            .ok_or(InputError::MalformedTag { line: line_no })?;
        let index: usize = after[..close]
            .trim()
            .parse()
            .map_err(|_| InputError::MalformedTag { line: line_no })?;

        let replacement = index
            .checked_sub(1)
            .and_then(|i| substitutions.get(i))
            .ok_or(InputError::MissingSubstitution {
                line: line_no,
                index,
                available: substitutions.len(),
            })?;
        out.push_str(replacement.as_ref());
        rest = &after[close + 1..];
    }
    out.push_str(rest);
    out.push_str(comment);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &[&str] = &[
        "#VRML V2.0 utf8",
        "# exported geometry",
        "Transform {",
        "  children [",
        "    Inline { url \"$1$\" } # from $2$",
        "    Shape { geometry Box { size $2$ } }",
        "  ]",
        "}",
    ];

    #[test]
    fn test_rewrite_body() {
        let out = rewrite_body(BODY, "femur_r", &["femur.wrl", "0.1 0.4 0.1"]).unwrap();

        assert_eq!(out.len(), 6);
        assert_eq!(out[0], "DEF femur_r Transform {");
        assert_eq!(out[2], "    Inline { url \"femur.wrl\" } # from $2$");
        assert_eq!(out[3], "    Shape { geometry Box { size 0.1 0.4 0.1 } }");
        assert_eq!(out[5], "}");
    }

    #[test]
    fn test_rewrite_without_tags_needs_no_substitutions() {
        let lines = ["Transform {", "  translation 0 1 0", "}"];
        let out = rewrite_body(&lines, "pelvis", &[] as &[&str]).unwrap();

        assert_eq!(out, vec!["DEF pelvis Transform {", "  translation 0 1 0", "}"]);
    }

    #[test]
    fn test_missing_transform() {
        let lines = ["#VRML V2.0 utf8", "Shape {}"];
        assert_eq!(
            rewrite_body(&lines, "x", &[] as &[&str]),
            Err(InputError::MissingTransform)
        );
    }

    #[test]
    fn test_substitution_out_of_range() {
        let err = rewrite_body(BODY, "femur_r", &["only one"]).unwrap_err();
        assert_eq!(
            err,
            InputError::MissingSubstitution {
                line: 6,
                index: 2,
                available: 1
            }
        );
    }

    #[test]
    fn test_zero_index_is_missing() {
        let lines = ["Transform {", "url \"$0$\""];
        let err = rewrite_body(&lines, "x", &["a"]).unwrap_err();
        assert!(matches!(err, InputError::MissingSubstitution { index: 0, .. }));
    }

    #[test]
    fn test_malformed_tag() {
        let open = ["Transform {", "url \"$1\""];
        let text = ["Transform {", "url \"$one$\""];

        assert_eq!(
            rewrite_body(&open, "x", &["a"]),
            Err(InputError::MalformedTag { line: 2 })
        );
        assert_eq!(
            rewrite_body(&text, "x", &["a"]),
            Err(InputError::MalformedTag { line: 2 })
        );
    }

    #[test]
    fn test_retag_arrow() {
        let lines = [
            "#VRML V2.0 utf8",
            "DEF force Transform {",
            "  children [ DEF force_Shape Shape {} ]",
            "}",
        ];
        let out = retag_arrow(&lines, "force", "hand_F").unwrap();

        assert_eq!(
            out,
            vec![
                "DEF hand_F Transform {",
                "  children [ DEF hand_F_Shape Shape {} ]",
                "}",
            ]
        );
    }
}
