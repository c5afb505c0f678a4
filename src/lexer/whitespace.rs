/// Reports whether `c` separates tokens.
///
/// The table is spelled out rather than delegated to the standard library so
/// the token grammar cannot drift with Unicode versions. It covers the ASCII
/// controls `\t`..`\r` and space, the Latin-1 NEL and NBSP, U+2000..=U+200A,
/// and the remaining Zs/Zl/Zp code points.
pub fn is_whitespace(c: char) -> bool {
    if c <= '\u{00FF}' {
        return matches!(
            c,
            ' ' | '\t' | '\n' | '\u{000B}' | '\u{000C}' | '\r' | '\u{0085}' | '\u{00A0}'
        );
    }
    if ('\u{2000}'..='\u{200A}').contains(&c) {
        return true;
    }
    matches!(
        c,
        '\u{1680}' | '\u{2028}' | '\u{2029}' | '\u{202F}' | '\u{205F}' | '\u{3000}'
    )
}

/// Reports whether `c` is one of the two list delimiters.
pub fn is_paren(c: char) -> bool {
    c == '(' || c == ')'
}
