//! Helpers for line-oriented passes.

/// Rewrite every maximal run of consecutive lines matching `is_member`.
///
/// `render` receives the lines of one run and returns the replacement lines. Lines outside
/// runs are kept as they are, and the trailing newline (if any) is preserved.
pub fn rewrite_runs<P, F>(text: &str, is_member: P, mut render: F) -> String
where
    P: Fn(&str) -> bool,
    F: FnMut(&[&str]) -> Vec<String>,
{
    let lines: Vec<&str> = text.split('\n').collect();
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let mut i = 0;
    while i < lines.len() {
        if is_member(lines[i]) {
            let start = i;
            while i < lines.len() && is_member(lines[i]) {
                i += 1;
            }
            out.extend(render(&lines[start..i]));
        } else {
            out.push(lines[i].to_string());
            i += 1;
        }
    }
    out.join("\n")
}

/// Split a line into its leading indentation and the rest.
pub fn split_indent(line: &str) -> (&str, &str) {
    let rest = line.trim_start_matches([' ', '\t']);
    (&line[..line.len() - rest.len()], rest)
}

/// Indentation width, counting a tab as four columns.
pub fn indent_width(indent: &str) -> usize {
    indent.chars().map(|c| if c == '\t' { 4 } else { 1 }).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_each_run_separately() {
        let text = "> a\n> b\nplain\n> c\n";
        let out = rewrite_runs(
            text,
            |l| l.starts_with('>'),
            |run| vec![format!("[{}]", run.len())],
        );
        assert_eq!(out, "[2]\nplain\n[1]\n");
    }

    #[test]
    fn splits_indentation() {
        assert_eq!(split_indent("  \t* x"), ("  \t", "* x"));
        assert_eq!(split_indent("x"), ("", "x"));
        assert_eq!(indent_width("  \t"), 6);
    }
}
