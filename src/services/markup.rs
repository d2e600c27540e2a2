//! Wikitext cleanup for display.
//!
//! Not a wikitext parser: only the constructs recipe pages use are handled,
//! by an ordered list of regex rewrites. Template stripping matches
//! `{{...}}` without inner braces, so nested templates leave residue.

use std::sync::LazyLock;

use regex::Regex;

struct Rewrite {
    pattern: Regex,
    replacement: &'static str,
}

fn rewrite(pattern: &str, replacement: &'static str) -> Rewrite {
    Rewrite {
        pattern: Regex::new(pattern).expect("markup pattern compiles"),
        replacement,
    }
}

static SEE_ALSO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)==\s*See also\s*==").expect("markup pattern compiles"));

/// Applied in order; later rules rely on earlier ones having run.
static REWRITES: LazyLock<Vec<Rewrite>> = LazyLock::new(|| {
    vec![
        // category tags
        rewrite(r"\[\[Category:[^\]]+\]\]", ""),
        // interlanguage links
        rewrite(r"\[\[[a-z\-]+:[^\]]+\]\]", ""),
        // templates
        rewrite(r"\{\{[^\}]+\}\}", ""),
        // piped links keep their alias
        rewrite(r"\[\[[^\|\]]+\|([^\]]+)\]\]", "${1}"),
        // bare links keep their target
        rewrite(r"\[\[([^\]]+)\]\]", "${1}"),
        // file and image links the link rules missed
        rewrite(r"(?i)\[\[(File|Image):[^\]]+\]\]", ""),
        rewrite(r"\n{3,}", "\n\n"),
    ]
});

/// Strip wiki markup from a page body, dropping everything from the
/// "See also" heading on.
pub fn clean_markup(raw: &str) -> String {
    let body = SEE_ALSO.split(raw).next().unwrap_or_default();

    let cleaned = REWRITES.iter().fold(body.to_string(), |text, rule| {
        rule.pattern
            .replace_all(&text, rule.replacement)
            .into_owned()
    });

    cleaned.trim().to_string()
}
