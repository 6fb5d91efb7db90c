//! Markup bodies shared by the integration tests.

/// A body touching every block kind the parser recognises.
pub fn mixed_unit() -> String {
    [
        "# Introduction",
        "",
        "Statistics is the study of data.",
        "",
        "## Key terms",
        "",
        "- Population",
        "- Sample",
        "  - Random sample",
        "",
        "1. Collect",
        "2. Analyse",
        "",
        "> Quoted wisdom.",
        "",
        "### Notes",
        "",
        "Closing paragraph.",
    ]
    .join("\n")
}

/// `count` paragraphs of roughly 200 characters, each tagged `pN` so order
/// can be checked.
pub fn long_unit(count: usize) -> String {
    (0..count)
        .map(|i| {
            format!(
                "p{i} Sampling distributions describe how a statistic varies between \
                 repeated samples drawn from the same population, and they underpin \
                 confidence intervals as well as hypothesis tests."
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Nothing but emoji and dingbats.
pub fn ornament_only() -> &'static str {
    "\u{1F389}\u{2728}\u{1F680}\u{1F4A1}"
}

/// Constructs the parser keeps as raw text.
pub fn unsupported_constructs() -> &'static str {
    "| a | b |\n| - | - |\n\n```\nlet x = 1;\n```\n\n---\n\nSee [docs](https://example.com) **now**."
}
