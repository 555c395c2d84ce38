use crate::scheme::Scheme;

const SEPARATOR: &str = "--------------------------------";

/// Renders ranked schemes for display. `limit` caps how many are printed;
/// the closing count always reports the full total.
pub fn render_schemes_text(schemes: &[Scheme], limit: Option<usize>) -> String {
    let mut out = String::new();
    let shown = limit.unwrap_or(schemes.len()).min(schemes.len());

    for (i, scheme) in schemes.iter().take(shown).enumerate() {
        out.push_str(&format!(
            "Scheme #{} (similarity: {})\n",
            i + 1,
            scheme.score_label()
        ));
        for item in &scheme.assignments {
            out.push_str(&format!(
                "{}, {}, {}\n",
                item.spectrum, item.channel, item.antibody
            ));
        }
        out.push_str(SEPARATOR);
        out.push('\n');
    }

    if shown < schemes.len() {
        out.push_str(&format!("... {} more not shown\n", schemes.len() - shown));
    }
    out.push_str(&format!(
        "Found {} valid staining schemes\n",
        schemes.len()
    ));
    out
}

/// One antibody per line, in the order given.
pub fn render_antibody_list(antibodies: &[String]) -> String {
    let mut out = String::new();
    for antibody in antibodies {
        out.push_str(antibody);
        out.push('\n');
    }
    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/text.rs"]
mod tests;
