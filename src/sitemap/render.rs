use std::collections::BTreeSet;
use std::fmt::Write;

use super::Sitemap;

fn write_branch(
    output: &mut String,
    label: &str,
    urls: &BTreeSet<String>,
    is_last: bool,
) -> Result<(), std::fmt::Error> {
    let (branch, indent) = match is_last {
        true => ("└──", "   "),
        false => ("├──", "│  "),
    };
    if urls.is_empty() {
        return writeln!(output, "{}{} (none)", branch, label);
    }
    writeln!(output, "{}{}", branch, label)?;
    let last = urls.len() - 1;
    for (i, url) in urls.iter().enumerate() {
        let leaf = if i == last { "└──" } else { "├──" };
        writeln!(output, "{}{}{}", indent, leaf, url)?;
    }
    Ok(())
}

/// Renders every page, sorted by URL, as a small tree of its links and assets.
pub fn to_listing(sitemap: &Sitemap) -> Result<String, std::fmt::Error> {
    let mut output = String::new();
    for (i, (url, record)) in sitemap.pages.iter().enumerate() {
        if i > 0 {
            output.push('\n');
        }
        writeln!(output, "{}", url)?;
        write_branch(&mut output, "links", &record.links, false)?;
        write_branch(&mut output, "assets", &record.assets, true)?;
    }
    Ok(output)
}
