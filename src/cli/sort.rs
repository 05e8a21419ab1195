//! `sort [path]` front end for [`crate::sort`].

use anyhow::Result;
use std::path::PathBuf;

use super::parse::{expect_args, Command};
use super::ui::Prompter;
use crate::sort::{sort_directory, SortReport};

/// Sort the folder named in `args`, or the one the user types in.
pub fn run_sort(args: &[String], prompter: &mut dyn Prompter) -> Result<String> {
    expect_args(Command::Sort, args, 0, 1)?;

    let path = match args.first() {
        Some(path) => path.clone(),
        None => match prompter.ask("Enter the path to the folder to sort:")? {
            Some(path) if !path.trim().is_empty() => path.trim().to_string(),
            _ => return Ok("Sorting has been canceled.".to_string()),
        },
    };

    let root = PathBuf::from(&path);
    if !root.is_dir() {
        return Ok(format!("{} is not a folder.", path));
    }

    let report = sort_directory(&root)?;
    Ok(render_report(&report))
}

pub fn render_report(report: &SortReport) -> String {
    if report.moved_count() == 0 && report.failures.is_empty() {
        let mut out = "Nothing to sort.".to_string();
        push_extensions(&mut out, "Unknown extensions", report.unknown_extensions.iter());
        return out;
    }

    let mut out = format!("Sorted {} file(s).", report.moved_count());
    for (folder, files) in &report.sorted {
        out.push_str(&format!("\n{}: {}", folder, files.join(", ")));
    }
    push_extensions(&mut out, "Known extensions", report.known_extensions.iter());
    push_extensions(&mut out, "Unknown extensions", report.unknown_extensions.iter());

    if !report.failures.is_empty() {
        out.push_str("\nNot moved:");
        for (path, reason) in &report.failures {
            out.push_str(&format!("\n  {}: {}", path.display(), reason));
        }
    }
    if report.removed_dirs > 0 {
        out.push_str(&format!("\nRemoved {} empty folder(s).", report.removed_dirs));
    }
    out
}

fn push_extensions<'a>(out: &mut String, label: &str, exts: impl Iterator<Item = &'a String>) {
    let exts: Vec<&str> = exts.map(String::as_str).collect();
    if !exts.is_empty() {
        out.push_str(&format!("\n{}: {}", label, exts.join(" ")));
    }
}
