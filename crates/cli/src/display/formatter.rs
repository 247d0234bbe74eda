use colorto_core::{GeneratorRun, pipeline::WriteSummary};
use std::path::Path;

/// Formatted report of what a run would generate
pub fn print_analysis(run: &GeneratorRun) {
    if run.descriptors.is_empty() {
        println!("❌ No types qualify for a generated extension");
    } else {
        println!("✅ {} types qualify:", run.descriptors.len());
        for (descriptor, hint_name) in run.descriptors.iter().zip(&run.units) {
            let access = if descriptor.access_modifier.is_empty() {
                "?"
            } else {
                descriptor.access_modifier.as_str()
            };
            println!(
                "   • {}{} ({}) → {}",
                descriptor.identity(),
                descriptor.generic_arguments,
                access,
                hint_name
            );
            for clause in descriptor.generic_constraints.lines() {
                println!("       {clause}");
            }
        }
    }

    print_diagnostics(run);
}

pub fn print_write_summary(run: &GeneratorRun, summary: &WriteSummary, output_dir: &Path) {
    println!("📂 Output: {}", output_dir.display());
    println!(
        "✅ {} units ({} rendered, {} reused, {} removed)",
        run.units.len(),
        run.rendered.len(),
        run.reused.len(),
        run.removed.len()
    );
    for path in &summary.written {
        println!("   ✏️  {}", display_name(path));
    }
    for path in &summary.deleted {
        println!("   🗑️  {}", display_name(path));
    }

    print_diagnostics(run);
}

fn print_diagnostics(run: &GeneratorRun) {
    if run.diagnostics.is_empty() {
        return;
    }
    println!("⚠️  {} diagnostics:", run.diagnostics.len());
    for diagnostic in &run.diagnostics {
        println!("   {diagnostic}");
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_display_name() {
        assert_eq!(
            display_name(&PathBuf::from("/out/LabelTextColorTo.g.shared.cs")),
            "LabelTextColorTo.g.shared.cs"
        );
        assert_eq!(display_name(&PathBuf::from("/")), "/");
    }
}
