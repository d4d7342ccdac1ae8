//! Plan export command handler

use eagle_plan::config::Config;
use eagle_plan::core::export::ExportFormat;
use eagle_plan::{error, info};
use std::path::{Path, PathBuf};

use super::load_data;

/// Export the semester plan as CSV, iCalendar or HTML
pub fn run(config: &Config, format: ExportFormat, output: Option<&Path>, to_stdout: bool) {
    let loaded = load_data(config);
    let export = loaded.data.export();

    if to_stdout {
        match export.render(format) {
            Ok(rendered) => print!("{rendered}"),
            Err(e) => {
                eprintln!("✗ Failed to render {format} export: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    let path = output.map_or_else(|| default_output(config, format), Path::to_path_buf);
    match export.write_to(format, &path) {
        Ok(()) => {
            info!("Wrote {format} export to {}", path.display());
            println!("✓ Exported plan to {}", path.display());
        }
        Err(e) => {
            error!("Export to {} failed: {e}", path.display());
            eprintln!("✗ Failed to export plan to {}: {e}", path.display());
            std::process::exit(1);
        }
    }
}

fn default_output(config: &Config, format: ExportFormat) -> PathBuf {
    let dir = if config.paths.export_dir.is_empty() {
        PathBuf::from(".")
    } else {
        PathBuf::from(&config.paths.export_dir)
    };
    dir.join(format!("plan.{}", format.extension()))
}
