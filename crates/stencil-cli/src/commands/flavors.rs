//! Implementation of the `stencil flavors` command.

use serde_json::to_string_pretty;

use stencil_adapters::LocalFilesystem;
use stencil_core::{
    application::{FlavorInfo, ScaffoldService},
    error::Context,
};

use crate::{
    cli::{FlavorsArgs, ListFormat},
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: FlavorsArgs, output: OutputManager) -> CliResult<()> {
    // Listing renders plans in memory; the filesystem is never touched.
    let service = ScaffoldService::new(Box::new(LocalFilesystem::new()));
    let flavors = service.list_flavors()?;

    match args.format {
        ListFormat::Table => {
            output.header("Available Flavors:")?;
            for flavor in &flavors {
                output.print("")?;
                output.print(&format!("  {} ({})", flavor.name, flavor.id))?;
                if !flavor.routers.is_empty() {
                    output.print(&format!("    routers: {}", flavor.routers.join(", ")))?;
                }
                output.print(&format!("    files:   {}", flavor.files.join(" ")))?;
            }
        }

        ListFormat::Json => {
            // JSON must stay parseable even under --quiet.
            let json = to_string_pretty(&flavors).context("serialising flavors")?;
            output.data(&json)?;
        }

        ListFormat::List => {
            for flavor in &flavors {
                output.data(&flavor.id)?;
            }
        }

        ListFormat::Csv => {
            output.data("id,name,generator,files")?;
            for flavor in &flavors {
                output.data(&csv_row(flavor))?;
            }
        }
    }

    Ok(())
}

fn csv_row(flavor: &FlavorInfo) -> String {
    format!(
        "{},{},{},{}",
        flavor.id,
        flavor.name,
        flavor.generator,
        flavor.files.len()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_row_counts_files() {
        let info = FlavorInfo {
            id: "react-vite".into(),
            name: "React + Vite".into(),
            generator: "ReactViteScaffoldTool".into(),
            routers: vec![],
            files: vec!["package.json".into(), "README_GEN.md".into()],
        };
        assert_eq!(csv_row(&info), "react-vite,React + Vite,ReactViteScaffoldTool,2");
    }
}
