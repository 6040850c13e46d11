use anyhow::{Context, Result};
use clap::Parser;
use crew::analysis::{AnalysisParts, ArchitectureAnalyzer};
use crew::{Config, is_debug_mode, load_plugin_context, project};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "crew-arch")]
#[command(about = "Render a Mermaid architecture diagram from a project analysis")]
struct Args {
    /// Project directory to analyze
    path: PathBuf,

    /// Output file for the diagram
    #[arg(short, long, default_value = "architecture_diagram.mermaid")]
    output: PathBuf,

    /// Print the diagram to stdout instead of writing a file
    #[arg(long)]
    print: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let debug = is_debug_mode();

    // Config comes through the injected plugin context when invoked via
    // 'crew arch'; standalone runs fall back to the default config file.
    let config = match load_plugin_context()? {
        Some(context) => {
            if debug {
                eprintln!("Loaded plugin context from {}", context.config_path);
            }
            Config::load_or_default(&context.config_path)?
        }
        None => crew::load_default_config()?,
    };

    let files = project::load_file_set(
        &args.path,
        &config.project.include,
        &config.project.exclude,
    )?;
    if debug {
        eprintln!("Analyzing {} files", files.len());
    }

    let parts = ArchitectureAnalyzer::analyze(&files);
    let diagram = render_diagram(&parts);

    if args.print {
        println!("{}", diagram);
    } else {
        std::fs::write(&args.output, &diagram)
            .with_context(|| format!("Failed to write {}", args.output.display()))?;
        println!("Saved to {}", args.output.display());
    }

    Ok(())
}

/// Render layers and internal dependencies as a Mermaid graph
fn render_diagram(parts: &AnalysisParts) -> String {
    let mut out = String::from("graph TD\n");

    for layer in &parts.layer_structure {
        out.push_str(&format!("    subgraph {}\n", sanitize(&layer.name)));
        for file in &layer.files {
            out.push_str(&format!(
                "        {}[{}]\n",
                node_id(file),
                file
            ));
        }
        out.push_str("    end\n\n");
    }

    // Files outside every layer still appear as free nodes when they
    // participate in an edge.
    for edge in &parts.dependencies.edges {
        out.push_str(&format!(
            "    {} --> {}\n",
            node_id(&edge.from),
            node_id(&edge.to)
        ));
    }

    out
}

/// Stable Mermaid-safe identifier for a file path
fn node_id(path: &str) -> String {
    let mut id = String::with_capacity(path.len());
    for c in path.chars() {
        if c.is_ascii_alphanumeric() {
            id.push(c);
        } else {
            id.push('_');
        }
    }
    id
}

/// Subgraph names cannot carry slashes or spaces
fn sanitize(name: &str) -> String {
    name.replace(['/', ' '], "_")
}
