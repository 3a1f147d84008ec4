use clap::{ArgAction, Parser, Subcommand};
use mime_registry::{FilterDescriptor, Operation, Registry, Table, extension_of};
use std::io::{Write, stdout};
use std::process::exit;
use std::time::Instant;
use tracing::{Level, debug, info};

#[derive(Parser, Debug)]
#[command(
    name = "mime",
    bin_name = "mime",
    version = None,
    about = "Translates between file extensions and MIME types",
    long_about = None)
]
struct Args {
    /// Extra associations, `type,ext ext,type,ext`, applied on top of the registry
    #[arg(short, long, env = "MIME_REGISTRY_TABLE", value_name = "TABLE")]
    table: Option<String>,
    /// Start without the built-in associations
    #[arg(long)]
    empty: bool,
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Prints the extension of each file name
    Ext {
        #[arg(required = true)]
        files: Vec<String>,
    },
    /// Prints the MIME type of each file name
    Type {
        #[arg(required = true)]
        files: Vec<String>,
    },
    /// Prints the MIME types accepted by extension filters (empty = everything)
    Accept {
        /// One filter per argument, e.g. "jpg,png"
        #[arg(required = true)]
        filters: Vec<String>,
        /// Keep unknown extensions as ".ext" instead of accepting everything
        #[arg(short, long)]
        literal: bool,
    },
    /// Prints the extensions of MIME types ("image/*" allowed)
    Exts {
        #[arg(required = true)]
        mime_types: Vec<String>,
    },
    /// Prints the filter descriptor of comma separated MIME types as JSON
    Filter { mime_types: String },
    /// Prints the registry in its serialized form
    Dump {
        #[arg(long)]
        fingerprint: bool,
    },
}

fn setup_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn build_registry(args: &Args) -> Result<Registry, String> {
    let registry = if args.empty {
        Registry::empty()
    } else {
        Registry::new()
    };
    if let Some(ref text) = args.table {
        let table: Table = text
            .parse()
            .map_err(|e| format!("invalid registry table: {e}"))?;
        registry.load_table_with(&table, |mime_type, op| match op {
            Operation::Create => {
                info!(mime_type, "+");
            }
            Operation::Update => {
                info!(mime_type, "*");
            }
            _ => {
                debug!(mime_type, "unchanged");
            }
        });
    }
    Ok(registry)
}

fn run(args: Args, out: &mut impl Write) -> Result<(), String> {
    let registry = build_registry(&args)?;
    let lines: Vec<String> = match args.command {
        Command::Ext { files } => files.iter().map(|it| extension_of(it)).collect(),
        Command::Type { files } => files.iter().map(|it| registry.mime_type_of(it)).collect(),
        Command::Accept { filters, literal } => {
            let filters: Vec<_> = filters.into_iter().map(FilterDescriptor::untitled).collect();
            vec![
                registry
                    .extension_filter_to_mime_types(&filters, literal)
                    .join(","),
            ]
        }
        Command::Exts { mime_types } => {
            vec![registry.mime_types_to_extensions(&mime_types[..]).join(",")]
        }
        Command::Filter { mime_types } => {
            let descriptors = registry.mime_types_to_filter_descriptor(mime_types.as_str());
            vec![
                serde_json::to_string(&descriptors)
                    .map_err(|e| format!("failed to serialize filter: {e:?}"))?,
            ]
        }
        Command::Dump { fingerprint } => {
            if fingerprint {
                vec![registry.fingerprint()]
            } else {
                vec![registry.to_table().to_string()]
            }
        }
    };
    lines
        .iter()
        .try_for_each(|line| writeln!(out, "{line}"))
        .map_err(|e| format!("failed to write output: {e:?}"))
}

fn main() {
    let args = Args::parse();
    setup_logging(args.verbose);
    let t0 = Instant::now();
    if let Err(e) = run(args, &mut stdout().lock()) {
        eprintln!("{e}");
        exit(1);
    }
    debug!("done in {:?}", Instant::now().duration_since(t0));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(argv: &[&str]) -> Result<String, String> {
        let args = Args::try_parse_from(argv).map_err(|e| e.to_string())?;
        let mut out = vec![];
        run(args, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn ext_and_type() {
        assert_eq!(output(&["mime", "ext", "a.tar.GZ", "noext"]).unwrap(), "gz\n\n");
        assert_eq!(
            output(&["mime", "type", "photo.JPG", "noext"]).unwrap(),
            "image/jpeg\n\n"
        );
    }

    #[test]
    fn accept() {
        assert_eq!(
            output(&["mime", "accept", "jpg,png", "gif"]).unwrap(),
            "image/jpeg,image/png,image/gif\n"
        );
        assert_eq!(output(&["mime", "accept", "heic"]).unwrap(), "\n");
        assert_eq!(output(&["mime", "accept", "--literal", "heic"]).unwrap(), ".heic\n");
    }

    #[test]
    fn exts_and_filter() {
        assert_eq!(
            output(&["mime", "exts", "image/jpeg", "image/png"]).unwrap(),
            "jpg,jpeg,jpe,png\n"
        );
        assert_eq!(
            output(&["mime", "filter", "image/png, image/jpeg"]).unwrap(),
            "[{\"title\":\"Files\",\"extensions\":\"png,jpg,jpeg,jpe\"}]\n"
        );
    }

    #[test]
    fn table_option() {
        assert_eq!(
            output(&["mime", "--empty", "-t", "image/webp,webp", "dump"]).unwrap(),
            "image/webp,webp\n"
        );
        assert_eq!(
            output(&["mime", "-t", "image/webp,webp", "type", "a.webp"]).unwrap(),
            "image/webp\n"
        );
        let err = output(&["mime", "-t", "image/webp", "dump"]).unwrap_err();
        assert!(err.starts_with("invalid registry table"));
    }

    #[test]
    fn fingerprint_matches_library() {
        assert_eq!(
            output(&["mime", "dump", "--fingerprint"]).unwrap(),
            format!("{}\n", Registry::new().fingerprint())
        );
    }
}
