use crate::{file, interact, GlobalOpts};

use bookmeta::{BookRecord, Isbn, OpenLibrary};

use clap::{ArgEnum, Subcommand};
use eyre::{eyre, Context, Result};
use log::{info, trace};

#[derive(Subcommand)]
#[non_exhaustive]
pub enum Commands {
    /// Look up the metadata of one or more books
    ///
    /// Each ISBN may be an ISBN-10 or an ISBN-13, with or without hyphens. All ISBNs are
    /// validated before any lookup is made and the first failed lookup stops the command.
    Lookup {
        /// The ISBNs to look up
        ///
        /// When none are given and the interact flag is set then the ISBN is prompted for.
        isbns: Vec<String>,
    },

    /// Check that ISBNs are well formed without looking them up
    #[clap(arg_required_else_help = true)]
    Check {
        /// The ISBNs to check
        isbns: Vec<String>,
    },
}

#[derive(ArgEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// One "Field: value" line per field
    Plain,
    /// A JSON array of records
    Json,
}

impl Commands {
    pub fn execute(self, opts: &GlobalOpts) -> Result<String> {
        match self {
            Commands::Lookup { isbns } => {
                let isbns = if isbns.is_empty() && opts.interact {
                    vec![interact::user_isbn()?]
                } else if isbns.is_empty() {
                    return Err(eyre!(
                        "No ISBN given - pass at least one ISBN or use the --interact flag"
                    ));
                } else {
                    isbns
                };

                let isbns = parse_isbns(&isbns)?;
                let records = lookup(&isbns, opts.base_url.as_deref())?;
                let rendered = render(&records, opts.format)?;

                if let Some(path) = &opts.output {
                    file::write_output(path, &rendered)?;
                    Ok(format!(
                        "Wrote {} record(s) to '{}'",
                        records.len(),
                        path.display()
                    ))
                } else {
                    Ok(rendered)
                }
            }
            Commands::Check { isbns } => Ok(parse_isbns(&isbns)?
                .iter()
                .map(|isbn| format!("{isbn}: {}", isbn.kind()))
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }
}

fn parse_isbns(isbns: &[String]) -> Result<Vec<Isbn>> {
    isbns
        .iter()
        .map(|isbn| {
            Isbn::parse(isbn).wrap_err_with(|| format!("'{isbn}' is not a valid ISBN"))
        })
        .collect()
}

fn lookup(isbns: &[Isbn], base_url: Option<&str>) -> Result<Vec<BookRecord>> {
    let mut transport: OpenLibrary = OpenLibrary::default();
    if let Some(base_url) = base_url {
        trace!("'base-url' option used with value of '{base_url}'");
        transport = transport.with_base_url(base_url);
    }

    isbns
        .iter()
        .map(|isbn| {
            info!("Looking up ISBN '{isbn}'");
            bookmeta::load_with(isbn.as_str(), &transport)
                .wrap_err_with(|| format!("Failed to look up ISBN '{isbn}'"))
        })
        .collect()
}

fn render(records: &[BookRecord], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Plain => Ok(records
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Json => {
            serde_json::to_string_pretty(records).wrap_err("Cannot serialize records to JSON")
        }
    }
}
