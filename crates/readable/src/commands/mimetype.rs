//! Mimetype command: check a type against the allow-list.

use clap::Args;
use owo_colors::Style;
use serde::Serialize;
use tracing::{debug, instrument};

use readable_core::mimetype::{
    SUPPORTED_MIMETYPES, is_mimetype_supported, mimetype_without_parameters,
};

use super::paint;

/// Arguments for the `mimetype` subcommand.
#[derive(Args, Debug)]
pub struct MimetypeArgs {
    /// Mimetype or `Content-Type` header value. Omit to list supported types.
    pub mimetype: Option<String>,
}

#[derive(Debug, Serialize)]
struct MimetypeReport<'a> {
    mimetype: &'a str,
    supported: bool,
}

/// Report whether a mimetype can be scored, or list the supported types.
#[instrument(name = "cmd_mimetype", skip_all)]
pub fn cmd_mimetype(args: MimetypeArgs, global_json: bool) -> anyhow::Result<()> {
    debug!(mimetype = ?args.mimetype, "executing mimetype command");

    let Some(ref raw) = args.mimetype else {
        if global_json {
            println!("{}", serde_json::to_string_pretty(SUPPORTED_MIMETYPES)?);
        } else {
            for mimetype in SUPPORTED_MIMETYPES {
                println!("{mimetype}");
            }
        }
        return Ok(());
    };

    let report = check(raw);
    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if report.supported {
        println!("{} {}", paint("supported:", Style::new().green()), report.mimetype);
    } else {
        let label = paint("not supported:", Style::new().yellow());
        println!("{label} {}", report.mimetype);
    }

    Ok(())
}

fn check(raw: &str) -> MimetypeReport<'_> {
    let mimetype = mimetype_without_parameters(raw);
    MimetypeReport {
        mimetype,
        supported: is_mimetype_supported(mimetype),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_parameters_before_checking() {
        let report = check("text/html; charset=utf-8");
        assert_eq!(report.mimetype, "text/html");
        assert!(report.supported);

        let report = check("application/json; charset=utf-8");
        assert_eq!(report.mimetype, "application/json");
        assert!(!report.supported);
    }

    #[test]
    fn listing_succeeds() {
        assert!(cmd_mimetype(MimetypeArgs { mimetype: None }, true).is_ok());
    }
}
