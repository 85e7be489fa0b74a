use crate::app::cli::{help_text, parse_cli_verb, CliVerb};

pub mod assistant;
pub mod routes;

pub fn run_cli(args: Vec<String>) -> Result<String, String> {
    if args.is_empty() {
        return Ok(help_text());
    }

    match parse_cli_verb(args[0].as_str()) {
        CliVerb::Resolve => routes::cmd_resolve(&args[1..]),
        CliVerb::Validate => routes::cmd_validate(&args[1..]),
        CliVerb::Normalize => routes::cmd_normalize(&args[1..]),
        CliVerb::Routes => routes::cmd_routes(),
        CliVerb::Context => assistant::cmd_context(),
        CliVerb::Ask => assistant::cmd_ask(&args[1..]),
        CliVerb::Help => Ok(help_text()),
        CliVerb::Unknown => Err(format!("unknown command `{}`", args[0])),
    }
}
