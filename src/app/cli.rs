#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliVerb {
    Resolve,
    Validate,
    Normalize,
    Routes,
    Context,
    Ask,
    Help,
    Unknown,
}

pub fn parse_cli_verb(input: &str) -> CliVerb {
    match input {
        "resolve" => CliVerb::Resolve,
        "validate" => CliVerb::Validate,
        "normalize" => CliVerb::Normalize,
        "routes" => CliVerb::Routes,
        "context" => CliVerb::Context,
        "ask" => CliVerb::Ask,
        "help" | "--help" | "-h" => CliVerb::Help,
        _ => CliVerb::Unknown,
    }
}

pub fn cli_help_lines() -> Vec<String> {
    vec![
        "Commands:".to_string(),
        "  resolve <action-json>                Resolve an assistant action to a route"
            .to_string(),
        "  validate <route>                     Check a route against the allow-list".to_string(),
        "  normalize <route>                    Print the canonical spelling of a route"
            .to_string(),
        "  routes                               List allowed routes and parametric collections"
            .to_string(),
        "  context                              Fetch the assistant context as JSON".to_string(),
        "  ask <message>                        Send a chat message and resolve its actions"
            .to_string(),
        "  help                                 Show this help".to_string(),
    ]
}

pub fn environment_help_lines() -> Vec<String> {
    vec![
        "Environment:".to_string(),
        "  AGENTNAV_CONFIG                      Router settings file (default ~/.agentnav/router.yaml)"
            .to_string(),
        "  AGENTNAV_API_BASE                    Assistant api base url".to_string(),
        "  AGENTNAV_API_TOKEN                   Bearer token for the assistant api".to_string(),
    ]
}

pub(crate) fn help_text() -> String {
    let mut lines = cli_help_lines();
    lines.push(String::new());
    lines.extend(environment_help_lines());
    lines.join("\n")
}
