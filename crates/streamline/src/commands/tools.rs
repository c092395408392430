//! IPTV tool handlers: Xtream extraction and the customer message.

use serde::Serialize;

use streamline_core::{parse_xtream, welcome_message};

use crate::cli::{GlobalOpts, ToolsArgs, ToolsCommand};
use crate::error::CliError;
use crate::output;

/// Extracted login, with the password exposed for copying.
#[derive(Serialize)]
struct XtreamView {
    host: String,
    username: String,
    password: String,
}

#[derive(Serialize)]
struct MessageView {
    message: String,
}

fn placeholder(value: &str) -> &str {
    if value.is_empty() { "---" } else { value }
}

pub fn handle(args: ToolsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ToolsCommand::Xtream { link } => {
            let creds = parse_xtream(&link)?;
            let view = XtreamView {
                password: creds.password().to_owned(),
                host: creds.host,
                username: creds.username,
            };
            let out = output::render_single(
                global.output_format(),
                &view,
                |v| {
                    [
                        format!("Host:      {}", placeholder(&v.host)),
                        format!("Username:  {}", placeholder(&v.username)),
                        format!("Password:  {}", placeholder(&v.password)),
                    ]
                    .join("\n")
                },
                |v| format!("{}\n{}\n{}", v.host, v.username, v.password),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ToolsCommand::Message { link } => {
            let view = MessageView {
                message: welcome_message(link.as_deref()),
            };
            let out = output::render_single(
                global.output_format(),
                &view,
                |v| v.message.clone(),
                |v| v.message.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
