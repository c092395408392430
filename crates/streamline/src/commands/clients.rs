//! Client command handlers.

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tabled::Tabled;

use streamline_core::{
    Client, ClientDraft, ClientFilter, Command as CoreCommand, CommandResult,
    UpdateClientRequest,
};

use crate::cli::{ClientAddArgs, ClientEditArgs, ClientsArgs, ClientsCommand, GlobalOpts};
use crate::config::Config;
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ClientRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "WhatsApp")]
    phone: String,
    #[tabled(rename = "Package")]
    package: String,
    #[tabled(rename = "App")]
    app: String,
    #[tabled(rename = "Expires")]
    expires: String,
    #[tabled(rename = "Days")]
    days: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Price")]
    price: String,
}

struct RowStyle<'a> {
    now: DateTime<Utc>,
    currency: &'a str,
    color: bool,
}

impl ClientRow {
    fn new(c: &Client, style: &RowStyle<'_>) -> Self {
        Self {
            id: c.id.to_string(),
            name: c.full_name.clone(),
            email: c.email.clone(),
            phone: c.phone.clone(),
            package: c.package_type.to_string(),
            app: c.iptv_app.to_string(),
            expires: c.expiry_date.to_string(),
            days: c.days_remaining(style.now).to_string(),
            status: output::paint_status(c.status, style.color),
            price: output::money(style.currency, c.price),
        }
    }
}

fn detail(c: &Client, style: &RowStyle<'_>) -> String {
    let mut lines = vec![
        format!("ID:        {}", c.id),
        format!("Name:      {}", c.full_name),
        format!("Email:     {}", c.email),
        format!("WhatsApp:  {}", c.phone),
        format!("Package:   {}", c.package_type),
        format!("App:       {}", c.iptv_app),
    ];
    if c.iptv_app.requires_device_binding() {
        lines.push(format!(
            "MAC:       {}",
            c.mac_address.as_ref().map_or("-", |m| m.as_str())
        ));
        lines.push(format!(
            "Key:       {}",
            c.device_key.as_deref().unwrap_or("-")
        ));
    }
    lines.extend([
        format!("Start:     {}", c.start_date),
        format!("Duration:  {} months", c.duration_months),
        format!(
            "Expires:   {} ({} days)",
            c.expiry_date,
            c.days_remaining(style.now)
        ),
        format!("Status:    {}", output::paint_status(c.status, style.color)),
        format!("Price:     {}", output::money(style.currency, c.price)),
    ]);
    if c.is_status_stale(style.now) {
        lines.push(format!(
            "Note:      status is out of date (now {}); run `streamline clients refresh`",
            c.live_status(style.now)
        ));
    }
    lines.join("\n")
}

fn print_client(client: &Arc<Client>, cfg: &Config, global: &GlobalOpts) {
    let style = RowStyle {
        now: Utc::now(),
        currency: &cfg.business.currency,
        color: output::should_color(global.color_mode()),
    };
    let out = output::render_single(
        global.output_format(),
        client,
        |c| detail(c, &style),
        |c| c.id.to_string(),
    );
    output::print_output(&out, global.quiet);
}

fn stored_client(result: CommandResult) -> Result<Arc<Client>, CliError> {
    match result {
        CommandResult::Client(client) => Ok(client),
        other => Err(CliError::Io(std::io::Error::other(format!(
            "unexpected command result: {other:?}"
        )))),
    }
}

// ── Draft building ──────────────────────────────────────────────────

fn draft_from_args(args: ClientAddArgs, cfg: &Config) -> Result<ClientDraft, CliError> {
    let mut draft = ClientDraft::new(util::parse_date("start", args.start.as_deref())?);
    draft.full_name = args.name;
    draft.email = args.email;
    draft.phone = args.phone;
    draft.package_type = util::package_type(args.package);
    if let Some(app) = args.app.as_deref() {
        draft.iptv_app = util::iptv_app(app)?;
    }
    draft.duration_months =
        util::check_duration(args.duration.unwrap_or(cfg.business.default_duration))?;
    draft.price = match (args.price.as_deref(), args.preset) {
        (Some(raw), _) => util::parse_price(raw)?,
        (None, Some(n)) => util::preset_price(&cfg.business, n)?,
        (None, None) => cfg.business.default_price,
    };
    draft.mac_address = args.mac;
    draft.device_key = args.device_key;
    Ok(draft)
}

fn update_from_args(args: &ClientEditArgs, cfg: &Config) -> Result<UpdateClientRequest, CliError> {
    let price = match (args.price.as_deref(), args.preset) {
        (Some(raw), _) => Some(util::parse_price(raw)?),
        (None, Some(n)) => Some(util::preset_price(&cfg.business, n)?),
        (None, None) => None,
    };
    Ok(UpdateClientRequest {
        full_name: args.name.clone(),
        email: args.email.clone(),
        phone: args.phone.clone(),
        package_type: args.package.map(util::package_type),
        iptv_app: args.app.as_deref().map(util::iptv_app).transpose()?,
        start_date: args
            .start
            .as_deref()
            .map(|raw| util::parse_date("start", Some(raw)))
            .transpose()?,
        duration_months: args.duration.map(util::check_duration).transpose()?,
        price,
        mac_address: args.mac.clone(),
        device_key: args.device_key.clone(),
    })
}

// ── Handler ─────────────────────────────────────────────────────────

#[allow(clippy::too_many_lines)]
pub fn handle(
    args: ClientsArgs,
    data_file: &Path,
    cfg: &Config,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let mut session = util::open_session(data_file)?;

    match args.command {
        ClientsCommand::List(list) => {
            let filter = ClientFilter {
                search: list.search,
                status: list.status.map(util::status),
                package: list.package.map(util::package_type),
            };
            let snap = session.store().clients_snapshot();
            let clients = filter.apply(&snap);

            let style = RowStyle {
                now: session.now(),
                currency: &cfg.business.currency,
                color: output::should_color(global.color_mode()),
            };
            let out = output::render_list(
                global.output_format(),
                &clients,
                |c| ClientRow::new(c, &style),
                |c| c.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ClientsCommand::Get { client } => {
            let found = session.store().resolve(&client)?;
            print_client(&found, cfg, global);
            Ok(())
        }

        ClientsCommand::Add(add) => {
            let draft = draft_from_args(add, cfg)?;
            let client = stored_client(session.execute(CoreCommand::AddClient(draft))?)?;
            util::save_session(&session, data_file)?;

            output::print_notice(
                &format!("Client {} created ({})", client.full_name, client.id),
                global.quiet,
            );
            print_client(&client, cfg, global);
            Ok(())
        }

        ClientsCommand::Edit(edit) => {
            let update = update_from_args(&edit, cfg)?;
            if update.is_empty() {
                return Err(CliError::Validation {
                    field: "edit".into(),
                    reason: "no fields to change; pass at least one flag such as --name".into(),
                });
            }
            let id = session.store().resolve(&edit.client)?.id.clone();
            let client =
                stored_client(session.execute(CoreCommand::UpdateClient { id, update })?)?;
            util::save_session(&session, data_file)?;

            output::print_notice(&format!("Client {} updated", client.full_name), global.quiet);
            print_client(&client, cfg, global);
            Ok(())
        }

        ClientsCommand::Remove { client } => {
            let target = session.store().resolve(&client)?;
            if !util::confirm(
                &format!(
                    "Remove client {} ({})? This cannot be undone.",
                    target.full_name, target.email
                ),
                global.yes,
            )? {
                return Ok(());
            }
            session.execute(CoreCommand::RemoveClient {
                id: target.id.clone(),
            })?;
            util::save_session(&session, data_file)?;
            output::print_notice(&format!("Client {} removed", target.full_name), global.quiet);
            Ok(())
        }

        ClientsCommand::Refresh => {
            let result = session.execute(CoreCommand::RefreshStatuses)?;
            let updated = match result {
                CommandResult::Refreshed { updated } => updated,
                _ => 0,
            };
            if updated > 0 {
                util::save_session(&session, data_file)?;
            }
            output::print_notice(
                &format!("{updated} client status(es) updated"),
                global.quiet,
            );
            Ok(())
        }
    }
}
