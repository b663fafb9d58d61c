mod render;
mod tui;

use std::collections::HashMap;

use anyhow::{anyhow, Result};
use clap::Parser;
use matriz_core::{
    normalize_fields, parse_args, parse_clock_time, parse_stay_date, FileCollaboratorRepository,
    FilePerDiemRepository, PerDiemRequest, RateService, RequestService, StayInterval,
};

#[derive(Parser)]
#[command(name = "matriz")]
#[command(about = "Per-diem requests and collaborator rates", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Manage the collaborator registry
    Collab {
        #[command(subcommand)]
        command: CollabCommands,
    },
    /// Create a request (usage: add "Requester" collab:Ana from:2024-02-01 to:2024-02-03 start:08:00 end:18:00 dest:Salvador)
    Add {
        /// Requester name plus stay fields (key:value)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// List all requests
    List,
    /// Show one request with its accrual breakdown
    Show {
        /// Request id or unique id prefix
        id: String,
    },
    /// Edit request fields (key:value); the accrual is recomputed
    Edit {
        /// Request id or unique id prefix
        id: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Delete a request
    Delete {
        /// Request id or unique id prefix
        id: String,
    },
    /// Compute an accrual without saving (same stay keys as add)
    Quote {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Open the Terminal User Interface
    Tui,
}

#[derive(clap::Subcommand)]
enum CollabCommands {
    /// Register a collaborator (usage: add "Name" daily:150 overnight:50 role:Motorista)
    Add {
        /// Collaborator name plus rate fields (key:value)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// List collaborators and their rates
    List,
}

const REQUEST_KEYS: [&str; 8] = ["collab", "from", "to", "start", "end", "dest", "note", "cc"];
const COLLAB_KEYS: [&str; 3] = ["daily", "overnight", "role"];

fn main() -> Result<()> {
    let cli = Cli::parse();

    let request_repo = FilePerDiemRepository::new(None)?;
    let collaborator_repo = FileCollaboratorRepository::new(None)?;
    let rates = RateService::new(collaborator_repo.clone());
    let requests = RequestService::new(request_repo, collaborator_repo);

    match cli.command {
        Some(Commands::Collab { command }) => match command {
            CollabCommands::Add { args } => collab_add(&rates, &args)?,
            CollabCommands::List => render::show_collaborators(rates.list()?),
        },
        Some(Commands::Add { args }) => add_request(&requests, &rates, &args)?,
        Some(Commands::List) => render::show_requests(requests.list()?),
        Some(Commands::Show { id }) => {
            let request = requests.find(&id)?;
            render::show_request_detail(&requests.get_dto(&request.id)?);
        }
        Some(Commands::Edit { id, args }) => edit_request(&requests, &rates, &id, &args)?,
        Some(Commands::Delete { id }) => {
            let request = requests.find(&id)?;
            requests.delete(&request.id)?;
            println!("Request {} deleted.", short_id(&request.id.to_string()));
        }
        Some(Commands::Quote { args }) => quote_request(&requests, &rates, &args)?,
        Some(Commands::Tui) | None => tui::run()?,
    }
    Ok(())
}

fn collab_add(
    rates: &RateService<FileCollaboratorRepository>,
    args: &[String],
) -> Result<()> {
    let parsed = parse_args(args);
    if parsed.text.is_empty() {
        println!("Error: Collaborator name is required.");
        return Ok(());
    }

    let (fields, warnings) = normalize_fields(parsed.fields, &COLLAB_KEYS);
    for warning in warnings {
        println!("Warning: {}", warning);
    }

    let daily = parse_rate_field(&fields, "daily")?;
    let overnight = parse_rate_field(&fields, "overnight")?;
    let role = fields.get("role").cloned();

    let collaborator = rates.register(parsed.text, role, daily, overnight)?;
    println!(
        "Collaborator added: {} (ID: {})",
        collaborator.name, collaborator.id
    );
    let rates = collaborator.effective_rates();
    if rates.is_eligible() {
        println!(
            "  Rates: daily {:.2}, overnight {:.2}",
            rates.daily_rate, rates.overnight_rate
        );
    } else {
        println!("  No per-diem rates configured (not eligible).");
    }
    Ok(())
}

fn add_request(
    requests: &RequestService<FilePerDiemRepository, FileCollaboratorRepository>,
    rates: &RateService<FileCollaboratorRepository>,
    args: &[String],
) -> Result<()> {
    let parsed = parse_args(args);
    if parsed.text.is_empty() {
        println!("Error: Requester name is required.");
        return Ok(());
    }

    let (fields, warnings) = normalize_fields(parsed.fields, &REQUEST_KEYS);
    for warning in warnings {
        println!("Warning: {}", warning);
    }

    let collaborator = rates.find(
        fields
            .get("collab")
            .ok_or_else(|| anyhow!("Missing collab:<name or id>"))?,
    )?;
    let stay = stay_from_fields(&fields)?;
    let destination = fields
        .get("dest")
        .cloned()
        .ok_or_else(|| anyhow!("Missing dest:<destination>"))?;

    let mut request = PerDiemRequest::new(parsed.text, collaborator.id, stay, destination);
    request.note = fields.get("note").cloned();
    request.cost_center = fields.get("cc").cloned();

    let created = requests.create(request)?;
    println!(
        "Request added for {}: {} (ID: {})",
        collaborator.name,
        created.destination,
        short_id(&created.id.to_string())
    );
    render::print_accrual(&created.accrual);
    Ok(())
}

fn edit_request(
    requests: &RequestService<FilePerDiemRepository, FileCollaboratorRepository>,
    rates: &RateService<FileCollaboratorRepository>,
    id: &str,
    args: &[String],
) -> Result<()> {
    let mut request = requests.find(id)?;

    let parsed = parse_args(args);
    if !parsed.text.is_empty() {
        request.requester = parsed.text;
    }

    let (fields, warnings) = normalize_fields(parsed.fields, &REQUEST_KEYS);
    for warning in warnings {
        println!("Warning: {}", warning);
    }

    if let Some(reference) = fields.get("collab") {
        request.collaborator_id = rates.find(reference)?.id;
    }
    if let Some(value) = fields.get("from") {
        request.stay.start_date = parse_stay_date(value)?;
    }
    if let Some(value) = fields.get("to") {
        request.stay.end_date = parse_stay_date(value)?;
    }
    if let Some(value) = fields.get("start") {
        request.stay.start_time = parse_clock_time(value)?;
    }
    if let Some(value) = fields.get("end") {
        request.stay.end_time = parse_clock_time(value)?;
    }
    if let Some(value) = fields.get("dest") {
        request.destination = value.clone();
    }
    if let Some(value) = fields.get("note") {
        request.note = Some(value.clone());
    }
    if let Some(value) = fields.get("cc") {
        request.cost_center = Some(value.clone());
    }

    requests.update(&mut request)?;
    println!("Request {} updated.", short_id(&request.id.to_string()));
    render::print_accrual(&request.accrual);
    Ok(())
}

fn quote_request(
    requests: &RequestService<FilePerDiemRepository, FileCollaboratorRepository>,
    rates: &RateService<FileCollaboratorRepository>,
    args: &[String],
) -> Result<()> {
    let parsed = parse_args(args);
    let (fields, warnings) = normalize_fields(parsed.fields, &REQUEST_KEYS);
    for warning in warnings {
        println!("Warning: {}", warning);
    }

    let collaborator = rates.find(
        fields
            .get("collab")
            .ok_or_else(|| anyhow!("Missing collab:<name or id>"))?,
    )?;
    let stay = stay_from_fields(&fields)?;

    let accrual = requests.quote(&collaborator.id, &stay)?;
    println!("Quote for {}:", collaborator.name);
    render::print_accrual(&accrual);
    Ok(())
}

fn stay_from_fields(fields: &HashMap<String, String>) -> Result<StayInterval> {
    let start_date = parse_stay_date(
        fields
            .get("from")
            .ok_or_else(|| anyhow!("Missing from:YYYY-MM-DD"))?,
    )?;
    let end_date = parse_stay_date(
        fields
            .get("to")
            .ok_or_else(|| anyhow!("Missing to:YYYY-MM-DD"))?,
    )?;
    let start_time = parse_clock_time(
        fields
            .get("start")
            .ok_or_else(|| anyhow!("Missing start:HH:MM"))?,
    )?;
    let end_time = parse_clock_time(
        fields
            .get("end")
            .ok_or_else(|| anyhow!("Missing end:HH:MM"))?,
    )?;
    Ok(StayInterval::new(start_date, start_time, end_date, end_time))
}

fn parse_rate_field(fields: &HashMap<String, String>, key: &str) -> Result<Option<f64>> {
    match fields.get(key) {
        Some(value) => {
            let rate: f64 = value
                .parse()
                .map_err(|_| anyhow!("Invalid {} rate '{}'", key, value))?;
            Ok(Some(rate))
        }
        None => Ok(None),
    }
}

fn short_id(id: &str) -> &str {
    if id.len() > 8 {
        &id[..8]
    } else {
        id
    }
}
