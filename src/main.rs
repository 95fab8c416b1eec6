//! # Staysheet CLI
//!
//! Usage:
//!   staysheet export --hotel-json hotel.json [--proposal-json proposal.json]
//!   staysheet export --hotel-id 7 --out-dir out/
//!   staysheet export-all --city Paris
//!   staysheet hotels --stars 4 --sort name --order desc
//!   staysheet proposals
//!   staysheet create-proposal --hotel-id 7 --proposal-json proposal.json
//!   staysheet delete-proposal 12

use std::fs;
use std::path::{Path, PathBuf};

use clap::{ArgGroup, Parser, Subcommand, ValueEnum};

use staysheet::{
    export_hotel_document, render_all_hotels, Config, HotelFilter, HotelRecord, HotelSort,
    NewProposal, ProposalDraft, Result, SortKey, SortOrder,
};

#[derive(Parser)]
#[command(name = "staysheet")]
#[command(version)]
#[command(about = "Export hotel information and stay proposals as PDF", long_about = None)]
struct Cli {
    /// JSON config file (apiUrl, outDir, imageLimit, timeoutSecs)
    #[arg(long, global = true, env = "STAYSHEET_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Hotel API base URL
    #[arg(long, global = true, env = "STAYSHEET_API_URL")]
    api_url: Option<String>,

    /// Directory PDFs are written to
    #[arg(long, global = true, env = "STAYSHEET_OUT_DIR", value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// Maximum number of images fetched per hotel
    #[arg(long, global = true, env = "STAYSHEET_IMAGE_LIMIT")]
    image_limit: Option<u32>,

    /// HTTP request timeout in seconds
    #[arg(long, global = true, env = "STAYSHEET_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export one hotel, with an optional proposal, to <name>-proposal.pdf
    #[command(group(ArgGroup::new("hotel").required(true).args(["hotel_json", "hotel_id"])))]
    Export {
        /// Hotel record as JSON
        #[arg(long, value_name = "FILE")]
        hotel_json: Option<PathBuf>,

        /// Look the hotel up in the API by id
        #[arg(long, value_name = "ID")]
        hotel_id: Option<u64>,

        /// Proposal draft as JSON
        #[arg(long, value_name = "FILE")]
        proposal_json: Option<PathBuf>,
    },

    /// Export every hotel to all-hotels.pdf
    ExportAll {
        #[arg(long)]
        city: Option<String>,
    },

    /// List hotels
    Hotels {
        /// City (substring, case-insensitive)
        #[arg(long)]
        city: Option<String>,

        /// Exact star rating
        #[arg(long)]
        stars: Option<u8>,

        /// Group name (substring, case-insensitive)
        #[arg(long)]
        group: Option<String>,

        /// Order the listing by this field (API order when unset)
        #[arg(long, value_enum)]
        sort: Option<SortField>,

        /// Sort direction, used with --sort
        #[arg(long, value_enum, default_value = "asc")]
        order: Direction,
    },

    /// List proposals
    Proposals,

    /// Save a proposal draft against a hotel
    CreateProposal {
        #[arg(long, value_name = "ID")]
        hotel_id: u64,

        /// Proposal draft as JSON
        #[arg(long, value_name = "FILE")]
        proposal_json: PathBuf,
    },

    /// Delete a proposal
    DeleteProposal {
        #[arg(value_name = "ID")]
        id: u64,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum SortField {
    Name,
    City,
    Stars,
}

impl From<SortField> for SortKey {
    fn from(field: SortField) -> Self {
        match field {
            SortField::Name => SortKey::Name,
            SortField::City => SortKey::City,
            SortField::Stars => SortKey::Stars,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Direction {
    Asc,
    Desc,
}

impl From<Direction> for SortOrder {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Asc => SortOrder::Asc,
            Direction::Desc => SortOrder::Desc,
        }
    }
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("✗ {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli)?;
    let client = config.client()?;

    match cli.command {
        Commands::Export {
            hotel_json,
            hotel_id,
            proposal_json,
        } => {
            // clap's "hotel" group guarantees one of the two is set
            let hotel = match hotel_json {
                Some(path) => read_json::<HotelRecord>(&path)?,
                None => client.find_hotel(hotel_id.unwrap_or_default()).await?,
            };
            let proposal = match proposal_json {
                Some(path) => Some(read_json::<ProposalDraft>(&path)?),
                None => None,
            };
            let path =
                export_hotel_document(&hotel, proposal.as_ref(), &client, &config.out_dir).await?;
            eprintln!("✓ Written {}", path.display());
        }

        Commands::ExportAll { city } => {
            let hotels = client.list_hotels(city.as_deref()).await?;
            let document = render_all_hotels(&hotels, &client).await?;
            let path = document.save(&config.out_dir)?;
            eprintln!(
                "✓ Written {} hotel(s), {} page(s) to {}",
                hotels.len(),
                document.page_count,
                path.display()
            );
        }

        Commands::Hotels {
            city,
            stars,
            group,
            sort,
            order,
        } => {
            let hotels = client.list_hotels(None).await?;
            let filter = HotelFilter {
                city,
                stars,
                group_name: group,
            };
            let mut listed = filter.apply(&hotels);
            if let Some(field) = sort {
                let sort = HotelSort {
                    by: field.into(),
                    order: order.into(),
                };
                listed = sort.sort(listed);
            }
            for hotel in listed {
                print_hotel(hotel);
            }
        }

        Commands::Proposals => {
            for p in client.list_proposals().await? {
                let hotel = p.hotel.unwrap_or_default();
                println!(
                    "{}\t{}\t{}\t{} ({})\t{} -> {}\t{}",
                    p.id.map(|id| id.to_string()).unwrap_or_else(|| "-".into()),
                    p.proposal_number.as_deref().unwrap_or("-"),
                    p.client_name.as_deref().unwrap_or("-"),
                    hotel.name.as_deref().unwrap_or("-"),
                    hotel.city.as_deref().unwrap_or("-"),
                    p.check_in.as_deref().unwrap_or("-"),
                    p.check_out.as_deref().unwrap_or("-"),
                    p.price.map(|v| v.to_string()).unwrap_or_else(|| "-".into()),
                );
            }
        }

        Commands::CreateProposal {
            hotel_id,
            proposal_json,
        } => {
            let draft = read_json::<ProposalDraft>(&proposal_json)?;
            let created = client
                .create_proposal(&NewProposal::from_draft(hotel_id, &draft))
                .await?;
            eprintln!(
                "✓ Created proposal #{}",
                created.reference().unwrap_or_else(|| "-".into())
            );
        }

        Commands::DeleteProposal { id } => {
            client.delete_proposal(id).await?;
            eprintln!("✓ Deleted proposal {}", id);
        }
    }

    Ok(())
}

/// Config file first, then flags and environment on top.
fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(url) = &cli.api_url {
        config.api_url = url.clone();
    }
    if let Some(dir) = &cli.out_dir {
        config.out_dir = dir.clone();
    }
    if cli.image_limit.is_some() {
        config.image_limit = cli.image_limit;
    }
    if cli.timeout_secs.is_some() {
        config.timeout_secs = cli.timeout_secs;
    }
    Ok(config)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let json = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

fn print_hotel(hotel: &HotelRecord) {
    let stars = hotel
        .star_rating()
        .map(|s| "*".repeat(s as usize))
        .unwrap_or_else(|| "-".into());
    println!(
        "{}\t{}\t{}\t{}\t{}",
        hotel.id.map(|id| id.to_string()).unwrap_or_else(|| "-".into()),
        hotel.name.as_deref().unwrap_or("-"),
        hotel.city.as_deref().unwrap_or("-"),
        stars,
        hotel.group_name.as_deref().unwrap_or("-"),
    );
}
