//! Alunometa CLI - Command-line interface for the Alunometa REST API

mod output;

use alunometa_sdk::{
    AlunoPatch, AlunoRef, AlunometaClient, Area, ListQuery, MetaPatch, NewAluno, NewMeta,
};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;

const DEFAULT_API_URL: &str = "http://127.0.0.1:8080";

#[derive(Parser)]
#[command(name = "alunometa-cli")]
#[command(about = "Alunometa CLI - manage alunos and their metas", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// REST API base URL
    #[arg(long, env = "ALUNOMETA_API_URL", default_value = DEFAULT_API_URL, global = true)]
    api_url: String,

    /// Print raw JSON instead of tables
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the server is up
    Status,

    /// Manage alunos
    #[command(subcommand)]
    Alunos(AlunoCommand),

    /// Manage metas
    #[command(subcommand)]
    Metas(MetaCommand),
}

/// Filtering, paging and sorting shared by list commands
#[derive(Args)]
struct ListArgs {
    #[command(flatten)]
    filters: FilterArgs,

    /// Page number (0-based)
    #[arg(long)]
    page: Option<u32>,

    /// Page size
    #[arg(long)]
    size: Option<u32>,

    /// Sort order, e.g. `nome,desc` (repeatable)
    #[arg(long)]
    sort: Vec<String>,
}

#[derive(Args)]
struct FilterArgs {
    /// Criteria as field.operator=value, e.g. nome.contains=ana (repeatable)
    #[arg(short, long = "filter", value_parser = parse_filter)]
    filters: Vec<(String, String)>,
}

impl ListArgs {
    fn into_query(self) -> ListQuery {
        ListQuery {
            filters: self.filters.filters,
            page: self.page,
            size: self.size,
            sort: self.sort,
        }
    }
}

fn parse_filter(raw: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected field.operator=value, got '{}'", raw))?;
    if !key.contains('.') {
        return Err(format!("filter key '{}' must look like field.operator", key));
    }
    Ok((key.to_string(), value.to_string()))
}

#[derive(Subcommand)]
enum AlunoCommand {
    /// List alunos matching the filters
    List(ListArgs),

    /// Count alunos matching the filters
    Count(FilterArgs),

    /// Show one aluno
    Get { id: i64 },

    /// Create an aluno
    Create {
        #[arg(long)]
        nome: String,
        #[arg(long)]
        email: String,
        /// Birth date (YYYY-MM-DD)
        #[arg(long)]
        data_nascimento: NaiveDate,
        #[arg(long)]
        telefone: Option<String>,
    },

    /// Change the given fields of an aluno
    Update {
        id: i64,
        #[arg(long)]
        nome: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        data_nascimento: Option<NaiveDate>,
        #[arg(long)]
        telefone: Option<String>,
    },

    /// Delete an aluno (its metas are kept, detached)
    Delete { id: i64 },
}

#[derive(Subcommand)]
enum MetaCommand {
    /// List metas matching the filters
    List(ListArgs),

    /// Count metas matching the filters
    Count(FilterArgs),

    /// Show one meta
    Get { id: i64 },

    /// Create a meta
    Create {
        #[arg(long)]
        valor: i32,
        /// HUMANAS, NATUREZA, LINGUAGENS or MATEMATICA
        #[arg(long)]
        area: Area,
        #[arg(long)]
        descricao: Option<String>,
        /// Owning aluno id
        #[arg(long)]
        aluno_id: Option<i64>,
    },

    /// Change the given fields of a meta
    Update {
        id: i64,
        #[arg(long)]
        valor: Option<i32>,
        #[arg(long)]
        area: Option<Area>,
        #[arg(long)]
        descricao: Option<String>,
        #[arg(long)]
        aluno_id: Option<i64>,
    },

    /// Delete a meta
    Delete { id: i64 },
}

fn success(message: String) {
    println!("{}", format!("✓ {}", message).green().bold());
}

async fn run_alunos(client: &AlunometaClient, command: AlunoCommand, json: bool) -> Result<()> {
    match command {
        AlunoCommand::List(args) => {
            let listing = client.list_alunos(&args.into_query()).await?;
            if json {
                output::print_json(&listing.items)?;
            } else {
                output::print_listing(&listing, output::alunos_table);
            }
        }
        AlunoCommand::Count(args) => {
            println!("{}", client.count_alunos(&args.filters).await?);
        }
        AlunoCommand::Get { id } => {
            let aluno = client.get_aluno(id).await?;
            if json {
                output::print_json(&aluno)?;
            } else {
                println!("{}", output::alunos_table(&[aluno]));
            }
        }
        AlunoCommand::Create {
            nome,
            email,
            data_nascimento,
            telefone,
        } => {
            let mut new = NewAluno::new(nome, email, data_nascimento);
            new.telefone = telefone;
            let aluno = client.create_aluno(&new).await?;
            success(format!("Aluno {} created", aluno.id));
            if json {
                output::print_json(&aluno)?;
            } else {
                println!("{}", output::alunos_table(&[aluno]));
            }
        }
        AlunoCommand::Update {
            id,
            nome,
            email,
            data_nascimento,
            telefone,
        } => {
            let patch = AlunoPatch {
                id: Some(id),
                nome,
                email,
                data_nascimento,
                telefone,
            };
            let aluno = client.patch_aluno(id, &patch).await?;
            success(format!("Aluno {} updated", aluno.id));
            if json {
                output::print_json(&aluno)?;
            } else {
                println!("{}", output::alunos_table(&[aluno]));
            }
        }
        AlunoCommand::Delete { id } => {
            client.delete_aluno(id).await?;
            success(format!("Aluno {} deleted", id));
        }
    }
    Ok(())
}

async fn run_metas(client: &AlunometaClient, command: MetaCommand, json: bool) -> Result<()> {
    match command {
        MetaCommand::List(args) => {
            let listing = client.list_metas(&args.into_query()).await?;
            if json {
                output::print_json(&listing.items)?;
            } else {
                output::print_listing(&listing, output::metas_table);
            }
        }
        MetaCommand::Count(args) => {
            println!("{}", client.count_metas(&args.filters).await?);
        }
        MetaCommand::Get { id } => {
            let meta = client.get_meta(id).await?;
            if json {
                output::print_json(&meta)?;
            } else {
                println!("{}", output::metas_table(&[meta]));
            }
        }
        MetaCommand::Create {
            valor,
            area,
            descricao,
            aluno_id,
        } => {
            let mut new = NewMeta::new(valor, area);
            new.descricao = descricao;
            new.aluno = aluno_id.map(AlunoRef::new);
            let meta = client.create_meta(&new).await?;
            success(format!("Meta {} created", meta.id));
            if json {
                output::print_json(&meta)?;
            } else {
                println!("{}", output::metas_table(&[meta]));
            }
        }
        MetaCommand::Update {
            id,
            valor,
            area,
            descricao,
            aluno_id,
        } => {
            let patch = MetaPatch {
                id: Some(id),
                valor,
                area,
                descricao,
                aluno: aluno_id.map(AlunoRef::new),
            };
            let meta = client.patch_meta(id, &patch).await?;
            success(format!("Meta {} updated", meta.id));
            if json {
                output::print_json(&meta)?;
            } else {
                println!("{}", output::metas_table(&[meta]));
            }
        }
        MetaCommand::Delete { id } => {
            client.delete_meta(id).await?;
            success(format!("Meta {} deleted", id));
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = AlunometaClient::connect(&cli.api_url).context("Invalid API URL")?;

    match cli.command {
        Commands::Status => {
            println!("{}", "System Status".cyan().bold());
            println!();
            println!("  {} {}", "API URL:".bold(), cli.api_url);
            match client.health().await {
                Ok(true) => println!("  {} {}", "Status:".bold(), "ONLINE".green()),
                Ok(false) => println!("  {} {}", "Status:".bold(), "UNHEALTHY".yellow()),
                Err(e) => {
                    println!("  {} {}", "Status:".bold(), "OFFLINE".red());
                    println!("  {} {}", "Error:".bold(), e);
                }
            }
        }
        Commands::Alunos(command) => run_alunos(&client, command, cli.json).await?,
        Commands::Metas(command) => run_metas(&client, command, cli.json).await?,
    }

    Ok(())
}
