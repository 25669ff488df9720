use std::{
    io::{self, BufRead, Write},
    path::Path,
    process::ExitCode,
};

use clap::Parser;
use engine::{EditSession, Engine, FilterInput, FilterSpec, SortState, create_backup};

use cli::{BranchesCommand, Cli, Command};
use settings::Settings;

mod cli;
mod error;
mod render;
mod settings;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let settings = match settings::load(&cli) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "prodtrack={level},engine={level}",
            level = settings.log_level
        ))
        .with_writer(io::stderr)
        .init();

    match run(cli.command, &settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn open_engine(settings: &Settings) -> error::Result<Engine> {
    let db = sea_orm::Database::connect(settings.database_url()).await?;
    let engine = Engine::builder().database(db).build().await?;
    tracing::debug!(database = %settings.database, "store opened");
    Ok(engine)
}

fn filter(input: impl Into<FilterInput>) -> error::Result<FilterSpec> {
    Ok(FilterSpec::parse(&input.into())?)
}

fn confirm(prompt: &str) -> error::Result<bool> {
    let mut out = io::stderr();
    write!(out, "{prompt} [y/N] ")?;
    out.flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "s" | "S"))
}

async fn run(command: Command, settings: &Settings) -> error::Result<()> {
    if let Command::Backup = command {
        if settings.is_memory() {
            tracing::warn!("in-memory store, nothing to back up");
            return Ok(());
        }
        let at = chrono::Local::now().naive_local();
        let path = create_backup(
            Path::new(&settings.database),
            Path::new(&settings.backup_dir),
            at,
        )?;
        println!("backup written to {}", path.display());
        return Ok(());
    }

    let engine = open_engine(settings).await?;

    match command {
        Command::Register(record) => {
            let id = engine
                .submit(&record.into_input(), EditSession::New)
                .await?;
            println!("record {id} registered");
        }
        Command::Edit { id, record } => {
            let mut input = engine.record(id).await?.to_input();
            record.apply_to(&mut input);
            engine.submit(&input, EditSession::Editing(id)).await?;
            println!("record {id} updated");
        }
        Command::Show { id } => {
            let record = engine.record(id).await?;
            print!("{}", render::record_detail(&record));
        }
        Command::List { filter: args, sort } => {
            let spec = filter(args)?;
            let mut records = engine.list_records(&spec).await?;
            let mut state = SortState::default();
            for column in sort {
                let direction = state.apply(&mut records, column.into());
                tracing::debug!(?column, ?direction, "rows sorted");
            }
            print!("{}", render::records_table(&records));
        }
        Command::Report(args) => {
            let spec = filter(args)?;
            let report = engine.report(&spec).await?;
            print!("{}", render::report(&report));
        }
        Command::Export {
            filter: args,
            output,
        } => {
            let spec = filter(args)?;
            let written = engine.export_to_path(&spec, &output).await?;
            println!("{written} record(s) exported to {}", output.display());
        }
        Command::Delete { id, yes } => {
            let record = engine.record(id).await?;
            if !yes
                && !confirm(&format!(
                    "delete record {id} ({} {} R$ {})?",
                    record.collaborator,
                    record.display_date(),
                    record.amount
                ))?
            {
                println!("nothing deleted");
                return Ok(());
            }
            engine.delete_record(id).await?;
            println!("record {id} deleted");
        }
        Command::Branches(branches) => match branches.command {
            BranchesCommand::List => {
                for branch in engine.branches().await? {
                    println!("{branch}");
                }
            }
            BranchesCommand::Add { name } => {
                let name = engine.add_branch(&name).await?;
                println!("branch {name} added");
            }
        },
        Command::Backup => {}
    }

    Ok(())
}
