use clap::Parser;
use directories::ProjectDirs;
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;
use varcart::api::{ConfigAction, VarcartApi};
use varcart::config::{OutputFormat, VarcartConfig};
use varcart::error::{Result, VarcartError};
use varcart::store::fs::FileStore;

mod args;
mod print;
use args::{Assignment, CatalogCommands, Cli, Commands, FieldEdit, ProductCommands};
use print::{
    print_catalog, print_json, print_messages, print_product, print_products, print_table,
};

const HOME_ENV: &str = "VARCART_HOME";
const LOG_ENV: &str = "VARCART_LOG";

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr. `VARCART_LOG` takes an `EnvFilter` directive; otherwise
/// only warnings show, or debug output with `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .with_env_var(LOG_ENV)
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

struct AppContext {
    api: VarcartApi<FileStore>,
    output: OutputFormat,
}

fn run(cli: Cli) -> Result<()> {
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Commands::Catalog { action } => handle_catalog(&mut ctx, action),
        Commands::Generate { factors } => handle_generate(&ctx, factors),
        Commands::Product { action } => handle_product(&mut ctx, action),
        Commands::Config { key, value } => handle_config(&ctx, key, value),
    }
}

fn resolve_data_dir(cli: &Cli) -> Result<PathBuf> {
    if let Some(dir) = &cli.dir {
        return Ok(dir.clone());
    }
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|h| !h.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "varcart", "varcart")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| VarcartError::Api("Could not determine data directory".into()))
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = resolve_data_dir(cli)?;
    tracing::debug!(dir = %data_dir.display(), "using data directory");

    let config = VarcartConfig::load(&data_dir)?;
    let output = if cli.json {
        OutputFormat::Json
    } else {
        config.output
    };

    let store = FileStore::new(data_dir.clone());
    Ok(AppContext {
        api: VarcartApi::new(store, data_dir),
        output,
    })
}

fn handle_catalog(ctx: &mut AppContext, action: CatalogCommands) -> Result<()> {
    let result = match action {
        CatalogCommands::List { search } => {
            let result = ctx.api.list_catalog(search.as_deref())?;
            if let Some(catalog) = &result.catalog {
                match ctx.output {
                    OutputFormat::Json => print_json(catalog)?,
                    OutputFormat::Table => print_catalog(catalog),
                }
            }
            result
        }
        CatalogCommands::AddType { name } => ctx.api.add_attribute_type(&name)?,
        CatalogCommands::AddValue {
            type_name,
            name,
            color_code,
        } => ctx
            .api
            .add_attribute_value(&type_name, name.as_deref(), color_code.as_deref())?,
        CatalogCommands::Enable { type_name, value } => {
            ctx.api
                .set_attribute_active(&type_name, value.as_deref(), true)?
        }
        CatalogCommands::Disable { type_name, value } => {
            ctx.api
                .set_attribute_active(&type_name, value.as_deref(), false)?
        }
        CatalogCommands::Remove { type_name, value } => {
            ctx.api.remove_attribute(&type_name, value.as_deref())?
        }
    };
    print_messages(&result.messages);
    Ok(())
}

fn handle_generate(ctx: &AppContext, factors: Vec<Assignment>) -> Result<()> {
    let factors: Vec<(String, Vec<String>)> = factors
        .into_iter()
        .map(|a| (a.type_name, a.values))
        .collect();
    let (selection, rows) = ctx.api.generate_preview(&factors)?;
    match ctx.output {
        OutputFormat::Json => print_json(&rows),
        OutputFormat::Table => {
            print_table(selection.types(), &rows);
            Ok(())
        }
    }
}

fn handle_product(ctx: &mut AppContext, action: ProductCommands) -> Result<()> {
    match action {
        ProductCommands::New { title } => {
            let result = ctx.api.create_product(&title)?;
            print_messages(&result.messages);
        }
        ProductCommands::List => {
            let result = ctx.api.list_products()?;
            match ctx.output {
                OutputFormat::Json => print_json(&result.products)?,
                OutputFormat::Table => print_products(&result.products),
            }
            print_messages(&result.messages);
        }
        ProductCommands::Show { id } => {
            let result = ctx.api.get_product(&id)?;
            for product in &result.products {
                match ctx.output {
                    OutputFormat::Json => print_json(product)?,
                    OutputFormat::Table => print_product(product),
                }
            }
        }
        ProductCommands::Delete { id } => {
            let result = ctx.api.delete_product(&id)?;
            print_messages(&result.messages);
        }
        ProductCommands::Edit {
            id,
            types,
            values,
            edits,
        } => handle_edit(ctx, id, types, values, edits)?,
    }
    Ok(())
}

/// Applies type selection, then value selections, then row edits, and saves.
fn handle_edit(
    ctx: &mut AppContext,
    id: Uuid,
    types: Option<Vec<String>>,
    values: Vec<Assignment>,
    edits: Vec<FieldEdit>,
) -> Result<()> {
    let mut session = ctx.api.open_session(&id)?;

    if let Some(types) = types {
        session.select_types(types)?;
    }
    for assignment in values {
        session.select_values(&assignment.type_name, assignment.values)?;
    }
    for edit in edits {
        session.set_field_input(edit.key, edit.field, &edit.value)?;
    }

    let result = ctx.api.save_session(&session)?;
    match ctx.output {
        OutputFormat::Json => print_json(session.rows())?,
        OutputFormat::Table => print_table(session.selection().types(), session.rows()),
    }
    print_messages(&result.messages);
    ctx.api.close_session(session)
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };

    let show_all = matches!(action, ConfigAction::ShowAll);
    let result = ctx.api.config(action)?;
    if show_all {
        if let Some(config) = &result.config {
            for key in VarcartConfig::KEYS {
                if let Some(value) = config.get(key) {
                    println!("{} = {}", key, value);
                }
            }
        }
    }
    print_messages(&result.messages);
    Ok(())
}
