use clap::{Parser, Subcommand};
use std::path::PathBuf;
use uuid::Uuid;
use varcart::table::RowField;

/// "0.3.2" for releases, "0.3.2@abc1234" for builds off a development checkout.
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("VARCART_GIT_HASH");
    const IS_RELEASE: &str = env!("VARCART_IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{}", VERSION, GIT_HASH)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "varcart", version = get_version())]
#[command(about = "Product variant matrix: attribute combinations with price and stock", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Data directory (default: $VARCART_HOME, then the platform data dir)
    #[arg(long, global = true, value_name = "PATH")]
    pub dir: Option<PathBuf>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output (debug logs on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage attribute types and values
    #[command(alias = "c")]
    Catalog {
        #[command(subcommand)]
        action: CatalogCommands,
    },

    /// Preview the combination table for ad-hoc values (nothing is stored)
    #[command(alias = "g")]
    Generate {
        /// Attribute values, in column order (e.g. --select Size=S,M --select Color=Red)
        #[arg(long = "select", value_name = "TYPE=V1,V2", required = true, value_parser = parse_assignment)]
        factors: Vec<Assignment>,
    },

    /// Manage products and their variant tables
    #[command(alias = "p")]
    Product {
        #[command(subcommand)]
        action: ProductCommands,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (inactive-values, output)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum CatalogCommands {
    /// List attribute types and their values
    #[command(alias = "ls")]
    List {
        /// Search term (name, type, status or date)
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Add an attribute type
    AddType { name: String },

    /// Add a value to an attribute type
    AddValue {
        /// Attribute type the value belongs to
        type_name: String,

        /// Value name (defaults to the color code)
        name: Option<String>,

        /// Swatch color code, e.g. #ff0000
        #[arg(long)]
        color_code: Option<String>,
    },

    /// Activate a type, or one of its values
    Enable {
        type_name: String,
        value: Option<String>,
    },

    /// Deactivate a type, or one of its values
    Disable {
        type_name: String,
        value: Option<String>,
    },

    /// Remove a value, or a type with all its values
    #[command(alias = "rm")]
    Remove {
        type_name: String,
        value: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProductCommands {
    /// Create a product
    #[command(alias = "n")]
    New { title: String },

    /// List products
    #[command(alias = "ls")]
    List,

    /// Show a product and its variant table
    #[command(alias = "v")]
    Show { id: Uuid },

    /// Delete a product and its variant table
    #[command(alias = "rm")]
    Delete { id: Uuid },

    /// Change a product's selection and inventory, then save
    #[command(alias = "e")]
    Edit {
        id: Uuid,

        /// Selected attribute types, in column order
        #[arg(long, value_delimiter = ',', value_name = "T1,T2")]
        types: Option<Vec<String>>,

        /// Chosen values for a selected type (repeatable)
        #[arg(long = "values", value_name = "TYPE=V1,V2", value_parser = parse_assignment)]
        values: Vec<Assignment>,

        /// Row edit, by row key (repeatable), e.g. --set 3:stock=15
        #[arg(long = "set", value_name = "KEY:FIELD=VALUE", value_parser = parse_field_edit)]
        edits: Vec<FieldEdit>,
    },
}

/// `TYPE=V1,V2` on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub type_name: String,
    pub values: Vec<String>,
}

/// `KEY:FIELD=VALUE` on the command line. The value stays raw text so the
/// session coerces it like any other typed input.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldEdit {
    pub key: usize,
    pub field: RowField,
    pub value: String,
}

fn parse_assignment(s: &str) -> Result<Assignment, String> {
    let (type_name, values) = s
        .split_once('=')
        .ok_or_else(|| format!("expected TYPE=V1,V2, got '{s}'"))?;
    let type_name = type_name.trim();
    if type_name.is_empty() {
        return Err(format!("missing attribute type in '{s}'"));
    }
    let values = values
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect();
    Ok(Assignment {
        type_name: type_name.to_string(),
        values,
    })
}

fn parse_field_edit(s: &str) -> Result<FieldEdit, String> {
    let (target, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY:FIELD=VALUE, got '{s}'"))?;
    let (key, field) = target
        .split_once(':')
        .ok_or_else(|| format!("expected KEY:FIELD=VALUE, got '{s}'"))?;
    let key = key
        .trim()
        .parse::<usize>()
        .map_err(|_| format!("invalid row key '{key}'"))?;
    let field = field.parse::<RowField>().map_err(|e| e.to_string())?;
    Ok(FieldEdit {
        key,
        field,
        value: value.to_string(),
    })
}
