use bites::commands::about;
use bites::model::Coordinates;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::OnceLock;

fn get_version() -> &'static str {
    static VERSION_STRING: OnceLock<String> = OnceLock::new();
    VERSION_STRING.get_or_init(about::version)
}

#[derive(Parser, Debug)]
#[command(name = "bites", bin_name = "bites", version = get_version())]
#[command(about = "A personal restaurant guide for the command line", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Where restaurants and config are kept [env: BITES_DATA_DIR]
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Fields of the add/edit form. Omitted fields keep their current value.
#[derive(Args, Debug, Default)]
pub struct FormArgs {
    #[arg(long)]
    pub name: Option<String>,

    /// Whole number, e.g. 1 to 5
    #[arg(long, allow_hyphen_values = true)]
    pub rating: Option<String>,

    /// Location as LAT,LNG
    #[arg(long, value_name = "LAT,LNG", allow_hyphen_values = true)]
    pub at: Option<Coordinates>,

    /// Phone number; pass "" to clear
    #[arg(long)]
    pub contact: Option<String>,

    /// Street address; pass "" to clear
    #[arg(long)]
    pub address: Option<String>,
}

/// Fill the form from a searched place.
#[derive(Args, Debug, Default)]
pub struct PlaceArgs {
    /// Look the restaurant up by name
    #[arg(long, value_name = "QUERY")]
    pub search: Option<String>,

    /// Which suggestion to use
    #[arg(long, default_value_t = 1, requires = "search")]
    pub pick: usize,

    /// Prefer results around LAT,LNG
    #[arg(long, value_name = "LAT,LNG", allow_hyphen_values = true)]
    pub near: Option<Coordinates>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List saved restaurants
    #[command(alias = "ls", display_order = 1)]
    List,

    /// Add a restaurant
    #[command(alias = "a", display_order = 2)]
    Add {
        #[command(flatten)]
        form: FormArgs,

        #[command(flatten)]
        place: PlaceArgs,
    },

    /// Edit a restaurant
    #[command(alias = "e", display_order = 3)]
    Edit {
        /// Id or list position
        selector: String,

        #[command(flatten)]
        form: FormArgs,

        #[command(flatten)]
        place: PlaceArgs,
    },

    /// Delete restaurants
    #[command(alias = "rm", display_order = 4)]
    Delete {
        /// Ids or list positions
        #[arg(required = true)]
        selectors: Vec<String>,
    },

    /// Show one restaurant
    #[command(alias = "show", display_order = 5)]
    Details {
        /// Id or list position
        selector: String,

        /// Fetch current contact and address for places picked from search
        #[arg(long)]
        refresh: bool,
    },

    /// Show restaurants on a map
    #[command(display_order = 6)]
    Map {
        /// Centre on a saved restaurant
        #[arg(long, value_name = "SELECTOR", conflicts_with_all = ["at", "search"])]
        record: Option<String>,

        /// Centre on LAT,LNG
        #[arg(long, value_name = "LAT,LNG", allow_hyphen_values = true, conflicts_with = "search")]
        at: Option<Coordinates>,

        #[command(flatten)]
        place: PlaceArgs,
    },

    /// Print map links, optionally copying them
    #[command(display_order = 7)]
    Link {
        /// Ids or list positions; all restaurants when omitted
        selectors: Vec<String>,

        /// Copy to the system clipboard
        #[arg(short, long)]
        copy: bool,
    },

    /// Search places by name
    #[command(alias = "s", display_order = 8)]
    Suggest {
        /// Query words (joined with spaces)
        query: Vec<String>,

        /// Show details for this suggestion
        #[arg(long)]
        pick: Option<usize>,

        /// Prefer results around LAT,LNG
        #[arg(long, value_name = "LAT,LNG", allow_hyphen_values = true)]
        near: Option<Coordinates>,
    },

    /// Replace everything with sample restaurants
    #[command(display_order = 20)]
    Seed,

    /// Delete all restaurants
    #[command(display_order = 21)]
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// About this app
    #[command(display_order = 30)]
    About,

    /// Get or set configuration
    #[command(display_order = 31)]
    Config {
        key: Option<String>,
        value: Option<String>,
    },
}
