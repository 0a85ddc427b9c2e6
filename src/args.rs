use clap::{Parser, Subcommand};
use gourmet_compass::model::{Cuisine, MealTime, Picks, PriceTier, TravelMode};

#[derive(Parser, Debug)]
#[command(name = "gourmet")]
#[command(about = "AI-grounded restaurant picker with categorized favorites", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ask for a recommendation around a location
    #[command(alias = "s")]
    Search {
        /// Cuisine to crave, or anything
        #[arg(long, value_enum, default_value = "any")]
        cuisine: Cuisine,

        /// Budget tier (NT$ 1~200 / 201~400 / 401~600 / 600+)
        #[arg(long, value_enum, default_value = "budget")]
        price: PriceTier,

        /// Walking or riding
        #[arg(long, value_enum, default_value = "walking")]
        mode: TravelMode,

        /// Meal time (now binds to the clock and demands open-now)
        #[arg(long, value_enum, default_value = "now")]
        time: MealTime,

        /// One top pick, or three-to-five options
        #[arg(long, value_enum, default_value = "single")]
        picks: Picks,

        /// Device latitude (with --lng; biases the maps retrieval)
        #[arg(long, requires = "lng", allow_hyphen_values = true)]
        lat: Option<f64>,

        /// Device longitude (with --lat)
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lng: Option<f64>,

        /// Fix accuracy radius in meters, informational
        #[arg(long, requires = "lat")]
        accuracy: Option<f64>,

        /// Search around a landmark or street instead of coordinates
        #[arg(long, conflicts_with = "lat")]
        address: Option<String>,
    },

    /// List favorite categories and their places
    #[command(alias = "ls")]
    List,

    /// Toggle a place: save it into a category, or unsave it everywhere
    Save {
        /// Display name of the place
        title: String,

        /// Map link of the place (its identity)
        uri: String,

        /// Destination category id; prompted interactively if omitted
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Remove a place from one category only
    #[command(alias = "rm")]
    Remove {
        /// Category id
        category: String,

        /// Map link of the place
        uri: String,
    },

    /// Move a place between categories
    #[command(alias = "mv")]
    Move {
        /// Source category id
        from: String,

        /// Destination category id
        to: String,

        /// Map link of the place
        uri: String,
    },

    /// Create a new favorites category
    #[command(alias = "nc")]
    NewCategory {
        /// Display name (emoji welcome)
        name: String,
    },

    /// Rename a category
    Rename {
        /// Category id
        id: String,

        /// New display name
        name: String,
    },

    /// Delete a category and everything in it
    #[command(alias = "dc")]
    DeleteCategory {
        /// Category id (home/work/default refuse deletion)
        id: String,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Collapse or expand a category in listings
    Collapse {
        /// Category id
        id: String,
    },

    /// Get or set configuration (model, api-key, timeout)
    Config {
        /// Configuration key
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
