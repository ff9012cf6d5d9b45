use crate::core::backup::ArchiveFormat;
use crate::export::ExportFormat;
use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for rItinerary
/// CLI application to plan event days, blocks and movements with SQLite
#[derive(Parser)]
#[command(
    name = "ritinerary",
    version = env!("CARGO_PKG_VERSION"),
    about = "Plan event itineraries: days, activity blocks, movements and vehicles, stored in SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Run configuration file migrations if needed")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/vim/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print or manage the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,

        #[arg(
            long = "filter",
            value_name = "REGEX",
            help = "Only rows whose operation, target or message match"
        )]
        filter: Option<String>,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, help = "Compress the copy (tar.gz on Unix, zip on Windows)")]
        compress: bool,

        #[arg(long, value_enum, requires = "compress", help = "Archive format for --compress")]
        archive: Option<ArchiveFormat>,

        #[arg(long, short = 'f', help = "Overwrite an existing file without asking")]
        force: bool,
    },

    /// Manage events
    #[command(subcommand)]
    Event(EventCmd),

    /// Manage the days of an event
    #[command(subcommand)]
    Day(DayCmd),

    /// Manage activity and break blocks
    #[command(subcommand)]
    Block(BlockCmd),

    /// Manage movements between locations
    #[command(subcommand)]
    Movement(MovementCmd),

    /// Manage participants
    #[command(subcommand)]
    Participant(ParticipantCmd),

    /// Manage locations
    #[command(subcommand)]
    Location(LocationCmd),

    /// Manage vehicles
    #[command(subcommand)]
    Vehicle(VehicleCmd),

    /// Personal agenda of a participant, or their view of one day
    Agenda {
        #[arg(long, short = 'p', value_name = "ID")]
        participant: String,

        #[arg(long, short = 'd', value_name = "DAY_ID")]
        day: Option<String>,
    },

    /// Export the itinerary
    Export {
        #[arg(long, value_enum, help = "Output format (default from config)")]
        format: Option<ExportFormat>,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, short = 'p', value_name = "ID", help = "Personal itinerary of one participant")]
        participant: Option<String>,

        #[arg(long, short = 'e', value_name = "ID", help = "Only the days of one event")]
        event: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Import a JSON store (legacy stores are migrated first)
    Import {
        #[arg(long, value_name = "FILE")]
        file: String,
    },
}

#[derive(Subcommand)]
pub enum EventCmd {
    /// Create an event
    Add {
        name: String,

        #[arg(long, value_name = "YYYY-MM-DD")]
        start: String,

        #[arg(long, value_name = "YYYY-MM-DD")]
        end: String,

        #[arg(long)]
        description: Option<String>,
    },
    /// List events
    List,
    /// Delete an event with all of its days
    Del { id: String },
}

#[derive(Subcommand)]
pub enum DayCmd {
    /// Add one or more days (dates or ranges like 2025-06-18..2025-06-20)
    Add {
        #[arg(long, short = 'e', value_name = "EVENT_ID")]
        event: String,

        #[arg(required = true, value_name = "DATE")]
        dates: Vec<String>,
    },
    /// List days
    List {
        #[arg(long, short = 'e', value_name = "EVENT_ID")]
        event: Option<String>,
    },
    /// Show the merged timeline of a day
    Show { id: String },
    /// Delete a day with its blocks and movements
    Del { id: String },
}

/// Block fields shared by `block add` and `block edit`.
#[derive(Args, Debug, Default)]
pub struct BlockFields {
    #[arg(long = "type", value_name = "activity|break")]
    pub block_type: Option<String>,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long, value_name = "HH:MM")]
    pub start: Option<String>,

    #[arg(long, value_name = "HH:MM", help = "Fixed end time")]
    pub end: Option<String>,

    #[arg(long, value_name = "LOCATION_ID", help = "Location (empty string clears it)")]
    pub location: Option<String>,

    #[arg(long = "participant", value_name = "ID", value_delimiter = ',')]
    pub participants: Option<Vec<String>>,

    #[arg(long = "advance", value_name = "ID", value_delimiter = ',')]
    pub advance: Option<Vec<String>>,

    #[arg(long = "met-by", value_name = "ID", value_delimiter = ',')]
    pub met_by: Option<Vec<String>>,

    #[arg(long = "attachment", value_name = "URI")]
    pub attachments: Option<Vec<String>>,

    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Subcommand)]
pub enum BlockCmd {
    /// Add a block to a day
    Add {
        #[arg(long, short = 'd', value_name = "DAY_ID")]
        day: String,

        #[command(flatten)]
        fields: BlockFields,
    },
    /// Edit a block
    Edit {
        id: String,

        #[command(flatten)]
        fields: BlockFields,

        #[arg(
            long = "auto-end",
            conflicts_with = "end",
            help = "Derive the end time from schedule items"
        )]
        auto_end: bool,
    },
    /// Show a block with its schedule items
    Show { id: String },
    /// Delete a block
    Del { id: String },
    /// Manage schedule items of a block
    #[command(subcommand)]
    Item(ItemCmd),
}

#[derive(Args, Debug, Default)]
pub struct ItemFields {
    #[arg(long, value_name = "HH:MM")]
    pub time: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long = "staff", help = "Instructions for staff")]
    pub staff_instructions: Option<String>,

    #[arg(long = "guest", help = "Instructions for guests")]
    pub guest_instructions: Option<String>,

    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Subcommand)]
pub enum ItemCmd {
    /// Add a schedule item to a block
    Add {
        #[arg(long, short = 'b', value_name = "BLOCK_ID")]
        block: String,

        #[command(flatten)]
        fields: ItemFields,
    },
    /// Edit a schedule item
    Edit {
        id: String,

        #[command(flatten)]
        fields: ItemFields,
    },
    /// Delete a schedule item
    Del { id: String },
}

/// Movement fields shared by `movement add` and `movement edit`.
#[derive(Args, Debug, Default)]
pub struct MovementFields {
    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long, value_name = "LOCATION_ID")]
    pub from: Option<String>,

    #[arg(long, value_name = "LOCATION_ID")]
    pub to: Option<String>,

    #[arg(long = "depart", value_name = "HH:MM")]
    pub depart: Option<String>,

    #[arg(long = "arrive", value_name = "HH:MM", conflicts_with = "drive", help = "Fixed arrival time")]
    pub arrive: Option<String>,

    #[arg(long = "drive", value_name = "DURATION", help = "Driving time: 1h15m, 75m, 2h or 1:15")]
    pub drive: Option<String>,

    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Subcommand)]
pub enum MovementCmd {
    /// Add a movement to a day
    Add {
        #[arg(long, short = 'd', value_name = "DAY_ID")]
        day: String,

        #[command(flatten)]
        fields: MovementFields,
    },
    /// Edit a movement
    Edit {
        id: String,

        #[command(flatten)]
        fields: MovementFields,
    },
    /// Show a movement with its vehicle assignments
    Show { id: String },
    /// Delete a movement
    Del { id: String },
    /// Put a vehicle (with driver and passengers) on a movement
    Assign {
        id: String,

        #[arg(long, value_name = "VEHICLE_ID")]
        vehicle: String,

        #[arg(long, value_name = "PARTICIPANT_ID")]
        driver: Option<String>,

        #[arg(long = "passenger", value_name = "PARTICIPANT_ID", value_delimiter = ',')]
        passengers: Vec<String>,
    },
    /// Remove a vehicle, or only some passengers, from a movement
    Unassign {
        id: String,

        #[arg(long, value_name = "VEHICLE_ID")]
        vehicle: String,

        #[arg(long = "passenger", value_name = "PARTICIPANT_ID", value_delimiter = ',')]
        passengers: Vec<String>,
    },
}

#[derive(Subcommand)]
pub enum ParticipantCmd {
    /// Create a participant
    Add {
        name: String,

        #[arg(long = "role", value_delimiter = ',')]
        roles: Vec<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long = "language", value_delimiter = ',')]
        languages: Vec<String>,
    },
    /// List participants
    List,
    /// Show a participant and the blocks they are assigned to
    Show { id: String },
    /// Delete a participant (unlinked from every block and vehicle)
    Del { id: String },
}

#[derive(Subcommand)]
pub enum LocationCmd {
    /// Create a location
    Add {
        name: String,

        #[arg(long)]
        address: Option<String>,

        #[arg(long = "maps", value_name = "URL")]
        google_maps_link: Option<String>,

        #[arg(long = "type", value_name = "hotel|venue|restaurant|generic")]
        location_type: Option<String>,

        #[arg(long = "contact")]
        contact: Vec<String>,

        #[arg(long = "manager", value_name = "PARTICIPANT_ID", value_delimiter = ',')]
        site_managers: Vec<String>,
    },
    /// List locations
    List,
    /// Delete a location
    Del { id: String },
}

#[derive(Subcommand)]
pub enum VehicleCmd {
    /// Create a vehicle
    Add {
        label: String,

        #[arg(long)]
        make: Option<String>,

        #[arg(long)]
        model: Option<String>,

        #[arg(long = "plate")]
        license_plate: Option<String>,

        #[arg(long, help = "Passenger seats")]
        capacity: Option<u32>,

        #[arg(long = "available-from", value_name = "HH:MM")]
        available_from: Option<String>,

        #[arg(long = "available-to", value_name = "HH:MM")]
        available_to: Option<String>,

        #[arg(long = "origin", value_name = "LOCATION_ID")]
        origin: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },
    /// List vehicles
    List,
    /// Delete a vehicle
    Del { id: String },
}
