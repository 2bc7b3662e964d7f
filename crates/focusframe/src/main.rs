mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use commands::{GeometryArgs, GlobalArgs};

#[derive(Parser)]
#[command(
    name = "focusframe",
    version,
    about = "Keeps managed application windows at a fixed, borderless geometry"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true, env = "FOCUSFRAME_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the default configuration file
    Init,
    /// Watch the foreground window and enforce managed geometry
    Run {
        /// Poll the foreground window instead of using the event hook
        #[arg(long)]
        polling: bool,
    },
    /// List visible windows and the executables that own them
    List,
    /// Manage the applications whose windows are enforced
    Apps {
        #[command(subcommand)]
        command: AppsCommands,
    },
    /// Show or change the global defaults
    Global {
        #[command(subcommand)]
        command: GlobalCommands,
    },
    /// Manage automatic startup on logon
    Autostart {
        #[command(subcommand)]
        command: AutostartCommands,
    },
}

#[derive(Subcommand)]
enum AppsCommands {
    /// List managed applications
    List,
    /// Start managing an application
    Add {
        /// Executable file name, e.g. game.exe
        executable: String,
        /// Friendly display name
        #[arg(long)]
        name: Option<String>,
        #[command(flatten)]
        geometry: GeometryArgs,
    },
    /// Stop managing an application
    Remove {
        /// Executable file name
        executable: String,
    },
    /// Change the settings of an application, adding it if needed
    Set {
        /// Executable file name
        executable: String,
        /// Friendly display name
        #[arg(long)]
        name: Option<String>,
        #[command(flatten)]
        geometry: GeometryArgs,
    },
}

#[derive(Subcommand)]
enum GlobalCommands {
    /// Print the global defaults
    Show,
    /// Change the global defaults
    Set(GlobalArgs),
}

#[derive(Subcommand)]
enum AutostartCommands {
    /// Start FocusFrame on logon
    Enable,
    /// Stop starting FocusFrame on logon
    Disable,
    /// Show whether FocusFrame starts on logon
    Status,
}

fn main() {
    let cli = Cli::parse();
    let explicit = cli.config.as_deref();
    let path = commands::config_path(explicit);

    match cli.command {
        Commands::Init => commands::init::execute(&path),
        Commands::Run { polling } => commands::run::execute(&path, polling),
        Commands::List => commands::list::execute(&path),
        Commands::Apps { command } => match command {
            AppsCommands::List => commands::apps::list(&path),
            AppsCommands::Add {
                executable,
                name,
                geometry,
            } => commands::apps::add(&path, &executable, name, &geometry),
            AppsCommands::Remove { executable } => commands::apps::remove(&path, &executable),
            AppsCommands::Set {
                executable,
                name,
                geometry,
            } => commands::apps::set(&path, &executable, name, &geometry),
        },
        Commands::Global { command } => match command {
            GlobalCommands::Show => commands::global::show(&path),
            GlobalCommands::Set(args) => commands::global::set(&path, &args),
        },
        Commands::Autostart { command } => match command {
            AutostartCommands::Enable => commands::autostart::enable(explicit),
            AutostartCommands::Disable => commands::autostart::disable(),
            AutostartCommands::Status => commands::autostart::status(),
        },
    }
}
