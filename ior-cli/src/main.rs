mod render;

use clap::{Parser, Subcommand};
use dialoguer::{Confirm, Password};
use ior_common::{categories, CatalogFilter, MaterialForm};
use ior_core::{store_from_config, CatalogStore, Config, MaterialsClient};
use tracing::{debug, error};

/// Index of Refraction materials catalog.
#[derive(Parser)]
#[command(name = "ior")]
struct Args {
    /// Base URL of the materials collection (overrides config and IOR_API_URL).
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List materials, optionally filtered.
    List {
        /// Case-insensitive text matched against name and description.
        #[arg(long, default_value = "")]
        search: String,
        /// Only show this category.
        #[arg(long)]
        category: Option<String>,
    },
    /// List the categories present in the catalog.
    Categories,
    /// Add a material (admin).
    Add {
        #[command(flatten)]
        admin: AdminArgs,
        #[command(flatten)]
        fields: MaterialFields,
    },
    /// Edit a material (admin). Unset flags keep the current value.
    Edit {
        id: String,
        #[command(flatten)]
        admin: AdminArgs,
        #[command(flatten)]
        fields: MaterialFields,
    },
    /// Delete a material (admin).
    Delete {
        id: String,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
        #[command(flatten)]
        admin: AdminArgs,
    },
}

#[derive(clap::Args)]
struct AdminArgs {
    /// Admin password. Prompted for (without echo) when not given.
    #[arg(long, env = "IOR_PASSWORD", hide_env_values = true)]
    password: Option<String>,
}

#[derive(clap::Args)]
struct MaterialFields {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    category: Option<String>,
    /// Index of refraction.
    #[arg(long = "ior")]
    ior_value: Option<String>,
    #[arg(long)]
    description: Option<String>,
    /// Wavelength in nm.
    #[arg(long)]
    wavelength: Option<String>,
    /// Temperature in °C.
    #[arg(long)]
    temperature: Option<String>,
    #[arg(long)]
    source: Option<String>,
}

impl MaterialFields {
    fn apply(&self, form: &mut MaterialForm) {
        let slots = [
            (&self.name, &mut form.name),
            (&self.category, &mut form.category),
            (&self.ior_value, &mut form.ior_value),
            (&self.description, &mut form.description),
            (&self.wavelength, &mut form.wavelength),
            (&self.temperature, &mut form.temperature),
            (&self.source, &mut form.source),
        ];
        for (value, slot) in slots {
            if let Some(value) = value {
                *slot = value.clone();
            }
        }
    }
}

type Store = CatalogStore<MaterialsClient>;

fn configure_logging() {
    use tracing_subscriber::prelude::*;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_line_number(true)
        .with_target(false)
        .with_file(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

#[tokio::main]
async fn main() {
    configure_logging();
    let args = Args::parse();

    let config = Config::load()
        .unwrap_or_else(|e| {
            error!("Failed to load config: {e}");
            std::process::exit(1);
        })
        .with_overrides(args.api_url.clone(), None);
    debug!("using collection at {}", config.api_url);

    let store = store_from_config(&config);
    if let Err(message) = run(&store, args.command).await {
        eprintln!("Error: {message}");
        std::process::exit(1);
    }
}

async fn run(store: &Store, command: Command) -> Result<(), String> {
    match command {
        Command::List { search, category } => {
            fetch(store).await?;
            let state = store.snapshot();
            let filter = CatalogFilter::new(search, category);
            let shown = filter.apply(&state.materials);
            for material in &shown {
                println!("{}\n", render::material_card(material));
            }
            println!("{}", render::summary(shown.len(), state.materials.len()));
        }
        Command::Categories => {
            fetch(store).await?;
            for category in categories(&store.snapshot().materials) {
                println!("{category}");
            }
        }
        Command::Add { admin, fields } => {
            unlock(store, &admin)?;
            let mut form = MaterialForm::default();
            fields.apply(&mut form);
            let draft = form.to_draft().map_err(|e| e.to_string())?;

            store.add_material(draft).await;
            check(store)?;
            if let Some(material) = store.snapshot().materials.last() {
                println!("Added\n{}", render::material_card(material));
            }
        }
        Command::Edit { id, admin, fields } => {
            unlock(store, &admin)?;
            fetch(store).await?;
            let current = store
                .snapshot()
                .material(&id)
                .cloned()
                .ok_or_else(|| format!("No material with id {id}"))?;

            let mut form = MaterialForm::from_material(&current);
            fields.apply(&mut form);
            let patch = form.to_patch().map_err(|e| e.to_string())?;

            store.update_material(&id, patch).await;
            check(store)?;
            if let Some(material) = store.snapshot().material(&id) {
                println!("Updated\n{}", render::material_card(material));
            }
        }
        Command::Delete { id, yes, admin } => {
            unlock(store, &admin)?;
            if !yes && !confirm("Are you sure you want to delete this material?")? {
                println!("Cancelled");
                return Ok(());
            }
            store.delete_material(&id).await;
            check(store)?;
            println!("Deleted {id}");
        }
    }
    Ok(())
}

async fn fetch(store: &Store) -> Result<(), String> {
    store.fetch_materials().await;
    check(store)
}

/// Surface the store's error state as a command failure.
fn check(store: &Store) -> Result<(), String> {
    match store.snapshot().error {
        Some(message) => Err(message),
        None => Ok(()),
    }
}

fn unlock(store: &Store, admin: &AdminArgs) -> Result<(), String> {
    let password = match &admin.password {
        Some(password) => password.clone(),
        None => Password::new()
            .with_prompt("Password")
            .allow_empty_password(true)
            .interact()
            .map_err(|e| format!("read password: {e}"))?,
    };
    if store.login(&password) {
        Ok(())
    } else {
        Err("Invalid password".to_string())
    }
}

fn confirm(question: &str) -> Result<bool, String> {
    Confirm::new()
        .with_prompt(question)
        .default(false)
        .interact()
        .map_err(|e| format!("read answer: {e}"))
}
