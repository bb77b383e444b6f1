use clap::{Parser, Subcommand};
use darzi::booking::{BookingForm, BookingLog};
use darzi::config::{self, StudioConfig};
use darzi::gallery::{CategoryFilter, GalleryStore};
use darzi::{category::Category, output};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "darzi")]
#[command(about = "Gallery and booking backend for a tailoring studio website")]
#[command(long_about = "\
Gallery and booking backend for a tailoring studio website

The filesystem is the database: uploaded images land in per-category
folders under the upload root, and a single JSON index document lists
every image. Bookings are validated, logged, and turned into a pre-filled
WhatsApp link for the customer to confirm.

Data layout:

  darzi.toml                  # Config (optional, run gen-config for a template)
  image_metadata.json         # Image index: {\"images\": [...]}
  bookings.json               # Booking log
  uploads/
  ├── blouse/
  ├── kurti/
  │   └── 8c2e….jpg           # Random stored name, client name kept in index
  ├── salwar/
  ├── lehenga/
  ├── gown/
  └── other/

Categories: blouse, kurti, salwar, lehenga, gown, other.
When --category is omitted on upload, it is guessed from filename keywords
(e.g. 'bridal' → lehenga) and falls back to 'other'.")]
#[command(version = version_string())]
struct Cli {
    /// Config file
    #[arg(long, default_value = "darzi.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Add an image to the gallery
    Upload {
        /// Image file (png, jpg, jpeg, gif, webp; max 5 MiB)
        file: PathBuf,
        /// Category key; guessed from the filename when omitted
        #[arg(long)]
        category: Option<String>,
        /// Display title; defaults to the sanitized filename
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// List gallery images, newest first
    List {
        /// Category key, or "all"
        #[arg(long, default_value = "all")]
        category: String,
    },
    /// Show a single image record as JSON
    Show { id: String },
    /// Delete an image by id
    Delete { id: String },
    /// List the category registry
    Categories,
    /// Show gallery statistics
    Stats,
    /// Validate, preview, or submit a booking form
    Booking {
        #[command(subcommand)]
        action: BookingCommand,
    },
    /// Print a documented stock darzi.toml
    GenConfig,
}

#[derive(Subcommand)]
enum BookingCommand {
    /// Check a booking form without submitting
    Validate {
        /// JSON file with the form fields
        form: PathBuf,
    },
    /// Print the WhatsApp message a form would produce
    Preview { form: PathBuf },
    /// Validate, log, and print the WhatsApp hand-off link
    Submit { form: PathBuf },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = StudioConfig::load(&cli.config)?;

    match cli.command {
        Command::Upload {
            file,
            category,
            title,
            description,
        } => {
            let filename = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let category_key = category
                .unwrap_or_else(|| Category::detect(&filename).key().to_string());

            let store = GalleryStore::new(&config.upload_root, &config.index_file)?;
            let mut handle = std::fs::File::open(&file)?;
            let record = store.save_image(
                Some(&filename),
                &mut handle,
                &category_key,
                &title,
                &description,
            )?;

            println!("Uploaded {} [{}]", record.title, record.category);
            println!("    Id: {}", record.id);
            println!("    File: {}", record.file_path.display());
            println!("    Url: {}", record.url);
        }
        Command::List { category } => {
            let filter: CategoryFilter = category.parse()?;
            let store = GalleryStore::new(&config.upload_root, &config.index_file)?;
            output::print_image_list(&store.images(filter));
        }
        Command::Show { id } => {
            let store = GalleryStore::new(&config.upload_root, &config.index_file)?;
            match store.image_by_id(&id) {
                Some(record) => println!("{}", serde_json::to_string_pretty(&record)?),
                None => return Err(format!("image not found: {id}").into()),
            }
        }
        Command::Delete { id } => {
            let store = GalleryStore::new(&config.upload_root, &config.index_file)?;
            store.delete_image(&id)?;
            println!("Deleted {id}");
        }
        Command::Categories => {
            output::print_categories();
        }
        Command::Stats => {
            let store = GalleryStore::new(&config.upload_root, &config.index_file)?;
            output::print_stats(&store.stats());
        }
        Command::Booking { action } => match action {
            BookingCommand::Validate { form } => {
                let form = read_form(&form)?;
                form.validate()?;
                println!("Booking form is valid");
            }
            BookingCommand::Preview { form } => {
                let form = read_form(&form)?;
                let processed = form.process(&config.whatsapp_number)?;
                println!("{}", processed.message);
            }
            BookingCommand::Submit { form } => {
                let form = read_form(&form)?;
                let processed = form.process(&config.whatsapp_number)?;
                BookingLog::new(&config.bookings_file).record(&processed.form)?;
                println!("Booking logged to {}", config.bookings_file.display());
                println!("{}", processed.whatsapp_url);
            }
        },
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Read and deserialize a booking form JSON file.
fn read_form(path: &PathBuf) -> Result<BookingForm, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
