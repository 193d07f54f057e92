//! Command-line configuration.
//!
//! Every option can also come from the environment so the binary can run
//! from cron or a service manager without flags.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use vitrina_core::domain::{BusinessType, ListingEdit, NewListing, parse_image_urls};

#[derive(Debug, Parser)]
#[command(name = "vitrina")]
#[command(about = "Property listing catalog with time-limited visibility plans")]
pub struct Cli {
    /// JSON file holding every listing.
    #[arg(long, env = "VITRINA_DATA_FILE", default_value = "vitrina.json", global = true)]
    pub data_file: PathBuf,

    /// Log filter used when RUST_LOG is not set.
    #[arg(long, env = "VITRINA_LOG", default_value = "info", global = true)]
    pub log_level: String,

    #[command(flatten)]
    pub credentials: CredentialConfig,

    #[command(flatten)]
    pub login: LoginArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// The single admin account the catalog accepts.
#[derive(Debug, Args)]
pub struct CredentialConfig {
    #[arg(long, env = "VITRINA_CREDENTIAL_USER", default_value = "admin", global = true)]
    pub credential_user: String,

    #[arg(
        long,
        env = "VITRINA_CREDENTIAL_PASSWORD",
        default_value = "1234",
        hide_env_values = true,
        global = true
    )]
    pub credential_password: String,
}

/// Credentials presented by the caller of an admin command.
#[derive(Debug, Args)]
pub struct LoginArgs {
    #[arg(long, env = "VITRINA_USERNAME", global = true)]
    pub username: Option<String>,

    #[arg(long, env = "VITRINA_PASSWORD", hide_env_values = true, global = true)]
    pub password: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Featured listings shown on the home page.
    Home,
    /// Public catalog, ranked by plan tier.
    List {
        #[arg(long)]
        business_type: Option<String>,
        #[arg(long)]
        property_type: Option<String>,
        #[arg(long)]
        municipality: Option<String>,
    },
    /// One listing.
    Show { id: String },
    /// Admin: create a listing.
    Create(ListingArgs),
    /// Admin: replace a listing's descriptive fields.
    Edit {
        id: String,
        #[command(flatten)]
        fields: ListingArgs,
        /// Manual featured flag.
        #[arg(long)]
        featured: bool,
    },
    /// Admin: delete a listing.
    Delete { id: String },
    /// Admin: every listing, newest first.
    AdminList {
        #[arg(long)]
        featured_only: bool,
    },
    /// Admin: flip the manual featured flag.
    ToggleFeatured { id: String },
    /// Admin: grant a plan (Basic, Premium, Featured).
    Activate {
        id: String,
        #[arg(long)]
        plan: Option<String>,
    },
    /// Admin: clear a listing's plan.
    Deactivate { id: String },
    /// Admin: clear every expired plan.
    Sweep,
    /// Admin: listing counts.
    Dashboard,
    /// Admin: sweep expired plans on an interval until Ctrl-C.
    Watch {
        #[arg(long, default_value_t = 3600)]
        interval_secs: u64,
    },
}

#[derive(Debug, Args)]
pub struct ListingArgs {
    #[arg(long)]
    pub title: String,
    /// Sale or Rent.
    #[arg(long)]
    pub business_type: String,
    #[arg(long)]
    pub description: String,
    #[arg(long)]
    pub property_type: String,
    #[arg(long)]
    pub municipality: String,
    #[arg(long)]
    pub bedrooms: Option<u32>,
    #[arg(long)]
    pub bathrooms: Option<u32>,
    #[arg(long)]
    pub parking: bool,
    #[arg(long)]
    pub price: f64,
    /// Comma separated image URLs.
    #[arg(long, default_value = "")]
    pub images: String,
}

impl ListingArgs {
    pub fn into_new_listing(self) -> NewListing {
        NewListing {
            title: self.title,
            business_type: BusinessType::parse(&self.business_type),
            description: self.description,
            property_type: self.property_type,
            municipality: self.municipality,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            parking: self.parking,
            price: self.price,
            image_urls: parse_image_urls(&self.images),
        }
    }

    pub fn into_edit(self, featured: bool) -> ListingEdit {
        let new = self.into_new_listing();
        ListingEdit {
            title: new.title,
            business_type: new.business_type,
            description: new.description,
            property_type: new.property_type,
            municipality: new.municipality,
            bedrooms: new.bedrooms,
            bathrooms: new.bathrooms,
            parking: new.parking,
            price: new.price,
            image_urls: new.image_urls,
            featured,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn activate_parses_optional_plan() {
        let cli = Cli::try_parse_from(["vitrina", "activate", "listing-x", "--plan", "Premium"])
            .unwrap();
        match cli.command {
            Command::Activate { id, plan } => {
                assert_eq!(id, "listing-x");
                assert_eq!(plan.as_deref(), Some("Premium"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn create_args_build_new_listing() {
        let cli = Cli::try_parse_from([
            "vitrina",
            "create",
            "--title",
            "Casa",
            "--business-type",
            "venta",
            "--description",
            "Amplia",
            "--property-type",
            "House",
            "--municipality",
            "Envigado",
            "--price",
            "350000000",
            "--parking",
            "--images",
            "a.jpg, b.jpg",
        ])
        .unwrap();
        let Command::Create(args) = cli.command else {
            panic!("expected create");
        };
        let new = args.into_new_listing();
        assert_eq!(new.business_type, BusinessType::Sale);
        assert!(new.parking);
        assert_eq!(new.image_urls, vec!["a.jpg".to_string(), "b.jpg".to_string()]);
        assert_eq!(new.bedrooms, None);
    }
}
