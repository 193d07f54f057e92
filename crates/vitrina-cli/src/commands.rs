//! Command dispatch: public reads, then admin actions behind a login.

use std::future::Future;
use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use serde_json::{Value, json};
use tracing::{info, warn};
use vitrina_core::app::{Activation, AdminGate, App};
use vitrina_core::domain::{ListingFilter, ListingId};
use vitrina_core::ports::{Clock, ListingStore};

use crate::config::{Command, LoginArgs};

pub async fn run<S: ListingStore, C: Clock>(
    app: &App<S, C>,
    login: &LoginArgs,
    command: Command,
) -> Result<Value> {
    match command {
        Command::Home => {
            app.sweep_expired().await?;
            Ok(json!(app.home().await?))
        }
        Command::List {
            business_type,
            property_type,
            municipality,
        } => {
            app.sweep_expired().await?;
            let filter = ListingFilter::new()
                .business_type(business_type.as_deref().unwrap_or_default())
                .property_type(property_type.as_deref().unwrap_or_default())
                .municipality(municipality.as_deref().unwrap_or_default());
            Ok(json!(app.browse(&filter).await?))
        }
        Command::Show { id } => Ok(json!(app.detail(parse_id(&id)?).await?)),
        admin_command => {
            let username = login
                .username
                .as_deref()
                .context("admin commands need --username (or VITRINA_USERNAME)")?;
            let password = login
                .password
                .as_deref()
                .context("admin commands need --password (or VITRINA_PASSWORD)")?;
            let token = app.login(username, password).context("admin login failed")?;
            let result = match app.admin(&token) {
                Ok(admin) => run_admin(app, &admin, admin_command).await,
                Err(e) => Err(e.into()),
            };
            app.logout(&token);
            result
        }
    }
}

async fn run_admin<S: ListingStore, C: Clock>(
    app: &App<S, C>,
    admin: &AdminGate<'_, S, C>,
    command: Command,
) -> Result<Value> {
    match command {
        Command::Create(fields) => {
            let created = admin.listings().create(fields.into_new_listing()).await?;
            Ok(json!(created))
        }
        Command::Edit {
            id,
            fields,
            featured,
        } => {
            let edited = admin
                .listings()
                .edit(parse_id(&id)?, fields.into_edit(featured))
                .await?;
            Ok(json!(edited))
        }
        Command::Delete { id } => {
            let id = parse_id(&id)?;
            admin.listings().delete(id).await?;
            Ok(json!({ "deleted": id.to_string() }))
        }
        Command::AdminList { featured_only } => {
            Ok(json!(admin.listings().admin_list(featured_only).await?))
        }
        Command::ToggleFeatured { id } => {
            let id = parse_id(&id)?;
            let featured = admin.listings().toggle_featured(id).await?;
            Ok(json!({ "listing": id.to_string(), "featured": featured }))
        }
        Command::Activate { id, plan } => {
            let id = parse_id(&id)?;
            match admin.plans().activate_plan(id, plan.as_deref()).await? {
                Activation::Activated { tier, expires_at } => Ok(json!({
                    "listing": id.to_string(),
                    "plan": tier,
                    "plan_active": true,
                    "plan_expires_at": expires_at,
                })),
                Activation::Skipped => Ok(json!({
                    "listing": id.to_string(),
                    "skipped": "no plan supplied",
                })),
            }
        }
        Command::Deactivate { id } => {
            let id = parse_id(&id)?;
            admin.plans().deactivate_plan(id).await?;
            Ok(json!({ "listing": id.to_string(), "plan_active": false }))
        }
        Command::Sweep => {
            let expired = admin.plans().sweep_expired_plans_now().await?;
            Ok(json!({ "expired": expired }))
        }
        Command::Dashboard => Ok(json!(admin.listings().dashboard().await?)),
        Command::Watch { interval_secs } => {
            watch(app, interval_secs, tokio::signal::ctrl_c()).await
        }
        public @ (Command::Home | Command::List { .. } | Command::Show { .. }) => {
            anyhow::bail!("{public:?} is not an admin command")
        }
    }
}

/// Run the sweeper until `shutdown` resolves. A shutdown signal that cannot
/// be installed stops the loop and is reported as an error.
async fn watch<S: ListingStore, C: Clock>(
    app: &App<S, C>,
    interval_secs: u64,
    shutdown: impl Future<Output = io::Result<()>>,
) -> Result<Value> {
    info!(interval_secs, "watching for expired plans, Ctrl-C to stop");
    let mut signal_error = None;
    let total = app
        .sweeper(Duration::from_secs(interval_secs.max(1)))
        .run(async {
            if let Err(e) = shutdown.await {
                warn!(error = %e, "cannot listen for Ctrl-C, stopping sweeper");
                signal_error = Some(e);
            }
        })
        .await;
    if let Some(e) = signal_error {
        return Err(anyhow::Error::new(e).context("failed to install Ctrl-C handler"));
    }
    Ok(json!({ "expired": total }))
}

fn parse_id(raw: &str) -> Result<ListingId> {
    raw.parse::<ListingId>()
        .with_context(|| format!("`{raw}` is not a listing id"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrina_core::app::AppBuilder;
    use vitrina_core::impls::{InMemoryListingStore, StaticCredentials};
    use vitrina_core::ports::SystemClock;

    use crate::config::ListingArgs;

    fn app() -> App<InMemoryListingStore, SystemClock> {
        AppBuilder::new()
            .store(InMemoryListingStore::new())
            .clock(SystemClock)
            .authenticator(StaticCredentials::new("admin", "1234"))
            .build()
            .unwrap()
    }

    fn admin_login() -> LoginArgs {
        LoginArgs {
            username: Some("admin".to_string()),
            password: Some("1234".to_string()),
        }
    }

    fn fields(title: &str) -> ListingArgs {
        ListingArgs {
            title: title.to_string(),
            business_type: "Arriendo".to_string(),
            description: "Cerca al metro".to_string(),
            property_type: "Apartment".to_string(),
            municipality: "Itagüí".to_string(),
            bedrooms: Some(2),
            bathrooms: Some(1),
            parking: false,
            price: 1_500_000.0,
            images: String::new(),
        }
    }

    #[tokio::test]
    async fn admin_commands_require_credentials() {
        let app = app();
        let anonymous = LoginArgs {
            username: None,
            password: None,
        };
        assert!(run(&app, &anonymous, Command::Sweep).await.is_err());

        let wrong = LoginArgs {
            username: Some("admin".to_string()),
            password: Some("nope".to_string()),
        };
        assert!(run(&app, &wrong, Command::Dashboard).await.is_err());
    }

    #[tokio::test]
    async fn create_activate_and_list() {
        let app = app();
        let login = admin_login();

        let created = run(&app, &login, Command::Create(fields("Apto"))).await.unwrap();
        let id = created["id"].as_str().unwrap().to_string();

        let activated = run(
            &app,
            &login,
            Command::Activate {
                id: id.clone(),
                plan: Some("Featured".to_string()),
            },
        )
        .await
        .unwrap();
        assert_eq!(activated["plan"], "Featured");

        let home = run(&app, &login, Command::Home).await.unwrap();
        assert_eq!(home.as_array().unwrap().len(), 1);

        let listed = run(
            &app,
            &login,
            Command::List {
                business_type: Some("rent".to_string()),
                property_type: None,
                municipality: Some("itag".to_string()),
            },
        )
        .await
        .unwrap();
        assert_eq!(listed[0]["id"], id.as_str());
    }

    #[tokio::test]
    async fn activate_without_plan_is_skipped() {
        let app = app();
        let login = admin_login();
        let created = run(&app, &login, Command::Create(fields("Apto"))).await.unwrap();
        let id = created["id"].as_str().unwrap().to_string();

        let out = run(&app, &login, Command::Activate { id, plan: None })
            .await
            .unwrap();
        assert_eq!(out["skipped"], "no plan supplied");
    }

    #[tokio::test]
    async fn watch_reports_failed_signal_handler() {
        let app = app();
        let err = watch(&app, 60, async {
            Err(io::Error::new(io::ErrorKind::Unsupported, "no signals"))
        })
        .await
        .unwrap_err();
        assert!(err.to_string().contains("Ctrl-C"));
    }

    #[tokio::test]
    async fn watch_returns_sweep_total_on_shutdown() {
        let app = app();
        let out = watch(&app, 60, async { Ok(()) }).await.unwrap();
        assert_eq!(out["expired"], 0);
    }

    #[tokio::test]
    async fn bad_id_is_reported() {
        let app = app();
        let err = run(&app, &admin_login(), Command::Show { id: "nope".to_string() })
            .await
            .unwrap_err();
        assert!(err.to_string().contains("not a listing id"));
    }
}
