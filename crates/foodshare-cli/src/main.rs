#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use foodshare_model::{
    FoodId, FoodType, ListingFilter, MealType, NewListing, NewProvider, NewReceiver,
    ProviderFilter, ProviderId, QuantityUpdate, ReceiverFilter,
};
use foodshare_query::{
    add_listing, add_provider, add_receiver, delete_listing, fetch_listings, fetch_providers,
    fetch_receivers, report_catalog, run_report, trend_reports, update_listing_quantity, Fetched,
    MutationOutcome, QueryError, QueryErrorCode,
};
use foodshare_store::{Store, Table};
use rusqlite::types::Value;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "foodshare")]
#[command(about = "Local food donation network: listings, directory, and reports")]
struct Cli {
    /// Path to the SQLite database file.
    #[arg(long, global = true, default_value = "foodshare.db")]
    db: PathBuf,
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse food listings with optional exact-match filters.
    Listings {
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        provider_type: Option<String>,
        #[arg(long)]
        food_type: Option<String>,
        #[arg(long)]
        meal_type: Option<String>,
    },
    /// Look up provider contacts.
    Providers {
        #[arg(long)]
        id: Option<i64>,
        #[arg(long)]
        name: Option<String>,
    },
    /// Look up receiver contacts.
    Receivers {
        #[arg(long)]
        id: Option<i64>,
        #[arg(long)]
        name: Option<String>,
    },
    AddProvider {
        #[arg(long)]
        name: String,
        #[arg(long = "type")]
        provider_type: String,
        #[arg(long)]
        address: String,
        #[arg(long)]
        city: String,
        #[arg(long)]
        contact: String,
    },
    AddReceiver {
        #[arg(long)]
        name: String,
        #[arg(long = "type")]
        receiver_type: String,
        #[arg(long)]
        city: String,
        #[arg(long)]
        contact: String,
    },
    AddListing {
        #[arg(long)]
        food_name: String,
        #[arg(long)]
        quantity: i64,
        #[arg(long)]
        expiry_date: String,
        #[arg(long)]
        provider_id: i64,
        #[arg(long)]
        provider_type: String,
        #[arg(long)]
        location: String,
        #[arg(long)]
        food_type: String,
        #[arg(long)]
        meal_type: String,
    },
    /// Set a new quantity on an existing listing.
    UpdateListing {
        #[arg(long)]
        food_id: i64,
        #[arg(long)]
        quantity: i64,
    },
    /// Remove a listing. Claims against it are left in place.
    DeleteListing {
        #[arg(long)]
        food_id: i64,
    },
    /// List the report catalog.
    Reports,
    /// Run one canned report by key.
    Report {
        key: String,
        #[arg(long)]
        city: Option<String>,
    },
    /// Run the trends dashboard statements.
    Trends,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let store = Store::open(&cli.db);

    match dispatch(&store, &cli.command, cli.json) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if cli.json {
                let code = match err.code {
                    QueryErrorCode::Validation => "validation_error",
                    QueryErrorCode::Storage => "storage_error",
                    _ => unreachable!(),
                };
                println!(
                    "{}",
                    serde_json::json!({ "error": { "code": code, "message": err.message } })
                );
            } else {
                eprintln!("error: {err}");
            }
            match err.code {
                QueryErrorCode::Validation => ExitCode::from(3),
                QueryErrorCode::Storage => ExitCode::from(4),
                _ => unreachable!(),
            }
        }
    }
}

fn dispatch(store: &Store, command: &Commands, json: bool) -> Result<(), QueryError> {
    match command {
        Commands::Listings {
            city,
            provider_type,
            food_type,
            meal_type,
        } => {
            let filter = ListingFilter {
                city: city.clone(),
                provider_type: provider_type.clone(),
                food_type: food_type.as_deref().map(FoodType::parse).transpose()?,
                meal_type: meal_type.as_deref().map(MealType::parse).transpose()?,
            };
            render_fetched(fetch_listings(store, &filter)?, json);
        }
        Commands::Providers { id, name } => {
            let filter = ProviderFilter {
                provider_id: *id,
                name: name.clone(),
            };
            render_fetched(fetch_providers(store, &filter)?, json);
        }
        Commands::Receivers { id, name } => {
            let filter = ReceiverFilter {
                receiver_id: *id,
                name: name.clone(),
            };
            render_fetched(fetch_receivers(store, &filter)?, json);
        }
        Commands::AddProvider {
            name,
            provider_type,
            address,
            city,
            contact,
        } => {
            let outcome = add_provider(
                store,
                &NewProvider {
                    name: name.clone(),
                    provider_type: provider_type.clone(),
                    address: address.clone(),
                    city: city.clone(),
                    contact: contact.clone(),
                },
            )?;
            render_outcome(outcome, json);
        }
        Commands::AddReceiver {
            name,
            receiver_type,
            city,
            contact,
        } => {
            let outcome = add_receiver(
                store,
                &NewReceiver {
                    name: name.clone(),
                    receiver_type: receiver_type.clone(),
                    city: city.clone(),
                    contact: contact.clone(),
                },
            )?;
            render_outcome(outcome, json);
        }
        Commands::AddListing {
            food_name,
            quantity,
            expiry_date,
            provider_id,
            provider_type,
            location,
            food_type,
            meal_type,
        } => {
            let listing = NewListing {
                food_name: food_name.clone(),
                quantity: *quantity,
                expiry_date: expiry_date.clone(),
                provider_id: ProviderId::parse(*provider_id)?,
                provider_type: provider_type.clone(),
                location: location.clone(),
                food_type: FoodType::parse(food_type)?,
                meal_type: MealType::parse(meal_type)?,
            };
            render_outcome(add_listing(store, &listing)?, json);
        }
        Commands::UpdateListing { food_id, quantity } => {
            let update = QuantityUpdate {
                food_id: FoodId::parse(*food_id)?,
                quantity: *quantity,
            };
            render_outcome(update_listing_quantity(store, update)?, json);
        }
        Commands::DeleteListing { food_id } => {
            let outcome = delete_listing(store, FoodId::parse(*food_id)?)?;
            render_outcome(outcome, json);
        }
        Commands::Reports => {
            if json {
                let entries: Vec<serde_json::Value> = report_catalog()
                    .iter()
                    .map(|r| serde_json::json!({ "key": r.key, "question": r.question }))
                    .collect();
                println!("{}", serde_json::json!({ "reports": entries }));
            } else {
                for report in report_catalog() {
                    println!("{:40} {}", report.key, report.question);
                }
            }
        }
        Commands::Report { key, city } => {
            render_fetched(run_report(store, key, city.as_deref())?, json);
        }
        Commands::Trends => {
            for report in trend_reports() {
                let fetched = run_report(store, report.key, None)?;
                if json {
                    render_fetched(fetched, json);
                    continue;
                }
                println!("# {}", report.question);
                // Trend statements group by their first column, so the
                // chart view is always available.
                let chart = fetched.table().chart_series().map_err(QueryError::from)?;
                for (i, category) in chart.categories.iter().enumerate() {
                    let values: Vec<String> = chart
                        .series
                        .iter()
                        .map(|s| format!("{}={}", s.name, s.values[i]))
                        .collect();
                    println!("{category}\t{}", values.join("\t"));
                }
            }
        }
    }
    Ok(())
}

fn render_fetched(fetched: Fetched, json: bool) {
    let empty = fetched.is_empty();
    let table = fetched.into_table();
    if json {
        println!("{}", table.to_json());
        return;
    }
    print_table(&table);
    if empty {
        println!("(no rows matched)");
    }
}

fn render_outcome(outcome: MutationOutcome, json: bool) {
    if json {
        println!(
            "{}",
            serde_json::json!({ "rows_affected": outcome.rows_affected })
        );
    } else if outcome.matched_nothing() {
        println!("no rows matched");
    } else {
        println!("{} row(s) affected", outcome.rows_affected);
    }
}

fn print_table(table: &Table) {
    println!("{}", table.columns().join("\t"));
    for row in 0..table.len() {
        let line: Vec<String> = table
            .columns()
            .iter()
            .map(|c| match table.value(row, c) {
                Some(v) => render_value(v),
                None => String::new(),
            })
            .collect();
        println!("{}", line.join("\t"));
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Integer(v) => v.to_string(),
        Value::Real(v) => v.to_string(),
        Value::Text(v) => v.clone(),
        Value::Blob(b) => format!("<{} bytes>", b.len()),
    }
}
