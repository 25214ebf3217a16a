use clap::Parser;
use coin_collection::{backup, cli, config, error, manager};
use coin_collection_common::{registry, CollectionOptions, ImageContext};
use cli::{Cli, Commands};
use config::Config;
use error::{CoinCollectionError, Result};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| CoinCollectionError::Config(e.to_string()))?;

    let mut config = Config::load()?;
    let current_year = config.current_year();
    let registry = registry();

    if let Commands::Config { set_db, set_backup_dir, set_year, show } = cli.command {
        let changed = set_db.is_some() || set_backup_dir.is_some() || set_year.is_some();
        if let Some(path) = set_db {
            config.database_path = Some(path);
        }
        if let Some(dir) = set_backup_dir {
            config.backup_dir = Some(dir);
        }
        if let Some(year) = set_year {
            config.current_year = Some(year);
        }
        if changed {
            config.save()?;
            println!("✔ Settings saved to {}", Config::config_path()?.display());
        }
        if show || !changed {
            println!("Settings:");
            println!("  Database: {}", config.database_path()?.display());
            println!("  Backup directory: {}", config.backup_dir()?.display());
            println!("  Current year: {}", config.current_year());
        }
        return Ok(());
    }

    if let Commands::Types = cli.command {
        for definition in registry.list_all() {
            let (start, stop) = definition.year_bounds(current_year);
            let declared = definition.declare_options(current_year);
            println!("{} ({}-{})", definition.type_name(), start, stop);
            for field in &declared.fields {
                let default = if declared.defaults.get(field.slot) { "on" } else { "off" };
                println!("  {} [{}]", field.label, default);
            }
        }
        return Ok(());
    }

    let db_path = match cli.db {
        Some(path) => path,
        None => config.database_path()?,
    };
    let mut db = manager::open_database(&db_path, registry)?;

    match cli.command {
        Commands::Create { name, series_type, start, stop, mint_marks, no_mint_marks, enable, disable } => {
            let definition = registry.lookup(&series_type)?;
            let declared = definition.declare_options(current_year);
            let mut options: CollectionOptions = declared.defaults.clone();
            if let Some(start) = start {
                options.start_year = start;
            }
            if let Some(stop) = stop {
                options.stop_year = stop;
            }
            if mint_marks {
                options.show_mint_marks = true;
            }
            if no_mint_marks {
                options.show_mint_marks = false;
            }
            for label in &enable {
                manager::apply_option(&declared, &mut options, label, true)?;
            }
            for label in &disable {
                manager::apply_option(&declared, &mut options, label, false)?;
            }

            let record = manager::create_collection(&mut db, registry, &name, &series_type, &options, current_year)?;
            println!("✔ Created {} with {} slots", record.name, record.total);
        }

        Commands::List { json } => {
            let summaries = manager::list_collections(&db)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&summaries)?);
                return Ok(());
            }
            if summaries.is_empty() {
                println!("No collections");
            }
            for summary in summaries {
                println!(
                    "{}. {} [{}] {}/{}",
                    summary.record.display_order + 1,
                    summary.record.name,
                    summary.record.series_type,
                    summary.collected,
                    summary.record.total
                );
            }
        }

        Commands::Show { name, missing } => {
            let record = db.collection(&name)?;
            let definition = registry.lookup(&record.series_type)?;
            for slot in db.fetch_slots(&name)? {
                if missing && slot.collected {
                    continue;
                }
                let mark = if slot.collected { "x" } else { " " };
                let image = definition.resolve_image(&slot, ImageContext::collected(slot.collected));
                let mut line = format!("[{}] {} {}", mark, slot.identifier, slot.mint);
                if cli.verbose {
                    line.push_str(&format!(" ({})", image));
                }
                if slot.grade > 0 || slot.quantity > 0 {
                    line.push_str(&format!("  grade {} qty {}", slot.grade, slot.quantity));
                }
                if !slot.notes.is_empty() {
                    line.push_str(&format!("  \"{}\"", slot.notes));
                }
                println!("{}", line.trim_end());
            }
        }

        Commands::Toggle { name, identifier, mint } => {
            let collected = manager::toggle_slot(&db, &name, &identifier, &mint)?;
            let state = if collected { "collected" } else { "missing" };
            println!("✔ {} {} is now {}", identifier, mint, state);
        }

        Commands::Update { name, identifier, mint, collected, grade, quantity, notes } => {
            let update = manager::SlotUpdate { collected, grade, quantity, notes };
            let slot = manager::update_slot(&db, &name, &identifier, &mint, update)?;
            println!(
                "✔ {} {}: collected={} grade={} quantity={}",
                slot.identifier, slot.mint, slot.collected, slot.grade, slot.quantity
            );
        }

        Commands::Rename { old_name, new_name } => {
            manager::rename_collection(&mut db, &old_name, &new_name)?;
            println!("✔ Renamed {} to {}", old_name, new_name);
        }

        Commands::Delete { name } => {
            manager::delete_collection(&mut db, &name)?;
            println!("✔ Deleted {}", name);
        }

        Commands::Reorder { names } => {
            manager::reorder_collections(&db, &names)?;
            println!("✔ Order updated");
        }

        Commands::View { name, mode } => {
            manager::set_view_mode(&db, &name, mode)?;
            println!("✔ {} view set to {:?}", name, mode);
        }

        Commands::Export { dir } => {
            let dir = match dir {
                Some(dir) => dir,
                None => config.backup_dir()?,
            };
            let count = backup::export_collections(&db, &dir)?;
            println!("✔ Exported {} collection(s) to {}", count, dir.display());
        }

        Commands::Import { dir } => {
            let dir = match dir {
                Some(dir) => dir,
                None => config.backup_dir()?,
            };
            let summary = backup::import_collections(&mut db, registry, &dir, current_year)?;
            println!(
                "✔ Imported {} collection(s), {} slots",
                summary.collections, summary.slots
            );
            if summary.upgraded > 0 {
                println!("✔ Added {} new slot(s) from version {}", summary.upgraded, summary.version);
            }
        }

        Commands::Types | Commands::Config { .. } => {}
    }

    Ok(())
}
