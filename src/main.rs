//! Command-line front-end: load a catalog, evolve a timetable, save the best one.

use clap::Parser;
use std::path::PathBuf;
use std::process;
use timetable_ga::catalog::Catalog;
use timetable_ga::config::Config;
use timetable_ga::error::Result;
use timetable_ga::utils::{print_timetable, save_schedule};
use timetable_ga::TimetableGa;

#[derive(Parser, Debug)]
#[command(version, about = "Evolve a low-conflict timetable with a genetic algorithm")]
struct Args {
    /// Groups file: name,studentCount
    #[arg(long, default_value = "groups.csv")]
    groups: PathBuf,

    /// Subjects file: groupName,subjectName,weeklyHours
    #[arg(long, default_value = "subjects.csv")]
    subjects: PathBuf,

    /// Rooms file: name,capacity
    #[arg(long, default_value = "rooms.csv")]
    rooms: PathBuf,

    /// Teachers file: name,maxWeeklyHours,subject...
    #[arg(long, default_value = "teachers.csv")]
    teachers: PathBuf,

    /// Where to write the best timetable
    #[arg(long, short, default_value = "final_schedule.csv")]
    output: PathBuf,

    /// JSON file overriding the default search parameters
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    population_size: Option<usize>,

    #[arg(long)]
    generations: Option<usize>,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Print the timetable to stdout
    #[arg(long)]
    print: bool,
}

fn build_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::from_json_file(path)?,
        None => Config::default(),
    };

    if let Some(size) = args.population_size {
        config = config.with_population_size(size);
    }
    if let Some(generations) = args.generations {
        config = config.with_generations(generations);
    }
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    Ok(config)
}

fn run(args: &Args) -> Result<()> {
    let config = build_config(args)?;

    log::info!("Loading catalog");
    let catalog = Catalog::from_csv_files(&args.groups, &args.subjects, &args.rooms, &args.teachers)?;
    log::info!(
        "Loaded {} groups, {} rooms, {} teachers ({} requirements)",
        catalog.groups.len(),
        catalog.rooms.len(),
        catalog.teachers.len(),
        catalog.requirement_count()
    );

    let mut algorithm = TimetableGa::new(catalog, config)?;
    algorithm.run()?;
    let best = algorithm.best()?;

    log::info!("Saving best timetable to {}", args.output.display());
    save_schedule(best, &algorithm.catalog, &args.output)?;

    if args.print {
        print_timetable(best, &algorithm.catalog);
    }
    println!("{}", algorithm.statistics().format());

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        log::error!("{}", e);
        process::exit(1);
    }
}
