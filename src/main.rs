use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use season_roster::display::{print_proposals, print_schedule, print_summary};
use season_roster::{logging, web, PlannerConfig, Season};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let config = PlannerConfig::from_env()?;
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut season = Season::sample(&config, &mut rng)?;

    // Check if we should run in web mode
    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 && args[1] == "web" {
        let port = args.get(2)
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(8080);
        let password = std::env::var("ADMIN_PASSWORD")
            .unwrap_or_else(|_| "admin123".to_string());

        info!(port, "starting web server");
        web::start_server(port, web::AppState::new(season, config, password)).await?;
        return Ok(());
    }

    // CLI mode: plan the sampled season and print it
    let schedule = season.plan()?.clone();
    print_schedule(season.events(), &schedule);

    if let Some(summary) = season.summary()? {
        print_summary(&summary);
    }

    let feed = season.proposals()?;
    print_proposals(season.events(), &feed);

    Ok(())
}
