//! A to M native entry point
//!
//! The browser build is driven from JS through `platform::web::WebGame`.
//! Natively there is no window, so this runs a headless autoplay: it drags
//! the A straight onto the M until the run finishes and prints the final
//! snapshot as JSON.
//!
//! Usage: `a-to-m [settings.json] [target-score]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use a_to_m::{Game, GamePhase, PieceId, Settings};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load(std::path::Path::new(&path)).unwrap_or_else(|e| {
            log::error!("{}; using defaults", e);
            Settings::default()
        }),
        None => Settings::default(),
    };
    let target = args
        .next()
        .and_then(|s| s.parse::<u32>().ok())
        .or_else(|| settings.target_score_presets.first().copied())
        .unwrap_or(1);

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let mut game = Game::headless(settings, seed);
    game.select_target_score(target);

    let max_drags = target.saturating_mul(10);
    let mut drags = 0u32;
    while game.session().phase == GamePhase::Playing {
        if drags >= max_drags {
            log::warn!("Gave up after {} drags; pieces may not fit the threshold", drags);
            break;
        }
        let striker = game.session().striker;
        let goal = game.session().target;

        // Grab the middle of the A and drop it on the middle of the M
        let grab = striker.center();
        game.grab(grab, PieceId::Striker);
        for step in 1..=10 {
            let t = step as f32 / 10.0;
            game.pointer_move(grab.lerp(goal.center(), t));
            game.tick();
        }
        game.release();
        drags += 1;
        log::info!("Drag {}: score {}/{}", drags, game.session().score, game.session().target_score);
    }

    match serde_json::to_string_pretty(&game.snapshot()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Snapshot encoding failed: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::start, this is just to satisfy the compiler
}
