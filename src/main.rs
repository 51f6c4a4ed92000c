mod export;
mod timetable;
mod web;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    let port = args.get(1)
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8080);

    println!("Starting timetable maker on port {}...", port);
    println!("Access the site at http://localhost:{}", port);

    web::start_server(port).await?;
    Ok(())
}
