use anyhow::Result;
use colored::Colorize;

use crate::app::App;
use crate::render;

pub fn show(app: &App) -> Result<()> {
    let path = app.config_service.paths().config_file()?;
    println!("{}", format!("# {}", path.display()).bright_black());
    println!("base_url = {:?}", app.config.base_url);
    match &app.config.token_file {
        Some(token_file) => println!("token_file = {:?}", token_file.display().to_string()),
        None => println!("{}", format!("# token_file = {:?}", app.token_path.display().to_string()).bright_black()),
    }
    println!("log_level = {:?}", app.config.log_level);
    println!("log_to_file = {}", app.config.log_to_file);
    Ok(())
}

pub fn init(app: &App) -> Result<()> {
    let path = app.config_service.save(&app.config)?;
    render::success(&format!("Wrote {}", path.display()));
    Ok(())
}
