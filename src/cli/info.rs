use anyhow::Result;

use crate::cli::context::CliContext;

pub fn cmd_info(ctx: &CliContext) -> Result<()> {
    let config = ctx.config();

    println!("Scenario Forge v{}", env!("CARGO_PKG_VERSION"));
    println!("  Build date: {}", option_env!("BUILD_DATE").unwrap_or("unknown"));
    println!("  Git hash:   {}", option_env!("GIT_HASH").unwrap_or("unknown"));
    println!("  Git branch: {}", option_env!("GIT_BRANCH").unwrap_or("unknown"));
    println!();
    println!("Configuration:");
    match ctx.config_path() {
        Some(path) => println!("  Source:     {}", path.display()),
        None => println!("  Source:     built-in defaults"),
    }
    println!("  Project:    {}", config.project_dir.display());
    println!("  Specs:      {}", config.spec_root().display());
    println!(
        "  Runner:     {} {}",
        config.runner.command,
        config.runner.args.join(" ")
    );
    println!("  Suite:      {}", config.suite_title);
    println!(
        "  Viewport:   {}x{}",
        config.viewport.width, config.viewport.height
    );
    Ok(())
}
