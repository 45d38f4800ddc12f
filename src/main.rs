use clap::Parser;

use gamedex::cli::{Cli, Commands, handle_cron, handle_deploy, handle_logs};
use gamedex::config::{get_config, load_config_from};
use gamedex::runtime::run_server;
use gamedex::system::init_logging;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // .env 优先于 .env.dev：dotenvy 保留先写入的值，所以先载入 .env
    dotenvy::dotenv().ok();
    dotenvy::from_filename(".env.dev").ok();

    let cli = Cli::parse();

    let config = match cli.config.as_deref() {
        Some(path) => load_config_from(path),
        None => get_config(),
    };

    // Guard 必须存活到进程结束，否则缓冲日志会丢
    let _guard = init_logging(config);

    match cli.command {
        None | Some(Commands::Serve) => run_server(config).await,
        Some(Commands::Deploy {
            from_scratch,
            if_needed,
            prod,
        }) => {
            if let Err(e) = handle_deploy(config, from_scratch, if_needed, prod) {
                eprintln!("{}", e.format_colored());
                std::process::exit(1);
            }
            Ok(())
        }
        Some(Commands::Cron { action }) => {
            if let Err(e) = handle_cron(config, &action) {
                eprintln!("{}", e.format_colored());
                std::process::exit(1);
            }
            Ok(())
        }
        Some(Commands::Logs { action }) => {
            if let Err(e) = handle_logs(config, &action) {
                eprintln!("{}", e.format_colored());
                std::process::exit(1);
            }
            Ok(())
        }
    }
}
