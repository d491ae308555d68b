use clap::Parser;
use notekeeper::cli::{
    handle_add, handle_delete, handle_get, handle_list, handle_serve, handle_update, report_error,
    Cli, Commands,
};
use notekeeper::config::Config;
use notekeeper::Result;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{}", report_error(&e));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(url) = cli.url {
        config.client.base_url = url;
    }

    match cli.command {
        Commands::Serve {
            bind,
            database,
            in_memory,
            cors_origin,
            log_json,
        } => {
            let mut server = config.server;
            if let Some(bind) = bind {
                server.bind = bind;
            }
            if let Some(database) = database {
                server.database = database;
            }
            if let Some(origin) = cors_origin {
                server.cors_origin = Some(origin);
            }
            server.log_json |= log_json;
            handle_serve(server, in_memory)
        }
        Commands::List { json } => handle_list(&config.client, json),
        Commands::Get { id, json } => handle_get(&config.client, id, json),
        Commands::Add {
            title,
            description,
            json,
        } => handle_add(&config.client, title, description, json),
        Commands::Update {
            id,
            title,
            description,
            json,
        } => handle_update(&config.client, id, title, description, json),
        Commands::Delete { id } => handle_delete(&config.client, id),
    }
}
