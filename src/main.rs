use app::{AppHelper, ArgumentsCommand, AuthorsCommand, CheckCommand, Command, QueryCommand};

mod app;

fn main() {
    let app_name = option_env!("CARGO_PKG_NAME").unwrap_or("unknown app name");
    let app_version = option_env!("CARGO_PKG_VERSION").unwrap_or("unknown version");
    let authors = option_env!("CARGO_PKG_AUTHORS").unwrap_or("unknown authors");
    let mut app = AppHelper::new(
        app_name,
        app_version,
        authors,
        "Crudelp, a defeasible logic programming reasoner.",
    );
    let commands: Vec<Box<dyn Command>> = vec![
        Box::new(AuthorsCommand::new(app_name, app_version, authors)),
        Box::new(CheckCommand::new()),
        Box::new(ArgumentsCommand::new()),
        Box::new(QueryCommand::new()),
    ];
    for c in commands {
        app.add_command(c);
    }
    app.launch_app();
}
