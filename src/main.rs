use std::io;
use std::process;

use clap::{Arg, ArgMatches, Command};
use log::warn;
use mdbook::errors::Error;
use mdbook::preprocess::{CmdPreprocessor, Preprocessor};

use mdbook_live_wysiwyg::{LiveWysiwyg, RunMode, COMMAND_ENV_VAR};

fn make_app() -> Command {
    Command::new("mdbook-live-wysiwyg")
        .about("An mdbook preprocessor that injects a WYSIWYG editor while serving")
        .subcommand(
            Command::new("supports")
                .arg(Arg::new("renderer").required(true))
                .about("Check whether a renderer is supported by this preprocessor"),
        )
}

fn main() {
    env_logger::init();
    let matches = make_app().get_matches();

    let mut preprocessor = LiveWysiwyg::default();
    preprocessor.on_startup(run_mode_from_env(), false);

    if let Some(sub_args) = matches.subcommand_matches("supports") {
        handle_supports(&preprocessor, sub_args);
    } else if let Err(e) = handle_preprocessing(&preprocessor) {
        eprintln!("{e:?}");
        process::exit(1);
    }
}

fn run_mode_from_env() -> RunMode {
    match std::env::var(COMMAND_ENV_VAR) {
        Ok(command) => RunMode::from_command(&command),
        Err(_) => RunMode::Build,
    }
}

fn handle_supports(pre: &dyn Preprocessor, sub_args: &ArgMatches) -> ! {
    let renderer = sub_args
        .get_one::<String>("renderer")
        .expect("Required argument");
    if pre.supports_renderer(renderer) {
        process::exit(0);
    } else {
        process::exit(1);
    }
}

fn handle_preprocessing(pre: &dyn Preprocessor) -> Result<(), Error> {
    let (ctx, book) = CmdPreprocessor::parse_input(io::stdin())?;

    if ctx.mdbook_version != mdbook::MDBOOK_VERSION {
        warn!(
            "The {} plugin was built against version {} of mdbook, but we're being called from version {}",
            pre.name(),
            mdbook::MDBOOK_VERSION,
            ctx.mdbook_version
        );
    }

    let processed_book = pre.run(&ctx, book)?;
    serde_json::to_writer(io::stdout(), &processed_book)?;

    Ok(())
}
