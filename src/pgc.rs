use argh::FromArgs;

#[path = "cmd_parse.rs"]
mod cmd_parse;

#[derive(FromArgs)]
/// a small PEG parsing engine, demonstrated over a handful of builtin grammars
struct Args {
    #[argh(subcommand)]
    subcommand: Subcommand,
}

#[derive(FromArgs)]
#[argh(subcommand)]
enum Subcommand {
    Parse(cmd_parse::Parse),
    List(cmd_parse::List),
}

impl Subcommand {
    fn run(self) {
        match self {
            Subcommand::Parse(cmd) => cmd.run(),
            Subcommand::List(cmd) => cmd.run(),
        }
    }
}

fn main() {
    env_logger::init();
    argh::from_env::<Args>().subcommand.run();
}
