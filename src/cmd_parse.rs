use argh::FromArgs;

use pegcore::builtin_grammars::all_builtin_grammars;
use pegcore::debug::{self, DebugConfig, DebugLevel};
use pegcore::{debug_basic, debug_detailed};

#[derive(FromArgs)]
/// parse input text against one of the builtin demo grammars
#[argh(subcommand, name = "parse")]
pub struct Parse {
    /// builtin grammar name (see `pgc list`)
    #[argh(option, short = 'g')]
    grammar: String,

    /// input text to parse
    #[argh(option, short = 'i')]
    input: String,

    /// verbosity level: off, basic, detailed, trace
    #[argh(option, short = 'v', default = "default_verbose()")]
    verbose: String,

    /// debug only at a specific input position (for trace mode)
    #[argh(option, long = "debug-pos")]
    debug_pos: Option<usize>,
}

impl Parse {
    pub fn run(self) {
        let level = match DebugLevel::from_str(&self.verbose) {
            Ok(level) => level,
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        };
        debug::set_debug_config(DebugConfig {
            level,
            position_filter: self.debug_pos,
            failure_only: false,
        });

        debug_basic!("grammar: {}", self.grammar);
        debug_basic!("input: {}", self.input);

        let builtin = all_builtin_grammars().into_iter().find(|b| b.name() == self.grammar);
        let builtin = match builtin {
            Some(b) => b,
            None => {
                eprintln!("unknown builtin grammar '{}' (see `pgc list`)", self.grammar);
                std::process::exit(1);
            }
        };

        let (grammar, root) = builtin.build();
        debug_detailed!("grammar built, parsing now");

        match grammar.parse(&root, &self.input) {
            Ok(value) => println!("{:?}", value),
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
    }
}

#[derive(FromArgs)]
/// list the builtin demo grammars
#[argh(subcommand, name = "list")]
pub struct List {}

impl List {
    pub fn run(self) {
        for builtin in all_builtin_grammars() {
            println!("{}", builtin.name());
        }
    }
}

fn default_verbose() -> String {
    "off".to_string()
}
