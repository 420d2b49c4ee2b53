use std::io::{self, Read};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use kleenexp::{CompileOptions, DebugTracer, Flavor as KeFlavor, compile_traced};

/// Compile a Kleene Expression into a regex for the chosen target flavor.
#[derive(Parser, Debug)]
#[command(name = "kleenexp", version, about, long_about = None)]
struct Cli {
    /// Kleene Expression source. Reads from stdin when omitted.
    source: Option<String>,

    /// Target regex dialect.
    #[arg(long, value_enum, default_value_t = FlavorArg::Pcre)]
    flavor: FlavorArg,

    /// Additionally toggle multiline anchor semantics.
    #[arg(long)]
    multiline: bool,

    /// Resolve letter-case macros to Unicode property classes.
    #[arg(long)]
    unicode: bool,

    /// Recursion guard for macro expansion.
    #[arg(long, default_value_t = 100)]
    max_expansion_depth: usize,

    /// Print a trace of each compiler stage to stderr.
    #[arg(long)]
    debug: bool,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum FlavorArg {
    Pcre,
    Ecmascript,
}

impl From<FlavorArg> for KeFlavor {
    fn from(value: FlavorArg) -> Self {
        match value {
            FlavorArg::Pcre => KeFlavor::Pcre,
            FlavorArg::Ecmascript => KeFlavor::EcmaScript,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let source = match cli.source.clone() {
        Some(s) => s,
        None => {
            let mut buf = String::new();
            if let Err(err) = io::stdin().read_to_string(&mut buf) {
                eprintln!("error reading stdin: {err}");
                return ExitCode::from(2);
            }
            buf.trim_end_matches('\n').to_string()
        }
    };

    let options = CompileOptions {
        flavor: cli.flavor.into(),
        multiline: cli.multiline,
        unicode: cli.unicode,
        max_expansion_depth: cli.max_expansion_depth,
    };

    let tracer = DebugTracer::new(cli.debug, source.clone());
    match compile_traced(&source, &options, &tracer) {
        Ok(pattern) => {
            println!("{pattern}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
