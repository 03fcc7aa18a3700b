use clap::{Parser as ClapParser, Subcommand};
use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    process,
};

use bareio::{InterpreterSettings, Outcome};
use log::info;

use stage0::{Error, compile_source, dump, generate, read_source, render_error, run_image};

#[derive(ClapParser, Debug)]
#[command(author, version, about = "Build and run BareIO scripts", long_about = None)]
struct Cli {
    /// Log build phases (overrides RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate a script on the host, printing console output to stdout
    Run {
        #[arg(help = "The .bio file to run")]
        file: PathBuf,

        /// Maximum nesting of argument scripts
        #[arg(long)]
        max_depth: Option<usize>,
    },
    /// Emit Rust statics for a firmware image
    Compile {
        #[arg(help = "The .bio file to compile")]
        file: PathBuf,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Name of the generated root `Script` static
        #[arg(long, default_value = "SCRIPT")]
        name: String,
    },
    /// Print the flattened image with raw message identifiers
    Dump {
        #[arg(help = "The .bio file to dump")]
        file: PathBuf,
    },
}

fn init_logging(verbose: bool) {
    let env = env_logger::Env::default().default_filter_or("warn");
    let mut builder = env_logger::Builder::from_env(env);
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let (file, result) = match &cli.command {
        Command::Run { file, max_depth } => (file, run(file, *max_depth)),
        Command::Compile {
            file,
            output,
            name,
        } => (file, compile(file, output.as_deref(), name)),
        Command::Dump { file } => (file, dump_file(file)),
    };

    if let Err(err) = result {
        let source = fs::read(file).unwrap_or_default();
        eprint!("{}", render_error(&source, &err));
        if err.span().is_none() {
            eprintln!();
        }
        process::exit(1);
    }
}

fn run(file: &Path, max_depth: Option<usize>) -> Result<(), Error> {
    let source = read_source(file)?;
    let image = compile_source(&source)?;

    let mut settings = InterpreterSettings::default();
    if let Some(max_depth) = max_depth {
        settings.max_depth = max_depth;
    }

    let (outcome, _) = run_image(&image, settings, io::stdout().lock())?;
    match outcome {
        Outcome::Halted => info!("{} halted", file.display()),
        Outcome::Completed(result) => {
            info!("{} completed with {result:?}", file.display())
        }
    }
    Ok(())
}

fn compile(file: &Path, output: Option<&Path>, name: &str) -> Result<(), Error> {
    let source = read_source(file)?;
    let image = compile_source(&source)?;
    let code = generate(&image, name)?;

    match output {
        Some(path) => {
            fs::write(path, code).map_err(|err| Error::io(path, err))?;
            info!("wrote {}", path.display());
        }
        None => {
            io::stdout()
                .write_all(code.as_bytes())
                .map_err(|err| Error::io("<stdout>", err))?;
        }
    }
    Ok(())
}

fn dump_file(file: &Path) -> Result<(), Error> {
    let source = read_source(file)?;
    let image = compile_source(&source)?;
    print!("{}", dump(&image));
    Ok(())
}
