use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Context, Result};
use lisplite::source::SourceFile;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Once;

#[derive(Debug, Parser)]
#[clap(name = "lisplite", version)]
pub struct CLArgs {
    #[clap(subcommand)]
    pub routine: LispCommand,
}

#[derive(Debug, Subcommand)]
pub enum LispCommand {
    Tokenize {
        path: PathBuf,
        #[clap(long = "format", value_enum, default_value = "basic")]
        format: TokenFormat,
    },
    Parse {
        path: PathBuf,
        #[clap(long = "format", value_enum, default_value = "tree")]
        format: ProgramFormat,
        #[clap(long = "color")]
        color: bool,
    },
    Run {
        path: PathBuf,
        #[clap(long = "errors", value_enum, default_value = "pretty")]
        errors: ErrorFormat,
        #[clap(long = "no-tree")]
        no_tree: bool,
        #[clap(long = "color")]
        color: bool,
    },
}

#[derive(Debug, Clone, ValueEnum)]
pub enum TokenFormat {
    Debug,
    Basic,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ProgramFormat {
    Debug,
    Tree,
    #[clap(name = "sexpr")]
    SExpr,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ErrorFormat {
    Debug,
    Basic,
    Pretty,
}

const LEXICAL_OR_PARSE_FAILURE: u8 = 65;

fn main() -> ExitCode {
    lisp_main().expect("Encountered an error!")
}

fn lisp_main() -> Result<ExitCode> {
    color_eyre::install().expect("Can't fail at first call!");
    init_tracing();
    let args = CLArgs::parse();
    match args.routine {
        LispCommand::Tokenize { path, format } => {
            let source = read_source(&path)?;
            Ok(tokenize(&source, &format))
        }
        LispCommand::Parse {
            path,
            format,
            color,
        } => {
            let source = read_source(&path)?;
            Ok(parse(&source, &format, color))
        }
        LispCommand::Run {
            path,
            errors,
            no_tree,
            color,
        } => {
            let source = read_source(&path)?;
            Ok(run(&source, &errors, !no_tree, color))
        }
    }
}

/// Installs a stderr subscriber, but only when `RUST_LOG` asks for one.
fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        if std::env::var("RUST_LOG").is_err() {
            return;
        }
        use tracing_subscriber::prelude::*;
        use tracing_subscriber::{fmt, EnvFilter};

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true),
            )
            .with(EnvFilter::from_default_env())
            .init();
    });
}

fn read_source(path: &Path) -> Result<SourceFile> {
    SourceFile::read(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn tokenize(source: &SourceFile, format: &TokenFormat) -> ExitCode {
    use lisplite::lexer::formatter::{BasicFormatter, DebugFormatter, TokenFormatter};
    use lisplite::lexer::Lexer;

    let formatter: Box<dyn TokenFormatter> = match format {
        TokenFormat::Debug => Box::new(DebugFormatter),
        TokenFormat::Basic => Box::new(BasicFormatter::new(source.display_text())),
    };
    for result in Lexer::new(source.text()) {
        match result {
            Ok(token) => println!("{}", formatter.format(&token)),
            Err(error) => {
                eprintln!("{}", formatter.format_error(&error));
                return ExitCode::from(LEXICAL_OR_PARSE_FAILURE);
            }
        }
    }
    ExitCode::SUCCESS
}

fn parse(source: &SourceFile, format: &ProgramFormat, color: bool) -> ExitCode {
    use lisplite::parser::formatter::{
        BasicParserFormatter, DebugProgramFormatter, ParserFormatter, ProgramFormatter,
        SExpressionFormatter, TreeFormatter,
    };

    let program = match lisplite::parser::parse(source.text()) {
        Ok(program) => program,
        Err(error) => {
            let formatter = BasicParserFormatter::new(source.display_text());
            eprintln!("{}", formatter.format_error(&error));
            return ExitCode::from(LEXICAL_OR_PARSE_FAILURE);
        }
    };
    let formatter: Box<dyn ProgramFormatter> = match format {
        ProgramFormat::Debug => Box::new(DebugProgramFormatter),
        ProgramFormat::Tree => Box::new(TreeFormatter::new(color)),
        ProgramFormat::SExpr => Box::new(SExpressionFormatter),
    };
    print!("{}", formatter.format(&program));
    ExitCode::SUCCESS
}

fn run(source: &SourceFile, errors: &ErrorFormat, show_tree: bool, color: bool) -> ExitCode {
    use lisplite::error::LispError;
    use lisplite::interpreter::context::StdioContext;
    use lisplite::interpreter::formatter::{
        BasicFormatter, DebugFormatter, PrettyFormatter, ValueFormatter,
    };
    use lisplite::interpreter::TreeWalkInterpreter;
    use lisplite::parser::formatter::{
        BasicParserFormatter, DebugParserFormatter, ParserFormatter, PrettyParserFormatter,
        ProgramFormatter, TreeFormatter,
    };

    let text = source.display_text();
    let path = source.path();

    let program = match lisplite::parser::parse(source.text()) {
        Ok(program) => program,
        Err(error) => {
            let formatter: Box<dyn ParserFormatter + '_> = match errors {
                ErrorFormat::Debug => Box::new(DebugParserFormatter),
                ErrorFormat::Basic => Box::new(BasicParserFormatter::new(text)),
                ErrorFormat::Pretty => Box::new(PrettyParserFormatter::new(text, path)),
            };
            eprintln!("{}", formatter.format_error(&error));
            return ExitCode::from(LispError::from(error).exit_code());
        }
    };

    if show_tree {
        print!("{}", TreeFormatter::new(color).format(&program));
    }

    let mut interpreter = TreeWalkInterpreter::new();
    let formatter: Box<dyn ValueFormatter + '_> = match errors {
        ErrorFormat::Debug => Box::new(DebugFormatter),
        ErrorFormat::Basic => Box::new(BasicFormatter::new(text)),
        ErrorFormat::Pretty => Box::new(PrettyFormatter::new(text, path)),
    };
    match interpreter.run(&program, &mut StdioContext) {
        Ok(value) => {
            println!("Result: {}", formatter.format(&value));
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("{}", formatter.format_error(&error));
            ExitCode::from(LispError::from(error).exit_code())
        }
    }
}
