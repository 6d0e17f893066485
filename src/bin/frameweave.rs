use std::{
    fs::File,
    io::{BufReader, BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "frameweave", version)]
struct Cli {
    /// Log engine decisions to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Append the classes of one bytecode program to another.
    Merge(MergeArgs),
    /// Rename a class throughout a bytecode program.
    Rename(RenameArgs),
    /// Print a summary of a bytecode program.
    Dump(DumpArgs),
}

#[derive(Parser, Debug)]
struct MergeArgs {
    /// Program receiving the classes (JSON).
    #[arg(long)]
    target: PathBuf,

    /// Program whose classes are appended (JSON).
    #[arg(long)]
    incoming: PathBuf,

    /// Output program path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct RenameArgs {
    /// Input program (JSON).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Dotted name of the class to rename.
    #[arg(long)]
    class: String,

    /// New dotted name; must include a package.
    #[arg(long)]
    to: String,

    /// Output program path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct DumpArgs {
    /// Input program (JSON).
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Merge(args) => cmd_merge(args),
        Command::Rename(args) => cmd_rename(args),
        Command::Dump(args) => cmd_dump(args),
    }
}

fn cmd_merge(args: MergeArgs) -> anyhow::Result<()> {
    let mut target = read_program(&args.target)?;
    let incoming = read_program(&args.incoming)?;
    let (from, into) = (args.incoming.display(), args.target.display());
    let report = frameweave::merge_programs(&mut target, &incoming)
        .with_context(|| format!("merge '{from}' into '{into}'"))?;
    write_program(&args.out, &target)?;
    eprintln!(
        "merged {} classes, {} methods, {} scripts",
        report.classes, report.methods, report.scripts
    );
    Ok(())
}

fn cmd_rename(args: RenameArgs) -> anyhow::Result<()> {
    let mut program = read_program(&args.in_path)?;
    let old = frameweave::QName::parse_dotted(&args.class);
    if program.class_by_name(&old).is_none() {
        let path = args.in_path.display();
        anyhow::bail!("class '{}' is not defined in '{path}'", args.class);
    }
    let report = frameweave::rename_class(&mut program, &old, &args.to)
        .with_context(|| format!("rename '{}' to '{}'", args.class, args.to))?;
    write_program(&args.out, &program)?;
    eprintln!(
        "renamed {} class(es), {} subclass(es), {} name reference(s)",
        report.classes, report.subclasses, report.names
    );
    Ok(())
}

fn cmd_dump(args: DumpArgs) -> anyhow::Result<()> {
    let program = read_program(&args.in_path)?;
    print!("{}", frameweave::dump::dump_program(&program));
    Ok(())
}

fn read_program(path: &Path) -> anyhow::Result<frameweave::Program> {
    let f = File::open(path).with_context(|| format!("open program '{}'", path.display()))?;
    let r = BufReader::new(f);
    let program: frameweave::Program = serde_json::from_reader(r)
        .with_context(|| format!("parse program JSON '{}'", path.display()))?;
    Ok(program)
}

fn write_program(path: &Path, program: &frameweave::Program) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let f = File::create(path).with_context(|| format!("create '{}'", path.display()))?;
    let mut w = BufWriter::new(f);
    serde_json::to_writer_pretty(&mut w, program)
        .with_context(|| format!("write program '{}'", path.display()))?;
    w.flush()?;
    Ok(())
}
