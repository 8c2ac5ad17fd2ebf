use anyhow::Context;
use emfcore::dump::{describe, describe_header};
use emfcore::{record_name, EmfFile};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn usage() -> ExitCode {
    eprintln!("usage: emf_dump [--verbose|-v] [--limit N] FILE");
    ExitCode::from(2)
}

fn main() -> anyhow::Result<ExitCode> {
    let mut raw_args: Vec<String> = std::env::args().skip(1).collect();
    let verbose = if let Some(pos) = raw_args.iter().position(|a| a == "--verbose" || a == "-v") {
        raw_args.remove(pos);
        true
    } else {
        false
    };
    let limit: Option<usize> = match raw_args.iter().position(|a| a == "--limit") {
        Some(pos) if pos + 1 < raw_args.len() => {
            let value = raw_args.remove(pos + 1);
            raw_args.remove(pos);
            Some(value.parse().with_context(|| format!("invalid --limit value {value:?}"))?)
        }
        Some(_) => return Ok(usage()),
        None => None,
    };
    let mut args = raw_args.into_iter();
    let Some(path) = args.next().map(PathBuf::from) else {
        return Ok(usage());
    };

    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_writer(std::io::stderr)
        .init();

    let bytes = std::fs::read(&path).with_context(|| format!("reading {}", path.display()))?;
    let file = match EmfFile::open(&bytes) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("{}: {:?}: {}", path.display(), err.kind(), err);
            return Ok(ExitCode::FAILURE);
        }
    };
    println!("{}: {}", path.display(), describe_header(file.header()));

    let mut count = 0usize;
    let mut records = file.records();
    loop {
        let offset = records.position();
        let Some(record) = records.next() else { break };
        let record = match record {
            Ok(record) => record,
            Err(err) => {
                eprintln!("{}: {:?}: {}", path.display(), err.kind(), err);
                return Ok(ExitCode::FAILURE);
            }
        };
        let tag = record.record_type();
        println!("{:08x} {:3} {:<28} {}", offset, tag, record_name(tag), describe(&record));
        count += 1;
        if limit.is_some_and(|n| count >= n) {
            break;
        }
    }
    println!("{} records", count);
    Ok(ExitCode::SUCCESS)
}
