use std::{fs, path::Path, process, time::Instant};

use clap::Parser;
use text_huffman::{archive::Archive, properties::Properties, utils::write_atomic, Result};

#[derive(Parser, Debug)]
#[command(about = "Restore a text file compressed with text_huffman")]
struct Args {
    /// The basename of the compressed files (<source>.huff and <source>.properties)
    source_name: String,
    /// The file the restored text is written to
    dest_name: String,
    /// Read the self-contained <source>.hz archive instead
    #[arg(short, long, default_value_t = false)]
    archive: bool,
}

fn run(args: &Args) -> Result<usize> {
    let compressed = if args.archive {
        Archive::load(&args.source_name)?.compressed
    } else {
        let props = Properties::load(&args.source_name)?;
        let payload = fs::read(format!("{}.huff", args.source_name))?;
        props.attach(payload)?
    };

    let text = compressed.decompress()?;
    write_atomic(Path::new(&args.dest_name), text.as_bytes())?;

    Ok(text.len())
}

fn main() {
    let args = Args::parse();

    let decomp_time = Instant::now();
    let written = run(&args).unwrap_or_else(|e| {
        eprintln!("An error has occurred while decompressing {}: {}", args.source_name, e);
        process::exit(1);
    });
    let decomp_time = decomp_time.elapsed().as_nanos();

    println!("decompressed {} bytes into {} in {}ns", written, args.dest_name, decomp_time);
}
