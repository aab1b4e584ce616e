use std::{fs, path::Path, process};

use clap::Parser;
use text_huffman::{
    archive::Archive,
    encoder::compress,
    properties::Properties,
    report::Report,
    utils::{timer::Timer, write_atomic},
    FrequencyTable, HuffmanTree, Result,
};

#[derive(Parser, Debug)]
#[command(about = "Compress a text file with a static Huffman code")]
struct Args {
    /// The text file to compress
    source_name: String,
    /// The destination basename: <dest>.huff, <dest>.codes and <dest>.properties are written
    dest_name: String,
    /// Where to dump the human-readable code table (defaults to <dest>.codes)
    #[arg(long = "codes")]
    codes_name: Option<String>,
    /// Also write the self-contained <dest>.hz archive
    #[arg(short, long, default_value_t = false)]
    archive: bool,
    /// Print the report as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
    /// Print the Huffman tree before compressing
    #[arg(long = "show-tree", default_value_t = false)]
    show_tree: bool,
    /// Print the time spent in every stage
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn run(args: &Args) -> Result<Report> {
    let mut timer = Timer::new();

    let text = fs::read_to_string(&args.source_name)?;
    timer.lap("read");

    if args.show_tree {
        let tree = HuffmanTree::build(&FrequencyTable::from_text(&text))?;
        print!("{}", tree);
        println!("{} leaves, depth {}", tree.leaf_count(), tree.depth());
    }

    let compressed = compress(&text)?;
    timer.lap("encode");

    write_atomic(Path::new(&format!("{}.huff", args.dest_name)), compressed.payload.as_bytes())?;

    let codes_name = args.codes_name.clone().unwrap_or_else(|| format!("{}.codes", args.dest_name));
    write_atomic(Path::new(&codes_name), compressed.codes.to_string().as_bytes())?;

    Properties::new(&compressed, text.len()).store(&args.dest_name)?;

    let compressed_bytes = compressed.payload.as_bytes().len() as u64;
    if args.archive {
        Archive::from(compressed).store(&args.dest_name)?;
    }
    timer.lap("write");

    if args.verbose {
        for (stage, time) in timer.laps() {
            println!("{} took {}ns", stage, time.as_nanos());
        }
    }

    Ok(Report::new(text.len() as u64, compressed_bytes, timer.elapsed()))
}

fn main() {
    let args = Args::parse();

    let report = run(&args).unwrap_or_else(|e| {
        eprintln!("An error has occurred while compressing {}: {}", args.source_name, e);
        process::exit(1);
    });

    if args.json {
        match report.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("An error has occurred while rendering the report: {}", e);
                process::exit(1);
            }
        }
    } else {
        println!("{}", report);
    }
}
