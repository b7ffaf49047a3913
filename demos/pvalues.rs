use std::path::Path;
use std::process;

use setenrich::parser::{load_named_sets, load_set_table, load_universe};
use setenrich::{multi_set_pvalues, BatchConfig, EnrichmentResult, SetCollection};

struct Arguments {
    universe: String,
    references: Vec<String>,
    queries: Vec<String>,
    output: String,
    index_label: String,
    pooled: bool,
    config: BatchConfig,
}

fn usage() -> ! {
    println!("Calculate enrichment p-values of reference sets in query sets\n\n");
    println!("Usage\npvalues <UNIVERSE> <REF1,REF2,...> <QUERY TABLE | QUE1,QUE2,...> <OUTPUT CSV> [--pooled] [--seed N] [--repeats N] [--index-label NAME]");
    println!("\nQueries are either a tab separated set table (.tsv) or a list of name list files, tagged by file name");
    println!("\npvalues genes.txt psg-0.txt,psg-plos2016.txt degs.tsv pvalues.csv --seed 42");
    println!("pvalues genes.txt psg-0.txt top-10.txt,top-20.txt pvalues.csv --index-label ntop_markers\n");
    process::exit(1)
}

fn parse_args() -> Arguments {
    let mut args = std::env::args().skip(1);
    let (Some(universe), Some(references), Some(queries), Some(output)) =
        (args.next(), args.next(), args.next(), args.next())
    else {
        usage()
    };

    let mut pooled = false;
    let mut index_label = String::from("cluster");
    let mut config = BatchConfig::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--pooled" => pooled = true,
            "--seed" => match args.next().and_then(|v| v.parse::<u64>().ok()) {
                Some(seed) => config = config.with_seed(seed),
                None => usage(),
            },
            "--repeats" => match args.next().and_then(|v| v.parse::<u32>().ok()) {
                Some(repeats) => config = config.with_repeats(repeats),
                None => usage(),
            },
            "--index-label" => match args.next() {
                Some(label) => index_label = label,
                None => usage(),
            },
            _ => usage(),
        }
    }

    Arguments {
        universe,
        references: references.split(',').map(String::from).collect(),
        queries: queries.split(',').map(String::from).collect(),
        output,
        index_label,
        pooled,
        config,
    }
}

/// A single `.tsv` file is a set table, everything else a list of name list files
fn load_queries(files: &[String]) -> EnrichmentResult<SetCollection> {
    match files {
        [table] if Path::new(table).extension().is_some_and(|ext| ext == "tsv") => {
            load_set_table(table)
        }
        _ => load_named_sets(files),
    }
}

fn run(args: &Arguments) -> EnrichmentResult<()> {
    let universe = load_universe(&args.universe)?;
    let references = load_named_sets(&args.references)?;
    let mut queries = load_queries(&args.queries)?;
    if args.pooled {
        queries = [("pooled DEGs", queries.pooled())].into_iter().collect();
    }

    let table = multi_set_pvalues(&references, &queries, &universe, &args.config)?;
    println!("{table}");
    table.to_csv_file(&args.output, &args.index_label)
}

fn main() {
    simple_logger::init_with_env().expect("logger is initialized only once");
    let args = parse_args();

    if let Err(err) = run(&args) {
        eprintln!("{err}");
        process::exit(1);
    }

    println!(
        "\nReferences: {}\nQueries: {}\nRepeats: {}\nOutput: {}",
        args.references.len(),
        args.queries.len(),
        args.config.repeats(),
        args.output
    );
}
