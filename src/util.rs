use clap::ArgMatches;
use serde_json::{json, Value};

use crate::coloring::{RetryMode, SdrParams};
use crate::graph::{ColorMap, Graph};
use crate::strategy::SelectionStrategy;
use crate::{dimacs, json};

/** reads command line input and returns the instance name, the graph, the
instance type, the solution filename and the stats filename */
pub fn read_params(main_args: &ArgMatches) -> (String, Graph, String, Option<String>, Option<String>) {
    let inst_filename = main_args.value_of("instance").unwrap();
    let instance_type = main_args.value_of("type").unwrap();
    // read value of the solution filename
    let sol_file: Option<String> = match main_args.value_of("solution") {
        None => None,
        Some(e) => {
            println!("printing solutions in: {}", e);
            Some(e.to_string())
        }
    };
    // read value of the performance logs filename
    let perf_file: Option<String> = match main_args.value_of("perf") {
        None => None,
        Some(e) => {
            println!("printing perfs in: {}\n", e);
            Some(e.to_string())
        }
    };
    // read instance file
    let mut graph = match instance_type {
        "dimacs" => dimacs::read_from_file(inst_filename),
        "json" => json::read_from_file(inst_filename),
        _ => panic!("instance type unknown {}", instance_type),
    };
    graph.display_statistics();
    println!("=======================");
    (inst_filename.to_string(), graph, instance_type.to_string(), sol_file, perf_file)
}

/// bias-sharpening exponent given on the command line (1.0 if absent)
pub fn read_exponent(main_args: &ArgMatches) -> f64 {
    main_args.value_of("exponent").unwrap_or("1.0").parse::<f64>()
        .expect("unable to parse the exponent given")
}

/** builds the randomized-run parameters from the command line around the
given selection policy */
pub fn read_sdr_params(main_args: &ArgMatches, strategy: SelectionStrategy) -> SdrParams {
    let mut params = SdrParams { strategy, ..SdrParams::default() };
    if let Some(s) = main_args.value_of("seed") {
        params.seed = Some(s.parse::<u64>().expect("unable to parse the seed given"));
    }
    if let Some(a) = main_args.value_of("attempts") {
        params.max_attempts = a.parse::<usize>().expect("unable to parse the attempts given");
    }
    if main_args.is_present("fixed_seed") {
        params.mode = RetryMode::FixedSeed;
    }
    params
}

/// run statistics record exported to the perf file
pub fn coloring_stats(instance: &str, algorithm: &str, colors_used: usize, seconds: f32) -> Value {
    json!({
        "instance": instance,
        "algorithm": algorithm,
        "colors": colors_used,
        "time": seconds,
    })
}

/// exports coloring results to files
pub fn export_results(
    source: &Graph,
    colors: &ColorMap,
    stats: &Value,
    perf_file: Option<String>,
    sol_file: Option<String>,
    instance_type: &str,
    check_result: bool,
) {
    // export statistics
    match perf_file {
        None => {}
        Some(filename) => {
            let mut file = match std::fs::File::create(filename.as_str()) {
                Err(why) => panic!("couldn't create {}: {}", filename, why),
                Ok(file) => file,
            };
            if let Err(why) = std::io::Write::write(
                &mut file, serde_json::to_string(stats).unwrap().as_bytes()
            ) { panic!("couldn't write: {}", why) };
        }
    }
    // export solution
    match sol_file {
        None => {}
        Some(filename) => {
            let mut colored = source.clone();
            colored.apply_colors(colors);
            if check_result && colored.check_coloring().is_none() {
                println!("invalid solution");
            }
            match instance_type {
                "json" => json::write_to_file(&colored, filename.as_str()),
                _ => dimacs::write_solution(filename.as_str(), colors),
            }
        }
    }
}
