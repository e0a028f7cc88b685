//! command-line entry point of the approximate coloring algorithms

use std::time::Instant;

use clap::{load_yaml, App};

use sdr_color::coloring::{
    color_c, color_d, color_e, sdr_c, sdr_d, sdr_e, ColorMap, Winner,
};
use sdr_color::strategy::SelectionStrategy;
use sdr_color::util::{
    coloring_stats, export_results, read_exponent, read_params, read_sdr_params,
};

/**
reads an instance, runs the selected coloring algorithm, and exports the
coloring and run statistics.

# Panics
 - if the instance cannot be read or no algorithm subcommand is given
*/
pub fn main() {
    env_logger::init();
    // parse arguments
    let yaml = load_yaml!("main_args.yml");
    let main_args = App::from_yaml(yaml).get_matches();
    println!("=========================================================");
    let (inst_filename, graph, instance_type, sol_file, perf_file) = read_params(&main_args);
    let time_init = Instant::now();
    let mut colors = ColorMap::new();
    let (algorithm, colors_used) = if main_args.subcommand_matches("recursive").is_some() {
        let used = color_c(&graph, &mut colors)
            .unwrap_or_else(|e| panic!("recursive search failed: {}", e));
        ("recursive", used)
    } else if main_args.subcommand_matches("greedy").is_some() {
        ("greedy", color_d(&graph, &mut colors))
    } else if main_args.subcommand_matches("best").is_some() {
        let best = color_e(&graph, &mut colors)
            .unwrap_or_else(|e| panic!("best-of-two failed: {}", e));
        match best.winner {
            Winner::Recursive => println!("recursive search won"),
            Winner::Greedy => println!("greedy coloring won"),
        }
        ("best", best.colors_used)
    } else if main_args.subcommand_matches("sdr-recursive").is_some() {
        let params = read_sdr_params(
            &main_args,
            SelectionStrategy::default_recursive(read_exponent(&main_args)),
        );
        let used = sdr_c(&graph, &mut colors, &params)
            .unwrap_or_else(|e| panic!("randomized search failed: {}", e));
        ("sdr-recursive", used)
    } else if main_args.subcommand_matches("sdr-greedy").is_some() {
        let params = read_sdr_params(
            &main_args,
            SelectionStrategy::default_greedy(read_exponent(&main_args)),
        );
        ("sdr-greedy", sdr_d(&graph, &mut colors, &params))
    } else if main_args.subcommand_matches("sdr-best").is_some() {
        let exponent = read_exponent(&main_args);
        let search_params = read_sdr_params(
            &main_args, SelectionStrategy::default_recursive(exponent)
        );
        let greedy_params = read_sdr_params(
            &main_args, SelectionStrategy::default_greedy(exponent)
        );
        let best = sdr_e(&graph, &mut colors, &search_params, &greedy_params)
            .unwrap_or_else(|e| panic!("randomized best-of-two failed: {}", e));
        match best.winner {
            Winner::Recursive => println!("randomized search won"),
            Winner::Greedy => println!("randomized greedy won"),
        }
        ("sdr-best", best.colors_used)
    } else {
        panic!("no algorithm given (see --help)")
    };
    let elapsed = time_init.elapsed().as_secs_f32();
    println!("{} found {} colors in {:.3} seconds", algorithm, colors_used, elapsed);
    let stats = coloring_stats(inst_filename.as_str(), algorithm, colors_used, elapsed);
    export_results(
        &graph, &colors, &stats,
        perf_file, sol_file, instance_type.as_str(), true,
    );
}
