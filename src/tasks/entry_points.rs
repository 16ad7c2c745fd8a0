use crate::cmd::{self, FactorMethod, FactorOutput};
use crate::config::Settings;
use crate::filetypes;
use crate::logging::GlobalLogger;
use crate::FailResult;

use clap::{App, Arg, ArgMatches};
use std::path::Path;

fn wrap_result_main<F>(main: F)
where F: FnOnce() -> FailResult<()>,
{
    main().unwrap_or_else(|e| {
        // errors can happen before there is anyone to log them
        let log = |msg: String| match log::max_level() {
            log::LevelFilter::Off => eprintln!("Error: {}", msg),
            _ => error!("{}", msg),
        };

        for cause in e.iter_chain() {
            log(cause.to_string());
        }

        if ::std::env::var_os("RUST_BACKTRACE").map_or(false, |s| s == "1") {
            log(e.backtrace().to_string());
        }
        ::std::process::exit(1);
    });
}

/// Arguments accepted by every binary.
fn common_args<'a, 'b>() -> Vec<Arg<'a, 'b>> {
    vec![
        Arg::with_name("config")
            .short("c").long("config")
            .takes_value(true).value_name("CONFIG")
            .help("YAML config file (backend selection and settings)"),
        Arg::with_name("output")
            .short("o").long("output")
            .takes_value(true).value_name("FILE")
            .help("write JSON output here instead of to stdout"),
        Arg::with_name("log")
            .long("log")
            .takes_value(true).value_name("FILE")
            .help("also write the log to this file"),
        Arg::with_name("verbose")
            .short("v").long("verbose")
            .multiple(true)
            .help("more logging (repeatable)"),
    ]
}

/// Sets up logging, then reads the config.
fn init_common(m: &ArgMatches<'_>) -> FailResult<Settings> {
    let mut logger = GlobalLogger::default();
    logger.verbosity(m.occurrences_of("verbose"));
    if let Some(path) = m.value_of("log") {
        logger.path(path);
    }
    logger.apply()?;

    Settings::load(m.value_of("config").map(Path::new))
}

fn output_path<'a>(m: &'a ArgMatches<'_>) -> Option<&'a Path>
{ m.value_of("output").map(Path::new) }

fn factors_main(name: &str, about: &str, method: FactorMethod) {
    let matches = {
        App::new(name)
            .version(env!("CARGO_PKG_VERSION"))
            .about(about)
            .args(&common_args())
            .args(&[
                Arg::with_name("matrix")
                    .required(true).value_name("MATRIX")
                    .help("correlation matrix (JSON or YAML list of rows)"),
                Arg::with_name("factors")
                    .short("k").long("factors")
                    .required(true).takes_value(true).value_name("K")
                    .help("number of factors to keep"),
                Arg::with_name("reconstruct")
                    .long("reconstruct")
                    .help("output the implied correlation matrix F F^T instead of F"),
            ])
            .get_matches()
    };

    wrap_result_main(|| {
        let settings = init_common(&matches)?;
        let num_factors = value_t!(matches, "factors", usize)?;
        let output = match matches.is_present("reconstruct") {
            true => FactorOutput::Correlation,
            false => FactorOutput::Factors,
        };

        let correlation = filetypes::read_matrix(Path::new(matches.value_of("matrix").expect("required arg")))?;
        let result = cmd::run_factors(&settings, correlation.view(), num_factors, method, output)?;
        filetypes::write_json(output_path(&matches), &filetypes::matrix_rows(&result))
    });
}

pub fn reduce() {
    factors_main(
        "factorlab-reduce",
        "Factor reduction of a correlation matrix, keeping the diagonal close to one.",
        FactorMethod::Reduction,
    )
}

pub fn factors() {
    factors_main(
        "factorlab-factors",
        "Principal component factors of a symmetric matrix.",
        FactorMethod::Pca,
    )
}

pub fn invert() {
    let matches = {
        App::new("factorlab-invert")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Inverse of a square matrix.")
            .args(&common_args())
            .arg(Arg::with_name("matrix").required(true).value_name("MATRIX").help("square matrix"))
            .get_matches()
    };

    wrap_result_main(|| {
        let settings = init_common(&matches)?;
        let matrix = filetypes::read_matrix(Path::new(matches.value_of("matrix").expect("required arg")))?;
        let inverse = cmd::run_invert(&settings, matrix.view())?;
        filetypes::write_json(output_path(&matches), &filetypes::matrix_rows(&inverse))
    });
}

pub fn solve() {
    let matches = {
        App::new("factorlab-solve")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Least squares solution x of A x = b.")
            .args(&common_args())
            .args(&[
                Arg::with_name("matrix").required(true).value_name("MATRIX").help("the matrix A"),
                Arg::with_name("rhs").required(true).value_name("VECTOR").help("the vector b"),
            ])
            .get_matches()
    };

    wrap_result_main(|| {
        let settings = init_common(&matches)?;
        let matrix = filetypes::read_matrix(Path::new(matches.value_of("matrix").expect("required arg")))?;
        let rhs = filetypes::read_vector(Path::new(matches.value_of("rhs").expect("required arg")))?;
        let x = cmd::run_solve(&settings, matrix.view(), rhs.view())?;
        filetypes::write_json(output_path(&matches), &x.to_vec())
    });
}
