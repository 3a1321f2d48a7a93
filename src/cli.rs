use std::path::PathBuf;
use std::process;

use getopts::Options;

pub struct Args {
    pub input: PathBuf,
    pub output: PathBuf,
    pub json: bool,
}

fn opts() -> Options {
    let mut opts = Options::new();
    opts.optflag(
        "h",
        "help",
        concat!("Print the help output of ", env!("CARGO_PKG_NAME")),
    );
    opts.optflag(
        "j",
        "json",
        "Write the schedule as JSON instead of the plain report [Default: false]",
    );
    opts
}

pub fn parse(args: Vec<String>) -> Args {
    let opts = opts();

    let matches = match opts.parse(args) {
        Ok(matches) => matches,
        Err(fail) => {
            eprintln!("{fail}");
            process::exit(1);
        }
    };

    let usage = format!(
        "{} INPUT_FILE OUTPUT_FILE",
        opts.short_usage(env!("CARGO_PKG_NAME"))
    );

    if matches.opt_present("help") {
        println!("{}", opts.usage(&usage));
        process::exit(0);
    }

    let [input, output] = matches.free.as_slice() else {
        eprintln!("{usage}");
        process::exit(1);
    };

    Args {
        input: PathBuf::from(input),
        output: PathBuf::from(output),
        json: matches.opt_present("json"),
    }
}
