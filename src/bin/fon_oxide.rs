//! Bitmap font compiler
//!
//! Compiles text font descriptions into Windows .FNT or .FON files.
//!
//! Usage:
//!   fon_oxide -o out.fon font1.fd font2.fd
//!   fon_oxide -fnt -o out.fnt font.fd
//!   fon_oxide -fnt2fon -facename System -o out.fon a.fnt b.fnt

use fon_oxide::cli::{self, CliOptions, USAGE};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        println!("{}", USAGE);
        return;
    }

    let result = CliOptions::from_args(args).and_then(|options| cli::run(&options));
    if let Err(e) = result {
        eprintln!("error: {}", e);
        if matches!(e, fon_oxide::Error::Usage(_)) {
            eprintln!("{}", USAGE);
        }
        std::process::exit(1);
    }
}
